use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use udpscope::{Message, MonitorConfig, MonitorError, ReceiverEvent, Session};

fn local_cfg(port: u16) -> MonitorConfig {
    MonitorConfig {
        bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port,
        recv_timeout_ms: 50,
        ..MonitorConfig::gui()
    }
}

fn free_port() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap().port()
}

fn send(to: SocketAddr, payloads: &[&[u8]]) {
    let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
    for p in payloads {
        tx.send_to(p, to).unwrap();
    }
}

/// Drain until `n` datagrams have arrived or two seconds pass.
fn collect(session: &Session, n: usize) -> Vec<Message> {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut out = Vec::new();
    while out.len() < n && Instant::now() < deadline {
        for event in session.drain() {
            if let ReceiverEvent::Datagram(m) = event {
                out.push(m);
            }
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    out
}

#[test]
fn receives_trimmed_messages_in_order() {
    let mut session = Session::new(local_cfg(0));
    let addr = session.start().unwrap();
    assert!(session.is_running());

    send(
        addr,
        &[
            b"adc,1\n".as_slice(),
            b"  adc,2,0  ".as_slice(),
            b"adc,\xff3\r\n".as_slice(),
        ],
    );
    let got = collect(&session, 3);
    let texts: Vec<&str> = got.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["adc,1", "adc,2,0", "adc,3"]);
    assert!(got.iter().all(|m| m.source.ip() == IpAddr::V4(Ipv4Addr::LOCALHOST)));

    session.shutdown();
    assert!(!session.is_running());
}

#[test]
fn oversized_datagrams_are_truncated() {
    let mut session = Session::new(local_cfg(0));
    let addr = session.start().unwrap();

    let big = vec![b'a'; 1500];
    send(addr, &[big.as_slice()]);
    let got = collect(&session, 1);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].text.len(), 1024);
}

#[test]
fn stop_then_start_rebinds_the_same_port() {
    let port = free_port();
    let mut session = Session::new(local_cfg(port));
    for round in 0..3 {
        let addr = session
            .start()
            .unwrap_or_else(|e| panic!("round {round}: restart failed: {e}"));
        assert_eq!(addr.port(), port);
        send(addr, &[format!("adc,{round}").as_bytes()]);
        let got = collect(&session, 1);
        assert_eq!(got.len(), 1, "round {round}: datagram not received");
        session.stop();
        assert!(!session.is_running());
    }
    session.shutdown();

    // The socket is gone once the session has shut down.
    UdpSocket::bind(("127.0.0.1", port)).expect("port should be free after shutdown");
}

#[test]
fn receiver_reports_stopped_after_stop() {
    let mut session = Session::new(local_cfg(0));
    session.start().unwrap();
    session.shutdown();
    let events = session.drain();
    assert_eq!(events.last(), Some(&ReceiverEvent::Stopped));
}

#[test]
fn bind_failure_leaves_session_stopped() {
    let holder = UdpSocket::bind("127.0.0.1:0").unwrap();
    let port = holder.local_addr().unwrap().port();

    let mut session = Session::new(local_cfg(port));
    match session.start() {
        Err(MonitorError::Bind { addr, .. }) => assert_eq!(addr.port(), port),
        other => panic!("expected a bind error, got {other:?}"),
    }
    assert!(!session.is_running());
    assert_eq!(session.local_addr(), None);
}

#[test]
fn start_while_running_is_a_no_op() {
    let mut session = Session::new(local_cfg(0));
    let first = session.start().unwrap();
    let second = session.start().unwrap();
    assert_eq!(first, second);
}

#[test]
fn datagrams_after_stop_are_not_delivered() {
    let mut session = Session::new(local_cfg(0));
    let addr = session.start().unwrap();
    session.stop();
    send(addr, &[b"adc,75000,1".as_slice()]);
    session.shutdown();

    let late: Vec<ReceiverEvent> = session
        .drain()
        .into_iter()
        .filter(|e| matches!(e, ReceiverEvent::Datagram(_)))
        .collect();
    assert!(late.is_empty(), "received after stop: {late:?}");
}
