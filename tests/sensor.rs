use std::net::UdpSocket;
use std::path::PathBuf;
use std::time::Duration;

use udpscope::sensor::{format_sample, AdcReader, SampleEmitter, SensorConfig};
use udpscope::{decode_datagram, parse_value};

fn adc_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("udpscope-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn sysfs_path_for_channel() {
    let reader = AdcReader::new(13);
    assert_eq!(
        reader.path().to_str(),
        Some("/sys/bus/iio/devices/iio:device0/in_voltage13_raw")
    );
}

#[test]
fn reads_raw_value() {
    let path = adc_file("raw", "61234\n");
    let value = AdcReader::with_path(&path).read().unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(value, 61234);
}

#[test]
fn garbage_and_missing_files_are_errors() {
    let path = adc_file("garbage", "n/a\n");
    assert!(AdcReader::with_path(&path).read().is_err());
    std::fs::remove_file(&path).ok();

    assert!(AdcReader::with_path("/nonexistent/in_voltage13_raw").read().is_err());
}

#[test]
fn sample_line_parses_on_the_monitor_side() {
    let line = format_sample(75000);
    assert_eq!(line, "adc,75000\n");
    assert_eq!(parse_value(&decode_datagram(line.as_bytes())), Some(75000.0));
}

#[test]
fn emit_sends_one_datagram() {
    let monitor = UdpSocket::bind("127.0.0.1:0").unwrap();
    monitor
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let port = monitor.local_addr().unwrap().port();

    let path = adc_file("emit", "1234");
    let cfg = SensorConfig {
        adc_path: Some(path.clone()),
        target_ip: "127.0.0.1".parse().unwrap(),
        target_port: port,
        ..SensorConfig::default()
    };
    let emitter = SampleEmitter::new(&cfg).unwrap();
    assert_eq!(emitter.emit().unwrap(), 1234);
    std::fs::remove_file(&path).ok();

    let mut buf = [0u8; 64];
    let (n, _) = monitor.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"adc,1234\n");
}
