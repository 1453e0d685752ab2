use std::net::{IpAddr, Ipv4Addr};

use udpscope::config::{load_from_path, merge_json};
use udpscope::sensor::SensorConfig;
use udpscope::{MonitorConfig, MonitorError};

#[test]
fn defaults_match_the_deployment() {
    let cfg = MonitorConfig::gui();
    assert_eq!(cfg.bind_addr().to_string(), "192.168.42.10:5000");
    assert_eq!(cfg.recv_timeout().as_millis(), 1000);
    assert_eq!(cfg.poll_interval().as_millis(), 200);
    assert_eq!(cfg.max_datagram, 1024);
    assert_eq!(cfg.window_capacity, 50);
    assert_eq!(cfg.presence_threshold, 50_000.0);
    assert_eq!(cfg.presence_label, "Presença detectada");
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_override_keeps_other_fields() {
    let base = MonitorConfig::gui();
    let cfg = merge_json(&base, r#"{ "bind_ip": "127.0.0.1", "window_capacity": 10 }"#).unwrap();
    assert_eq!(cfg.bind_ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(cfg.window_capacity, 10);
    assert_eq!(cfg.port, base.port);
    assert_eq!(cfg.title, base.title);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = merge_json(&MonitorConfig::gui(), r#"{ "treshold": 1.0 }"#).unwrap_err();
    assert!(matches!(err, MonitorError::Config(_)), "got {err:?}");
}

#[test]
fn non_object_is_rejected() {
    assert!(merge_json(&MonitorConfig::gui(), "[1, 2]").is_err());
    assert!(merge_json(&MonitorConfig::gui(), "not json").is_err());
}

#[test]
fn sensor_config_from_file() {
    let path = std::env::temp_dir().join(format!("udpscope-cfg-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "target_ip": "127.0.0.1", "period_ms": 500 }"#).unwrap();
    let cfg = load_from_path(&SensorConfig::default(), &path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.target().to_string(), "127.0.0.1:5000");
    assert_eq!(cfg.period_ms, 500);
    assert_eq!(cfg.adc_channel, 13);
}

#[test]
fn missing_file_is_a_config_error() {
    let path = std::env::temp_dir().join("udpscope-definitely-missing.json");
    let err = load_from_path(&MonitorConfig::gui(), &path).unwrap_err();
    assert!(err.to_string().contains("udpscope-definitely-missing.json"));
}

#[test]
fn sensor_config_rejects_zero_period() {
    assert!(SensorConfig::default().validate().is_ok());
    let cfg = merge_json(&SensorConfig::default(), r#"{ "period_ms": 0 }"#).unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("period_ms"), "got {err}");

    let cfg = SensorConfig {
        board_threshold: f64::NAN,
        ..SensorConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(MonitorError::Config(_))));
}
