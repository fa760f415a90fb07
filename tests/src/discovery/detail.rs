use std::sync::atomic::Ordering;

use pretty_assertions::assert_eq;

use devscout_common::device::{DeviceStatus, DeviceType};
use devscout_core::probes::Fingerprint;

use crate::support::{FakeFingerprint, Lab, PI_MAC, ScriptedPing, ip, mac, port};

fn pi_lab() -> Lab {
    let mut lab = Lab::new();
    lab.neighbors.insert(ip(42), mac(PI_MAC));
    lab.names.insert(ip(42), "octopi".into());
    lab.ping = ScriptedPing::Up(64);
    lab
}

#[tokio::test]
async fn online_host_is_fully_described() {
    let device = pi_lab().service().device_details(ip(42)).await;

    assert_eq!(device.id, "dev-192168142");
    assert_eq!(device.ip, ip(42));
    assert_eq!(device.mac, "b8:27:eb:11:22:33");
    assert_eq!(device.name, "octopi");
    assert_eq!(device.manufacturer, "Raspberry Pi");
    assert_eq!(device.device_type, DeviceType::Computer);
    assert_eq!(device.status, DeviceStatus::Online);
    assert_eq!(device.os.as_deref(), Some("Linux/Unix"));
    assert_eq!(device.ports, Some(Vec::new()));
    assert!(device.last_seen.is_some());
}

#[tokio::test]
async fn repeated_queries_differ_only_in_last_seen() {
    let service = pi_lab().service();

    let first = service.device_details(ip(42)).await;
    let second = service.device_details(ip(42)).await;

    assert!(first.last_seen.is_some() && second.last_seen.is_some());
    assert_eq!(first.without_timestamp(), second.without_timestamp());
}

#[tokio::test]
async fn ttl_buckets_pick_the_os_family() {
    for (ttl, os) in [(64, "Linux/Unix"), (128, "Windows"), (255, "Network Equipment")] {
        let mut lab = Lab::new();
        lab.ping = ScriptedPing::Up(ttl);
        let device = lab.service().device_details(ip(1)).await;
        assert_eq!(device.os.as_deref(), Some(os), "ttl {ttl}");
    }
}

#[tokio::test]
async fn nothing_known_still_yields_a_full_record() {
    let mut lab = Lab::new();
    lab.ping = ScriptedPing::Silent;

    let device = lab.service().device_details(ip(99)).await;

    assert_eq!(device.id, "dev-192168199");
    assert_eq!(device.mac, "Unknown");
    assert_eq!(device.name, "Unknown");
    assert_eq!(device.manufacturer, "Unknown");
    assert_eq!(device.device_type, DeviceType::Unknown);
    assert_eq!(device.status, DeviceStatus::Offline);
    assert_eq!(device.os.as_deref(), Some("Unknown"));
    assert_eq!(device.ports, Some(Vec::new()));
    assert!(device.last_seen.is_some());
}

#[tokio::test]
async fn unreachable_host_is_offline() {
    let mut lab = pi_lab();
    lab.ping = ScriptedPing::Down;

    let device = lab.service().device_details(ip(42)).await;
    assert_eq!(device.status, DeviceStatus::Offline);
    assert_eq!(device.os.as_deref(), Some("Unknown"));
    // other steps still ran
    assert_eq!(device.name, "octopi");
    assert_eq!(device.manufacturer, "Raspberry Pi");
}

#[tokio::test]
async fn broken_prober_leaves_status_unknown() {
    let mut lab = pi_lab();
    lab.ping = ScriptedPing::Broken;

    let device = lab.service().device_details(ip(42)).await;
    assert_eq!(device.status, DeviceStatus::Unknown);
    assert_eq!(device.os.as_deref(), Some("Unknown"));
    assert_eq!(device.mac, "b8:27:eb:11:22:33");
}

#[tokio::test]
async fn fingerprint_refines_os_and_fills_ports() {
    let mut lab = pi_lab();
    lab.fingerprint = Some(FakeFingerprint::new(Some(Fingerprint {
        os_guess: Some("Linux 5.0 - 5.14".into()),
        open_ports: vec![port(22, "ssh"), port(80, "http")],
    })));

    let device = lab.service().device_details(ip(42)).await;
    assert_eq!(device.os.as_deref(), Some("Linux 5.0 - 5.14"));
    assert_eq!(device.ports, Some(vec![port(22, "ssh"), port(80, "http")]));
}

#[tokio::test]
async fn fingerprint_without_os_guess_keeps_ttl_os() {
    let mut lab = pi_lab();
    lab.fingerprint = Some(FakeFingerprint::new(Some(Fingerprint {
        os_guess: None,
        open_ports: vec![port(443, "https")],
    })));

    let device = lab.service().device_details(ip(42)).await;
    assert_eq!(device.os.as_deref(), Some("Linux/Unix"));
    assert_eq!(device.ports, Some(vec![port(443, "https")]));
}

#[tokio::test]
async fn failed_fingerprint_degrades_gracefully() {
    let mut lab = pi_lab();
    lab.fingerprint = Some(FakeFingerprint::new(None));

    let with_failure = lab.service().device_details(ip(42)).await;
    let without_prober = pi_lab().service().device_details(ip(42)).await;

    assert_eq!(with_failure.without_timestamp(), without_prober.without_timestamp());
}

#[tokio::test]
async fn unavailable_fingerprint_is_never_run() {
    let fingerprint = FakeFingerprint::new(Some(Fingerprint::default())).unavailable();
    let calls = fingerprint.calls();
    let mut lab = pi_lab();
    lab.fingerprint = Some(fingerprint);

    let service = lab.service();
    let status = service.fingerprint_status().cloned();
    service.device_details(ip(42)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(status.map(|s| s.available), Some(false));
}

#[tokio::test]
async fn offline_host_is_not_fingerprinted() {
    let fingerprint = FakeFingerprint::new(Some(Fingerprint::default()));
    let calls = fingerprint.calls();
    let mut lab = pi_lab();
    lab.ping = ScriptedPing::Down;
    lab.fingerprint = Some(fingerprint);

    lab.service().device_details(ip(42)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
