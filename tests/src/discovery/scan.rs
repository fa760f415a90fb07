use std::net::Ipv4Addr;
use std::sync::atomic::Ordering;
use std::time::Duration;

use pretty_assertions::assert_eq;

use devscout_common::device::{Device, DeviceStatus, DeviceType};
use devscout_common::network::range::NetworkRange;

use crate::support::{FakeSource, Lab, Outcome, PI_MAC, ip, record};

fn names(devices: &[Device]) -> Vec<&str> {
    devices.iter().map(|d| d.name.as_str()).collect()
}

/*************************************************************
                        Fallback order
**************************************************************/

#[tokio::test]
async fn failing_source_falls_through_to_next() {
    let a = FakeSource::new("a", Outcome::Fail);
    let b = FakeSource::new("b", Outcome::Records(vec![record(10, None)]));
    let c = FakeSource::new("c", Outcome::Records(vec![record(20, None)]));
    let (a_calls, b_calls, c_calls) = (a.calls(), b.calls(), c.calls());

    let devices = Lab::new().source(a).source(b).source(c).service().scan().await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, ip(10));
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(c_calls.load(Ordering::SeqCst), 0, "sources must not be merged");
}

#[tokio::test]
async fn empty_result_falls_through_to_next() {
    let devices = Lab::new()
        .source(FakeSource::new("cache", Outcome::Records(Vec::new())))
        .source(FakeSource::new("sweep", Outcome::Records(vec![record(7, None)])))
        .service()
        .scan()
        .await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, ip(7));
}

#[tokio::test]
async fn every_source_failing_is_an_empty_scan() {
    let devices = Lab::new()
        .source(FakeSource::new("a", Outcome::Fail))
        .source(FakeSource::new("b", Outcome::Fail))
        .service()
        .scan()
        .await;

    assert_eq!(devices, Vec::<Device>::new());
}

#[tokio::test]
async fn no_sources_at_all_is_an_empty_scan() {
    assert!(Lab::new().service().scan().await.is_empty());
}

#[tokio::test]
async fn hanging_source_is_abandoned() {
    let mut lab = Lab::new()
        .source(FakeSource::new("stuck", Outcome::Hang))
        .source(FakeSource::new("cache", Outcome::Records(vec![record(3, None)])));
    lab.config.probe_timeout = Duration::from_millis(50);

    let devices = lab.service().scan().await;
    assert_eq!(devices.len(), 1);
}

#[tokio::test]
async fn unavailable_sources_are_never_tried() {
    let sweep = FakeSource::new("sweep", Outcome::Records(vec![record(1, None)])).unavailable();
    let cache = FakeSource::new("cache", Outcome::Records(vec![record(2, None)]));
    let sweep_calls = sweep.calls();

    let service = Lab::new().source(sweep).source(cache).service();
    assert_eq!(service.active_sources(), vec!["cache"]);
    assert_eq!(service.source_status().len(), 2);
    assert!(!service.source_status()[0].available);

    let devices = service.scan().await;
    assert_eq!(devices[0].ip, ip(2));
    assert_eq!(sweep_calls.load(Ordering::SeqCst), 0);
}

/*************************************************************
                        Record building
**************************************************************/

#[tokio::test]
async fn raspberry_pi_without_a_name() {
    let devices = Lab::new()
        .source(FakeSource::new(
            "sweep",
            Outcome::Records(vec![record(42, Some(PI_MAC))]),
        ))
        .service()
        .scan()
        .await;

    assert_eq!(
        devices,
        vec![Device {
            id: "dev-1".into(),
            ip: Ipv4Addr::new(192, 168, 1, 42),
            mac: "b8:27:eb:11:22:33".into(),
            name: "Device-1".into(),
            device_type: DeviceType::Computer,
            manufacturer: "Raspberry Pi".into(),
            status: DeviceStatus::Online,
            ports: None,
            os: None,
            last_seen: None,
        }]
    );
}

#[tokio::test]
async fn unresolved_names_follow_discovery_order() {
    let records = vec![
        record(30, Some([0x00, 0x17, 0x88, 0, 0, 1])),
        record(10, None),
        record(20, Some([0x02, 0, 0, 0, 0, 2])),
    ];
    let devices = Lab::new()
        .source(FakeSource::new("sweep", Outcome::Records(records)))
        .service()
        .scan()
        .await;

    assert_eq!(names(&devices), vec!["Device-1", "Device-2", "Device-3"]);
    let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["dev-1", "dev-2", "dev-3"]);
    assert!(devices.iter().all(|d| d.status == DeviceStatus::Online));
}

#[tokio::test]
async fn resolved_names_are_classified() {
    let mut lab = Lab::new().source(FakeSource::new(
        "sweep",
        Outcome::Records(vec![record(5, None), record(6, None), record(7, None)]),
    ));
    lab.names.insert(ip(5), "Johns-iPhone".into());
    lab.names.insert(ip(7), "living-room-tv".into());

    let devices = lab.service().scan().await;

    assert_eq!(names(&devices), vec!["Johns-iPhone", "Device-2", "living-room-tv"]);
    let types: Vec<DeviceType> = devices.iter().map(|d| d.device_type).collect();
    assert_eq!(
        types,
        vec![DeviceType::Smartphone, DeviceType::Unknown, DeviceType::Entertainment]
    );
}

#[tokio::test]
async fn name_lookups_bounded_to_one_still_keep_order() {
    let records: Vec<_> = (1..=20).map(|n| record(n, None)).collect();
    let mut lab = Lab::new().source(FakeSource::new("sweep", Outcome::Records(records)));
    lab.config.concurrency = 1;
    lab.names.insert(ip(20), "last".into());

    let devices = lab.service().scan().await;
    assert_eq!(devices.len(), 20);
    assert_eq!(devices[0].name, "Device-1");
    assert_eq!(devices[19].name, "last");
    assert_eq!(devices[19].id, "dev-20");
}

#[tokio::test]
async fn duplicate_addresses_collapse() {
    let records = vec![
        record(1, None),
        record(2, Some([0x02, 0, 0, 0, 0, 2])),
        record(1, Some(PI_MAC)),
        record(2, None),
    ];
    let devices = Lab::new()
        .source(FakeSource::new("table", Outcome::Records(records)))
        .service()
        .scan()
        .await;

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].ip, ip(1));
    assert_eq!(devices[0].manufacturer, "Raspberry Pi");
    assert_eq!(devices[1].mac, "02:00:00:00:00:02");
    assert_eq!(devices[1].manufacturer, "Unknown");
}

#[tokio::test]
async fn back_to_back_scans_both_start_at_one() {
    let service = Lab::new()
        .source(FakeSource::new(
            "sweep",
            Outcome::Records(vec![record(1, None), record(2, None)]),
        ))
        .service();

    let first = service.scan().await;
    let second = service.scan().await;
    assert_eq!(first, second);
    assert_eq!(names(&second), vec!["Device-1", "Device-2"]);
}

/*************************************************************
                         Range choice
**************************************************************/

#[tokio::test]
async fn scan_covers_the_gateway_slash_24() {
    let source = FakeSource::new("sweep", Outcome::Records(Vec::new()));
    let ranges = source.ranges();
    let mut lab = Lab::new().source(source);
    lab.gateway = Some(Ipv4Addr::new(10, 0, 0, 1));

    lab.service().scan().await;
    let seen: Vec<String> = ranges.lock().unwrap().iter().map(|r| r.to_string()).collect();
    assert_eq!(seen, vec!["10.0.0.0/24"]);
}

#[tokio::test]
async fn scan_without_gateway_uses_fallback_range() {
    let source = FakeSource::new("sweep", Outcome::Records(Vec::new()));
    let ranges = source.ranges();
    let mut lab = Lab::new().source(source);
    lab.gateway = None;

    let service = lab.service();
    assert_eq!(service.network_range().await.to_string(), "192.168.1.0/24");
    service.scan().await;
    assert_eq!(*ranges.lock().unwrap(), vec![NetworkRange::default()]);
}

#[tokio::test]
async fn configured_range_overrides_gateway() {
    let source = FakeSource::new("sweep", Outcome::Records(Vec::new()));
    let ranges = source.ranges();
    let mut lab = Lab::new().source(source);
    let custom: NetworkRange = "172.16.0.0/16".parse().unwrap();
    lab.config.range = Some(custom);

    lab.service().scan().await;
    assert_eq!(*ranges.lock().unwrap(), vec![custom]);
}
