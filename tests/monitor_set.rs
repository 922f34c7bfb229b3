mod common;

use common::{FakeMonitor, init_logger};
use displaymux::{DisplayMonitor, InputSource, MonitorSet, ScanStatus};

#[test]
fn test_monitors_are_ordered_left_to_right() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let monitor_set = MonitorSet::new(vec![
        DisplayMonitor::new("Center", FakeMonitor::showing(0x0f), 1, 0),
        DisplayMonitor::new("Right", FakeMonitor::showing(0x11), 3, 2560),
        DisplayMonitor::new("Left", FakeMonitor::showing(0x12), 2, -1920),
    ]);
    println!("Monitors:\n{}", monitor_set);

    let names: Vec<_> = monitor_set.monitors().map(|m| m.name()).collect();
    assert_eq!(names, ["Left", "Center", "Right"]);
    assert_eq!(monitor_set.len(), 3);

    Ok(())
}

#[test]
fn test_equal_left_edges_keep_enumeration_order() {
    let monitor_set = MonitorSet::new(vec![
        DisplayMonitor::new("First", FakeMonitor::default(), 1, 0),
        DisplayMonitor::new("Second", FakeMonitor::default(), 1, 0),
        DisplayMonitor::new("Before", FakeMonitor::default(), 2, -100),
    ]);

    let names: Vec<_> = monitor_set.monitors().map(|m| m.name()).collect();
    assert_eq!(names, ["Before", "First", "Second"]);
}

#[test]
fn test_lookup_by_index_and_name() {
    let monitor_set = MonitorSet::new(vec![
        DisplayMonitor::new("DELL U2720Q", FakeMonitor::default(), 2, 3840),
        DisplayMonitor::new("LG HDR 4K", FakeMonitor::default(), 1, 0),
    ]);

    assert_eq!(monitor_set.get(0).map(|m| m.name()), Some("LG HDR 4K"));
    assert!(monitor_set.get(2).is_none());
    assert_eq!(
        monitor_set.find_by_name("DELL U2720Q").map(|m| m.monitor_id()),
        Some(2)
    );
    assert!(monitor_set.find_by_name("Missing").is_none());
}

#[test]
fn test_display_name_uses_windows_number() {
    let monitor = DisplayMonitor::new("Dell U2720Q\0\0\0", FakeMonitor::default(), 1, 0);

    assert_eq!(monitor.name(), "Dell U2720Q");
    assert_eq!(monitor.display_name(), "1. Dell U2720Q");
}

#[test]
fn test_input_is_unknown_until_read() -> Result<(), Box<dyn std::error::Error>> {
    let monitor = DisplayMonitor::new("Generic PnP Monitor", FakeMonitor::showing(0x11), 1, 0);

    assert_eq!(monitor.current_input(), InputSource::Unknown);
    assert_eq!(monitor.current_input_name(), "Unknown / querying...");

    assert_eq!(monitor.refresh_input()?, InputSource::Hdmi1);
    assert_eq!(monitor.current_input_name(), "HDMI 1");

    Ok(())
}

#[test]
fn test_failed_read_keeps_last_known_input() {
    let handle = FakeMonitor::showing(0x0f);
    handle.reads.borrow_mut().extend([true, false]);
    let monitor = DisplayMonitor::new("Generic PnP Monitor", handle, 1, 0);

    assert_eq!(monitor.refresh_input(), Ok(InputSource::DisplayPort1));
    assert!(monitor.refresh_input().is_err());
    assert_eq!(monitor.current_input(), InputSource::DisplayPort1);
}

#[test]
fn test_unlisted_codes_are_shown_raw() -> Result<(), Box<dyn std::error::Error>> {
    let monitor = DisplayMonitor::new("Generic PnP Monitor", FakeMonitor::showing(0x21), 1, 0);

    monitor.refresh_input()?;
    assert_eq!(monitor.current_input(), InputSource::Other(0x21));
    assert_eq!(monitor.current_input_name(), "Unknown input (33)");

    Ok(())
}

#[test]
fn test_high_byte_answers_are_not_unknown() -> Result<(), Box<dyn std::error::Error>> {
    let monitor = DisplayMonitor::new("Generic PnP Monitor", FakeMonitor::showing(0x0100), 1, 0);
    assert_eq!(monitor.refresh_input()?, InputSource::Other(0x0100));
    assert_eq!(monitor.current_input_name(), "Unknown input (256)");

    let monitor = DisplayMonitor::new("Generic PnP Monitor", FakeMonitor::showing(0x0111), 1, 0);
    assert_eq!(monitor.refresh_input()?, InputSource::Other(0x0111));
    assert_eq!(monitor.current_input_name(), "Unknown input (273)");

    Ok(())
}

/// Works for any handle type, not only ones that speak VCP
fn names<H>(monitor_set: &MonitorSet<H>) -> Vec<String> {
    (0..monitor_set.len())
        .filter_map(|i| monitor_set.get(i))
        .map(|m| m.to_string())
        .collect()
}

#[test]
fn test_set_lookups_need_no_vcp_access() {
    let monitor_set = MonitorSet::new(vec![DisplayMonitor::new(
        "LG HDR 4K",
        FakeMonitor::default(),
        1,
        0,
    )]);

    assert!(!monitor_set.is_empty());
    assert_eq!(
        names(&monitor_set),
        ["Monitor { id: 1, name: LG HDR 4K, left: 0, input: Unknown / querying... }"]
    );
}

#[test]
fn test_scan_status_lines() {
    assert_eq!(ScanStatus::Scanning.to_string(), "Scanning monitors...");
    assert_eq!(
        ScanStatus::Complete { count: 2 }.to_string(),
        "Scan complete, found 2 monitor(s)."
    );
}
