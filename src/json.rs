use serde::Serialize;

use crate::{DisplayMonitor, Vcp};

/// Serializable input source for JSON output
#[derive(Serialize)]
pub struct InputJson {
    pub code: u32,
    pub name: String,
}

/// Serializable monitor info for JSON output
#[derive(Serialize)]
pub struct MonitorInfoJson {
    pub id: usize,
    pub windows_display_number: u32,
    pub name: String,
    pub display_name: String,
    pub screen_left: i32,
    pub input: InputJson,
}

/// Converts monitor data to JSON serializable format
pub fn monitor_to_json<H: Vcp>(index: usize, monitor: &DisplayMonitor<H>) -> MonitorInfoJson {
    let input = monitor.current_input();

    MonitorInfoJson {
        id: index,
        windows_display_number: monitor.monitor_id(),
        name: monitor.name().to_string(),
        display_name: monitor.display_name(),
        screen_left: monitor.screen_left(),
        input: InputJson {
            code: input.code(),
            name: input.to_string(),
        },
    }
}
