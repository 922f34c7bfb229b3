use core::fmt;
use std::cell::Cell;

use thiserror::Error;

use crate::{
    types::InputSource,
    vcp::{INPUT_SELECT, Vcp, VcpError},
};

/// Error type for the monitor module
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Error when calling the Windows API: {0}")]
    WinAPI(String),
    #[error("Monitor enumeration is only supported on Windows")]
    Unsupported,
    #[error("Error in VCP request")]
    Vcp(#[from] VcpError),
}

type Result<T = ()> = std::result::Result<T, MonitorError>;

/// A physical monitor and its last known input source
#[derive(Debug)]
pub struct DisplayMonitor<H> {
    name: String,
    handle: H,
    /// Windows display number (`\\.\DISPLAYn`), 0 if unknown
    monitor_id: u32,
    /// Left edge of the monitor on the virtual screen
    screen_left: i32,
    current_input: Cell<InputSource>,
}

impl<H: Vcp> DisplayMonitor<H> {
    /// Creates a monitor whose input has not been read yet
    pub fn new(name: &str, handle: H, monitor_id: u32, screen_left: i32) -> Self {
        Self {
            name: name.replace('\0', "").trim().to_string(),
            handle,
            monitor_id,
            screen_left,
            current_input: Cell::new(InputSource::Unknown),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn monitor_id(&self) -> u32 {
        self.monitor_id
    }

    pub fn screen_left(&self) -> i32 {
        self.screen_left
    }

    /// Name as shown to the user, e.g. `1. Dell U2720Q`
    pub fn display_name(&self) -> String {
        format!("{}. {}", self.monitor_id, self.name)
    }

    pub fn current_input(&self) -> InputSource {
        self.current_input.get()
    }

    pub fn set_current_input(&self, input: InputSource) {
        self.current_input.set(input);
    }

    pub fn current_input_name(&self) -> String {
        self.current_input.get().to_string()
    }

    /// Reads the input source from the monitor and stores it
    ///
    /// On failure the stored input is left untouched.
    pub fn refresh_input(&self) -> std::result::Result<InputSource, VcpError> {
        let value = self.handle.get_vcp_feature(INPUT_SELECT)?;
        let input = InputSource::from_code(value.current);
        log::trace!(
            "{}: input select reply {:?} -> {}",
            self.display_name(),
            value,
            input
        );
        self.current_input.set(input);
        Ok(input)
    }
}

impl<H> fmt::Display for DisplayMonitor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monitor {{ id: {}, name: {}, left: {}, input: {} }}",
            self.monitor_id,
            self.name,
            self.screen_left,
            self.current_input.get()
        )
    }
}

/// Progress of a monitor scan, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    Scanning,
    Complete { count: usize },
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStatus::Scanning => write!(f, "Scanning monitors..."),
            ScanStatus::Complete { count } => {
                write!(f, "Scan complete, found {} monitor(s).", count)
            }
        }
    }
}

/// The monitors attached to the system, ordered left to right
#[derive(Debug)]
pub struct MonitorSet<H> {
    monitors: Vec<DisplayMonitor<H>>,
}

impl<H> MonitorSet<H> {
    /// Builds a set from monitors in enumeration order
    ///
    /// Monitors are sorted by their left edge; ties keep enumeration order.
    pub fn new(mut monitors: Vec<DisplayMonitor<H>>) -> Self {
        monitors.sort_by_key(|m| m.screen_left);
        Self { monitors }
    }

    /// Iterates over the monitors in this set
    pub fn monitors(&self) -> impl ExactSizeIterator<Item = &DisplayMonitor<H>> {
        self.monitors.iter()
    }

    /// Returns the monitor at `index`
    pub fn get(&self, index: usize) -> Option<&DisplayMonitor<H>> {
        self.monitors.get(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&DisplayMonitor<H>> {
        self.monitors.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<H> fmt::Display for MonitorSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MonitorSet {{ monitors: [")?;
        for (i, monitor) in self.monitors.iter().enumerate() {
            if i > 0 {
                writeln!(f, ", ")?;
            }
            write!(f, "    {}", monitor)?;
        }
        write!(f, "\n] }}")
    }
}

#[cfg(target_os = "windows")]
pub use crate::platforms::win32::PhysicalMonitor;

/// Returns all physical monitors with their current input source
#[cfg(target_os = "windows")]
pub fn query_monitors() -> Result<MonitorSet<PhysicalMonitor>> {
    let monitors = crate::platforms::win32::enumerate_monitors()?;
    Ok(MonitorSet::new(monitors))
}

/// Returns all physical monitors with their current input source
#[cfg(not(target_os = "windows"))]
pub fn query_monitors() -> Result<MonitorSet<crate::platforms::Unsupported>> {
    Err(MonitorError::Unsupported)
}
