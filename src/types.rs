use core::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Prefix of the GDI device name of a display, e.g. `\\.\DISPLAY2`
const DISPLAY_DEVICE_PREFIX: &str = r"\\.\DISPLAY";

/// VCP values are 16 bits wide (SH and SL bytes)
const MAX_INPUT_CODE: u32 = 0xffff;

/// Input source of a monitor (MCCS VCP `0x60` value)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Not read yet, or the monitor did not answer
    #[default]
    Unknown,
    Vga1,
    Vga2,
    Dvi1,
    Dvi2,
    DisplayPort1,
    DisplayPort2,
    Hdmi1,
    Hdmi2,
    UsbC,
    Other(u32),
}

impl InputSource {
    /// Convert from the value reported by the monitor
    ///
    /// Known inputs are decoded only when the whole value matches.
    pub fn from_code(code: u32) -> Self {
        match code {
            0x00 => InputSource::Unknown,
            0x01 => InputSource::Vga1,
            0x02 => InputSource::Vga2,
            0x03 => InputSource::Dvi1,
            0x04 => InputSource::Dvi2,
            0x0f => InputSource::DisplayPort1,
            0x10 => InputSource::DisplayPort2,
            0x11 => InputSource::Hdmi1,
            0x12 => InputSource::Hdmi2,
            0x1b => InputSource::UsbC,
            other => InputSource::Other(other),
        }
    }

    /// Convert to the value written to the monitor
    pub fn code(&self) -> u32 {
        match self {
            InputSource::Unknown => 0x00,
            InputSource::Vga1 => 0x01,
            InputSource::Vga2 => 0x02,
            InputSource::Dvi1 => 0x03,
            InputSource::Dvi2 => 0x04,
            InputSource::DisplayPort1 => 0x0f,
            InputSource::DisplayPort2 => 0x10,
            InputSource::Hdmi1 => 0x11,
            InputSource::Hdmi2 => 0x12,
            InputSource::UsbC => 0x1b,
            InputSource::Other(code) => *code,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputSource::Unknown => write!(f, "Unknown / querying..."),
            InputSource::Vga1 => write!(f, "VGA 1"),
            InputSource::Vga2 => write!(f, "VGA 2"),
            InputSource::Dvi1 => write!(f, "DVI 1"),
            InputSource::Dvi2 => write!(f, "DVI 2"),
            InputSource::DisplayPort1 => write!(f, "DisplayPort"),
            InputSource::DisplayPort2 => write!(f, "DisplayPort 2"),
            InputSource::Hdmi1 => write!(f, "HDMI 1"),
            InputSource::Hdmi2 => write!(f, "HDMI 2"),
            InputSource::UsbC => write!(f, "USB-C"),
            InputSource::Other(code) => write!(f, "Unknown input ({})", code),
        }
    }
}

/// Errors that occur while parsing an input source from a string
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseInputSourceError {
    #[error("Input source is empty")]
    Empty,
    #[error("Input code {0} is out of range (1-65535)")]
    OutOfRange(u32),
    #[error("Input code 0 is not a selectable input")]
    NotSelectable,
    #[error("Unknown input source: {0}. Expected e.g. `dp`, `hdmi1`, `hdmi2` or a code like `0x11`")]
    UnknownInput(String),
}

impl FromStr for InputSource {
    type Err = ParseInputSourceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseInputSourceError::Empty);
        }

        if let Some(code) = parse_code(trimmed) {
            if code == 0 {
                return Err(ParseInputSourceError::NotSelectable);
            }
            if code > MAX_INPUT_CODE {
                return Err(ParseInputSourceError::OutOfRange(code));
            }
            return Ok(InputSource::from_code(code));
        }

        // "HDMI 1", "hdmi-1" and "hdmi_1" all mean the same thing
        let name: String = trimmed
            .chars()
            .filter(|c| !matches!(*c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match name.as_str() {
            "vga" | "vga1" => Ok(InputSource::Vga1),
            "vga2" => Ok(InputSource::Vga2),
            "dvi" | "dvi1" => Ok(InputSource::Dvi1),
            "dvi2" => Ok(InputSource::Dvi2),
            "dp" | "dp1" | "displayport" | "displayport1" => Ok(InputSource::DisplayPort1),
            "dp2" | "displayport2" => Ok(InputSource::DisplayPort2),
            "hdmi" | "hdmi1" => Ok(InputSource::Hdmi1),
            "hdmi2" => Ok(InputSource::Hdmi2),
            "usbc" | "typec" => Ok(InputSource::UsbC),
            _ => Err(ParseInputSourceError::UnknownInput(s.to_string())),
        }
    }
}

/// Parses decimal (`17`) or hex (`0x11`) input codes
fn parse_code(s: &str) -> Option<u32> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Extracts the Windows display number from a device name like `\\.\DISPLAY3`
///
/// Returns 0 if the name does not carry a number.
pub fn monitor_number(device_name: &str) -> u32 {
    device_name
        .trim_end_matches('\0')
        .strip_prefix(DISPLAY_DEVICE_PREFIX)
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}
