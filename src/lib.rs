//! A library to switch the input source of monitors over DDC/CI.
//!
//! Monitors are enumerated through the Windows monitor configuration API and
//! their input source is read and written through VCP feature `0x60`.

mod monitor;
mod platforms;
mod switch;
mod types;
mod vcp;

#[cfg(feature = "json")]
pub mod json;

pub use monitor::*;
pub use switch::*;
pub use types::*;
pub use vcp::*;

#[cfg(not(target_os = "windows"))]
pub use platforms::Unsupported;
