//! Switching the input source of a monitor.
//!
//! A switch is reported optimistically as soon as the monitor accepts the
//! command. Some monitors fall back to the previous input when the new one has
//! no signal, so the input is read again after a settle delay and the stored
//! value is corrected to whatever the monitor reports.

use core::fmt;
use std::thread::sleep;
use std::time::Duration;

use thiserror::Error;

use crate::{
    monitor::DisplayMonitor,
    types::InputSource,
    vcp::{INPUT_SELECT, Vcp, VcpError},
};

/// Time a monitor gets to settle (or revert) before its input is read again
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(6);

/// Error type for the switch module
#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Switching {monitor} failed, it may not support DDC/CI")]
    Send {
        monitor: String,
        #[source]
        source: VcpError,
    },
}

/// Progress of a switch, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchStatus {
    Switching { display_name: String },
    AwaitingConfirmation,
    Confirmed { name: String },
    Unconfirmed { name: String },
    Failed,
}

impl fmt::Display for SwitchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchStatus::Switching { display_name } => {
                write!(f, "Switching {} ...", display_name)
            }
            SwitchStatus::AwaitingConfirmation => {
                write!(f, "Command sent, waiting for the monitor to confirm...")
            }
            SwitchStatus::Confirmed { name } => write!(f, "[{}] State confirmed.", name),
            SwitchStatus::Unconfirmed { name } => {
                write!(f, "[{}] Unable to confirm the final state.", name)
            }
            SwitchStatus::Failed => write!(f, "Switch failed, DDC/CI may not be supported."),
        }
    }
}

/// Result of a switch that was accepted by the monitor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The monitor reports the requested input
    Confirmed(InputSource),
    /// The monitor reports a different input than requested
    Reverted {
        requested: InputSource,
        actual: InputSource,
    },
    /// The monitor could not be read back; the requested input is assumed
    Unconfirmed { requested: InputSource },
}

impl SwitchOutcome {
    /// The input the monitor is believed to show after the switch
    pub fn input(&self) -> InputSource {
        match *self {
            SwitchOutcome::Confirmed(input) => input,
            SwitchOutcome::Reverted { actual, .. } => actual,
            SwitchOutcome::Unconfirmed { requested } => requested,
        }
    }
}

/// Sends the switch command and records `target` as the current input
///
/// The monitor is not read back.
pub fn send_input<H: Vcp>(
    monitor: &DisplayMonitor<H>,
    target: InputSource,
) -> Result<(), SwitchError> {
    monitor
        .handle()
        .set_vcp_feature(INPUT_SELECT, target.code())
        .map_err(|source| SwitchError::Send {
            monitor: monitor.display_name(),
            source,
        })?;

    monitor.set_current_input(target);
    Ok(())
}

/// Switches `monitor` to `target` and verifies the result after `settle`
///
/// `on_status` receives every status change in order.
pub fn switch_input<H, F>(
    monitor: &DisplayMonitor<H>,
    target: InputSource,
    settle: Duration,
    mut on_status: F,
) -> Result<SwitchOutcome, SwitchError>
where
    H: Vcp,
    F: FnMut(&SwitchStatus),
{
    on_status(&SwitchStatus::Switching {
        display_name: monitor.display_name(),
    });

    if let Err(e) = send_input(monitor, target) {
        on_status(&SwitchStatus::Failed);
        return Err(e);
    }

    on_status(&SwitchStatus::AwaitingConfirmation);

    if !settle.is_zero() {
        log::debug!("Waiting {:?} for {} to settle", settle, monitor.name());
        sleep(settle);
    }

    match monitor.refresh_input() {
        Ok(actual) => {
            on_status(&SwitchStatus::Confirmed {
                name: monitor.name().to_string(),
            });
            if actual == target {
                Ok(SwitchOutcome::Confirmed(actual))
            } else {
                log::warn!(
                    "{} reports {} instead of {}",
                    monitor.display_name(),
                    actual,
                    target
                );
                Ok(SwitchOutcome::Reverted {
                    requested: target,
                    actual,
                })
            }
        }
        Err(e) => {
            log::debug!("{}: {}", monitor.display_name(), e);
            on_status(&SwitchStatus::Unconfirmed {
                name: monitor.name().to_string(),
            });
            Ok(SwitchOutcome::Unconfirmed { requested: target })
        }
    }
}
