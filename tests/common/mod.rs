use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use displaymux::{FeatureCode, INPUT_SELECT, Vcp, VcpError, VcpValue};

/// In-memory monitor that answers VCP requests for the input select feature
#[derive(Debug, Default)]
pub struct FakeMonitor {
    /// Input currently shown by the monitor
    pub input: Cell<u32>,
    /// Input the monitor falls back to after a switch, if any
    pub revert_to: Option<u32>,
    pub reject_writes: bool,
    /// Results of upcoming reads; `false` makes a read fail
    pub reads: RefCell<VecDeque<bool>>,
    pub writes: RefCell<Vec<(FeatureCode, u32)>>,
}

impl FakeMonitor {
    pub fn showing(input: u32) -> Self {
        Self {
            input: Cell::new(input),
            ..Default::default()
        }
    }
}

impl Vcp for FakeMonitor {
    fn get_vcp_feature(&self, code: FeatureCode) -> Result<VcpValue, VcpError> {
        if code != INPUT_SELECT || !self.reads.borrow_mut().pop_front().unwrap_or(true) {
            return Err(VcpError::Read { code });
        }
        Ok(VcpValue {
            code_type: 1,
            current: self.input.get(),
            maximum: 0xff,
        })
    }

    fn set_vcp_feature(&self, code: FeatureCode, value: u32) -> Result<(), VcpError> {
        if self.reject_writes {
            return Err(VcpError::Write { code, value });
        }
        self.writes.borrow_mut().push((code, value));
        self.input.set(self.revert_to.unwrap_or(value));
        Ok(())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
