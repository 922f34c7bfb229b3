use thiserror::Error;

/// VCP feature code
pub type FeatureCode = u8;

/// MCCS "Input Select" feature
pub const INPUT_SELECT: FeatureCode = 0x60;

/// Error type for VCP requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VcpError {
    #[error("Failed to read VCP feature {code:#04x}, the monitor may not support DDC/CI")]
    Read { code: FeatureCode },
    #[error("Failed to write {value} to VCP feature {code:#04x}, the monitor may not support DDC/CI")]
    Write { code: FeatureCode, value: u32 },
}

/// Reply to a VCP feature request
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VcpValue {
    /// Momentary (0) or set parameter (1)
    pub code_type: u32,
    pub current: u32,
    pub maximum: u32,
}

/// Access to the VCP features of a physical monitor
pub trait Vcp {
    fn get_vcp_feature(&self, code: FeatureCode) -> Result<VcpValue, VcpError>;

    fn set_vcp_feature(&self, code: FeatureCode, value: u32) -> Result<(), VcpError>;
}
