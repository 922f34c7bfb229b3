use crate::vcp::{FeatureCode, Vcp, VcpError, VcpValue};

/// Monitor handle for platforms without DDC/CI access; it cannot be constructed
#[derive(Debug)]
pub enum Unsupported {}

impl Vcp for Unsupported {
    fn get_vcp_feature(&self, _code: FeatureCode) -> Result<VcpValue, VcpError> {
        match *self {}
    }

    fn set_vcp_feature(&self, _code: FeatureCode, _value: u32) -> Result<(), VcpError> {
        match *self {}
    }
}
