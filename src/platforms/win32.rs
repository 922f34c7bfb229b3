use std::mem;

use windows::Win32::{
    Devices::Display::{
        DestroyPhysicalMonitor, GetNumberOfPhysicalMonitorsFromHMONITOR,
        GetPhysicalMonitorsFromHMONITOR, GetVCPFeatureAndVCPFeatureReply, MC_VCP_CODE_TYPE,
        PHYSICAL_MONITOR, SetVCPFeature,
    },
    Foundation::{BOOL, HANDLE, LPARAM, RECT},
    Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
    },
};

use crate::{
    monitor::{DisplayMonitor, MonitorError},
    types::monitor_number,
    vcp::{FeatureCode, Vcp, VcpError, VcpValue},
};

/// Handle to a physical monitor obtained through dxva2
///
/// The handle is released when dropped.
#[derive(Debug)]
pub struct PhysicalMonitor {
    handle: HANDLE,
}

impl Vcp for PhysicalMonitor {
    fn get_vcp_feature(&self, code: FeatureCode) -> Result<VcpValue, VcpError> {
        let mut code_type = MC_VCP_CODE_TYPE::default();
        let mut current = 0u32;
        let mut maximum = 0u32;

        let ok = unsafe {
            GetVCPFeatureAndVCPFeatureReply(
                self.handle,
                code,
                Some(&mut code_type as *mut _),
                &mut current,
                Some(&mut maximum as *mut _),
            )
        };

        if ok == 0 {
            return Err(VcpError::Read { code });
        }

        Ok(VcpValue {
            code_type: code_type.0 as u32,
            current,
            maximum,
        })
    }

    fn set_vcp_feature(&self, code: FeatureCode, value: u32) -> Result<(), VcpError> {
        let ok = unsafe { SetVCPFeature(self.handle, code, value) };
        if ok == 0 {
            return Err(VcpError::Write { code, value });
        }
        Ok(())
    }
}

impl Drop for PhysicalMonitor {
    fn drop(&mut self) {
        if let Err(e) = unsafe { DestroyPhysicalMonitor(self.handle) } {
            log::warn!("Failed to release physical monitor handle: {:?}", e);
        }
    }
}

/// Collects every HMONITOR together with its rectangle on the virtual screen
unsafe extern "system" fn collect_monitor(
    hmonitor: HMONITOR,
    _hdc: HDC,
    rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let found = unsafe { &mut *(lparam.0 as *mut Vec<(HMONITOR, RECT)>) };
    let rect = unsafe { rect.as_ref() }.copied().unwrap_or_default();
    found.push((hmonitor, rect));
    BOOL::from(true)
}

/// Reads the GDI device name (`\\.\DISPLAYn`) of a monitor
fn device_name(hmonitor: HMONITOR) -> Option<String> {
    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    let ok = unsafe {
        GetMonitorInfoW(
            hmonitor,
            &mut info as *mut MONITORINFOEXW as *mut MONITORINFO,
        )
    };
    if !ok.as_bool() {
        return None;
    }

    Some(utf16_to_string(&info.szDevice))
}

fn utf16_to_string(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

/// Opens the physical monitors behind one HMONITOR
fn physical_monitors(hmonitor: HMONITOR) -> Result<Vec<PHYSICAL_MONITOR>, MonitorError> {
    let mut count = 0u32;
    unsafe { GetNumberOfPhysicalMonitorsFromHMONITOR(hmonitor, &mut count) }.map_err(|e| {
        MonitorError::WinAPI(format!(
            "GetNumberOfPhysicalMonitorsFromHMONITOR failed: {:?}",
            e
        ))
    })?;

    if count == 0 {
        return Ok(Vec::new());
    }

    let mut physical = vec![PHYSICAL_MONITOR::default(); count as usize];
    unsafe { GetPhysicalMonitorsFromHMONITOR(hmonitor, &mut physical) }.map_err(|e| {
        MonitorError::WinAPI(format!("GetPhysicalMonitorsFromHMONITOR failed: {:?}", e))
    })?;

    Ok(physical)
}

/// Enumerates all physical monitors in enumeration order and reads their input source
pub(crate) fn enumerate_monitors() -> Result<Vec<DisplayMonitor<PhysicalMonitor>>, MonitorError> {
    let mut found = Vec::<(HMONITOR, RECT)>::new();

    let ok = unsafe {
        EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(collect_monitor),
            LPARAM(&mut found as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err(MonitorError::WinAPI("EnumDisplayMonitors failed".to_string()));
    }

    log::debug!("Found {} display monitors", found.len());

    let mut result = Vec::new();

    for (hmonitor, rect) in found {
        let device = device_name(hmonitor).unwrap_or_default();
        let monitor_id = monitor_number(&device);

        let physical = match physical_monitors(hmonitor) {
            Ok(physical) => physical,
            Err(e) => {
                log::debug!("Skipping {}: {}", device, e);
                continue;
            }
        };

        if physical.is_empty() {
            log::debug!("Skipping {}: no physical monitors", device);
            continue;
        }

        for pm in physical {
            // PHYSICAL_MONITOR is packed, copy the fields out before use
            let handle = pm.hPhysicalMonitor;
            let description = pm.szPhysicalMonitorDescription;
            let name = utf16_to_string(&description);

            let monitor =
                DisplayMonitor::new(&name, PhysicalMonitor { handle }, monitor_id, rect.left);

            if let Err(e) = monitor.refresh_input() {
                log::debug!("{}: {}", monitor.display_name(), e);
            }

            log::debug!(
                "{} ({}): {} at x={}",
                device,
                monitor_id,
                monitor.name(),
                rect.left
            );

            result.push(monitor);
        }
    }

    Ok(result)
}
