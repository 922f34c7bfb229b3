#[cfg(target_os = "windows")]
pub(crate) mod win32;

#[cfg(not(target_os = "windows"))]
mod unsupported;

#[cfg(not(target_os = "windows"))]
pub use unsupported::Unsupported;
