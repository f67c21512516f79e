//! System services backend

use std::ffi::CStr;
use std::path::PathBuf;

use super::ffi;
use crate::services::{ServiceError, SystemServices};

const ROMFS: &CStr = c"romfs";

/// [`SystemServices`] over the libnx applet, romfs and USB services
pub struct NativeServices;

impl SystemServices for NativeServices {
    fn applet_main_loop(&mut self) -> bool {
        unsafe { ffi::appletMainLoop() }
    }

    fn mount_storage(&mut self) -> Result<(), ServiceError> {
        match unsafe { ffi::romfsMountSelf(ROMFS.as_ptr()) } {
            0 => Ok(()),
            code => Err(ServiceError::Mount {
                name: "romfs",
                code,
            }),
        }
    }

    fn unmount_storage(&mut self) -> Result<(), ServiceError> {
        match unsafe { ffi::romfsUnmount(ROMFS.as_ptr()) } {
            0 => Ok(()),
            code => Err(ServiceError::Mount {
                name: "romfs",
                code,
            }),
        }
    }

    fn working_directory(&self) -> Result<PathBuf, ServiceError> {
        Ok(std::env::current_dir()?)
    }

    fn open_url(&mut self, _url: &str) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported("open_url"))
    }

    fn usb_debugger_init(&mut self) -> Result<(), ServiceError> {
        match unsafe { ffi::usbCommsInitialize() } {
            0 => Ok(()),
            code => Err(ServiceError::UsbDebugger(code)),
        }
    }

    fn usb_debugger_end(&mut self) {
        unsafe { ffi::usbCommsExit() };
    }
}
