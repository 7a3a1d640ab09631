//! Multi-field diagnostic reports.
//!
//! Two tolerance policies coexist here and are both deliberate:
//!
//! - The version report anchors on its leading query; once that succeeds,
//!   every later sub-query is best-effort — a failure becomes an inline
//!   `XFER / EC ERROR x / y` annotation and the remaining fields still
//!   render.
//! - The USB-PD mux report anchors on the port-count query; a port whose
//!   detail query fails is omitted from the output entirely, and a report
//!   with no surviving ports is an error rather than empty text.

use std::fmt::Write;

use ecwire_channel::EcChannel;
use ecwire_proto::commands::{
    USB_PD_MUX_DP_ENABLED, USB_PD_MUX_HPD_IRQ, USB_PD_MUX_HPD_LVL, USB_PD_MUX_POLARITY_INVERTED,
    USB_PD_MUX_SAFE_MODE, USB_PD_MUX_TBT_COMPAT_ENABLED, USB_PD_MUX_USB4_ENABLED,
    USB_PD_MUX_USB_ENABLED,
};
use ecwire_proto::responses::image_name;

use crate::device::EcDevice;
use crate::error::{DeviceError, Result};

fn annotation(err: &DeviceError) -> String {
    format!("XFER / EC ERROR {} / {}", err.xfer_code(), err.device_result())
}

/// Render the version report.
///
/// The leading version query failing aborts the whole report; build info,
/// chip info, and board version are each best-effort.
pub fn version_report<C: EcChannel>(device: &mut EcDevice<C>) -> Result<String> {
    let mut out = String::new();

    let version = device.version()?;
    let _ = writeln!(out, "RO version:    {}", version.version_string_ro);
    let _ = writeln!(out, "RW version:    {}", version.version_string_rw);
    let _ = writeln!(out, "Firmware copy: {}", image_name(version.current_image));

    match device.build_info() {
        Ok(info) => {
            let _ = writeln!(out, "Build info:    {info}");
        }
        Err(err) => {
            let _ = writeln!(out, "Build info:    {}", annotation(&err));
        }
    }

    match device.chip_info() {
        Ok(chip) => {
            let _ = writeln!(out, "Chip vendor:   {}", chip.vendor);
            let _ = writeln!(out, "Chip name:     {}", chip.name);
            let _ = writeln!(out, "Chip revision: {}", chip.revision);
        }
        Err(err) => {
            let _ = writeln!(out, "Chip info:     {}", annotation(&err));
        }
    }

    match device.board_version() {
        Ok(board) => {
            let _ = writeln!(out, "Board version: {}", board.board_version);
        }
        Err(err) => {
            let _ = writeln!(out, "Board version: {}", annotation(&err));
        }
    }

    Ok(out)
}

/// Render flash geometry as four `Name size` lines.
pub fn flash_report<C: EcChannel>(device: &mut EcDevice<C>) -> Result<String> {
    let flash = device.flash_info()?;
    Ok(format!(
        "FlashSize {}\nWriteSize {}\nEraseSize {}\nProtectSize {}\n",
        flash.flash_size, flash.write_block_size, flash.erase_block_size,
        flash.protect_block_size,
    ))
}

/// Render per-port USB-PD mux state, one line per responsive port in
/// ascending port order.
pub fn usb_pd_mux_report<C: EcChannel>(device: &mut EcDevice<C>) -> Result<String> {
    let num_ports = device.usb_pd_ports()?;
    let mut out = String::new();

    for port in 0..num_ports {
        let flags = match device.usb_pd_mux_info(port) {
            Ok(flags) => flags,
            Err(err) => {
                tracing::debug!(port, error = %err, "omitting port from mux report");
                continue;
            }
        };

        let _ = write!(out, "Port {port}:");
        let _ = write!(out, " USB={}", bit(flags, USB_PD_MUX_USB_ENABLED));
        let _ = write!(out, " DP={}", bit(flags, USB_PD_MUX_DP_ENABLED));
        let _ = write!(
            out,
            " POLARITY={}",
            if flags & USB_PD_MUX_POLARITY_INVERTED != 0 {
                "INVERTED"
            } else {
                "NORMAL"
            }
        );
        let _ = write!(out, " HPD_IRQ={}", bit(flags, USB_PD_MUX_HPD_IRQ));
        let _ = write!(out, " HPD_LVL={}", bit(flags, USB_PD_MUX_HPD_LVL));
        let _ = write!(out, " SAFE={}", bit(flags, USB_PD_MUX_SAFE_MODE));
        let _ = write!(out, " TBT={}", bit(flags, USB_PD_MUX_TBT_COMPAT_ENABLED));
        let _ = writeln!(out, " USB4={}", bit(flags, USB_PD_MUX_USB4_ENABLED));
    }

    if out.is_empty() {
        return Err(DeviceError::NoPorts);
    }
    Ok(out)
}

/// Single-line AP-driven alternate-mode entry status.
pub fn ap_mode_entry_line<C: EcChannel>(device: &mut EcDevice<C>) -> Result<String> {
    Ok(if device.ap_mode_entry()? { "yes" } else { "no" }.to_string())
}

fn bit(flags: u8, mask: u8) -> u8 {
    u8::from(flags & mask != 0)
}
