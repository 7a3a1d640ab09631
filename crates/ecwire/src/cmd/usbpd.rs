use ecwire_device::usb_pd_mux_report;

use crate::cmd::{open_device, DeviceOpts, UsbpdArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat};

pub fn run(_args: UsbpdArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    let mut device = open_device(opts)?;
    let report =
        usb_pd_mux_report(&mut device).map_err(|err| device_error("usbpd mux info", err))?;

    print_report(
        "https://schemas.3leaps.dev/ecwire/cli/v1/usbpd-mux.schema.json",
        &report,
        format,
    );
    Ok(SUCCESS)
}
