use ecwire_device::flash_report;

use crate::cmd::{open_device, DeviceOpts, FlashinfoArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat};

pub fn run(_args: FlashinfoArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    let mut device = open_device(opts)?;
    let report = flash_report(&mut device).map_err(|err| device_error("flash info", err))?;

    print_report(
        "https://schemas.3leaps.dev/ecwire/cli/v1/flash-info.schema.json",
        &report,
        format,
    );
    Ok(SUCCESS)
}
