use ecwire_device::version_report;

use crate::cmd::{open_device, DeviceOpts, InfoArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat};

pub fn run(_args: InfoArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    let mut device = open_device(opts)?;
    let report =
        version_report(&mut device).map_err(|err| device_error("version report", err))?;

    print_report(
        "https://schemas.3leaps.dev/ecwire/cli/v1/version-report.schema.json",
        &report,
        format,
    );
    Ok(SUCCESS)
}
