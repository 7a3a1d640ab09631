use ecwire_device::ap_mode_entry_line;

use crate::cmd::{open_device, ApModeEntryArgs, DeviceOpts};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_line, OutputFormat};

pub fn run(_args: ApModeEntryArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    let mut device = open_device(opts)?;
    let line =
        ap_mode_entry_line(&mut device).map_err(|err| device_error("ap mode entry", err))?;

    print_line(
        "https://schemas.3leaps.dev/ecwire/cli/v1/ap-mode-entry.schema.json",
        line,
        format,
    );
    Ok(SUCCESS)
}
