use ecwire_registry::REBOOT_USAGE;

use crate::cmd::{open_device, DeviceOpts, RebootArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_line, OutputFormat};

pub fn run(args: RebootArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    if args.keywords.is_empty() {
        // Mirrors the read surface of the capability: show what it accepts.
        print_line(
            "https://schemas.3leaps.dev/ecwire/cli/v1/reboot-usage.schema.json",
            REBOOT_USAGE,
            format,
        );
        return Ok(SUCCESS);
    }

    let input = args.keywords.join(" ");
    let mut device = open_device(opts)?;
    device
        .reboot(&input)
        .map_err(|err| device_error("reboot", err))?;

    tracing::info!(input = %input, "reboot command accepted");
    Ok(SUCCESS)
}
