use ecwire_registry::parse_angle;

use crate::cmd::{open_device, DeviceOpts, WakeAngleArgs};
use crate::exit::{device_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_line, OutputFormat};

const SCHEMA_ID: &str = "https://schemas.3leaps.dev/ecwire/cli/v1/wake-angle.schema.json";

pub fn run(args: WakeAngleArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    // Parse before opening anything: bad input should not touch the link.
    let value = match &args.value {
        Some(text) => {
            Some(parse_angle(text).map_err(|err| CliError::new(USAGE, err.to_string()))?)
        }
        None => None,
    };

    let mut device = open_device(opts)?;
    let angle = match value {
        Some(angle) => device
            .set_kb_wake_angle(angle)
            .map_err(|err| device_error("set wake angle", err))?,
        None => device
            .kb_wake_angle()
            .map_err(|err| device_error("wake angle", err))?,
    };

    print_line(SCHEMA_ID, angle, format);
    Ok(SUCCESS)
}
