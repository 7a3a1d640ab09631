mod cmd;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::{Command, DeviceOpts};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ecwire", version, about = "Host-side embedded-controller command tool")]
struct Cli {
    /// EC character device node.
    #[arg(long, value_name = "PATH", default_value = "/dev/cros_ec", global = true)]
    device: PathBuf,

    /// Talk to a built-in simulated controller instead of hardware.
    #[arg(long, global = true)]
    sim: bool,

    /// Logical device name on the link.
    #[arg(long, value_name = "NAME", default_value = "cros_ec", global = true)]
    name: String,

    /// Command-code offset for secondary controllers on a shared link.
    #[arg(long, value_name = "N", default_value = "0", global = true)]
    cmd_offset: u16,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let opts = DeviceOpts {
        device: cli.device,
        sim: cli.sim,
        name: cli.name,
        cmd_offset: cli.cmd_offset,
    };

    match cmd::run(cli.command, &opts, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reboot_subcommand_with_keywords() {
        let cli = Cli::try_parse_from(["ecwire", "--sim", "reboot", "ro", "at-shutdown"])
            .expect("reboot args should parse");

        assert!(cli.sim);
        assert!(matches!(cli.command, Command::Reboot(_)));
    }

    #[test]
    fn parses_wake_angle_with_and_without_value() {
        let cli = Cli::try_parse_from(["ecwire", "wake-angle"]).expect("show form should parse");
        assert!(matches!(cli.command, Command::WakeAngle(_)));

        let cli =
            Cli::try_parse_from(["ecwire", "wake-angle", "45"]).expect("set form should parse");
        match cli.command {
            Command::WakeAngle(args) => assert_eq!(args.value.as_deref(), Some("45")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn device_defaults_to_the_canonical_node() {
        let cli = Cli::try_parse_from(["ecwire", "info"]).expect("info should parse");
        assert_eq!(cli.device, PathBuf::from("/dev/cros_ec"));
        assert_eq!(cli.name, "cros_ec");
        assert_eq!(cli.cmd_offset, 0);
    }
}
