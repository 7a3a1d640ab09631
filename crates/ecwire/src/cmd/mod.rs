use std::path::PathBuf;

use clap::{Args, Subcommand};
use ecwire_channel::EcChannel;
use ecwire_device::{probe, EcDevice, SimEc};

use crate::exit::{device_error, CliResult};
use crate::output::OutputFormat;

pub mod ap_mode_entry;
pub mod capabilities;
pub mod doctor;
pub mod flashinfo;
pub mod info;
pub mod reboot;
pub mod usbpd;
pub mod version;
pub mod wake_angle;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List capabilities and their availability on this device.
    Capabilities(CapabilitiesArgs),
    /// Show the version report (firmware, build, chip, board).
    Info(InfoArgs),
    /// Show flash geometry.
    Flashinfo(FlashinfoArgs),
    /// Reboot the controller. Without keywords, prints the keyword usage.
    Reboot(RebootArgs),
    /// Show or set the keyboard wake angle.
    WakeAngle(WakeAngleArgs),
    /// Show per-port USB-PD mux state.
    Usbpd(UsbpdArgs),
    /// Show whether alternate-mode entry is AP-driven.
    ApModeEntry(ApModeEntryArgs),
    /// Run controller health checks.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// How to reach the controller, from the global CLI flags.
#[derive(Debug)]
pub struct DeviceOpts {
    pub device: PathBuf,
    pub sim: bool,
    pub name: String,
    pub cmd_offset: u16,
}

pub fn run(command: Command, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Capabilities(args) => capabilities::run(args, opts, format),
        Command::Info(args) => info::run(args, opts, format),
        Command::Flashinfo(args) => flashinfo::run(args, opts, format),
        Command::Reboot(args) => reboot::run(args, opts, format),
        Command::WakeAngle(args) => wake_angle::run(args, opts, format),
        Command::Usbpd(args) => usbpd::run(args, opts, format),
        Command::ApModeEntry(args) => ap_mode_entry::run(args, opts, format),
        Command::Doctor(args) => doctor::run(args, opts, format),
        Command::Version(args) => version::run(args),
    }
}

/// Open the channel selected by the global flags and probe it.
pub(crate) fn open_device(opts: &DeviceOpts) -> CliResult<EcDevice<Box<dyn EcChannel>>> {
    let channel = open_channel(opts)?;
    probe(channel, opts.name.as_str(), opts.cmd_offset)
        .map_err(|err| device_error("probe failed", err))
}

pub(crate) fn open_channel(opts: &DeviceOpts) -> CliResult<Box<dyn EcChannel>> {
    if opts.sim {
        return Ok(Box::new(SimEc::new()));
    }

    #[cfg(target_os = "linux")]
    {
        let channel = ecwire_device::DevChannel::open(&opts.device)
            .map_err(|err| crate::exit::channel_error("open device", err))?;
        Ok(Box::new(channel))
    }

    #[cfg(not(target_os = "linux"))]
    {
        Err(crate::exit::CliError::new(
            crate::exit::FAILURE,
            "hardware access requires Linux; use --sim",
        ))
    }
}

#[derive(Args, Debug, Default)]
pub struct CapabilitiesArgs {}

#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Args, Debug, Default)]
pub struct FlashinfoArgs {}

#[derive(Args, Debug)]
pub struct RebootArgs {
    /// Action keyword plus optional flags, e.g. `ro at-shutdown`.
    pub keywords: Vec<String>,
}

#[derive(Args, Debug)]
pub struct WakeAngleArgs {
    /// New angle in degrees (decimal, 0x hex, or leading-zero octal).
    /// Omit to show the current angle.
    pub value: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct UsbpdArgs {}

#[derive(Args, Debug, Default)]
pub struct ApModeEntryArgs {}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
