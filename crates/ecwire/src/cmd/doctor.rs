use ecwire_proto::Feature;
use serde::Serialize;

use crate::cmd::{open_channel, DeviceOpts, DoctorArgs};
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_id: &'static str,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    let mut checks = Vec::new();
    run_link_checks(opts, &mut checks);

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput {
        schema_id: "https://schemas.3leaps.dev/ecwire/cli/v1/doctor-report.schema.json",
        checks,
        overall,
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn run_link_checks(opts: &DeviceOpts, checks: &mut Vec<CheckResult>) {
    let channel = match open_channel(opts) {
        Ok(channel) => {
            checks.push(pass("channel_open", open_detail(opts)));
            channel
        }
        Err(err) => {
            checks.push(fail("channel_open", err.to_string()));
            return;
        }
    };

    let device = match ecwire_device::probe(channel, opts.name.as_str(), opts.cmd_offset) {
        Ok(device) => {
            checks.push(pass("hello_echo", "controller answered the echo probe"));
            device
        }
        Err(err) => {
            checks.push(fail("hello_echo", err.to_string()));
            return;
        }
    };

    let features = device.descriptor().features;
    let mut advertised = Vec::new();
    for (feature, label) in [
        (Feature::Flash, "flash"),
        (Feature::Keyboard, "keyboard"),
        (Feature::MotionSense, "motion-sense"),
        (Feature::UsbPd, "usb-pd"),
        (Feature::TypecCmd, "typec-cmd"),
    ] {
        if features.has(feature) {
            advertised.push(label);
        }
    }
    checks.push(CheckResult {
        name: "feature_snapshot".to_string(),
        status: CheckStatus::Info,
        detail: if advertised.is_empty() {
            "no optional features advertised".to_string()
        } else {
            advertised.join(", ")
        },
    });

    let available = ecwire_registry::capabilities()
        .iter()
        .filter(|cap| cap.available(device.descriptor()))
        .count();
    checks.push(pass(
        "capabilities",
        format!(
            "{available} of {} capabilities available",
            ecwire_registry::capabilities().len()
        ),
    ));
}

fn open_detail(opts: &DeviceOpts) -> String {
    if opts.sim {
        "simulated controller".to_string()
    } else {
        format!("opened {}", opts.device.display())
    }
}

fn pass(name: &str, detail: impl Into<String>) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Pass,
        detail: detail.into(),
    }
}

fn fail(name: &str, detail: impl Into<String>) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Fail,
        detail: detail.into(),
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("ecwire doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<18} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
    }
}
