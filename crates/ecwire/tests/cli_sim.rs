use std::process::Command;

fn ecwire(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ecwire"))
        .arg("--log-level")
        .arg("error")
        .arg("--sim")
        .args(args)
        .output()
        .expect("ecwire should run")
}

#[test]
fn info_renders_the_version_report() {
    let output = ecwire(&["--format", "raw", "info"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RO version:    host_v2.0.5-ro\n"));
    assert!(stdout.contains("RW version:    host_v2.0.17-rw\n"));
    assert!(stdout.contains("Firmware copy: RW\n"));
    assert!(stdout.contains("Chip vendor:   nuvoton\n"));
    assert!(stdout.contains("Board version: 4\n"));
}

#[test]
fn info_json_carries_the_schema_id() {
    let output = ecwire(&["--format", "json", "info"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("version-report.schema.json"));
    assert!(stdout.contains("RO version:"));
}

#[test]
fn reboot_without_keywords_prints_usage() {
    let output = ecwire(&["--format", "raw", "reboot"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ro|rw|cancel|cold|disable-jump|hibernate|cold-ap-off"));
    assert!(stdout.contains("[at-shutdown]"));
}

#[test]
fn reboot_with_action_keyword_succeeds() {
    let output = ecwire(&["reboot", "ro", "at-shutdown"]);
    assert!(output.status.success());
}

#[test]
fn reboot_with_only_unknown_tokens_exits_usage() {
    let output = ecwire(&["reboot", "bogus"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn wake_angle_shows_then_sets() {
    let output = ecwire(&["--format", "raw", "wake-angle"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "180");

    // Each invocation is a fresh simulated controller, so the set is
    // verified through the echoed acknowledgement.
    let output = ecwire(&["--format", "raw", "wake-angle", "45"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "45");

    let output = ecwire(&["--format", "raw", "wake-angle", "0x2d"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "45");
}

#[test]
fn wake_angle_rejects_garbage_before_touching_the_link() {
    let output = ecwire(&["wake-angle", "sideways"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn usbpd_renders_one_line_per_port() {
    let output = ecwire(&["--format", "raw", "usbpd"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Port 0: USB=1"));
    assert!(lines[1].starts_with("Port 1: USB=1 DP=1"));
}

#[test]
fn secondary_device_name_hides_typec_surfaces() {
    let output = ecwire(&["--name", "cros_pd", "usbpd"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unavailable"));
}

#[test]
fn ap_mode_entry_defaults_to_no() {
    let output = ecwire(&["--format", "raw", "ap-mode-entry"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "no");
}

#[test]
fn capabilities_json_lists_the_table() {
    let output = ecwire(&["--format", "json", "capabilities"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("capabilities.schema.json"));
    for name in ["kb_wake_angle", "reboot", "version", "flashinfo", "usbpdmuxinfo"] {
        assert!(stdout.contains(name), "missing capability {name}");
    }
}

#[test]
fn flashinfo_renders_geometry_lines() {
    let output = ecwire(&["--format", "raw", "flashinfo"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "FlashSize 524288\nWriteSize 4\nEraseSize 4096\nProtectSize 32768\n"
    );
}

#[test]
fn doctor_passes_against_the_sim() {
    let output = ecwire(&["--format", "json", "doctor"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("doctor-report.schema.json"));
    assert!(stdout.contains("\"overall\":\"pass\""));
}
