use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ecwire_registry::{capabilities, Access};
use serde::Serialize;

use crate::cmd::{open_device, CapabilitiesArgs, DeviceOpts};
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct CapabilityRow {
    name: &'static str,
    command: String,
    version: u8,
    access: &'static str,
    available: bool,
}

#[derive(Serialize)]
struct CapabilitiesOutput {
    schema_id: &'static str,
    device: String,
    capabilities: Vec<CapabilityRow>,
}

pub fn run(_args: CapabilitiesArgs, opts: &DeviceOpts, format: OutputFormat) -> CliResult<i32> {
    let device = open_device(opts)?;
    let descriptor = device.descriptor();

    let rows: Vec<CapabilityRow> = capabilities()
        .iter()
        .map(|cap| CapabilityRow {
            name: cap.name,
            command: format!("{:#06x}", cap.command),
            version: cap.version,
            access: match cap.access {
                Access::ReadOnly => "ro",
                Access::ReadWrite => "rw",
            },
            available: cap.available(descriptor),
        })
        .collect();

    let out = CapabilitiesOutput {
        schema_id: "https://schemas.3leaps.dev/ecwire/cli/v1/capabilities.schema.json",
        device: descriptor.name.clone(),
        capabilities: rows,
    };

    print_capabilities(&out, format);
    Ok(SUCCESS)
}

fn print_capabilities(out: &CapabilitiesOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NAME", "COMMAND", "VERSION", "ACCESS", "AVAILABLE"]);
            for cap in &out.capabilities {
                table.add_row(vec![
                    cap.name.to_string(),
                    cap.command.clone(),
                    cap.version.to_string(),
                    cap.access.to_string(),
                    if cap.available { "yes" } else { "no" }.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for cap in &out.capabilities {
                println!(
                    "{} command={} version={} access={} available={}",
                    cap.name, cap.command, cap.version, cap.access, cap.available
                );
            }
        }
    }
}
