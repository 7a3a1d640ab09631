use std::io::IsTerminal;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    schema_id: &'a str,
    report: &'a str,
}

/// Print a multi-line report.
///
/// Text formats emit the report verbatim (its line layout is the contract);
/// JSON wraps it with a schema id like the other structured outputs.
pub fn print_report(schema_id: &str, report: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ReportOutput { schema_id, report };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty | OutputFormat::Raw => {
            print!("{report}");
        }
    }
}

/// Print a one-line value.
pub fn print_line(schema_id: &str, value: impl std::fmt::Display, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let text = value.to_string();
            let out = ReportOutput {
                schema_id,
                report: &text,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty | OutputFormat::Raw => {
            println!("{value}");
        }
    }
}
