// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `contactwave send`: read rows and attachments, broadcast, print the report.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use contactwave_config::WaveConfig;
use contactwave_core::{Attachment, Channel, RawRow, WaveError};
use contactwave_dispatch::router::check_content;
use contactwave_dispatch::{BroadcastOutcome, Broadcaster, WaveClient};
use contactwave_report::{CsvExporter, ReportExporter, TableExporter};

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Delivery channel: sms, whatsapp, or telegram.
    #[arg(long, value_parser = parse_channel)]
    pub channel: Channel,

    /// Message text. May be empty when images are attached.
    #[arg(long, short, default_value = "")]
    pub message: String,

    /// CSV file of selected rows, cells in sheet column order, no header line.
    #[arg(long, conflicts_with = "test_number")]
    pub rows: Option<PathBuf>,

    /// Image to attach. Repeat for several images.
    #[arg(long = "attach", value_name = "FILE")]
    pub attachments: Vec<PathBuf>,

    /// Send to this single number instead of sheet rows.
    #[arg(long)]
    pub test_number: Option<String>,

    /// Also write the delivery report as CSV to this file.
    #[arg(long, value_name = "FILE")]
    pub report_csv: Option<PathBuf>,

    /// Print the notice and report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

fn parse_channel(s: &str) -> Result<Channel, String> {
    s.parse()
        .map_err(|_| format!("unknown channel `{s}`, expected sms, whatsapp, or telegram"))
}

/// Who a send goes to.
#[derive(Debug)]
enum Target {
    Rows(Vec<RawRow>),
    Test(String),
}

/// A send whose local inputs are read and checked, ready to dispatch.
///
/// Built before any login or network call so bad input fails fast.
#[derive(Debug)]
pub struct SendPlan {
    channel: Channel,
    message: String,
    target: Target,
    attachments: Vec<Attachment>,
    report_csv: Option<PathBuf>,
    json: bool,
}

impl SendPlan {
    /// Loads attachments and rows and validates content and selection.
    pub fn prepare(args: SendArgs, config: &WaveConfig) -> Result<Self, WaveError> {
        let attachments = args
            .attachments
            .iter()
            .map(|path| Attachment::from_path(path, config.attachments.max_bytes))
            .collect::<Result<Vec<_>, _>>()?;
        check_content(&args.message, &attachments)?;

        let target = match args.test_number {
            Some(phone) if phone.trim().is_empty() => {
                return Err(WaveError::InvalidRequest(
                    "enter a test mobile number".into(),
                ));
            }
            Some(phone) => Target::Test(phone),
            None => {
                let rows = match &args.rows {
                    Some(path) => read_rows(path)?,
                    None => Vec::new(),
                };
                if rows.is_empty() {
                    return Err(WaveError::InvalidRequest(
                        "select at least one recipient".into(),
                    ));
                }
                Target::Rows(rows)
            }
        };

        Ok(Self {
            channel: args.channel,
            message: args.message,
            target,
            attachments,
            report_csv: args.report_csv,
            json: args.json,
        })
    }

    pub async fn run(self, client: WaveClient) -> Result<(), WaveError> {
        let client = Arc::new(client);
        let broadcaster = Broadcaster::new(client.clone(), client);

        let outcome = match &self.target {
            Target::Test(phone) => {
                broadcaster
                    .send_test(self.channel, &self.message, phone, self.attachments)
                    .await?
            }
            Target::Rows(rows) => {
                broadcaster
                    .send_bulk(self.channel, &self.message, rows, self.attachments)
                    .await?
            }
        };

        if let Some(path) = &self.report_csv {
            let bytes = CsvExporter.export(&outcome.report)?;
            std::fs::write(path, bytes).map_err(|e| WaveError::Export {
                message: format!("failed to write {}", path.display()),
                source: Some(Box::new(e)),
            })?;
        }

        print_outcome(&outcome, self.json)
    }
}

/// Reads selected rows from a header-less CSV file. Rows may be ragged.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, WaveError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| WaveError::InvalidRequest(format!("{}: {e}", path.display())))?;

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().collect::<RawRow>())
                .map_err(|e| WaveError::InvalidRequest(format!("{}: {e}", path.display())))
        })
        .collect()
}

fn print_outcome(outcome: &BroadcastOutcome, json: bool) -> Result<(), WaveError> {
    let export_err = |e: std::io::Error| WaveError::Export {
        message: "failed to write report to stdout".into(),
        source: Some(Box::new(e)),
    };

    let mut stdout = std::io::stdout().lock();
    if json {
        let value = serde_json::json!({
            "notice": outcome.notice,
            "report": outcome.report,
        });
        let text = serde_json::to_string_pretty(&value).map_err(|e| WaveError::Export {
            message: "failed to serialize report".into(),
            source: Some(Box::new(e)),
        })?;
        writeln!(stdout, "{text}").map_err(export_err)?;
    } else {
        if !outcome.notice.is_empty() {
            writeln!(stdout, "{}\n", outcome.notice).map_err(export_err)?;
        }
        let table = TableExporter.export(&outcome.report)?;
        stdout.write_all(&table).map_err(export_err)?;
    }
    Ok(())
}
