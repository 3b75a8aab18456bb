//! Command-line front-end.
//!
//! Each subcommand walks the wizard up to the step it needs and prints the
//! relevant part of the view state.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use common::models::{ColumnSummary, UploadFile};
use db_client::DatabaseApi;

use crate::alert::AlertQueue;
use crate::controller::WizardController;
use crate::state::{ViewState, WizardStage};

/// Browse uploaded databases table by table and column by column
#[derive(Parser, Debug)]
#[command(name = "viewer")]
#[command(version)]
pub struct Args {
    /// Service origin (overrides VIEWER_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Only log failures, do not print alerts
    #[arg(long)]
    pub no_alerts: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List uploaded databases
    Databases,
    /// Upload a database file (.db, .csv or .txt)
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the tables of a database
    Tables { database: String },
    /// List the columns of a table
    Columns { database: String, table: String },
    /// Show the summary of a column
    Show {
        database: String,
        table: String,
        column: String,
        /// Maximum number of values printed
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

/// Runs one subcommand against the controller, writing results to `out`.
pub async fn run_command<A, W>(
    controller: &WizardController<A>,
    alerts: &AlertQueue,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    A: DatabaseApi,
    W: Write,
{
    match command {
        Command::Databases => {
            controller.load_catalog().await;
            let view = reached(controller, alerts, WizardStage::CatalogReady, "listing databases").await?;
            write_names(out, view.catalog())?;
        }
        Command::Upload { file } => {
            let file = UploadFile::from_path(&file).await?;
            let name = file.file_name.clone();
            controller.choose_file(file).await;
            controller.upload_database().await;
            let view = reached(controller, alerts, WizardStage::CatalogReady, "upload").await?;
            writeln!(out, "uploaded {name}")?;
            write_names(out, view.catalog())?;
        }
        Command::Tables { database } => {
            controller.select_database(Some(&database)).await;
            let view = reached(controller, alerts, WizardStage::TableSelectable, "listing tables").await?;
            write_names(out, view.tables())?;
        }
        Command::Columns { database, table } => {
            controller.select_database(Some(&database)).await;
            reached(controller, alerts, WizardStage::TableSelectable, "listing tables").await?;
            controller.select_table(Some(&table)).await;
            let view = reached(controller, alerts, WizardStage::ColumnSelectable, "listing columns").await?;
            write_names(out, view.columns())?;
        }
        Command::Show {
            database,
            table,
            column,
            limit,
        } => {
            controller.select_database(Some(&database)).await;
            reached(controller, alerts, WizardStage::TableSelectable, "listing tables").await?;
            controller.select_table(Some(&table)).await;
            reached(controller, alerts, WizardStage::ColumnSelectable, "listing columns").await?;
            controller.select_column(Some(&column)).await;
            let view = reached(controller, alerts, WizardStage::DataShown, "fetching column data").await?;
            if let Some(summary) = view.visible_summary() {
                let title = format!("{database} / {table} / {column}");
                out.write_all(render_summary(&title, summary, limit).as_bytes())?;
            }
        }
    }
    Ok(())
}

/// Checks that the last step settled where expected; alerts become the error text.
async fn reached<A: DatabaseApi>(
    controller: &WizardController<A>,
    alerts: &AlertQueue,
    expected: WizardStage,
    what: &str,
) -> Result<ViewState> {
    let view = controller.snapshot().await;
    let messages: Vec<String> = alerts.drain().into_iter().map(|a| a.message).collect();
    if view.stage == expected {
        return Ok(view);
    }
    if messages.is_empty() {
        bail!("{what} failed (stage {})", view.stage)
    }
    bail!("{what} failed: {}", messages.join("; "))
}

fn write_names<W: Write>(out: &mut W, names: &[String]) -> std::io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Formats a column summary as plain text, at most `limit` values.
pub fn render_summary(title: &str, summary: &ColumnSummary, limit: usize) -> String {
    let mut text = format!(
        "{title}\nvalues: {} (rows: {}, omitted rows: {})\n",
        summary.values_length, summary.rows_length, summary.missing_rows
    );
    for (i, value) in summary.values.iter().take(limit).enumerate() {
        let key = summary.index.as_ref().and_then(|index| index.get(i));
        match key {
            Some(key) => text.push_str(&format!("{}\t{}\n", cell(key), cell(value))),
            None => text.push_str(&format!("{}\n", cell(value))),
        }
    }
    let hidden = summary.values.len().saturating_sub(limit);
    if hidden > 0 {
        text.push_str(&format!("({hidden} more not shown)\n"));
    }
    text
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\t"),
        other => other.to_string(),
    }
}
