// One-shot ranking output for `batview report`.

use std::io::Write;

use batview_core::chart::{chart_title, format_value};
use batview_core::engine::AggregateResult;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned plain-text table
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with rank, player, value columns
    Csv,
}

/// Write `result` to `out` in the requested format.
pub fn write_report<W: Write>(
    mut out: W,
    result: &AggregateResult,
    format: ReportFormat,
) -> anyhow::Result<()> {
    match format {
        ReportFormat::Table => write_table(&mut out, result)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, result)?;
            writeln!(out)?;
        }
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut out);
            writer.write_record(["rank", "player", "value"])?;
            for (i, row) in result.rows.iter().enumerate() {
                writer.write_record([
                    (i + 1).to_string(),
                    row.player.clone(),
                    format_value(result.stat, row.value),
                ])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, result: &AggregateResult) -> std::io::Result<()> {
    writeln!(out, "{}", chart_title(result.stat, result.cutoff_month))?;
    if result.is_empty() {
        return writeln!(out, "  (no players with nonzero values)");
    }

    let name_width = result
        .rows
        .iter()
        .map(|r| r.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());
    let value_header = result.stat.axis_label();

    writeln!(out, "{:>3}  {:<name_width$}  {:>10}", "#", "Player", value_header)?;
    for (i, row) in result.rows.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<name_width$}  {:>10}",
            i + 1,
            row.player,
            format_value(result.stat, row.value)
        )?;
    }
    Ok(())
}
