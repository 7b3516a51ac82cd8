//! Read and inspect serialized condition files
//!
//! A condition file holds one or more conditions written back to back in the
//! persistence format. Every condition is decoded and displayed.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_conditions::{Condition, ConditionConfig, GameError, PropStream};

use crate::dirs;

/// Read and inspect condition files
#[derive(Parser)]
pub struct Inspect {
    /// Condition file: a path, or a name inside the data directory
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Custom data directory (defaults to $CONDITION_DATA_DIR or platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Maximum effects accepted per condition
    #[arg(long, default_value_t = ConditionConfig::DEFAULT_MAX_EFFECTS)]
    max_effects: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (header fields, one line per effect)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
    /// Raw bytes of each condition as hex
    Hex,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let path = dirs::resolve_condition_file(&self.file, self.data_dir.as_deref())?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read condition file: {}", path.display()))?;

        println!("{} {}", style("Condition File:").bold().cyan(), path.display());
        println!(
            "{} {}",
            style("File Size:").bold().cyan(),
            format_bytes(bytes.len())
        );
        println!();

        let config = ConditionConfig::default().with_max_effects(self.max_effects);
        let mut stream = PropStream::new(&bytes);
        let mut index = 0usize;

        while !stream.is_empty() {
            let start = stream.position();
            let condition = Condition::unserialize_with(&mut stream, &config).map_err(|err| {
                anyhow::anyhow!(
                    "[{}] {} (condition #{} at offset {})",
                    err.error_code(),
                    err,
                    index,
                    start
                )
            })?;
            let raw = &bytes[start..stream.position()];

            match self.format {
                OutputFormat::Summary => print_summary(index, &condition),
                OutputFormat::Json => print_json(&condition)?,
                OutputFormat::Debug => println!("{:#?}", condition),
                OutputFormat::Hex => println!("{}", hex::encode(raw)),
            }
            index += 1;
        }

        tracing::info!(conditions = index, file = %path.display(), "inspection complete");
        Ok(())
    }
}

fn print_summary(index: usize, condition: &Condition) {
    println!(
        "{}",
        style(format!("=== Condition #{}: {} ===", index, condition.name()))
            .bold()
            .green()
    );
    println!("  Combat Type: {}", condition.combat_type());
    println!("  Mechanic Type: {}", condition.mechanic_type());
    println!("  Source ID: {}", condition.source_id());
    if condition.is_persistent() {
        println!("  Ticks: {} (persistent)", condition.ticks());
    } else {
        println!("  Ticks: {}", condition.ticks());
    }
    println!("  Flags: {:?}", condition.flags());
    println!("  Icons: {:?}", condition.icon());
    println!();

    println!("{}", style("Effects:").bold().yellow());
    for (position, effect) in condition.effects().iter().enumerate() {
        println!(
            "  {:>2}. {:<22} interval {:>6}  {:?}",
            position,
            effect.effect_type().as_ref(),
            effect.interval(),
            effect.kind()
        );
    }
    println!();
}

fn print_json(condition: &Condition) -> Result<()> {
    let json =
        serde_json::to_string_pretty(condition).context("Failed to serialize condition to JSON")?;
    println!("{}", json);
    Ok(())
}

fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;

    if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
