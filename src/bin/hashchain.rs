#![forbid(unsafe_code)]
//! Build, inspect and verify hash chains from the command line

use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use hashchain::blockchain::{Block, Blockchain};
use hashchain::config::{load_config, Config, DEFAULT_CONFIG_PATH};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds a chain, prints it, validates it and exports it as JSON
    Demo {
        /// Payloads to append (defaults to `demo.payloads` from the config)
        #[arg(long = "data")]
        data: Vec<String>,
        /// Overwrite the payload of this block in a copy and validate again
        #[arg(long)]
        tamper: Option<usize>,
        /// Write the JSON export here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Imports an exported chain and checks its integrity
    Verify {
        /// JSON export to check
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo { data, tamper, output } => demo(&config, data, tamper, output)?,
        Commands::Verify { file } => {
            if !verify(&file)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn demo(
    config: &Config,
    data: Vec<String>,
    tamper: Option<usize>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payloads = if data.is_empty() {
        config.demo.payloads.clone()
    } else {
        data
    };

    let mut chain = Blockchain::new();
    for payload in payloads {
        chain.append(payload);
    }
    info!(blocks = chain.len(), "built chain");

    println!("{}", "⛓️  Hash Chain".bright_cyan().bold());
    println!("{}", block_table(chain.blocks()));
    report(&chain);

    if let Some(index) = tamper {
        let mut blocks = chain.blocks().to_vec();
        let original = blocks
            .get(index)
            .ok_or_else(|| format!("No block at index {} (chain length {})", index, chain.len()))?;
        // Keep the stored hash so the edit is only visible to validation.
        let forged = Block::new(
            original.index(),
            original.previous_hash(),
            original.timestamp(),
            "tampered",
            original.hash(),
        );
        blocks[index] = forged;

        println!();
        println!("{}", format!("🔧 Tampered with block {}", index).yellow());
        report(&Blockchain::from_blocks(blocks)?);
    }

    let path = output.or_else(|| config.export.path.clone());
    match path {
        Some(path) => {
            chain.export_to_file(&path, config.export.pretty)?;
            println!("{}", format!("💾 Exported to {}", path.display()).bright_green());
        }
        None => {
            let json = if config.export.pretty {
                chain.to_json()?
            } else {
                chain.to_json_compact()?
            };
            println!();
            println!("{}", "Chain JSON:".bright_green().underline());
            println!("{}", json);
        }
    }

    Ok(())
}

fn verify(file: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let chain = Blockchain::import_from_file(file)?;
    println!("{}", block_table(chain.blocks()));
    Ok(report(&chain))
}

/// Prints the validation outcome and returns whether the chain is valid.
fn report(chain: &Blockchain) -> bool {
    match chain.validate() {
        Ok(()) => {
            println!("{}", format!("✅ Chain is valid ({} blocks)", chain.len()).bright_green());
            true
        }
        Err(violation) => {
            println!("{}", format!("❌ Chain is invalid: {}", violation).red().bold());
            false
        }
    }
}

fn block_table(blocks: &[Block]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Index").fg(TableColor::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Timestamp").fg(TableColor::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Data").fg(TableColor::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Previous Hash").fg(TableColor::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Hash").fg(TableColor::Cyan).add_attribute(Attribute::Bold),
        ]);

    for block in blocks {
        table.add_row(vec![
            Cell::new(format!("#{}", block.index())).fg(TableColor::White),
            Cell::new(block.timestamp()).fg(TableColor::Grey),
            Cell::new(block.data()).fg(TableColor::Yellow),
            Cell::new(short_hash(block.previous_hash())).fg(TableColor::Grey),
            Cell::new(short_hash(block.hash())).fg(TableColor::Green),
        ]);
    }
    table
}

/// Abbreviates long hashes for display. Imported hashes may hold any text,
/// so truncation counts characters, not bytes.
fn short_hash(hash: &str) -> String {
    if hash.chars().count() > 16 {
        format!("{}...", hash.chars().take(13).collect::<String>())
    } else {
        hash.to_string()
    }
}
