//! diskpack - disk space visualizer backend.
//!
//! Usage:
//!   diskpack scan [PATH]     Scan a directory and print its size tree
//!   diskpack roots           List available filesystem roots
//!   diskpack --help          Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use diskpack_core::WireNode;
use diskpack_scan::{Entry, ScanConfig, Scanner, drive_roots};

#[derive(Parser)]
#[command(
    name = "diskpack",
    version,
    about = "Visualize where your disk space goes",
    long_about = "diskpack scans a directory tree, aggregates sizes bottom-up, and \
                  prints the resulting size tree as text or as the JSON consumed by \
                  the circle-pack rendering layer."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory and print its size tree
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum depth to descend (root = 0)
        #[arg(short = 'd', long, default_value = "50")]
        max_depth: u32,

        /// Include hidden entries (skipped by default)
        #[arg(long)]
        hidden: bool,

        /// Follow symbolic links (cycle-safe)
        #[arg(short = 'L', long)]
        follow_symlinks: bool,

        /// Number of scan threads (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        threads: usize,

        /// Number of top entries to show per directory (text output)
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available filesystem roots as JSON
    Roots,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            max_depth,
            hidden,
            follow_symlinks,
            threads,
            top,
            format,
        } => run_scan(&path, max_depth, hidden, follow_symlinks, threads, top, format),
        Command::Roots => {
            println!("{}", serde_json::to_string(&drive_roots())?);
            Ok(())
        }
    }
}

/// Scan and print the tree in the requested format.
#[allow(clippy::too_many_arguments)]
fn run_scan(
    path: &PathBuf,
    max_depth: u32,
    hidden: bool,
    follow_symlinks: bool,
    threads: usize,
    top_n: usize,
    format: OutputFormat,
) -> Result<()> {
    let config = ScanConfig::builder()
        .root(path.clone())
        .max_depth(max_depth)
        .exclude_hidden(!hidden)
        .follow_symlinks(follow_symlinks)
        .threads(threads)
        .build()
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    let scanner = Scanner::new();
    let tree = scanner.scan(&config).context("Scan failed")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&WireNode::from(&tree.root))?);
        }
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(
                " {} - {}",
                tree.root_path.display(),
                format_size(tree.total_size())
            );
            println!(
                " {} files, {} directories",
                tree.stats.total_files, tree.stats.total_dirs
            );
            println!(" Scanned in {:.2}s", tree.scan_duration.as_secs_f64());
            println!("{}", "─".repeat(60));
            println!();

            print_entry(&tree.root, 0, top_n, tree.root.size.max(1));

            if tree.has_warnings() {
                println!();
                println!("{} soft error(s) during scan:", tree.warnings.len());
                for warning in tree.warnings.iter().take(top_n) {
                    println!("  {}", warning.message);
                }
            }
        }
    }

    Ok(())
}

/// Print an entry and its children as an indented tree.
fn print_entry(entry: &Entry, indent: u32, top_n: usize, root_size: u64) {
    let pad = "  ".repeat(indent as usize);
    let ratio = entry.size as f64 / root_size as f64 * 100.0;
    let marker = if entry.is_dir() { "▼ " } else { "  " };
    let suffix = if entry.is_dir() { "/" } else { "" };

    println!(
        "{}{}{:<40} {:>10} {:>5.1}%",
        pad,
        marker,
        truncate(&format!("{}{}", entry.name, suffix), 40),
        format_size(entry.size),
        ratio
    );

    let shown = entry.children.iter().take(top_n);
    let remaining = entry.children.len().saturating_sub(top_n);
    for child in shown {
        print_entry(child, indent + 1, top_n, root_size);
    }
    if remaining > 0 {
        let pad = "  ".repeat((indent + 1) as usize);
        println!("{}  ... and {} more", pad, remaining);
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 1).collect();
        format!("{cut}…")
    }
}
