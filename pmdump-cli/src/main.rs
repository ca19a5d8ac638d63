use anyhow::Result;
use clap::{Parser, Subcommand};
use pmdump_cli::commands;
use pmdump_core::constants::{DEFAULT_INPUT, DEFAULT_OUTPUT_DIR};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pmdump")]
#[command(about = "pmdump - Recover sensor telemetry records from raw flash dumps", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every accepted and rejected frame candidate
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one dump file into a CSV table
    Decode {
        /// Binary file to decode
        #[arg(default_value = DEFAULT_INPUT)]
        input: String,

        /// Directory the CSV table is written to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: String,

        /// Do not end data rows with a comma
        #[arg(long)]
        no_trailing_comma: bool,
    },

    /// Decode every file in a directory of unpacked filesystem files
    Batch {
        /// Directory holding the extracted files
        input_dir: String,

        /// Directory the CSV tables are written to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: String,

        /// Do not end data rows with a comma
        #[arg(long)]
        no_trailing_comma: bool,
    },

    /// Scan a dump and report framing statistics
    Scan {
        /// Input file to scan
        input: String,

        /// Output JSON file for recovered records
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Pack JSON records into a synthetic dump
    Pack {
        /// Input JSON file (array of records)
        #[arg(short, long)]
        input: String,

        /// Output file for packed frames
        #[arg(short, long)]
        output: String,

        /// Filler bytes written before every frame
        #[arg(long, default_value = "0")]
        gap: usize,

        /// Value of the filler bytes
        #[arg(long, default_value = "255")]
        noise_byte: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.trace {
        EnvFilter::new("trace")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Decode {
            input,
            output_dir,
            no_trailing_comma,
        } => commands::decode::execute(&input, &output_dir, !no_trailing_comma).map(|_| ()),

        Commands::Batch {
            input_dir,
            output_dir,
            no_trailing_comma,
        } => commands::batch::execute(&input_dir, &output_dir, !no_trailing_comma).map(|_| ()),

        Commands::Scan {
            input,
            output,
            stats_only,
        } => commands::scan::execute(&input, output.as_deref(), stats_only).map(|_| ()),

        Commands::Pack {
            input,
            output,
            gap,
            noise_byte,
        } => commands::pack::execute(&input, &output, gap, noise_byte).map(|_| ()),
    }
}
