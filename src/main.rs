//! dbf-reader - convert dBASE tables (Iran System Persian text included) to CSV
//!
//! Usage:
//!   dbf-reader -i <file.dbf> -o <file.csv>          - Write CSV
//!   dbf-reader -i <file.dbf> --output debug         - Dump header, descriptors and records

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dbf_reader::{CsvOptions, ReadOptions, Table, TextEncoding, read_file, write_csv};

#[derive(Parser)]
#[command(name = "dbf-reader")]
#[command(version)]
#[command(about = "Convert dBASE (DBF) tables to CSV", long_about = None)]
struct Cli {
    /// Input DBF file
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output file (required for csv output)
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Output mode
    #[arg(long, value_enum, default_value = "csv")]
    output: OutputMode,

    /// Code page of Character fields: iran-system, or any WHATWG label (e.g. windows-1256)
    #[arg(long, default_value = "iran-system")]
    encoding: String,

    /// Fail on inconsistent headers instead of warning
    #[arg(long)]
    strict: bool,

    /// Leave records flagged as deleted out of the CSV
    #[arg(long)]
    skip_deleted: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputMode {
    Csv,
    Debug,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let encoding = TextEncoding::from_label(&cli.encoding)?;
    let options = ReadOptions::new().encoding(encoding).strict(cli.strict);

    // Check arguments before touching the input
    let csv_target = match cli.output {
        OutputMode::Csv => Some(
            cli.out
                .clone()
                .context("Please enter output file name (-o <path>)")?,
        ),
        OutputMode::Debug => None,
    };

    let table = read_file(&cli.input, &options)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    match csv_target {
        Some(path) => {
            let csv_options = CsvOptions {
                skip_deleted: cli.skip_deleted,
            };
            write_csv(&table, &path, &csv_options)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => print_debug(&table, encoding),
    }

    Ok(())
}

fn print_debug(table: &Table, encoding: TextEncoding) {
    let header = &table.header;
    let (yy, mm, dd) = header.last_update();

    println!("Header:");
    println!("  dBASE version: {:#04x}", header.dbase_version as u8);
    println!("  Last update: {:02}-{:02}-{:02} ({})", yy, mm, dd, header.last_update_date);
    println!("  Records: {}", header.number_of_records);
    println!("  Header bytes: {}", header.header_byte_count);
    println!("  Record bytes: {}", header.record_byte_count);
    println!("  Incomplete transaction: {}", header.incomplete_transaction);
    println!("  Encrypted: {}", header.encryption_flag);
    println!("  Production MDX: {}", header.production_mdx_flag);
    println!("  Language driver: {:#04x}", header.language_driver_id as u8);
    println!("  Text encoding: {}", encoding);

    println!("\nDescriptors:");
    for (i, d) in table.descriptors.iter().enumerate() {
        println!(
            "  {}. {} type={} length={} decimals={} work_area={} mdx={}",
            i + 1,
            d.field_name,
            d.field_type as char,
            d.field_length,
            d.field_decimal_count,
            d.work_area_id,
            d.production_mdx_field_flag
        );
    }

    println!("\nRecords:");
    for (i, record) in table.records.iter().enumerate() {
        let marker = if record.deleted { " (deleted)" } else { "" };
        println!("  #{}{}", i, marker);
        for (d, value) in table.descriptors.iter().zip(&record.values) {
            println!("    {}: {}", d.field_name, value);
        }
    }
}
