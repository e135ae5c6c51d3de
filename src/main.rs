mod analysis;
mod engine;
mod models;
mod parser;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::AnalyticsEngine;

const USAGE: &str = "Usage: transaction-analytics [folder] [operation:optional] [log_level:optional]";
const OPERATIONS: &str = "Available operations: report, peak-volume, peak-value, top-product, top-staff, peak-hour (default: report)";
const LOG_LEVELS: &str = "Available log levels: error, warn, info, debug, trace (default: error)";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Report,
    PeakVolume,
    PeakValue,
    TopProduct,
    TopStaff,
    PeakHour
}

impl Operation {
    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "report" => Some(Self::Report),
            "peak-volume" => Some(Self::PeakVolume),
            "peak-value" => Some(Self::PeakValue),
            "top-product" => Some(Self::TopProduct),
            "top-staff" => Some(Self::TopStaff),
            "peak-hour" => Some(Self::PeakHour),
            _ => None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        exit(1);
    }

    let folder = &args[1];
    let operation = match args.get(2) {
        Some(name) => Operation::parse(name).unwrap_or_else(|| {
            eprintln!("Unknown operation '{name}'");
            print_usage();
            exit(1)
        }),
        None => Operation::Report
    };
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let engine = AnalyticsEngine::new(folder);

    let timer = Instant::now();

    match operation {
        Operation::Report => match engine.analyze().await {
            Ok(report) => write_json(&report)?,
            Err(error) => {
                eprintln!("{error}");
                exit(1);
            }
        },
        Operation::PeakVolume => write_json(&engine.peak_daily_volume().await)?,
        Operation::PeakValue => write_json(&engine.peak_daily_value().await)?,
        Operation::TopProduct => write_json(&engine.top_product_by_volume().await)?,
        Operation::TopStaff => write_json(&engine.top_staff_by_month().await)?,
        Operation::PeakHour => write_json(&engine.peak_hour_by_average_volume().await)?
    }

    let duration = timer.elapsed();

    info!("Analyzed folder {} in: {duration:?}", engine.folder().display());

    Ok(())
}

fn print_usage() {
    eprintln!("{USAGE}");
    eprintln!("{OPERATIONS}");
    eprintln!("{LOG_LEVELS}");
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the JSON result, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, value)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
