use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{parse_items, LineError, Transaction};
use crate::parser::errors::DatasetError;

const FIELD_COUNT: usize = 4;
/// ISO-8601 local date-times may omit the seconds.
const MINUTE_PRECISION_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parses every line of a daily file into transactions, all or nothing.
///
/// # Errors
/// Returns `DatasetError::NotFound` if `path` is missing or not a regular file,
/// `DatasetError::Io` if it cannot be read and `DatasetError::Parse` naming the
/// first malformed line. No partial dataset is ever returned.
pub fn parse_file(path: &Path) -> Result<Vec<Transaction>, DatasetError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(DatasetError::NotFound { path: path.to_path_buf() })
        }
        Err(source) => return Err(DatasetError::Io { path: path.to_path_buf(), source })
    };

    let is_regular_file = file.metadata()
        .map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?
        .is_file();

    if !is_regular_file {
        return Err(DatasetError::NotFound { path: path.to_path_buf() });
    }

    let transactions = read_transactions(BufReader::new(file), path)?;

    info!("Loaded {} transactions from file: {}", transactions.len(), path.display());

    Ok(transactions)
}

/// Parses a single log line, e.g. `1001,2024-03-01T14:32:00,{SKU-7:3|SKU-2:1},5.75`.
pub fn parse_line(line: &str) -> Result<Transaction, LineError> {
    let mut record = StringRecord::new();

    let has_record = build_reader(line.as_bytes())
        .read_record(&mut record)
        .map_err(|error| LineError::Unreadable { reason: error.to_string() })?;

    if !has_record {
        return Err(LineError::FieldCount { expected: FIELD_COUNT, found: 0 });
    }

    parse_record(&record)
}

fn read_transactions<R: BufRead>(source: R, path: &Path) -> Result<Vec<Transaction>, DatasetError> {
    let mut transactions = Vec::new();

    for (index, result) in source.lines().enumerate() {
        let line = index as u64 + 1;
        let text = result.map_err(|error| read_error(error, path, line))?;

        if text.trim().is_empty() {
            continue;
        }

        let transaction = parse_line(&text).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            line,
            source
        })?;

        transactions.push(transaction);
    }

    Ok(transactions)
}

fn build_reader<R: Read>(source: R) -> csv::Reader<R> {
    //NOTE: Field counts are validated per record to report a specific reason, hence flexible.
    ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source)
}

fn parse_record(record: &StringRecord) -> Result<Transaction, LineError> {
    if record.len() != FIELD_COUNT {
        return Err(LineError::FieldCount { expected: FIELD_COUNT, found: record.len() });
    }

    let id = &record[0];
    let transaction_id = id.parse().map_err(|source| LineError::InvalidTransactionId {
        value: id.to_string(),
        source
    })?;

    let timestamp = parse_timestamp(&record[1])?;

    let items = parse_items(&record[2])?;

    let amount = &record[3];
    let sale_amount = Decimal::from_str_exact(amount).map_err(|source| LineError::InvalidSaleAmount {
        value: amount.to_string(),
        source
    })?;

    Ok(Transaction {
        transaction_id,
        timestamp,
        items,
        sale_amount
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, LineError> {
    NaiveDateTime::from_str(value)
        .or_else(|error| NaiveDateTime::parse_from_str(value, MINUTE_PRECISION_FORMAT).map_err(|_| error))
        .map_err(|source| LineError::InvalidTimestamp {
            value: value.to_string(),
            source
        })
}

fn read_error(error: io::Error, path: &Path, line: u64) -> DatasetError {
    //NOTE: `lines()` reports invalid UTF-8 as InvalidData; that is a content problem, not an I/O fault.
    if error.kind() == ErrorKind::InvalidData {
        return DatasetError::Parse {
            path: path.to_path_buf(),
            line,
            source: LineError::Unreadable { reason: error.to_string() }
        };
    }

    DatasetError::Io { path: path.to_path_buf(), source: error }
}
