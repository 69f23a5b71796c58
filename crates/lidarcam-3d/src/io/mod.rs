use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Bounding box reader and writer.
pub mod boxes;

/// LiDAR point reader and writer.
pub mod lidar;

pub use boxes::{read_bounding_boxes, write_bounding_boxes};
pub use lidar::{read_lidar_points, write_lidar_points};

/// Upper bound of a binary record file accepted by the decoder.
const MAX_RECORD_BYTES: usize = 1 << 30;

/// Size of the record count prefix of binary record files.
const COUNT_PREFIX_BYTES: usize = std::mem::size_of::<u64>();

/// Error types for the record I/O module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    /// Failed to read or write the record file
    #[error("Failed to access record file. {0}")]
    Io(#[from] std::io::Error),

    /// The record file does not exist
    #[error("File does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// The file extension does not map to a record format
    #[error("Invalid record file extension. Got:{0}")]
    InvalidFileExtension(String),

    /// The binary file size does not match its record count
    #[error("Binary record file has {actual} bytes, expected {expected}")]
    Truncated {
        /// Size implied by the record count prefix.
        expected: usize,
        /// Size of the file.
        actual: usize,
    },

    /// Failed to decode the binary records
    #[error("Failed to decode binary records. {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Failed to encode the binary records
    #[error("Failed to encode binary records. {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// A text record could not be parsed
    #[error("Malformed record at line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// A decoded binary record holds an invalid value
    #[error("Invalid binary record {index}: {reason}")]
    InvalidRecord {
        /// Zero-based record index.
        index: usize,
        /// What is wrong with the record.
        reason: String,
    },

    /// The file holds no records where at least one is required
    #[error("No records found in {0}")]
    EmptyRecords(PathBuf),
}

/// On-disk layout of a record file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// Little-endian `u64` record count followed by fixed-width records (`.dat`, `.bin`).
    Binary,
    /// One record per line, whitespace or comma separated (`.txt`, `.csv`).
    Text,
}

impl RecordFormat {
    /// Detect the record format of a file from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let Some(file_ext) = path.as_ref().extension() else {
            return Err(RecordError::InvalidFileExtension("".into()));
        };

        match file_ext.to_string_lossy().to_ascii_lowercase().as_str() {
            "dat" | "bin" => Ok(RecordFormat::Binary),
            "txt" | "csv" => Ok(RecordFormat::Text),
            other => Err(RecordError::InvalidFileExtension(other.to_string())),
        }
    }
}

fn binary_config() -> impl bincode::config::Config {
    bincode::config::legacy().with_limit::<MAX_RECORD_BYTES>()
}

/// Resolve the format of an input file, failing early when it does not exist.
fn input_format(path: &Path) -> Result<RecordFormat, RecordError> {
    if !path.exists() {
        return Err(RecordError::FileDoesNotExist(path.to_path_buf()));
    }
    RecordFormat::from_path(path)
}

/// Check that a binary buffer holds exactly the records announced by its count prefix.
fn check_binary_len(bytes: &[u8], record_size: usize) -> Result<(), RecordError> {
    let Some(prefix) = bytes.get(..COUNT_PREFIX_BYTES) else {
        return Err(RecordError::Truncated {
            expected: COUNT_PREFIX_BYTES,
            actual: bytes.len(),
        });
    };

    let mut count = [0u8; COUNT_PREFIX_BYTES];
    count.copy_from_slice(prefix);
    let count = u64::from_le_bytes(count);

    let expected = usize::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(record_size))
        .and_then(|n| n.checked_add(COUNT_PREFIX_BYTES))
        .unwrap_or(usize::MAX);

    if expected != bytes.len() {
        return Err(RecordError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Decode a binary record file into its records.
fn decode_binary<T>(bytes: &[u8], record_size: usize) -> Result<Vec<T>, RecordError>
where
    T: bincode::Decode<()>,
{
    check_binary_len(bytes, record_size)?;
    let (records, _): (Vec<T>, usize) = bincode::decode_from_slice(bytes, binary_config())?;
    Ok(records)
}

/// Visit the fields of every record line of a text file.
///
/// Blank lines and lines starting with `#` are skipped. Lines with a number of fields other than
/// `num_fields` are rejected.
fn for_each_text_record<R, F>(reader: R, num_fields: usize, mut f: F) -> Result<(), RecordError>
where
    R: BufRead,
    F: FnMut(usize, &[&str]) -> Result<(), RecordError>,
{
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        if fields.len() != num_fields {
            return Err(RecordError::Parse {
                line: line_no,
                reason: format!("expected {num_fields} fields, got {}", fields.len()),
            });
        }

        f(line_no, &fields)?;
    }
    Ok(())
}

fn parse_field<T: FromStr>(field: &str, name: &str, line: usize) -> Result<T, RecordError> {
    field.parse::<T>().map_err(|_| RecordError::Parse {
        line,
        reason: format!("invalid {name} '{field}'"),
    })
}

/// Parse a coordinate field, rejecting infinities and NaN.
fn parse_coordinate(field: &str, name: &str, line: usize) -> Result<f64, RecordError> {
    let value = parse_field::<f64>(field, name, line)?;
    if !value.is_finite() {
        return Err(RecordError::Parse {
            line,
            reason: format!("non-finite {name} '{field}'"),
        });
    }
    Ok(value)
}
