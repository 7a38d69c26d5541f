//! CSV text → [`Dataset`] → JSON text.
//!
//! Every cell is kept as a string; there is no type inference. Rows shorter
//! than the header are padded with `null`, rows longer than the header are
//! rejected with [`ConvertError::RowLengthError`].

use crate::domain::model::Dataset;
use crate::utils::error::{ConvertError, Result};
use csv::{ReaderBuilder, Trim};

const QUOTE: u8 = b'"';

#[derive(Debug, Clone)]
pub struct CsvConverter {
    /// Field delimiter (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace around fields and headers
    trim: bool,

    /// Whether input without a header row is an error instead of an empty dataset
    require_header: bool,
}

impl Default for CsvConverter {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
            require_header: false,
        }
    }
}

impl CsvConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_require_header(mut self, require_header: bool) -> Self {
        self.require_header = require_header;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Decodes `input` as UTF-8 and parses it.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<Dataset> {
        let text = std::str::from_utf8(input)?;
        self.parse(text)
    }

    pub fn parse(&self, input: &str) -> Result<Dataset> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        // csv 本身對未閉合的引號很寬鬆，先自行檢查
        check_quotes(input, self.delimiter)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(QUOTE)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .has_headers(true)
            .from_reader(input.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            if self.require_header {
                return Err(ConvertError::EmptyInputError);
            }
            tracing::debug!("Input has no header row, returning empty dataset");
            return Ok(Dataset::empty());
        }

        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        let expected = columns.len();
        let mut dataset = Dataset::new(columns);

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let values = record.iter().map(|v| Some(v.to_string())).collect();

            if let Err(rejected) = dataset.try_push_row(values) {
                return Err(ConvertError::RowLengthError {
                    line,
                    expected,
                    found: rejected.len(),
                });
            }
        }

        tracing::debug!(
            "Parsed {} records with {} columns",
            dataset.len(),
            expected
        );
        Ok(dataset)
    }
}

/// Compact JSON array of objects, keys in header order.
pub fn to_json(dataset: &Dataset) -> Result<String> {
    Ok(serde_json::to_string(dataset)?)
}

/// Same as [`to_json`], indented with two spaces.
pub fn to_json_pretty(dataset: &Dataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

pub fn preview(dataset: &Dataset, n: usize) -> Dataset {
    dataset.preview(n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    // 引號欄位中遇到 `"`：可能是跳脫 (`""`) 或欄位結束
    QuoteInQuoted,
}

/// Rejects unterminated quoted fields and stray text after a closing quote.
///
/// A quote inside an unquoted field is taken literally, as the csv reader does.
/// LF, CR and CRLF each end a record; line numbers count LF only, matching
/// the positions the csv reader reports.
fn check_quotes(input: &str, delimiter: u8) -> Result<()> {
    use self::QuoteState::*;

    let mut state = FieldStart;
    let mut line: u64 = 1;
    let mut opened_on: u64 = 1;

    for &byte in input.as_bytes() {
        state = match (state, byte) {
            (FieldStart, QUOTE) => {
                opened_on = line;
                Quoted
            }
            (Quoted, QUOTE) => QuoteInQuoted,
            (Quoted, b) => {
                line += u64::from(b == b'\n');
                Quoted
            }
            (QuoteInQuoted, QUOTE) => Quoted,
            (_, b'\n') => {
                line += 1;
                FieldStart
            }
            (_, b'\r') => FieldStart,
            (_, b) if b == delimiter => FieldStart,
            (QuoteInQuoted, b) => {
                return Err(ConvertError::ParseError {
                    line,
                    message: format!(
                        "unexpected character {:?} after closing quote",
                        char::from(b)
                    ),
                });
            }
            (FieldStart | Unquoted, _) => Unquoted,
        };
    }

    if state == Quoted {
        return Err(ConvertError::ParseError {
            line: opened_on,
            message: "unterminated quoted field".to_string(),
        });
    }
    Ok(())
}
