use csv::ByteRecord;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;

/// Decode a raw CSV field as UTF-8, replacing invalid sequences.
pub fn decode_field(raw: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(raw)
}

/// Number of fields once trailing empty ones are ignored, so `a,1,2,,`
/// counts as three.
pub fn effective_width(record: &ByteRecord) -> usize {
    let trailing_empty = (0..record.len())
        .rev()
        .take_while(|&i| record.get(i).is_some_and(|f| f.is_empty()))
        .count();
    record.len() - trailing_empty
}

/// Why a monetary field could not become a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Not a finite number at all; the row is malformed.
    NotANumber,
    /// A valid number too large for `Decimal` (about ±7.9e28).
    OutOfRange,
}

/// Parse a monetary field: surrounding whitespace ignored, must be a finite
/// float, then carried over exactly as its shortest decimal rendering.
pub fn parse_amount(raw: &[u8]) -> Result<Decimal, AmountError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| AmountError::NotANumber)?
        .trim();
    let value: f64 = text.parse().map_err(|_| AmountError::NotANumber)?;
    if !value.is_finite() {
        return Err(AmountError::NotANumber);
    }
    // `Display` for f64 is the shortest string that round-trips, never exponent form
    Decimal::from_str(&value.to_string()).map_err(|_| AmountError::OutOfRange)
}
