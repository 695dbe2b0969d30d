use chrono::NaiveDate;

use crate::error::{ExpsizeError, LineError, Result};

/// Date format used by the `--after` / `--before` flags.
pub const BOUNDARY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format of the first field of every dump line.
pub const DUMP_DATE_FORMAT: &str = "%Y/%m/%d";

/// Parse a `YYYY-MM-DD` filter boundary supplied on the command line.
///
/// `flag` names the option in the error message.
pub fn parse_boundary_date(flag: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BOUNDARY_DATE_FORMAT).map_err(|e| {
        ExpsizeError::Config(format!(
            "invalid date for --{}: \"{}\" ({}); expected YYYY-MM-DD",
            flag, value, e
        ))
    })
}

/// Parse the `YYYY/MM/DD` date at the start of a dump line.
pub fn parse_dump_date(field: &str) -> std::result::Result<NaiveDate, LineError> {
    NaiveDate::parse_from_str(field, DUMP_DATE_FORMAT)
        .map_err(|_| LineError::InvalidDate(field.to_string()))
}
