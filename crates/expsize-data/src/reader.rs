//! Dump line parsing.
//!
//! A dump line looks like `<date> <ignored> <size> <path> [...]`, fields
//! separated by runs of whitespace. The object key is the path with a fixed
//! leading prefix removed.

use expsize_core::error::LineError;
use expsize_core::models::{Observation, DEFAULT_KEY_PREFIX_LEN};
use expsize_core::time_utils::parse_dump_date;

// ── KeyRule ───────────────────────────────────────────────────────────────────

/// How an object key is derived from the path field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
    /// Drop this many leading characters.
    PrefixLength(usize),
}

impl Default for KeyRule {
    fn default() -> Self {
        KeyRule::PrefixLength(DEFAULT_KEY_PREFIX_LEN)
    }
}

impl KeyRule {
    /// Extract the key from `path`.
    ///
    /// Counts characters, not bytes, so a multi-byte path never splits a
    /// code point.
    pub fn extract<'a>(&self, path: &'a str) -> Result<&'a str, LineError> {
        match *self {
            KeyRule::PrefixLength(prefix_len) => match path.char_indices().nth(prefix_len) {
                Some((offset, _)) => Ok(&path[offset..]),
                None => {
                    let len = path.chars().count();
                    if len == prefix_len {
                        Err(LineError::EmptyKey { prefix_len })
                    } else {
                        Err(LineError::PathTooShort { len, prefix_len })
                    }
                }
            },
        }
    }
}

// ── LineParser ────────────────────────────────────────────────────────────────

/// Turns one dump line into an [`Observation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser {
    key_rule: KeyRule,
}

impl LineParser {
    pub fn new(key_rule: KeyRule) -> Self {
        Self { key_rule }
    }

    /// Parse `line`; the returned observation borrows its key from `line`.
    ///
    /// Fields beyond the fourth are ignored.
    pub fn parse<'a>(&self, line: &'a str) -> Result<Observation<'a>, LineError> {
        let mut fields = line.split_whitespace();
        let (Some(date), Some(_), Some(size), Some(path)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(LineError::TooFewFields {
                found: line.split_whitespace().count(),
            });
        };

        let date = parse_dump_date(date)?;
        let size = size
            .parse::<u64>()
            .map_err(|_| LineError::InvalidSize(size.to_string()))?;
        let key = self.key_rule.extract(path)?;

        Ok(Observation { date, size, key })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PREFIX: &str = "s3://inventory-bucket/exports/2024/daily-snapshot/a/";

    fn path(key: &str) -> String {
        format!("{}{}", PREFIX, key)
    }

    // ── KeyRule ───────────────────────────────────────────────────────────────

    #[test]
    fn test_prefix_fixture_is_52_chars() {
        assert_eq!(PREFIX.chars().count(), 52);
    }

    #[test]
    fn test_extract_default_prefix() {
        let p = path("foo.bin");
        assert_eq!(KeyRule::default().extract(&p), Ok("foo.bin"));
    }

    #[test]
    fn test_extract_short_path() {
        assert_eq!(
            KeyRule::PrefixLength(52).extract("short/path"),
            Err(LineError::PathTooShort {
                len: 10,
                prefix_len: 52
            })
        );
    }

    #[test]
    fn test_extract_path_equal_to_prefix() {
        assert_eq!(
            KeyRule::PrefixLength(52).extract(PREFIX),
            Err(LineError::EmptyKey { prefix_len: 52 })
        );
    }

    #[test]
    fn test_extract_counts_characters() {
        assert_eq!(KeyRule::PrefixLength(3).extract("äöü/key"), Ok("/key"));
    }

    // ── LineParser ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_basic_line() {
        let line = format!("2024/01/02 STANDARD 300 {}foo", PREFIX);
        let obs = LineParser::default().parse(&line).unwrap();
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(obs.size, 300);
        assert_eq!(obs.key, "foo");
    }

    #[test]
    fn test_parse_collapses_whitespace_runs_and_ignores_extra_fields() {
        let line = format!("2024/01/03\tx   50  {}bar  extra trailing\r\n", PREFIX);
        let obs = LineParser::default().parse(&line).unwrap();
        assert_eq!(obs.size, 50);
        assert_eq!(obs.key, "bar");
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert_eq!(
            LineParser::default().parse("2024/01/01 x 100"),
            Err(LineError::TooFewFields { found: 3 })
        );
    }

    #[test]
    fn test_parse_invalid_date() {
        let line = format!("2024-01-01 x 100 {}foo", PREFIX);
        assert_eq!(
            LineParser::default().parse(&line),
            Err(LineError::InvalidDate("2024-01-01".to_string()))
        );
    }

    #[test]
    fn test_parse_invalid_size() {
        let line = format!("2024/01/01 x 12kb {}foo", PREFIX);
        assert_eq!(
            LineParser::default().parse(&line),
            Err(LineError::InvalidSize("12kb".to_string()))
        );
    }

    #[test]
    fn test_parse_negative_size_is_invalid() {
        let line = format!("2024/01/01 x -1 {}foo", PREFIX);
        assert!(matches!(
            LineParser::default().parse(&line),
            Err(LineError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_parse_custom_prefix() {
        let parser = LineParser::new(KeyRule::PrefixLength(5));
        let obs = parser.parse("2024/01/01 x 7 data/obj").unwrap();
        assert_eq!(obs.key, "obj");
    }
}
