use crate::error::{Result, ScraperError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Excel's hard limits: column `XFD`, row 1,048,576.
pub const MAX_COLS: u32 = 16_384;
pub const MAX_ROWS: u32 = 1_048_576;

static A1: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]{1,7})$").expect("A1 pattern is valid")
});

/// Zero-based row/column position parsed from an A1 reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = || ScraperError::InvalidCellAddress(reference.to_string());
        let caps = A1.captures(reference.trim()).ok_or_else(invalid)?;

        let col = caps[1]
            .bytes()
            .fold(0u32, |acc, b| acc * 26 + u32::from(b.to_ascii_uppercase() - b'A' + 1));
        let row: u32 = caps[2].parse().map_err(|_| invalid())?;

        if col == 0 || col > MAX_COLS || row == 0 || row > MAX_ROWS {
            return Err(invalid());
        }
        let col = u16::try_from(col - 1).map_err(|_| invalid())?;
        Ok(Self { row: row - 1, col })
    }
}

impl FromStr for CellAddress {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = u32::from(self.col) + 1;
        let mut letters = Vec::with_capacity(3);
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            letters.push((b'A' + rem) as char);
            n = (n - 1) / 26;
        }
        let col: String = letters.iter().rev().collect();
        write!(f, "{}{}", col, self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_references() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress { row: 0, col: 0 });
        assert_eq!(CellAddress::parse("b3").unwrap(), CellAddress { row: 2, col: 1 });
        assert_eq!(CellAddress::parse("AA10").unwrap(), CellAddress { row: 9, col: 26 });
        assert_eq!(CellAddress::parse("$C$4").unwrap(), CellAddress { row: 3, col: 2 });
    }

    #[test]
    fn accepts_sheet_corners() {
        let last = CellAddress::parse("XFD1048576").unwrap();
        assert_eq!(last, CellAddress { row: 1_048_575, col: 16_383 });
        assert_eq!(last.to_string(), "XFD1048576");
    }

    #[test]
    fn rejects_out_of_range_and_malformed() {
        for bad in ["", "A0", "XFE1", "A1048577", "1A", "A", "A-1", "AB CD"] {
            assert!(
                matches!(CellAddress::parse(bad), Err(ScraperError::InvalidCellAddress(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn display_inverts_parse() {
        for reference in ["A1", "Z26", "AA27", "AZ100", "ZZ5", "AAA1"] {
            assert_eq!(CellAddress::parse(reference).unwrap().to_string(), reference);
        }
    }
}
