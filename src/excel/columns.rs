//! Spreadsheet column letters (A, B, ..., Z, AA, ...) ↔ zero-based indices

use crate::error::{ExtractError, ExtractResult};

/// Number of columns in an .xlsx worksheet (A..=XFD)
pub const MAX_COLUMNS: usize = 16_384;

/// Convert a column letter to a zero-based index
///
/// Examples:
/// - A → 0
/// - Z → 25
/// - AA → 26
///
/// Letters are case-insensitive. Anything that is not one to three ASCII
/// letters within A..=XFD is a format error.
pub fn column_letter_to_index(letter: &str) -> ExtractResult<usize> {
    let trimmed = letter.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(invalid_letter(letter));
    }

    let mut index: usize = 0;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid_letter(letter));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index * 26 + digit;
    }

    if index > MAX_COLUMNS {
        return Err(ExtractError::Format(format!(
            "column '{}' is past the last worksheet column XFD",
            letter
        )));
    }

    Ok(index - 1)
}

/// Convert a zero-based index to a column letter
pub fn column_index_to_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

fn invalid_letter(letter: &str) -> ExtractError {
    ExtractError::Format(format!("'{}' is not a valid column letter", letter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter_to_index() {
        assert_eq!(column_letter_to_index("A").unwrap(), 0);
        assert_eq!(column_letter_to_index("B").unwrap(), 1);
        assert_eq!(column_letter_to_index("Z").unwrap(), 25);
        assert_eq!(column_letter_to_index("AA").unwrap(), 26);
        assert_eq!(column_letter_to_index("AZ").unwrap(), 51);
        assert_eq!(column_letter_to_index("BA").unwrap(), 52);
        assert_eq!(column_letter_to_index("ZZ").unwrap(), 701);
        assert_eq!(column_letter_to_index("AAA").unwrap(), 702);
        assert_eq!(column_letter_to_index("XFD").unwrap(), 16_383);
    }

    #[test]
    fn test_column_letter_lowercase() {
        assert_eq!(column_letter_to_index("c").unwrap(), 2);
        assert_eq!(column_letter_to_index("aB").unwrap(), 27);
    }

    #[test]
    fn test_column_letter_invalid() {
        for bad in ["", " ", "A1", "1", "A-B", "ÄB", "ABCD", "XFE", "ZZZ"] {
            assert!(
                matches!(column_letter_to_index(bad), Err(ExtractError::Format(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_column_index_to_letter() {
        assert_eq!(column_index_to_letter(0), "A");
        assert_eq!(column_index_to_letter(1), "B");
        assert_eq!(column_index_to_letter(25), "Z");
        assert_eq!(column_index_to_letter(26), "AA");
        assert_eq!(column_index_to_letter(27), "AB");
        assert_eq!(column_index_to_letter(701), "ZZ");
        assert_eq!(column_index_to_letter(16_383), "XFD");
    }

    #[test]
    fn test_letter_index_agree() {
        for idx in [0, 5, 25, 26, 100, 701, 702, 16_383] {
            let letter = column_index_to_letter(idx);
            assert_eq!(column_letter_to_index(&letter).unwrap(), idx);
        }
    }
}
