//! A1-style labels for grid indices.
//!
//! Data column 1 is `A` and data row 1 is `1`; index 0 on either axis is the header
//! band and has no label.

/// Convert a data column index to letters (1 → A, 26 → Z, 27 → AA, ...).
///
/// The header column 0 yields an empty string.
pub fn col_to_letter(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = col;
    while n > 0 {
        n -= 1;
        // n % 26 < 26, so the narrowing is lossless
        #[allow(clippy::cast_possible_truncation)]
        let offset = (n % 26) as u8;
        result.push(char::from(b'A' + offset));
        n /= 26;
    }
    result.iter().rev().collect()
}

/// Parse letters like "AB" into a data column index.
pub fn letter_to_col(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(ch.to_ascii_uppercase()) - u32::from('A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    Some(col)
}

/// Parse a reference like "B3" (or "$B$3") into `(row, col)` grid indices.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let cleaned: String = cell_ref.trim().chars().filter(|&c| c != '$').collect();
    let split = cleaned.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cleaned.split_at(split);
    let col = letter_to_col(letters)?;
    let row: u32 = digits.parse().ok()?;
    (row > 0).then_some((row, col))
}

/// Format `(row, col)` grid indices as an A1 reference.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), row)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, "A")]
    #[test_case(26, "Z")]
    #[test_case(27, "AA")]
    #[test_case(52, "AZ")]
    #[test_case(703, "AAA")]
    fn test_col_to_letter(col: u32, expected: &str) {
        assert_eq!(col_to_letter(col), expected);
        assert_eq!(letter_to_col(expected), Some(col));
    }

    #[test]
    fn test_header_column_has_no_label() {
        assert_eq!(col_to_letter(0), "");
        assert_eq!(letter_to_col(""), None);
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("B3"), Some((3, 2)));
        assert_eq!(parse_cell_ref("$AA$10"), Some((10, 27)));
        assert_eq!(parse_cell_ref("b3"), Some((3, 2)));
        assert_eq!(parse_cell_ref("B0"), None);
        assert_eq!(parse_cell_ref("3B"), None);
        assert_eq!(parse_cell_ref("B"), None);
    }

    #[test]
    fn test_cell_ref_round_trip() {
        assert_eq!(cell_ref(3, 2), "B3");
        assert_eq!(parse_cell_ref(&cell_ref(120, 500)), Some((120, 500)));
    }
}
