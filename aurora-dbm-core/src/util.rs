//! Small formatting and parsing helpers shared by the store and front ends.

use crate::error::NumberParseError;

/// Format a 32-bit Xbox title or media id the way the dashboard shows it
/// (eight upper-case hex digits, e.g. `4D5307E6`).
///
/// Ids are kept as `i32` to match the stored column, so ids above
/// `0x7FFFFFFF` are negative and are reinterpreted bit-for-bit here.
pub fn format_title_id(id: i32) -> String {
    format!("{:08X}", id as u32)
}

/// Parse a 32-bit id given either as hex (`0x4D5307E6`, `4D5307E6h`) or
/// as a decimal integer.
///
/// Values up to `u32::MAX` are accepted and stored bit-for-bit in an `i32`.
pub fn parse_id(input: &str) -> Result<i32, NumberParseError> {
    let value = parse_hex_or_decimal(input)?;
    if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
        return Err(NumberParseError::OutOfRange {
            input: input.to_string(),
            bits: 32,
        });
    }
    Ok(value as i32)
}

/// Parse a 64-bit value given as hex (`0x...`) or decimal.
///
/// Hex input is read as raw bits, so `0xFFFFFFFFFFFFFFFF` yields `-1`.
pub fn parse_hex_or_decimal(input: &str) -> Result<i64, NumberParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NumberParseError::Empty);
    }

    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_suffix('h'))
        .or_else(|| trimmed.strip_suffix('H'));

    match hex {
        Some(digits) => u64::from_str_radix(&digits.replace('_', ""), 16)
            .map(|bits| bits as i64)
            .map_err(|_| NumberParseError::Invalid(input.to_string())),
        None => trimmed
            .replace('_', "")
            .parse::<i64>()
            .map_err(|_| NumberParseError::Invalid(input.to_string())),
    }
}

/// Truncate a string to a maximum number of characters, appending "..." if needed.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_title_id() {
        assert_eq!(format_title_id(0x4D5307E6), "4D5307E6");
        assert_eq!(format_title_id(-1), "FFFFFFFF");
        assert_eq!(format_title_id(0x1F), "0000001F");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("0x4D5307E6").unwrap(), 0x4D5307E6);
        assert_eq!(parse_id("4D5307E6h").unwrap(), 0x4D5307E6);
        assert_eq!(parse_id("1234").unwrap(), 1234);
        assert_eq!(parse_id("0xFFFE07D1").unwrap(), 0xFFFE07D1_u32 as i32);
        assert!(matches!(
            parse_id("0x1_0000_0000"),
            Err(NumberParseError::OutOfRange { bits: 32, .. })
        ));
    }

    #[test]
    fn test_parse_hex_or_decimal() {
        assert_eq!(parse_hex_or_decimal("0x0201_0000").unwrap(), 0x0201_0000);
        assert_eq!(parse_hex_or_decimal(" -5 ").unwrap(), -5);
        assert_eq!(parse_hex_or_decimal("0xFFFFFFFFFFFFFFFF").unwrap(), -1);
        assert!(matches!(parse_hex_or_decimal(""), Err(NumberParseError::Empty)));
        assert!(matches!(
            parse_hex_or_decimal("0xZZ"),
            Err(NumberParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Halo 3", 10), "Halo 3");
        assert_eq!(truncate_str("Halo 3: ODST", 8), "Halo ...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }
}
