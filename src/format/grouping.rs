// Digit grouping
//
// Inserts a separator every three integer digits, counted from the decimal
// point leftward. Works on the digit string so integer parts of any length
// are grouped exactly.

/// Group a string of ASCII digits with `separator`
///
/// An empty separator leaves the digits untouched.
///
/// # Examples
/// ```
/// use statfmt::format::group_digits;
///
/// assert_eq!(group_digits("1234567", ","), "1,234,567");
/// assert_eq!(group_digits("42", ","), "42");
/// assert_eq!(group_digits("1234567", "\u{202f}"), "1\u{202f}234\u{202f}567");
/// ```
pub fn group_digits(digits: &str, separator: &str) -> String {
    if separator.is_empty() || digits.len() <= 3 {
        return digits.to_string();
    }

    let groups = (digits.len() - 1) / 3;
    let mut result = String::with_capacity(digits.len() + groups * separator.len());

    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    result.push_str(&digits[..lead]);

    let mut idx = lead;
    while idx < digits.len() {
        result.push_str(separator);
        result.push_str(&digits[idx..idx + 3]);
        idx += 3;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_integers_are_not_grouped() {
        assert_eq!(group_digits("0", ","), "0");
        assert_eq!(group_digits("999", ","), "999");
    }

    #[test]
    fn test_group_boundaries() {
        assert_eq!(group_digits("1000", ","), "1,000");
        assert_eq!(group_digits("12345", ","), "12,345");
        assert_eq!(group_digits("123456", ","), "123,456");
        assert_eq!(group_digits("1234567", ","), "1,234,567");
    }

    #[test]
    fn test_multi_character_separator() {
        assert_eq!(group_digits("1234567", " ' "), "1 ' 234 ' 567");
    }

    #[test]
    fn test_empty_separator_disables_grouping() {
        assert_eq!(group_digits("1234567", ""), "1234567");
    }

    #[test]
    fn test_arbitrarily_long_integer_part() {
        let digits = "1".repeat(40);
        let grouped = group_digits(&digits, ",");
        assert_eq!(grouped.matches(',').count(), 13);
        assert!(grouped.starts_with("1,111,"));
        assert_eq!(grouped.replace(',', ""), digits);
    }
}
