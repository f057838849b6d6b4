// File: src/validation/validators.rs
// Purpose: Field validators used by the product and movement forms

use once_cell::sync::Lazy;
use regex::Regex;

// URL validation regex
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("URL pattern is valid")
});

/// Validate URL format (http or https only)
pub fn is_valid_url(url: &str) -> bool {
    URL_REGEX.is_match(url)
}

/// True when the value has something other than whitespace
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Parse a stock quantity. Rejects blanks, signs, fractions, and anything non-numeric.
pub fn parse_quantity(value: &str) -> Result<u32, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Quantity is required".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("Quantity must be a whole number of zero or more".to_string());
    }
    value
        .parse::<u32>()
        .map_err(|_| "Quantity is too large".to_string())
}

/// Parse a product id carried by the edit form
pub fn parse_id(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("'{}' is not a valid product id", value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://placehold.co/50x50/png", true)]
    #[case("http://example.com/a.jpg", true)]
    #[case("ftp://example.com/a.jpg", false)]
    #[case("javascript:alert(1)", false)]
    #[case("not a url", false)]
    fn test_is_valid_url(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_valid_url(url), expected);
    }

    #[rstest]
    #[case("0", Ok(0))]
    #[case(" 45 ", Ok(45))]
    #[case("007", Ok(7))]
    fn test_parse_quantity_ok(#[case] input: &str, #[case] expected: Result<u32, String>) {
        assert_eq!(parse_quantity(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("-3")]
    #[case("2.5")]
    #[case("+4")]
    #[case("99999999999")]
    fn test_parse_quantity_rejects(#[case] input: &str) {
        assert!(parse_quantity(input).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Ok(12));
        assert!(parse_id("twelve").is_err());
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(" x "));
        assert!(!is_present("   "));
    }
}
