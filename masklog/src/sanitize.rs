//! Small helpers for cleaning up customer-facing strings before logging.

const NULL_PREFIX: &str = "null ";
const NULL_SUFFIX: &str = " null";

/// Replaces empty or literal `"null"` names with `-` and trims a leading
/// `"null "` or trailing `" null"` left by upstream concatenation.
pub fn sanitize_name(name: &str) -> String {
    if name.is_empty() || name == "null" {
        return "-".to_string();
    }
    let name = name.strip_prefix(NULL_PREFIX).unwrap_or(name);
    let name = name.strip_suffix(NULL_SUFFIX).unwrap_or(name);
    name.to_string()
}

/// Rewrites local Indonesian numbers to the `628` international prefix.
///
/// `08123` and `8123` both become `628123`; numbers already starting with
/// `628`, or with any other prefix, are returned unchanged.
pub fn sanitize_phone_number(phone_number: &str) -> String {
    if phone_number.starts_with("628") {
        return phone_number.to_string();
    }
    if let Some(rest) = phone_number.strip_prefix("08") {
        return format!("628{rest}");
    }
    if let Some(rest) = phone_number.strip_prefix('8') {
        return format!("628{rest}");
    }
    phone_number.to_string()
}

#[cfg(test)]
mod tests {
    use super::{sanitize_name, sanitize_phone_number};

    #[test]
    fn empty_and_null_names_become_dash() {
        assert_eq!(sanitize_name(""), "-");
        assert_eq!(sanitize_name("null"), "-");
    }

    #[test]
    fn null_fragments_are_trimmed() {
        assert_eq!(sanitize_name("null Doe"), "Doe");
        assert_eq!(sanitize_name("John null"), "John");
        assert_eq!(sanitize_name("null John null"), "John");
        assert_eq!(sanitize_name("John Doe"), "John Doe");
    }

    #[test]
    fn phone_numbers_get_628_prefix() {
        assert_eq!(sanitize_phone_number("08123456789"), "628123456789");
        assert_eq!(sanitize_phone_number("8123456789"), "628123456789");
        assert_eq!(sanitize_phone_number("628123456789"), "628123456789");
        assert_eq!(sanitize_phone_number("+1555"), "+1555");
        assert_eq!(sanitize_phone_number(""), "");
    }
}
