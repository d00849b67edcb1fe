//! Edge-case coverage for the string masking rules.
//!
//! These tests focus on behavior across Unicode scalar values (including
//! multi-byte characters and combining marks) and on boundary cases such as
//! empty or very short inputs where keep rules leave values unchanged.

use masklog::masking::{
    mask_any, mask_email, mask_name, mask_phone_suffix, mask_pin, KeepConfig, MaskConfig,
};

#[test]
fn test_empty_string() {
    assert_eq!(mask_pin(""), "");
    assert_eq!(mask_any(""), "");
    assert_eq!(mask_name(""), "");
    assert_eq!(mask_email(""), "");
    assert_eq!(MaskConfig::first(2).apply_to(""), "");
}

#[test]
fn test_boundary_lengths() {
    assert_eq!(mask_pin("1234"), "1234");
    assert_eq!(mask_pin("12345"), "*2345");
    assert_eq!(mask_any("abc"), "abc");
    assert_eq!(mask_any("abcd"), "*bcd");
    assert_eq!(mask_phone_suffix("0811"), "0811");
    assert_eq!(mask_phone_suffix("08112"), "0XXXX");
}

#[test]
fn test_unicode_emoji() {
    let value = "secret🔒data";
    assert_eq!(KeepConfig::first(6).apply_to(value), "secret*****");
    assert_eq!(mask_pin(value), "*******data");
}

#[test]
fn test_combining_marks_count_as_scalars() {
    // "é" written as 'e' + U+0301 is two scalar values.
    let value = "cafe\u{301}s";
    let masked = mask_any(value);
    assert_eq!(masked.chars().count(), value.chars().count());
    assert!(masked.ends_with("\u{301}s"));
}

#[test]
fn test_name_with_multibyte_tokens() {
    assert_eq!(mask_name("Zoë Saldaña"), "Z** Sa****a");
    assert_eq!(mask_name("李 小龙"), "李 小龙");
    assert_eq!(mask_name("李小龙"), "李**");
}

#[test]
fn test_email_without_at_sign_is_one_token() {
    assert_eq!(mask_email("localpart"), "lo******t");
}

#[test]
fn test_email_with_multiple_at_signs() {
    assert_eq!(mask_email("a@bcd@example"), "a@b**@ex****e");
}

#[test]
fn test_custom_mask_char() {
    let config = KeepConfig::last(2).with_mask_char('#');
    assert_eq!(config.apply_to("abcdef"), "####ef");
    let config = MaskConfig::first(3).with_mask_char('X');
    assert_eq!(config.apply_to("abcdef"), "XXXdef");
}
