use super::*;

#[test]
fn email_accepts_common_shapes() {
    assert!(is_valid_email("emp1@company.com"));
    assert!(is_valid_email("first.last+tag@sub.example.co"));
}

#[test]
fn email_rejects_malformed_values() {
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("no-at-sign.com"));
    assert!(!is_valid_email("@company.com"));
    assert!(!is_valid_email("user@company"));
    assert!(!is_valid_email("user@.com"));
    assert!(!is_valid_email("user@company."));
    assert!(!is_valid_email("us er@company.com"));
    assert!(!is_valid_email("a@b@c.com"));
}

#[test]
fn url_requires_http_scheme_and_host() {
    assert!(is_http_url("https://cdn.example.com/me.png"));
    assert!(is_http_url("http://localhost:8080/a"));
    assert!(!is_http_url("ftp://example.com/me.png"));
    assert!(!is_http_url("example.com/me.png"));
    assert!(!is_http_url("javascript:alert(1)"));
}

#[test]
fn phone_counts_digits_only() {
    assert!(has_min_phone_digits("+1 (555) 010-0199"));
    assert!(has_min_phone_digits("5550100"));
    assert!(!has_min_phone_digits("555-01"));
    assert!(!has_min_phone_digits("phone"));
}

#[test]
fn char_len_counts_unicode_scalars() {
    assert_eq!(char_len("héllo"), 5);
}
