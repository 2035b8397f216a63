use super::*;

#[test]
fn defaults_point_at_local_backend_with_switch_user_on() {
    let config = ClientConfig::from_values(None, None);
    assert_eq!(config.api_base_url, "http://localhost:8080");
    assert!(config.switch_user_enabled);
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn base_url_trailing_slashes_are_trimmed() {
    let config = ClientConfig::from_values(Some("https://api.example.com//"), None);
    assert_eq!(config.api_base_url, "https://api.example.com");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let config = ClientConfig::from_values(Some("   "), None);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn parse_flag_accepts_true_in_any_case() {
    assert!(parse_flag(Some("true")));
    assert!(parse_flag(Some("TRUE")));
    assert!(parse_flag(Some(" True ")));
}

#[test]
fn parse_flag_rejects_everything_else() {
    assert!(!parse_flag(Some("false")));
    assert!(!parse_flag(Some("1")));
    assert!(!parse_flag(Some("yes")));
    assert!(!parse_flag(None));
}

#[test]
fn switch_user_can_be_disabled() {
    let config = ClientConfig::from_values(None, Some("false"));
    assert!(!config.switch_user_enabled);
}
