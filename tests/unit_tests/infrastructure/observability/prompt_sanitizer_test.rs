use synopsis::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_unchanged() {
    let prompt = "Please summarize the following text: The cat sat.";
    assert_eq!(sanitize_prompt(prompt), prompt);
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"a".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_prompt_over_limit_when_sanitizing_then_cuts_on_char_boundary() {
    let prompt = "ü".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"ü".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_groq_key_when_sanitizing_then_redacts_key() {
    let result = sanitize_prompt("my key is gsk_live0123456789 ok");
    assert!(result.contains("gsk_[REDACTED] ok"));
    assert!(!result.contains("live0123456789"));
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_redacts_every_occurrence() {
    let result = sanitize_prompt("token=one and later token=two");
    assert_eq!(result, "token=[REDACTED] and later token=[REDACTED]");
}
