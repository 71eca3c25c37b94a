const MAX_VISIBLE_LENGTH: usize = 100;

/// Shortens a prompt for logging and masks anything that looks like a
/// credential. Document text can be large and may carry secrets.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let sanitized = if total > MAX_VISIBLE_LENGTH {
        let visible: String = trimmed.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{visible}... ({total} chars total)")
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    const PATTERNS: [&str; 6] = ["Bearer ", "gsk_", "api_key=", "password=", "secret=", "token="];

    let mut result = text.to_string();
    for pattern in PATTERNS {
        let mut from = 0;
        while let Some(offset) = result[from..].find(pattern) {
            let start = from + offset + pattern.len();
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED]");
            from = start + "[REDACTED]".len();
        }
    }

    result
}
