/// Characters after which a spoken chunk may end.
const CLAUSE_BOUNDARIES: &[char] = &[
    '.', '!', '?', ',', ';', ':', '\n', '…', '—', '(', ')', '[', ']', '¡', '¿', '。', '，', '、',
    '！', '？', '：', '；',
];

/// Splits `text` into chunks of at most `max_chars` characters, preferring
/// clause boundaries, then word boundaries. Adjacent short clauses are
/// packed together. Punctuation-only fragments are dropped.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    let clauses = text
        .split_inclusive(CLAUSE_BOUNDARIES)
        .map(str::trim)
        .filter(|clause| clause.chars().any(char::is_alphanumeric));

    for clause in clauses {
        for piece in wrap_words(clause, max_chars) {
            if current.is_empty() {
                current = piece;
            } else if char_len(&current) + 1 + char_len(&piece) <= max_chars {
                current.push(' ');
                current.push_str(&piece);
            } else {
                chunks.push(std::mem::replace(&mut current, piece));
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn wrap_words(clause: &str, max_chars: usize) -> Vec<String> {
    if char_len(clause) <= max_chars {
        return vec![clause.to_string()];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in clause.split_whitespace() {
        if char_len(word) > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let chars: Vec<char> = word.chars().collect();
            lines.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
            continue;
        }
        if line.is_empty() {
            line.push_str(word);
        } else if char_len(&line) + 1 + char_len(word) <= max_chars {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
