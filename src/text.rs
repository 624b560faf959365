//! Text measurement and word wrapping.
//!
//! The report engine only ships the standard Helvetica pair, so line width is
//! approximated by character count rather than measured glyph advances.

/// Line length used when an entry does not ask for wrapping.
pub const UNBOUNDED_LINE_LENGTH: usize = 500;

/// Lower bound on the wrap width, however deep the indent.
pub const MIN_WRAP_LENGTH: usize = 45;

/// Wrap width at zero indent.
pub const BASE_WRAP_LENGTH: usize = 110;

/// Maximum characters per line for an entry with the given indent.
///
/// Wrapping is opt-in: without it the limit is effectively unbounded.
pub fn max_line_length(indent: f32, wrap: bool) -> usize {
    if !wrap {
        return UNBOUNDED_LINE_LENGTH;
    }
    let reduced = BASE_WRAP_LENGTH as f32 - indent.max(0.0) / 2.0;
    (reduced.floor() as usize).max(MIN_WRAP_LENGTH)
}

/// Greedy word wrap on whitespace.
///
/// Words are never split: a word longer than `max_line_length` is emitted on
/// its own, over-long line. Text with no words produces a single empty line.
pub fn wrap(text: &str, max_line_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_line_length {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
