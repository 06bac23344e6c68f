//! Session title derivation.

/// Truncate a message into a title, preferring a word boundary.
///
/// Char-count based, so multi-byte text never splits inside a character.
/// Truncated titles carry a trailing `...`.
pub fn truncate_to_title(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut cut_byte = text.len();
    let mut last_space: Option<(usize, usize)> = None; // (byte idx, char idx)
    for (chars_seen, (byte_idx, ch)) in text.char_indices().enumerate() {
        if chars_seen == max_chars {
            cut_byte = byte_idx;
            break;
        }
        if ch.is_whitespace() {
            last_space = Some((byte_idx, chars_seen));
        }
    }

    // Break at the last space unless that would drop more than half the text.
    let head = match last_space {
        Some((byte_idx, char_idx)) if char_idx > max_chars / 2 => &text[..byte_idx],
        _ => &text[..cut_byte],
    };

    format!("{}...", head.trim_end())
}
