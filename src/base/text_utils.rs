//! Text utilities for locating identifiers under a cursor.
//!
//! Providers call these with the raw document text when the cursor is not on
//! an indexed reference (e.g. inside an option value) and they still want the
//! word being hovered.

use super::position::{Position, Range};

/// Check if a character is part of a simple identifier.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check if a character is part of a dotted type name (`google.protobuf.Any`).
#[inline]
fn is_type_name_character(c: char) -> bool {
    is_word_character(c) || c == '.'
}

/// Extract the identifier at `position` together with its range.
///
/// # Example
/// ```
/// use protols::base::{Position, text_utils::word_at};
///
/// let text = "message Foo {\n  Bar bar = 1;\n}";
/// let (word, _) = word_at(text, Position::new(1, 3)).unwrap();
/// assert_eq!(word, "Bar");
/// ```
pub fn word_at(text: &str, position: Position) -> Option<(String, Range)> {
    scan_at(text, position, is_word_character)
}

/// Extract the dotted type name at `position`, trimming stray edge dots.
///
/// # Example
/// ```
/// use protols::base::{Position, text_utils::type_name_at};
///
/// let text = "  google.protobuf.Timestamp created = 1;";
/// let (name, _) = type_name_at(text, Position::new(0, 12)).unwrap();
/// assert_eq!(name, "google.protobuf.Timestamp");
/// ```
pub fn type_name_at(text: &str, position: Position) -> Option<(String, Range)> {
    let (raw, range) = scan_at(text, position, is_type_name_character)?;
    let leading = raw.len() - raw.trim_start_matches('.').len();
    let trimmed = raw.trim_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    // Keep a single leading dot: it marks a root-anchored name.
    let name = if leading > 0 {
        format!(".{trimmed}")
    } else {
        trimmed.to_string()
    };
    Some((name, range))
}

fn scan_at(text: &str, position: Position, accept: fn(char) -> bool) -> Option<(String, Range)> {
    let line = text.lines().nth(position.line as usize)?;
    let chars: Vec<char> = line.chars().collect();

    // Map the UTF-16 column onto a char index.
    let mut units = 0u32;
    let mut index = chars.len();
    for (i, ch) in chars.iter().enumerate() {
        if units >= position.character {
            index = i;
            break;
        }
        units += ch.len_utf16() as u32;
    }
    if index >= chars.len() || !accept(chars[index]) {
        // Cursor right after a word still counts.
        if index > 0 && accept(chars[index - 1]) {
            index -= 1;
        } else {
            return None;
        }
    }

    let mut start = index;
    while start > 0 && accept(chars[start - 1]) {
        start -= 1;
    }
    let mut end = index;
    while end < chars.len() && accept(chars[end]) {
        end += 1;
    }

    let utf16 = |slice: &[char]| slice.iter().map(|c| c.len_utf16() as u32).sum::<u32>();
    let start_col = utf16(&chars[..start]);
    let end_col = start_col + utf16(&chars[start..end]);
    let word: String = chars[start..end].iter().collect();
    Some((
        word,
        Range::from_coords(position.line, start_col, position.line, end_col),
    ))
}
