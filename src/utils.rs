use crate::core::types::Position;

/// Length of `s` in UTF-16 code units (the LSP column unit)
pub fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Get a line of the document by 0-based index
pub fn get_line_at_position(document: &str, line_num: usize) -> Option<&str> {
    document.split('\n').nth(line_num)
}

/// Convert an LSP position (UTF-16 column) to a byte offset.
///
/// Positions past the end of a line clamp to the line end; positions past
/// the last line clamp to the end of the document.
pub fn position_to_byte(source: &str, position: Position) -> usize {
    let mut byte_offset = 0;

    for (current_line, line) in source.split('\n').enumerate() {
        if current_line == position.line as usize {
            let mut units = 0u32;
            for (idx, ch) in line.char_indices() {
                if units >= position.character {
                    return byte_offset + idx;
                }
                units += ch.len_utf16() as u32;
            }
            return byte_offset + line.len();
        }
        byte_offset += line.len() + 1; // +1 for newline
    }

    source.len()
}

/// Apply an incremental edit in place
pub fn apply_text_edit(text: &mut String, start: Position, end: Position, new_text: &str) {
    let start_byte = position_to_byte(text, start);
    let end_byte = position_to_byte(text, end).max(start_byte);

    text.replace_range(start_byte..end_byte, new_text);
}

/// Escape text for interpolation into HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_text_edit_insert() {
        let mut text = String::from("hello world");
        let start = Position::new(0, 6);
        let end = Position::new(0, 6);

        apply_text_edit(&mut text, start, end, "beautiful ");
        assert_eq!(text, "hello beautiful world");
    }

    #[test]
    fn test_apply_text_edit_replace() {
        let mut text = String::from("hello world");
        let start = Position::new(0, 6);
        let end = Position::new(0, 11);

        apply_text_edit(&mut text, start, end, "Rust");
        assert_eq!(text, "hello Rust");
    }

    #[test]
    fn test_apply_text_edit_delete() {
        let mut text = String::from("hello world");
        let start = Position::new(0, 5);
        let end = Position::new(0, 11);

        apply_text_edit(&mut text, start, end, "");
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_apply_text_edit_multiline() {
        let mut text = String::from("hello world");
        let start = Position::new(0, 6);
        let end = Position::new(0, 11);

        apply_text_edit(&mut text, start, end, "beautiful\nRust");
        assert_eq!(text, "hello beautiful\nRust");
    }

    #[test]
    fn test_apply_text_edit_second_line() {
        let mut text = String::from("a {\n  gap: 1px;\n}");
        apply_text_edit(&mut text, Position::new(1, 2), Position::new(1, 5), "row-gap");
        assert_eq!(text, "a {\n  row-gap: 1px;\n}");
    }

    #[test]
    fn test_position_to_byte_utf16() {
        // "😀" is two UTF-16 units and four bytes
        let text = "😀x\ny";
        assert_eq!(position_to_byte(text, Position::new(0, 0)), 0);
        assert_eq!(position_to_byte(text, Position::new(0, 2)), 4);
        assert_eq!(position_to_byte(text, Position::new(0, 99)), 5);
        assert_eq!(position_to_byte(text, Position::new(1, 1)), 7);
        assert_eq!(position_to_byte(text, Position::new(7, 0)), text.len());
    }

    #[test]
    fn test_get_line_at_position() {
        assert_eq!(get_line_at_position("a\nb\n", 1), Some("b"));
        assert_eq!(get_line_at_position("a\nb\n", 2), Some(""));
        assert_eq!(get_line_at_position("a", 3), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<dialog>"), "&lt;dialog&gt;");
        assert_eq!(escape_html("loading=\"lazy\""), "loading=&quot;lazy&quot;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }
}
