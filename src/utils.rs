/// Calculates the 1-based line and column number for a given byte position in the source text.
/// This function is designed to be called only when something needs reporting, as it iterates
/// through the source text to determine the position.
pub fn get_line_and_column(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (i, c) in source.char_indices() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Whitespace as XML counts it: space, tab, CR and LF.
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Whether `name` can be written as an element or attribute name and read
/// back unchanged by the tag indexer.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c == '!' || c == '?')
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '=' | '&'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_column() {
        let source = "<a>\r\n  <b/>\r\n</a>";
        assert_eq!(get_line_and_column(source, 0), (1, 1));
        assert_eq!(get_line_and_column(source, 7), (2, 3));
    }

    #[test]
    fn test_line_and_column_counts_chars_not_bytes() {
        assert_eq!(get_line_and_column("é<a/>", 2), (1, 2));
    }

    #[test]
    fn test_valid_names() {
        for name in ["a", "server.port", "xsi:type", "_x-1", "données"] {
            assert!(is_valid_name(name), "{name} should be valid");
        }
        for name in ["", "a b", "a/b", "<a", "!DOCTYPE", "?xml", "a=b", "a\"", "a&b"] {
            assert!(!is_valid_name(name), "{name:?} should be invalid");
        }
    }
}
