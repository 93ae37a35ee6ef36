//! Delimiter-declaration header recognition
//!
//! An expression may begin with an optional header declaring custom
//! delimiters. Two forms exist and are checked in order: the delimiter-list
//! form (`//[a][bb]\n`) and the single-character form (`//;\n`). The list
//! form is checked first because its prefix is a superset of the
//! single-character form's prefix; checking the other way around would
//! misclassify a list header as a malformed single-character one.
//!
//! Header recognition has no failure modes. Malformed shapes fall through to
//! "no header" and the whole expression is treated as the body.

use crate::delimiters::DelimiterSet;

/// Prefix opening any delimiter declaration
pub const DECLARATION_PREFIX: &str = "//";

/// Prefix opening a delimiter-list declaration
pub const LIST_PREFIX: &str = "//[";

/// Terminator closing a delimiter-list declaration
pub const LIST_TERMINATOR: &str = "]\n";

/// Separator between entries inside a delimiter-list declaration
pub const LIST_SEPARATOR: &str = "][";

/// Total size of a single-character header: `//`, one delimiter byte, `\n`
pub const SINGLE_CHAR_HEADER_SIZE: usize = 4;

/// Which header form was recognized at the start of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderForm {
    None,
    SingleCharacter,
    DelimiterList,
}

impl HeaderForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderForm::None => "none",
            HeaderForm::SingleCharacter => "single-character",
            HeaderForm::DelimiterList => "delimiter-list",
        }
    }
}

/// Result of scanning an expression prefix for a delimiter declaration
#[derive(Debug, Clone)]
pub struct HeaderScan {
    /// Default delimiters plus any declared ones
    pub delimiters: DelimiterSet,
    /// Byte length of the recognized header (0 when no header)
    pub header_size: usize,
    /// Which recognition branch matched
    pub form: HeaderForm,
}

impl HeaderScan {
    /// The numeric body: everything after the header
    pub fn body_of<'a>(&self, expression: &'a str) -> &'a str {
        &expression[self.header_size..]
    }
}

/// Classify the expression prefix and extract declared delimiters.
///
/// Always succeeds; an absent or malformed header yields the default
/// delimiter set and a header size of zero.
pub fn parse_header(expression: &str) -> HeaderScan {
    let mut delimiters = DelimiterSet::new();

    if let Some(header_size) = scan_delimiter_list(expression, &mut delimiters) {
        return HeaderScan {
            delimiters,
            header_size,
            form: HeaderForm::DelimiterList,
        };
    }

    if let Some(header_size) = scan_single_character(expression, &mut delimiters) {
        return HeaderScan {
            delimiters,
            header_size,
            form: HeaderForm::SingleCharacter,
        };
    }

    HeaderScan {
        delimiters,
        header_size: 0,
        form: HeaderForm::None,
    }
}

/// Delimiter-list form: `//[` followed somewhere by `]\n`. The blob between
/// them is split on `][`; entries may contain any characters, including
/// structural ones. Empty entries are discarded by the set.
fn scan_delimiter_list(expression: &str, delimiters: &mut DelimiterSet) -> Option<usize> {
    if !expression.starts_with(LIST_PREFIX) {
        return None;
    }

    let end_tag_pos = expression[LIST_PREFIX.len()..]
        .find(LIST_TERMINATOR)
        .map(|pos| pos + LIST_PREFIX.len())?;

    let blob = &expression[LIST_PREFIX.len()..end_tag_pos];
    for declared in blob.split(LIST_SEPARATOR) {
        delimiters.insert(declared);
    }

    Some(end_tag_pos + LIST_TERMINATOR.len())
}

/// Single-character form: `//` plus one delimiter byte plus `\n`.
fn scan_single_character(expression: &str, delimiters: &mut DelimiterSet) -> Option<usize> {
    if !expression.starts_with(DECLARATION_PREFIX) {
        return None;
    }

    if expression.len() < SINGLE_CHAR_HEADER_SIZE {
        return None;
    }

    if expression.as_bytes()[SINGLE_CHAR_HEADER_SIZE - 1] != b'\n' {
        return None;
    }

    // Byte 3 being '\n' guarantees byte 2 holds a complete single-byte
    // character: a multi-byte character starting at 2 would put a
    // continuation byte, never 0x0A, at index 3.
    let declared = &expression[2..3];
    delimiters.insert(declared);

    Some(SINGLE_CHAR_HEADER_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(expression: &str) -> HeaderScan {
        parse_header(expression)
    }

    #[test]
    fn test_no_header_plain_expression() {
        let result = scan("1,2,3");
        assert_eq!(result.form, HeaderForm::None);
        assert_eq!(result.header_size, 0);
        assert_eq!(result.delimiters.len(), 2);
        assert_eq!(result.body_of("1,2,3"), "1,2,3");
    }

    #[test]
    fn test_no_header_empty_expression() {
        let result = scan("");
        assert_eq!(result.form, HeaderForm::None);
        assert_eq!(result.header_size, 0);
    }

    #[test]
    fn test_single_character_form() {
        let result = scan("//;\n1;2");
        assert_eq!(result.form, HeaderForm::SingleCharacter);
        assert_eq!(result.header_size, 4);
        assert!(result.delimiters.contains(";"));
        assert_eq!(result.body_of("//;\n1;2"), "1;2");
    }

    #[test]
    fn test_single_character_form_accepts_any_byte() {
        for (expression, delimiter) in [
            ("//$\n1$2", "$"),
            ("// \n1 2", " "),
            ("///\n1/2", "/"),
            ("//,\n1,2", ","),
            ("//0\n102", "0"),
        ] {
            let result = scan(expression);
            assert_eq!(result.form, HeaderForm::SingleCharacter, "{:?}", expression);
            assert!(result.delimiters.contains(delimiter), "{:?}", expression);
        }
    }

    #[test]
    fn test_newline_declared_as_delimiter() {
        let result = scan("//\n\n1\n2");
        assert_eq!(result.form, HeaderForm::SingleCharacter);
        assert_eq!(result.header_size, 4);
        // The declared newline is already a default
        assert_eq!(result.delimiters.len(), 2);
    }

    #[test]
    fn test_delimiter_list_single_entry() {
        let result = scan("//[***]\n1***2***3");
        assert_eq!(result.form, HeaderForm::DelimiterList);
        assert_eq!(result.header_size, 8);
        assert!(result.delimiters.contains("***"));
        assert_eq!(result.body_of("//[***]\n1***2***3"), "1***2***3");
    }

    #[test]
    fn test_delimiter_list_multiple_entries() {
        let result = scan("//[*][%%]\n1*2%%3");
        assert_eq!(result.form, HeaderForm::DelimiterList);
        assert!(result.delimiters.contains("*"));
        assert!(result.delimiters.contains("%%"));
        assert_eq!(result.delimiters.declared_count(), 2);
    }

    #[test]
    fn test_empty_delimiter_list_falls_back_to_defaults() {
        let result = scan("//[]\n1,2,3");
        assert_eq!(result.form, HeaderForm::DelimiterList);
        assert_eq!(result.header_size, 5);
        assert_eq!(result.delimiters.len(), 2);
    }

    #[test]
    fn test_two_empty_list_entries_discarded() {
        // The blob "][" splits into two empty entries; both are dropped
        let result = scan("//[][]\n1,2,3");
        assert_eq!(result.form, HeaderForm::DelimiterList);
        assert_eq!(result.delimiters.len(), 2);
    }

    #[test]
    fn test_list_entries_with_structural_characters() {
        for (expression, delimiter) in [
            ("//[//]\n1//2", "//"),
            ("//[//[]\n1//[2", "//["),
            ("//[]]\n1]2", "]"),
            ("//[[]]\n1[]2", "[]"),
            ("//[A,Z]\n1A,Z2", "A,Z"),
            ("//[,**]\n1,**2", ",**"),
            ("//[**\n]\n1**\n2", "**\n"),
        ] {
            let result = scan(expression);
            assert_eq!(result.form, HeaderForm::DelimiterList, "{:?}", expression);
            assert!(
                result.delimiters.contains(delimiter),
                "{:?} should declare {:?}",
                expression,
                delimiter
            );
        }
    }

    #[test]
    fn test_unterminated_list_falls_through() {
        // No "]\n" anywhere: not a list header, and byte 3 is not a newline,
        // so not a single-character header either
        let result = scan("//[*2,3");
        assert_eq!(result.form, HeaderForm::None);
        assert_eq!(result.header_size, 0);
        assert_eq!(result.delimiters.len(), 2);
    }

    #[test]
    fn test_unterminated_list_with_newline_at_index_three() {
        // "//[\n..." has no "]\n", so the list branch falls through; the
        // single-character branch then sees '\n' at index 3 and declares '['
        let result = scan("//[\n1[2");
        assert_eq!(result.form, HeaderForm::SingleCharacter);
        assert!(result.delimiters.contains("["));
    }

    #[test]
    fn test_short_prefix_only() {
        for expression in ["//", "//;", "/"] {
            let result = scan(expression);
            assert_eq!(result.form, HeaderForm::None, "{:?}", expression);
            assert_eq!(result.header_size, 0);
        }
    }

    #[test]
    fn test_multibyte_character_at_delimiter_position() {
        // "§" is two bytes, so index 3 is a continuation byte and the
        // single-character branch must fall through without panicking
        let result = scan("//§\n1§2");
        assert_eq!(result.form, HeaderForm::None);
        assert_eq!(result.header_size, 0);
    }

    #[test]
    fn test_header_size_never_exceeds_expression() {
        for expression in ["", "1", "//;\n", "//[**]\n", "//[][]\n1,2"] {
            let result = scan(expression);
            assert!(result.header_size <= expression.len());
        }
    }
}
