//! Header recognition module
//!
//! Classifies the start of a raw expression, extracts declared delimiters and
//! reports where the numeric body begins.

pub mod parser;

pub use parser::{parse_header, HeaderForm, HeaderScan};
pub use parser::{
    DECLARATION_PREFIX, LIST_PREFIX, LIST_SEPARATOR, LIST_TERMINATOR, SINGLE_CHAR_HEADER_SIZE,
};

/// Split an expression into its header scan and numeric body in one step
pub fn split_header(expression: &str) -> (HeaderScan, &str) {
    let scan = parse_header(expression);
    let body = scan.body_of(expression);
    (scan, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header_with_declaration() {
        let (scan, body) = split_header("//;\n1;2");
        assert_eq!(scan.form, HeaderForm::SingleCharacter);
        assert_eq!(body, "1;2");
    }

    #[test]
    fn test_split_header_without_declaration() {
        let (scan, body) = split_header("1,2");
        assert_eq!(scan.form, HeaderForm::None);
        assert_eq!(body, "1,2");
    }
}
