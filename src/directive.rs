//! `@import` directive parsing.

use cssparser::{Parser, ParserInput, Token};

/// Parsed form of one `@import` rule: target path plus media condition
/// (empty when the import is unconditioned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    pub path: String,
    pub condition: String,
}

/// Parses the raw text of one `@import` rule (`@import <target> <cond>;`).
///
/// Accepts `"path"`, `url(path)`, and `url("path")` targets, followed by an
/// optional media condition up to the terminating `;`. Returns `None` on
/// anything else; callers must skip the rule and continue.
pub fn parse_import(raw: &str) -> Option<ImportDirective> {
    let mut input = ParserInput::new(raw);
    let mut parser = Parser::new(&mut input);

    let keyword = parser.next().ok()?.clone();
    match keyword {
        Token::AtKeyword(name) if name.eq_ignore_ascii_case("import") => {}
        _ => return None,
    }

    let target = parser.next().ok()?.clone();
    let path = match target {
        // `url(path)` without quotes tokenizes as a single url token.
        Token::QuotedString(value) | Token::UnquotedUrl(value) => value.to_string(),
        Token::Function(name) if name.eq_ignore_ascii_case("url") => parser
            .parse_nested_block(|block| {
                let inner = block.next()?.clone();
                match inner {
                    Token::QuotedString(value) | Token::UnquotedUrl(value) => {
                        consume_remainder(block);
                        Ok(value.to_string())
                    }
                    _ => Err(block.new_custom_error::<(), ()>(())),
                }
            })
            .ok()?,
        _ => return None,
    };

    let start = parser.position();
    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Semicolon => break,
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                let _ = parser.parse_nested_block(
                    |block| -> Result<(), cssparser::ParseError<'_, ()>> {
                        consume_remainder(block);
                        Ok(())
                    },
                );
            }
            _ => {}
        }
    }
    let condition = parser
        .slice_from(start)
        .trim_end()
        .trim_end_matches(';')
        .trim()
        .to_string();

    Some(ImportDirective { path, condition })
}

/// Drains a nested block so the outer parser lands past its closing brace.
fn consume_remainder(parser: &mut Parser) {
    while parser.next_including_whitespace_and_comments().is_ok() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_target() {
        let directive = parse_import("@import \"test.css\";").unwrap();
        assert_eq!(directive.path, "test.css");
        assert_eq!(directive.condition, "");
    }

    #[test]
    fn url_target_unquoted() {
        let directive = parse_import("@import url(test.css);").unwrap();
        assert_eq!(directive.path, "test.css");
        assert_eq!(directive.condition, "");
    }

    #[test]
    fn url_target_quoted() {
        let directive = parse_import("@import url(\"test.css\");").unwrap();
        assert_eq!(directive.path, "test.css");
        assert_eq!(directive.condition, "");
    }

    #[test]
    fn media_condition_preserved() {
        let directive =
            parse_import("@import \"narrow.css\" screen and (min-width: 100px);").unwrap();
        assert_eq!(directive.path, "narrow.css");
        assert_eq!(directive.condition, "screen and (min-width: 100px)");
    }

    #[test]
    fn absolute_target() {
        let directive = parse_import("@import url(http://other.domain/x.css) print;").unwrap();
        assert_eq!(directive.path, "http://other.domain/x.css");
        assert_eq!(directive.condition, "print");
    }

    #[test]
    fn missing_target_rejected() {
        assert!(parse_import("@import ;").is_none());
    }

    #[test]
    fn wrong_keyword_rejected() {
        assert!(parse_import("@media screen;").is_none());
    }

    #[test]
    fn bare_identifier_target_rejected() {
        assert!(parse_import("@import test.css;").is_none());
    }

    #[test]
    fn empty_input_rejected() {
        assert!(parse_import("").is_none());
    }
}
