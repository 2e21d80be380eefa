//! Tokenizer-level parsing of stylesheet text into top-level rules.
//!
//! No grammar validation happens here: at-rules terminated by `;` classify
//! into import / charset / passthrough, at-rules with a `{}` block (including
//! `@media`) are kept as raw text, and everything else is a style rule split
//! into selectors and declarations.

use anyhow::{anyhow, Result};
use cssparser::{Parser, ParserInput, SourcePosition, Token};

use super::{Declaration, Rule, Stylesheet};

/// Parses stylesheet text into a rule list annotated with `source`.
pub fn parse(text: &str, source: &str) -> Result<Stylesheet> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let rules = parse_rules(&mut parser)?;
    Ok(Stylesheet {
        source: source.to_string(),
        rules,
    })
}

fn parse_rules(parser: &mut Parser) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) => {}
            Token::Semicolon | Token::CDO | Token::CDC => {}
            Token::AtKeyword(name) => {
                let body_start = parser.position();
                rules.push(parse_at_rule(parser, &name, start, body_start)?);
            }
            _ => rules.push(parse_style_rule(parser, start)?),
        }
    }
    Ok(rules)
}

/// Scans an at-rule to its `;` or block and classifies it. `start` is the
/// position of the `@`; `body_start` sits right after the keyword.
fn parse_at_rule(
    parser: &mut Parser,
    name: &str,
    start: SourcePosition,
    body_start: SourcePosition,
) -> Result<Rule> {
    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => Some(token.clone()),
            Err(_) => None,
        };
        // At-rule running to end of input without `;` or block.
        let Some(token) = token else {
            return Ok(semicolon_at_rule(parser, name, start, body_start));
        };
        match token {
            Token::Semicolon => return Ok(semicolon_at_rule(parser, name, start, body_start)),
            Token::CurlyBracketBlock => {
                consume_block(parser);
                return Ok(Rule::Other {
                    raw: parser.slice_from(start).trim().to_string(),
                });
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                consume_block(parser);
            }
            _ => {}
        }
    }
}

fn semicolon_at_rule(
    parser: &mut Parser,
    name: &str,
    start: SourcePosition,
    body_start: SourcePosition,
) -> Rule {
    let body = parser.slice_from(body_start).trim();
    let body = body.strip_suffix(';').unwrap_or(body).trim();
    if name.eq_ignore_ascii_case("import") {
        Rule::Import {
            expr: body.to_string(),
        }
    } else if name.eq_ignore_ascii_case("charset") {
        Rule::Charset {
            value: body.trim_matches('"').to_string(),
        }
    } else {
        Rule::Other {
            raw: parser.slice_from(start).trim().to_string(),
        }
    }
}

/// Collects a selector prelude up to its `{}` block, then the declarations
/// inside it.
fn parse_style_rule(parser: &mut Parser, start: SourcePosition) -> Result<Rule> {
    let mut comma_offsets = Vec::new();
    loop {
        let before = parser.position();
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => return Err(anyhow!("unterminated style rule")),
        };
        match token {
            Token::CurlyBracketBlock => {
                let with_brace = parser.slice_from(start);
                let prelude = with_brace.strip_suffix('{').unwrap_or(with_brace);
                let selectors = split_selectors(prelude, start.byte_index(), &comma_offsets);
                let declarations = parser
                    .parse_nested_block(parse_declarations)
                    .map_err(|e| anyhow!("invalid declaration block: {:?}", e))?;
                return Ok(Rule::Style {
                    selectors,
                    declarations,
                });
            }
            Token::Comma => comma_offsets.push(before.byte_index()),
            // Commas inside these never separate selectors.
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                consume_block(parser);
            }
            _ => {}
        }
    }
}

/// Splits a selector prelude at the recorded top-level comma byte offsets.
/// `base` is the absolute byte index of the prelude's first byte.
fn split_selectors(prelude: &str, base: usize, comma_offsets: &[usize]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut cursor = 0;
    for offset in comma_offsets {
        let rel = offset - base;
        parts.push(&prelude[cursor..rel]);
        cursor = rel + 1;
    }
    parts.push(&prelude[cursor..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_declarations<'i>(
    block: &mut Parser<'i, '_>,
) -> Result<Vec<Declaration>, cssparser::ParseError<'i, ()>> {
    let mut declarations = Vec::new();
    loop {
        let token = match block.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Semicolon => {}
            Token::Ident(property) => {
                if block.expect_colon().is_err() {
                    consume_until_semicolon(block);
                    continue;
                }
                let start = block.position();
                consume_until_semicolon(block);
                let raw = block.slice_from(start).trim();
                let value = raw.strip_suffix(';').unwrap_or(raw).trim_end();
                declarations.push(Declaration {
                    property: property.to_string(),
                    value: value.to_string(),
                });
            }
            // Tolerated, contributes nothing.
            _ => consume_until_semicolon(block),
        }
    }
    Ok(declarations)
}

/// Advances past tokens up to and including the next top-level `;`.
fn consume_until_semicolon(parser: &mut Parser) {
    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => return,
        };
        match token {
            Token::Semicolon => return,
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => consume_block(parser),
            _ => {}
        }
    }
}

/// Drains the block just opened so the parser lands past its closing brace.
fn consume_block(parser: &mut Parser) {
    let _ = parser.parse_nested_block(|block| -> Result<(), cssparser::ParseError<'_, ()>> {
        while block.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    });
}
