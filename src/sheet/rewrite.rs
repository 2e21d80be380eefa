//! `url(...)` reference rewriting inside parsed rules.
//!
//! Url token ranges are located with the tokenizer and the resolved target is
//! spliced back into the original text, so everything around the tokens stays
//! byte for byte as written.

use anyhow::Result;
use cssparser::{serialize_string, Parser, ParserInput, Token};
use std::ops::Range;

use super::{Rule, Stylesheet};

/// Rewrites every `url(...)` token in declaration values and raw passthrough
/// rules through `resolve`. Quoted strings outside `url()` are untouched.
pub fn rewrite_urls(sheet: &mut Stylesheet, resolve: &dyn Fn(&str) -> String) -> Result<()> {
    for rule in &mut sheet.rules {
        rewrite_rule(rule, resolve)?;
    }
    Ok(())
}

fn rewrite_rule(rule: &mut Rule, resolve: &dyn Fn(&str) -> String) -> Result<()> {
    match rule {
        Rule::Style { declarations, .. } => {
            for decl in declarations {
                decl.value = rewrite_text(&decl.value, resolve)?;
            }
        }
        Rule::Other { raw } => *raw = rewrite_text(raw, resolve)?,
        Rule::Media { rules, .. } => {
            for rule in rules {
                rewrite_rule(rule, resolve)?;
            }
        }
        Rule::Import { .. } | Rule::Charset { .. } => {}
    }
    Ok(())
}

/// Replaces url tokens in `text`, returning the spliced result.
fn rewrite_text(text: &str, resolve: &dyn Fn(&str) -> String) -> Result<String> {
    let mut found: Vec<(Range<usize>, String)> = Vec::new();
    {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        collect_url_tokens(&mut parser, &mut found);
    }
    if found.is_empty() {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, target) in found {
        out.push_str(&text[cursor..range.start]);
        let mut quoted = String::new();
        let _ = serialize_string(&resolve(&target), &mut quoted);
        out.push_str("url(");
        out.push_str(&quoted);
        out.push(')');
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Walks tokens (descending into blocks and functions) and records the byte
/// range and target of every url token.
fn collect_url_tokens<'i>(parser: &mut Parser<'i, '_>, found: &mut Vec<(Range<usize>, String)>) {
    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::UnquotedUrl(value) => {
                found.push((
                    start.byte_index()..parser.position().byte_index(),
                    value.to_string(),
                ));
            }
            Token::Function(name) if name.eq_ignore_ascii_case("url") => {
                // Quoted form: url("...") tokenizes as a function.
                let target = parser.parse_nested_block(
                    |block| -> Result<Option<String>, cssparser::ParseError<'i, ()>> {
                        let first = match block.next() {
                            Ok(token) => token.clone(),
                            Err(_) => return Ok(None),
                        };
                        let value = match first {
                            Token::QuotedString(value) => Some(value.to_string()),
                            _ => None,
                        };
                        while block.next_including_whitespace_and_comments().is_ok() {}
                        Ok(value)
                    },
                );
                if let Ok(Some(value)) = target {
                    found.push((
                        start.byte_index()..parser.position().byte_index(),
                        value,
                    ));
                }
            }
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                let _ = parser.parse_nested_block(
                    |block| -> Result<(), cssparser::ParseError<'i, ()>> {
                        collect_url_tokens(block, found);
                        Ok(())
                    },
                );
            }
            _ => {}
        }
    }
}
