//! Serialize a rule list back to stylesheet text.

use super::{Rule, Stylesheet};

/// Renders the stylesheet, one rule per paragraph.
pub fn serialize(sheet: &Stylesheet) -> String {
    render_rules(&sheet.rules, 0)
}

fn render_rules(rules: &[Rule], depth: usize) -> String {
    rules
        .iter()
        .map(|rule| render_rule(rule, depth))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_rule(rule: &Rule, depth: usize) -> String {
    let pad = "  ".repeat(depth);
    match rule {
        Rule::Import { expr } => format!("{pad}@import {expr};"),
        Rule::Charset { value } => format!("{pad}@charset \"{value}\";"),
        Rule::Style {
            selectors,
            declarations,
        } => {
            let mut out = String::new();
            out.push_str(&pad);
            out.push_str(&selectors.join(&format!(",\n{pad}")));
            out.push_str(" {\n");
            for decl in declarations {
                out.push_str(&pad);
                out.push_str("  ");
                out.push_str(&decl.property);
                out.push_str(": ");
                out.push_str(&decl.value);
                out.push_str(";\n");
            }
            out.push_str(&pad);
            out.push('}');
            out
        }
        Rule::Media { condition, rules } => {
            if rules.is_empty() {
                format!("{pad}@media {condition} {{}}")
            } else {
                format!(
                    "{pad}@media {condition} {{\n{}\n{pad}}}",
                    render_rules(rules, depth + 1)
                )
            }
        }
        Rule::Other { raw } => {
            if depth == 0 {
                raw.clone()
            } else {
                raw.lines()
                    .map(|line| format!("{pad}{line}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}
