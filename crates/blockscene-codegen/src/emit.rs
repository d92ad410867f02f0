//! Literal and descriptor rendering shared by the block rules.

use std::fmt::Write as _;

/// Render `s` as a double-quoted string literal.
///
/// Quotes, backslashes and control characters are escaped, as are the two
/// Unicode line terminators that end a line in the target language. Hex
/// colours, enum tokens and identifier-like text come out unchanged between
/// the quotes.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a number literal: integral values without a fractional part,
/// non-finite values as `0`.
pub fn number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Render a one-element descriptor list:
/// `[{ id: "ID", type: "TYPE", props: { k: v, ... }}]`.
pub fn descriptor(id: &str, type_name: &str, props: &[(&str, String)]) -> String {
    let props = if props.is_empty() {
        "{}".to_string()
    } else {
        let body = props
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {body} }}")
    };
    format!(
        "[{{ id: {}, type: {}, props: {props}}}]",
        quote(id),
        quote(type_name)
    )
}

/// Prefix every non-empty line of `code` with `indent`.
pub fn indent(code: &str, indent: &str) -> String {
    code.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
