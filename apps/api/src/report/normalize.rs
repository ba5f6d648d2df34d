use std::borrow::Cow;

use crate::report::sections::{find_ignore_ascii_case, SectionMarker};

/// Canonical bullet glyph written in place of `- ` list markers.
pub const BULLET: &str = "•";
/// Pointing glyph the analysis prompt asks the model to use for bullets.
pub const POINTER: &str = "👉";
/// Uniform paragraph delimiter produced by `normalize`.
pub const PARAGRAPH: &str = "\n\n";

/// Normalizes one section body into `•`-bulleted paragraphs separated by a blank line.
///
/// Echoed section labels are dropped (case-insensitive), `- ` list markers become `• `,
/// and any run of line breaks becomes exactly one blank line. Already-normalized text is
/// returned unchanged.
pub fn normalize(section: &str) -> String {
    let stripped = strip_labels(section);
    let bulleted = stripped
        .lines()
        .map(canonical_bullet)
        .collect::<Vec<_>>()
        .join("\n");
    collapse_newlines(&bulleted).trim().to_string()
}

/// Splits normalized text into display lines, in source order, without their leading bullet.
pub fn split_items(normalized: &str) -> Vec<String> {
    normalized
        .split(PARAGRAPH)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(strip_bullet)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn strip_labels(text: &str) -> String {
    SectionMarker::ALL
        .iter()
        .fold(text.to_string(), |acc, marker| strip_label(&acc, marker.label()))
}

fn strip_label(text: &str, label: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = find_ignore_ascii_case(rest, label) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + label.len()..];
    }
    out.push_str(rest);
    out
}

fn canonical_bullet(line: &str) -> Cow<'_, str> {
    match line.trim_start().strip_prefix('-') {
        Some(rest) if rest.starts_with([' ', '\t']) => {
            Cow::Owned(format!("{BULLET} {}", rest.trim_start()))
        }
        _ => Cow::Borrowed(line),
    }
}

fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_run = false;
    for ch in text.chars() {
        if ch == '\n' {
            if !in_run {
                out.push_str(PARAGRAPH);
                in_run = true;
            }
        } else {
            in_run = false;
            out.push(ch);
        }
    }
    out
}

fn strip_bullet(item: &str) -> &str {
    [BULLET, POINTER]
        .iter()
        .find_map(|glyph| item.strip_prefix(glyph))
        .map(str::trim_start)
        .unwrap_or(item)
}
