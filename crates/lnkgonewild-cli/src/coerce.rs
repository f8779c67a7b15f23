//! Literal coercion for raw command-line values.
//!
//! Flags arrive as plain strings but may spell out a literal: `None`,
//! `True`/`False`, a quoted string or a list of quoted strings such as
//! `['-a', '-d']`. Anything that is not a literal is taken as-is.

use anyhow::{bail, Result};
use lnkgonewild_core::Arguments;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    None,
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

/// Interpret a raw value as a literal, falling back to the raw string.
pub fn literal(raw: &str) -> Literal {
    let trimmed = raw.trim();
    match trimmed {
        "None" => Literal::None,
        "True" => Literal::Bool(true),
        "False" => Literal::Bool(false),
        _ => parse_quoted(trimmed)
            .map(Literal::Str)
            .or_else(|| parse_list(trimmed).map(Literal::List))
            .unwrap_or_else(|| Literal::Str(raw.to_string())),
    }
}

/// A string value; `None` when the literal `None` was given.
pub fn text(raw: &str) -> Option<String> {
    match literal(raw) {
        Literal::None => None,
        Literal::Str(value) => Some(value),
        Literal::Bool(_) | Literal::List(_) => Some(raw.trim().to_string()),
    }
}

/// A path value with redundant separators and `.` components removed.
pub fn path(raw: &str) -> Option<PathBuf> {
    let value = text(raw)?;
    if value.is_empty() {
        return Some(PathBuf::new());
    }
    Some(Path::new(&value).components().collect())
}

/// A boolean flag. Accepts `True`/`False` and the usual spellings.
pub fn boolean(raw: &str) -> Result<bool> {
    match literal(raw) {
        Literal::Bool(value) => Ok(value),
        Literal::None => Ok(false),
        Literal::Str(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            _ => bail!("expected True or False, got {raw:?}"),
        },
        Literal::List(_) => bail!("expected True or False, got a list: {raw}"),
    }
}

/// Target arguments: a list literal keeps its tokens, anything else is one
/// pre-joined command line.
pub fn arguments(raw: Option<&str>) -> Arguments {
    let Some(raw) = raw else {
        return Arguments::default();
    };
    match literal(raw) {
        Literal::None => Arguments::default(),
        Literal::List(tokens) => Arguments::List(tokens),
        Literal::Str(line) => Arguments::Joined(line),
        Literal::Bool(_) => Arguments::Joined(raw.trim().to_string()),
    }
}

fn parse_quoted(text: &str) -> Option<String> {
    let mut chars = text.chars().peekable();
    let value = take_quoted(&mut chars)?;
    chars.next().is_none().then_some(value)
}

fn parse_list(text: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        skip_whitespace(&mut chars);
        if chars.peek().is_none() {
            return Some(items);
        }
        items.push(take_quoted(&mut chars)?);
        skip_whitespace(&mut chars);
        match chars.next() {
            None => return Some(items),
            Some(',') => {}
            Some(_) => return None,
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Read one quoted string. Only `\\` and escaped quotes are unescaped so
/// Windows paths such as `'C:\bin'` survive untouched.
fn take_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let quote = chars.next().filter(|c| *c == '\'' || *c == '"')?;
    let mut value = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                escaped @ ('\\' | '\'' | '"') => value.push(escaped),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            },
            c if c == quote => return Some(value),
            c => value.push(c),
        }
    }

    None
}
