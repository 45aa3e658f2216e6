//! Validated SQL identifiers.
//!
//! Table and column names end up spliced directly into statement text, so every
//! name a builder accepts goes through [`Ident::parse`] first:
//!
//! - bare segments match `[A-Za-z_][A-Za-z0-9_$]*`
//! - quoted segments (`"Mixed Case"`) accept anything but NUL, with `""` as an escaped quote
//! - segments are separated by `.` (`public.users`, `users.id`)

use crate::error::{StmtError, StmtResult};
use std::fmt;

/// One dot-separated segment of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Bare(String),
    Quoted(String),
}

/// A table or column name that is safe to render verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    segments: Vec<Segment>,
}

impl Ident {
    /// Parse a possibly dotted, possibly quoted identifier.
    pub fn parse(input: &str) -> StmtResult<Self> {
        if input.is_empty() {
            return Err(StmtError::invalid_argument("identifier is empty"));
        }
        if input.contains('\0') {
            return Err(StmtError::invalid_argument(
                "identifier contains a NUL character",
            ));
        }

        let mut segments = Vec::new();
        let mut rest = input;
        loop {
            let (segment, tail) = if let Some(quoted) = rest.strip_prefix('"') {
                parse_quoted(quoted)?
            } else {
                parse_bare(rest)?
            };
            segments.push(segment);

            match tail.strip_prefix('.') {
                Some("") => {
                    return Err(StmtError::invalid_argument(format!(
                        "identifier `{input}` ends with '.'"
                    )));
                }
                Some(next) => rest = next,
                None if tail.is_empty() => break,
                None => {
                    return Err(StmtError::invalid_argument(format!(
                        "unexpected `{tail}` in identifier `{input}`"
                    )));
                }
            }
        }

        Ok(Self { segments })
    }

    /// Parse `input`, naming what it is in the error message (e.g. "table name").
    pub(crate) fn parse_as(what: &str, input: &str) -> StmtResult<Self> {
        if input.trim().is_empty() {
            return Err(StmtError::invalid_argument(format!(
                "expected {what} but none was given"
            )));
        }
        Self::parse(input).map_err(|e| match e {
            StmtError::InvalidArgument(msg) => {
                StmtError::invalid_argument(format!("invalid {what}: {msg}"))
            }
            other => other,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the identifier as it appears in SQL text.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match segment {
                Segment::Bare(name) => out.push_str(name),
                Segment::Quoted(name) => {
                    out.push('"');
                    out.push_str(&name.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn parse_quoted(input: &str) -> StmtResult<(Segment, &str)> {
    let mut name = String::new();
    let mut chars = input.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            name.push(c);
            continue;
        }
        if matches!(chars.peek(), Some((_, '"'))) {
            chars.next();
            name.push('"');
            continue;
        }
        if name.is_empty() {
            return Err(StmtError::invalid_argument("empty quoted identifier"));
        }
        return Ok((Segment::Quoted(name), &input[i + 1..]));
    }
    Err(StmtError::invalid_argument("unclosed quoted identifier"))
}

fn parse_bare(input: &str) -> StmtResult<(Segment, &str)> {
    let end = input.find('.').unwrap_or(input.len());
    let (name, tail) = input.split_at(end);

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(StmtError::invalid_argument("empty identifier segment")),
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => {
            return Err(StmtError::invalid_argument(format!(
                "identifier cannot start with '{c}'"
            )));
        }
    }
    if let Some(c) = chars.find(|&c| !(c == '_' || c == '$' || c.is_ascii_alphanumeric())) {
        return Err(StmtError::invalid_argument(format!(
            "invalid character '{c}' in identifier"
        )));
    }

    Ok((Segment::Bare(name.to_string()), tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_dotted() {
        assert_eq!(Ident::parse("users").unwrap().to_sql(), "users");
        assert_eq!(Ident::parse("public.users").unwrap().to_sql(), "public.users");
        assert_eq!(Ident::parse("orders.user_id").unwrap().segments().len(), 2);
    }

    #[test]
    fn quoted_segments_round_trip_escapes() {
        let ident = Ident::parse(r#"public."Order ""Items""""#).unwrap();
        assert_eq!(
            ident.segments()[1],
            Segment::Quoted(r#"Order "Items""#.to_string())
        );
        assert_eq!(ident.to_sql(), r#"public."Order ""Items""""#);
    }

    #[test]
    fn dollar_allowed_after_first_char() {
        assert!(Ident::parse("col$1").is_ok());
        assert!(Ident::parse("$col").is_err());
    }

    #[test]
    fn rejects_injection_attempts() {
        for bad in [
            "",
            "users; DROP TABLE users",
            "1users",
            "users..id",
            "users.",
            ".users",
            "my table",
            r#""unclosed"#,
            r#""""#,
            "users\0",
        ] {
            let err = Ident::parse(bad).unwrap_err();
            assert!(err.is_invalid_argument(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_as_names_the_argument() {
        let err = Ident::parse_as("table name", "  ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected table name but none was given"
        );

        let err = Ident::parse_as("column name", "a b").unwrap_err();
        assert!(err.to_string().contains("invalid column name"));
    }
}
