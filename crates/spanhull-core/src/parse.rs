//! Point-stream decoder.
//!
//! The input is plain text: the first non-blank line holds the number of
//! points, followed by exactly that many non-blank lines of two
//! whitespace-separated coordinates.
//!
//! ```text
//! 3
//! 68   -21
//! 57    60
//! -33.5 54
//! ```
//!
//! Blank lines are ignored anywhere. Errors carry the 1-based line and
//! column of the offending token together with the full source line, so
//! callers can point at the problem with [`ParseError::render`].
//!
//! This module does no I/O; it decodes an in-memory `&str`.

use std::fmt;

use crate::types::{Point, PointSet};

/// Which coordinate of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// First coordinate on the line.
    X,
    /// Second coordinate on the line.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// What went wrong while decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The input holds nothing but whitespace.
    #[error("input is empty")]
    EmptyInput,

    /// The leading count is not a non-negative integer.
    #[error("invalid amount of points")]
    InvalidCount,

    /// A coordinate token is not a finite real number.
    #[error("invalid {0}-coordinate")]
    InvalidCoordinate(Axis),

    /// A point line ends before its second coordinate.
    #[error("missing {0}-coordinate")]
    MissingCoordinate(Axis),

    /// Something follows the expected tokens on a line.
    #[error("extra tokens after {0}")]
    ExtraToken(&'static str),

    /// The number of point lines differs from the declared count.
    #[error("expected {expected} points, found {found}")]
    CountMismatch {
        /// Count declared on the first line.
        expected: usize,
        /// Point lines actually present.
        found: usize,
    },
}

/// A decoding failure with its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    kind: ParseErrorKind,
    line: usize,
    column: usize,
    token: String,
    context: String,
}

impl ParseError {
    fn new(kind: ParseErrorKind, line: usize, column: usize, token: &str, context: &str) -> Self {
        Self {
            kind,
            line,
            column,
            token: token.to_string(),
            context: context.to_string(),
        }
    }

    /// The error kind.
    #[must_use]
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// 1-based line number; one past the last line for end-of-input errors.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending token.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The offending token; empty when the problem is a missing token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The full source line the error points into.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Multi-line diagnostic with a caret marker under the offending token.
    ///
    /// ```text
    /// error: invalid y-coordinate
    ///  --> line 3, column 4
    ///   |
    /// 3 | 57 6O
    ///   |    ^^
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let line_label = self.line.to_string();
        let gutter = " ".repeat(line_label.len());
        let indent = " ".repeat(self.column.saturating_sub(1));
        let marker = "^".repeat(self.token.chars().count().max(1));
        format!(
            "error: {kind}\n{gutter}--> line {line}, column {column}\n{gutter} |\n{line_label} | {context}\n{gutter} | {indent}{marker}",
            kind = self.kind,
            line = self.line,
            column = self.column,
            context = self.context,
        )
    }
}

/// Whitespace-separated tokens with their 1-based (character) columns.
fn tokens(line: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (byte, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(byte),
            (true, Some(s)) => {
                out.push((s, &line[s..byte]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, &line[s..]));
    }
    out.into_iter()
        .map(|(byte, token)| (line[..byte].chars().count() + 1, token))
        .collect()
}

fn coordinate(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode a point stream into a [`PointSet`].
///
/// # Errors
///
/// Returns a [`ParseError`] locating the first malformed token, or a
/// [`ParseErrorKind::CountMismatch`] when the number of point lines does
/// not match the declared count.
///
/// # Examples
///
/// ```
/// use spanhull_core::parse::{ParseErrorKind, parse_points};
///
/// let set = parse_points("2\n0 0\n\n3.5\t-1\n").unwrap_or_default();
/// assert_eq!(set.len(), 2);
///
/// let err = parse_points("1\n4 x\n").err();
/// assert!(err.is_some_and(|e| e.line() == 2 && e.column() == 3));
/// ```
pub fn parse_points(input: &str) -> Result<PointSet, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(_, text)| !text.trim().is_empty());

    let Some((count_line, count_text)) = lines.next() else {
        return Err(ParseError::new(
            ParseErrorKind::EmptyInput,
            1,
            1,
            "",
            "",
        ));
    };

    let count_tokens = tokens(count_text);
    let (count_col, count_token) = count_tokens.first().copied().unwrap_or((1, ""));
    let expected = count_token.parse::<usize>().map_err(|_| {
        ParseError::new(
            ParseErrorKind::InvalidCount,
            count_line,
            count_col,
            count_token,
            count_text,
        )
    })?;
    if let Some(&(col, extra)) = count_tokens.get(1) {
        return Err(ParseError::new(
            ParseErrorKind::ExtraToken("point count"),
            count_line,
            col,
            extra,
            count_text,
        ));
    }

    // The declared count is untrusted; every point needs at least one byte.
    let mut points = Vec::with_capacity(expected.min(input.len()));
    let mut first_surplus: Option<(usize, usize, String, String)> = None;
    let mut last_line = count_line;

    for (line_no, text) in lines {
        last_line = line_no;
        let toks = tokens(text);
        let point = parse_point_line(&toks, line_no, text)?;
        if points.len() == expected && first_surplus.is_none() {
            let (col, token) = toks.first().copied().unwrap_or((1, ""));
            first_surplus = Some((line_no, col, token.to_string(), text.to_string()));
        }
        points.push(point);
    }

    if points.len() != expected {
        let kind = ParseErrorKind::CountMismatch {
            expected,
            found: points.len(),
        };
        return Err(match first_surplus {
            Some((line, col, token, context)) => ParseError::new(kind, line, col, &token, &context),
            None => ParseError::new(kind, last_line + 1, 1, "", ""),
        });
    }

    Ok(PointSet::new(points))
}

fn parse_point_line(toks: &[(usize, &str)], line_no: usize, text: &str) -> Result<Point, ParseError> {
    let err = |kind, col, token: &str| ParseError::new(kind, line_no, col, token, text);
    let end_col = text.chars().count() + 1;

    let (x_col, x_tok) = toks.first().copied().unwrap_or((end_col, ""));
    let x = coordinate(x_tok)
        .ok_or_else(|| err(ParseErrorKind::InvalidCoordinate(Axis::X), x_col, x_tok))?;

    let Some(&(y_col, y_tok)) = toks.get(1) else {
        return Err(err(ParseErrorKind::MissingCoordinate(Axis::Y), end_col, ""));
    };
    let y = coordinate(y_tok)
        .ok_or_else(|| err(ParseErrorKind::InvalidCoordinate(Axis::Y), y_col, y_tok))?;

    if let Some(&(col, extra)) = toks.get(2) {
        return Err(err(ParseErrorKind::ExtraToken("coordinates"), col, extra));
    }

    Ok(Point::new(x, y))
}
