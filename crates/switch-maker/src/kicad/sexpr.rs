//! S-expression tree for KiCad files, with a parser and a writer.
//!
//! Grammar:
//!   sexpr  = '(' atom_or_sexpr* ')'
//!   atom   = string | symbol
//!   string = '"' [^"]* '"'  (with escape handling)
//!   symbol = [^ \t\n\r()"]+
//!
//! Quoted strings are kept apart from bare symbols so that written output
//! quotes exactly what the input quoted.

use crate::types::round_f64;
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    List(Vec<SExpr>),
    Atom(String),
    Str(String),
}

impl SExpr {
    /// `(tag child...)`
    pub fn list(tag: &str, children: impl IntoIterator<Item = SExpr>) -> Self {
        let mut items = vec![SExpr::Atom(tag.to_string())];
        items.extend(children);
        SExpr::List(items)
    }

    pub fn atom(s: impl Into<String>) -> Self {
        SExpr::Atom(s.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        SExpr::Str(s.into())
    }

    /// A number atom, rounded to 6 decimals without trailing zeros.
    pub fn num(v: f64) -> Self {
        SExpr::Atom(fmt_num(v))
    }

    /// Get the first atom in a list (the "tag" or "name").
    pub fn tag(&self) -> Option<&str> {
        match self {
            SExpr::List(items) => items.first().and_then(|item| match item {
                SExpr::Atom(s) => Some(s.as_str()),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Get list children (everything after the tag).
    pub fn children(&self) -> &[SExpr] {
        match self {
            SExpr::List(items) if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    /// Find a child list with the given tag.
    pub fn find(&self, tag: &str) -> Option<&SExpr> {
        self.children().iter().find(|c| c.tag() == Some(tag))
    }

    /// Find all child lists with the given tag.
    pub fn find_all(&self, tag: &str) -> Vec<&SExpr> {
        self.children()
            .iter()
            .filter(|c| c.tag() == Some(tag))
            .collect()
    }

    /// Get the value of a simple (tag value) node.
    pub fn value(&self, tag: &str) -> Option<&str> {
        self.find(tag).and_then(|node| node.atom_at(0))
    }

    /// Get the text of an atom or string.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(s) | SExpr::Str(s) => Some(s.as_str()),
            SExpr::List(_) => None,
        }
    }

    /// Get the nth atom child (0-indexed from children, i.e., after the tag).
    pub fn atom_at(&self, index: usize) -> Option<&str> {
        self.children().get(index).and_then(|v| v.as_atom())
    }

    /// Get the nth child as f64.
    pub fn f64_at(&self, index: usize) -> Option<f64> {
        self.atom_at(index).and_then(|v| v.parse().ok())
    }

    /// Multi-line rendering: the direct list children of this node each get
    /// their own line, everything deeper stays inline.
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        match self {
            SExpr::List(items) => {
                out.push('(');
                let mut first = true;
                for item in items {
                    if matches!(item, SExpr::List(_)) {
                        // Writing into a String cannot fail.
                        let _ = write!(out, "\n  {item}");
                    } else {
                        if !first {
                            out.push(' ');
                        }
                        let _ = write!(out, "{item}");
                    }
                    first = false;
                }
                out.push_str("\n)\n");
            }
            other => {
                let _ = writeln!(out, "{other}");
            }
        }
        out
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::List(items) => {
                f.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(')')
            }
            SExpr::Atom(s) => f.write_str(s),
            SExpr::Str(s) => {
                f.write_char('"')?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        _ => f.write_char(c)?,
                    }
                }
                f.write_char('"')
            }
        }
    }
}

/// Format a length for KiCad: 6 decimals at most, no trailing zeros.
pub fn fmt_num(v: f64) -> String {
    format!("{}", round_f64(v, 6))
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn parse_string(&mut self) -> String {
        // Skip opening quote
        self.pos += 1;
        let mut bytes = Vec::new();
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    if let Some(&c) = self.input.get(self.pos) {
                        bytes.push(if c == b'n' { b'\n' } else { c });
                        self.pos += 1;
                    }
                }
                c => {
                    bytes.push(c);
                    self.pos += 1;
                }
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn parse_symbol(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' | b'(' | b')' | b'"' => break,
                _ => self.pos += 1,
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn parse_sexpr(&mut self) -> Option<SExpr> {
        self.skip_whitespace();
        match self.peek()? {
            b'(' => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(b')') => {
                            self.pos += 1;
                            break;
                        }
                        None => break,
                        _ => {
                            if let Some(expr) = self.parse_sexpr() {
                                items.push(expr);
                            }
                        }
                    }
                }
                Some(SExpr::List(items))
            }
            b'"' => Some(SExpr::Str(self.parse_string())),
            b')' => None,
            _ => Some(SExpr::Atom(self.parse_symbol())),
        }
    }
}

/// Parse an S-expression from bytes.
pub fn parse(input: &[u8]) -> Result<SExpr, String> {
    let mut parser = Parser::new(input);
    parser
        .parse_sexpr()
        .ok_or_else(|| "empty input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_list() {
        let result = parse(b"(hello world)").unwrap();
        assert_eq!(result.tag(), Some("hello"));
        assert_eq!(result.atom_at(0), Some("world"));
    }

    #[test]
    fn test_nested() {
        let result = parse(b"(a (b 1) (c 2))").unwrap();
        assert_eq!(result.tag(), Some("a"));
        assert_eq!(result.value("b"), Some("1"));
        assert_eq!(result.value("c"), Some("2"));
    }

    #[test]
    fn test_string() {
        let result = parse(b"(layer \"F.Cu\")").unwrap();
        assert_eq!(result.tag(), Some("layer"));
        assert_eq!(result.atom_at(0), Some("F.Cu"));
        assert_eq!(result.children()[0], SExpr::Str("F.Cu".to_string()));
    }

    #[test]
    fn test_escaped_string() {
        let result = parse(br#"(descr "say \"hi\"")"#).unwrap();
        assert_eq!(result.atom_at(0), Some("say \"hi\""));
    }

    #[test]
    fn test_float() {
        let result = parse(b"(at 100.5 50.3 90)").unwrap();
        assert_eq!(result.f64_at(0), Some(100.5));
        assert_eq!(result.f64_at(1), Some(50.3));
        assert_eq!(result.f64_at(2), Some(90.0));
    }

    #[test]
    fn test_find_all() {
        let result = parse(b"(root (pad 1) (pad 2) (fp_line))").unwrap();
        assert_eq!(result.find_all("pad").len(), 2);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-9.525), "-9.525");
        assert_eq!(fmt_num(3.98780000001), "3.9878");
        assert_eq!(fmt_num(-0.0), "0");
    }

    #[test]
    fn test_display_quotes_strings_only() {
        let expr = SExpr::list(
            "fp_text",
            [
                SExpr::atom("user"),
                SExpr::string("a \"b\""),
                SExpr::list("at", [SExpr::num(0.0), SExpr::num(-7.9375)]),
            ],
        );
        assert_eq!(expr.to_string(), r#"(fp_text user "a \"b\"" (at 0 -7.9375))"#);
    }

    #[test]
    fn test_written_text_parses_back() {
        let expr = SExpr::list(
            "footprint",
            [
                SExpr::string("MX-1u"),
                SExpr::list("layer", [SExpr::string("F.Cu")]),
                SExpr::list(
                    "pad",
                    [
                        SExpr::string("1"),
                        SExpr::atom("thru_hole"),
                        SExpr::list("at", [SExpr::num(-3.81), SExpr::num(-2.54)]),
                    ],
                ),
            ],
        );
        let text = expr.to_pretty();
        assert!(text.starts_with("(footprint \"MX-1u\"\n  (layer \"F.Cu\")\n  (pad"));
        assert_eq!(parse(text.as_bytes()).unwrap(), expr);
    }
}
