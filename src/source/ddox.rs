//! Reader for `symbols.js` listings written by DDOX
//!
//! The generator writes one object literal per line:
//!
//! ```text
//! // symbol index generated by DDOX - do not edit
//! var symbols = [
//! {name: 'a.b', kind: "module", path: './a/b.html', attributes: []},
//! ];
//! ```
//!
//! Strings may use either quote style. Fields are returned unvalidated so
//! that `SymbolStore::load` decides what a well-formed record is.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::{Result, SymbolError};
use crate::symbol::RawSymbol;

lazy_static! {
    static ref RECORD: Regex = Regex::new(r"^\{(?P<body>.*)\}\s*,?$").unwrap();
    static ref FIELD: Regex = Regex::new(
        r#"(?P<key>[A-Za-z_]\w*)\s*:\s*(?:'(?P<single>[^']*)'|"(?P<double>[^"]*)"|\[(?P<list>[^\]]*)\])"#
    )
    .unwrap();
    static ref ITEM: Regex = Regex::new(r#"'(?P<single>[^']*)'|"(?P<double>[^"]*)""#).unwrap();
    static ref OPENING: Regex = Regex::new(r"^var\s+\w+\s*=\s*\[$").unwrap();
}

/// Parse the contents of a `symbols.js` file
pub fn parse(text: &str) -> Result<Vec<RawSymbol>> {
    let mut symbols = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with("//") || line == "];" || OPENING.is_match(line) {
            continue;
        }

        let caps = RECORD.captures(line).ok_or_else(|| SymbolError::Parse {
            line: line_no,
            message: format!("expected a symbol object, found '{}'", line),
        })?;

        let symbol = parse_body(&caps["body"], line_no)?;
        trace!("Parsed symbol {:?} on line {}", symbol.name, line_no);
        symbols.push(symbol);
    }

    debug!("Parsed {} symbols from DDOX listing", symbols.len());
    Ok(symbols)
}

fn parse_body(body: &str, line: usize) -> Result<RawSymbol> {
    let mut symbol = RawSymbol::default();
    let mut last_end = 0;

    for (n, caps) in FIELD.captures_iter(body).enumerate() {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        expect_separator(&body[last_end..whole.start], n > 0, line)?;
        last_end = whole.end;

        let key = &caps["key"];
        let text = caps
            .name("single")
            .or_else(|| caps.name("double"))
            .map(|m| m.as_str().to_string());

        match (key, text, caps.name("list")) {
            ("name", Some(text), _) => symbol.name = Some(text),
            ("kind", Some(text), _) => symbol.kind = Some(text),
            ("path", Some(text), _) => symbol.path = Some(text),
            ("attributes", None, Some(list)) => {
                symbol.attributes = parse_list(list.as_str(), line)?
            }
            ("name" | "kind" | "path" | "attributes", _, _) => {
                return Err(SymbolError::Parse {
                    line,
                    message: format!("unexpected value type for '{}'", key),
                })
            }
            _ => trace!("Ignoring unknown field '{}' on line {}", key, line),
        }
    }

    expect_trailer(&body[last_end..], line)?;
    Ok(symbol)
}

fn parse_list(list: &str, line: usize) -> Result<Vec<String>> {
    let mut items = Vec::new();
    let mut last_end = 0;

    for (n, caps) in ITEM.captures_iter(list).enumerate() {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        expect_separator(&list[last_end..whole.start], n > 0, line)?;
        last_end = whole.end;

        if let Some(item) = caps.name("single").or_else(|| caps.name("double")) {
            items.push(item.as_str().to_string());
        }
    }

    expect_trailer(&list[last_end..], line)?;
    Ok(items)
}

/// Text before an element: nothing before the first, a single comma otherwise
fn expect_separator(between: &str, comma: bool, line: usize) -> Result<()> {
    let between = between.trim();
    if (comma && between == ",") || (!comma && between.is_empty()) {
        Ok(())
    } else {
        Err(unexpected(between, line))
    }
}

/// Text after the last element: at most a trailing comma
fn expect_trailer(rest: &str, line: usize) -> Result<()> {
    let rest = rest.trim();
    if rest.is_empty() || rest == "," {
        Ok(())
    } else {
        Err(unexpected(rest, line))
    }
}

fn unexpected(text: &str, line: usize) -> SymbolError {
    let message = if text.is_empty() {
        "missing ','".to_string()
    } else {
        format!("unexpected text '{}'", text)
    };
    SymbolError::Parse { line, message }
}
