//! Line-oriented performance-data format.
//!
//! ```text
//! # comment
//! [CPU0]
//! ipc = 1.8
//! l1_miss_rate = 2.1%
//! ```
//!
//! Every line is trimmed first. Blank lines and `#` comments are skipped,
//! `[name]` opens a module section (`[]` closes the current one), and
//! `key = value` is split at the first `=` with both halves trimmed. Anything
//! else, and any key/value line outside a section, is ignored.

use super::performance_catalog::PerformanceCatalog;
use serde::Serialize;
use std::io::BufRead;

/// Why a non-blank, non-comment line did not contribute a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// `key = value` seen before any `[module]` header (or after `[]`).
    NoOpenModule,
    /// Neither a header nor a `key = value` pair.
    NotKeyValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredLine {
    /// 1-based.
    pub line_no: usize,
    pub reason: IgnoreReason,
}

/// Result of one parse. The catalog holds everything read up to the end of
/// input or up to the first read error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub catalog: PerformanceCatalog,
    pub lines_read: usize,
    pub ignored: Vec<IgnoredLine>,
    /// Read error that cut the input short, if any.
    pub interrupted: Option<String>,
}

enum Line<'a> {
    Skip,
    Header(&'a str),
    Pair(&'a str, &'a str),
    Other,
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Skip;
    }
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Line::Header(&line[1..line.len() - 1]);
    }
    match line.split_once('=') {
        Some((key, value)) => Line::Pair(key.trim(), value.trim()),
        None => Line::Other,
    }
}

#[derive(Default)]
struct Parser {
    outcome: ParseOutcome,
    current: Option<String>,
}

impl Parser {
    fn feed(&mut self, raw: &str) {
        self.outcome.lines_read += 1;
        let line_no = self.outcome.lines_read;

        match classify(raw) {
            Line::Skip => {}
            Line::Header(name) => {
                self.current = (!name.is_empty()).then(|| name.to_string());
            }
            Line::Pair(key, value) => match &self.current {
                Some(module) => {
                    self.outcome
                        .catalog
                        .insert(module, key.to_string(), value.to_string());
                }
                None => self.outcome.ignored.push(IgnoredLine {
                    line_no,
                    reason: IgnoreReason::NoOpenModule,
                }),
            },
            Line::Other => self.outcome.ignored.push(IgnoredLine {
                line_no,
                reason: IgnoreReason::NotKeyValue,
            }),
        }
    }
}

/// Parses an in-memory document.
pub fn parse_str(text: &str) -> ParseOutcome {
    let mut parser = Parser::default();
    for (index, raw) in text.lines().enumerate() {
        parser.feed(strip_bom(raw, index));
    }
    parser.outcome
}

/// Parses from a reader, keeping whatever was read before an I/O error.
///
/// Bytes are decoded lossily so a stray invalid sequence only garbles the
/// line it sits on.
pub fn parse_reader<R: BufRead + ?Sized>(reader: &mut R) -> ParseOutcome {
    let mut parser = Parser::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let index = parser.outcome.lines_read;
                parser.feed(strip_bom(&text, index));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                parser.outcome.interrupted = Some(e.to_string());
                break;
            }
        }
    }

    parser.outcome
}

fn strip_bom(line: &str, index: usize) -> &str {
    if index == 0 {
        line.strip_prefix('\u{feff}').unwrap_or(line)
    } else {
        line
    }
}
