//! Support for Apple `.strings` localization format.
//!
//! Provides the escape grammar shared by both directions, parsing of
//! `"key" = "value";` pairs (with comments stripped first) and serialization
//! of a [`StringTable`] in ascending key order.

use std::{
    borrow::Cow,
    fmt::Display,
    io::{BufRead, Write},
};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    traits::Parser,
    types::{ExportOptions, ExportStats, StringTable},
};

lazy_static! {
    // "key" = "value"; where both sides may hold backslash escapes and span lines
    static ref PAIR_REGEX: Regex =
        Regex::new(r#"(?s)"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#).unwrap();
}

/// First line of every generated file.
pub const HEADER: &str = concat!("/* Generated by xmlstrings ", env!("CARGO_PKG_VERSION"), " */");

/// Control characters and their two-character escape sequences, shared by
/// [`escape`] and [`unescape`]. Quotes and backslashes are not escaped.
pub const ESCAPES: [(char, &str); 8] = [
    ('\u{07}', r"\a"),
    ('\u{08}', r"\b"),
    ('\u{0C}', r"\f"),
    ('\n', r"\n"),
    ('\r', r"\r"),
    ('\t', r"\t"),
    ('\u{0B}', r"\v"),
    ('\0', r"\0"),
];

fn escape_sequence(c: char) -> Option<&'static str> {
    ESCAPES
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, sequence)| *sequence)
}

fn unescaped_char(marker: char) -> Option<char> {
    ESCAPES
        .iter()
        .find(|(_, sequence)| sequence.ends_with(marker))
        .map(|(raw, _)| *raw)
}

/// Replaces control characters with their escape sequences.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| escape_sequence(c).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match escape_sequence(c) {
            Some(sequence) => escaped.push_str(sequence),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Replaces escape sequences with the control characters they stand for.
///
/// Unknown sequences such as `\"` or `\\` are kept as written.
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(raw) = chars.peek().copied().and_then(unescaped_char) {
                chars.next();
                unescaped.push(raw);
                continue;
            }
        }
        unescaped.push(c);
    }
    unescaped
}

/// Restores the quoting Android resources need for some values.
///
/// Text with a double space, an apostrophe, a raw newline, carriage return or
/// tab, or leading/trailing spaces is wrapped in double quotes. Text starting
/// with `?` gets a leading backslash.
pub fn requote(text: String) -> String {
    if text.is_empty() {
        return text;
    }

    let needs_quotes = text.contains("  ")
        || text.contains(['\'', '\n', '\r', '\t'])
        || text.starts_with(' ')
        || text.ends_with(' ');

    let text = if needs_quotes {
        format!("\"{}\"", text)
    } else {
        text
    };

    if text.starts_with('?') {
        format!("\\{}", text)
    } else {
        text
    }
}

/// Removes one pair of surrounding double quotes. A lone `"` becomes empty.
fn strip_quotes(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') {
        value.get(1..value.len() - 1).unwrap_or_default()
    } else {
        value
    }
}

/// Comment-free text plus the last quote that never found its partner.
struct Stripped {
    text: String,
    dangling: Option<Dangling>,
}

/// An unpaired `"`, kept in the text as a plain character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dangling {
    /// Byte offset in the stripped text.
    offset: usize,
    line: usize,
}

/// Byte offset of the quote closing a string whose body starts `rest`.
///
/// A string may only run past the end of its line when its closing quote is
/// followed by `=` or `;`; anything else means the opening quote is stray.
fn closing_quote(rest: &str) -> Option<usize> {
    let mut escaped = false;
    let mut multiline = false;
    for (index, c) in rest.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '\n' => multiline = true,
            '"' if !multiline => return Some(index),
            '"' => {
                let after = rest[index + 1..].trim_start();
                return (after.starts_with(';') || after.starts_with('=')).then_some(index);
            }
            _ => {}
        }
    }
    None
}

/// Removes `/* ... */` and `// ...` comments outside quoted strings.
///
/// Newlines ending line comments are kept. A quote without a partner is
/// kept as a plain character and scanning resumes right after it, so one
/// stray quote only affects the pairs around it.
fn strip_comments(content: &str) -> Result<Stripped, Error> {
    let mut text = String::with_capacity(content.len());
    let mut dangling = None;
    let mut line = 1;
    let mut rest = content;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '"' => match closing_quote(rest) {
                Some(end) => {
                    let body = &rest[..end];
                    line += body.matches('\n').count();
                    text.push('"');
                    text.push_str(body);
                    text.push('"');
                    rest = &rest[end + 1..];
                }
                None => {
                    tracing::debug!(line, "unpaired quote");
                    dangling = Some(Dangling {
                        offset: text.len(),
                        line,
                    });
                    text.push('"');
                }
            },
            '/' if rest.starts_with('*') => match rest[1..].find("*/") {
                Some(end) => {
                    let comment = &rest[..end + 3];
                    line += comment.matches('\n').count();
                    rest = &rest[end + 3..];
                }
                None => {
                    return Err(Error::Malformed {
                        line,
                        reason: "unterminated block comment".to_string(),
                    });
                }
            },
            '/' if rest.starts_with('/') => {
                let end = rest.find('\n').unwrap_or(rest.len());
                rest = &rest[end..];
            }
            '\n' => {
                line += 1;
                text.push(c);
            }
            _ => text.push(c),
        }
    }

    Ok(Stripped { text, dangling })
}

/// Parses `.strings` text into a table.
///
/// Text without any pair gives an empty table. When a key appears more than
/// once, the later value wins. A stray quote costs only the pair it breaks,
/// unless no pair follows it: then the last string is unterminated and the
/// text is malformed.
pub fn decode(content: &str) -> Result<StringTable, Error> {
    let stripped = strip_comments(content)?;
    let mut table = StringTable::new();
    let mut last_end = 0;

    for captures in PAIR_REGEX.captures_iter(&stripped.text) {
        if let Some(whole) = captures.get(0) {
            last_end = whole.end();
        }
        let key = requote(unescape(&captures[1]));
        let value = requote(unescape(&captures[2]));
        if table.insert(key.clone(), Some(value)).is_some() {
            tracing::debug!(key = %key, "duplicate key, keeping the later value");
        }
    }

    if let Some(dangling) = stripped.dangling {
        if last_end <= dangling.offset {
            return Err(Error::Malformed {
                line: dangling.line,
                reason: "unterminated string".to_string(),
            });
        }
        tracing::warn!(line = dangling.line, "skipped a pair broken by an unpaired quote");
    }

    tracing::debug!(entries = table.len(), "decoded .strings content");
    Ok(table)
}

/// Encoded `.strings` text together with what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub text: String,
    pub stats: ExportStats,
}

/// Serializes a table into `.strings` text, keys in ascending order.
pub fn encode(table: &StringTable, options: &ExportOptions) -> Encoded {
    let mut text = String::with_capacity(HEADER.len() + table.len() * 32);
    let mut stats = ExportStats {
        total: table.len(),
        ..ExportStats::default()
    };

    text.push_str(HEADER);
    text.push('\n');

    for (key, value) in table.iter() {
        let pair = match value {
            Some(value) => {
                stats.exported += 1;
                Pair::new(key, strip_quotes(value))
            }
            None if options.include_empty => {
                stats.exported_empty += 1;
                Pair::new(key, "")
            }
            None => {
                stats.skipped += 1;
                tracing::debug!(key = %key, "skipping entry without text");
                continue;
            }
        };
        text.push_str(&pair.to_string());
        text.push('\n');
    }

    Encoded { text, stats }
}

/// Decodes raw file bytes into text.
///
/// A byte order mark decides the encoding. Without one, input that looks like
/// ASCII-heavy UTF-16 is tried as such first. Input holding NUL bytes is not
/// text UTF-8 would produce, so even-length input of that kind is tried as
/// UTF-16 LE, then BE, before strict UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> Result<String, Error> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_length..]);
    }

    if let Some(encoding) = sniff_utf16(bytes) {
        if let Ok(text) = decode_with(encoding, bytes) {
            return Ok(text);
        }
    }

    if bytes.contains(&0) && bytes.len() % 2 == 0 {
        for encoding in [UTF_16LE, UTF_16BE] {
            if let Ok(text) = decode_with(encoding, bytes) {
                tracing::debug!(encoding = encoding.name(), "decoded input without BOM");
                return Ok(text);
            }
        }
    }

    decode_with(UTF_8, bytes)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, Error> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| Error::Encoding(format!("input is not valid {}", encoding.name())))
}

// ASCII-heavy UTF-16 has a zero byte in most code units, on one side only.
fn sniff_utf16(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return None;
    }

    let (even_zeros, odd_zeros) = bytes
        .chunks_exact(2)
        .fold((0usize, 0usize), |(even, odd), unit| {
            (even + usize::from(unit[0] == 0), odd + usize::from(unit[1] == 0))
        });
    let units = bytes.len() / 2;

    if odd_zeros > even_zeros && odd_zeros * 2 >= units {
        Some(UTF_16LE)
    } else if even_zeros > odd_zeros && even_zeros * 2 >= units {
        Some(UTF_16BE)
    } else {
        None
    }
}

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// All entries of the file.
    pub table: StringTable,
    /// How entries without text are written.
    pub options: ExportOptions,
}

impl Format {
    pub fn new(table: StringTable, options: ExportOptions) -> Self {
        Format { table, options }
    }

    /// Encodes the file content and reports what was written.
    pub fn encode(&self) -> Encoded {
        encode(&self.table, &self.options)
    }
}

impl Parser for Format {
    /// Reads UTF-16 or UTF-8 content and parses every pair in it.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(Error::Io)?;
        let content = decode_bytes(&bytes)?;

        Ok(Format {
            table: decode(&content)?,
            options: ExportOptions::default(),
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(self.encode().text.as_bytes())
            .map_err(Error::Io)
    }
}

/// A single `"key" = "value";` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Pair<'a> {
    pub fn new(key: &'a str, value: &'a str) -> Self {
        Pair { key, value }
    }
}

impl Display for Pair<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" = \"{}\";", escape(self.key), escape(self.value))
    }
}
