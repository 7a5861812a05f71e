// Chunk: docs/chunks/load_save_bytes - Encoding and line ending detection for raw bytes

//! Conversion between raw file bytes and document codepoints.
//!
//! Loading detects the encoding (UTF-8 when the bytes are valid UTF-8, ANSI
//! otherwise) and the line ending convention (taken from the first terminator).
//! Documents always store a single `'\n'` per line break; saving re-applies the
//! detected convention.
//!
//! ANSI bytes map one-to-one onto the first 256 codepoints, so any byte sequence
//! loads and an unedited ANSI document saves back byte for byte.

use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Replacement byte for codepoints an ANSI document cannot represent.
const ANSI_REPLACEMENT: u8 = b'?';

/// Text encoding of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Single-byte encoding; byte values map directly to codepoints U+0000..U+00FF.
    Ansi,
    #[default]
    Utf8,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Ansi => write!(f, "ansi"),
            Encoding::Utf8 => write!(f, "utf-8"),
        }
    }
}

/// Line ending convention of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "unix"),
            LineEnding::CrLf => write!(f, "crlf"),
        }
    }
}

/// Result of decoding raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Content with line breaks normalized to `'\n'`.
    pub text: String,
    pub encoding: Encoding,
    pub line_ending: LineEnding,
    /// Whether a UTF-8 byte-order mark preceded the content.
    pub bom: bool,
}

/// Decodes raw file bytes, detecting encoding and line endings.
pub fn decode(bytes: &[u8]) -> Decoded {
    let (bom, body) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (true, rest),
        None => (false, bytes),
    };

    let line_ending = detect_line_ending(body);
    // A BOM in front of invalid UTF-8 is ordinary ANSI content and is kept as such.
    let (raw, encoding, bom) = match std::str::from_utf8(body) {
        Ok(text) => (text.to_owned(), Encoding::Utf8, bom),
        Err(_) => (bytes.iter().map(|&b| char::from(b)).collect(), Encoding::Ansi, false),
    };

    let text = match line_ending {
        LineEnding::Lf => raw,
        LineEnding::CrLf => raw.replace("\r\n", "\n"),
    };

    Decoded {
        text,
        encoding,
        line_ending,
        bom,
    }
}

/// The convention of the first line break wins; files without one are LF.
fn detect_line_ending(bytes: &[u8]) -> LineEnding {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(i) if i > 0 && bytes[i - 1] == b'\r' => LineEnding::CrLf,
        _ => LineEnding::Lf,
    }
}

/// Encodes document codepoints back into file bytes.
pub fn encode<I>(chars: I, encoding: Encoding, line_ending: LineEnding, bom: bool) -> Vec<u8>
where
    I: IntoIterator<Item = char>,
{
    let mut out = Vec::new();
    if bom && encoding == Encoding::Utf8 {
        out.extend_from_slice(UTF8_BOM);
    }

    let mut unrepresentable = 0usize;
    let mut utf8 = [0u8; 4];
    for ch in chars {
        if ch == '\n' {
            out.extend_from_slice(line_ending.as_str().as_bytes());
            continue;
        }
        match encoding {
            Encoding::Utf8 => out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes()),
            Encoding::Ansi => match u8::try_from(u32::from(ch)) {
                Ok(byte) => out.push(byte),
                Err(_) => {
                    unrepresentable += 1;
                    out.push(ANSI_REPLACEMENT);
                }
            },
        }
    }

    if unrepresentable > 0 {
        log::warn!(
            "{} codepoint(s) not representable in ANSI were replaced with '?'",
            unrepresentable
        );
    }
    out
}
