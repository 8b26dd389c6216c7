// Resilient JSON body decoding
//
// Router firmware does not always label its JSON correctly and some builds
// emit Turkish-locale bytes instead of UTF-8. Every RCI response goes
// through `decode_body`, which tries progressively looser decodings and
// only gives up with a hex preview of the raw bytes.

use std::fmt::Write as _;

use encoding_rs::WINDOWS_1254;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::Error;

/// Bytes shown in a `MalformedResponse` preview.
pub const PREVIEW_BYTES: usize = 200;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text encodings attempted, in order, when the body is not plain UTF-8 JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 with a leading byte-order mark stripped.
    Utf8,
    /// ISO-8859-9 (Latin-5, Turkish). `0x80..=0x9F` are C1 controls.
    Iso8859_9,
    /// Windows-1254 (Turkish code page).
    Windows1254,
    /// ISO-8859-1: each byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    pub const FALLBACKS: [Self; 4] = [
        Self::Utf8,
        Self::Iso8859_9,
        Self::Windows1254,
        Self::Latin1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Iso8859_9 => "iso-8859-9",
            Self::Windows1254 => "windows-1254",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes` to text, or `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            Self::Iso8859_9 => Some(decode_iso_8859_9(bytes)),
            Self::Windows1254 => WINDOWS_1254
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(std::borrow::Cow::into_owned),
            Self::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

// ISO-8859-9 and Windows-1254 agree on 0xA0..=0xFF and on ASCII; they
// differ only where Windows-1254 puts printable characters in the C1 range.
fn decode_iso_8859_9(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.chunk_by(|a, b| is_c1(*a) == is_c1(*b)) {
        if chunk.first().copied().is_some_and(is_c1) {
            out.extend(chunk.iter().copied().map(char::from));
        } else {
            let (text, _) = WINDOWS_1254.decode_without_bom_handling(chunk);
            out.push_str(&text);
        }
    }
    out
}

fn is_c1(byte: u8) -> bool {
    (0x80..=0x9F).contains(&byte)
}

/// Decode a response body into JSON, regardless of declared content type.
///
/// Tries, in order: a direct parse, each [`TextEncoding::FALLBACKS`]
/// entry, then lossy UTF-8 with invalid sequences dropped. Fails with
/// [`Error::MalformedResponse`] carrying the last parse error and a hex
/// preview of at most [`PREVIEW_BYTES`] bytes.
pub fn decode_body(bytes: &[u8]) -> Result<Value, Error> {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        return Ok(value);
    }

    for encoding in TextEncoding::FALLBACKS {
        let Some(text) = encoding.decode(bytes) else {
            trace!(encoding = encoding.label(), "body is not valid in encoding");
            continue;
        };
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            debug!(encoding = encoding.label(), "decoded body with fallback encoding");
            return Ok(value);
        }
    }

    let lossy: String = String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect();
    serde_json::from_str::<Value>(&lossy)
        .inspect(|_| debug!("decoded body after dropping invalid UTF-8 sequences"))
        .map_err(|e| {
            let preview = hex_preview(bytes);
            debug!(len = bytes.len(), %preview, "response body is not JSON");
            Error::MalformedResponse {
                message: e.to_string(),
                preview,
            }
        })
}

/// Decode a body and deserialize it into `T`.
pub fn decode_as<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    let value = decode_body(bytes)?;
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
    })
}

/// Lowercase, space-separated hex of the first [`PREVIEW_BYTES`] bytes.
pub fn hex_preview(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<empty>".to_owned();
    }
    let shown = &bytes[..bytes.len().min(PREVIEW_BYTES)];
    let mut out = String::with_capacity(shown.len() * 3);
    for (i, byte) in shown.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}
