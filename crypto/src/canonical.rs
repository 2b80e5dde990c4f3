//! Key-sorted JSON serialization.
//!
//! The layout matches the attestation keys already written to the ledger:
//! object keys sorted, `", "` between members, `": "` between key and value,
//! and every non-ASCII character escaped as `\uXXXX` (UTF-16 code units).

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io::{self, Write};

/// `serde_json` formatter producing the legacy separator and escaping style.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` into canonical bytes.
///
/// Key order comes from the value itself, so callers hash maps with ordered
/// keys (`BTreeMap`, or `serde_json::Map` without `preserve_order`).
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, LegacyFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// [`canonical_json`] as a `String`.
pub fn canonical_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let bytes = canonical_json(value)?;
    // The formatter only ever emits ASCII.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
