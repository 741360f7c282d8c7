//! Helvetica metrics and WinAnsi text handling for the PDF writer.

use encoding_rs::WINDOWS_1252;

/// Helvetica glyph widths in 1/1000 em, indexed by WinAnsi code.
/// Control codes and unassigned slots are zero.
const HELVETICA_WIDTHS: [u16; 256] = [
    // 0x00-0x1F
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    // 0x20 space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    // 0x30 digits : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    // 0x40 @ A-O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    // 0x50 P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    // 0x60 ` a-o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    // 0x70 p-z { | } ~
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0, //
    // 0x80 Windows-1252 specials
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, //
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, //
    // 0xA0 Latin-1 punctuation and symbols
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, //
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, //
    // 0xC0 accented capitals
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, //
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, //
    // 0xE0 accented lowercase
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Encode a UTF-8 string as WinAnsi (Windows-1252) bytes.
///
/// Characters outside the code page are replaced with '?'.
pub fn encode_win_ansi(s: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(s);
    if !had_errors {
        return bytes.into_owned();
    }

    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for ch in s.chars() {
        let (bytes, _, err) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        if err {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

/// Width of WinAnsi-encoded text in points at the given font size
pub fn text_width(encoded: &[u8], size: f64) -> f64 {
    let millis: u32 = encoded
        .iter()
        .map(|&b| u32::from(HELVETICA_WIDTHS[b as usize]))
        .sum();
    f64::from(millis) / 1000.0 * size
}

/// Escape WinAnsi bytes for use inside a PDF literal string
pub fn escape_pdf_string(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded.len() + 4);
    for &b in encoded {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out
}
