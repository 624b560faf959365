//! WinAnsiEncoding for the standard Helvetica fonts.
//!
//! Report text arrives as UTF-8. The base-14 fonts are declared with
//! `/WinAnsiEncoding`, so every character is mapped to its single-byte code
//! there; anything outside the code page becomes `?`.

/// Code points in 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_SPECIALS: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Replacement byte for unmappable characters.
const REPLACEMENT: u8 = b'?';

fn encode_char(c: char) -> Option<u8> {
    match c {
        '\t' | '\n' | '\r' => Some(b' '),
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|(special, _)| *special == c)
            .map(|(_, code)| *code),
    }
}

/// Encode text as WinAnsi bytes. Returns the bytes and how many characters
/// had to be replaced.
pub fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for c in text.chars() {
        match encode_char(c) {
            Some(byte) => out.push(byte),
            None => {
                out.push(REPLACEMENT);
                replaced += 1;
            },
        }
    }
    (out, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_win_ansi("Age 18-25"), (b"Age 18-25".to_vec(), 0));
    }

    #[test]
    fn test_latin1_single_byte() {
        let (bytes, replaced) = encode_win_ansi("Zufällig ß");
        assert_eq!(replaced, 0);
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[3], 0xE4);
        assert_eq!(bytes[9], 0xDF);
    }

    #[test]
    fn test_cp1252_specials() {
        assert_eq!(encode_win_ansi("\u{20AC}\u{2013}\u{201E}").0, vec![0x80, 0x96, 0x84]);
    }

    #[test]
    fn test_unmappable_replaced() {
        let (bytes, replaced) = encode_win_ansi("日本 ok");
        assert_eq!(bytes, b"?? ok".to_vec());
        assert_eq!(replaced, 2);
    }

    #[test]
    fn test_controls_become_spaces() {
        assert_eq!(encode_win_ansi("a\tb").0, b"a b".to_vec());
    }
}
