use unicode_normalization::UnicodeNormalization as _;

/// The fonts that every PDF reader ships with, so they never need to be embedded.
/// Only the one used for the captions is supported so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
}

impl StandardFont {
    /// The `BaseFont` name required by the PDF specification.
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
        }
    }

    /// The name under which the font is registered in the page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
        }
    }

    /// Advance width of a character in thousandths of the font size.
    pub fn character_width(self, character: char) -> u16 {
        match self {
            StandardFont::Helvetica => helvetica_width(character),
        }
    }

    /// Width of the text in points when set at the given size.
    pub fn string_width(self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .nfc()
            .map(|character| u32::from(self.character_width(winansi_fallback(character))))
            .sum();
        units as f32 * font_size / 1000.0
    }
}

/// Advance widths of the printable ASCII range 0x20..=0x7E, taken from the Helvetica AFM metrics.
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' to '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' to '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' to 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
    278, 278, 278, 469, 556, 333, // '[' to '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' to 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' to 'z'
    334, 260, 334, 584, // '{' to '~'
];

/// Advance widths of the upper half of Latin-1, 0xA0..=0xFF, which WinAnsi maps to the same
/// code points.
const HELVETICA_LATIN_ONE_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp to '¯'
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // '°' to '¿'
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 'À' to 'Ï'
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 'Ð' to 'ß'
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 'à' to 'ï'
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 'ð' to 'ÿ'
];

fn helvetica_width(character: char) -> u16 {
    match character {
        ' '..='~' => HELVETICA_ASCII_WIDTHS[character as usize - 0x20],
        '\u{a0}'..='\u{ff}' => HELVETICA_LATIN_ONE_WIDTHS[character as usize - 0xa0],
        // Drawn as a question mark
        _ => HELVETICA_ASCII_WIDTHS['?' as usize - 0x20],
    }
}

/// Replaces characters the WinAnsi encoding cannot represent with a question mark.
fn winansi_fallback(character: char) -> char {
    match character {
        ' '..='~' | '\u{a0}'..='\u{ff}' => character,
        _ => '?',
    }
}

/// Encodes the text for a simple font with `WinAnsiEncoding`. Printable ASCII and the upper half
/// of Latin-1 map one to one onto WinAnsi bytes; anything else becomes `?` and is logged.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.nfc()
        .map(|character| {
            let encodable = winansi_fallback(character);
            if encodable != character {
                log::warn!(
                    "Unable to encode the character {:?} with the built-in font, replacing it",
                    character
                );
            }
            encodable as u32 as u8
        })
        .collect()
}
