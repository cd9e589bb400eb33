use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::translations::Language;

/// Everything needed to produce one sheet of barcodes. It is built once from the command line
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Where the PDF file is written.
    pub output_path: PathBuf,
    /// Width of the page in centimeters.
    pub width: f32,
    /// First number of the range (inclusive).
    pub start: i64,
    /// Last number of the range (inclusive).
    pub end: i64,
    /// Caption drawn above every barcode, skipped when empty.
    pub text: String,
    /// Minimum number of digits of the numeric part, padded with leading zeros.
    pub zeros: usize,
    /// Width of the narrowest bar in points.
    pub bar_width: f32,
    pub prefix: String,
    pub suffix: String,
    /// Draw the range from `end` down to `start`.
    pub descending: bool,
    /// Only affects the messages printed by the command line interface.
    pub language: Language,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            output_path: PathBuf::from("barcodes.pdf"),
            width: 5.0,
            start: 1,
            end: 100,
            text: String::new(),
            zeros: 0,
            bar_width: 1.2,
            prefix: String::new(),
            suffix: String::new(),
            descending: false,
            language: Language::En,
        }
    }
}

impl GenerationRequest {
    /// The number of barcodes the request describes, `end - start + 1`. It is zero or
    /// negative when `end < start`, in which case nothing is drawn. A count beyond the range
    /// of `i64` saturates, use `range_length` to detect it.
    pub fn item_count(&self) -> i64 {
        let count = i128::from(self.end) - i128::from(self.start) + 1;
        i64::try_from(count).unwrap_or(if count > 0 { i64::MAX } else { i64::MIN })
    }

    /// The numbers in drawing order: the first one ends up at the bottom of the page.
    pub fn numbers(&self) -> Box<dyn Iterator<Item = i64>> {
        if self.descending {
            Box::new((self.start..=self.end).rev())
        } else {
            Box::new(self.start..=self.end)
        }
    }

    /// The string encoded in the barcode for the given number: prefix, zero-padded number, suffix.
    pub fn encoded_value(&self, number: i64) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            zero_pad(number, self.zeros),
            self.suffix
        )
    }
}

/// The number of items in `start..=end`, or `None` when it does not fit an `i64`.
pub fn range_length(start: i64, end: i64) -> Option<i64> {
    end.checked_sub(start)?.checked_add(1)
}

/// Pads the decimal representation of the number with leading zeros up to `width` characters.
/// The sign counts towards the width and stays in front of the zeros, longer numbers are never
/// truncated.
pub fn zero_pad(number: i64, width: usize) -> String {
    format!("{number:0width$}")
}
