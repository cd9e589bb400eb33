use std::fmt::Display;

/// The languages the command line interface can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// German.
    De,
    /// English.
    #[default]
    En,
}

impl Language {
    /// Looks up a language by its code, ignoring the case.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_lowercase().as_str() {
            "de" => Some(Language::De),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// The message table for this language.
    pub fn translations(self) -> &'static Translations {
        match self {
            Language::De => &GERMAN,
            Language::En => &ENGLISH,
        }
    }
}

/// Every user-facing string of the tool. The success message contains two `{}`
/// placeholders, filled in order with the number of barcodes and the output path.
#[derive(Debug)]
pub struct Translations {
    pub description: &'static str,
    pub output_help: &'static str,
    pub width_help: &'static str,
    pub start_help: &'static str,
    pub end_help: &'static str,
    pub text_help: &'static str,
    pub zeros_help: &'static str,
    pub barwidth_help: &'static str,
    pub prefix_help: &'static str,
    pub suffix_help: &'static str,
    pub descending_help: &'static str,
    pub lang_help: &'static str,
    pub verbose_help: &'static str,
    pub success_message: &'static str,
}

static GERMAN: Translations = Translations {
    description: "Erstelle eine PDF mit aufsteigenden oder absteigenden Barcodes.",
    output_help: "Ausgabedatei (PDF)",
    width_help: "Breite des PDFs in Zentimetern",
    start_help: "Startnummer für Barcodes",
    end_help: "Endnummer für Barcodes",
    text_help: "Text über den Barcodes",
    zeros_help: "Anzahl der führenden Nullen",
    barwidth_help: "Breite der Balken im Barcode (Standard: 1.2)",
    prefix_help: "Präfix vor der Nummer im Barcode (z.B. \"AB-\")",
    suffix_help: "Suffix nach der Nummer im Barcode (z.B. \"-XYZ\")",
    descending_help: "Barcodes in absteigender Reihenfolge generieren",
    lang_help: "Sprache/Language (de/en)",
    verbose_help: "Ausführlichere Protokollausgabe (mehrfach angeben für mehr Details)",
    success_message: "PDF mit {} Barcodes wurde erfolgreich erstellt: {}",
};

static ENGLISH: Translations = Translations {
    description: "Create a PDF with ascending or descending barcodes.",
    output_help: "Output file (PDF)",
    width_help: "Width of the PDF in centimeters",
    start_help: "Starting number for barcodes",
    end_help: "Ending number for barcodes",
    text_help: "Text above the barcodes",
    zeros_help: "Number of leading zeros",
    barwidth_help: "Width of the bars in the barcode (default: 1.2)",
    prefix_help: "Prefix before the number in the barcode (e.g. \"AB-\")",
    suffix_help: "Suffix after the number in the barcode (e.g. \"-XYZ\")",
    descending_help: "Generate barcodes in descending order",
    lang_help: "Sprache/Language (de/en)",
    verbose_help: "More verbose logging (repeat for more detail)",
    success_message: "PDF with {} barcodes has been successfully created: {}",
};

impl Translations {
    /// Renders the success message for the given number of barcodes and output path.
    pub fn success_message(&self, item_count: i64, output_path: impl Display) -> String {
        fill_placeholders(
            self.success_message,
            &[&item_count as &dyn Display, &output_path],
        )
    }
}

/// Replaces each `{}` in the template with the next value, in order. Placeholders
/// without a matching value are left untouched.
fn fill_placeholders(template: &str, values: &[&dyn Display]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut remaining = template;
    let mut values = values.iter();

    while let Some(index) = remaining.find("{}") {
        filled.push_str(&remaining[..index]);
        match values.next() {
            Some(value) => filled.push_str(&value.to_string()),
            None => filled.push_str("{}"),
        }
        remaining = &remaining[index + 2..];
    }
    filled.push_str(remaining);

    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_message_substitutes_in_order() {
        let message = Language::En
            .translations()
            .success_message(3, "codes/out.pdf");
        assert_eq!(
            message,
            "PDF with 3 barcodes has been successfully created: codes/out.pdf"
        );

        let message = Language::De.translations().success_message(-4, "x.pdf");
        assert_eq!(
            message,
            "PDF mit -4 Barcodes wurde erfolgreich erstellt: x.pdf"
        );
    }

    #[test]
    fn missing_values_leave_placeholders() {
        assert_eq!(fill_placeholders("{} and {}", &[&1]), "1 and {}");
        assert_eq!(fill_placeholders("no placeholders", &[&1]), "no placeholders");
    }

    #[test]
    fn language_codes_are_case_insensitive() {
        assert_eq!(Language::from_code("de"), Some(Language::De));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::default(), Language::En);
    }
}
