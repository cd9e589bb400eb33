use clap::{ArgAction, CommandFactory as _, FromArgMatches as _, Parser};
use std::{ffi::OsString, path::PathBuf};

use barcode_sheet::{
    error::ContextError,
    generator,
    request::{range_length, GenerationRequest},
    translations::{Language, Translations},
};

#[derive(Parser, Debug)]
#[command(version, long_about = None, allow_negative_numbers = true)]
struct CliArguments {
    #[arg(long, value_name = "file_path", default_value = "barcodes.pdf")]
    output: PathBuf,
    #[arg(long, value_name = "centimeters", default_value_t = 5.0, value_parser = parse_positive_number)]
    width: f32,
    #[arg(long, default_value_t = 1)]
    start: i64,
    #[arg(long, default_value_t = 100)]
    end: i64,
    #[arg(long, allow_hyphen_values = true)]
    text: Option<String>,
    #[arg(long, default_value_t = 0)]
    zeros: usize,
    #[arg(long = "barwidth", value_name = "points", default_value_t = 1.2, value_parser = parse_positive_number)]
    bar_width: f32,
    #[arg(long, allow_hyphen_values = true)]
    prefix: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    suffix: Option<String>,
    #[arg(long)]
    descending: bool,
    #[arg(long, value_enum, default_value_t = Language::En)]
    lang: Language,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<CliArguments> for GenerationRequest {
    fn from(arguments: CliArguments) -> Self {
        GenerationRequest {
            output_path: arguments.output,
            width: arguments.width,
            start: arguments.start,
            end: arguments.end,
            text: arguments.text.unwrap_or_default(),
            zeros: arguments.zeros,
            bar_width: arguments.bar_width,
            prefix: arguments.prefix.unwrap_or_default(),
            suffix: arguments.suffix.unwrap_or_default(),
            descending: arguments.descending,
            language: arguments.lang,
        }
    }
}

/// Accepts strictly positive, finite numbers only.
fn parse_positive_number(value: &str) -> Result<f32, String> {
    let number: f32 = value
        .parse()
        .map_err(|error: std::num::ParseFloatError| error.to_string())?;
    if number.is_finite() && number > 0.0 {
        Ok(number)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

/// Finds the language requested with `--lang` before the arguments are actually parsed, so
/// that the help text can already be shown in that language.
fn requested_language(arguments: &[OsString]) -> Language {
    let mut arguments = arguments.iter().filter_map(|argument| argument.to_str());
    while let Some(argument) = arguments.next() {
        let code = match argument.strip_prefix("--lang=") {
            Some(code) => Some(code),
            None if argument == "--lang" => arguments.next(),
            None => None,
        };
        if let Some(code) = code {
            return Language::from_code(code).unwrap_or_default();
        }
    }
    Language::default()
}

fn localized_command(translations: &'static Translations) -> clap::Command {
    CliArguments::command()
        .about(translations.description)
        .mut_arg("output", |argument| argument.help(translations.output_help))
        .mut_arg("width", |argument| argument.help(translations.width_help))
        .mut_arg("start", |argument| argument.help(translations.start_help))
        .mut_arg("end", |argument| argument.help(translations.end_help))
        .mut_arg("text", |argument| argument.help(translations.text_help))
        .mut_arg("zeros", |argument| argument.help(translations.zeros_help))
        .mut_arg("bar_width", |argument| {
            argument.help(translations.barwidth_help)
        })
        .mut_arg("prefix", |argument| argument.help(translations.prefix_help))
        .mut_arg("suffix", |argument| argument.help(translations.suffix_help))
        .mut_arg("descending", |argument| {
            argument.help(translations.descending_help)
        })
        .mut_arg("lang", |argument| argument.help(translations.lang_help))
        .mut_arg("verbose", |argument| argument.help(translations.verbose_help))
}

/// Rejects a range whose number of items does not fit in an `i64`, reported like any other
/// invalid value.
fn check_range(command: &mut clap::Command, arguments: &CliArguments) -> Result<(), clap::Error> {
    match range_length(arguments.start, arguments.end) {
        Some(_) => Ok(()),
        None => Err(command.error(
            clap::error::ErrorKind::ValueValidation,
            format!(
                "the range {}..={} holds more numbers than can be counted",
                arguments.start, arguments.end
            ),
        )),
    }
}

fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() {
    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), ContextError> {
    let raw_arguments = std::env::args_os().collect::<Vec<_>>();
    let mut command = localized_command(requested_language(&raw_arguments).translations());
    let matches = command
        .try_get_matches_from_mut(raw_arguments)
        .unwrap_or_else(|error| error.exit());
    let arguments = CliArguments::from_arg_matches(&matches).unwrap_or_else(|error| error.exit());
    if let Err(error) = check_range(&mut command, &arguments) {
        error.exit();
    }

    env_logger::builder()
        .filter_level(log_level(arguments.verbose))
        .init();
    log::debug!("{:?}", arguments);

    let request = GenerationRequest::from(arguments);
    let summary = generator::generate(&request)?;

    println!(
        "{}",
        request
            .language
            .translations()
            .success_message(summary.item_count, summary.output_path.display())
    );
    Ok(())
}
