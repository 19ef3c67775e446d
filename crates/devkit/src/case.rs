use crate::input::InputArgs;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::case::{convert_all, find_conversion, ConvertedCase, CONVERSIONS};
use devkit_core::detect::detect_text_case;
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub struct CaseOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Only print this conversion (camel, pascal, snake, kebab, upper, lower, upperall, title, sentence)
    #[arg(short, long, value_parser = conversion_ids())]
    pub to: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn conversion_ids() -> clap::builder::PossibleValuesParser {
    clap::builder::PossibleValuesParser::new(CONVERSIONS.iter().map(|conversion| conversion.id))
}

/// Result of a `devkit case` run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutput {
    /// Convention the input already follows, empty when none matches
    pub detected: &'static str,
    pub conversions: Vec<ConvertedCase>,
}

pub async fn run(options: CaseOptions, global: crate::Global) -> Result<()> {
    let text = options.input.read_text()?;
    let output = case_data(&text, options.to.as_deref())?;

    if global.verbose {
        eprintln!("Detected case: {}", display_detected(output.detected));
    }

    if options.json {
        println!("{}", to_json(&output)?);
    } else if options.to.is_some() {
        for conversion in &output.conversions {
            println!("{}", conversion.output);
        }
    } else {
        println!("{}", format_case_text(&output, is_tty()));
    }

    if let Some(first) = output.conversions.first().filter(|_| options.to.is_some()) {
        crate::clipboard::copy_if_requested(&global, &first.output, "Text");
    }

    Ok(())
}

/// Convert `text` with one conversion, or with every conversion when `to` is `None`
pub fn case_data(text: &str, to: Option<&str>) -> Result<CaseOutput, Error> {
    let detected = detect_text_case(text);
    log::debug!("detected case {:?}", detected);

    let conversions = match to {
        Some(id) => {
            let conversion = find_conversion(id).ok_or_else(|| {
                devkit_core::Error::InvalidInput(f!("unknown case conversion '{id}'"))
            })?;
            vec![ConvertedCase {
                name: conversion.name,
                id: conversion.id,
                output: (conversion.convert)(text),
            }]
        }
        None => convert_all(text),
    };

    Ok(CaseOutput {
        detected,
        conversions,
    })
}

fn display_detected(detected: &str) -> &str {
    if detected.is_empty() {
        "unknown"
    } else {
        detected
    }
}

/// One row per conversion, with the detected case as a header on TTYs
pub fn format_case_text(output: &CaseOutput, decorate: bool) -> String {
    let mut table = new_table();
    for conversion in &output.conversions {
        table.add_row(prettytable::row![conversion.name, conversion.output]);
    }

    if decorate {
        f!(
            "{} {}\n{}",
            "Detected:".bright_black(),
            display_detected(output.detected).green(),
            table
        )
    } else {
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_data_all_conversions() {
        let output = case_data("hello world example", None).unwrap();
        assert_eq!(output.detected, "lowercase");
        assert_eq!(output.conversions.len(), 9);
        assert_eq!(output.conversions[0].output, "helloWorldExample");
        assert_eq!(output.conversions[3].output, "hello-world-example");
    }

    #[test]
    fn test_case_data_single_conversion() {
        let output = case_data("helloWorld", Some("snake")).unwrap();
        assert_eq!(output.detected, "camelCase");
        assert_eq!(
            output.conversions,
            vec![ConvertedCase {
                name: "snake_case",
                id: "snake",
                output: "hello_world".to_string(),
            }]
        );
    }

    #[test]
    fn test_case_data_unknown_conversion() {
        let err = case_data("hello", Some("shouty")).unwrap_err();
        assert!(matches!(err, Error::Tool(devkit_core::Error::InvalidInput(_))));
    }

    #[test]
    fn test_format_case_text_lists_every_conversion() {
        let output = case_data("hello world", None).unwrap();
        let text = format_case_text(&output, false);
        assert!(text.contains("snake_case"));
        assert!(text.contains("hello_world"));
        assert!(text.contains("Sentence case"));
        assert!(text.contains("Hello world"));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn test_format_case_text_header() {
        colored::control::set_override(false);
        let output = case_data("1234", None).unwrap();
        assert!(format_case_text(&output, true).starts_with("Detected: unknown\n"));
    }
}
