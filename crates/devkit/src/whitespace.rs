use crate::input::InputArgs;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::text::{text_stats, TextStats};
use devkit_core::whitespace::{clean, CleaningOptions};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Trim the ends, nothing else
    Trim,
    /// Remove every whitespace character
    Compact,
    /// Join lines and collapse runs of whitespace
    SingleLine,
    /// Replace tabs and collapse runs of whitespace
    Standard,
}

impl From<Preset> for CleaningOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Trim => CleaningOptions::trim_only(),
            Preset::Compact => CleaningOptions::compact(),
            Preset::SingleLine => CleaningOptions::single_line(),
            Preset::Standard => CleaningOptions::standard(),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct WhitespaceOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Start from a preset. Individual flags are added on top.
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Only trim leading and trailing whitespace
    #[arg(long)]
    pub trim_only: bool,

    /// Replace line breaks with spaces
    #[arg(long)]
    pub remove_line_breaks: bool,

    /// Collapse runs of whitespace into a single space
    #[arg(long)]
    pub remove_extra_spaces: bool,

    /// Replace tabs with spaces
    #[arg(long)]
    pub remove_tabs: bool,

    /// Remove every whitespace character
    #[arg(long)]
    pub remove_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl WhitespaceOptions {
    pub fn cleaning_options(&self) -> CleaningOptions {
        resolve_options(
            self.preset,
            CleaningOptions {
                trim_only: self.trim_only,
                remove_line_breaks: self.remove_line_breaks,
                remove_extra_spaces: self.remove_extra_spaces,
                remove_tabs: self.remove_tabs,
                convert_to_single_space: false,
                remove_all_whitespace: self.remove_all,
            },
        )
    }
}

/// Combine a preset with individual flags. No preset and no flags means `standard`.
pub fn resolve_options(preset: Option<Preset>, flags: CleaningOptions) -> CleaningOptions {
    let base = match preset {
        Some(preset) => preset.into(),
        None if flags == CleaningOptions::default() => CleaningOptions::standard(),
        None => CleaningOptions::default(),
    };

    CleaningOptions {
        trim_only: base.trim_only || flags.trim_only,
        remove_line_breaks: base.remove_line_breaks || flags.remove_line_breaks,
        remove_extra_spaces: base.remove_extra_spaces || flags.remove_extra_spaces,
        remove_tabs: base.remove_tabs || flags.remove_tabs,
        convert_to_single_space: base.convert_to_single_space || flags.convert_to_single_space,
        remove_all_whitespace: base.remove_all_whitespace || flags.remove_all_whitespace,
    }
}

/// Result of a `devkit whitespace` run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhitespaceOutput {
    pub options: CleaningOptions,
    pub output: String,
    pub before: TextStats,
    pub after: TextStats,
}

pub async fn run(options: WhitespaceOptions, global: crate::Global) -> Result<()> {
    let text = options.input.read_text()?;
    let cleaning = options.cleaning_options();

    if global.verbose {
        eprintln!("Cleaning options: {:?}", cleaning);
    }

    let output = whitespace_data(&text, &cleaning);

    if options.json {
        println!("{}", to_json(&output)?);
    } else {
        println!("{}", format_whitespace_text(&output, is_tty()));
    }

    crate::clipboard::copy_if_requested(&global, &output.output, "Text");

    Ok(())
}

pub fn whitespace_data(text: &str, options: &CleaningOptions) -> WhitespaceOutput {
    let output = clean(text, options);
    log::debug!("cleaned {} chars into {}", text.len(), output.len());

    WhitespaceOutput {
        options: *options,
        before: text_stats(text),
        after: text_stats(&output),
        output,
    }
}

pub fn format_whitespace_text(output: &WhitespaceOutput, decorate: bool) -> String {
    if !decorate {
        return output.output.clone();
    }

    f!(
        "{}\n{}",
        output.output,
        f!(
            "{} -> {} characters, {} -> {} lines",
            output.before.characters,
            output.after.characters,
            output.before.lines,
            output.after.lines
        )
        .bright_black()
    )
}
