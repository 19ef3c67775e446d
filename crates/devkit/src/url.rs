use crate::codec::{format_codec_text, CodecOutput, Direction};
use crate::input::InputArgs;
use crate::prelude::{eprintln, println, *};
use devkit_core::detect::{detect_url_encoding, EncodingMode};
use devkit_core::text::{decode_url, encode_url};

#[derive(Debug, Clone, clap::Args)]
pub struct UrlOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Force a direction instead of detecting it from the input
    #[arg(short, long, value_enum)]
    pub mode: Option<Direction>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: UrlOptions, global: crate::Global) -> Result<()> {
    let text = options.input.read_text()?;
    let output = url_data(&text, options.mode.map(Into::into))?;

    if global.verbose {
        eprintln!("Mode: {} (auto-detected: {})", output.mode, output.auto_detected);
    }

    if options.json {
        println!("{}", to_json(&output)?);
    } else {
        println!("{}", format_codec_text("URL", &output, is_tty()));
    }

    crate::clipboard::copy_if_requested(&global, &output.output, "Text");

    Ok(())
}

/// Encode or decode `text`, detecting the direction when `mode` is `None`
pub fn url_data(text: &str, mode: Option<EncodingMode>) -> Result<CodecOutput, Error> {
    let detected = detect_url_encoding(text);
    let chosen = mode.unwrap_or(detected);

    if text.is_empty() {
        return Ok(CodecOutput::empty(chosen));
    }

    log::debug!("url mode {chosen} (detected {detected})");

    let output = match chosen {
        EncodingMode::Encode => encode_url(text),
        EncodingMode::Decode => decode_url(text)?,
    };

    Ok(CodecOutput {
        mode: chosen,
        auto_detected: mode.is_none() && (detected != EncodingMode::Encode || text.contains(' ')),
        output,
    })
}
