use crate::codec::{format_codec_text, CodecOutput, Direction};
use crate::input::{Input, InputArgs};
use crate::prelude::{eprintln, println, *};
use devkit_core::detect::{detect_base64, EncodingMode};
use devkit_core::text::{decode_base64, encode_base64, encode_base64_bytes};

#[derive(Debug, Clone, clap::Args)]
pub struct Base64Options {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Force a direction instead of detecting it from the input
    #[arg(short, long, value_enum)]
    pub mode: Option<Direction>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: Base64Options, global: crate::Global) -> Result<()> {
    let output = match options.input.read()? {
        Input::Text(text) => base64_data(&text, options.mode.map(Into::into))?,
        Input::Binary(bytes) => {
            if options.mode == Some(Direction::Decode) {
                return Err(Error::BinaryInput("the Base64 input".to_string()).into());
            }
            if global.verbose {
                eprintln!("Encoding {} bytes of binary input", bytes.len());
            }
            CodecOutput {
                mode: EncodingMode::Encode,
                auto_detected: false,
                output: encode_base64_bytes(&bytes),
            }
        }
    };

    if global.verbose {
        eprintln!("Mode: {} (auto-detected: {})", output.mode, output.auto_detected);
    }

    if options.json {
        println!("{}", to_json(&output)?);
    } else {
        println!("{}", format_codec_text("BASE64", &output, is_tty()));
    }

    crate::clipboard::copy_if_requested(&global, &output.output, "Text");

    Ok(())
}

/// Encode or decode `text`, detecting the direction when `mode` is `None`
pub fn base64_data(text: &str, mode: Option<EncodingMode>) -> Result<CodecOutput, Error> {
    let detected = detect_base64(text);
    let chosen = mode.unwrap_or(detected);

    if text.is_empty() {
        return Ok(CodecOutput::empty(chosen));
    }

    log::debug!("base64 mode {chosen} (detected {detected})");

    let output = match chosen {
        EncodingMode::Encode => encode_base64(text),
        EncodingMode::Decode => decode_base64(text)?,
    };

    Ok(CodecOutput {
        mode: chosen,
        auto_detected: mode.is_none() && detected == EncodingMode::Decode,
        output,
    })
}
