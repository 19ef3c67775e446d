//! Re-run a tool every time the input changes, once typing settles.
//!
//! Each stdin line replaces the current input. Recomputation is debounced and
//! sequenced so only the newest input ever reaches the output.

mod debounce;
mod sequence;

pub use debounce::{CancelHandle, Debouncer};
pub use sequence::{Sequencer, Ticket};

use crate::prelude::{eprintln, *};
use colored::Colorize;
use devkit_core::hash::generate_all;
use devkit_core::text::JsonFormatOptions;
use devkit_core::whitespace::CleaningOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LiveTool {
    Url,
    Base64,
    Jwt,
    Json,
    Case,
    Whitespace,
    Hash,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LiveOptions {
    /// Tool to re-run on every input line
    #[arg(value_enum)]
    pub tool: LiveTool,

    /// Quiet period before recomputing, in milliseconds
    #[arg(long, env = "DEVKIT_DEBOUNCE_MS", default_value_t = 300)]
    pub debounce_ms: u64,
}

pub async fn run(options: LiveOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Live {:?}: one input per line, {}ms debounce. Ctrl-D to finish.",
            options.tool, options.debounce_ms
        );
    }

    let stdout = Arc::new(tokio::sync::Mutex::new(tokio::io::stdout()));
    let latest = live_loop(
        BufReader::new(tokio::io::stdin()),
        stdout,
        options.tool,
        Duration::from_millis(options.debounce_ms),
    )
    .await?;

    if let Some(output) = latest {
        crate::clipboard::copy_if_requested(&global, &output, "Output");
    }

    Ok(())
}

/// Feed each line of `reader` to `tool`, writing only settled, current results
///
/// Returns the last output written once the input is exhausted and the final
/// pending job has run.
pub async fn live_loop<R, W>(
    reader: R,
    writer: Arc<tokio::sync::Mutex<W>>,
    tool: LiveTool,
    delay: Duration,
) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut debouncer = Debouncer::new(delay);
    let sequencer = Arc::new(Sequencer::default());
    let latest_output = Arc::new(Mutex::new(None::<String>));

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let ticket = sequencer.submit();
        log::debug!(
            "input #{} received, settling for {:?}",
            ticket.generation(),
            debouncer.delay()
        );

        let sequencer = Arc::clone(&sequencer);
        let latest_output = Arc::clone(&latest_output);
        let writer = Arc::clone(&writer);

        debouncer.schedule(async move {
            let computed = tokio::task::spawn_blocking(move || live_result(tool, &line)).await;
            let Some(computed) = sequencer.complete(ticket, computed) else {
                return;
            };

            match computed {
                Ok(Ok(output)) => {
                    let mut writer = writer.lock().await;
                    let written = async {
                        writer.write_all(f!("{output}\n").as_bytes()).await?;
                        writer.flush().await
                    };
                    if let Err(e) = written.await {
                        log::warn!("failed to write live output: {e}");
                        return;
                    }
                    if let Ok(mut latest) = latest_output.lock() {
                        *latest = Some(output);
                    }
                }
                Ok(Err(e)) => eprintln!("{}", f!("Error: {e}").red()),
                Err(e) => eprintln!("{}", f!("Error: {e}").red()),
            }
        });
    }

    debouncer.settle().await;

    Ok(latest_output.lock().ok().and_then(|mut latest| latest.take()))
}

/// One recomputation: run `tool` over `text` and render it undecorated
pub fn live_result(tool: LiveTool, text: &str) -> Result<String, Error> {
    match tool {
        LiveTool::Url => Ok(crate::url::url_data(text, None)?.output),
        LiveTool::Base64 => Ok(crate::base64::base64_data(text, None)?.output),
        LiveTool::Jwt => {
            let output = crate::jwt::jwt_data(text, chrono::Utc::now());
            match &output.result.error {
                Some(e) => Err(devkit_core::Error::InvalidInput(e.clone()).into()),
                None => Ok(crate::jwt::format_jwt_text(&output)),
            }
        }
        LiveTool::Json => {
            let output = crate::json::json_data(
                text,
                crate::json::JsonAction::Format,
                &JsonFormatOptions::default(),
            );
            match (output.output, output.validation.error) {
                (Some(rendered), _) => Ok(rendered),
                (None, error) => Err(devkit_core::Error::InvalidInput(
                    error.unwrap_or_else(|| "invalid JSON".to_string()),
                )
                .into()),
            }
        }
        LiveTool::Case => {
            let output = crate::case::case_data(text, None)?;
            Ok(crate::case::format_case_text(&output, false))
        }
        LiveTool::Whitespace => {
            Ok(crate::whitespace::whitespace_data(text, &CleaningOptions::standard()).output)
        }
        LiveTool::Hash => Ok(crate::hash::format_hash_text(
            &generate_all(text.as_bytes()),
            false,
        )),
    }
}
