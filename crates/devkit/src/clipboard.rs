use crate::prelude::{eprintln, *};
use colored::Colorize;
use std::io::Write;
use std::process::{Command, Stdio};

/// Clipboard writers to try, in order: macOS, Wayland, X11 (two flavors), Windows
const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// First clipboard command `is_available` accepts
pub fn find_command(
    is_available: impl Fn(&str) -> bool,
) -> Option<(&'static str, &'static [&'static str])> {
    CANDIDATES
        .iter()
        .find(|(program, _)| is_available(program))
        .copied()
}

/// Write `text` to the system clipboard
pub fn write_text(text: &str) -> Result<(), devkit_core::Error> {
    let (program, args) = find_command(|program| which::which(program).is_ok()).ok_or_else(|| {
        devkit_core::Error::ClipboardUnavailable(
            "no clipboard command found (tried pbcopy, wl-copy, xclip, xsel, clip)".to_string(),
        )
    })?;

    log::debug!("copying {} bytes with {}", text.len(), program);

    let unavailable =
        |e: std::io::Error| devkit_core::Error::ClipboardUnavailable(f!("{program}: {e}"));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(unavailable)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).map_err(unavailable)?;
    }

    let status = child.wait().map_err(unavailable)?;
    if !status.success() {
        return Err(devkit_core::Error::ClipboardUnavailable(f!(
            "{program} exited with {status}"
        )));
    }

    Ok(())
}

/// Copy `text` when `--copy` was given. Failures are reported, never fatal.
pub fn copy_if_requested(global: &crate::Global, text: &str, label: &str) {
    if !global.copy || text.is_empty() {
        return;
    }

    match write_text(text) {
        Ok(()) => eprintln!("{}", f!("{label} copied to clipboard.").green()),
        Err(e) => {
            log::warn!("clipboard write failed: {e}");
            eprintln!("{}", f!("Copy failed: {e}").yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_prefers_first_available() {
        let found = find_command(|program| program == "xclip" || program == "xsel");
        assert_eq!(found, Some(("xclip", &["-selection", "clipboard"][..])));
    }

    #[test]
    fn test_find_command_none_available() {
        assert_eq!(find_command(|_| false), None);
    }

    #[test]
    fn test_find_command_macos() {
        let found = find_command(|_| true);
        assert_eq!(found.map(|(program, _)| program), Some("pbcopy"));
    }
}
