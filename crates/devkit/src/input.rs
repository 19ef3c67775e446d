use crate::prelude::*;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Where a tool reads its input from
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// Input text. Reads stdin when omitted.
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the input from a file instead
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Content handed to a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Binary(Vec<u8>),
}

impl Input {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Input::Text(text) => text.as_bytes(),
            Input::Binary(bytes) => bytes,
        }
    }

    /// Text content, rejecting binary files
    pub fn into_text(self, origin: &str) -> Result<String, Error> {
        match self {
            Input::Text(text) => Ok(text),
            Input::Binary(_) => Err(Error::BinaryInput(origin.to_string())),
        }
    }
}

impl InputArgs {
    /// Resolve the argument, file or stdin into an [`Input`]
    pub fn read(&self) -> Result<Input, Error> {
        if let Some(text) = &self.text {
            return Ok(Input::Text(text.clone()));
        }

        if let Some(path) = &self.file {
            return read_file(path).map_err(Error::from);
        }

        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(Error::NoInput);
        }

        let mut buffer = Vec::new();
        stdin
            .lock()
            .read_to_end(&mut buffer)
            .map_err(|e| devkit_core::Error::FileReadFailure(f!("stdin: {e}")))?;

        Ok(match String::from_utf8(buffer) {
            Ok(text) => Input::Text(strip_trailing_newline(text)),
            Err(e) => Input::Binary(e.into_bytes()),
        })
    }

    /// Read the input and require it to be text
    pub fn read_text(&self) -> Result<String, Error> {
        let origin = self
            .file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdin".to_string());
        self.read()?.into_text(&origin)
    }
}

/// Read a file as text when it is valid UTF-8, as raw bytes otherwise
pub fn read_file(path: &Path) -> Result<Input, devkit_core::Error> {
    let bytes = std::fs::read(path)
        .map_err(|e| devkit_core::Error::FileReadFailure(f!("{}: {}", path.display(), e)))?;

    log::debug!("read {} bytes from {}", bytes.len(), path.display());

    Ok(match String::from_utf8(bytes) {
        Ok(text) => Input::Text(text),
        Err(e) => Input::Binary(e.into_bytes()),
    })
}

/// `echo foo | devkit ...` should see `foo`, not `foo\n`
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_file_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "hello\nworld\n").unwrap();

        let input = read_file(file.path()).unwrap();
        assert_eq!(input, Input::Text("hello\nworld\n".to_string()));
    }

    #[test]
    fn test_read_file_binary() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x01]).unwrap();

        let input = read_file(file.path()).unwrap();
        assert_eq!(input, Input::Binary(vec![0xff, 0xfe, 0x00, 0x01]));
    }

    #[test]
    fn test_read_file_missing() {
        let err = read_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, devkit_core::Error::FileReadFailure(_)));
    }

    #[test]
    fn test_text_argument_wins() {
        let args = InputArgs {
            text: Some("inline".to_string()),
            file: None,
        };
        assert_eq!(args.read().unwrap(), Input::Text("inline".to_string()));
    }

    #[test]
    fn test_read_text_rejects_binary_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xc3, 0x28]).unwrap();

        let args = InputArgs {
            text: None,
            file: Some(file.path().to_path_buf()),
        };
        assert!(matches!(args.read_text(), Err(Error::BinaryInput(_))));
    }

    #[test]
    fn test_strip_trailing_newline() {
        assert_eq!(strip_trailing_newline("foo\n".to_string()), "foo");
        assert_eq!(strip_trailing_newline("foo\r\n".to_string()), "foo");
        assert_eq!(strip_trailing_newline("foo\n\n".to_string()), "foo\n");
        assert_eq!(strip_trailing_newline("foo".to_string()), "foo");
    }
}
