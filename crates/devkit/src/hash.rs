use crate::input::InputArgs;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::hash::{
    find_algorithm, generate_many, HashAlgorithm, HashOutcome, HashResult, Hasher, ALGORITHMS,
    CHUNK_SIZE,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, clap::Args)]
pub struct HashOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Algorithms to run. Repeat the flag for several; all of them by default.
    #[arg(short, long = "algorithm", value_parser = algorithm_ids())]
    pub algorithms: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn algorithm_ids() -> clap::builder::PossibleValuesParser {
    clap::builder::PossibleValuesParser::new(ALGORITHMS.iter().map(|algorithm| algorithm.id))
}

pub async fn run(options: HashOptions, global: crate::Global) -> Result<()> {
    let ids: Vec<String> = if options.algorithms.is_empty() {
        ALGORITHMS.iter().map(|a| a.id.to_string()).collect()
    } else {
        options.algorithms.clone()
    };

    let results = match &options.input.file {
        Some(path) => {
            if global.verbose {
                eprintln!("Hashing {} with {}", path.display(), ids.join(", "));
            }

            let progress = std::io::stderr().is_terminal().then(|| file_progress(path));
            let results = hash_file(path.clone(), ids, progress.clone()).await;
            if let Some(progress) = progress {
                progress.finish_and_clear();
            }
            results?
        }
        None => {
            let data = options.input.read()?.as_bytes().to_vec();
            if global.verbose {
                eprintln!("Hashing {} bytes with {}", data.len(), ids.join(", "));
            }
            hash_data(data, &ids).await
        }
    };

    if options.json {
        println!("{}", to_json(&results)?);
    } else {
        println!("{}", format_hash_text(&results, is_tty()));
    }

    if results.iter().all(|result| result.digest().is_none()) {
        return Err(eyre!("Every hash algorithm failed"));
    }

    if let [single] = results.as_slice() {
        if let Some(digest) = single.digest() {
            crate::clipboard::copy_if_requested(&global, digest, "Hash");
        }
    }

    Ok(())
}

/// Hash `data` with every id in parallel on the blocking pool
///
/// One algorithm failing, or its task panicking, leaves the others intact.
pub async fn hash_data(data: Vec<u8>, ids: &[String]) -> Vec<HashResult> {
    let data = Arc::new(data);

    let tasks = ids.iter().cloned().map(|id| {
        let data = Arc::clone(&data);
        async move {
            let handle = tokio::task::spawn_blocking({
                let id = id.clone();
                move || generate_many(&data, &[id.as_str()])
            });

            match handle.await {
                Ok(mut results) if !results.is_empty() => results.remove(0),
                Ok(_) => failed(&id, "no result".to_string()),
                Err(e) => {
                    log::warn!("hash task for {id} failed: {e}");
                    failed(&id, f!("task failed: {e}"))
                }
            }
        }
    });

    futures::future::join_all(tasks).await
}

/// Hash a file in [`CHUNK_SIZE`] reads, feeding every algorithm per chunk
///
/// `progress`, when given, advances by the bytes read.
pub async fn hash_file(
    path: PathBuf,
    ids: Vec<String>,
    progress: Option<ProgressBar>,
) -> Result<Vec<HashResult>, Error> {
    let task = tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&path).map_err(|e| read_failure(&path, e))?;
        hash_reader(file, &ids, |read| {
            if let Some(progress) = &progress {
                progress.inc(read as u64);
            }
        })
        .map_err(|e| read_failure(&path, e))
    });

    task.await
        .map_err(|e| devkit_core::Error::FileReadFailure(f!("hash task failed: {e}")))?
}

/// Stream `reader` through the hashers named by `ids`
///
/// Unknown ids become error outcomes in place. `on_chunk` sees the size of
/// every chunk read.
pub fn hash_reader<R: Read>(
    mut reader: R,
    ids: &[String],
    mut on_chunk: impl FnMut(usize),
) -> std::io::Result<Vec<HashResult>> {
    let mut hashers: Vec<Result<Hasher, HashResult>> = ids
        .iter()
        .map(|id| Hasher::new(id).map_err(|e| failed(id, e.to_string())))
        .collect();

    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = read_chunk(&mut reader, &mut buffer)?;
        if read == 0 {
            break;
        }
        for hasher in hashers.iter_mut().flatten() {
            hasher.update(&buffer[..read]);
        }
        on_chunk(read);
    }

    Ok(hashers
        .into_iter()
        .map(|hasher| match hasher {
            Ok(hasher) => hasher.finalize(),
            Err(result) => result,
        })
        .collect())
}

/// Fill `buffer` as far as the reader allows, so chunks stay full-sized
fn read_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn read_failure(path: &Path, e: std::io::Error) -> Error {
    devkit_core::Error::FileReadFailure(f!("{}: {}", path.display(), e)).into()
}

fn file_progress(path: &Path) -> ProgressBar {
    let total = std::fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
    let progress = ProgressBar::new(total);
    let template = "{spinner:.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        progress.set_style(style.progress_chars("=> "));
    }
    progress.set_message(f!("hashing {}", path.display()));
    progress
}

fn failed(id: &str, message: String) -> HashResult {
    let algorithm = find_algorithm(id).copied().unwrap_or(HashAlgorithm {
        name: "unknown",
        id: "unknown",
    });
    HashResult {
        algorithm,
        outcome: HashOutcome::Error(message),
    }
}

/// Table of digests. A lone digest prints bare when not on a TTY.
pub fn format_hash_text(results: &[HashResult], decorate: bool) -> String {
    if let ([single], false) = (results, decorate) {
        if let Some(digest) = single.digest() {
            return digest.to_string();
        }
    }

    let mut table = new_table();
    for result in results {
        match &result.outcome {
            HashOutcome::Digest(hex) => {
                table.add_row(prettytable::row![result.algorithm.name, hex]);
            }
            HashOutcome::Error(e) => {
                table.add_row(prettytable::row![result.algorithm.name, e.red()]);
            }
        }
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_hash_data_keeps_requested_order() {
        let results = hash_data(b"hello".to_vec(), &ids(&["sha256", "md5"])).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].algorithm.id, "sha256");
        assert_eq!(results[0].digest(), Some(HELLO_SHA256));
        assert_eq!(
            results[1].digest(),
            Some("5d41402abc4b2a76b9719d911017c592")
        );
    }

    #[tokio::test]
    async fn test_hash_data_partial_failure() {
        let results = hash_data(b"hello".to_vec(), &ids(&["sha1", "crc32"])).await;

        assert_eq!(
            results[0].digest(),
            Some("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d")
        );
        assert_eq!(
            results[1].outcome,
            HashOutcome::Error("Unsupported algorithm: crc32".to_string())
        );
    }

    #[tokio::test]
    async fn test_hash_data_empty_input() {
        let results = hash_data(Vec::new(), &ids(&["sha512"])).await;
        assert_eq!(results[0].digest(), Some(""));
    }

    #[tokio::test]
    async fn test_hash_file_chunked_matches_one_shot() {
        use std::io::Write;

        let data: Vec<u8> = (0..CHUNK_SIZE * 2 + 12_345).map(|i| (i % 253) as u8).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let all = ids(&["md5", "sha1", "sha256", "sha384", "sha512"]);
        let progress = ProgressBar::hidden();
        let chunked = hash_file(file.path().to_path_buf(), all.clone(), Some(progress.clone()))
            .await
            .unwrap();
        let one_shot = hash_data(data.clone(), &all).await;

        assert_eq!(chunked, one_shot);
        assert_eq!(progress.position(), data.len() as u64);
    }

    #[test]
    fn test_hash_reader_reports_full_chunks() {
        let data = vec![7u8; CHUNK_SIZE + 10];
        let mut chunks = Vec::new();
        let results = hash_reader(data.as_slice(), &ids(&["sha256", "crc32"]), |read| {
            chunks.push(read)
        })
        .unwrap();

        assert_eq!(chunks, vec![CHUNK_SIZE, 10]);
        assert!(results[0].digest().is_some());
        assert_eq!(
            results[1].outcome,
            HashOutcome::Error("Unsupported algorithm: crc32".to_string())
        );
    }

    #[tokio::test]
    async fn test_hash_file_missing() {
        let err = hash_file(PathBuf::from("/definitely/not/here.bin"), ids(&["md5"]), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Tool(devkit_core::Error::FileReadFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_format_hash_text_single_is_bare() {
        let results = hash_data(b"hello".to_vec(), &ids(&["sha256"])).await;
        assert_eq!(format_hash_text(&results, false), HELLO_SHA256);
    }

    #[tokio::test]
    async fn test_format_hash_text_table() {
        let results = hash_data(b"hello".to_vec(), &ids(&["md5", "sha256"])).await;
        let text = format_hash_text(&results, false);
        assert!(text.contains("MD5"));
        assert!(text.contains(HELLO_SHA256));
        assert_eq!(text.lines().count(), 2);
    }
}
