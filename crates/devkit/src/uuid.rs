use crate::prelude::{eprintln, println, *};
use devkit_core::uuid::{fallback_v4, format_uuid, normalize_uuid, UuidFormat, MAX_BATCH_SIZE};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// 8-4-4-4-12 lowercase
    Standard,
    /// 32 hex digits
    NoHyphens,
    /// Wrapped in `{}`
    Braces,
    /// Standard, uppercased
    Uppercase,
}

impl From<Format> for UuidFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Standard => UuidFormat::Standard,
            Format::NoHyphens => UuidFormat::NoHyphens,
            Format::Braces => UuidFormat::Braces,
            Format::Uppercase => UuidFormat::Uppercase,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct UuidOptions {
    /// How many UUIDs to generate
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=MAX_BATCH_SIZE as i64)
    )]
    pub count: u16,

    /// Display format
    #[arg(short, long, value_enum, default_value_t = Format::Standard)]
    pub format: Format,

    /// Print the canonical form of an existing UUID instead of generating
    #[arg(long, value_name = "UUID", conflicts_with_all = ["count", "format"])]
    pub normalize: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a `devkit uuid` run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UuidOutput {
    pub format: UuidFormat,
    pub uuids: Vec<String>,
}

pub async fn run(options: UuidOptions, global: crate::Global) -> Result<()> {
    let output = match &options.normalize {
        Some(formatted) => UuidOutput {
            format: UuidFormat::Standard,
            uuids: vec![normalize_uuid(formatted.trim())],
        },
        None => uuid_data(options.count as usize, options.format.into()),
    };

    if global.verbose {
        eprintln!("Generated {} UUID(s) as {:?}", output.uuids.len(), output.format);
    }

    if options.json {
        println!("{}", to_json(&output)?);
    } else {
        println!("{}", output.uuids.join("\n"));
    }

    crate::clipboard::copy_if_requested(&global, &output.uuids.join("\n"), "UUIDs");

    Ok(())
}

/// Generate `count` v4 UUIDs (capped at the batch limit) rendered as `format`
pub fn uuid_data(count: usize, format: UuidFormat) -> UuidOutput {
    let uuids = (0..count.min(MAX_BATCH_SIZE))
        .map(|_| format_uuid(&generate_v4(), format))
        .collect();

    UuidOutput { format, uuids }
}

/// A v4 UUID from OS randomness, or the template fallback seeded from the clock
pub fn generate_v4() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => ::uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            log::warn!("OS randomness unavailable, using template fallback: {e}");
            let seed = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default();
            fallback_v4(&mut StdRng::seed_from_u64(seed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_canonical_v4(uuid: &str) -> bool {
        let parsed = ::uuid::Uuid::parse_str(uuid);
        parsed.is_ok_and(|parsed| {
            parsed.get_version_num() == 4 && parsed.hyphenated().to_string() == uuid
        })
    }

    #[test]
    fn test_generate_v4_is_canonical() {
        for _ in 0..20 {
            let uuid = generate_v4();
            assert!(is_canonical_v4(&uuid), "not a v4 uuid: {uuid}");
        }
    }

    #[test]
    fn test_uuid_data_batch_is_unique() {
        let output = uuid_data(25, UuidFormat::Standard);
        let unique: HashSet<_> = output.uuids.iter().collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_uuid_data_caps_batch() {
        assert_eq!(uuid_data(500, UuidFormat::Standard).uuids.len(), MAX_BATCH_SIZE);
    }

    #[test]
    fn test_uuid_data_formats() {
        let braces = uuid_data(1, UuidFormat::Braces).uuids.remove(0);
        assert!(braces.starts_with('{') && braces.ends_with('}'));
        assert!(is_canonical_v4(&normalize_uuid(&braces)));

        let bare = uuid_data(1, UuidFormat::NoHyphens).uuids.remove(0);
        assert_eq!(bare.len(), 32);
        assert!(is_canonical_v4(&normalize_uuid(&bare)));

        let upper = uuid_data(1, UuidFormat::Uppercase).uuids.remove(0);
        assert_eq!(upper, upper.to_uppercase());
    }
}
