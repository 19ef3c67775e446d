//! Hash digests rendered as lowercase hex
//!
//! MD5 is a real MD5 digest. It exists for checksum comparison only and must
//! not be relied on for anything security related.

use crate::error::{Error, Result};
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// A supported digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashAlgorithm {
    pub name: &'static str,
    pub id: &'static str,
}

/// Every supported digest, in display order
pub static ALGORITHMS: [HashAlgorithm; 5] = [
    HashAlgorithm {
        name: "MD5",
        id: "md5",
    },
    HashAlgorithm {
        name: "SHA-1",
        id: "sha1",
    },
    HashAlgorithm {
        name: "SHA-256",
        id: "sha256",
    },
    HashAlgorithm {
        name: "SHA-384",
        id: "sha384",
    },
    HashAlgorithm {
        name: "SHA-512",
        id: "sha512",
    },
];

/// Result of one algorithm within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashResult {
    pub algorithm: HashAlgorithm,
    #[serde(flatten)]
    pub outcome: HashOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashOutcome {
    Digest(String),
    Error(String),
}

impl HashResult {
    pub fn digest(&self) -> Option<&str> {
        match &self.outcome {
            HashOutcome::Digest(hex) => Some(hex),
            HashOutcome::Error(_) => None,
        }
    }
}

/// Look up an algorithm by id
pub fn find_algorithm(id: &str) -> Result<&'static HashAlgorithm> {
    ALGORITHMS
        .iter()
        .find(|algorithm| algorithm.id == id)
        .ok_or_else(|| Error::UnsupportedAlgorithm(id.to_string()))
}

/// Hex digest of `data` with the algorithm named `id`
///
/// Empty input yields an empty string rather than the digest of nothing.
pub fn generate_hash(data: &[u8], id: &str) -> Result<String> {
    let algorithm = find_algorithm(id)?;

    if data.is_empty() {
        return Ok(String::new());
    }

    let hex = match algorithm.id {
        "md5" => format!("{:x}", md5::compute(data)),
        "sha1" => format!("{:x}", Sha1::digest(data)),
        "sha256" => format!("{:x}", Sha256::digest(data)),
        "sha384" => format!("{:x}", Sha384::digest(data)),
        "sha512" => format!("{:x}", Sha512::digest(data)),
        other => return Err(Error::UnsupportedAlgorithm(other.to_string())),
    };

    Ok(hex)
}

/// Hash `data` with each of `ids`, keeping every outcome
///
/// A failing algorithm does not discard the results of the others.
pub fn generate_many(data: &[u8], ids: &[&str]) -> Vec<HashResult> {
    ids.iter()
        .map(|id| {
            let algorithm = find_algorithm(id).copied().unwrap_or(HashAlgorithm {
                name: "unknown",
                id: "unknown",
            });
            let outcome = match generate_hash(data, id) {
                Ok(hex) => HashOutcome::Digest(hex),
                Err(e) => HashOutcome::Error(e.to_string()),
            };
            HashResult { algorithm, outcome }
        })
        .collect()
}

/// Bytes read per step when hashing a stream
pub const CHUNK_SIZE: usize = 2 * 1024 * 1024;

enum HasherState {
    Md5(md5::Context),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

/// Incremental digest fed one chunk at a time
///
/// Produces the same hex as [`generate_hash`] over the concatenated chunks,
/// including the empty string when nothing was fed.
pub struct Hasher {
    algorithm: HashAlgorithm,
    state: HasherState,
    consumed: u64,
}

impl Hasher {
    pub fn new(id: &str) -> Result<Self> {
        let algorithm = *find_algorithm(id)?;
        let state = match algorithm.id {
            "md5" => HasherState::Md5(md5::Context::new()),
            "sha1" => HasherState::Sha1(Sha1::new()),
            "sha256" => HasherState::Sha256(Sha256::new()),
            "sha384" => HasherState::Sha384(Sha384::new()),
            "sha512" => HasherState::Sha512(Sha512::new()),
            other => return Err(Error::UnsupportedAlgorithm(other.to_string())),
        };

        Ok(Self {
            algorithm,
            state,
            consumed: 0,
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.consumed += chunk.len() as u64;
        match &mut self.state {
            HasherState::Md5(context) => context.consume(chunk),
            HasherState::Sha1(hasher) => Digest::update(hasher, chunk),
            HasherState::Sha256(hasher) => Digest::update(hasher, chunk),
            HasherState::Sha384(hasher) => Digest::update(hasher, chunk),
            HasherState::Sha512(hasher) => Digest::update(hasher, chunk),
        }
    }

    pub fn finalize(self) -> HashResult {
        let hex = if self.consumed == 0 {
            String::new()
        } else {
            match self.state {
                HasherState::Md5(context) => format!("{:x}", context.compute()),
                HasherState::Sha1(hasher) => format!("{:x}", hasher.finalize()),
                HasherState::Sha256(hasher) => format!("{:x}", hasher.finalize()),
                HasherState::Sha384(hasher) => format!("{:x}", hasher.finalize()),
                HasherState::Sha512(hasher) => format!("{:x}", hasher.finalize()),
            }
        };

        HashResult {
            algorithm: self.algorithm,
            outcome: HashOutcome::Digest(hex),
        }
    }
}

/// Hash `data` with every registered algorithm
pub fn generate_all(data: &[u8]) -> Vec<HashResult> {
    let ids: Vec<&str> = ALGORITHMS.iter().map(|algorithm| algorithm.id).collect();
    generate_many(data, &ids)
}
