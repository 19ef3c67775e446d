//! Core library for devkit
//!
//! This crate implements the **Functional Core** of the devkit application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The devkit project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`devkit_core`** (this crate): Pure text transforms with zero I/O
//! - **`devkit`**: CLI, live mode, clipboard and file access, and the MCP server (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no clock reads, no OS randomness
//! - **Typed failures**: Malformed input surfaces as [`Error`], never a panic
//!
//! Where a transform needs the outside world, the shell passes it in: the JWT
//! decoder takes the current time, the UUID fallback takes a random number
//! generator.
//!
//! # Module Organization
//!
//! - [`detect`]: Heuristics that guess encode/decode direction and case conventions
//! - [`text`]: URL percent-encoding, Base64, and JSON formatting
//! - [`case`]: The nine case conversions and their registry
//! - [`whitespace`]: Whitespace cleaning policies
//! - [`jwt`]: Structural JWT decoding and claim warnings
//! - [`hash`]: Hex digests for the supported hash algorithms
//! - [`uuid`]: UUID display formats and the v4 template fallback
//!
//! # Example Usage
//!
//! ```rust
//! use devkit_core::case::convert;
//! use devkit_core::detect::{detect_base64, EncodingMode};
//! use devkit_core::whitespace::{clean, CleaningOptions};
//!
//! assert_eq!(convert("hello world example", "kebab"), "hello-world-example");
//! assert_eq!(detect_base64("aGVsbG8="), EncodingMode::Decode);
//! assert_eq!(clean("  a   b  ", &CleaningOptions::standard()), "a b");
//! ```

pub mod case;
pub mod detect;
pub mod error;
pub mod hash;
pub mod jwt;
pub mod text;
pub mod uuid;
pub mod whitespace;

pub use error::{Error, Result};
