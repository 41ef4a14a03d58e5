//! # snowkit
//!
//! Snowflake-style 64-bit ID generators with a configurable segment layout.
//!
//! An ID packs, from the most significant bit down:
//! - a timestamp relative to a fixed epoch (milliseconds or seconds)
//! - one or more worker segments (data center, worker, host octets, ...)
//! - a per-timestamp sequence counter
//!
//! Worker and sequence segments use at most 62 bits, so every ID fits a
//! signed 64-bit integer and stays non-negative until
//! [`SnowflakeGenerator::latest_usable_instant`].
//!
//! Generators are passive: every call takes the current time from a
//! caller-supplied time source, such as [`clock::system_millis`].
//!
//! ```
//! use snowkit::{clock, presets};
//!
//! let generator = presets::classic(1, 2).unwrap();
//! let id = generator.generate(clock::system_millis);
//! assert_eq!(generator.extract().worker_id(id, 0), Ok(1));
//! assert_eq!(generator.extract().worker_id(id, 1), Ok(2));
//! ```
//!
//! Also included are ID schemes that need no worker configuration:
//! time-ordered and random UUIDs in [`uuid`].

#![forbid(unsafe_code)]

pub mod base64;
pub mod clock;
mod config;
mod error;
mod extractor;
mod generator;
pub mod presets;
mod registry;
pub mod uuid;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use clock::TimeUnit;
pub use config::{SnowflakeConfig, SnowflakeConfigBuilder, WaitConfig, WaitConfigBuilder};
pub use config::{WorkerSegment, DEFAULT_EPOCH_MILLIS, DEFAULT_SEQUENCE_BITS, MAX_LAYOUT_BITS};
pub use error::SnowflakeError;
pub use extractor::{SnowflakeExtractor, SnowflakeParts};
pub use generator::wait::wait_until;
pub use generator::SnowflakeGenerator;
pub use registry::GeneratorRegistry;
pub use crate::uuid::{RandomUuidGenerator, TimeOrderedUuidGenerator};
