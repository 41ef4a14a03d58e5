//! Identifiers that need no worker configuration
//!
//! - [`TimeOrderedUuidGenerator`] - timestamp, munged machine address and
//!   sequence, Base64 encoded
//! - [`RandomUuidGenerator`] - random version 4 UUIDs

pub mod machine;
pub mod random;
pub mod time_ordered;

pub use random::RandomUuidGenerator;
pub use time_ordered::TimeOrderedUuidGenerator;
