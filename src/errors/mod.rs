pub mod envelope;
pub mod recovery;
pub mod sentinel;
pub mod types;
pub use envelope::{EnvelopeConfig, ErrorEnvelope, TimeZoneMode};
pub use recovery::{fatal, raise, recover, restore, restore_and_panic, UnexpectedFault};
pub use types::{ApiError, SharedError, WrapErr};
