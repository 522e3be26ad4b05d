//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Character storage (in-memory today, a document store in deployment)
//! - Clock (for testing)

mod clock;
mod error;
mod repos;

pub use clock::ClockPort;
pub use error::RepoError;
pub use repos::CharacterRepo;

#[cfg(test)]
pub use clock::MockClockPort;
#[cfg(test)]
pub use repos::MockCharacterRepo;
