//! Repository traits decoupling the domain from the persistence layer.
//!
//! All cross-request coordination lives behind these traits: the storage
//! implementation provides atomic transactions and unique-key constraints,
//! the application layer never takes locks of its own.

mod click_repository;
mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::{InsertOutcome, LinkRepository};

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
