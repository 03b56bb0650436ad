//! PostgreSQL repository implementations.

mod pg_click_repository;
mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
