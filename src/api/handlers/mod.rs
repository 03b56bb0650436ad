//! HTTP request handlers.

mod health;
mod links;
mod redirect;
mod shorten;
mod stats;

pub use health::health_handler;
pub use links::{availability_handler, delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use shorten::create_link_handler;
pub use stats::stats_handler;
