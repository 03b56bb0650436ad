//! Request and response types for the REST API.

pub mod clicks;
pub mod health;
pub mod links_list;
pub mod shorten;
pub mod stats;
