pub mod client;
pub mod db;
pub mod error;
pub mod filter;
pub mod models;
pub mod paginate;
pub mod selection;
pub mod server;
pub mod sort;
pub mod stats;
pub mod tui;
pub mod validation;
