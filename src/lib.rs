pub mod api;
pub mod cache;
pub mod components;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod library;
pub mod notify;
pub mod offline;
pub mod player;
pub mod search;
pub mod session;
pub mod utils;
