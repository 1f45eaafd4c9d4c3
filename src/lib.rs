pub mod api;
pub mod bidding;
pub mod config;
pub mod error;
pub mod handlers;
pub mod job;
pub mod session;
pub mod ui;
