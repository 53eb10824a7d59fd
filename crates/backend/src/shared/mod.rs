pub mod app_state;
pub mod config;
pub mod error;
pub mod gateway;
pub mod payments;
