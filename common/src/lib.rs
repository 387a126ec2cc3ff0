pub mod config;
pub mod date;
pub mod domain;
pub mod events;
