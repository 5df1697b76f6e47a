//! Media library tracking service: consumption statistics, genre preference
//! and time-budget recommendations over a user's tracked movies, shows, books
//! and games.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
