//! Persistence, token verification and search index adapters

pub mod auth;
pub mod database;
pub mod entities;
pub mod repositories;
pub mod search;
pub mod settings;
pub mod traits;
