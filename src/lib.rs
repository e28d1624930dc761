//! Player status service.
//!
//! Polls a file-server directory listing where every subfolder belongs to a
//! media player, checks how recently each player's `thumbnail.jpg` was
//! updated, and serves the online/offline split on `GET /api/status`.

pub mod adapters;
pub mod aggregator;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod freshness;
pub mod listing;
pub mod models;
pub mod server;
pub mod traits;
