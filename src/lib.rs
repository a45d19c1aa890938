//! Star Wars character lookup with a local cache and search history

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod search;
pub mod swapi;
