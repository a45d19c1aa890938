mod client;
pub mod types;

pub use client::{CharacterSource, SwapiClient};
pub use types::*;
