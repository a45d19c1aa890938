mod cache;
mod config;
mod search;

pub use self::cache::cache;
pub use self::config::config;
pub use self::search::search;
