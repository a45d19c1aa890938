mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{
    ApiConfig, CacheConfig, Config, PartialHitPolicy, SearchConfig, CONFIG_KEYS,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
