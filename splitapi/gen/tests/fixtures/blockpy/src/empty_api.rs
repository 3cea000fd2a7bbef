use splitapi::{Api, ConfigError};

pub fn empty_split_api() -> Result<Api, ConfigError> {
    Api::builder("http://localhost:5000").build()
}
