use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const MAX_TOKEN_AGE_DAYS: i64 = 3650;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    /// Tokens older than this are refused and replaced on the next login.
    pub token_max_age_days: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("token_max_age_days", 30)?
            .add_source(Environment::default())
            .build()?
            .try_deserialize::<Settings>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_TOKEN_AGE_DAYS).contains(&self.token_max_age_days) {
            return Err(ConfigError::Message(format!(
                "token_max_age_days must be between 1 and {}, got {}",
                MAX_TOKEN_AGE_DAYS, self.token_max_age_days
            )));
        }
        Ok(self)
    }
}
