use serde::Deserialize;

/// Prefix of every configuration variable, e.g. `VOCAB_PORT`.
pub const ENV_PREFIX: &str = "VOCAB_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Book that mastered words are moved into
    #[serde(default = "default_mastered_book_id")]
    pub mastered_book_id: String,
    /// Largest grid accepted by one import, header included
    #[serde(default = "default_max_import_rows")]
    pub max_import_rows: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_mastered_book_id() -> String {
    "mastered".to_string()
}

const fn default_max_import_rows() -> usize {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            host: default_host(),
            port: default_port(),
            mastered_book_id: default_mastered_book_id(),
            max_import_rows: default_max_import_rows(),
        }
    }
}

impl ApiConfig {
    /// Load `VOCAB_*` variables; unset ones fall back to defaults.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ApiConfig, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();

        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.mastered_book_id, "mastered");
        assert_eq!(config.max_import_rows, 5000);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("VOCAB_ENV", "production"),
            ("VOCAB_PORT", "8080"),
            ("VOCAB_MASTERED_BOOK_ID", "done"),
            ("VOCAB_MAX_IMPORT_ROWS", "10"),
        ])
        .unwrap();

        assert_eq!(config.env, Environment::Production);
        assert!(!config.env.is_development());
        assert_eq!(config.port, 8080);
        assert_eq!(config.mastered_book_id, "done");
        assert_eq!(config.max_import_rows, 10);
    }

    #[test]
    fn test_invalid_port() {
        assert!(from_pairs(&[("VOCAB_PORT", "not-a-port")]).is_err());
    }
}
