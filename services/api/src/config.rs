use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tutor_core::{BoardVariant, ValidationPolicy};

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backends for the completion service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAI,
}

impl Provider {
    fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash-lite",
            Provider::OpenAI => "gpt-4o-mini",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub board: BoardVariant,
    pub validation_policy: ValidationPolicy,
    pub provider: Provider,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub chat_model: String,
    pub upstream_timeout: Duration,
    pub curriculum_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Fails when the API key for the selected provider is absent, so the
    /// service never starts without a usable credential.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let board = std::env::var("TUTOR_BOARD")
            .unwrap_or_else(|_| "ap_ssc".to_string())
            .parse::<BoardVariant>()
            .map_err(|e| ConfigError::InvalidValue("TUTOR_BOARD".to_string(), e.to_string()))?;

        let validation_policy = match std::env::var("VALIDATION_POLICY") {
            Ok(raw) => raw.parse::<ValidationPolicy>().map_err(|e| {
                ConfigError::InvalidValue("VALIDATION_POLICY".to_string(), e.to_string())
            })?,
            Err(_) => board.default_policy(),
        };

        let provider_str =
            std::env::var("COMPLETION_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "gemini" => Provider::Gemini,
            "openai" => Provider::OpenAI,
            other => {
                return Err(ConfigError::InvalidValue(
                    "COMPLETION_PROVIDER".to_string(),
                    format!("'{}' is not one of: gemini, openai", other),
                ));
            }
        };

        let gemini_api_key = non_empty_var("GEMINI_API_KEY");
        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        let openai_api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let chat_model =
            std::env::var("CHAT_MODEL").unwrap_or_else(|_| provider.default_model().to_string());

        let timeout_str = std::env::var("UPSTREAM_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let upstream_timeout = match timeout_str.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue(
                    "UPSTREAM_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                ));
            }
        };

        let curriculum_path = std::env::var("CURRICULUM_PATH").ok().map(PathBuf::from);

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        match provider {
            Provider::Gemini => {
                if gemini_api_key.is_none() {
                    return Err(ConfigError::MissingVar(
                        "GEMINI_API_KEY must be set for 'gemini' provider".to_string(),
                    ));
                }
            }
            Provider::OpenAI => {
                if openai_api_key.is_none() {
                    return Err(ConfigError::MissingVar(
                        "OPENAI_API_KEY must be set for 'openai' provider".to_string(),
                    ));
                }
            }
        }

        Ok(Self {
            bind_address,
            board,
            validation_policy,
            provider,
            gemini_api_key,
            openai_api_key,
            openai_api_base,
            chat_model,
            upstream_timeout,
            curriculum_path,
            log_level,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("TUTOR_BOARD");
            env::remove_var("VALIDATION_POLICY");
            env::remove_var("COMPLETION_PROVIDER");
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("OPENAI_API_BASE");
            env::remove_var("CHAT_MODEL");
            env::remove_var("UPSTREAM_TIMEOUT_SECS");
            env::remove_var("CURRICULUM_PATH");
            env::remove_var("RUST_LOG");
        }
    }

    fn set_minimal_env_gemini() {
        unsafe {
            env::set_var("GEMINI_API_KEY", "test-gemini-key");
        }
    }

    #[test]
    fn test_config_error_display() {
        let missing_var = ConfigError::MissingVar("TEST_VAR".to_string());
        assert_eq!(
            format!("{}", missing_var),
            "Missing environment variable: TEST_VAR"
        );

        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_minimal_gemini() {
        clear_env_vars();
        set_minimal_env_gemini();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8000");
        assert_eq!(config.board, BoardVariant::ApSsc);
        assert_eq!(config.validation_policy, ValidationPolicy::STRICT);
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.gemini_api_key, Some("test-gemini-key".to_string()));
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.chat_model, "gemini-2.5-flash-lite");
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.curriculum_path, None);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    #[serial]
    fn test_config_board_sets_default_policy() {
        clear_env_vars();
        set_minimal_env_gemini();
        unsafe {
            env::set_var("TUTOR_BOARD", "cbse");
        }

        let config = Config::from_env().expect("Config should load successfully");
        assert_eq!(config.board, BoardVariant::Cbse);
        assert_eq!(config.validation_policy, ValidationPolicy::SUBJECT_ONLY);
    }

    #[test]
    #[serial]
    fn test_config_policy_override() {
        clear_env_vars();
        set_minimal_env_gemini();
        unsafe {
            env::set_var("TUTOR_BOARD", "icse");
            env::set_var("VALIDATION_POLICY", "strict");
        }

        let config = Config::from_env().expect("Config should load successfully");
        assert_eq!(config.board, BoardVariant::Icse);
        assert_eq!(config.validation_policy, ValidationPolicy::STRICT);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("COMPLETION_PROVIDER", "openai");
            env::set_var("OPENAI_API_KEY", "custom-openai-key");
            env::set_var("OPENAI_API_BASE", "http://localhost:11434/v1");
            env::set_var("CHAT_MODEL", "gpt-4o");
            env::set_var("UPSTREAM_TIMEOUT_SECS", "12");
            env::set_var("CURRICULUM_PATH", "/etc/tutor/curriculum.json");
            env::set_var("RUST_LOG", "debug");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.provider, Provider::OpenAI);
        assert_eq!(config.openai_api_key, Some("custom-openai-key".to_string()));
        assert_eq!(config.openai_api_base, "http://localhost:11434/v1");
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.upstream_timeout, Duration::from_secs(12));
        assert_eq!(
            config.curriculum_path,
            Some(PathBuf::from("/etc/tutor/curriculum.json"))
        );
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    #[serial]
    fn test_config_openai_default_model() {
        clear_env_vars();
        unsafe {
            env::set_var("COMPLETION_PROVIDER", "OpenAI");
            env::set_var("OPENAI_API_KEY", "key");
        }

        let config = Config::from_env().expect("Config should load successfully");
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.openai_api_base, "https://api.openai.com/v1");
    }

    #[test]
    #[serial]
    fn test_config_missing_gemini_key() {
        clear_env_vars();

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::MissingVar(msg) => {
                assert!(msg.contains("GEMINI_API_KEY"));
            }
            _ => panic!("Expected MissingVar for GEMINI_API_KEY"),
        }
    }

    #[test]
    #[serial]
    fn test_config_blank_key_counts_as_missing() {
        clear_env_vars();
        unsafe {
            env::set_var("GEMINI_API_KEY", "   ");
        }

        assert!(matches!(
            Config::from_env().unwrap_err(),
            ConfigError::MissingVar(_)
        ));
    }

    #[test]
    #[serial]
    fn test_config_missing_openai_key() {
        clear_env_vars();
        unsafe {
            env::set_var("COMPLETION_PROVIDER", "openai");
            env::set_var("GEMINI_API_KEY", "present-but-irrelevant");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::MissingVar(msg) => {
                assert!(msg.contains("OPENAI_API_KEY"));
            }
            _ => panic!("Expected MissingVar for OPENAI_API_KEY"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_values() {
        let cases = [
            ("BIND_ADDRESS", "not-a-valid-address"),
            ("TUTOR_BOARD", "state-board"),
            ("VALIDATION_POLICY", "lenient"),
            ("COMPLETION_PROVIDER", "anthropic"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
            ("UPSTREAM_TIMEOUT_SECS", "soon"),
            ("RUST_LOG", "not-a-level"),
        ];

        for (var_name, value) in cases {
            clear_env_vars();
            set_minimal_env_gemini();
            unsafe {
                env::set_var(var_name, value);
            }

            match Config::from_env().unwrap_err() {
                ConfigError::InvalidValue(var, _) => assert_eq!(var, var_name),
                other => panic!("Expected InvalidValue for {}, got {:?}", var_name, other),
            }
        }
    }
}
