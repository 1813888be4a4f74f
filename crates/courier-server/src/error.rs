use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: set the {env_var} environment variable")]
    MissingEnvVar { env_var: String },

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

/// Map a settings field path like `webhook.reply_timeout_ms` back to the
/// environment variable that provides it.
pub fn to_env_var(field: &str) -> String {
    format!("COURIER_{}", field.replace('.', "__").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("server.port"), "COURIER_SERVER__PORT");
        assert_eq!(
            to_env_var("webhook.reply_timeout_ms"),
            "COURIER_WEBHOOK__REPLY_TIMEOUT_MS"
        );
    }
}
