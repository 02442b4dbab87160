use thiserror::Error;

/// Failures turning submitted form values into a [`crate::ParameterSet`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
