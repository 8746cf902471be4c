use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Invalid Cipher: {0}")]
    InvalidCipher(String),

    /// Two keys where one is a prefix of the other cannot be decoded unambiguously.
    #[error("Ambiguous Cipher: key '{prefix}' is a prefix of key '{key}'")]
    AmbiguousCipher { prefix: String, key: String },
}

pub type CfResult<T> = Result<T, CipherForgeError>;
