use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read store file {0}")]
    Read(std::io::Error),
    #[error("Failed to write store file {0}")]
    Write(std::io::Error),
    #[error("Store file is not a JSON object of strings {0}")]
    Corrupt(serde_json::Error),
    #[error("Stored value for {key} is malformed {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode value {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Store lock was poisoned by a panicking writer")]
    Poisoned,
}
