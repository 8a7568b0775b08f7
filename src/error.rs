use thiserror::Error;

/// A rejected store call. The `Display` text is what the error view shows.
#[derive(Error, Debug)]
pub(crate) enum StoreError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Erreur {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No bill id to update")]
    MissingSelector,
}
