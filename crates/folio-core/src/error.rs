#![forbid(unsafe_code)]

//! Error type shared by the core components and the web host.

/// Failures surfaced by folio components.
///
/// Most components never fail: a missing root element simply disables them.
/// The variants here cover the few paths that do.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    /// A contact form field looked up by id does not exist.
    #[error("contact form field `#{0}` not found")]
    MissingField(String),

    /// The host environment rejected an operation (DOM call threw, etc.).
    #[error("host error: {0}")]
    Host(String),

    /// Configuration parsed but failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result alias for folio operations.
pub type Result<T, E = FolioError> = std::result::Result<T, E>;
