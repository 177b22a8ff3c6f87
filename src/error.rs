//! Error type shared by the core and the wasm shell.

pub type SiteResult<T> = Result<T, SiteError>;

#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    /// A required element id or selector did not resolve.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// An element resolved but had the wrong DOM type.
    #[error("unexpected element type for {0}")]
    ElementType(String),

    #[error("config error: {0}")]
    Config(String),

    /// A browser API call threw; carries its stringified value.
    #[error("dom error: {0}")]
    Dom(String),
}

impl SiteError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement(what.into())
    }

    pub fn element_type(what: impl Into<String>) -> Self {
        Self::ElementType(what.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
