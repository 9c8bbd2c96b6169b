use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },
}

impl SiteError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::Http(_) => "Could not reach the remote endpoint.".to_string(),
            SiteError::Io(e) => format!("A file could not be read or written: {}", e),
            SiteError::Serialization(_) => "Stored data is not valid JSON.".to_string(),
            SiteError::Url(e) => format!("The address is not a valid URL: {}", e),
            SiteError::ConfigParse { message } => {
                format!("The configuration file could not be parsed: {}", message)
            }
            SiteError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field `{}` is invalid: {}", field, reason)
            }
            SiteError::InvalidSelector { selector, reason } => {
                format!("Selector `{}` is invalid: {}", selector, reason)
            }
            SiteError::StorageUnavailable { .. } => {
                "Preference storage is unavailable; defaults will be used.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::Http(_) => "Check the network connection and the form endpoint.",
            SiteError::Io(_) => "Check that the path exists and is writable.",
            SiteError::Serialization(_) => "Delete the store file to start from defaults.",
            SiteError::Url(_) => "Use an absolute http(s) URL or a path relative to the page.",
            SiteError::ConfigParse { .. } => "Fix the TOML syntax in the configuration file.",
            SiteError::InvalidConfigValue { .. } => {
                "Correct the field or remove it to use the default."
            }
            SiteError::InvalidSelector { .. } => {
                "Use tag, #id, .class and [attr] / [attr=value] parts joined by spaces or `>`."
            }
            SiteError::StorageUnavailable { .. } => "Nothing to do; the theme resets on load.",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
