//! Error types for glint

use thiserror::Error;

/// The main error type for glint operations
#[derive(Debug, Error)]
pub enum GlintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Script compile error: {0}")]
    ScriptCompile(String),

    #[error("Script error in {callback}: {message}")]
    ScriptRuntime { callback: String, message: String },

    #[error("App is already running")]
    AlreadyRunning,

    #[error("Script never called run()")]
    NoRunRequested,

    #[error("Window error: {0}")]
    Window(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Image error: {0}")]
    Image(String),
}

impl GlintError {
    /// Build a script runtime error for the named callback
    pub fn script(callback: impl Into<String>, message: impl ToString) -> Self {
        GlintError::ScriptRuntime {
            callback: callback.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for glint operations
pub type Result<T> = std::result::Result<T, GlintError>;

impl From<toml::de::Error> for GlintError {
    fn from(err: toml::de::Error) -> Self {
        GlintError::ConfigParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_error_display_names_callback() {
        let err = GlintError::script("frame", "undefined variable: x");
        assert_eq!(err.to_string(), "Script error in frame: undefined variable: x");
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("window = [");
        let err: GlintError = parsed.unwrap_err().into();
        assert!(matches!(err, GlintError::ConfigParse(_)));
    }
}
