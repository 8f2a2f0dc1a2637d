//! Error types for VoiceGrid.

use std::io;

/// Errors produced by the VoiceGrid framework.
#[derive(Debug, thiserror::Error)]
pub enum VoiceGridError {
    #[error("speech error: {0}")]
    Speech(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VoiceGridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_error_display() {
        let e = VoiceGridError::Speech("engine unavailable".into());
        assert_eq!(format!("{e}"), "speech error: engine unavailable");
    }

    #[test]
    fn content_error_display() {
        let e = VoiceGridError::Content("pool missing".into());
        assert_eq!(format!("{e}"), "content error: pool missing");
    }

    #[test]
    fn config_error_display() {
        let e = VoiceGridError::Config("missing key".into());
        assert_eq!(format!("{e}"), "config error: missing key");
    }

    #[test]
    fn storage_error_display() {
        let e = VoiceGridError::Storage("record not found".into());
        assert_eq!(format!("{e}"), "storage error: record not found");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: VoiceGridError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let bad_toml = "this is [[[not valid toml";
        let toml_err = toml::from_str::<toml::Value>(bad_toml).unwrap_err();
        let e: VoiceGridError = toml_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: VoiceGridError = json_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("JSON error"));
    }

    #[test]
    fn error_is_debug() {
        let e = VoiceGridError::Speech("test".into());
        let dbg = format!("{e:?}");
        assert!(dbg.contains("Speech"));
    }

    #[test]
    fn result_alias_ok() {
        let r: Result<i32> = Ok(42);
        assert_eq!(r.unwrap(), 42);
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(VoiceGridError::Config("oops".into()));
        assert!(r.is_err());
    }
}
