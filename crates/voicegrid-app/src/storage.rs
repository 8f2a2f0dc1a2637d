//! Narrow persistence seam for the settings record.
//!
//! Screens never touch files; they go through `RecordStore`. The only
//! shipped implementation writes the record as TOML next to wherever the
//! front end points it.

use std::fs;
use std::path::PathBuf;

use voicegrid_types::config::VoiceGridConfig;
use voicegrid_types::error::Result;

/// Load/save for the settings record.
pub trait RecordStore {
    /// Load the record, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<VoiceGridConfig>>;

    /// Persist the record.
    fn save(&self, config: &VoiceGridConfig) -> Result<()>;
}

/// TOML file store.
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl RecordStore for TomlFileStore {
    fn load(&self) -> Result<Option<VoiceGridConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(VoiceGridConfig::from_toml(&text)?))
    }

    fn save(&self, config: &VoiceGridConfig) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, config.to_toml()?)?;
        Ok(())
    }
}
