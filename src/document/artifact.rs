use super::model::Document;
use crate::error::ConvertError;
use std::fs;
use std::path::Path;

impl Document {
    /// Renders the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the document to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent.display().to_string(), e))?;
        }
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|e| ConvertError::io(path.display().to_string(), e))
    }

    /// Loads a document previously written by [`Document::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|e| ConvertError::io(path.display().to_string(), e))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(text)?)
    }
}
