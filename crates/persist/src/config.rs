use std::path::{Path, PathBuf};

/// File name used inside the data directory unless overridden.
pub const DEFAULT_FILE_NAME: &str = "spawns.yml";

/// Where the spawn document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Per-plugin data directory handed out by the host. Created on first save.
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Full path of the spawn document.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_name_is_spawns_yml() {
        let config = StoreConfig::new("/srv/plugins/spawns");
        assert_eq!(config.path(), PathBuf::from("/srv/plugins/spawns/spawns.yml"));
    }

    #[test]
    fn file_name_override() {
        let config = StoreConfig::new("data").with_file_name("hub.yml");
        assert_eq!(config.path(), Path::new("data").join("hub.yml"));
        assert_eq!(config.data_dir(), Path::new("data"));
    }
}
