use aconv_core::store::{parse_settings, render_settings, upsert, validate_entry, KeyValueStore, Sections};
use aconv_core::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const APP_NAME: &str = "aconv";
const SETTINGS_FILE: &str = "Settings.ini";

/// Settings persisted to `<dir>/Settings.ini`.
///
/// The file is read on first access and rewritten on every mutation that
/// changes a value. Concurrent processes race on the file; the last write wins.
#[derive(Debug)]
pub struct FileStore {
    dir: Option<PathBuf>,
    sections: Option<Sections>,
    dirty: bool,
}

impl FileStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            sections: None,
            dirty: false,
        }
    }

    /// Uses `dir` when given, otherwise `<platform config dir>/aconv`.
    pub fn in_config_dir(dir: Option<PathBuf>) -> Self {
        Self::new(dir.or_else(|| dirs_next::config_dir().map(|d| d.join(APP_NAME))))
    }

    pub fn path(&self) -> Result<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(SETTINGS_FILE))
            .ok_or_else(|| {
                Error::PersistenceFailure("Unable to determine config directory".to_string())
            })
    }

    fn load(&mut self) -> Result<&mut Sections> {
        if self.sections.is_none() {
            let path = self.path()?;
            let sections = match fs::read_to_string(&path) {
                Ok(content) => parse_settings(&content),
                Err(e) if e.kind() == ErrorKind::NotFound => Sections::new(),
                Err(e) => {
                    return Err(Error::PersistenceFailure(format!(
                        "Failed to read {}: {e}",
                        path.display()
                    )))
                }
            };
            log::debug!("Loaded settings from {}", path.display());
            self.sections = Some(sections);
            self.dirty = false;
        }

        Ok(self.sections.get_or_insert_with(Sections::new))
    }

    /// Writes the settings file if anything changed since the last save.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let Some(sections) = &self.sections else {
            return Ok(());
        };

        let path = self.path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::PersistenceFailure(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        fs::write(&path, render_settings(sections)).map_err(|e| {
            Error::PersistenceFailure(format!("Failed to write {}: {e}", path.display()))
        })?;

        log::debug!("Saved settings to {}", path.display());
        self.dirty = false;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn value(&mut self, category: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .load()?
            .get(category)
            .and_then(|properties| properties.get(name))
            .cloned())
    }

    fn set_value(&mut self, category: &str, name: &str, value: &str) -> Result<()> {
        validate_entry(category, name, value)?;
        if upsert(self.load()?, category, name, value) {
            self.dirty = true;
            self.save()?;
        }
        Ok(())
    }
}
