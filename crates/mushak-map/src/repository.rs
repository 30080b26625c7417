//! Mapping Repository for persisting and reusing header mappings.
//!
//! Suppliers tend to send the same misspelled headers month after month, so a
//! resolved mapping can be stored under a profile name and replayed on the
//! next import.
//!
//! # Storage Format
//!
//! Each profile is a pretty-printed JSON file named `{PROFILE}.json`, where
//! the profile name is uppercased and non-alphanumerics become `_`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mushak_model::MappingConfig;

/// Directory-backed store of named mapping profiles.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

/// Metadata about a stored profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub profile: String,
    pub file_path: PathBuf,
    pub mapping_count: usize,
    pub saved_at: Option<String>,
}

/// Mapping config with repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMappingConfig {
    pub profile: String,
    #[serde(flatten)]
    pub config: MappingConfig,
    /// RFC 3339 timestamp of the save.
    pub saved_at: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredMappingConfig {
    pub fn new(profile: impl Into<String>, config: MappingConfig) -> Self {
        Self {
            profile: profile.into(),
            config,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            description: None,
            version: default_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl MappingRepository {
    /// Open a repository, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!(
                "Failed to create mapping repository: {}",
                base_dir.display()
            )
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn save(&self, profile: &str, config: &MappingConfig) -> Result<PathBuf> {
        self.save_stored(&StoredMappingConfig::new(profile, config.clone()))
    }

    pub fn save_stored(&self, stored: &StoredMappingConfig) -> Result<PathBuf> {
        let path = self.profile_path(&stored.profile);
        let json = serde_json::to_string_pretty(stored)
            .with_context(|| format!("Failed to serialize mapping profile {}", stored.profile))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write mapping to {}", path.display()))?;
        Ok(path)
    }

    /// Load a profile; `None` if it was never saved.
    pub fn load(&self, profile: &str) -> Result<Option<MappingConfig>> {
        Ok(self.load_stored(profile)?.map(|stored| stored.config))
    }

    pub fn load_stored(&self, profile: &str) -> Result<Option<StoredMappingConfig>> {
        let path = self.profile_path(profile);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read mapping from {}", path.display()))?;
        let stored = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse mapping from {}", path.display()))?;
        Ok(Some(stored))
    }

    /// All readable profiles, sorted by name. Unparseable files are skipped.
    pub fn list(&self) -> Result<Vec<ProfileMetadata>> {
        let mut metadata = Vec::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read repository: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(stored) = serde_json::from_str::<StoredMappingConfig>(&contents) {
                metadata.push(ProfileMetadata {
                    profile: stored.profile,
                    file_path: path,
                    mapping_count: stored.config.mappings.len(),
                    saved_at: stored.saved_at,
                });
            }
        }
        metadata.sort_by(|a, b| a.profile.cmp(&b.profile));
        Ok(metadata)
    }

    pub fn delete(&self, profile: &str) -> Result<bool> {
        let path = self.profile_path(profile);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete mapping: {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn exists(&self, profile: &str) -> bool {
        self.profile_path(profile).exists()
    }

    fn profile_path(&self, profile: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_id(profile)))
    }
}

/// Normalize a profile name for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Read a standalone mapping file.
pub fn load_mapping_file(path: &Path) -> Result<MappingConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse mapping file {}", path.display()))
}

/// Write a standalone mapping file.
pub fn save_mapping_file(path: &Path, config: &MappingConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("Failed to serialize mapping")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write mapping file {}", path.display()))
}
