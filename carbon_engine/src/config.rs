/// Resource system configuration.
///
/// Stored as TOML with a `[Resources]` table:
///
/// ```toml
/// [Resources]
/// CompressTextures = true
/// TextureMipLevels = 0
/// DefaultShader = "sys://Shaders/Default.sh"
/// ```
///
/// Missing keys fall back to their defaults.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// `[Resources]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceConfig {
    /// Compress textures on load
    pub compress_textures: bool,
    /// Mip levels to generate (0 = full chain, -1 = keep what the file contains)
    pub texture_mip_levels: i32,
    /// Surface shader script loaded at initialization (empty = none)
    pub default_shader: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            compress_textures: true,
            texture_mip_levels: 0,
            default_shader: String::new(),
        }
    }
}

/// Subset of the configuration applied when textures are loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitConfig {
    pub texture_mip_levels: i32,
    pub compress_textures: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(rename = "Resources", default)]
    resources: ResourceConfig,
}

impl ResourceConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str::<ConfigFile>(text)
            .map(|file| file.resources)
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        let file = ConfigFile { resources: self.clone() };
        toml::to_string(&file).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Write to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.to_toml_string()?;
        fs::write(path.as_ref(), text)?;
        Ok(())
    }

    pub fn init_config(&self) -> InitConfig {
        InitConfig {
            texture_mip_levels: self.texture_mip_levels,
            compress_textures: self.compress_textures,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
