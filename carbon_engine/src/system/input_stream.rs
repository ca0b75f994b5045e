/// Input streams and logical path resolution.
///
/// Resources are requested by stream. A stream carries the logical name
/// used for deduplication (e.g. `sky.dds`) and the backing data source,
/// which may be absent (`StreamType::None`).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};

/// Kind of data source behind a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    /// Nothing backs the stream (file missing, or never supplied)
    None,
    File,
    RemoteFile,
    MappedFile,
    Memory,
}

#[derive(Debug, Clone)]
enum StreamSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
    Missing,
}

/// Named data source
#[derive(Debug, Clone)]
pub struct InputStream {
    name: String,
    source: StreamSource,
}

impl InputStream {
    /// Stream backed by a file on disk
    pub fn from_file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: StreamSource::File(path.into()),
        }
    }

    /// Stream backed by an in-memory buffer
    pub fn from_memory(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: StreamSource::Memory(data.into()),
        }
    }

    /// Named stream with no backing data
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: StreamSource::Missing,
        }
    }

    /// Logical name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved file path, if file backed
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            StreamSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Current stream type (a file stream whose file is missing reports None)
    pub fn stream_type(&self) -> StreamType {
        match &self.source {
            StreamSource::File(path) if path.is_file() => StreamType::File,
            StreamSource::File(_) | StreamSource::Missing => StreamType::None,
            StreamSource::Memory(_) => StreamType::Memory,
        }
    }

    /// Read the full contents
    pub fn read_all(&self) -> Result<Vec<u8>> {
        match &self.source {
            StreamSource::File(path) => fs::read(path).map_err(|e| {
                Error::Io(format!("{} ({}): {}", self.name, path.display(), e))
            }),
            StreamSource::Memory(data) => Ok(data.to_vec()),
            StreamSource::Missing => Err(Error::NotFound(format!(
                "stream '{}' has no backing data",
                self.name
            ))),
        }
    }

    /// Read the full contents as UTF-8 text
    pub fn read_to_string(&self) -> Result<String> {
        let bytes = self.read_all()?;
        String::from_utf8(bytes)
            .map_err(|e| Error::InvalidResource(format!("stream '{}' is not UTF-8: {}", self.name, e)))
    }
}

/// Logical path resolver
///
/// `protocol://rest` paths (e.g. `sys://Cache/Shaders/abc.vs4`) resolve
/// against the directory registered for that protocol; anything else is
/// relative to the root.
#[derive(Debug, Clone)]
pub struct FileSystem {
    root: PathBuf,
    protocols: FxHashMap<String, PathBuf>,
}

impl FileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            protocols: FxHashMap::default(),
        }
    }

    /// Register the directory a protocol prefix maps to
    pub fn with_protocol(mut self, protocol: &str, directory: impl Into<PathBuf>) -> Self {
        self.protocols.insert(protocol.to_lowercase(), directory.into());
        self
    }

    /// Map a logical path to a real path
    pub fn resolve(&self, logical: &str) -> PathBuf {
        match logical.split_once("://") {
            Some((protocol, rest)) => {
                let base = self
                    .protocols
                    .get(&protocol.to_lowercase())
                    .unwrap_or(&self.root);
                base.join(rest)
            }
            None => self.root.join(logical),
        }
    }

    /// Open a stream for a logical path (never fails; check `stream_type`)
    pub fn open(&self, logical: &str) -> InputStream {
        InputStream::from_file(logical, self.resolve(logical))
    }

    /// Write a file at a logical path, creating parent directories
    pub fn write(&self, logical: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(logical);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        Ok(())
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
#[path = "input_stream_tests.rs"]
mod tests;
