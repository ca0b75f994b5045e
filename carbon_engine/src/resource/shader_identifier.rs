/// Shader permutation identifier.
///
/// Uniquely identifies one compiled shader permutation: the source files
/// (with content hashes) that contributed to it, the generating identifier
/// (entry point / permutation name), the permutation parameter words and
/// the input signature hash.
///
/// Comparison checks the cheap integer fields first (source count, then
/// parameter count), then the identifier string, then the parameter words
/// and finally each source hash. The input signature hash does not take
/// part in identity.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use xxhash_rust::xxh3::xxh3_128;

/// One contributing source file
#[derive(Debug, Clone, Default)]
pub struct SourceFileInfo {
    pub name: String,
    /// 160-bit content hash
    pub hash: [u32; 5],
}

#[derive(Debug, Clone, Default)]
pub struct ShaderIdentifier {
    pub source_files: Vec<SourceFileInfo>,
    pub shader_identifier: String,
    pub parameter_data: Vec<u32>,
    pub input_signature_hash: [u32; 5],
}

fn sign(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

impl ShaderIdentifier {
    pub fn new(shader_identifier: impl Into<String>) -> Self {
        Self {
            shader_identifier: shader_identifier.into(),
            ..Default::default()
        }
    }

    /// Three-way comparison, zero when equal
    ///
    /// Count differences are reported as `other - self`.
    pub fn compare(&self, other: &ShaderIdentifier) -> i32 {
        let difference = other.source_files.len() as i64 - self.source_files.len() as i64;
        if difference != 0 {
            return difference.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        }

        let difference = other.parameter_data.len() as i64 - self.parameter_data.len() as i64;
        if difference != 0 {
            return difference.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        }

        let difference = sign(self.shader_identifier.cmp(&other.shader_identifier));
        if difference != 0 {
            return difference;
        }

        let mine: &[u8] = bytemuck::cast_slice(&self.parameter_data);
        let theirs: &[u8] = bytemuck::cast_slice(&other.parameter_data);
        let difference = sign(theirs.cmp(mine));
        if difference != 0 {
            return difference;
        }

        for (mine, theirs) in self.source_files.iter().zip(&other.source_files) {
            let mine: &[u8] = bytemuck::cast_slice(&mine.hash);
            let theirs: &[u8] = bytemuck::cast_slice(&theirs.hash);
            let difference = sign(theirs.cmp(mine));
            if difference != 0 {
                return difference;
            }
        }
        0
    }

    /// Content-addressed name used for the compiled shader cache
    pub fn hash_name(&self) -> String {
        let mut bytes = Vec::with_capacity(
            self.shader_identifier.len() + self.parameter_data.len() * 4 + self.source_files.len() * 20,
        );
        bytes.extend_from_slice(self.shader_identifier.as_bytes());
        bytes.extend_from_slice(bytemuck::cast_slice(&self.parameter_data));
        for file in &self.source_files {
            bytes.extend_from_slice(bytemuck::cast_slice(&file.hash));
        }
        format!("{:032x}", xxh3_128(&bytes))
    }
}

impl PartialEq for ShaderIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == 0
    }
}

impl Eq for ShaderIdentifier {}

impl PartialOrd for ShaderIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShaderIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).cmp(&0)
    }
}

impl Hash for ShaderIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shader_identifier.hash(state);
        self.parameter_data.hash(state);
        for file in &self.source_files {
            file.hash.hash(state);
        }
    }
}

#[cfg(test)]
#[path = "shader_identifier_tests.rs"]
mod tests;
