/// Audio buffer resources.
///
/// Loading a sound whose stream is already resident as a non-streaming
/// buffer with matching sound flags duplicates that buffer: the new
/// resource shares the decoded samples instead of reading the file again.

use std::any::Any;
use std::sync::Arc;
use bitflags::bitflags;
use crate::error::{Error, Result};
use crate::resource::{
    DebugSource, Resource, ResourceFlags, ResourceHandle, ResourceId, ResourceKey, ResourceKind,
    ResourceManager,
};
use crate::system::{InputStream, StreamType};
use crate::engine_warn;

pub type AudioBufferHandle = ResourceHandle<AudioBuffer>;

bitflags! {
    /// Playback capabilities requested for a sound
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SoundFlags: u32 {
        const STREAMING = 0x1;
        const POSITIONAL = 0x2;
        const LOOPING = 0x4;
    }
}

/// How an existing buffer's sound flags must match a request to be reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFlagMatching {
    /// Flags must be equal
    #[default]
    Exact,
    /// Any buffer with non-empty flags matches, whatever was requested
    Legacy,
}

impl AudioFlagMatching {
    pub fn matches(&self, requested: SoundFlags, existing: SoundFlags) -> bool {
        match self {
            AudioFlagMatching::Exact => requested == existing,
            AudioFlagMatching::Legacy => !existing.is_empty(),
        }
    }
}

pub struct AudioBuffer {
    stream: InputStream,
    sound_flags: SoundFlags,
    samples: Option<Arc<[u8]>>,
    duplicate: bool,
}

impl AudioBuffer {
    fn from_stream(stream: InputStream, sound_flags: SoundFlags) -> Self {
        Self { stream, sound_flags, samples: None, duplicate: false }
    }

    fn duplicate_of(other: &AudioBuffer) -> Self {
        Self {
            stream: other.stream.clone(),
            sound_flags: other.sound_flags,
            samples: other.samples.clone(),
            duplicate: true,
        }
    }

    pub fn stream_name(&self) -> &str {
        self.stream.name()
    }

    pub fn sound_flags(&self) -> SoundFlags {
        self.sound_flags
    }

    pub fn is_streaming(&self) -> bool {
        self.sound_flags.contains(SoundFlags::STREAMING)
    }

    /// Was this buffer duplicated from a resident one?
    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }

    /// Sample data (None until loaded)
    pub fn samples(&self) -> Option<&Arc<[u8]>> {
        self.samples.as_ref()
    }

    /// Do both buffers share one sample allocation?
    pub fn shares_samples_with(&self, other: &AudioBuffer) -> bool {
        match (&self.samples, &other.samples) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Resource for AudioBuffer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::AudioBuffer
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        if self.samples.is_none() {
            let bytes = self.stream.read_all()?;
            self.samples = Some(Arc::from(bytes));
        }
        Ok(())
    }

    fn unload(&mut self) {
        self.samples = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    fn find_audio_buffer(&self, name: &str, sound_flags: SoundFlags) -> Option<ResourceKey> {
        if name.is_empty() {
            return None;
        }
        let matching = self.audio_flag_matching();
        self.keys_of(ResourceKind::AudioBuffer).into_iter().find(|key| {
            self.cell(*key).is_some_and(|cell| {
                cell.state().name == name
                    && cell
                        .object()
                        .as_any()
                        .downcast_ref::<AudioBuffer>()
                        .is_some_and(|b| matching.matches(sound_flags, b.sound_flags))
            })
        })
    }

    /// Load a sound, duplicating a resident non-streaming buffer of the
    /// same stream when one matches
    pub fn load_audio_buffer(
        &mut self,
        stream: &InputStream,
        sound_flags: SoundFlags,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<AudioBufferHandle> {
        self.pump_releases();
        let duplicate = self.find_audio_buffer(stream.name(), sound_flags).and_then(|key| {
            let cell = self.cell(key)?;
            let object = cell.object();
            object
                .as_any()
                .downcast_ref::<AudioBuffer>()
                .filter(|b| !b.is_streaming())
                .map(AudioBuffer::duplicate_of)
        });

        let buffer = match duplicate {
            Some(buffer) => buffer,
            None => {
                if stream.stream_type() == StreamType::None {
                    engine_warn!(
                        "carbon::ResourceManager",
                        "Unable to load audio buffer '{}' because the file or resource was not found.",
                        stream.name()
                    );
                    return Err(Error::NotFound(stream.name().to_string()));
                }
                AudioBuffer::from_stream(stream.clone(), sound_flags)
            }
        };
        self.process_new(
            ResourceId::next_internal(),
            buffer,
            stream.name().to_string(),
            stream.stream_type(),
            flags,
            source,
        )
    }

    /// Find a resident audio buffer by name and sound flags
    pub fn get_audio_buffer(&mut self, name: &str, sound_flags: SoundFlags) -> Option<AudioBufferHandle> {
        self.pump_releases();
        let key = self.find_audio_buffer(name, sound_flags)?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "audio_buffer_tests.rs"]
mod tests;
