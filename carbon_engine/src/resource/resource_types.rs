/// Resource identity and classification types.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use bitflags::bitflags;
use slotmap::new_key_type;

// ===== IDS =====

/// First reference id reserved for internal (never persisted) resources
pub const INTERNAL_REF_THRESHOLD: u32 = 0x8000_0000;

static NEXT_INTERNAL_REF: AtomicU32 = AtomicU32::new(INTERNAL_REF_THRESHOLD);

/// 32-bit reference id, unique for the lifetime of the process
///
/// Ids at or above `INTERNAL_REF_THRESHOLD` are internal; ids below it are
/// persisted rows of the world database. Zero means "no reference".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourceId(pub u32);

impl ResourceId {
    pub const NONE: ResourceId = ResourceId(0);

    /// Issue the next internal id
    pub fn next_internal() -> Self {
        ResourceId(NEXT_INTERNAL_REF.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn is_internal(&self) -> bool {
        self.0 >= INTERNAL_REF_THRESHOLD
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

new_key_type! {
    /// Slot of a resident resource inside its manager
    pub struct ResourceKey;
}

// ===== KIND =====

/// Closed set of resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    VertexBuffer,
    IndexBuffer,
    ConstantBuffer,
    SurfaceShader,
    VertexShader,
    PixelShader,
    Mesh,
    Material,
    RenderTarget,
    DepthStencilTarget,
    AnimationSet,
    AudioBuffer,
    Script,
    SamplerState,
    DepthStencilState,
    RasterizerState,
    BlendState,
}

impl ResourceKind {
    pub const COUNT: usize = 18;

    /// All kinds, in resource list order (device broadcasts follow this)
    pub const ALL: [ResourceKind; Self::COUNT] = [
        ResourceKind::Texture,
        ResourceKind::VertexBuffer,
        ResourceKind::IndexBuffer,
        ResourceKind::ConstantBuffer,
        ResourceKind::SurfaceShader,
        ResourceKind::VertexShader,
        ResourceKind::PixelShader,
        ResourceKind::Mesh,
        ResourceKind::Material,
        ResourceKind::RenderTarget,
        ResourceKind::DepthStencilTarget,
        ResourceKind::AnimationSet,
        ResourceKind::AudioBuffer,
        ResourceKind::Script,
        ResourceKind::SamplerState,
        ResourceKind::DepthStencilState,
        ResourceKind::RasterizerState,
        ResourceKind::BlendState,
    ];

    /// Order of sections in the outstanding resource report
    pub const REPORT_ORDER: [ResourceKind; Self::COUNT] = [
        ResourceKind::Texture,
        ResourceKind::RenderTarget,
        ResourceKind::DepthStencilTarget,
        ResourceKind::VertexBuffer,
        ResourceKind::IndexBuffer,
        ResourceKind::ConstantBuffer,
        ResourceKind::Mesh,
        ResourceKind::AnimationSet,
        ResourceKind::AudioBuffer,
        ResourceKind::Script,
        ResourceKind::Material,
        ResourceKind::SurfaceShader,
        ResourceKind::VertexShader,
        ResourceKind::PixelShader,
        ResourceKind::SamplerState,
        ResourceKind::DepthStencilState,
        ResourceKind::RasterizerState,
        ResourceKind::BlendState,
    ];

    /// Position of this kind's resource list
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Plural display label
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Texture => "Textures",
            ResourceKind::VertexBuffer => "Vertex Buffers",
            ResourceKind::IndexBuffer => "Index Buffers",
            ResourceKind::ConstantBuffer => "Constant Buffers",
            ResourceKind::SurfaceShader => "Surface Shaders",
            ResourceKind::VertexShader => "Vertex Shaders",
            ResourceKind::PixelShader => "Pixel Shaders",
            ResourceKind::Mesh => "Meshes",
            ResourceKind::Material => "Materials",
            ResourceKind::RenderTarget => "Render Targets",
            ResourceKind::DepthStencilTarget => "Depth Stencil Targets",
            ResourceKind::AnimationSet => "Animation Sets",
            ResourceKind::AudioBuffer => "Audio Buffers",
            ResourceKind::Script => "Scripts",
            ResourceKind::SamplerState => "Sampler States",
            ResourceKind::DepthStencilState => "DepthStencil States",
            ResourceKind::RasterizerState => "Rasterizer States",
            ResourceKind::BlendState => "Blend States",
        }
    }
}

// ===== FLAGS =====

bitflags! {
    /// Management flags supplied with every create/load request
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceFlags: u32 {
        /// Keep the manager's reference alive with zero external handles
        const ALWAYS_RESIDENT = 0x1;
        /// Register now, load on first use
        const DEFERRED_LOAD = 0x2;
        /// Skip deduplication and always construct a new resource
        const FORCE_NEW = 0x4;
    }
}

// ===== PROVENANCE =====

/// Caller location recorded for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebugSource {
    pub file: &'static str,
    pub line: u32,
}

impl DebugSource {
    pub const UNKNOWN: DebugSource = DebugSource { file: "<unknown>", line: 0 };
}

impl fmt::Display for DebugSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.file, self.line)
    }
}

/// Capture the current file and line as a `DebugSource`
#[macro_export]
macro_rules! debug_source {
    () => {
        $crate::carbon::resource::DebugSource { file: file!(), line: line!() }
    };
}

#[cfg(test)]
#[path = "resource_types_tests.rs"]
mod tests;
