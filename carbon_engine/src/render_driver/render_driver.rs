/// Render driver trait - the device collaborator behind every resource.
///
/// The resource system never talks to a graphics API directly. It asks the
/// driver for opaque device objects (textures, buffers, shaders, state
/// blocks), for shader compilation and for a handful of capability queries.

use crate::error::Result;

// ============================================================================
// Capability types
// ============================================================================

/// Graphics API behind the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderApi {
    Null,
    DirectX9,
    DirectX11,
    OpenGL,
}

impl RenderApi {
    /// Preprocessor macro injected into surface shader scripts
    pub fn shader_macro(&self) -> Option<&'static str> {
        match self {
            RenderApi::Null => None,
            RenderApi::DirectX9 => Some("DX9C"),
            RenderApi::DirectX11 => Some("DX11"),
            RenderApi::OpenGL => Some("GLSL"),
        }
    }

    /// Compiled shader cache extension for a stage (None = no disk cache)
    pub fn shader_cache_extension(&self, stage: ShaderStage) -> Option<&'static str> {
        match (self, stage) {
            (RenderApi::DirectX9, ShaderStage::Vertex) => Some("vs3"),
            (RenderApi::DirectX9, ShaderStage::Pixel) => Some("ps3"),
            (RenderApi::DirectX11, ShaderStage::Vertex) => Some("vs4"),
            (RenderApi::DirectX11, ShaderStage::Pixel) => Some("ps4"),
            (RenderApi::Null, _) | (RenderApi::OpenGL, _) => None,
        }
    }
}

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// Memory pool a device object is allocated from
///
/// Objects in the `Default` pool are lost when the device is lost;
/// `Managed` and `SystemMemory` objects survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryPool {
    #[default]
    Default,
    Managed,
    SystemMemory,
}

impl MemoryPool {
    pub fn survives_device_loss(&self) -> bool {
        !matches!(self, MemoryPool::Default)
    }
}

/// Element formats for vertex and index data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum BufferFormat {
    R16_UINT,
    R32_UINT,
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32_SFLOAT,
    R32G32B32A32_SFLOAT,
    R8G8B8A8_UNORM,
}

impl BufferFormat {
    /// Size of one element in bytes
    pub fn size_bytes(&self) -> u32 {
        match self {
            BufferFormat::R16_UINT => 2,
            BufferFormat::R32_UINT | BufferFormat::R32_SFLOAT | BufferFormat::R8G8B8A8_UNORM => 4,
            BufferFormat::R32G32_SFLOAT => 8,
            BufferFormat::R32G32B32_SFLOAT => 12,
            BufferFormat::R32G32B32A32_SFLOAT => 16,
        }
    }
}

// ============================================================================
// Device objects
// ============================================================================

/// Opaque device object id issued by a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceObject(pub u64);

/// Kind of device object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceObjectKind {
    Texture,
    VertexBuffer,
    IndexBuffer,
    ConstantBuffer,
    RenderTarget,
    DepthStencilTarget,
    VertexShader,
    PixelShader,
    SamplerState,
    DepthStencilState,
    RasterizerState,
    BlendState,
}

/// Descriptor for creating a device object
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceObjectDesc {
    pub kind: DeviceObjectKind,
    /// Debug label
    pub label: String,
    /// Size in bytes (0 when not meaningful)
    pub size: u64,
    pub pool: MemoryPool,
}

// ============================================================================
// RenderDriver trait
// ============================================================================

/// Device collaborator used by the resource manager
///
/// Implementations use interior mutability; the manager shares one driver
/// between all the resources it creates.
pub trait RenderDriver: Send + Sync {
    /// Active graphics API
    fn api(&self) -> RenderApi;

    /// Is shader debugging enabled for a stage? (disables the compiled cache)
    fn is_shader_debug_enabled(&self, stage: ShaderStage) -> bool;

    /// Entry of the buffer-format table
    fn supports_buffer_format(&self, format: BufferFormat) -> bool;

    /// Allocate a device object
    fn create_object(&self, desc: &DeviceObjectDesc) -> Result<DeviceObject>;

    /// Release a device object
    fn destroy_object(&self, object: DeviceObject);

    /// Compile shader source into driver bytecode
    fn compile_shader(
        &self,
        stage: ShaderStage,
        source: &str,
        entry_point: &str,
        macros: &[&str],
    ) -> Result<Vec<u8>>;
}
