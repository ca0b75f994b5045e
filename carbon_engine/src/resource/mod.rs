//! Resource management module
//!
//! Provides deduplicated, reference-counted storage of every engine
//! resource with delayed garbage collection.

mod resource_types;
mod resource;
mod handle;
mod garbage;
mod identity;
mod shader_identifier;
mod device_backing;
mod database;
mod resource_manager;
pub mod texture;
pub mod buffer;
pub mod render_target;
pub mod states;
pub mod shader;
pub mod script;
pub mod surface_shader;
pub mod material;
pub mod mesh;
pub mod animation_set;
pub mod audio_buffer;

#[cfg(test)]
mod test_support;

pub use resource_types::{
    DebugSource, ResourceFlags, ResourceId, ResourceKey, ResourceKind, INTERNAL_REF_THRESHOLD,
};
pub use resource::Resource;
pub use handle::ResourceHandle;
pub use garbage::GarbageSchedule;
pub use identity::IdentityKey;
pub use shader_identifier::{ShaderIdentifier, SourceFileInfo};
pub use device_backing::DeviceBacking;
pub use database::database_resource_name;
pub use resource_manager::{
    should_force_internal, ResourceManager, ResourceManagerDesc, GARBAGE_COLLECT_INTERVAL,
};
pub use texture::{resolve_mip_levels, ImageInfo, Texture, TextureHandle};
pub use buffer::{Buffer, BufferHandle, BufferUsage, ConstantBufferDesc};
pub use render_target::{RenderTarget, RenderTargetHandle};
pub use states::{
    AddressingMode, BlendMode, BlendOp, BlendState, BlendStateDesc, BlendStateHandle,
    ComparisonFunction, CullMode, DepthStencilState, DepthStencilStateDesc,
    DepthStencilStateHandle, FillMode, FilterMethod, RasterizerState, RasterizerStateDesc,
    RasterizerStateHandle, RenderState, SamplerState, SamplerStateDesc, SamplerStateHandle,
    StateDesc, StencilOp, StencilOpDesc, TargetBlendDesc,
};
pub use shader::{Shader, ShaderHandle, SHADER_CACHE_DIRECTORY};
pub use script::{script_uid, Script, ScriptHandle, DEFAULT_SCRIPT_INSTANCE};
pub use surface_shader::{SurfaceShader, SurfaceShaderHandle};
pub use material::{Material, MaterialHandle, MaterialType, DEFAULT_MATERIAL_NAME};
pub use mesh::{Mesh, MeshHandle, MESH_TABLE, MESH_VERTEX_STRIDE};
pub use animation_set::{AnimationSet, AnimationSetHandle, ANIMATION_SET_TABLE};
pub use audio_buffer::{AudioBuffer, AudioBufferHandle, AudioFlagMatching, SoundFlags};
