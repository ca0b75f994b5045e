/// Immutable render state blocks.
///
/// Sampler, depth-stencil, rasterizer and blend states are fully described
/// by a value type and deduplicated on that value: requesting the same
/// description twice yields the same resource. Floating point fields take
/// part in equality and hashing by their bit pattern, so two descriptions
/// match exactly when every field is identical.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use glam::Vec4;
use crate::error::Result;
use crate::render_driver::{DeviceObjectDesc, DeviceObjectKind, MemoryPool, RenderDriver};
use crate::resource::identity::IdentityKey;
use crate::resource::{
    DebugSource, DeviceBacking, Resource, ResourceFlags, ResourceHandle, ResourceId,
    ResourceKind, ResourceManager,
};
use crate::system::StreamType;

// ===== ENUMS =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMethod {
    None,
    Point,
    #[default]
    Linear,
    Anisotropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressingMode {
    #[default]
    Wrap,
    Mirror,
    Clamp,
    Border,
    MirrorOnce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonFunction {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    #[default]
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    IncrementSaturate,
    DecrementSaturate,
    Invert,
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    Wireframe,
    #[default]
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    Zero,
    #[default]
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DestAlpha,
    InvDestAlpha,
    DestColor,
    InvDestColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOp {
    #[default]
    Add,
    Subtract,
    RevSubtract,
    Min,
    Max,
}

// ===== DESCRIPTIONS =====

/// Sampler state description
#[derive(Debug, Clone, Copy)]
pub struct SamplerStateDesc {
    pub min_filter: FilterMethod,
    pub mag_filter: FilterMethod,
    pub mip_filter: FilterMethod,
    pub address_u: AddressingMode,
    pub address_v: AddressingMode,
    pub address_w: AddressingMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_function: ComparisonFunction,
    pub border_color: Vec4,
    pub min_lod: f32,
    pub max_lod: f32,
}

impl Default for SamplerStateDesc {
    fn default() -> Self {
        Self {
            min_filter: FilterMethod::Linear,
            mag_filter: FilterMethod::Linear,
            mip_filter: FilterMethod::Linear,
            address_u: AddressingMode::Wrap,
            address_v: AddressingMode::Wrap,
            address_w: AddressingMode::Wrap,
            mip_lod_bias: 0.0,
            max_anisotropy: 1,
            comparison_function: ComparisonFunction::Never,
            border_color: Vec4::ZERO,
            min_lod: f32::MIN,
            max_lod: f32::MAX,
        }
    }
}

type SamplerKey = (
    FilterMethod, FilterMethod, FilterMethod,
    AddressingMode, AddressingMode, AddressingMode,
    u32, u32, ComparisonFunction, [u32; 4], u32, u32,
);

impl SamplerStateDesc {
    fn key(&self) -> SamplerKey {
        let border = self.border_color.to_array();
        (
            self.min_filter, self.mag_filter, self.mip_filter,
            self.address_u, self.address_v, self.address_w,
            self.mip_lod_bias.to_bits(),
            self.max_anisotropy,
            self.comparison_function,
            [border[0].to_bits(), border[1].to_bits(), border[2].to_bits(), border[3].to_bits()],
            self.min_lod.to_bits(),
            self.max_lod.to_bits(),
        )
    }
}

impl PartialEq for SamplerStateDesc {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SamplerStateDesc {}

impl Hash for SamplerStateDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Stencil operations for one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StencilOpDesc {
    pub fail_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub function: ComparisonFunction,
}

/// Depth-stencil state description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilStateDesc {
    pub depth_enable: bool,
    pub depth_write_enable: bool,
    pub depth_function: ComparisonFunction,
    pub stencil_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: StencilOpDesc,
    pub back_face: StencilOpDesc,
}

impl Default for DepthStencilStateDesc {
    fn default() -> Self {
        Self {
            depth_enable: true,
            depth_write_enable: true,
            depth_function: ComparisonFunction::LessEqual,
            stencil_enable: false,
            stencil_read_mask: 0xff,
            stencil_write_mask: 0xff,
            front_face: StencilOpDesc::default(),
            back_face: StencilOpDesc::default(),
        }
    }
}

/// Rasterizer state description
#[derive(Debug, Clone, Copy)]
pub struct RasterizerStateDesc {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: bool,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: bool,
    pub scissor_test_enable: bool,
    pub multisample_enable: bool,
    pub antialiased_line_enable: bool,
}

impl Default for RasterizerStateDesc {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::Solid,
            cull_mode: CullMode::Back,
            front_counter_clockwise: false,
            depth_bias: 0,
            depth_bias_clamp: 0.0,
            slope_scaled_depth_bias: 0.0,
            depth_clip_enable: true,
            scissor_test_enable: false,
            multisample_enable: false,
            antialiased_line_enable: false,
        }
    }
}

type RasterizerKey = (FillMode, CullMode, bool, i32, u32, u32, bool, bool, bool, bool);

impl RasterizerStateDesc {
    fn key(&self) -> RasterizerKey {
        (
            self.fill_mode,
            self.cull_mode,
            self.front_counter_clockwise,
            self.depth_bias,
            self.depth_bias_clamp.to_bits(),
            self.slope_scaled_depth_bias.to_bits(),
            self.depth_clip_enable,
            self.scissor_test_enable,
            self.multisample_enable,
            self.antialiased_line_enable,
        )
    }
}

impl PartialEq for RasterizerStateDesc {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RasterizerStateDesc {}

impl Hash for RasterizerStateDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Blend setup for one render target slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetBlendDesc {
    pub blend_enable: bool,
    pub source_blend: BlendMode,
    pub destination_blend: BlendMode,
    pub blend_operation: BlendOp,
    pub source_blend_alpha: BlendMode,
    pub destination_blend_alpha: BlendMode,
    pub blend_operation_alpha: BlendOp,
    pub render_target_write_mask: u8,
}

impl Default for TargetBlendDesc {
    fn default() -> Self {
        Self {
            blend_enable: false,
            source_blend: BlendMode::One,
            destination_blend: BlendMode::Zero,
            blend_operation: BlendOp::Add,
            source_blend_alpha: BlendMode::One,
            destination_blend_alpha: BlendMode::Zero,
            blend_operation_alpha: BlendOp::Add,
            render_target_write_mask: 0x0f,
        }
    }
}

/// Blend state description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendStateDesc {
    pub alpha_to_coverage_enable: bool,
    pub independent_blend_enable: bool,
    pub render_target: [TargetBlendDesc; 8],
}

// ===== STATE RESOURCE =====

/// Description type of a state block
pub trait StateDesc: Clone + Eq + Hash + fmt::Debug + Send + 'static {
    const KIND: ResourceKind;
    const NAME_PREFIX: &'static str;
    const DEVICE_KIND: DeviceObjectKind;

    fn identity_key(&self) -> IdentityKey;
}

impl StateDesc for SamplerStateDesc {
    const KIND: ResourceKind = ResourceKind::SamplerState;
    const NAME_PREFIX: &'static str = "SamplerState";
    const DEVICE_KIND: DeviceObjectKind = DeviceObjectKind::SamplerState;

    fn identity_key(&self) -> IdentityKey {
        IdentityKey::SamplerState(*self)
    }
}

impl StateDesc for DepthStencilStateDesc {
    const KIND: ResourceKind = ResourceKind::DepthStencilState;
    const NAME_PREFIX: &'static str = "DepthStencilState";
    const DEVICE_KIND: DeviceObjectKind = DeviceObjectKind::DepthStencilState;

    fn identity_key(&self) -> IdentityKey {
        IdentityKey::DepthStencilState(*self)
    }
}

impl StateDesc for RasterizerStateDesc {
    const KIND: ResourceKind = ResourceKind::RasterizerState;
    const NAME_PREFIX: &'static str = "RasterizerState";
    const DEVICE_KIND: DeviceObjectKind = DeviceObjectKind::RasterizerState;

    fn identity_key(&self) -> IdentityKey {
        IdentityKey::RasterizerState(*self)
    }
}

impl StateDesc for BlendStateDesc {
    const KIND: ResourceKind = ResourceKind::BlendState;
    const NAME_PREFIX: &'static str = "BlendState";
    const DEVICE_KIND: DeviceObjectKind = DeviceObjectKind::BlendState;

    fn identity_key(&self) -> IdentityKey {
        IdentityKey::BlendState(*self)
    }
}

/// Immutable state block resource
pub struct RenderState<D: StateDesc> {
    desc: D,
    backing: DeviceBacking,
}

impl<D: StateDesc> RenderState<D> {
    fn new(driver: Arc<dyn RenderDriver>, desc: D, label: &str) -> Self {
        let device = DeviceObjectDesc {
            kind: D::DEVICE_KIND,
            label: label.to_string(),
            size: 0,
            pool: MemoryPool::Managed,
        };
        Self { desc, backing: DeviceBacking::new(driver, device) }
    }

    pub fn desc(&self) -> &D {
        &self.desc
    }

    pub fn device_object(&self) -> Option<crate::render_driver::DeviceObject> {
        self.backing.object()
    }
}

impl<D: StateDesc> Resource for RenderState<D> {
    fn kind(&self) -> ResourceKind {
        D::KIND
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        self.backing.create()
    }

    fn unload(&mut self) {
        self.backing.release();
    }

    fn is_lost(&self) -> bool {
        self.backing.is_lost()
    }

    fn device_lost(&mut self) {
        self.backing.device_lost();
    }

    fn device_restored(&mut self) -> Result<()> {
        self.backing.device_restored()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub type SamplerState = RenderState<SamplerStateDesc>;
pub type DepthStencilState = RenderState<DepthStencilStateDesc>;
pub type RasterizerState = RenderState<RasterizerStateDesc>;
pub type BlendState = RenderState<BlendStateDesc>;

pub type SamplerStateHandle = ResourceHandle<SamplerState>;
pub type DepthStencilStateHandle = ResourceHandle<DepthStencilState>;
pub type RasterizerStateHandle = ResourceHandle<RasterizerState>;
pub type BlendStateHandle = ResourceHandle<BlendState>;

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    /// Create (or reuse) the state block for a description
    pub fn create_state<D: StateDesc>(
        &mut self,
        desc: &D,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ResourceHandle<RenderState<D>>> {
        self.pump_releases();
        let identity = desc.identity_key();
        if !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_identity(&identity) {
                return self.process_existing(key, flags);
            }
        }

        let id = ResourceId::next_internal();
        let name = format!("{}({})", D::NAME_PREFIX, id);
        let state = RenderState::new(self.render_driver().clone(), desc.clone(), &name);
        let handle = self.process_new(id, state, name, StreamType::None, flags, source)?;
        self.file_identity(identity, handle.cell().key);
        Ok(handle)
    }

    pub fn create_sampler_state(
        &mut self,
        desc: &SamplerStateDesc,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<SamplerStateHandle> {
        self.create_state(desc, flags, source)
    }

    pub fn create_depth_stencil_state(
        &mut self,
        desc: &DepthStencilStateDesc,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<DepthStencilStateHandle> {
        self.create_state(desc, flags, source)
    }

    pub fn create_rasterizer_state(
        &mut self,
        desc: &RasterizerStateDesc,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<RasterizerStateHandle> {
        self.create_state(desc, flags, source)
    }

    pub fn create_blend_state(
        &mut self,
        desc: &BlendStateDesc,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<BlendStateHandle> {
        self.create_state(desc, flags, source)
    }
}

#[cfg(test)]
#[path = "states_tests.rs"]
mod tests;
