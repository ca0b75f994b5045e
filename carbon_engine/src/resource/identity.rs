/// Value-keyed identity tables used for deduplication.
///
/// State blocks are keyed by their full description, hardware shaders by
/// their `ShaderIdentifier` (ordered map), render targets by name. A reverse
/// map remembers which key each resident resource was filed under so the
/// entry can be erased when the resource goes away.

use std::collections::BTreeMap;
use rustc_hash::FxHashMap;
use crate::resource::{
    ResourceKey, ResourceKind, ShaderIdentifier,
    SamplerStateDesc, DepthStencilStateDesc, RasterizerStateDesc, BlendStateDesc,
};

/// Lookup key for one identity table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    SamplerState(SamplerStateDesc),
    DepthStencilState(DepthStencilStateDesc),
    RasterizerState(RasterizerStateDesc),
    BlendState(BlendStateDesc),
    VertexShader(ShaderIdentifier),
    PixelShader(ShaderIdentifier),
    RenderTarget(String),
}

impl IdentityKey {
    pub fn kind(&self) -> ResourceKind {
        match self {
            IdentityKey::SamplerState(_) => ResourceKind::SamplerState,
            IdentityKey::DepthStencilState(_) => ResourceKind::DepthStencilState,
            IdentityKey::RasterizerState(_) => ResourceKind::RasterizerState,
            IdentityKey::BlendState(_) => ResourceKind::BlendState,
            IdentityKey::VertexShader(_) => ResourceKind::VertexShader,
            IdentityKey::PixelShader(_) => ResourceKind::PixelShader,
            IdentityKey::RenderTarget(_) => ResourceKind::RenderTarget,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct IdentityTables {
    samplers: FxHashMap<SamplerStateDesc, ResourceKey>,
    depth_stencils: FxHashMap<DepthStencilStateDesc, ResourceKey>,
    rasterizers: FxHashMap<RasterizerStateDesc, ResourceKey>,
    blends: FxHashMap<BlendStateDesc, ResourceKey>,
    vertex_shaders: BTreeMap<ShaderIdentifier, ResourceKey>,
    pixel_shaders: BTreeMap<ShaderIdentifier, ResourceKey>,
    render_targets: FxHashMap<String, ResourceKey>,
    owners: FxHashMap<ResourceKey, IdentityKey>,
}

impl IdentityTables {
    pub fn find(&self, identity: &IdentityKey) -> Option<ResourceKey> {
        match identity {
            IdentityKey::SamplerState(desc) => self.samplers.get(desc),
            IdentityKey::DepthStencilState(desc) => self.depth_stencils.get(desc),
            IdentityKey::RasterizerState(desc) => self.rasterizers.get(desc),
            IdentityKey::BlendState(desc) => self.blends.get(desc),
            IdentityKey::VertexShader(id) => self.vertex_shaders.get(id),
            IdentityKey::PixelShader(id) => self.pixel_shaders.get(id),
            IdentityKey::RenderTarget(name) => self.render_targets.get(name),
        }
        .copied()
    }

    /// File a resource under a key, replacing whatever held it before
    pub fn insert(&mut self, identity: IdentityKey, key: ResourceKey) {
        let previous = match &identity {
            IdentityKey::SamplerState(desc) => self.samplers.insert(desc.clone(), key),
            IdentityKey::DepthStencilState(desc) => self.depth_stencils.insert(desc.clone(), key),
            IdentityKey::RasterizerState(desc) => self.rasterizers.insert(desc.clone(), key),
            IdentityKey::BlendState(desc) => self.blends.insert(desc.clone(), key),
            IdentityKey::VertexShader(id) => self.vertex_shaders.insert(id.clone(), key),
            IdentityKey::PixelShader(id) => self.pixel_shaders.insert(id.clone(), key),
            IdentityKey::RenderTarget(name) => self.render_targets.insert(name.clone(), key),
        };
        if let Some(previous) = previous {
            if previous != key {
                self.owners.remove(&previous);
            }
        }
        self.owners.insert(key, identity);
    }

    /// Erase the entry filed for a resource, if it still owns it
    pub fn remove(&mut self, key: ResourceKey) -> bool {
        let Some(identity) = self.owners.remove(&key) else {
            return false;
        };
        fn erase<K, M: TableOps<K>>(map: &mut M, k: &K, key: ResourceKey) -> bool {
            if map.lookup(k) == Some(key) {
                map.erase(k);
                true
            } else {
                false
            }
        }
        match &identity {
            IdentityKey::SamplerState(desc) => erase(&mut self.samplers, desc, key),
            IdentityKey::DepthStencilState(desc) => erase(&mut self.depth_stencils, desc, key),
            IdentityKey::RasterizerState(desc) => erase(&mut self.rasterizers, desc, key),
            IdentityKey::BlendState(desc) => erase(&mut self.blends, desc, key),
            IdentityKey::VertexShader(id) => erase(&mut self.vertex_shaders, id, key),
            IdentityKey::PixelShader(id) => erase(&mut self.pixel_shaders, id, key),
            IdentityKey::RenderTarget(name) => erase(&mut self.render_targets, name, key),
        }
    }

    /// Number of entries in the table for a kind
    pub fn len(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::SamplerState => self.samplers.len(),
            ResourceKind::DepthStencilState => self.depth_stencils.len(),
            ResourceKind::RasterizerState => self.rasterizers.len(),
            ResourceKind::BlendState => self.blends.len(),
            ResourceKind::VertexShader => self.vertex_shaders.len(),
            ResourceKind::PixelShader => self.pixel_shaders.len(),
            ResourceKind::RenderTarget => self.render_targets.len(),
            _ => 0,
        }
    }

    pub fn clear(&mut self) {
        self.samplers.clear();
        self.depth_stencils.clear();
        self.rasterizers.clear();
        self.blends.clear();
        self.vertex_shaders.clear();
        self.pixel_shaders.clear();
        self.render_targets.clear();
        self.owners.clear();
    }
}

trait TableOps<K> {
    fn lookup(&self, k: &K) -> Option<ResourceKey>;
    fn erase(&mut self, k: &K);
}

impl<K: std::hash::Hash + Eq> TableOps<K> for FxHashMap<K, ResourceKey> {
    fn lookup(&self, k: &K) -> Option<ResourceKey> {
        self.get(k).copied()
    }

    fn erase(&mut self, k: &K) {
        self.remove(k);
    }
}

impl<K: Ord> TableOps<K> for BTreeMap<K, ResourceKey> {
    fn lookup(&self, k: &K) -> Option<ResourceKey> {
        self.get(k).copied()
    }

    fn erase(&mut self, k: &K) {
        self.remove(k);
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
