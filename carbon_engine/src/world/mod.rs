//! World database collaborator

pub mod world;
pub mod memory_world;

pub use world::{World, WorldRecord, SandboxMode};
pub use memory_world::MemoryWorld;
