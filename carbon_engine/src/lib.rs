/*!
# Carbon Engine

Resource management core of the Carbon game engine.

Every GPU or CPU backed asset (textures, buffers, shaders, render states,
materials, meshes, scripts, sounds, ...) is created through a single
`ResourceManager`, which deduplicates requests, hands out reference-counted
handles and destroys unreferenced resources after a configurable delay.

## Architecture

- **ResourceManager**: factory, identity tables and garbage schedule
- **ResourceHandle**: typed, reference-counted access to a resident resource
- **RenderDriver**: opaque device collaborator creating backing objects
- **World**: database collaborator storing material/mesh/animation records
- **MessageBus**: delayed messages (garbage collection, device events, reloads)

Collaborators are traits so hosts can plug in their own implementations;
`NullRenderDriver` and `MemoryWorld` are provided for tools and tests.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod system;
pub mod render_driver;
pub mod world;
pub mod resource;

// Main carbon namespace module
pub mod carbon {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide log sink
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Configuration sub-module
    pub mod config {
        pub use crate::config::*;
    }

    // Clock, message bus and streams
    pub mod system {
        pub use crate::system::*;
    }

    // Render driver sub-module
    pub mod render_driver {
        pub use crate::render_driver::*;
    }

    // World database sub-module
    pub mod world {
        pub use crate::world::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
