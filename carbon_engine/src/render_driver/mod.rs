//! Render driver module - the opaque device collaborator

pub mod render_driver;
pub mod null_render_driver;

pub use render_driver::*;
pub use null_render_driver::NullRenderDriver;

// Mock render driver for tests (no GPU required)
#[cfg(test)]
pub mod mock_render_driver;
