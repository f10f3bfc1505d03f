//! Rendering
//!
//! wgpu-based forward renderer: one pipeline, a depth buffer, and
//! per-frame global uniforms.

pub mod render_engine;

pub use render_engine::RenderEngine;
