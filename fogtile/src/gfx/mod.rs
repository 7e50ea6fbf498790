//! Graphics capability boundary.
//!
//! The overlay renderer does not talk to a concrete GPU API. It consumes
//! the [`GraphicsContext`] trait, keyed to the capability set it actually
//! needs: create/compile/link shader objects, create/bind textures and
//! framebuffers, create/bind vertex buffers, and draw calls with
//! blend-state control. Any backend exposing this capability set is
//! substitutable; tests run against an in-memory recording fake.
//!
//! Handles are opaque ids minted by the context. The renderer owns their
//! lifecycle and releases them on detach.

mod shader;

#[cfg(test)]
pub mod testing;

pub use shader::{compile_program, ShaderError};

/// Opaque handle to a compiled shader stage object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Opaque handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Opaque handle to a 2D RGBA texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque handle to an offscreen framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u32);

/// Opaque handle to a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Blend factors for source/destination color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Primitive assembly mode for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Points,
    TriangleStrip,
}

/// Buffer upload hint: written once vs. rewritten every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    Static,
    Dynamic,
}

/// Render target selection for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// The on-screen drawable
    Default,
    /// An offscreen framebuffer
    Offscreen(FramebufferId),
}

/// The GPU capability set the overlay consumes.
///
/// All calls are synchronous from the caller's perspective; only the
/// enclosing per-frame scheduling (driven by the host) is asynchronous.
pub trait GraphicsContext {
    /// Current size of the on-screen drawable in device pixels.
    fn drawable_size(&self) -> (u32, u32);

    /// Create a shader object of the given stage holding `source`.
    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> ShaderId;

    /// Compile a shader object. Returns `false` on compile failure.
    fn compile_shader(&mut self, shader: ShaderId) -> bool;

    /// Diagnostic log for a shader object (populated after a failed compile).
    fn shader_info_log(&self, shader: ShaderId) -> String;

    /// Release a shader object.
    fn delete_shader(&mut self, shader: ShaderId);

    /// Create an empty program object.
    fn create_program(&mut self) -> ProgramId;

    /// Attach a compiled shader stage to a program.
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);

    /// Link a program. Returns `false` on link failure.
    fn link_program(&mut self, program: ProgramId) -> bool;

    /// Diagnostic log for a program (populated after a failed link).
    fn program_info_log(&self, program: ProgramId) -> String;

    /// Release a program object.
    fn delete_program(&mut self, program: ProgramId);

    /// Select the program used by subsequent draw calls.
    fn use_program(&mut self, program: ProgramId);

    /// Allocate an RGBA texture of the given size with linear filtering.
    fn create_texture(&mut self, width: u32, height: u32) -> TextureId;

    /// Bind a texture as the sampler source for subsequent draws.
    fn bind_texture(&mut self, texture: TextureId);

    /// Release a texture.
    fn delete_texture(&mut self, texture: TextureId);

    /// Create a framebuffer with `color` as its color attachment.
    fn create_framebuffer(&mut self, color: TextureId) -> FramebufferId;

    /// Select the render target for subsequent clears and draws.
    fn bind_framebuffer(&mut self, target: RenderTarget);

    /// Release a framebuffer (not its color attachment).
    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);

    /// Create an empty vertex buffer.
    fn create_buffer(&mut self) -> BufferId;

    /// Upload vertex data to a buffer.
    fn buffer_data(&mut self, buffer: BufferId, data: &[f32], usage: BufferUsage);

    /// Feed a buffer of interleaved 2D positions to a program attribute.
    fn bind_vertex_buffer(&mut self, program: ProgramId, attribute: &str, buffer: BufferId);

    /// Release a vertex buffer.
    fn delete_buffer(&mut self, buffer: BufferId);

    /// Set the viewport to cover `width` x `height` from the origin.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear the bound render target to the given color.
    fn clear(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Enable blending with the given source/destination factors.
    fn set_blend(&mut self, src: BlendFactor, dst: BlendFactor);

    /// Set a 4x4 matrix uniform (column-major) on a program.
    fn set_uniform_matrix4(&mut self, program: ProgramId, name: &str, matrix: &[f32; 16]);

    /// Issue a draw call over `vertex_count` vertices.
    fn draw(&mut self, mode: DrawMode, vertex_count: u32);
}
