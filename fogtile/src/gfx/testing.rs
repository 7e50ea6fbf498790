//! In-memory recording backend for tests.
//!
//! Implements [`GraphicsContext`] without a GPU: handles are minted from a
//! counter, per-pass calls are recorded in order, and compile/link
//! failures can be forced to exercise the disabled-overlay path.

use super::{
    BlendFactor, BufferId, BufferUsage, DrawMode, FramebufferId, GraphicsContext, ProgramId,
    RenderTarget, ShaderId, ShaderStage, TextureId,
};
use std::collections::{HashMap, HashSet};

/// One recorded per-pass call.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    BindFramebuffer(RenderTarget),
    Viewport(u32, u32),
    Clear(f32, f32, f32, f32),
    Blend(BlendFactor, BlendFactor),
    UseProgram(ProgramId),
    BindTexture(TextureId),
    BindVertexBuffer(ProgramId, String, BufferId),
    BufferData {
        buffer: BufferId,
        floats: usize,
        usage: BufferUsage,
    },
    UniformMatrix4(ProgramId, String),
    Draw { mode: DrawMode, count: u32 },
}

/// Recording fake for the graphics capability set.
pub struct RecordingContext {
    next_id: u32,
    drawable: (u32, u32),
    /// Force the given stage to fail compilation
    pub fail_compile: Option<ShaderStage>,
    /// Force program linking to fail
    pub fail_link: bool,
    /// Ordered log of per-pass calls
    pub calls: Vec<GlCall>,
    shaders: HashMap<ShaderId, ShaderStage>,
    programs: HashSet<ProgramId>,
    textures: HashMap<TextureId, (u32, u32)>,
    framebuffers: HashMap<FramebufferId, TextureId>,
    buffers: HashMap<BufferId, usize>,
}

impl RecordingContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            next_id: 1,
            drawable: (width, height),
            fail_compile: None,
            fail_link: false,
            calls: Vec::new(),
            shaders: HashMap::new(),
            programs: HashSet::new(),
            textures: HashMap::new(),
            framebuffers: HashMap::new(),
            buffers: HashMap::new(),
        }
    }

    /// Simulate a canvas resize between frames.
    pub fn set_drawable_size(&mut self, width: u32, height: u32) {
        self.drawable = (width, height);
    }

    /// Forget everything recorded so far (object registries are kept).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// All recorded draw calls, in order.
    pub fn draw_calls(&self) -> Vec<(DrawMode, u32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GlCall::Draw { mode, count } => Some((*mode, *count)),
                _ => None,
            })
            .collect()
    }

    /// Size of an allocated texture, if it is still live.
    pub fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&texture).copied()
    }

    /// Color attachment of a live framebuffer.
    pub fn framebuffer_color(&self, framebuffer: FramebufferId) -> Option<TextureId> {
        self.framebuffers.get(&framebuffer).copied()
    }

    pub fn live_shader_objects(&self) -> usize {
        self.shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_framebuffers(&self) -> usize {
        self.framebuffers.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    fn mint(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GraphicsContext for RecordingContext {
    fn drawable_size(&self) -> (u32, u32) {
        self.drawable
    }

    fn create_shader(&mut self, stage: ShaderStage, _source: &str) -> ShaderId {
        let id = ShaderId(self.mint());
        self.shaders.insert(id, stage);
        id
    }

    fn compile_shader(&mut self, shader: ShaderId) -> bool {
        match (self.fail_compile, self.shaders.get(&shader)) {
            (Some(failing), Some(stage)) => *stage != failing,
            _ => true,
        }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        match self.shaders.get(&shader) {
            Some(stage) => format!("forced {:?} compile failure", stage),
            None => String::new(),
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.shaders.remove(&shader);
    }

    fn create_program(&mut self) -> ProgramId {
        let id = ProgramId(self.mint());
        self.programs.insert(id);
        id
    }

    fn attach_shader(&mut self, _program: ProgramId, _shader: ShaderId) {}

    fn link_program(&mut self, _program: ProgramId) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        "forced link failure".to_string()
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program);
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn create_texture(&mut self, width: u32, height: u32) -> TextureId {
        let id = TextureId(self.mint());
        self.textures.insert(id, (width, height));
        id
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.calls.push(GlCall::BindTexture(texture));
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
    }

    fn create_framebuffer(&mut self, color: TextureId) -> FramebufferId {
        let id = FramebufferId(self.mint());
        self.framebuffers.insert(id, color);
        id
    }

    fn bind_framebuffer(&mut self, target: RenderTarget) {
        self.calls.push(GlCall::BindFramebuffer(target));
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.framebuffers.remove(&framebuffer);
    }

    fn create_buffer(&mut self) -> BufferId {
        let id = BufferId(self.mint());
        self.buffers.insert(id, 0);
        id
    }

    fn buffer_data(&mut self, buffer: BufferId, data: &[f32], usage: BufferUsage) {
        if let Some(len) = self.buffers.get_mut(&buffer) {
            *len = data.len();
        }
        self.calls.push(GlCall::BufferData {
            buffer,
            floats: data.len(),
            usage,
        });
    }

    fn bind_vertex_buffer(&mut self, program: ProgramId, attribute: &str, buffer: BufferId) {
        self.calls
            .push(GlCall::BindVertexBuffer(program, attribute.to_string(), buffer));
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(GlCall::Viewport(width, height));
    }

    fn clear(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.calls.push(GlCall::Clear(r, g, b, a));
    }

    fn set_blend(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.calls.push(GlCall::Blend(src, dst));
    }

    fn set_uniform_matrix4(&mut self, program: ProgramId, name: &str, _matrix: &[f32; 16]) {
        self.calls
            .push(GlCall::UniformMatrix4(program, name.to_string()));
    }

    fn draw(&mut self, mode: DrawMode, vertex_count: u32) {
        self.calls.push(GlCall::Draw {
            mode,
            count: vertex_count,
        });
    }
}
