//! Two-pass fog overlay renderer.

use super::shaders::{COMPOSITE_FRAGMENT, COMPOSITE_VERTEX, MASK_FRAGMENT, MASK_VERTEX};
use crate::coord::{lng_lat_to_mercator, MapViewport};
use crate::fog::FogSource;
use crate::gfx::{
    compile_program, BlendFactor, BufferId, BufferUsage, DrawMode, FramebufferId, GraphicsContext,
    ProgramId, RenderTarget, TextureId,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Static full-screen quad in clip space, drawn as a 4-vertex strip.
const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

/// GPU resources owned exclusively by an attached overlay.
struct OverlayResources {
    mask_program: ProgramId,
    composite_program: ProgramId,
    mask_texture: TextureId,
    mask_framebuffer: FramebufferId,
    /// Size the mask texture was allocated at; compared against the
    /// drawable before every mask pass
    mask_size: (u32, u32),
    quad_buffer: BufferId,
    point_buffer: BufferId,
}

enum OverlayState {
    /// `attach` has not run yet
    Uninitialized,
    /// Resources live, `render` performs both passes
    Attached(OverlayResources),
    /// A shader failed to compile or link; `render` is a no-op
    Disabled,
    /// `detach` released all resources
    Detached,
}

/// The exploration-fog overlay.
///
/// Lifecycle: [`attach`](Self::attach) once when the host adds the layer,
/// [`render`](Self::render) once per frame, [`detach`](Self::detach) when
/// the layer is removed. A shader failure during attach disables the
/// overlay permanently (until attach runs again) instead of surfacing an
/// error into the host frame loop.
pub struct FogOverlay<S> {
    source: Arc<S>,
    state: OverlayState,
}

impl<S: FogSource> FogOverlay<S> {
    /// Create an overlay over the given fog source.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: OverlayState::Uninitialized,
        }
    }

    /// True while GPU resources are live and `render` draws.
    pub fn is_attached(&self) -> bool {
        matches!(self.state, OverlayState::Attached(_))
    }

    /// True when a shader failure turned `render` into a no-op.
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, OverlayState::Disabled)
    }

    /// Compile both pass programs and allocate GPU resources.
    ///
    /// On shader compile or link failure the overlay enters the disabled
    /// state: the failure is logged, nothing is raised, and subsequent
    /// `render` calls draw nothing.
    pub fn attach<G: GraphicsContext>(&mut self, gl: &mut G) {
        let mask_program = match compile_program(gl, MASK_VERTEX, MASK_FRAGMENT) {
            Ok(program) => program,
            Err(e) => {
                warn!(error = %e, "fog overlay disabled: mask program failed");
                self.state = OverlayState::Disabled;
                return;
            }
        };
        let composite_program = match compile_program(gl, COMPOSITE_VERTEX, COMPOSITE_FRAGMENT) {
            Ok(program) => program,
            Err(e) => {
                warn!(error = %e, "fog overlay disabled: composite program failed");
                gl.delete_program(mask_program);
                self.state = OverlayState::Disabled;
                return;
            }
        };

        let (width, height) = gl.drawable_size();
        let mask_texture = gl.create_texture(width, height);
        let mask_framebuffer = gl.create_framebuffer(mask_texture);

        let quad_buffer = gl.create_buffer();
        gl.buffer_data(quad_buffer, &QUAD_VERTICES, BufferUsage::Static);
        let point_buffer = gl.create_buffer();

        debug!(width, height, "fog overlay attached");
        self.state = OverlayState::Attached(OverlayResources {
            mask_program,
            composite_program,
            mask_texture,
            mask_framebuffer,
            mask_size: (width, height),
            quad_buffer,
            point_buffer,
        });
    }

    /// Render one frame: mask pass, then composite pass.
    ///
    /// No-op unless attached. A failed bounding-box query degrades to the
    /// empty point set, which leaves the mask black and the whole view
    /// fogged for this frame.
    pub fn render<G: GraphicsContext>(&mut self, gl: &mut G, viewport: &MapViewport) {
        let OverlayState::Attached(res) = &mut self.state else {
            return;
        };

        // The mask must match the drawable exactly; a stale size would
        // composite with wrong geometry. Recreate, never viewport-clip.
        let (width, height) = gl.drawable_size();
        if (width, height) != res.mask_size {
            debug!(
                from = ?res.mask_size,
                to = ?(width, height),
                "drawable resized, reallocating mask framebuffer"
            );
            gl.delete_framebuffer(res.mask_framebuffer);
            gl.delete_texture(res.mask_texture);
            res.mask_texture = gl.create_texture(width, height);
            res.mask_framebuffer = gl.create_framebuffer(res.mask_texture);
            res.mask_size = (width, height);
        }

        // Mask pass: rasterize explored points into the offscreen target.
        gl.bind_framebuffer(RenderTarget::Offscreen(res.mask_framebuffer));
        gl.set_viewport(width, height);
        gl.clear(0.0, 0.0, 0.0, 1.0);
        gl.set_blend(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);

        let sw = lng_lat_to_mercator(viewport.south_west);
        let ne = lng_lat_to_mercator(viewport.north_east);
        let pixels = match self.source.bounding_box_pixels(sw, ne) {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!(error = %e, "point query failed, rendering frame fully fogged");
                Vec::new()
            }
        };

        if !pixels.is_empty() {
            gl.buffer_data(res.point_buffer, &pixels, BufferUsage::Dynamic);
            gl.use_program(res.mask_program);
            gl.set_uniform_matrix4(res.mask_program, "u_matrix", &viewport.matrix);
            gl.bind_vertex_buffer(res.mask_program, "a_pos", res.point_buffer);
            gl.draw(DrawMode::Points, (pixels.len() / 2) as u32);
        }

        // Composite pass: blend the inverted mask over the map canvas.
        gl.bind_framebuffer(RenderTarget::Default);
        gl.set_viewport(width, height);
        gl.use_program(res.composite_program);
        gl.set_blend(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        gl.bind_texture(res.mask_texture);
        gl.bind_vertex_buffer(res.composite_program, "a_position", res.quad_buffer);
        gl.draw(DrawMode::TriangleStrip, 4);
    }

    /// Release every GPU resource the overlay owns.
    pub fn detach<G: GraphicsContext>(&mut self, gl: &mut G) {
        if let OverlayState::Attached(res) = &self.state {
            gl.delete_buffer(res.point_buffer);
            gl.delete_buffer(res.quad_buffer);
            gl.delete_framebuffer(res.mask_framebuffer);
            gl.delete_texture(res.mask_texture);
            gl.delete_program(res.composite_program);
            gl.delete_program(res.mask_program);
            debug!("fog overlay detached");
        }
        self.state = OverlayState::Detached;
    }
}
