//! Shader program compilation.
//!
//! Compile and link failures are reported as values, never panics: the
//! overlay treats a failed program as "feature disabled" and keeps the
//! host frame loop alive. Failed attempts release every GPU object they
//! allocated along the way.

use super::{GraphicsContext, ProgramId, ShaderId, ShaderStage};
use thiserror::Error;
use tracing::error;

/// A shader stage failed to compile or the program failed to link.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// One stage's compilation failed; `log` carries the driver diagnostic
    #[error("{stage:?} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// Both stages compiled but the program failed to link
    #[error("program link failed: {log}")]
    Link { log: String },
}

/// Compile both stages and link them into a program.
///
/// On any failure the diagnostic log is recorded and the failure is
/// returned as a value; every shader and program object allocated by the
/// failed attempt is released first. Stage objects are released after a
/// successful link as well, since the program keeps its own reference.
pub fn compile_program<G: GraphicsContext>(
    gl: &mut G,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ProgramId, ShaderError> {
    let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    let program = gl.create_program();
    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    let linked = gl.link_program(program);

    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if !linked {
        let log = gl.program_info_log(program);
        gl.delete_program(program);
        error!(log = %log, "shader program link failed");
        return Err(ShaderError::Link { log });
    }

    Ok(program)
}

fn compile_stage<G: GraphicsContext>(
    gl: &mut G,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderId, ShaderError> {
    let shader = gl.create_shader(stage, source);
    if gl.compile_shader(shader) {
        Ok(shader)
    } else {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        error!(stage = ?stage, log = %log, "shader compilation failed");
        Err(ShaderError::Compile { stage, log })
    }
}
