//! GLSL sources for the two overlay passes.

/// Mask pass vertex stage: projects explored points through the host
/// map's view-projection matrix and gives every point a fixed 5-pixel
/// sprite size.
pub const MASK_VERTEX: &str = r#"
precision mediump float;
uniform mat4 u_matrix;
attribute vec2 a_pos;
void main() {
    gl_Position = u_matrix * vec4(a_pos, 0.0, 1.0);
    gl_PointSize = 5.0;
}
"#;

/// Mask pass fragment stage: discards fragments outside radius 0.5 of
/// the sprite center, turning each point into a disc rather than a
/// square.
pub const MASK_FRAGMENT: &str = r#"
precision mediump float;
void main() {
    vec2 center = gl_PointCoord - vec2(0.5);
    float dist = length(center);
    if (dist > 0.5) {
        discard;
    } else {
        gl_FragColor = vec4(1.0);
    }
}
"#;

/// Composite pass vertex stage: a full-screen clip-space quad whose
/// positions double as texture coordinates.
pub const COMPOSITE_VERTEX: &str = r#"
precision mediump float;
attribute vec2 a_position;
varying vec2 v_texCoord;
void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
    v_texCoord = a_position * 0.5 + 0.5;
}
"#;

/// Composite pass fragment stage: black with alpha `0.5 * (1 - mask.r)`,
/// so drawn points read as fully revealed and undrawn areas as
/// half-opaque fog.
pub const COMPOSITE_FRAGMENT: &str = r#"
precision mediump float;
uniform sampler2D u_texture;
varying vec2 v_texCoord;
void main() {
    vec4 mask = texture2D(u_texture, v_texCoord);
    gl_FragColor = vec4(0.0, 0.0, 0.0, 0.5 * (1.0 - mask.r));
}
"#;
