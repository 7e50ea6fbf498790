//! Exploration-fog overlay renderer.
//!
//! Driven by the host map once per animation frame, the overlay runs two
//! ordered passes: a mask pass rasterizing explored points into an
//! offscreen texture, and a composite pass blending the inverted mask as
//! a translucent fog layer onto the visible map.
//!
//! The overlay owns its GPU resources exclusively. Nothing here is fatal
//! to the host: shader failure disables the overlay, a failed point query
//! renders one frame fully fogged.

mod renderer;
mod shaders;

pub use renderer::FogOverlay;
pub use shaders::{COMPOSITE_FRAGMENT, COMPOSITE_VERTEX, MASK_FRAGMENT, MASK_VERTEX};
