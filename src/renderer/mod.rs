//! Rendering module
//!
//! Builds backend-agnostic draw lists from a read-only `GameState`.
//! Uploading and presenting them is left to the host.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Assets, DrawCommand, Frame, SpriteDraw, TextureId, build_frame};
pub use vertex::{Vertex, colors};
