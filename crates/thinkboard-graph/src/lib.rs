//! ThinkBoard Graph Rendering
//!
//! Turns a textual graph description (DOT) into an SVG image placed inside a
//! named mount point. Failures never reach the caller of
//! [`GraphRenderer::render`]; they are logged and the mount is left untouched.

mod engine;
mod mount;
mod renderer;

pub use engine::{BoxFuture, EngineFactory, GraphEngine, LayoutEngine, LayoutEngineFactory};
pub use mount::{MemoryMountTree, MountTree};
pub use renderer::{style_svg, GraphRenderer, RenderOutcome, SVG_STYLE};

#[cfg(target_arch = "wasm32")]
pub use mount::DomMountTree;

use thiserror::Error;

/// Graph rendering errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Graph description could not be parsed: {0}")]
    Parse(String),
    #[error("Mount point not found: {0}")]
    MountNotFound(String),
    #[error("Rendering engine failed: {0}")]
    Engine(String),
    #[error("Display error: {0}")]
    Display(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
