//! ThinkBoard Application
//!
//! The toolbar shell: wires tool selection, drawing configuration, command
//! dispatch and graph rendering to concrete collaborators.

mod board;
mod config;
mod script;
mod session;
mod shortcuts;
mod toolbar;

pub use board::{AssistantPanel, Board, BoardCanvas, BoardHistory, ExportPanel, Stroke, Viewport};
pub use config::AppConfig;
pub use script::{parse_line, ScriptAction, ScriptError};
pub use session::Session;
pub use shortcuts::{KeyPress, Shortcut, ShortcutRegistry};
pub use toolbar::{Collaborators, Toolbar, ToolbarAction};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{render_graph, run_wasm, WebToolbar};
