//! One-shot toolbar commands and the collaborators they are routed to.

mod dispatcher;

pub use dispatcher::CommandDispatcher;

use crate::theme::{Theme, ThemeState, ThemeStoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A stateless user action, distinct from tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Undo,
    Clear,
    ZoomIn,
    ZoomOut,
    Export,
    ShowAi,
    ToggleTheme,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Undo,
        Command::Clear,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::Export,
        Command::ShowAi,
        Command::ToggleTheme,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::Undo => "Undo",
            Command::Clear => "Clear",
            Command::ZoomIn => "Zoom In",
            Command::ZoomOut => "Zoom Out",
            Command::Export => "Export",
            Command::ShowAi => "AI Assistant",
            Command::ToggleTheme => "Toggle Theme",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Viewport zoom step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Opaque failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collaborator} failed: {message}")]
pub struct CollaboratorError {
    pub collaborator: &'static str,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`CommandDispatcher::dispatch`].
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
    #[error("Failed to persist theme: {0}")]
    Theme(#[from] ThemeStoreError),
}

/// What a dispatched command did, as far as the dispatcher can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Routed to a collaborator.
    Routed,
    /// Nothing to do (undo with empty history).
    NoOp,
    ThemeChanged(Theme),
}

/// Undo history owner.
pub trait HistoryManager {
    /// Revert the last committed change. Returns false if history is empty.
    fn undo(&mut self) -> Result<bool, CollaboratorError>;
}

/// The drawing surface.
pub trait CanvasSurface {
    /// Reset the whole canvas.
    fn clear(&mut self) -> Result<(), CollaboratorError>;

    /// Change viewport scale by one step. Bounds are the surface's business.
    fn zoom(&mut self, direction: ZoomDirection) -> Result<(), CollaboratorError>;
}

/// Export flow entry point.
pub trait ExportFlow {
    fn open_export(&mut self) -> Result<(), CollaboratorError>;
}

/// AI-assist surface entry point.
pub trait AiAssistant {
    fn open_assistant(&mut self) -> Result<(), CollaboratorError>;
}

/// Borrowed collaborators for one dispatch.
pub struct CommandContext<'a> {
    pub history: &'a mut dyn HistoryManager,
    pub canvas: &'a mut dyn CanvasSurface,
    pub exporter: &'a mut dyn ExportFlow,
    pub assistant: &'a mut dyn AiAssistant,
    pub theme: &'a mut ThemeState,
}
