//! ThinkBoard Core Library
//!
//! Platform-agnostic tool selection, drawing configuration and command routing
//! for the ThinkBoard whiteboard toolbar.

pub mod command;
pub mod style;
pub mod theme;
pub mod tools;

pub use command::{
    AiAssistant, CanvasSurface, CollaboratorError, Command, CommandContext, CommandDispatcher,
    CommandError, CommandOutcome, ExportFlow, HistoryManager, ZoomDirection,
};
pub use style::{
    Color, ConfigEvent, DrawingConfig, DrawingStyle, InvalidColor, SharedDrawingConfig,
    DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, PALETTE,
};
pub use theme::{MemoryThemeStore, Theme, ThemeState, ThemeStore, ThemeStoreError};
pub use tools::{
    ObserverId, Tool, ToolCoordinator, ToolGroup, ToolInfo, ToolRegistry, UnknownTool,
};
