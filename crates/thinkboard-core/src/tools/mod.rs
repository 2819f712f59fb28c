//! Tool system for the toolbar.

mod coordinator;
mod registry;

pub use coordinator::{ObserverId, ToolCoordinator};
pub use registry::{ToolGroup, ToolInfo, ToolRegistry};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Draw,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Text,
    Arrow,
    Triangle,
    Ellipse,
    Star,
    Diamond,
    Pentagon,
    Hexagon,
}

impl Tool {
    /// Every tool, in declaration order.
    pub const ALL: [Tool; 14] = [
        Tool::Select,
        Tool::Draw,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Line,
        Tool::Text,
        Tool::Arrow,
        Tool::Triangle,
        Tool::Ellipse,
        Tool::Star,
        Tool::Diamond,
        Tool::Pentagon,
        Tool::Hexagon,
    ];

    /// Stable lowercase identifier (`"rectangle"`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Draw => "draw",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Line => "line",
            Tool::Text => "text",
            Tool::Arrow => "arrow",
            Tool::Triangle => "triangle",
            Tool::Ellipse => "ellipse",
            Tool::Star => "star",
            Tool::Diamond => "diamond",
            Tool::Pentagon => "pentagon",
            Tool::Hexagon => "hexagon",
        }
    }

    /// Display label from the registry.
    pub fn label(self) -> &'static str {
        ToolRegistry::info(self).label
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown tool name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == needle)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}
