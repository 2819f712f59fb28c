//! Static catalog of tools and their display metadata.

use super::Tool;

/// Where a tool lives on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolGroup {
    /// Always-visible buttons.
    Basic,
    /// Entries of the shapes dropdown.
    Shape,
}

/// Display metadata for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInfo {
    pub tool: Tool,
    pub label: &'static str,
    /// Single-character keyboard shortcut, if assigned.
    pub shortcut: Option<char>,
    pub group: ToolGroup,
}

impl ToolInfo {
    const fn new(tool: Tool, label: &'static str, shortcut: Option<char>, group: ToolGroup) -> Self {
        Self {
            tool,
            label,
            shortcut,
            group,
        }
    }
}

// Toolbar order: basic tools first, then the shapes dropdown.
// Arrow and ellipse have no shortcut assigned.
static TOOLS: [ToolInfo; 14] = [
    ToolInfo::new(Tool::Select, "Select", Some('1'), ToolGroup::Basic),
    ToolInfo::new(Tool::Draw, "Draw", Some('2'), ToolGroup::Basic),
    ToolInfo::new(Tool::Text, "Text", Some('t'), ToolGroup::Basic),
    ToolInfo::new(Tool::Eraser, "Eraser", Some('0'), ToolGroup::Basic),
    ToolInfo::new(Tool::Rectangle, "Rectangle", Some('r'), ToolGroup::Shape),
    ToolInfo::new(Tool::Circle, "Circle", Some('c'), ToolGroup::Shape),
    ToolInfo::new(Tool::Line, "Line", Some('l'), ToolGroup::Shape),
    ToolInfo::new(Tool::Triangle, "Triangle", Some('3'), ToolGroup::Shape),
    ToolInfo::new(Tool::Diamond, "Diamond", Some('d'), ToolGroup::Shape),
    ToolInfo::new(Tool::Pentagon, "Pentagon", Some('p'), ToolGroup::Shape),
    ToolInfo::new(Tool::Hexagon, "Hexagon", Some('h'), ToolGroup::Shape),
    ToolInfo::new(Tool::Star, "Star", Some('s'), ToolGroup::Shape),
    ToolInfo::new(Tool::Arrow, "Arrow", None, ToolGroup::Shape),
    ToolInfo::new(Tool::Ellipse, "Ellipse", None, ToolGroup::Shape),
];

fn index_of(tool: Tool) -> usize {
    match tool {
        Tool::Select => 0,
        Tool::Draw => 1,
        Tool::Text => 2,
        Tool::Eraser => 3,
        Tool::Rectangle => 4,
        Tool::Circle => 5,
        Tool::Line => 6,
        Tool::Triangle => 7,
        Tool::Diamond => 8,
        Tool::Pentagon => 9,
        Tool::Hexagon => 10,
        Tool::Star => 11,
        Tool::Arrow => 12,
        Tool::Ellipse => 13,
    }
}

/// Read-only registry of every tool.
pub struct ToolRegistry;

impl ToolRegistry {
    /// All tools in toolbar order.
    pub fn list_tools() -> &'static [ToolInfo] {
        &TOOLS
    }

    /// Metadata for a tool. Total over [`Tool`].
    pub fn info(tool: Tool) -> &'static ToolInfo {
        &TOOLS[index_of(tool)]
    }

    /// Keyboard shortcut for a tool.
    pub fn shortcut_for(tool: Tool) -> Option<char> {
        Self::info(tool).shortcut
    }

    /// Reverse lookup of a shortcut character (case-insensitive).
    pub fn tool_for_shortcut(key: char) -> Option<Tool> {
        let key = key.to_ascii_lowercase();
        TOOLS
            .iter()
            .find(|info| info.shortcut == Some(key))
            .map(|info| info.tool)
    }

    /// Tools belonging to a toolbar group, in toolbar order.
    pub fn tools_in(group: ToolGroup) -> impl Iterator<Item = &'static ToolInfo> {
        TOOLS.iter().filter(move |info| info.group == group)
    }
}
