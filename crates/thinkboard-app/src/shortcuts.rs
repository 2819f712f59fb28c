//! Keyboard shortcut registry and documentation.

use crate::toolbar::ToolbarAction;
use thinkboard_core::{Command, ToolRegistry};

/// A key press as seen by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
}

impl KeyPress {
    pub const fn plain(key: char) -> Self {
        Self { key, ctrl: false }
    }

    pub const fn ctrl(key: char) -> Self {
        Self { key, ctrl: true }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: char,
    pub ctrl: bool,
    pub description: &'static str,
    pub action: ToolbarAction,
}

impl Shortcut {
    pub const fn new(key: char, ctrl: bool, description: &'static str, action: ToolbarAction) -> Self {
        Self {
            key,
            ctrl,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let key = self.key.to_ascii_uppercase();
        if self.ctrl {
            format!("Ctrl+{}", key)
        } else {
            key.to_string()
        }
    }

    fn matches(&self, press: KeyPress) -> bool {
        self.ctrl == press.ctrl && self.key.eq_ignore_ascii_case(&press.key)
    }
}

const COMMAND_SHORTCUTS: [Shortcut; 5] = [
    Shortcut::new('z', true, "Undo", ToolbarAction::Command(Command::Undo)),
    Shortcut::new('e', true, "Export", ToolbarAction::Command(Command::Export)),
    Shortcut::new('+', false, "Zoom in", ToolbarAction::Command(Command::ZoomIn)),
    Shortcut::new('=', false, "Zoom in", ToolbarAction::Command(Command::ZoomIn)),
    Shortcut::new('-', false, "Zoom out", ToolbarAction::Command(Command::ZoomOut)),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Tool shortcuts in toolbar order, then command chords.
    pub fn all() -> Vec<Shortcut> {
        let tools = ToolRegistry::list_tools().iter().filter_map(|info| {
            info.shortcut
                .map(|key| Shortcut::new(key, false, info.label, ToolbarAction::SelectTool(info.tool)))
        });
        tools.chain(COMMAND_SHORTCUTS).collect()
    }

    /// The action bound to a key press, if any.
    pub fn lookup(press: KeyPress) -> Option<ToolbarAction> {
        if !press.ctrl {
            if let Some(tool) = ToolRegistry::tool_for_shortcut(press.key) {
                return Some(ToolbarAction::SelectTool(tool));
            }
        }
        COMMAND_SHORTCUTS
            .iter()
            .find(|shortcut| shortcut.matches(press))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:10} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
