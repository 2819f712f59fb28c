//! Active tool selection.

use super::{Tool, ToolGroup, ToolRegistry};

/// Handle returned by [`ToolCoordinator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ToolObserver = Box<dyn FnMut(Tool)>;

/// Owns the single active tool and tells observers about every switch.
pub struct ToolCoordinator {
    active: Tool,
    observers: Vec<(ObserverId, ToolObserver)>,
    next_observer: u64,
}

impl Default for ToolCoordinator {
    fn default() -> Self {
        Self {
            active: Tool::default(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }
}

impl std::fmt::Debug for ToolCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCoordinator")
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ToolCoordinator {
    /// Create a coordinator with `Select` active.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active tool.
    pub fn active_tool(&self) -> Tool {
        self.active
    }

    /// Switch to `tool`. Any tool may follow any tool.
    ///
    /// Observers run before this returns, even when `tool` is already active.
    pub fn select_tool(&mut self, tool: Tool) {
        if self.active != tool {
            log::debug!("Tool changed: {} -> {}", self.active, tool);
        }
        self.active = tool;
        for (_, observer) in &mut self.observers {
            observer(tool);
        }
    }

    /// Switch to the tool bound to `key`, if any.
    pub fn select_by_shortcut(&mut self, key: char) -> Option<Tool> {
        let tool = ToolRegistry::tool_for_shortcut(key)?;
        self.select_tool(tool);
        Some(tool)
    }

    /// Whether the active tool lives in the shapes dropdown.
    pub fn is_shape_active(&self) -> bool {
        ToolRegistry::info(self.active).group == ToolGroup::Shape
    }

    /// Register an observer called with the new tool on every selection.
    pub fn subscribe(&mut self, observer: impl FnMut(Tool) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }
}
