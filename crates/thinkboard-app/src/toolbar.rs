//! The toolbar: tool selection, stroke settings and command dispatch.

use crate::config::AppConfig;
use crate::shortcuts::{KeyPress, ShortcutRegistry};
use thinkboard_core::{
    AiAssistant, CanvasSurface, Color, Command, CommandContext, CommandDispatcher, CommandError,
    CommandOutcome, DrawingConfig, DrawingStyle, ExportFlow, HistoryManager, InvalidColor,
    SharedDrawingConfig, Theme, ThemeState, ThemeStore, Tool, ToolCoordinator,
};

/// Something the user asked the toolbar to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    SelectTool(Tool),
    Command(Command),
}

/// External collaborators borrowed for one command.
pub struct Collaborators<'a> {
    pub history: &'a mut dyn HistoryManager,
    pub canvas: &'a mut dyn CanvasSurface,
    pub exporter: &'a mut dyn ExportFlow,
    pub assistant: &'a mut dyn AiAssistant,
}

/// Toolbar state shared by the native shell and the web bindings.
pub struct Toolbar {
    tools: ToolCoordinator,
    config: SharedDrawingConfig,
    theme: ThemeState,
    dispatcher: CommandDispatcher,
}

impl Toolbar {
    /// Build a toolbar from settings and a theme preference store.
    pub fn new(config: &AppConfig, theme_store: Box<dyn ThemeStore>) -> Self {
        let color = Color::parse(&config.default_color).unwrap_or_else(|err| {
            log::warn!("{}, using black", err);
            Color::BLACK
        });
        Self {
            tools: ToolCoordinator::new(),
            config: DrawingConfig::with_style(color, config.default_stroke_width).shared(),
            theme: ThemeState::init(theme_store, config.system_theme),
            dispatcher: CommandDispatcher::new(),
        }
    }

    pub fn active_tool(&self) -> Tool {
        self.tools.active_tool()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select_tool(tool);
    }

    /// Coordinator access, e.g. to subscribe highlight observers.
    pub fn tools_mut(&mut self) -> &mut ToolCoordinator {
        &mut self.tools
    }

    /// Handle shared with the drawing engine.
    pub fn drawing_config(&self) -> SharedDrawingConfig {
        self.config.clone()
    }

    pub fn set_color(&mut self, token: &str) -> Result<(), InvalidColor> {
        self.config.borrow_mut().set_color(token)
    }

    pub fn set_stroke_width(&mut self, width: i32) {
        self.config.borrow_mut().set_stroke_width(width);
    }

    pub fn current_color(&self) -> Color {
        self.config.borrow().current_color()
    }

    pub fn current_stroke_width(&self) -> u8 {
        self.config.borrow().current_stroke_width()
    }

    /// Style the next stroke will use.
    pub fn style(&self) -> DrawingStyle {
        self.config.borrow().snapshot()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Route a command. Collaborator failures are passed back untouched.
    pub fn dispatch(
        &mut self,
        command: Command,
        collaborators: Collaborators<'_>,
    ) -> Result<CommandOutcome, CommandError> {
        let mut ctx = CommandContext {
            history: collaborators.history,
            canvas: collaborators.canvas,
            exporter: collaborators.exporter,
            assistant: collaborators.assistant,
            theme: &mut self.theme,
        };
        self.dispatcher.dispatch(command, &mut ctx)
    }

    /// Apply an action. Tool selections always report `Routed`.
    pub fn perform(
        &mut self,
        action: ToolbarAction,
        collaborators: Collaborators<'_>,
    ) -> Result<CommandOutcome, CommandError> {
        match action {
            ToolbarAction::SelectTool(tool) => {
                self.select_tool(tool);
                Ok(CommandOutcome::Routed)
            }
            ToolbarAction::Command(command) => self.dispatch(command, collaborators),
        }
    }

    /// Resolve a key press against the shortcut table and apply it.
    ///
    /// Returns `Ok(None)` for unbound keys.
    pub fn handle_key(
        &mut self,
        press: KeyPress,
        collaborators: Collaborators<'_>,
    ) -> Result<Option<CommandOutcome>, CommandError> {
        match ShortcutRegistry::lookup(press) {
            Some(action) => self.perform(action, collaborators).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use thinkboard_core::MemoryThemeStore;

    fn toolbar() -> Toolbar {
        Toolbar::new(&AppConfig::default(), Box::new(MemoryThemeStore::new()))
    }

    #[test]
    fn test_defaults_from_config() {
        let config = AppConfig {
            default_color: "#1e40af".to_string(),
            default_stroke_width: 40,
            system_theme: Theme::Dark,
            ..Default::default()
        };
        let toolbar = Toolbar::new(&config, Box::new(MemoryThemeStore::new()));
        assert_eq!(toolbar.current_color().to_hex(), "#1e40af");
        assert_eq!(toolbar.current_stroke_width(), 10);
        assert_eq!(toolbar.theme(), Theme::Dark);
        assert_eq!(toolbar.active_tool(), Tool::Select);
    }

    #[test]
    fn test_bad_default_color_falls_back() {
        let config = AppConfig {
            default_color: "chartreuse-ish".to_string(),
            ..Default::default()
        };
        let toolbar = Toolbar::new(&config, Box::new(MemoryThemeStore::new()));
        assert_eq!(toolbar.current_color(), Color::BLACK);
    }

    #[test]
    fn test_handle_key() {
        let mut toolbar = toolbar();
        let mut board = Board::new();

        toolbar.handle_key(KeyPress::plain('h'), board.collaborators()).unwrap();
        assert_eq!(toolbar.active_tool(), Tool::Hexagon);

        let outcome = toolbar.handle_key(KeyPress::ctrl('z'), board.collaborators()).unwrap();
        assert_eq!(outcome, Some(CommandOutcome::NoOp));

        let outcome = toolbar.handle_key(KeyPress::plain('?'), board.collaborators()).unwrap();
        assert_eq!(outcome, None);
        assert_eq!(toolbar.active_tool(), Tool::Hexagon);
    }

    #[test]
    fn test_engine_sees_config_through_shared_handle() {
        let mut toolbar = toolbar();
        let engine_view = toolbar.drawing_config();
        toolbar.set_stroke_width(6);
        assert_eq!(engine_view.borrow().current_stroke_width(), 6);
    }
}
