//! A native session: toolbar, in-memory board and graph mounts.

use crate::board::Board;
use crate::config::AppConfig;
use crate::script::ScriptAction;
use crate::shortcuts::ShortcutRegistry;
use crate::toolbar::Toolbar;
use thinkboard_core::{CommandError, CommandOutcome, ThemeStore};
use thinkboard_graph::{GraphRenderer, MemoryMountTree};

/// Everything a script runs against.
pub struct Session {
    pub toolbar: Toolbar,
    pub board: Board,
    pub graphs: GraphRenderer<MemoryMountTree>,
}

impl Session {
    pub fn new(config: &AppConfig, theme_store: Box<dyn ThemeStore>) -> Self {
        Self {
            toolbar: Toolbar::new(config, theme_store),
            board: Board::new(),
            graphs: GraphRenderer::new(MemoryMountTree::new()),
        }
    }

    /// Run one action. Returns text to show the user, if any.
    ///
    /// Rejected colors are reported, not returned as errors; collaborator
    /// failures are.
    pub async fn apply(&mut self, action: ScriptAction) -> Result<Option<String>, CommandError> {
        match action {
            ScriptAction::Tool(tool) => self.toolbar.select_tool(tool),
            ScriptAction::Color(token) => {
                if let Err(err) = self.toolbar.set_color(&token) {
                    return Ok(Some(err.to_string()));
                }
            }
            ScriptAction::Width(width) => self.toolbar.set_stroke_width(width),
            ScriptAction::Stroke => {
                let tool = self.toolbar.active_tool();
                let style = self.toolbar.style();
                self.board.apply_tool(tool, style);
            }
            ScriptAction::Key(press) => {
                self.toolbar.handle_key(press, self.board.collaborators())?;
            }
            ScriptAction::Command(command) => {
                let outcome = self.toolbar.dispatch(command, self.board.collaborators())?;
                if let CommandOutcome::ThemeChanged(theme) = outcome {
                    return Ok(Some(format!("Theme: {}", theme)));
                }
            }
            ScriptAction::Mount(mount) => self.graphs.mounts_mut().add_mount(mount),
            ScriptAction::Graph { mount, description } => {
                self.graphs.render(&description, &mount).await;
            }
            ScriptAction::Status => return Ok(Some(self.status())),
            ScriptAction::Shortcuts => ShortcutRegistry::print_all(),
        }
        Ok(None)
    }

    /// One-line summary of the toolbar and board.
    pub fn status(&self) -> String {
        format!(
            "tool={} color={} width={} theme={} zoom={}% strokes={}",
            self.toolbar.active_tool(),
            self.toolbar.current_color(),
            self.toolbar.current_stroke_width(),
            self.toolbar.theme(),
            self.board.canvas.viewport.percent(),
            self.board.stroke_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_line;
    use thinkboard_core::MemoryThemeStore;

    fn run(session: &mut Session, lines: &[&str]) -> Vec<String> {
        let mut output = Vec::new();
        for line in lines {
            if let Some(action) = parse_line(line).unwrap() {
                if let Some(text) = pollster::block_on(session.apply(action)).unwrap() {
                    output.push(text);
                }
            }
        }
        output
    }

    #[test]
    fn test_status_line() {
        let mut session = Session::new(&AppConfig::default(), Box::new(MemoryThemeStore::new()));
        let output = run(&mut session, &["tool star", "width 4", "stroke", "zoom in", "status"]);
        assert_eq!(
            output,
            vec!["tool=star color=#000000 width=4 theme=light zoom=125% strokes=1".to_string()]
        );
    }

    #[test]
    fn test_rejected_color_is_reported() {
        let mut session = Session::new(&AppConfig::default(), Box::new(MemoryThemeStore::new()));
        let output = run(&mut session, &["color #12", "color red"]);
        assert_eq!(output, vec!["Invalid color: \"#12\"".to_string()]);
        assert_eq!(session.toolbar.current_color().to_hex(), "#ff0000");
    }

    #[test]
    fn test_graph_into_mount() {
        let mut session = Session::new(&AppConfig::default(), Box::new(MemoryThemeStore::new()));
        run(
            &mut session,
            &[
                "mount out",
                "graph out digraph G { a -> b; }",
                "graph out digraph G { c -> d; }",
                "graph missing digraph G { a -> b; }",
            ],
        );
        let mounts = session.graphs.mounts();
        assert_eq!(mounts.children("out").unwrap().len(), 1);
        assert!(mounts.children("missing").is_none());
    }
}
