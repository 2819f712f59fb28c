//! Routes commands to collaborators.

use super::{Command, CommandContext, CommandError, CommandOutcome, ZoomDirection};

/// Fan-out of command intents. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Route `command`. Collaborator errors are returned as-is, never retried.
    pub fn dispatch(
        &self,
        command: Command,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandOutcome, CommandError> {
        log::info!("Dispatching {}", command);
        let outcome = match command {
            Command::Undo => {
                if ctx.history.undo()? {
                    CommandOutcome::Routed
                } else {
                    log::debug!("Nothing to undo");
                    CommandOutcome::NoOp
                }
            }
            Command::Clear => {
                ctx.canvas.clear()?;
                CommandOutcome::Routed
            }
            Command::ZoomIn => {
                ctx.canvas.zoom(ZoomDirection::In)?;
                CommandOutcome::Routed
            }
            Command::ZoomOut => {
                ctx.canvas.zoom(ZoomDirection::Out)?;
                CommandOutcome::Routed
            }
            Command::Export => {
                ctx.exporter.open_export()?;
                CommandOutcome::Routed
            }
            Command::ShowAi => {
                ctx.assistant.open_assistant()?;
                CommandOutcome::Routed
            }
            Command::ToggleTheme => CommandOutcome::ThemeChanged(ctx.theme.toggle()?),
        };
        Ok(outcome)
    }
}
