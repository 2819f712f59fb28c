//! Line-oriented script format driving the native shell.
//!
//! ```text
//! # comment
//! tool rectangle
//! color #ff0000
//! width 20
//! stroke
//! key ctrl+z
//! clear
//! mount graph
//! graph graph digraph G { a -> b }
//! status
//! ```

use thinkboard_core::{Command, Tool, UnknownTool};
use thiserror::Error;

use crate::shortcuts::KeyPress;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    Tool(Tool),
    Color(String),
    Width(i32),
    /// Draw once with the active tool.
    Stroke,
    Key(KeyPress),
    Command(Command),
    /// Create an empty mount point.
    Mount(String),
    Graph { mount: String, description: String },
    Status,
    Shortcuts,
}

/// Script parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    UnknownTool(#[from] UnknownTool),
    #[error("Invalid width: {0}")]
    InvalidWidth(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
///
/// Colors start with `#`, so a comment must be the whole line.
pub fn parse_line(line: &str) -> Result<Option<ScriptAction>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let action = match word.to_ascii_lowercase().as_str() {
        "tool" => ScriptAction::Tool(required(rest, "tool")?.parse()?),
        "color" => ScriptAction::Color(required(rest, "color")?.to_string()),
        "width" => {
            let raw = required(rest, "width")?;
            ScriptAction::Width(raw.parse().map_err(|_| ScriptError::InvalidWidth(raw.to_string()))?)
        }
        "stroke" => ScriptAction::Stroke,
        "key" => ScriptAction::Key(parse_key(required(rest, "key")?)?),
        "undo" => ScriptAction::Command(Command::Undo),
        "clear" => ScriptAction::Command(Command::Clear),
        "zoom" => match required(rest, "zoom")? {
            "in" => ScriptAction::Command(Command::ZoomIn),
            "out" => ScriptAction::Command(Command::ZoomOut),
            other => return Err(ScriptError::UnknownInstruction(format!("zoom {}", other))),
        },
        "export" => ScriptAction::Command(Command::Export),
        "ai" => ScriptAction::Command(Command::ShowAi),
        "theme" => ScriptAction::Command(Command::ToggleTheme),
        "mount" => ScriptAction::Mount(required(rest, "mount")?.to_string()),
        "graph" => {
            let (mount, description) = required(rest, "graph")?
                .split_once(char::is_whitespace)
                .ok_or(ScriptError::MissingArgument("graph description"))?;
            ScriptAction::Graph {
                mount: mount.to_string(),
                description: description.trim().to_string(),
            }
        }
        "status" => ScriptAction::Status,
        "shortcuts" => ScriptAction::Shortcuts,
        _ => return Err(ScriptError::UnknownInstruction(word.to_string())),
    };
    Ok(Some(action))
}

fn required<'a>(rest: &'a str, name: &'static str) -> Result<&'a str, ScriptError> {
    if rest.is_empty() {
        Err(ScriptError::MissingArgument(name))
    } else {
        Ok(rest)
    }
}

fn parse_key(token: &str) -> Result<KeyPress, ScriptError> {
    let (ctrl, key) = match token.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("ctrl+") => (true, &token[5..]),
        _ => (false, token),
    };
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Ok(KeyPress { key, ctrl }),
        _ => Err(ScriptError::InvalidKey(token.to_string())),
    }
}
