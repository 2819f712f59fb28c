//! WebAssembly bindings for the browser toolbar.

use crate::config::AppConfig;
use crate::shortcuts::KeyPress;
use crate::toolbar::{Collaborators, Toolbar};
use js_sys::Function;
use std::rc::Rc;
use thinkboard_core::theme::LocalStorageThemeStore;
use thinkboard_core::{
    AiAssistant, CanvasSurface, CollaboratorError, Command, ExportFlow, HistoryManager, Theme,
    Tool, ZoomDirection,
};
use thinkboard_graph::{DomMountTree, GraphRenderer};
use wasm_bindgen::prelude::*;

thread_local! {
    static GRAPHS: Rc<GraphRenderer<DomMountTree>> = Rc::new(GraphRenderer::new(DomMountTree::new()));
}

fn js_error(collaborator: &'static str, err: JsValue) -> CollaboratorError {
    let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    CollaboratorError::new(collaborator, message)
}

struct JsHistory(Function);

impl HistoryManager for JsHistory {
    fn undo(&mut self) -> Result<bool, CollaboratorError> {
        let result = self.0.call0(&JsValue::NULL).map_err(|e| js_error("history", e))?;
        // Callbacks that return nothing are assumed to have undone something.
        Ok(result.as_bool().unwrap_or(true))
    }
}

struct JsCanvas {
    clear: Function,
    zoom: Function,
}

impl CanvasSurface for JsCanvas {
    fn clear(&mut self) -> Result<(), CollaboratorError> {
        self.clear.call0(&JsValue::NULL).map_err(|e| js_error("canvas", e))?;
        Ok(())
    }

    fn zoom(&mut self, direction: ZoomDirection) -> Result<(), CollaboratorError> {
        let direction = match direction {
            ZoomDirection::In => "in",
            ZoomDirection::Out => "out",
        };
        self.zoom
            .call1(&JsValue::NULL, &JsValue::from_str(direction))
            .map_err(|e| js_error("canvas", e))?;
        Ok(())
    }
}

struct JsCallback {
    name: &'static str,
    callback: Function,
}

impl JsCallback {
    fn invoke(&self) -> Result<(), CollaboratorError> {
        self.callback
            .call0(&JsValue::NULL)
            .map_err(|e| js_error(self.name, e))?;
        Ok(())
    }
}

impl ExportFlow for JsCallback {
    fn open_export(&mut self) -> Result<(), CollaboratorError> {
        self.invoke()
    }
}

impl AiAssistant for JsCallback {
    fn open_assistant(&mut self) -> Result<(), CollaboratorError> {
        self.invoke()
    }
}

fn system_theme() -> Theme {
    let prefers_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false);
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

fn parse_command(name: &str) -> Option<Command> {
    match name {
        "undo" => Some(Command::Undo),
        "clear" => Some(Command::Clear),
        "zoom-in" => Some(Command::ZoomIn),
        "zoom-out" => Some(Command::ZoomOut),
        "export" => Some(Command::Export),
        "ai" => Some(Command::ShowAi),
        "toggle-theme" => Some(Command::ToggleTheme),
        _ => None,
    }
}

/// Toolbar handle exposed to JavaScript. Commands call back into the page.
#[wasm_bindgen]
pub struct WebToolbar {
    toolbar: Toolbar,
    history: JsHistory,
    canvas: JsCanvas,
    exporter: JsCallback,
    assistant: JsCallback,
}

#[wasm_bindgen]
impl WebToolbar {
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_undo: Function,
        on_clear: Function,
        on_zoom: Function,
        on_show_export: Function,
        on_show_ai: Function,
    ) -> WebToolbar {
        let config = AppConfig {
            system_theme: system_theme(),
            ..Default::default()
        };
        WebToolbar {
            toolbar: Toolbar::new(&config, Box::new(LocalStorageThemeStore::new())),
            history: JsHistory(on_undo),
            canvas: JsCanvas {
                clear: on_clear,
                zoom: on_zoom,
            },
            exporter: JsCallback {
                name: "export",
                callback: on_show_export,
            },
            assistant: JsCallback {
                name: "assistant",
                callback: on_show_ai,
            },
        }
    }

    #[wasm_bindgen(js_name = activeTool)]
    pub fn active_tool(&self) -> String {
        self.toolbar.active_tool().id().to_string()
    }

    #[wasm_bindgen(js_name = selectTool)]
    pub fn select_tool(&mut self, name: &str) -> Result<(), JsValue> {
        let tool: Tool = name.parse().map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.toolbar.select_tool(tool);
        Ok(())
    }

    /// Call `callback(toolId)` after every tool selection.
    #[wasm_bindgen(js_name = onToolChange)]
    pub fn on_tool_change(&mut self, callback: Function) {
        self.toolbar.tools_mut().subscribe(move |tool| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(tool.id())) {
                log::warn!("Tool change callback failed: {:?}", err);
            }
        });
    }

    /// Returns false and keeps the previous color if `token` is not a color.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, token: &str) -> bool {
        self.toolbar.set_color(token).is_ok()
    }

    #[wasm_bindgen(js_name = currentColor)]
    pub fn current_color(&self) -> String {
        self.toolbar.current_color().to_hex()
    }

    #[wasm_bindgen(js_name = setStrokeWidth)]
    pub fn set_stroke_width(&mut self, width: i32) {
        self.toolbar.set_stroke_width(width);
    }

    #[wasm_bindgen(js_name = strokeWidth)]
    pub fn stroke_width(&self) -> u8 {
        self.toolbar.current_stroke_width()
    }

    pub fn theme(&self) -> String {
        self.toolbar.theme().as_str().to_string()
    }

    /// Dispatch `undo`, `clear`, `zoom-in`, `zoom-out`, `export`, `ai` or `toggle-theme`.
    pub fn dispatch(&mut self, command: &str) -> Result<(), JsValue> {
        let command = parse_command(command)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown command: {}", command)))?;
        let collaborators = Collaborators {
            history: &mut self.history,
            canvas: &mut self.canvas,
            exporter: &mut self.exporter,
            assistant: &mut self.assistant,
        };
        self.toolbar
            .dispatch(command, collaborators)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Returns whether the key was bound to anything.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: char, ctrl: bool) -> Result<bool, JsValue> {
        let press = KeyPress { key, ctrl };
        let collaborators = Collaborators {
            history: &mut self.history,
            canvas: &mut self.canvas,
            exporter: &mut self.exporter,
            assistant: &mut self.assistant,
        };
        self.toolbar
            .handle_key(press, collaborators)
            .map(|outcome| outcome.is_some())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Render a DOT description into the element with id `element_id`.
///
/// Failures are logged to the console; the promise always resolves.
#[wasm_bindgen(js_name = renderGraph)]
pub async fn render_graph(dot: String, element_id: String) {
    let graphs = GRAPHS.with(Rc::clone);
    graphs.render(&dot, &element_id).await;
}

/// Initialize logging for the WASM module.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&JsValue::from_str(&format!("Logger init failed: {}", err)));
    }
    log::info!("Starting ThinkBoard toolbar (WASM)");
}
