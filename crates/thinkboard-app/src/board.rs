//! Reference in-memory board: the collaborators the toolbar talks to.

use std::cell::RefCell;
use std::rc::Rc;
use thinkboard_core::{
    AiAssistant, CanvasSurface, CollaboratorError, DrawingStyle, ExportFlow, HistoryManager, Tool,
    ZoomDirection,
};

use crate::toolbar::Collaborators;

/// Zoom factor applied per zoom command.
pub const ZOOM_STEP: f64 = 1.25;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A committed stroke. Its style is frozen at commit time.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub tool: Tool,
    pub style: DrawingStyle,
}

#[derive(Debug, Default)]
struct Document {
    strokes: Vec<Stroke>,
    undo_stack: Vec<Vec<Stroke>>,
}

impl Document {
    fn push_undo(&mut self) {
        self.undo_stack.push(self.strokes.clone());
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }
}

/// Viewport scale, clamped to its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Viewport {
    /// Step the zoom one notch.
    pub fn step(&mut self, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom as a whole percentage for display.
    pub fn percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

/// Undo history over the board document.
#[derive(Debug)]
pub struct BoardHistory {
    document: Rc<RefCell<Document>>,
}

impl HistoryManager for BoardHistory {
    fn undo(&mut self) -> Result<bool, CollaboratorError> {
        let mut doc = self.document.borrow_mut();
        match doc.undo_stack.pop() {
            Some(previous) => {
                doc.strokes = previous;
                log::info!("Undo performed");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Canvas surface: clearing and zooming.
#[derive(Debug)]
pub struct BoardCanvas {
    document: Rc<RefCell<Document>>,
    pub viewport: Viewport,
}

impl CanvasSurface for BoardCanvas {
    fn clear(&mut self) -> Result<(), CollaboratorError> {
        let mut doc = self.document.borrow_mut();
        if !doc.strokes.is_empty() {
            doc.push_undo();
            doc.strokes.clear();
            log::info!("Document cleared");
        }
        Ok(())
    }

    fn zoom(&mut self, direction: ZoomDirection) -> Result<(), CollaboratorError> {
        self.viewport.step(direction);
        log::debug!("Zoom now {}%", self.viewport.percent());
        Ok(())
    }
}

/// Export dialog stand-in; counts how often it was opened.
#[derive(Debug, Default)]
pub struct ExportPanel {
    pub opened: u32,
}

impl ExportFlow for ExportPanel {
    fn open_export(&mut self) -> Result<(), CollaboratorError> {
        self.opened += 1;
        Ok(())
    }
}

/// AI-assist stand-in; counts how often it was opened.
#[derive(Debug, Default)]
pub struct AssistantPanel {
    pub opened: u32,
}

impl AiAssistant for AssistantPanel {
    fn open_assistant(&mut self) -> Result<(), CollaboratorError> {
        self.opened += 1;
        Ok(())
    }
}

/// In-memory board owning every collaborator.
#[derive(Debug)]
pub struct Board {
    document: Rc<RefCell<Document>>,
    pub history: BoardHistory,
    pub canvas: BoardCanvas,
    pub export: ExportPanel,
    pub assistant: AssistantPanel,
}

impl Default for Board {
    fn default() -> Self {
        let document = Rc::new(RefCell::new(Document::default()));
        Self {
            history: BoardHistory {
                document: document.clone(),
            },
            canvas: BoardCanvas {
                document: document.clone(),
                viewport: Viewport::default(),
            },
            document,
            export: ExportPanel::default(),
            assistant: AssistantPanel::default(),
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform one draw with `tool` using the given style snapshot.
    ///
    /// Select does nothing, the eraser removes the newest stroke, every other
    /// tool commits a stroke. Returns whether the document changed.
    pub fn apply_tool(&mut self, tool: Tool, style: DrawingStyle) -> bool {
        let mut doc = self.document.borrow_mut();
        match tool {
            Tool::Select => false,
            Tool::Eraser => {
                if doc.strokes.is_empty() {
                    return false;
                }
                doc.push_undo();
                doc.strokes.pop();
                true
            }
            _ => {
                doc.push_undo();
                doc.strokes.push(Stroke { tool, style });
                true
            }
        }
    }

    pub fn strokes(&self) -> Vec<Stroke> {
        self.document.borrow().strokes.clone()
    }

    pub fn stroke_count(&self) -> usize {
        self.document.borrow().strokes.len()
    }

    pub fn zoom(&self) -> f64 {
        self.canvas.viewport.zoom
    }

    /// Borrow the collaborators for a dispatch.
    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators {
            history: &mut self.history,
            canvas: &mut self.canvas,
            exporter: &mut self.export,
            assistant: &mut self.assistant,
        }
    }
}
