//! Shared drawing configuration: stroke color and width.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

/// Thinnest allowed stroke.
pub const MIN_STROKE_WIDTH: u8 = 1;
/// Thickest allowed stroke.
pub const MAX_STROKE_WIDTH: u8 = 10;
/// Stroke width for a fresh config.
pub const DEFAULT_STROKE_WIDTH: u8 = 2;

/// Quick-pick swatches shown in the toolbar.
pub const PALETTE: [&str; 6] = ["#1e40af", "#dc2626", "#059669", "#d97706", "#7c3aed", "#000000"];

/// A color token could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color: {0:?}")]
pub struct InvalidColor(pub String);

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB`, `#RGB` or named color token.
    pub fn parse(token: &str) -> Result<Self, InvalidColor> {
        let trimmed = token.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => named_color(trimmed),
        };
        parsed.ok_or_else(|| InvalidColor(token.to_string()))
    }

    /// Canonical lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(Color::from_rgb(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            // #abc expands to #aabbcc
            let mut channels = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color::from_rgb(channels.next()??, channels.next()??, channels.next()??))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "pink" => (255, 192, 203),
        "gray" | "grey" => (128, 128, 128),
        "brown" => (165, 42, 42),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "lime" => (0, 255, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "silver" => (192, 192, 192),
        _ => return None,
    };
    Some(Color::from_rgb(rgb.0, rgb.1, rgb.2))
}

/// Immutable snapshot handed to the drawing engine for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingStyle {
    pub color: Color,
    pub stroke_width: u8,
}

/// Change notification sent to config observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    ColorChanged(Color),
    /// The attempted token was rejected; the previous color is still active.
    ColorRejected(String),
    StrokeWidthChanged(u8),
}

type ConfigObserver = Box<dyn FnMut(&ConfigEvent)>;

/// Active color and stroke width, read by whichever tool draws next.
pub struct DrawingConfig {
    color: Color,
    stroke_width: u8,
    observers: Vec<ConfigObserver>,
}

/// Handle shared between the toolbar and the drawing engine.
pub type SharedDrawingConfig = Rc<RefCell<DrawingConfig>>;

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            observers: Vec::new(),
        }
    }
}

impl fmt::Debug for DrawingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingConfig")
            .field("color", &self.color)
            .field("stroke_width", &self.stroke_width)
            .finish_non_exhaustive()
    }
}

impl DrawingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given style, clamping the width.
    pub fn with_style(color: Color, stroke_width: i32) -> Self {
        Self {
            color,
            stroke_width: clamp_width(stroke_width),
            observers: Vec::new(),
        }
    }

    /// Wrap in a shared handle.
    pub fn shared(self) -> SharedDrawingConfig {
        Rc::new(RefCell::new(self))
    }

    pub fn current_color(&self) -> Color {
        self.color
    }

    pub fn current_stroke_width(&self) -> u8 {
        self.stroke_width
    }

    pub fn snapshot(&self) -> DrawingStyle {
        DrawingStyle {
            color: self.color,
            stroke_width: self.stroke_width,
        }
    }

    /// Commit a new color, or keep the current one if `token` does not parse.
    pub fn set_color(&mut self, token: &str) -> Result<(), InvalidColor> {
        match Color::parse(token) {
            Ok(color) => {
                log::debug!("Color changed: {} -> {}", self.color, color);
                self.color = color;
                self.notify(&ConfigEvent::ColorChanged(color));
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected color {:?}, keeping {}", token, self.color);
                self.notify(&ConfigEvent::ColorRejected(token.to_string()));
                Err(err)
            }
        }
    }

    /// Commit a stroke width, silently clamped into [1, 10].
    pub fn set_stroke_width(&mut self, width: i32) {
        let clamped = clamp_width(width);
        if i32::from(clamped) != width {
            log::debug!("Stroke width {} clamped to {}", width, clamped);
        }
        self.stroke_width = clamped;
        self.notify(&ConfigEvent::StrokeWidthChanged(clamped));
    }

    /// Register an observer for every write, accepted or rejected.
    ///
    /// Observers receive the new value and must not re-borrow a shared handle.
    pub fn subscribe(&mut self, observer: impl FnMut(&ConfigEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: &ConfigEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

fn clamp_width(width: i32) -> u8 {
    width.clamp(i32::from(MIN_STROKE_WIDTH), i32::from(MAX_STROKE_WIDTH)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#112233"), Ok(Color::from_rgb(0x11, 0x22, 0x33)));
        assert_eq!(Color::parse("#FF0000"), Ok(Color::from_rgb(255, 0, 0)));
        assert_eq!(Color::parse("#abc"), Ok(Color::from_rgb(0xaa, 0xbb, 0xcc)));
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::parse("#").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("Red"), Ok(Color::from_rgb(255, 0, 0)));
        assert_eq!(Color::parse("grey"), Color::parse("gray"));
        assert_eq!(
            Color::parse("not-a-color"),
            Err(InvalidColor("not-a-color".to_string()))
        );
    }

    #[test]
    fn test_palette_parses() {
        for swatch in PALETTE {
            assert_eq!(Color::parse(swatch).unwrap().to_hex(), swatch);
        }
    }

    #[test]
    fn test_set_color() {
        let mut config = DrawingConfig::new();
        config.set_color("#112233").unwrap();
        assert_eq!(config.current_color().to_hex(), "#112233");

        assert!(config.set_color("not-a-color").is_err());
        assert_eq!(config.current_color().to_hex(), "#112233");
    }

    #[test]
    fn test_stroke_width_clamped() {
        let mut config = DrawingConfig::new();
        for (input, expected) in [(0, 1), (15, 10), (5, 5), (-3, 1), (1, 1), (10, 10)] {
            config.set_stroke_width(input);
            assert_eq!(config.current_stroke_width(), expected, "input {input}");
        }
    }

    #[test]
    fn test_observers_see_changes_and_rejections() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let events = Rc::new(RefCell::new(Vec::new()));
        let mut config = DrawingConfig::new();
        let sink = events.clone();
        config.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        config.set_color("#ff0000").unwrap();
        let _ = config.set_color("bogus");
        config.set_stroke_width(20);

        assert_eq!(
            *events.borrow(),
            vec![
                ConfigEvent::ColorChanged(Color::from_rgb(255, 0, 0)),
                ConfigEvent::ColorRejected("bogus".to_string()),
                ConfigEvent::StrokeWidthChanged(10),
            ]
        );
    }

    #[test]
    fn test_shared_handle_sees_latest_write() {
        let shared = DrawingConfig::new().shared();
        let engine_view = shared.clone();

        shared.borrow_mut().set_stroke_width(7);
        shared.borrow_mut().set_color("blue").unwrap();

        let style = engine_view.borrow().snapshot();
        assert_eq!(style.stroke_width, 7);
        assert_eq!(style.color, Color::from_rgb(0, 0, 255));
    }
}
