use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColorError;

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 50;

/// Every tool offered by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Line,
    Rect,
    Oval,
    Triangle,
    Arrow,
    Crop,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Pencil,
        Tool::Eraser,
        Tool::Line,
        Tool::Rect,
        Tool::Oval,
        Tool::Triangle,
        Tool::Arrow,
        Tool::Crop,
    ];

    /// Return the name of the tool
    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Eraser => "eraser",
            Self::Line => "line",
            Self::Rect => "rect",
            Self::Oval => "oval",
            Self::Triangle => "triangle",
            Self::Arrow => "arrow",
            Self::Crop => "crop",
        }
    }

    /// Looks a tool up by its toolbar name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Button caption for the toolbar
    pub fn label(self) -> &'static str {
        match self {
            Self::Pencil => "✏ Pencil",
            Self::Eraser => "⌫ Eraser",
            Self::Line => "╱ Line",
            Self::Rect => "▭ Rect",
            Self::Oval => "◯ Oval",
            Self::Triangle => "△ Triangle",
            Self::Arrow => "➚ Arrow",
            Self::Crop => "✂ Crop",
        }
    }

    /// Freehand tools paint directly while dragging
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Pencil | Self::Eraser)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current tool, color and brush width chosen in the toolbar
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    active_tool: Tool,
    color: Color32,
    stroke_width: u32,
    /// Set while the eraser is selected; cleared by choosing a color
    eraser: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(Color32::BLACK, 3)
    }
}

impl ToolState {
    pub fn new(color: Color32, stroke_width: u32) -> Self {
        Self {
            active_tool: Tool::default(),
            color,
            stroke_width: stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
            eraser: false,
        }
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn is_erasing(&self) -> bool {
        self.eraser
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
        self.eraser = tool == Tool::Eraser;
    }

    /// Choosing a color always leaves eraser mode.
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
        self.eraser = false;
    }

    /// Parses a `#rrggbb` color picker value and applies it.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<Color32, ColorError> {
        let trimmed = hex.trim();
        let color = Color32::from_hex(trimmed)
            .map_err(|_| ColorError::InvalidHex(trimmed.to_owned()))?;
        self.set_color(color);
        Ok(color)
    }

    /// Sets the brush width, clamped to the slider range.
    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    /// Color freehand strokes are drawn with
    pub fn ink(&self, background: Color32) -> Color32 {
        if self.eraser { background } else { self.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name(" Rect "), Some(Tool::Rect));
        assert_eq!(Tool::from_name("lasso"), None);
    }

    #[test]
    fn test_eraser_flag_follows_tool() {
        let mut state = ToolState::default();
        assert!(!state.is_erasing());

        state.set_tool(Tool::Eraser);
        assert!(state.is_erasing());
        assert_eq!(state.ink(Color32::WHITE), Color32::WHITE);

        state.set_tool(Tool::Line);
        assert!(!state.is_erasing());
    }

    #[test]
    fn test_color_exits_eraser() {
        let mut state = ToolState::default();
        state.set_tool(Tool::Eraser);
        state.set_color(Color32::RED);
        assert!(!state.is_erasing());
        assert_eq!(state.active_tool(), Tool::Eraser);
        assert_eq!(state.ink(Color32::WHITE), Color32::RED);
    }

    #[test]
    fn test_hex_color() {
        let mut state = ToolState::default();
        assert_eq!(state.set_color_hex("#00ff00"), Ok(Color32::from_rgb(0, 255, 0)));
        assert_eq!(state.color(), Color32::from_rgb(0, 255, 0));

        assert!(matches!(state.set_color_hex("green"), Err(ColorError::InvalidHex(_))));
        assert_eq!(state.color(), Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_stroke_width_is_clamped() {
        let mut state = ToolState::default();
        assert_eq!(state.stroke_width(), 3);
        state.set_stroke_width(0);
        assert_eq!(state.stroke_width(), MIN_STROKE_WIDTH);
        state.set_stroke_width(500);
        assert_eq!(state.stroke_width(), MAX_STROKE_WIDTH);
    }
}
