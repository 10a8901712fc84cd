//! The drawing engine: tool state, pointer gestures, snapshots and history.
//!
//! Every finished gesture rasterizes the whole surface into a [`Snapshot`].
//! Undo and redo never replay shapes; they clear the surface and blit the
//! stored pixels back at the origin.

use egui::Color32;
use std::path::Path;

use crate::canvas::{Canvas, ItemId, Primitive, Surface};
use crate::config::EngineConfig;
use crate::error::{ColorError, ExportError, GestureError};
use crate::export::{self, ExportFormat};
use crate::geometry::{self, PixelRect, Point};
use crate::gesture::GestureState;
use crate::history::History;
use crate::snapshot::Snapshot;
use crate::tools::{Tool, ToolState};

/// Outline color of the crop selection indicator
pub const CROP_INDICATOR_COLOR: Color32 = Color32::RED;

/// Owns everything a drawing session mutates.
#[derive(Debug)]
pub struct DrawingEngine<S: Surface = Canvas> {
    surface: S,
    tools: ToolState,
    gesture: GestureState,
    history: History,
    pdf_dpi: f32,
}

impl DrawingEngine<Canvas> {
    /// Creates an engine on a fresh software canvas.
    pub fn new(config: &EngineConfig) -> Self {
        let canvas = Canvas::new(config.canvas_width, config.canvas_height, config.background);
        let mut engine = Self::with_surface(canvas);
        engine.tools = ToolState::new(config.default_color, config.default_stroke_width);
        engine.pdf_dpi = config.pdf_dpi;
        engine
    }
}

impl Default for DrawingEngine<Canvas> {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl<S: Surface> DrawingEngine<S> {
    /// Wraps an existing surface and records its current contents as the history floor.
    pub fn with_surface(surface: S) -> Self {
        let mut engine = Self {
            surface,
            tools: ToolState::default(),
            gesture: GestureState::default(),
            history: History::new(),
            pdf_dpi: EngineConfig::default().pdf_dpi,
        };
        let floor = Snapshot::new(engine.surface.rasterize());
        engine.history.push(floor);
        engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    // --- tool selection ---

    pub fn set_tool(&mut self, tool: Tool) {
        log::info!("Tool selected: {tool}");
        self.tools.set_tool(tool);
    }

    /// Selects a tool by its toolbar name. Returns false for unknown names.
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        match Tool::from_name(name) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => {
                log::warn!("Unknown tool name: {name}");
                false
            }
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        log::debug!("Color selected: {}", color.to_hex());
        self.tools.set_color(color);
    }

    /// Applies a `#rrggbb` value returned by a color picker.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<Color32, ColorError> {
        let color = self.tools.set_color_hex(hex)?;
        log::debug!("Color selected: {}", color.to_hex());
        Ok(color)
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.tools.set_stroke_width(width);
    }

    // --- gesture protocol ---

    pub fn on_press(&mut self, x: i32, y: i32) {
        let at = Point::new(x, y);
        if let Some(stale) = self.gesture.press(at) {
            log::warn!("Press at {at:?} while a gesture from {:?} was still active", stale.anchor);
            self.discard_preview(stale.preview);
        }
        log::debug!("gesture: press {at:?} with {}", self.tools.active_tool());
    }

    pub fn on_drag(&mut self, x: i32, y: i32) {
        let at = Point::new(x, y);
        let tool = self.tools.active_tool();
        let width = self.tools.stroke_width() as f32;
        let ink = self.tools.ink(self.surface.background());

        let Some(gesture) = self.gesture.active_mut() else {
            log::debug!("gesture: ignoring drag to {at:?} without press");
            return;
        };
        gesture.current = at;

        if tool.is_freehand() {
            self.surface.draw(Primitive::Line {
                from: gesture.anchor,
                to: at,
                color: ink,
                width,
                round_cap: true,
                arrow: false,
            });
            gesture.anchor = at;
            return;
        }

        if let Some(previous) = gesture.preview.take() {
            self.surface.delete(previous);
        }
        let primitive = match tool {
            Tool::Crop => crop_indicator(gesture.anchor, at),
            _ => shape_preview(tool, gesture.anchor, at, self.tools.color(), width),
        };
        gesture.preview = Some(self.surface.draw(primitive));
    }

    /// Finishes the gesture: commits a snapshot, or crops in crop mode.
    pub fn on_release(&mut self, x: i32, y: i32) -> Result<(), GestureError> {
        let at = Point::new(x, y);
        let Some(gesture) = self.gesture.release() else {
            log::warn!("gesture: release at {at:?} without press");
            return Err(GestureError::ReleaseWithoutPress { x, y });
        };
        log::debug!("gesture: release {at:?} from {:?}", gesture.anchor);

        if self.tools.active_tool() == Tool::Crop {
            self.discard_preview(gesture.preview);
            self.crop_area(gesture.anchor.x, gesture.anchor.y, x, y);
        } else {
            self.commit_snapshot();
        }
        Ok(())
    }

    // --- history ---

    /// Rasterizes the surface and records it as the newest state.
    ///
    /// The display list is then collapsed to the snapshot itself, so committed
    /// strokes are never rasterized again.
    pub fn commit_snapshot(&mut self) {
        let snapshot = Snapshot::new(self.surface.rasterize());
        self.history.push(snapshot.clone());
        self.restore(snapshot);
    }

    pub fn undo(&mut self) {
        match self.history.undo() {
            Ok(snapshot) => {
                let snapshot = snapshot.clone();
                log::debug!("history: undo to snapshot {}", snapshot.id());
                self.restore(snapshot);
            }
            Err(err) => log::debug!("history: {err}"),
        }
    }

    pub fn redo(&mut self) {
        match self.history.redo() {
            Ok(snapshot) => {
                let snapshot = snapshot.clone();
                log::debug!("history: redo to snapshot {}", snapshot.id());
                self.restore(snapshot);
            }
            Err(err) => log::debug!("history: {err}"),
        }
    }

    /// Replaces everything on the surface with `snapshot` at the origin.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.surface.clear();
        if let Some(gesture) = self.gesture.active_mut() {
            gesture.preview = None;
        }
        self.surface.draw(Primitive::Image {
            origin: Point::ORIGIN,
            snapshot,
        });
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.history.current()
    }

    pub fn rasterize(&self) -> image::RgbaImage {
        self.surface.rasterize()
    }

    // --- crop & export ---

    /// Crops the canvas to the rectangle spanned by the two corners.
    ///
    /// The cropped pixels are pasted at the origin over a cleared surface of
    /// unchanged size. Returns `false`, changing nothing, when the clamped
    /// rectangle has no area.
    pub fn crop_area(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let (width, height) = self.surface.size();
        let rect = PixelRect::from_corners(Point::new(x1, y1), Point::new(x2, y2))
            .clamp_to(width, height);
        if rect.is_empty() {
            log::debug!("crop: ignoring empty selection {rect:?}");
            return false;
        }

        let full = self.surface.rasterize();
        let cropped = image::imageops::crop_imm(
            &full,
            rect.min.x as u32,
            rect.min.y as u32,
            rect.width(),
            rect.height(),
        )
        .to_image();
        log::info!("Cropped canvas to {}x{} at {:?}", rect.width(), rect.height(), rect.min);

        self.restore(Snapshot::new(cropped));
        self.commit_snapshot();
        true
    }

    /// Writes the canvas to `path`, choosing the format from its extension.
    ///
    /// Never touches the surface or the history.
    pub fn export_image(&self, path: &Path) -> Result<ExportFormat, ExportError> {
        let pixels = self.surface.rasterize();
        match export::write_image(&pixels, path, self.pdf_dpi) {
            Ok(format) => {
                log::info!("Image exported to {}", path.display());
                Ok(format)
            }
            Err(err) => {
                log::error!("Export to {} failed: {err}", path.display());
                Err(err)
            }
        }
    }

    fn discard_preview(&mut self, preview: Option<ItemId>) {
        if let Some(id) = preview {
            self.surface.delete(id);
        }
    }
}

/// Outline-only preview for a shape tool dragged from `anchor` to `current`.
pub fn shape_preview(tool: Tool, anchor: Point, current: Point, color: Color32, width: f32) -> Primitive {
    match tool {
        Tool::Rect => Primitive::Rect {
            min: anchor,
            max: current,
            color,
            width,
            dashed: false,
        },
        Tool::Oval => Primitive::Oval {
            min: anchor,
            max: current,
            color,
            width,
        },
        Tool::Triangle => Primitive::Polygon {
            points: geometry::triangle_points(anchor, current).to_vec(),
            color,
            width,
        },
        Tool::Line | Tool::Arrow | Tool::Pencil | Tool::Eraser | Tool::Crop => Primitive::Line {
            from: anchor,
            to: current,
            color,
            width,
            round_cap: false,
            arrow: tool == Tool::Arrow,
        },
    }
}

/// Dashed selection rectangle shown while cropping
pub fn crop_indicator(anchor: Point, current: Point) -> Primitive {
    Primitive::Rect {
        min: anchor,
        max: current,
        color: CROP_INDICATOR_COLOR,
        width: 1.0,
        dashed: true,
    }
}
