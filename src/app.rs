use crate::canvas::Surface;
use crate::config::EngineConfig;
use crate::engine::DrawingEngine;
use crate::export::ExportFormat;
use crate::geometry::Point;
use crate::panels;
use crate::renderer::Renderer;

/// The eframe application: toolbar, canvas and error reporting around one engine.
pub struct XenEditApp {
    engine: DrawingEngine,
    renderer: Renderer,
    /// Text of the hex color field in the toolbar
    hex_input: String,
    /// Last pointer position over the canvas, used when a release reports none
    last_pointer: Option<Point>,
    /// Message shown in the error window until dismissed
    error_message: Option<String>,
}

impl Default for XenEditApp {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

impl XenEditApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &EngineConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let engine = DrawingEngine::new(config);
        let hex_input = engine.tools().color().to_hex();
        Self {
            engine,
            renderer: Renderer::new(),
            hex_input,
            last_pointer: None,
            error_message: None,
        }
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DrawingEngine {
        &mut self.engine
    }

    pub fn hex_input_mut(&mut self) -> &mut String {
        &mut self.hex_input
    }

    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Applies the hex field as the brush color, reporting bad input.
    pub fn apply_hex_input(&mut self) {
        match self.engine.set_color_hex(&self.hex_input) {
            Ok(color) => self.hex_input = color.to_hex(),
            Err(err) => self.error_message = Some(err.to_string()),
        }
    }

    /// Routes one frame of canvas pointer state to the engine.
    pub fn handle_pointer(&mut self, at: Point, response: &egui::Response) {
        if response.drag_started() {
            self.engine.on_press(at.x, at.y);
        } else if response.dragged() && self.last_pointer != Some(at) {
            self.engine.on_drag(at.x, at.y);
        }
        if response.drag_stopped() {
            if let Err(err) = self.engine.on_release(at.x, at.y) {
                log::warn!("{err}");
            }
            self.last_pointer = None;
        } else {
            self.last_pointer = Some(at);
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let surface = self.engine.surface();
        self.renderer
            .render(ctx, painter, rect, surface.background(), surface.items());
    }

    /// Asks for a destination and writes the canvas there.
    pub fn export(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut dialog = rfd::FileDialog::new()
                .set_title("Export Image")
                .set_file_name("untitled.png");
            for format in ExportFormat::ALL {
                dialog = dialog.add_filter(format.description(), format.extensions());
            }
            if let Some(path) = dialog.save_file() {
                self.export_to(&path);
            }
        }
    }

    /// Writes the canvas to `path`, keeping any failure for the error window.
    pub fn export_to(&mut self, path: &std::path::Path) {
        if let Err(err) = self.engine.export_image(path) {
            self.error_message = Some(err.to_string());
        }
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("Close").clicked() {
                    self.error_message = None;
                }
            });
    }
}

impl eframe::App for XenEditApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        self.error_window(ctx);
    }
}
