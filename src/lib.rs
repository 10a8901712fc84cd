#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod panels;
pub mod renderer;
pub mod snapshot;
pub mod texture_manager;
pub mod tools;

pub use app::XenEditApp;
pub use canvas::{Canvas, ItemId, Primitive, Surface};
pub use config::EngineConfig;
pub use engine::DrawingEngine;
pub use error::{ColorError, ExportError, GestureError, HistoryError};
pub use export::ExportFormat;
pub use geometry::Point;
pub use renderer::Renderer;
pub use snapshot::Snapshot;
pub use tools::{Tool, ToolState};
