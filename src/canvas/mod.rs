//! The drawable surface the engine paints on.
//!
//! A surface is a display list: every draw call appends one primitive and
//! returns a handle so it can be deleted again (previews rely on this).

use egui::Color32;
use image::RgbaImage;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Point;
use crate::snapshot::Snapshot;

mod raster;

pub use raster::rasterize;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to one primitive on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One drawing call on the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        color: Color32,
        width: f32,
        /// Rounded caps and joins, used for freehand segments
        round_cap: bool,
        /// Arrowhead at the `to` end
        arrow: bool,
    },
    Rect {
        min: Point,
        max: Point,
        color: Color32,
        width: f32,
        /// Drawn with a 5-on 2-off dash pattern
        dashed: bool,
    },
    Oval {
        min: Point,
        max: Point,
        color: Color32,
        width: f32,
    },
    /// Closed outline through the given points
    Polygon {
        points: Vec<Point>,
        color: Color32,
        width: f32,
    },
    /// Image blit with its top-left corner at `origin`
    Image { origin: Point, snapshot: Snapshot },
}

impl Primitive {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { arrow: true, .. } => "arrow",
            Self::Line { .. } => "line",
            Self::Rect { .. } => "rect",
            Self::Oval { .. } => "oval",
            Self::Polygon { .. } => "polygon",
            Self::Image { .. } => "image",
        }
    }
}

/// A primitive together with its handle.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasItem {
    pub id: ItemId,
    pub primitive: Primitive,
}

/// The drawable surface collaborator.
///
/// The engine only ever talks to the canvas through this trait.
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Color shown where nothing has been drawn; the eraser paints with it
    fn background(&self) -> Color32;

    /// Append a primitive on top of everything drawn so far.
    fn draw(&mut self, primitive: Primitive) -> ItemId;

    /// Remove one primitive. Returns false if the handle is unknown.
    fn delete(&mut self, id: ItemId) -> bool;

    /// Remove every primitive, leaving only the background.
    fn clear(&mut self);

    /// Rasterize the current contents into an opaque pixel buffer.
    fn rasterize(&self) -> RgbaImage;

    /// Current display list, bottom to top.
    fn items(&self) -> &[CanvasItem];
}

/// Software surface backed by an in-memory display list.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color32,
    items: Vec<CanvasItem>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            background,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn background(&self) -> Color32 {
        self.background
    }

    fn draw(&mut self, primitive: Primitive) -> ItemId {
        let id = ItemId::next();
        log::trace!("canvas: draw {} as {:?}", primitive.kind(), id);
        self.items.push(CanvasItem { id, primitive });
        id
    }

    fn delete(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before != self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn rasterize(&self) -> RgbaImage {
        rasterize(self.width, self.height, self.background, &self.items)
    }

    fn items(&self) -> &[CanvasItem] {
        &self.items
    }
}
