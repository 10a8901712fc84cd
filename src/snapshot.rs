use image::RgbaImage;
use std::sync::atomic::{AtomicUsize, Ordering};

// Static counter for generating unique IDs
static NEXT_SNAPSHOT_ID: AtomicUsize = AtomicUsize::new(1);

/// Immutable rasterized image of the whole canvas at a moment in time.
///
/// Cloning produces an independent copy of the pixels under the same id, so
/// a texture cached for one copy is valid for the other.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    id: usize,
    pixels: RgbaImage,
}

impl Snapshot {
    pub fn new(pixels: RgbaImage) -> Self {
        let id = NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::SeqCst);
        Self { id, pixels }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True when both snapshots hold bit-identical pixels.
    pub fn same_pixels(&self, other: &Snapshot) -> bool {
        self.pixels == other.pixels
    }

    /// Converts the pixels into an egui image for texture upload.
    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_ids_are_unique() {
        let a = Snapshot::new(RgbaImage::new(2, 2));
        let b = Snapshot::new(RgbaImage::new(2, 2));
        assert_ne!(a.id(), b.id());
        assert!(a.same_pixels(&b));
    }

    #[test]
    fn test_color_image_matches_size() {
        let snapshot = Snapshot::new(RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255])));
        let color_image = snapshot.to_color_image();
        assert_eq!(color_image.size, [3, 2]);
        assert_eq!(color_image.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }
}
