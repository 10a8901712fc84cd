use image::{DynamicImage, ImageFormat, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Cursor;
use std::path::Path;

use crate::error::ExportError;

/// Points per inch in PDF user space
const PDF_POINTS_PER_INCH: f32 = 72.0;

/// File formats the canvas can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Pdf];

    /// Picks the format implied by the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .ok_or_else(|| ExportError::MissingExtension(path.to_path_buf()))?;
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            }),
        }
    }

    /// Extensions offered in the save dialog
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Pdf => &["pdf"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Png => "PNG files",
            Self::Jpeg => "JPEG files",
            Self::Pdf => "PDF files",
        }
    }
}

/// Writes `pixels` to `path` in the format its extension names.
///
/// The whole file is encoded in memory first, so a failed export never leaves
/// an empty or truncated file behind. `dpi` only applies to PDF.
pub fn write_image(pixels: &RgbaImage, path: &Path, dpi: f32) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let bytes = encode(pixels, format, dpi)?;
    std::fs::write(path, bytes)?;
    Ok(format)
}

/// Encodes `pixels` as the bytes of a `format` file.
pub fn encode(pixels: &RgbaImage, format: ExportFormat, dpi: f32) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => pixels.write_to(&mut bytes, ImageFormat::Png)?,
        // JPEG has no alpha channel
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(pixels.clone())
            .to_rgb8()
            .write_to(&mut bytes, ImageFormat::Jpeg)?,
        ExportFormat::Pdf => {
            let mut doc = pdf_document(pixels, dpi)?;
            doc.save_to(&mut bytes)?;
        }
    }
    Ok(bytes.into_inner())
}

/// Page size in points for an image embedded at `dpi`
pub fn pdf_page_size(width: u32, height: u32, dpi: f32) -> (f32, f32) {
    let scale = PDF_POINTS_PER_INCH / dpi.max(1.0);
    (width as f32 * scale, height as f32 * scale)
}

/// Builds a one-page PDF whose page is exactly the image.
fn pdf_document(pixels: &RgbaImage, dpi: f32) -> Result<Document, ExportError> {
    let (width, height) = pixels.dimensions();
    let (page_w, page_h) = pdf_page_size(width, height, dpi);
    let rgb = DynamicImage::ImageRgba8(pixels.clone()).to_rgb8().into_raw();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb,
    ));
    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            "Im0" => image_id,
        },
    });

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![page_w.into(), 0.into(), 0.into(), page_h.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
