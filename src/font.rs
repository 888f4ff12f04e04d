use crate::{OverlayError, Result, LABEL_FONT_SIZE};
use ab_glyph::{Font, FontVec, PxScale};
use image::{ImageError, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::*;

/// Directories searched for a font given by file name.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];
const FONT_SEARCH_DEPTH: u32 = 4;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_SPACING: u32 = 1;

/// 5x7 glyphs for the characters that appear in labels, one byte per row.
static GLYPHS: [(char, [u8; GLYPH_HEIGHT as usize]); 11] = [
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
];

/// Font used for gridline labels.
///
/// `Outline` wraps a TrueType/OpenType font scaled so one em is `size` pixels.
/// `Bitmap` is the bundled 5x7 digit font, magnified by an integer `scale`.
pub enum LabelFont {
    Outline {
        font: FontVec,
        scale: PxScale,
        size: f32,
    },
    Bitmap {
        scale: u32,
    },
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFont::Outline { size, .. } => f
                .debug_struct("Outline")
                .field("font", &"<font>")
                .field("size", size)
                .finish(),
            LabelFont::Bitmap { scale } => f.debug_struct("Bitmap").field("scale", scale).finish(),
        }
    }
}

impl LabelFont {
    /// Loads the named font, falling back to [`LabelFont::builtin`] on any failure.
    pub fn resolve(name: &str, size: f32) -> Self {
        match Self::load(name, size) {
            Ok(font) => {
                debug!("Using label font {}", name);
                font
            }
            Err(e) => {
                debug!("Using built-in label font: {}", e);
                Self::builtin(size)
            }
        }
    }

    /// Loads a font by path, or by file name from the system font directories.
    ///
    /// # Errors
    /// [`OverlayError::FontNotFound`] if nothing matches, [`OverlayError::InvalidFont`]
    /// if the file is not a font, [`OverlayError::FileAccess`] if it cannot be read.
    pub fn load(name: &str, size: f32) -> Result<Self> {
        let path = locate_font(name).ok_or_else(|| OverlayError::FontNotFound(name.to_string()))?;
        trace!("Reading font {}", path.display());
        let data = std::fs::read(&path).map_err(|e| OverlayError::FileAccess {
            path: path.clone(),
            source: ImageError::IoError(e),
        })?;
        let font = FontVec::try_from_vec(data)?;
        let scale = em_scale(&font, size);
        Ok(LabelFont::Outline { font, scale, size })
    }

    /// The bundled bitmap font, magnified to roughly match `size`.
    pub fn builtin(size: f32) -> Self {
        let scale = (size / LABEL_FONT_SIZE).round().max(1.0) as u32;
        LabelFont::Bitmap { scale }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Bitmap { .. })
    }

    /// Advance width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        match self {
            LabelFont::Outline { font, scale, .. } => text_size(*scale, font, text).0,
            LabelFont::Bitmap { scale } => {
                let chars = text.chars().count() as u32;
                if chars == 0 {
                    0
                } else {
                    (chars * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
                }
            }
        }
    }

    /// Nominal line height in pixels, used to center labels on horizontal lines.
    pub fn line_height(&self) -> u32 {
        match self {
            LabelFont::Outline { size, .. } => size.round() as u32,
            LabelFont::Bitmap { scale } => GLYPH_HEIGHT * scale,
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`, clipped to the image.
    pub fn draw_text(&self, image: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        match self {
            LabelFont::Outline { font, scale, .. } => {
                draw_text_mut(image, color, x, y, *scale, font, text)
            }
            LabelFont::Bitmap { scale } => draw_bitmap_text(image, color, x, y, *scale, text),
        }
    }
}

/// Scale at which one em of `font` spans `size` pixels.
fn em_scale(font: &FontVec, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) => PxScale::from(size * font.height_unscaled() / units_per_em),
        None => PxScale::from(size),
    }
}

/// Finds a font file: `name` itself if it is a file, otherwise a case-insensitive
/// file name match under the system font directories.
pub fn locate_font(name: &str) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    let file_name = direct.file_name()?.to_str()?;
    FONT_DIRS
        .iter()
        .find_map(|dir| find_file(Path::new(dir), file_name, FONT_SEARCH_DEPTH))
}

fn find_file(dir: &Path, file_name: &str, depth: u32) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(file_name))
        {
            return Some(path);
        }
    }
    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|subdir| find_file(subdir, file_name, depth - 1))
}

fn glyph(c: char) -> Option<&'static [u8; GLYPH_HEIGHT as usize]> {
    GLYPHS
        .iter()
        .find(|(glyph_char, _)| *glyph_char == c)
        .map(|(_, rows)| rows)
}

fn draw_bitmap_text(image: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let (width, height) = image.dimensions();
    let advance = ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i32;
    let mut pen_x = x;

    for c in text.chars() {
        // unknown characters leave a blank cell
        if let Some(rows) = glyph(c) {
            for (gy, bits) in (0u32..).zip(rows.iter()) {
                for gx in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - gx)) == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = pen_x + (gx * scale + dx) as i32;
                            let py = y + (gy * scale + dy) as i32;
                            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                                image.put_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        pen_x += advance;
    }
}
