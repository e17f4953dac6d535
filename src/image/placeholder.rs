use super::PlaceholderService;
use crate::settings::DEFAULT_PRIMARY;
use crate::{Error, Result};
use ab_glyph::{FontArc, PxScale};
use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 1024;
pub const HEIGHT: u32 = 768;
pub const FONT_SIZE: f32 = 120.0;

const GRADIENT_END: [u8; 3] = [0x4a, 0x14, 0x8c];
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 230]);

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/kalpurush/kalpurush.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansBengali-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansBengali-Regular.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansBengali-Bold.ttf",
    "/usr/share/fonts/noto/NotoSansBengali-Bold.ttf",
    "/Library/Fonts/Kalpurush.ttf",
];

/// Parses `#rgb` / `#rrggbb` (surrounding whitespace allowed).
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgb[i] = v * 17;
            }
            Some(rgb)
        }
        6 if hex.is_ascii() => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        _ => None,
    }
}

fn gradient_pixel(x: u32, y: u32, start: [u8; 3]) -> Rgba<u8> {
    // Projection onto the (0,0) -> (WIDTH,HEIGHT) diagonal.
    let (w, h) = (WIDTH as f32, HEIGHT as f32);
    let t = ((x as f32 * w + y as f32 * h) / (w * w + h * h)).clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgba([
        mix(start[0], GRADIENT_END[0]),
        mix(start[1], GRADIENT_END[1]),
        mix(start[2], GRADIENT_END[2]),
        255,
    ])
}

fn render_png(text: &str, start: [u8; 3], font: Option<&FontArc>) -> Result<Vec<u8>> {
    let mut canvas = RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| gradient_pixel(x, y, start));

    if let Some(font) = font {
        let scale = PxScale::from(FONT_SIZE);
        let (text_width, text_height) = imageproc::drawing::text_size(scale, font, text);
        let x = (WIDTH as i32 - text_width as i32) / 2;
        let y = (HEIGHT as i32 - text_height as i32) / 2;
        imageproc::drawing::draw_text_mut(&mut canvas, TEXT_COLOR, x, y, scale, font, text);
    }

    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Draws the word centred on a gradient, 1024x768 PNG.
pub struct PlaceholderRenderer {
    font: Option<FontArc>,
}

impl PlaceholderRenderer {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font }
    }

    /// Loads the glyph font from `path`, or from well-known Bengali font
    /// locations when no path is configured. Without a usable font only the
    /// gradient is drawn.
    pub fn from_font_path(path: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = match path {
            Some(path) => vec![path.to_path_buf()],
            None => SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        };

        for candidate in &candidates {
            match Self::load_font(candidate) {
                Ok(font) => {
                    tracing::debug!("Placeholder font: {}", candidate.display());
                    return Self::new(Some(font));
                }
                Err(e) if path.is_some() => {
                    tracing::warn!("Could not load placeholder font {}: {}", candidate.display(), e);
                }
                Err(_) => {}
            }
        }

        tracing::warn!("No placeholder font available; placeholders will have no text");
        Self::new(None)
    }

    fn load_font(path: &Path) -> Result<FontArc> {
        let bytes = std::fs::read(path)?;
        FontArc::try_from_vec(bytes)
            .map_err(|e| Error::Invariant(format!("Invalid font {}: {}", path.display(), e)))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

#[async_trait]
impl PlaceholderService for PlaceholderRenderer {
    async fn render(&self, text: &str, primary_color: &str) -> Result<Vec<u8>> {
        let start = parse_hex_color(primary_color).unwrap_or_else(|| {
            tracing::warn!("Invalid primary colour {:?}, using default", primary_color);
            parse_hex_color(DEFAULT_PRIMARY).unwrap_or([0x7c, 0x4d, 0xff])
        });

        tokio::task::spawn_blocking({
            let text = text.to_string();
            let font = self.font.clone();
            move || render_png(&text, start, font.as_ref())
        })
        .await
        .map_err(|e| Error::Invariant(format!("Placeholder rendering task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Rgba<u8>, b: [u8; 3]) -> bool {
        a.0[..3]
            .iter()
            .zip(b.iter())
            .all(|(x, y)| (*x as i16 - *y as i16).abs() <= 2)
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#7c4dff"), Some([0x7c, 0x4d, 0xff]));
        assert_eq!(parse_hex_color(" #FFF "), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("#0f1020"), Some([0x0f, 0x10, 0x20]));
        assert_eq!(parse_hex_color("7c4dff"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[tokio::test]
    async fn test_render_produces_gradient_png() {
        let renderer = PlaceholderRenderer::new(None);
        let png = renderer.render("বই", "#ff0000").await.unwrap();

        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.width(), WIDTH);
        assert_eq!(img.height(), HEIGHT);
        assert!(close(img.get_pixel(0, 0), [0xff, 0x00, 0x00]));
        assert!(close(img.get_pixel(WIDTH - 1, HEIGHT - 1), GRADIENT_END));
    }

    #[tokio::test]
    async fn test_invalid_primary_falls_back_to_default() {
        let renderer = PlaceholderRenderer::new(None);
        let png = renderer.render("বই", "purple").await.unwrap();

        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert!(close(img.get_pixel(0, 0), [0x7c, 0x4d, 0xff]));
    }

    #[test]
    fn test_missing_font_path_renders_without_text() {
        let renderer = PlaceholderRenderer::from_font_path(Some(Path::new("/nonexistent/font.ttf")));
        assert!(!renderer.has_font());
    }
}
