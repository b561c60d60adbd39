//! Software canvas using tiny-skia and cosmic-text
//!
//! All rendering happens on the CPU into a premultiplied RGBA pixmap. Text
//! shaping results are cached per (text, size, font) so widgets that redraw
//! the same strings every frame do not reshape them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache,
};
use hashbrown::HashMap;
use hudkit_core::{BlurSpec, Canvas};
use hudkit_types::{Color, HudFont};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, PixmapMut, PixmapPaint, Rect,
    Stroke, Transform,
};

use crate::blur;
use crate::utils::color_from_rgba;

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 512;

/// Cached result of text shaping
struct CachedText {
    glyphs: Vec<LayoutGlyph>,
    width: f32,
    height: f32,
    /// LRU tracking: incremented on each access
    last_used: u64,
}

/// Text content, font size in tenths, font family
type TextCacheKey = (String, u32, HudFont);

pub struct PixmapCanvas {
    pixmap: Pixmap,
    /// Cumulative translations, innermost last
    translations: Vec<(f32, f32)>,
    font_system: FontSystem,
    swash_cache: SwashCache,
    text_cache: HashMap<TextCacheKey, CachedText>,
    cache_access_counter: u64,
}

impl PixmapCanvas {
    /// Create a transparent canvas. Returns `None` for a zero-sized surface.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            translations: Vec::new(),
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            text_cache: HashMap::with_capacity(64),
            cache_access_counter: 0,
        })
    }

    /// Replace the pixel buffer, keeping fonts and the shaping cache
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        match Pixmap::new(width, height) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                self.translations.clear();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.translations.clear();
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Encode the current frame as PNG into `writer`
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.pixmap.width(), self.pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), png::EncodingError> {
        let file = File::create(path)?;
        self.write_png(BufWriter::new(file))
    }

    fn translation(&self) -> (f32, f32) {
        self.translations.last().copied().unwrap_or((0.0, 0.0))
    }

    fn transform(&self) -> Transform {
        let (tx, ty) = self.translation();
        Transform::from_translate(tx, ty)
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color_from_rgba(color));
        paint.anti_alias = true;
        paint
    }

    /// Evict least recently used entries if cache is too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    fn find_cached(&mut self, text: &str, size_key: u32, font: HudFont) -> Option<&mut CachedText> {
        self.text_cache
            .iter_mut()
            .find(|(k, _)| k.0 == text && k.1 == size_key && k.2 == font)
            .map(|(_, v)| v)
    }

    /// Ensure text is shaped and cached. Returns (width, height).
    fn ensure_cached(&mut self, text: &str, font_size: f32, font: HudFont) -> (f32, f32) {
        let size_key = (font_size * 10.0).round() as u32;

        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        if let Some(cached) = self.find_cached(text, size_key, font) {
            cached.last_used = current_access;
            return (cached.width, cached.height);
        }

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);

        let attrs = Attrs::new().family(family(font));
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
            glyphs.extend(run.glyphs.iter().cloned());
        }

        self.text_cache.insert(
            (text.to_string(), size_key, font),
            CachedText {
                glyphs,
                width,
                height,
                last_used: current_access,
            },
        );
        self.evict_lru_if_needed();

        (width, height)
    }

    fn cached_glyphs(&mut self, text: &str, font_size: f32, font: HudFont) -> Vec<LayoutGlyph> {
        let size_key = (font_size * 10.0).round() as u32;
        self.find_cached(text, size_key, font)
            .map(|c| c.glyphs.clone())
            .unwrap_or_default()
    }
}

impl Canvas for PixmapCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn push_translation(&mut self, dx: f32, dy: f32) {
        let (tx, ty) = self.translation();
        self.translations.push((tx + dx, ty + dy));
    }

    fn pop_translation(&mut self) {
        self.translations.pop();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_rect(rect, &Self::paint(color), transform, None);
    }

    fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        let Some(path) = create_rounded_rect_path(x, y, w, h, radius) else {
            return;
        };
        let transform = self.transform();
        self.pixmap.fill_path(
            &path,
            &Self::paint(color),
            FillRule::Winding,
            transform,
            None,
        );
    }

    fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        stroke_width: f32,
        color: Color,
    ) {
        let Some(path) = create_rounded_rect_path(x, y, w, h, radius) else {
            return;
        };

        let stroke = Stroke {
            width: stroke_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        let transform = self.transform();
        self.pixmap
            .stroke_path(&path, &Self::paint(color), &stroke, transform, None);
    }

    fn fill_rounded_rect_blurred(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        blur: BlurSpec,
    ) {
        let sigma = blur::sigma_from_radius(blur.radius);
        if sigma <= 0.0 {
            self.fill_rounded_rect(x, y, w, h, radius, color);
            return;
        }

        // Local mask around the shape, aligned to whole device pixels
        let (tx, ty) = self.translation();
        let pad = blur::extent(sigma) as f32;
        let left = (x + tx - pad).floor();
        let top = (y + ty - pad).floor();
        let mask_w = (w + pad * 2.0).ceil() as u32 + 1;
        let mask_h = (h + pad * 2.0).ceil() as u32 + 1;

        let Some(mut mask) = Mask::new(mask_w, mask_h) else {
            return;
        };
        let Some(path) = create_rounded_rect_path(x + tx - left, y + ty - top, w, h, radius)
        else {
            return;
        };
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());

        let sharp = mask.data().to_vec();
        let coverage = mask.data_mut();
        blur::gaussian_blur(coverage, mask_w as usize, mask_h as usize, sigma);
        blur::combine(blur.mode, &sharp, coverage);

        let Some(mut layer) = Pixmap::new(mask_w, mask_h) else {
            return;
        };
        layer.fill(color_from_rgba(color));
        layer.apply_mask(&mask);

        self.pixmap.draw_pixmap(
            left as i32,
            top as i32,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, font: HudFont, color: Color) {
        let _ = self.ensure_cached(text, font_size, font);
        let glyphs = self.cached_glyphs(text, font_size, font);

        let (tx, ty) = self.translation();
        let [r, g, b, a] = color;
        let text_color = CosmicColor::rgba(r, g, b, a);
        let mut pixmap = self.pixmap.as_mut();

        for glyph in &glyphs {
            let physical_glyph = glyph.physical((x + tx, y + ty), 1.0);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical_glyph.cache_key)
            {
                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y - image.placement.top;

                draw_glyph_to_pixmap(
                    &mut pixmap,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                    text_color,
                );
            }
        }
    }

    fn measure_text(&mut self, text: &str, font_size: f32, font: HudFont) -> (f32, f32) {
        self.ensure_cached(text, font_size, font)
    }
}

fn family(font: HudFont) -> Family<'static> {
    match font {
        HudFont::Default => Family::Name("Noto Sans"),
        HudFont::SansSerif => Family::SansSerif,
        HudFont::Serif => Family::Serif,
        HudFont::Monospace => Family::Monospace,
    }
}

fn create_rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    let r = r.max(0.0).min(w / 2.0).min(h / 2.0);

    let mut pb = PathBuilder::new();

    pb.move_to(x + r, y);

    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);

    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);

    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);

    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);

    pb.close();
    pb.finish()
}

/// Alpha blend a glyph coverage image onto the pixmap
fn draw_glyph_to_pixmap(
    pixmap: &mut PixmapMut,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&alpha) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            // Source over, premultiplied destination
            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((color.r() as u32 * src_a + data[pixel_idx] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 1] =
                ((color.g() as u32 * src_a + data[pixel_idx + 1] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 2] =
                ((color.b() as u32 * src_a + data[pixel_idx + 2] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}
