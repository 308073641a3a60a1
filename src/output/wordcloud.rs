// Word cloud rendering: keyword frequencies drawn onto a fixed canvas.
//
// Words are drawn with the 8x8 bitmap glyphs from `font8x8`, scaled up by an
// integer factor proportional to their frequency. Placement walks an
// elliptical spiral out from the centre of the canvas and takes the first
// spot that doesn't collide with an already-placed word; a word that fits
// nowhere is retried smaller, then dropped.

use std::path::Path;

use anyhow::{Context, Result};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use tracing::{info, warn};

use crate::records::{PublicationRecord, YearRange};
use crate::topics::keywords::KeywordFrequencyTable;
use crate::topics::stopwords::StopwordSet;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;
pub const MAX_WORDS: usize = 100;

/// Title drawn across the top of every cloud; the year range is appended.
pub const CLOUD_TITLE: &str = "Publication Keywords Word Cloud";

const GLYPH_SIZE: u32 = 8;
const TITLE_SCALE: u32 = 2;
const TITLE_MARGIN: u32 = 8;
const WORD_PADDING: u32 = 2;
const SPIRAL_STEPS: usize = 6000;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const TITLE_COLOR: Rgb<u8> = Rgb([40, 40, 40]);

/// Viridis colormap stops, dark purple to yellow.
const VIRIDIS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// Rendering parameters. The defaults give an 800x400 cloud of at most
/// 100 words on a white background.
#[derive(Debug, Clone)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub background: Rgb<u8>,
    /// Glyph scale for the least frequent words (8px * scale).
    pub min_scale: u32,
    /// Glyph scale for the most frequent word.
    pub max_scale: u32,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            max_words: MAX_WORDS,
            background: WHITE,
            min_scale: 2,
            max_scale: 7,
        }
    }
}

/// A word with its final position on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub x: u32,
    pub y: u32,
    pub scale: u32,
    pub color: Rgb<u8>,
}

impl PlacedWord {
    pub fn width(&self) -> u32 {
        text_width(&self.word, self.scale)
    }

    pub fn height(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.width(),
            h: self.height(),
        }
    }
}

/// What happened when a cloud was requested.
#[derive(Debug)]
pub enum CloudReport {
    /// No publications at all; no image written.
    NothingToRender,
    /// Publications exist but no title yielded a keyword; no image written.
    NoKeywords,
    /// Image written with `placed` words drawn.
    Rendered {
        placed: usize,
        keywords: KeywordFrequencyTable,
    },
}

/// Extract keywords from the publications' titles and render them to `path`.
///
/// Empty inputs are reported, not treated as errors. The image format follows
/// the file extension.
pub fn generate_word_cloud(
    publications: &[PublicationRecord],
    stopwords: &StopwordSet,
    path: &Path,
    range: &YearRange,
) -> Result<CloudReport> {
    if publications.is_empty() {
        warn!("No publications, nothing to render for the word cloud");
        return Ok(CloudReport::NothingToRender);
    }

    let keywords = KeywordFrequencyTable::from_publications(publications, stopwords);
    if keywords.is_empty() {
        warn!(
            publications = publications.len(),
            "No keywords found in publication titles, nothing to render"
        );
        return Ok(CloudReport::NoKeywords);
    }

    let options = CloudOptions::default();
    let placed = layout_words(&keywords.most_common(options.max_words), &options);
    let image = render_cloud(&placed, &cloud_title(range), &options);

    image
        .save(path)
        .with_context(|| format!("Failed to save word cloud to {}", path.display()))?;

    info!(
        keywords = keywords.len(),
        placed = placed.len(),
        path = %path.display(),
        "Rendered word cloud"
    );

    Ok(CloudReport::Rendered {
        placed: placed.len(),
        keywords,
    })
}

/// Title text for a cloud filtered by `range`.
pub fn cloud_title(range: &YearRange) -> String {
    format!("{CLOUD_TITLE}{}", range.title_suffix())
}

/// Position words (highest count first) inside the area below the title.
pub fn layout_words(entries: &[(&str, usize)], options: &CloudOptions) -> Vec<PlacedWord> {
    let area = cloud_area(options);
    let max_count = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(entries.len());

    for (rank, (word, count)) in entries.iter().enumerate() {
        let mut scale = scale_for(*count, max_count, options);
        while scale > options.min_scale && text_width(word, scale) > area.w {
            scale -= 1;
        }

        let color = viridis(rank, entries.len());
        loop {
            let w = text_width(word, scale);
            let h = GLYPH_SIZE * scale;
            if let Some((x, y)) = find_slot(w, h, &area, &placed) {
                placed.push(PlacedWord {
                    word: word.to_string(),
                    count: *count,
                    x,
                    y,
                    scale,
                    color,
                });
                break;
            }
            if scale <= options.min_scale {
                break;
            }
            scale -= 1;
        }
    }

    placed
}

/// Draw the title and every placed word onto a fresh canvas.
pub fn render_cloud(placed: &[PlacedWord], title: &str, options: &CloudOptions) -> RgbImage {
    let mut image = RgbImage::from_pixel(options.width, options.height, options.background);

    let title_width = text_width(title, TITLE_SCALE);
    let title_x = options.width.saturating_sub(title_width) / 2;
    draw_text(&mut image, title, title_x, TITLE_MARGIN, TITLE_SCALE, TITLE_COLOR);

    for word in placed {
        draw_text(&mut image, &word.word, word.x, word.y, word.scale, word.color);
    }
    image
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Rect {
    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w + WORD_PADDING
            && other.x < self.x + self.w + WORD_PADDING
            && self.y < other.y + other.h + WORD_PADDING
            && other.y < self.y + self.h + WORD_PADDING
    }
}

/// Canvas region available to words (everything under the title band).
fn cloud_area(options: &CloudOptions) -> Rect {
    let top = (TITLE_MARGIN * 2 + GLYPH_SIZE * TITLE_SCALE).min(options.height);
    Rect {
        x: 0,
        y: top,
        w: options.width,
        h: options.height - top,
    }
}

fn scale_for(count: usize, max_count: usize, options: &CloudOptions) -> u32 {
    if max_count == 0 {
        return options.min_scale;
    }
    let ratio = (count as f64 / max_count as f64).sqrt();
    let span = options.max_scale.saturating_sub(options.min_scale) as f64;
    options.min_scale + (span * ratio).round() as u32
}

/// Walk an elliptical spiral from the centre of `area` and return the first
/// top-left corner where a `w` x `h` box fits without overlap.
fn find_slot(w: u32, h: u32, area: &Rect, placed: &[PlacedWord]) -> Option<(u32, u32)> {
    if w > area.w || h > area.h {
        return None;
    }

    let cx = area.x as f64 + area.w as f64 / 2.0;
    let cy = area.y as f64 + area.h as f64 / 2.0;
    let aspect = area.h as f64 / area.w as f64;

    for step in 0..SPIRAL_STEPS {
        let theta = step as f64 * 0.1;
        let radius = 2.0 * theta;
        let px = (cx + radius * theta.cos() - w as f64 / 2.0).round();
        let py = (cy + radius * theta.sin() * aspect - h as f64 / 2.0).round();

        if px < area.x as f64 || py < area.y as f64 {
            continue;
        }
        let (x, y) = (px as u32, py as u32);
        if x + w > area.x + area.w || y + h > area.y + area.h {
            continue;
        }

        let candidate = Rect { x, y, w, h };
        if placed.iter().all(|p| !p.rect().overlaps(&candidate)) {
            return Some((x, y));
        }
    }
    None
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Colour for the word at `rank` out of `total`, stopping short of the
/// palette's pale yellow end so words stay legible on white.
fn viridis(rank: usize, total: usize) -> Rgb<u8> {
    let t = if total > 1 {
        rank as f64 / (total - 1) as f64 * 0.85
    } else {
        0.0
    };
    let position = t * (VIRIDIS.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = position - lower as f64;

    let channel = |i: usize| {
        let a = VIRIDIS[lower][i] as f64;
        let b = VIRIDIS[upper][i] as f64;
        (a + (b - a) * frac).round() as u8
    };
    Rgb([channel(0), channel(1), channel(2)])
}

fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
}

/// Draw `text` with its top-left corner at (`x`, `y`). Pixels falling
/// outside the image are clipped; characters without a glyph are blank.
fn draw_text(image: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let origin_x = x + i as u32 * GLYPH_SIZE * scale;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + col * scale;
                let py = y + row as u32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let (fx, fy) = (px + dx, py + dy);
                        if fx < width && fy < height {
                            image.put_pixel(fx, fy, color);
                        }
                    }
                }
            }
        }
    }
}
