//! Open Graph preview image generation.
//!
//! Cards are 1200x630 (standard OG dimensions), white text on black:
//! - Post: date above the wrapped title, author and site name in the footer
//! - Site: site name and author, centered
//! - Not found: the literal label "Not found", no date line
//!
//! Cards are built as SVG and rasterized with resvg. Unknown identifiers
//! never fail: they produce the "Not found" card.

use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use folio_core::Registry;
use resvg::usvg::fontdb;

use crate::config::Config;
use crate::error::SiteError;

/// OG image dimensions (standard Open Graph).
pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

/// Card padding.
const PAD_X: u32 = 64;
const PAD_Y: u32 = 96;

/// Avatar size in the footer.
const AVATAR_SIZE: u32 = 100;

const DATE_SIZE: u32 = 36;
const TITLE_SIZE: u32 = 60;
const TITLE_LINE_HEIGHT: u32 = 72;
const FOOTER_SIZE: u32 = 30;

/// Greedy wrap width for titles, in characters.
const TITLE_LINE_CHARS: usize = 30;
const TITLE_MAX_LINES: usize = 3;

/// Font family list for SVG text. The bundled face comes last so hosts
/// without any of the others still get text.
const FONT_FAMILY: &str =
    "Inter, DejaVu Sans, Liberation Sans, Noto Sans, Arial, Tuffy, sans-serif";

/// Public-domain face compiled into the binary.
const FALLBACK_FONT: &[u8] = include_bytes!("../assets/fonts/Tuffy.ttf");
const FALLBACK_FAMILY: &str = "Tuffy";

/// What a preview card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCard<'a> {
    /// A known post.
    Post { title: &'a str, date: &'a str },
    /// The site itself (home page).
    Site,
    /// Placeholder for an unknown identifier.
    NotFound,
}

impl<'a> PreviewCard<'a> {
    /// Card for a post identifier, absorbing a failed lookup.
    pub fn for_post(registry: &'a Registry, id: &str) -> Self {
        match registry.resolve(id) {
            Ok(record) => Self::Post {
                title: &record.title,
                date: &record.date,
            },
            Err(_) => Self::NotFound,
        }
    }
}

/// Avatar bytes pre-encoded for embedding in SVG.
#[derive(Debug, Clone)]
struct Avatar {
    mime: &'static str,
    data: String,
}

/// Renders preview cards to PNG.
#[derive(Clone)]
pub struct OgRenderer {
    fontdb: Arc<fontdb::Database>,
    avatar: Option<Avatar>,
    author: String,
    site_name: String,
}

impl OgRenderer {
    /// Build a renderer from configuration, loading system fonts, the
    /// optional font directory and the optional avatar.
    pub fn new(config: &Config) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = &config.font_dir {
            db.load_fonts_dir(dir);
        }
        tracing::info!(faces = db.len(), "fonts loaded for preview cards");

        let mut renderer = Self::with_fonts(db, &config.author, &config.site_name);
        if let Some(path) = &config.avatar_path {
            renderer.avatar = load_avatar(path);
        }
        renderer
    }

    /// Build a renderer with an explicit font database and no avatar.
    ///
    /// The bundled fallback face is always added to `db`.
    pub fn with_fonts(mut db: fontdb::Database, author: &str, site_name: &str) -> Self {
        db.load_font_data(FALLBACK_FONT.to_vec());
        Self {
            fontdb: Arc::new(db),
            avatar: None,
            author: author.to_string(),
            site_name: site_name.to_string(),
        }
    }

    /// Render a card as PNG bytes.
    pub fn render(&self, card: &PreviewCard<'_>) -> Result<Vec<u8>, SiteError> {
        let svg = self.svg(card);

        let options = resvg::usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = resvg::usvg::Tree::from_str(&svg, &options)
            .map_err(|e| SiteError::Internal(anyhow::anyhow!("SVG parse error: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(OG_WIDTH, OG_HEIGHT)
            .ok_or_else(|| SiteError::Internal(anyhow::anyhow!("failed to create pixmap")))?;

        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| SiteError::Internal(anyhow::anyhow!("PNG encode error: {e}")))
    }

    /// Build the SVG source for a card.
    pub fn svg(&self, card: &PreviewCard<'_>) -> String {
        let mut svg = String::with_capacity(4096);

        svg.push_str(&format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="#000"/>"##,
            w = OG_WIDTH,
            h = OG_HEIGHT,
        ));

        match card {
            PreviewCard::Post { title, date } => {
                self.push_post(&mut svg, title, date);
                self.push_footer(&mut svg);
            }
            PreviewCard::Site => {
                push_centered(&mut svg, OG_HEIGHT / 2 - 20, 80, 600, &self.site_name);
                push_centered(&mut svg, OG_HEIGHT / 2 + 60, 36, 400, &self.author);
            }
            PreviewCard::NotFound => {
                push_centered(&mut svg, OG_HEIGHT / 2, 64, 700, "Not found");
            }
        }

        svg.push_str("</svg>");
        svg
    }

    fn push_post(&self, svg: &mut String, title: &str, date: &str) {
        let date_y = PAD_Y + DATE_SIZE;
        svg.push_str(&format!(
            r##"<text x="{PAD_X}" y="{date_y}" font-family="{FONT_FAMILY}" font-size="{DATE_SIZE}" fill="#fff">{}</text>"##,
            escape_xml(date),
        ));

        let first_line_y = date_y + 32 + TITLE_SIZE;
        for (i, line) in wrap_text(title, TITLE_LINE_CHARS, TITLE_MAX_LINES)
            .iter()
            .enumerate()
        {
            let y = first_line_y + i as u32 * TITLE_LINE_HEIGHT;
            svg.push_str(&format!(
                r##"<text x="{PAD_X}" y="{y}" font-family="{FONT_FAMILY}" font-size="{TITLE_SIZE}" font-weight="600" fill="#fff">{}</text>"##,
                escape_xml(line),
            ));
        }
    }

    fn push_footer(&self, svg: &mut String) {
        let bottom = OG_HEIGHT - PAD_Y;
        let text_y = bottom - AVATAR_SIZE / 2 + FOOTER_SIZE / 3;

        let mut author_x = PAD_X;
        if let Some(avatar) = &self.avatar {
            let r = AVATAR_SIZE / 2;
            let x = PAD_X;
            let y = bottom - AVATAR_SIZE;
            let cx = x + r;
            let cy = y + r;
            svg.push_str(&format!(
                r##"<defs><clipPath id="ac"><circle cx="{cx}" cy="{cy}" r="{r}"/></clipPath></defs><image href="data:{mime};base64,{data}" x="{x}" y="{y}" width="{sz}" height="{sz}" clip-path="url(#ac)" preserveAspectRatio="xMidYMid slice"/><circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="#fff" stroke-width="2"/>"##,
                mime = avatar.mime,
                data = avatar.data,
                sz = AVATAR_SIZE,
            ));
            author_x = PAD_X + AVATAR_SIZE + 32;
        }

        svg.push_str(&format!(
            r##"<text x="{author_x}" y="{text_y}" font-family="{FONT_FAMILY}" font-size="{FOOTER_SIZE}" fill="#fff">{}</text>"##,
            escape_xml(&self.author),
        ));
        svg.push_str(&format!(
            r##"<text x="{x}" y="{text_y}" text-anchor="end" font-family="{FONT_FAMILY}" font-size="{FOOTER_SIZE}" fill="#fff">{}</text>"##,
            escape_xml(&self.site_name),
            x = OG_WIDTH - PAD_X,
        ));
    }
}

fn push_centered(svg: &mut String, y: u32, size: u32, weight: u32, text: &str) {
    svg.push_str(&format!(
        r##"<text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="central" font-family="{FONT_FAMILY}" font-size="{size}" font-weight="{weight}" fill="#fff">{}</text>"##,
        escape_xml(text),
        x = OG_WIDTH / 2,
    ));
}

/// Read an avatar image, logging and skipping it on failure.
fn load_avatar(path: &Path) -> Option<Avatar> {
    match std::fs::read(path) {
        Ok(bytes) => Some(Avatar {
            mime: detect_image_mime(&bytes),
            data: base64::engine::general_purpose::STANDARD.encode(&bytes),
        }),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read avatar, cards will omit it");
            None
        }
    }
}

/// Greedy word wrap by character count.
///
/// Lines beyond `max_lines` are dropped and the last kept line gets an
/// ellipsis. Words longer than `width` are kept whole on their own line.
fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push('\u{2026}');
        }
    }
    lines
}

/// Escape text for use in SVG character data and attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Detect MIME type from image bytes (basic magic byte detection).
fn detect_image_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG") {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
