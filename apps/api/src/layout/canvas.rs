//! Immediate-mode drawing surface, one `PageWriter` per page.
//!
//! The writer carries the current font, colours and line width the way a
//! PDF content stream does, but keeps that state scoped to a single page.
//! Every call appends a fully-resolved `DrawOp` to the page's display list,
//! which the renderer encodes later.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, line_height_mm, Font, PT_TO_MM};
use crate::layout::geometry::{PageGeometry, Rgb};

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

/// A run of text positioned by the left end of its baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    Text(TextRun),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.texts().any(|run| run.text == text)
    }
}

/// The finished layout: page geometry plus one display list per page.
#[derive(Debug, Clone, Serialize)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

#[cfg(test)]
impl LaidOutDocument {
    /// Every text run with the index of the page it sits on, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.texts().map(move |run| (i, run)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text style
// ────────────────────────────────────────────────────────────────────────────

/// Font and size pair, usable for measuring before anything is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32) -> Self {
        TextStyle { font, size }
    }

    pub fn line_height(&self) -> f32 {
        line_height_mm(self.size)
    }

    pub fn width(&self, text: &str) -> f32 {
        get_metrics(self.font).width_mm(text, self.size)
    }

    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        get_metrics(self.font).split_text_to_size(text, self.size, max_width)
    }

    /// Distance from the baseline to the top of capital letters.
    pub fn cap_height(&self) -> f32 {
        // Helvetica CapHeight is 718/1000 em.
        0.718 * self.size * PT_TO_MM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

pub struct PageWriter {
    page: Page,
    style: TextStyle,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    line_width: f32,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        PageWriter {
            page: Page::default(),
            style: TextStyle::new(Font::Helvetica, 10.0),
            text_color: Rgb(0, 0, 0),
            fill_color: Rgb(0, 0, 0),
            draw_color: Rgb(0, 0, 0),
            line_width: 0.2,
        }
    }

    pub fn set_font(&mut self, style: TextStyle) {
        self.style = style;
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.page.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: self.fill_color,
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.page.ops.push(DrawOp::FillCircle {
            cx,
            cy,
            radius,
            color: self.fill_color,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.page.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width: self.line_width,
            color: self.draw_color,
        });
    }

    /// Places `text` with its baseline starting at (`x`, `y`).
    pub fn text(&mut self, text: &str, x: f32, y: f32) {
        self.page.ops.push(DrawOp::Text(TextRun {
            text: text.to_string(),
            x,
            y,
            font: self.style.font,
            size: self.style.size,
            color: self.text_color,
        }));
    }

    /// Places `text` horizontally centred on `center_x`.
    pub fn text_centered(&mut self, text: &str, center_x: f32, y: f32) {
        let x = center_x - self.style.width(text) / 2.0;
        self.text(text, x, y);
    }

    pub fn finish(self) -> Page {
        self.page
    }
}
