//! PDF encoder for a `LaidOutDocument`, built on lopdf.
//!
//! Pages use the base-14 Helvetica family with WinAnsiEncoding, so no font
//! program is embedded. Characters outside WinAnsi are written as '?'.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::layout::canvas::{DrawOp, LaidOutDocument, Page, TextRun};
use crate::layout::font_metrics::Font;
use crate::layout::geometry::{PageGeometry, Rgb};

const MM_TO_PT: f32 = 72.0 / 25.4;
/// Control point distance for a quarter circle drawn as a cubic Bezier.
const KAPPA: f32 = 0.552_284_75;
const PRODUCER: &str = "Noken CV";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document has no pages")]
    Empty,
}

/// Encodes every page of `document` into a single PDF file.
pub fn render_pdf(document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
    if document.pages.is_empty() {
        return Err(RenderError::Empty);
    }
    let geometry = &document.geometry;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(geometry.page_width * MM_TO_PT),
        Object::Real(geometry.page_height * MM_TO_PT),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = page_content(page, geometry);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "Title" => Object::string_literal("CV"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Content streams
// ────────────────────────────────────────────────────────────────────────────

/// Converts the page-space mm coordinates of the layout into PDF user space.
struct Transform {
    page_height: f32,
}

impl Transform {
    fn x(&self, x: f32) -> f32 {
        x * MM_TO_PT
    }

    fn y(&self, y: f32) -> f32 {
        (self.page_height - y) * MM_TO_PT
    }

    fn len(&self, v: f32) -> f32 {
        v * MM_TO_PT
    }
}

fn page_content(page: &Page, geometry: &PageGeometry) -> Content {
    let t = Transform {
        page_height: geometry.page_height,
    };
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(color_op("rg", *color));
                // PDF rectangles are anchored at their bottom-left corner.
                ops.push(Operation::new(
                    "re",
                    reals(&[t.x(*x), t.y(y + height), t.len(*width), t.len(*height)]),
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::FillCircle {
                cx,
                cy,
                radius,
                color,
            } => {
                ops.push(color_op("rg", *color));
                ops.extend(circle_path(t.x(*cx), t.y(*cy), t.len(*radius)));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(color_op("RG", *color));
                ops.push(Operation::new("w", reals(&[t.len(*width)])));
                ops.push(Operation::new("m", reals(&[t.x(*x1), t.y(*y1)])));
                ops.push(Operation::new("l", reals(&[t.x(*x2), t.y(*y2)])));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text(run) => ops.extend(text_ops(run, &t)),
        }
    }

    Content { operations: ops }
}

fn text_ops(run: &TextRun, t: &Transform) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        color_op("rg", run.color),
        Operation::new(
            "Tf",
            vec![
                Object::Name(run.font.resource_name().as_bytes().to_vec()),
                Object::Real(run.size),
            ],
        ),
        Operation::new("Td", reals(&[t.x(run.x), t.y(run.y)])),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&run.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Closed path approximating a circle with four cubic Bezier segments.
fn circle_path(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = KAPPA * r;
    vec![
        Operation::new("m", reals(&[cx + r, cy])),
        Operation::new("c", reals(&[cx + r, cy + k, cx + k, cy + r, cx, cy + r])),
        Operation::new("c", reals(&[cx - k, cy + r, cx - r, cy + k, cx - r, cy])),
        Operation::new("c", reals(&[cx - r, cy - k, cx - k, cy - r, cx, cy - r])),
        Operation::new("c", reals(&[cx + k, cy - r, cx + r, cy - k, cx + r, cy])),
        Operation::new("h", vec![]),
    ]
}

fn color_op(operator: &str, color: Rgb) -> Operation {
    Operation::new(operator, reals(&color.to_unit()))
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi text encoding
// ────────────────────────────────────────────────────────────────────────────

/// Encodes `text` as WinAnsi (Windows-1252) bytes.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        // Latin-1 supplement maps one to one.
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
