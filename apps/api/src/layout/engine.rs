//! CV layout engine: flows a resume into fixed-size two-column pages.
//!
//! # Tracks
//! - The side column is written once, on page 1, top to bottom. It never
//!   paginates: a line whose baseline would fall below the content limit is
//!   dropped and counted.
//! - The main column flows across pages. Before every entry block (and every
//!   section heading, which is kept with what follows it) a look-ahead check
//!   decides whether to start a new page. Only descriptions may continue past
//!   a page boundary.
//!
//! Each new page gets the side-column background and the footer caption, but
//! never side-column content.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::canvas::{LaidOutDocument, PageWriter, TextStyle};
use crate::layout::dates::format_date_range;
use crate::layout::font_metrics::Font;
use crate::layout::geometry::{default_page_geometry, palette, type_scale, PageGeometry, Rgb};
use crate::layout::labels::Labels;
use crate::models::resume::{non_blank, non_blank_items};
use crate::models::{Experience, Formation, IdentityRecord, ResumeRecord};

// ────────────────────────────────────────────────────────────────────────────
// Settings & output types
// ────────────────────────────────────────────────────────────────────────────

/// How the main column decides that an entry block needs a new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Uses the block's wrapped height. Descriptions that do not fit continue
    /// on the next page, so no line is ever lost.
    #[default]
    Measured,
    /// Reserves a fixed `min_block_height` ahead of each block. Description
    /// lines that still run past the bottom limit are clipped.
    Conservative,
}

impl FromStr for PaginationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "measured" => Ok(PaginationMode::Measured),
            "conservative" => Ok(PaginationMode::Conservative),
            other => Err(format!(
                "unsupported pagination mode '{other}' (expected 'measured' or 'conservative')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutSettings {
    pub geometry: PageGeometry,
    pub labels: Labels,
    pub pagination: PaginationMode,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            geometry: default_page_geometry(),
            labels: Labels::default(),
            pagination: PaginationMode::default(),
        }
    }
}

/// What pagination did while laying out one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub page_count: usize,
    /// Side-column lines that did not fit on page 1.
    pub side_lines_dropped: usize,
    /// Main-column lines clipped at the bottom limit (conservative mode only).
    pub main_lines_clipped: usize,
}

#[derive(Debug, Clone)]
pub struct LayoutOutput {
    pub document: LaidOutDocument,
    pub report: LayoutReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

const INITIALS: TextStyle = TextStyle::new(Font::HelveticaBold, type_scale::INITIALS);
const NAME: TextStyle = TextStyle::new(Font::HelveticaBold, type_scale::NAME);
const TITLE: TextStyle = TextStyle::new(Font::Helvetica, type_scale::TITLE);
const SIDE_HEADING: TextStyle = TextStyle::new(Font::HelveticaBold, type_scale::SIDE_HEADING);
const SIDE_BODY: TextStyle = TextStyle::new(Font::Helvetica, type_scale::SIDE_BODY);
const SECTION_HEADING: TextStyle =
    TextStyle::new(Font::HelveticaBold, type_scale::SECTION_HEADING);
const ENTRY_TITLE: TextStyle = TextStyle::new(Font::HelveticaBold, type_scale::ENTRY_TITLE);
const ENTRY_META: TextStyle = TextStyle::new(Font::Helvetica, type_scale::ENTRY_META);
const ENTRY_DATES: TextStyle = TextStyle::new(Font::HelveticaOblique, type_scale::ENTRY_META);
const BODY: TextStyle = TextStyle::new(Font::Helvetica, type_scale::BODY);
const FOOTER: TextStyle = TextStyle::new(Font::Helvetica, type_scale::FOOTER);

const AVATAR_RADIUS: f32 = 14.0;
const SIDE_ITEM_GAP: f32 = 1.0;
const SIDE_SECTION_GAP: f32 = 5.0;
/// Space between a heading baseline and its underline, and after the underline.
const RULE_GAP: f32 = 1.8;
const BLOCK_GAP: f32 = 4.0;
const SECTION_GAP: f32 = 3.0;
const INTEREST_SEPARATOR: &str = " • ";
const BULLET: &str = "• ";
/// Tolerance for "already at the top of the page" comparisons.
const EPSILON: f32 = 1e-3;

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a resume. Pure and infallible: missing data only makes the
/// document sparser.
pub fn layout_resume(
    resume: &ResumeRecord,
    identity: &IdentityRecord,
    settings: &LayoutSettings,
) -> LayoutOutput {
    let mut layout = Layout::new(settings);

    layout.write_side_column(resume, identity);

    layout.write_profile(resume);
    layout.write_experiences(&resume.experiences);
    layout.write_formations(&resume.formations);
    layout.write_interests(&resume.interests);

    layout.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Internal state
// ────────────────────────────────────────────────────────────────────────────

/// Vertical positions are baselines of the next line to write.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    side_y: f32,
    main_y: f32,
    page: usize,
}

/// Pre-wrapped text ready to be placed.
struct Lines {
    lines: Vec<String>,
    style: TextStyle,
    color: Rgb,
}

impl Lines {
    fn height(&self) -> f32 {
        self.lines.len() as f32 * self.style.line_height()
    }
}

/// An experience or formation entry, measured but not yet drawn.
struct EntryBlock {
    head: Vec<Lines>,
    description: Option<Lines>,
}

impl EntryBlock {
    fn is_empty(&self) -> bool {
        self.head.is_empty() && self.description.is_none()
    }

    fn height(&self) -> f32 {
        self.head.iter().map(Lines::height).sum::<f32>()
            + self.description.as_ref().map_or(0.0, |d| d.height())
    }
}

struct Layout<'a> {
    settings: &'a LayoutSettings,
    pages: Vec<PageWriter>,
    cursor: Cursor,
    report: LayoutReport,
}

impl<'a> Layout<'a> {
    fn new(settings: &'a LayoutSettings) -> Self {
        let top = settings.geometry.top();
        let mut layout = Layout {
            settings,
            pages: Vec::new(),
            cursor: Cursor {
                side_y: top,
                main_y: top,
                page: 0,
            },
            report: LayoutReport::default(),
        };
        layout.pages.push(layout.new_page_writer());
        layout
    }

    fn geometry(&self) -> &'a PageGeometry {
        &self.settings.geometry
    }

    fn labels(&self) -> &'a Labels {
        &self.settings.labels
    }

    /// A writer for a fresh page with its background and footer painted.
    fn new_page_writer(&self) -> PageWriter {
        let g = self.geometry();
        let mut writer = PageWriter::new();

        writer.set_fill_color(palette::SIDE_BACKGROUND);
        writer.fill_rect(0.0, 0.0, g.side_background_width(), g.page_height);

        writer.set_font(FOOTER);
        writer.set_text_color(palette::MUTED);
        writer.text_centered(&self.labels().footer, g.page_width / 2.0, g.footer_y());

        writer
    }

    fn start_new_page(&mut self) {
        let writer = self.new_page_writer();
        self.pages.push(writer);
        self.cursor.page += 1;
        self.cursor.main_y = self.geometry().top();
    }

    fn finish(self) -> LayoutOutput {
        let pages: Vec<_> = self.pages.into_iter().map(PageWriter::finish).collect();
        let report = LayoutReport {
            page_count: pages.len(),
            ..self.report
        };
        LayoutOutput {
            document: LaidOutDocument {
                geometry: self.settings.geometry.clone(),
                pages,
            },
            report,
        }
    }

    // ── side column ─────────────────────────────────────────────────────────

    fn write_side_column(&mut self, resume: &ResumeRecord, identity: &IdentityRecord) {
        let g = self.geometry();
        let labels = self.labels();

        // Avatar placeholder: filled circle with initials.
        let cy = g.top() + AVATAR_RADIUS + 2.0;
        let initials = identity.initials();
        let side = &mut self.pages[0];
        side.set_fill_color(palette::AVATAR);
        side.fill_circle(g.side_center_x(), cy, AVATAR_RADIUS);
        if !initials.is_empty() {
            side.set_font(INITIALS);
            side.set_text_color(palette::WHITE);
            side.text_centered(&initials, g.side_center_x(), cy + INITIALS.cap_height() / 2.0);
        }
        self.cursor.side_y = cy + AVATAR_RADIUS + 9.0;

        let name = identity
            .display_name()
            .unwrap_or_else(|| labels.placeholder_name.clone());
        self.side_text(&name, NAME, palette::WHITE, true);

        if let Some(title) = non_blank(&resume.title) {
            self.cursor.side_y += 1.0;
            self.side_text(title, TITLE, palette::SIDE_HEADING, true);
        }

        let rule_y = self.cursor.side_y;
        let side = &mut self.pages[0];
        side.set_draw_color(palette::SIDE_RULE);
        side.set_line_width(0.3);
        side.line(g.side_x(), rule_y, g.side_x() + g.side_width, rule_y);
        self.cursor.side_y = rule_y + 9.0;

        let location: Vec<&str> = [non_blank(&resume.city), non_blank(&resume.country)]
            .into_iter()
            .flatten()
            .collect();
        let location = location.join(", ");
        let contact: Vec<String> = [
            non_blank(&identity.email),
            non_blank(&resume.phone),
            Some(location.as_str()).filter(|l| !l.is_empty()),
            non_blank(&resume.linkedin),
            non_blank(&resume.github),
            non_blank(&resume.website),
        ]
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();

        self.side_section(&labels.contact, &contact);
        self.side_section(&labels.skills, &bulleted(&resume.skills));
        self.side_section(&labels.languages, &bulleted(&resume.languages));
        self.side_section(&labels.certifications, &bulleted(&resume.certifications));
    }

    /// Heading, separator rule and items. Nothing at all is drawn when there
    /// are no items or when not even the first item line would fit.
    fn side_section(&mut self, heading: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        let g = self.geometry();
        let limit = g.content_limit();

        let wrapped: Vec<Vec<String>> = items
            .iter()
            .map(|item| SIDE_BODY.wrap(item, g.side_width))
            .collect();

        let heading_advance = SIDE_HEADING.line_height() + RULE_GAP * 2.0;
        if self.cursor.side_y + heading_advance > limit {
            let skipped: usize = wrapped.iter().map(Vec::len).sum();
            self.report.side_lines_dropped += skipped + 1;
            return;
        }

        let y = self.cursor.side_y;
        let side = &mut self.pages[0];
        side.set_font(SIDE_HEADING);
        side.set_text_color(palette::SIDE_HEADING);
        side.text(heading, g.side_x(), y);
        let rule_y = y + RULE_GAP;
        side.set_draw_color(palette::SIDE_RULE);
        side.set_line_width(0.3);
        side.line(g.side_x(), rule_y, g.side_x() + g.side_width, rule_y);
        self.cursor.side_y += heading_advance;

        for lines in &wrapped {
            for line in lines {
                self.side_line(line, SIDE_BODY, palette::SIDE_TEXT, false);
            }
            self.cursor.side_y += SIDE_ITEM_GAP;
        }
        self.cursor.side_y += SIDE_SECTION_GAP;
    }

    fn side_text(&mut self, text: &str, style: TextStyle, color: Rgb, centered: bool) {
        for line in style.wrap(text, self.geometry().side_width) {
            self.side_line(&line, style, color, centered);
        }
    }

    fn side_line(&mut self, text: &str, style: TextStyle, color: Rgb, centered: bool) {
        let g = self.geometry();
        if self.cursor.side_y > g.content_limit() {
            self.report.side_lines_dropped += 1;
            return;
        }
        let y = self.cursor.side_y;
        let side = &mut self.pages[0];
        side.set_font(style);
        side.set_text_color(color);
        if centered {
            side.text_centered(text, g.side_center_x(), y);
        } else {
            side.text(text, g.side_x(), y);
        }
        self.cursor.side_y += style.line_height();
    }

    // ── main column ─────────────────────────────────────────────────────────

    fn write_profile(&mut self, resume: &ResumeRecord) {
        let Some(summary) = non_blank(&resume.summary) else {
            return;
        };
        let lines = self.main_lines(summary, BODY, palette::TEXT);
        let lead = lines.lines.len().min(3) as f32 * BODY.line_height();

        self.section_heading(&self.labels().profile, lead);
        self.flow(&lines);
        self.cursor.main_y += SECTION_GAP;
    }

    fn write_experiences(&mut self, experiences: &[Experience]) {
        let blocks: Vec<EntryBlock> = experiences
            .iter()
            .map(|exp| self.experience_block(exp))
            .filter(|block| !block.is_empty())
            .collect();
        self.write_entry_section(&self.labels().experience, &blocks);
    }

    fn write_formations(&mut self, formations: &[Formation]) {
        let blocks: Vec<EntryBlock> = formations
            .iter()
            .map(|formation| self.formation_block(formation))
            .filter(|block| !block.is_empty())
            .collect();
        self.write_entry_section(&self.labels().education, &blocks);
    }

    fn write_interests(&mut self, interests: &[String]) {
        let items: Vec<&str> = non_blank_items(interests).collect();
        if items.is_empty() {
            return;
        }
        let lines = self.main_lines(&items.join(INTEREST_SEPARATOR), BODY, palette::TEXT);
        let lead = lines.lines.len().min(3) as f32 * BODY.line_height();

        self.section_heading(&self.labels().interests, lead);
        self.flow(&lines);
    }

    fn write_entry_section(&mut self, heading: &str, blocks: &[EntryBlock]) {
        let Some(first) = blocks.first() else {
            return;
        };
        // The heading reserves room for the first block, so that block is
        // placed straight under it.
        self.section_heading(heading, self.block_reservation(first));
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                self.ensure_room(self.block_reservation(block));
            }
            for lines in &block.head {
                self.flow(lines);
            }
            if let Some(description) = &block.description {
                self.flow(description);
            }
            self.cursor.main_y += BLOCK_GAP;
        }
        self.cursor.main_y += SECTION_GAP;
    }

    fn experience_block(&self, exp: &Experience) -> EntryBlock {
        let org_line = joined(&[non_blank(&exp.organization), non_blank(&exp.city)], " — ");
        let dates = format_date_range(
            non_blank(&exp.start_date),
            exp.effective_end_date(),
            exp.ongoing,
            self.labels(),
        );
        self.entry_block(non_blank(&exp.role), &org_line, &dates, non_blank(&exp.description))
    }

    fn formation_block(&self, formation: &Formation) -> EntryBlock {
        let org_line = joined(
            &[non_blank(&formation.institution), non_blank(&formation.city)],
            " — ",
        );
        let dates = format_date_range(
            non_blank(&formation.start_date),
            formation.effective_end_date(),
            formation.ongoing,
            self.labels(),
        );
        self.entry_block(
            non_blank(&formation.diploma),
            &org_line,
            &dates,
            non_blank(&formation.description),
        )
    }

    fn entry_block(
        &self,
        title: Option<&str>,
        org_line: &str,
        dates: &str,
        description: Option<&str>,
    ) -> EntryBlock {
        let mut head = Vec::new();
        if let Some(title) = title {
            head.push(self.main_lines(title, ENTRY_TITLE, palette::TEXT));
        }
        if !org_line.is_empty() {
            head.push(self.main_lines(org_line, ENTRY_META, palette::ACCENT));
        }
        if !dates.is_empty() {
            head.push(self.main_lines(dates, ENTRY_DATES, palette::MUTED));
        }
        let description = description.map(|d| self.main_lines(d, BODY, palette::TEXT));
        EntryBlock { head, description }
    }

    fn main_lines(&self, text: &str, style: TextStyle, color: Rgb) -> Lines {
        Lines {
            lines: style.wrap(text, self.geometry().main_width()),
            style,
            color,
        }
    }

    /// Height to keep free ahead of a block, per pagination mode. A block
    /// taller than a page asks for a whole page and flows from its top.
    fn block_reservation(&self, block: &EntryBlock) -> f32 {
        match self.settings.pagination {
            PaginationMode::Measured => block.height().min(self.geometry().usable_height()),
            PaginationMode::Conservative => self.geometry().min_block_height,
        }
    }

    /// Starts a new page unless `height` still fits below the cursor. A page
    /// that is still empty is never abandoned.
    fn ensure_room(&mut self, height: f32) {
        let g = self.geometry();
        let at_top = self.cursor.main_y <= g.top() + EPSILON;
        if !at_top && self.cursor.main_y + height > g.content_limit() {
            self.start_new_page();
        }
    }

    /// Section heading with its underline, kept together with `keep_with`
    /// millimetres of the content that follows.
    fn section_heading(&mut self, heading: &str, keep_with: f32) {
        let advance = SECTION_HEADING.line_height() + RULE_GAP * 2.0;
        self.ensure_room(advance + keep_with);

        let g = self.geometry();
        let y = self.cursor.main_y;
        let page = &mut self.pages[self.cursor.page];
        page.set_font(SECTION_HEADING);
        page.set_text_color(palette::ACCENT);
        page.text(heading, g.main_x(), y);
        page.set_draw_color(palette::RULE);
        page.set_line_width(0.4);
        page.line(g.main_x(), y + RULE_GAP, g.main_x() + g.main_width(), y + RULE_GAP);
        self.cursor.main_y += advance;
    }

    /// Writes lines at the main cursor. A line whose baseline would pass the
    /// content limit continues on a new page, or is clipped in conservative
    /// mode.
    fn flow(&mut self, lines: &Lines) {
        let g = self.geometry();
        for line in &lines.lines {
            if self.cursor.main_y > g.content_limit() {
                match self.settings.pagination {
                    PaginationMode::Measured => self.start_new_page(),
                    PaginationMode::Conservative => {
                        self.report.main_lines_clipped += 1;
                        continue;
                    }
                }
            }
            let y = self.cursor.main_y;
            let page = &mut self.pages[self.cursor.page];
            page.set_font(lines.style);
            page.set_text_color(lines.color);
            page.text(line, g.main_x(), y);
            self.cursor.main_y += lines.style.line_height();
        }
    }
}

fn bulleted(items: &[String]) -> Vec<String> {
    non_blank_items(items)
        .map(|item| format!("{BULLET}{item}"))
        .collect()
}

fn joined(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
