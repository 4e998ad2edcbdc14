//! Page geometry and visual constants.
//!
//! All placement arithmetic is in millimetres from the top-left corner of the
//! page, with text positioned by its baseline. The PDF renderer converts to
//! points and flips the Y axis.

use serde::{Deserialize, Serialize};

/// Fixed page dimensions and column layout.
///
/// The side column background runs from the left page edge to the middle of
/// the gutter; its text sits between `margin` and `margin + side_width`. The
/// main column starts after the gutter and ends at the right margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Outer margin (left, right and top).
    pub margin: f32,
    /// Distance from the page bottom below which no content line may start.
    pub bottom_margin: f32,
    pub side_width: f32,
    pub gutter: f32,
    /// Baseline of the footer caption, measured up from the page bottom.
    pub footer_offset: f32,
    /// Space reserved ahead of an entry block when pagination is conservative.
    pub min_block_height: f32,
}

/// A4 portrait.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        page_width: 210.0,
        page_height: 297.0,
        margin: 12.0,
        bottom_margin: 20.0,
        side_width: 56.0,
        gutter: 12.0,
        footer_offset: 8.0,
        min_block_height: 30.0,
    }
}

impl PageGeometry {
    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Y past which a content line is not allowed to start.
    pub fn content_limit(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    /// Height available to main-column content on a fresh page.
    pub fn usable_height(&self) -> f32 {
        self.content_limit() - self.top()
    }

    pub fn side_x(&self) -> f32 {
        self.margin
    }

    pub fn side_center_x(&self) -> f32 {
        self.margin + self.side_width / 2.0
    }

    pub fn side_background_width(&self) -> f32 {
        self.margin + self.side_width + self.gutter / 2.0
    }

    pub fn main_x(&self) -> f32 {
        self.margin + self.side_width + self.gutter
    }

    pub fn main_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin - self.side_width - self.gutter
    }

    pub fn footer_y(&self) -> f32 {
        self.page_height - self.footer_offset
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to 0.0..=1.0 as PDF colour operators expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

pub mod palette {
    use super::Rgb;

    pub const SIDE_BACKGROUND: Rgb = Rgb(30, 41, 59);
    pub const AVATAR: Rgb = Rgb(59, 130, 246);
    pub const ACCENT: Rgb = Rgb(37, 99, 235);
    pub const SIDE_HEADING: Rgb = Rgb(147, 197, 253);
    pub const SIDE_TEXT: Rgb = Rgb(226, 232, 240);
    pub const SIDE_RULE: Rgb = Rgb(71, 85, 105);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const TEXT: Rgb = Rgb(31, 41, 55);
    pub const MUTED: Rgb = Rgb(107, 114, 128);
    pub const RULE: Rgb = Rgb(209, 213, 219);
}

/// Font sizes in points.
pub mod type_scale {
    pub const INITIALS: f32 = 20.0;
    pub const NAME: f32 = 16.0;
    pub const TITLE: f32 = 10.5;
    pub const SIDE_HEADING: f32 = 10.0;
    pub const SIDE_BODY: f32 = 8.5;
    pub const SECTION_HEADING: f32 = 12.0;
    pub const ENTRY_TITLE: f32 = 10.5;
    pub const ENTRY_META: f32 = 9.0;
    pub const BODY: f32 = 9.5;
    pub const FOOTER: f32 = 7.5;
}
