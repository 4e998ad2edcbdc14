//! Static font-metric tables for the PDF base-14 Helvetica family.
//!
//! Widths are the Adobe AFM advance widths divided by 1000, i.e. em units
//! relative to the font size. Tables cover ASCII 0x20..=0x7E (95 printable
//! characters), index = (char as usize) - 32. Accented Latin letters measure
//! as their base letter, which matches the AFM data for Helvetica. Anything
//! else falls back to `average_char_width`.
//!
//! This module is the text-measurement half of the drawing primitive: it owns
//! wrap-to-width (`split_text_to_size`). Layout code never picks break points
//! itself, it only consumes the lines returned here.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Default leading, as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The standard fonts every PDF viewer ships. Nothing is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    /// PostScript name written into the PDF font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    pub const ALL: [Font; 3] = [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique];
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
///
/// Characters past ASCII that WinAnsiEncoding can show are looked up in
/// `extended`; accented letters missing there share their base letter's width.
pub struct FontMetricTable {
    widths: [f32; 95],
    extended: fn(char) -> Option<f32>,
    /// Fallback width for characters without an entry.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of one character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        if let Some(width) = self.ascii_width(c) {
            return width;
        }
        if let Some(width) = (self.extended)(c) {
            return width;
        }
        self.ascii_width(base_char(c)).unwrap_or(self.average_char_width)
    }

    fn ascii_width(&self, c: char) -> Option<f32> {
        let code = c as usize;
        (32..=126).contains(&code).then(|| self.widths[code - 32])
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Rendered width in millimetres at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * PT_TO_MM
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_mm`.
    ///
    /// Explicit newlines start a new line (blank lines are kept as `""`).
    /// A single word wider than the column is broken between characters so
    /// no returned line exceeds the width, except a lone character that is
    /// itself wider than the column.
    pub fn split_text_to_size(&self, text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let max_width = max_width_mm / (size_pt * PT_TO_MM);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let paragraph = paragraph.trim_end_matches('\r');
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_str(word);

                if word_w > max_width {
                    // Overlong word: flush, then hard-break it.
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current_width = 0.0;
                    for c in word.chars() {
                        let c_w = self.char_width(c);
                        if !current.is_empty() && current_width + c_w > max_width {
                            lines.push(std::mem::take(&mut current));
                            current_width = 0.0;
                        }
                        current.push(c);
                        current_width += c_w;
                    }
                    continue;
                }

                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_w;
                } else if current_width + self.space_width + word_w <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += self.space_width + word_w;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_w;
                }
            }
            lines.push(current);
        }
        lines
    }
}

/// Height of one line of text in millimetres.
pub fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_HEIGHT_FACTOR
}

/// Maps accented Latin letters to the unaccented letter they share a width with.
fn base_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'Š' => 'S',
        'š' => 's',
        'Ž' => 'Z',
        'ž' => 'z',
        _ => c,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica. Helvetica-Oblique shares these widths.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {      |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    extended: helvetica_extended,
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    extended: helvetica_extended,
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Helvetica-Bold.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
    // {      |      }      ~
    0.389, 0.280, 0.389, 0.584,
];

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_BOLD_WIDTHS,
    extended: helvetica_bold_extended,
    average_char_width: 0.611,
    space_width: 0.278,
};

/// Helvetica (and Helvetica-Oblique) widths for the WinAnsi range past ASCII.
fn helvetica_extended(c: char) -> Option<f32> {
    let width = match c {
        '\u{a0}' | '·' => 0.278,
        '‚' | '‘' | '’' => 0.222,
        '„' | '“' | '”' | 'ˆ' | '˜' | '‹' | '›' | '¡' | '¨' | '\u{ad}' | '¯' | '²' | '³'
        | '´' | '¸' | '¹' => 0.333,
        // Helvetica's dotless accented i is wider than plain i.
        'ì' | 'í' | 'î' | 'ï' => 0.278,
        '€' | 'ƒ' | '†' | '‡' | '–' | '¢' | '£' | '¤' | '¥' | '§' | '«' | '»' | 'µ' | 'ð'
        | 'þ' => 0.556,
        '…' | '‰' | '—' | '™' | 'Œ' | 'Æ' => 1.0,
        '•' => 0.350,
        'œ' => 0.944,
        'æ' => 0.889,
        '¦' => 0.260,
        '©' | '®' => 0.737,
        'ª' => 0.370,
        'º' => 0.365,
        '¬' | '±' | '×' | '÷' => 0.584,
        '°' => 0.400,
        '¶' => 0.537,
        '¼' | '½' | '¾' => 0.834,
        '¿' | 'ß' | 'ø' => 0.611,
        'Ð' => 0.722,
        'Ø' => 0.778,
        'Þ' => 0.667,
        _ => return None,
    };
    Some(width)
}

/// Helvetica-Bold widths for the WinAnsi range past ASCII.
fn helvetica_bold_extended(c: char) -> Option<f32> {
    let width = match c {
        '\u{a0}' | '·' | '‚' | '‘' | '’' => 0.278,
        'ˆ' | '˜' | '‹' | '›' | '¡' | '¨' | '\u{ad}' | '¯' | '²' | '³' | '´' | '¸' | '¹' => 0.333,
        '„' | '“' | '”' => 0.500,
        '€' | 'ƒ' | '†' | '‡' | '–' | '¢' | '£' | '¤' | '¥' | '§' | '«' | '»' | '¶' => 0.556,
        '…' | '‰' | '—' | '™' | 'Œ' | 'Æ' => 1.0,
        '•' => 0.350,
        'œ' => 0.944,
        'æ' => 0.889,
        '¦' => 0.280,
        '©' | '®' => 0.737,
        'ª' => 0.370,
        'º' => 0.365,
        '¬' | '±' | '×' | '÷' => 0.584,
        '°' => 0.400,
        '¼' | '½' | '¾' => 0.834,
        '¿' | 'ß' | 'ø' | 'µ' | 'ð' | 'þ' => 0.611,
        'Ð' => 0.722,
        'Ø' => 0.778,
        'Þ' => 0.667,
        _ => return None,
    };
    Some(width)
}

/// Returns the static metric table for a font.
pub fn get_metrics(font: Font) -> &'static FontMetricTable {
    match font {
        Font::Helvetica => &HELVETICA_TABLE,
        Font::HelveticaBold => &HELVETICA_BOLD_TABLE,
        Font::HelveticaOblique => &HELVETICA_OBLIQUE_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(Font::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(Font::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Professional experience";
        assert!(
            get_metrics(Font::HelveticaBold).measure_str(text)
                > get_metrics(Font::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_accented_letters_measure_as_base_letter() {
        let metrics = get_metrics(Font::Helvetica);
        assert_eq!(metrics.measure_str("é"), metrics.measure_str("e"));
        assert_eq!(metrics.measure_str("Ç"), metrics.measure_str("C"));
    }

    #[test]
    fn test_unknown_char_falls_back_to_average() {
        let metrics = get_metrics(Font::HelveticaBold);
        assert_eq!(metrics.measure_str("漢"), metrics.average_char_width);
    }

    #[test]
    fn test_win_ansi_punctuation_uses_afm_widths() {
        let regular = get_metrics(Font::Helvetica);
        assert_eq!(regular.char_width('—'), 1.0);
        assert_eq!(regular.char_width('œ'), 0.944);
        assert_eq!(regular.char_width('…'), 1.0);
        assert_eq!(regular.char_width('•'), 0.350);
        assert_eq!(regular.char_width('\u{a0}'), regular.space_width);
        assert_eq!(regular.char_width('í'), 0.278);
        let bold = get_metrics(Font::HelveticaBold);
        assert_eq!(bold.char_width('“'), 0.500);
        assert_eq!(bold.char_width('Š'), bold.char_width('S'));
    }

    #[test]
    fn test_wrapped_em_dashes_and_ligatures_fit_column() {
        let metrics = get_metrics(Font::Helvetica);
        let size = 9.5;
        let width = 118.0;
        // Real Helvetica widths: em dash 1000, oe 944, space 278 (per 1000 em).
        let afm_width = |line: &str| -> f32 {
            line.chars()
                .map(|c| match c {
                    '—' => 1.0,
                    'œ' => 0.944,
                    ' ' => 0.278,
                    other => metrics.char_width(other),
                })
                .sum::<f32>()
                * size
                * PT_TO_MM
        };

        let dashes = "—".repeat(400);
        let lines = metrics.split_text_to_size(&dashes, size, width);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(afm_width(line) <= width + 1e-3, "{} dashes too wide", line.chars().count());
        }

        let text = "cœur — œuvre — sœur ".repeat(40);
        for line in metrics.split_text_to_size(&text, size, width) {
            assert!(afm_width(&line) <= width + 1e-3, "line too wide: {line}");
        }
    }

    #[test]
    fn test_width_mm_scales_with_size() {
        let metrics = get_metrics(Font::Helvetica);
        let small = metrics.width_mm("Noken", 10.0);
        let large = metrics.width_mm("Noken", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_split_short_text_is_one_line() {
        let metrics = get_metrics(Font::Helvetica);
        assert_eq!(metrics.split_text_to_size("Rust", 10.0, 100.0), vec!["Rust"]);
    }

    #[test]
    fn test_split_long_text_fits_width() {
        let metrics = get_metrics(Font::Helvetica);
        let text = "Architected a distributed caching layer using consistent hashing ".repeat(10);
        let lines = metrics.split_text_to_size(&text, 10.0, 80.0);
        assert!(lines.len() > 5, "expected many lines, got {}", lines.len());
        for line in &lines {
            assert!(metrics.width_mm(line, 10.0) <= 80.0 + 1e-3, "line too wide: {line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_split_breaks_overlong_word() {
        let metrics = get_metrics(Font::Helvetica);
        let url = "https://www.linkedin.com/in/a-very-long-profile-name-that-never-ends";
        let lines = metrics.split_text_to_size(url, 9.0, 30.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_mm(line, 9.0) <= 30.0 + 1e-3);
        }
        assert_eq!(lines.concat(), url);
    }

    #[test]
    fn test_split_keeps_explicit_newlines() {
        let metrics = get_metrics(Font::Helvetica);
        let lines = metrics.split_text_to_size("first\r\n\nthird", 10.0, 100.0);
        assert_eq!(lines, vec!["first", "", "third"]);
    }

    #[test]
    fn test_line_height() {
        let h = line_height_mm(10.0);
        assert!((h - 10.0 * PT_TO_MM * 1.15).abs() < 1e-6);
    }
}
