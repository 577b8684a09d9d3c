use plategen_core::PlateFont;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font: PlateFont,
    pub font_size: f64,
    /// Extra advance after every glyph, CSS `letter-spacing` semantics.
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: PlateFont::EuroPlate,
            font_size: 105.0,
            letter_spacing: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Measures single-line plate text.
///
/// Implementations backed by real font data should only be consulted once the face is loaded;
/// see [`crate::settle::SettleGate`].
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer with fixed per-face advance factors (in em).
///
/// A `char_width_factor` of zero selects the built-in factor for the style's font.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn font_char_width_factor(font: PlateFont) -> f64 {
        match font {
            PlateFont::EuroPlate => 0.42,
            PlateFont::EuroPlateCondensed => 0.38,
            PlateFont::CharlesWright => 0.5,
            PlateFont::Trafikkalfabetet => 0.47,
            PlateFont::Tratex => 0.46,
        }
    }

    fn advance_em(&self, ch: char, font: PlateFont) -> f64 {
        let glyph = if self.char_width_factor == 0.0 {
            Self::font_char_width_factor(font)
        } else {
            self.char_width_factor
        };
        match ch {
            ' ' => 0.25,
            '\u{200A}' => 0.1,
            '-' | '\u{2013}' => 0.3,
            _ => match ch.width() {
                Some(0) | None => 0.0,
                Some(w) => glyph * w as f64,
            },
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.0
        } else {
            self.line_height_factor
        };
        let font_size = style.font_size.max(1.0);

        let mut width = 0.0;
        let mut glyphs = 0usize;
        for ch in text.chars() {
            let em = self.advance_em(ch, style.font);
            if em == 0.0 && ch != ' ' {
                continue;
            }
            width += em * font_size;
            glyphs += 1;
        }
        width += glyphs as f64 * style.letter_spacing;

        TextMetrics {
            width,
            height: if text.is_empty() {
                0.0
            } else {
                font_size * line_height_factor
            },
        }
    }
}
