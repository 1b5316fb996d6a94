use serde::{Deserialize, Serialize};

/// CSS reference pixels per inch; Chrome's print margins are in inches.
pub const CSS_PX_PER_INCH: f64 = 96.0;

/// Physical paper size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    pub width_in: f64,
    pub height_in: f64,
}

/// ISO A4, 210 × 297 mm.
pub const A4: PaperSize = PaperSize {
    width_in: 8.27,
    height_in: 11.69,
};

/// Page layout for PDF output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub paper: PaperSize,

    /// Margin applied to all four sides, in CSS pixels.
    pub margin_px: f64,

    /// Print CSS backgrounds. The generated HTML relies on colored
    /// section backgrounds and validity badges.
    pub print_background: bool,
}

impl PageLayout {
    pub fn margin_inches(&self) -> f64 {
        self.margin_px / CSS_PX_PER_INCH
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            paper: A4,
            margin_px: 20.0,
            print_background: true,
        }
    }
}
