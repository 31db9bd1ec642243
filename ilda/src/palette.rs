use lazy_static::lazy_static;

use crate::error::IldaError;

/// Lookup table mapping small palette indices to RGB triples.
/// Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<[u8; 3]>);

impl Palette {
    pub fn new(colors: Vec<[u8; 3]>) -> Self {
        Self(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lookup(&self, index: usize) -> Result<[u8; 3], IldaError> {
        self.0
            .get(index)
            .copied()
            .ok_or(IldaError::ColorIndexOutOfRange {
                index,
                palette_len: self.0.len(),
            })
    }
}

impl From<Vec<[u8; 3]>> for Palette {
    fn from(colors: Vec<[u8; 3]>) -> Self {
        Self::new(colors)
    }
}

lazy_static! {
    /// Classic 256-entry VGA default palette. Used to resolve indexed
    /// colors when the caller does not supply a palette of its own.
    pub static ref DEFAULT_PALETTE: Palette = Palette::new(vga_colors());
}

/// Builds the VGA default table: the 16 EGA colors, a 16-step gray
/// ramp, nine 24-hue wheels (three values, three saturations each) and
/// 8 black filler entries. Components are 6-bit DAC values scaled to
/// 8 bits.
fn vga_colors() -> Vec<[u8; 3]> {
    const EGA: [[u8; 3]; 16] = [
        [0, 0, 0],
        [0, 0, 42],
        [0, 42, 0],
        [0, 42, 42],
        [42, 0, 0],
        [42, 0, 42],
        [42, 21, 0],
        [42, 42, 42],
        [21, 21, 21],
        [21, 21, 63],
        [21, 63, 21],
        [21, 63, 63],
        [63, 21, 21],
        [63, 21, 63],
        [63, 63, 21],
        [63, 63, 63],
    ];
    const GRAYS: [u8; 16] = [
        0x00, 0x05, 0x08, 0x0B, 0x0E, 0x11, 0x14, 0x18, 0x1C, 0x20, 0x24, 0x28, 0x2D, 0x32, 0x38,
        0x3F,
    ];

    let mut colors: Vec<[u8; 3]> = Vec::with_capacity(256);
    colors.extend(EGA.iter().map(|&c| scale6(c)));
    colors.extend(GRAYS.iter().map(|&v| scale6([v, v, v])));
    for high in [63u8, 28, 16] {
        for low in [0, high / 2, (high as u16 * 5 / 7) as u8] {
            hue_wheel(&mut colors, low, high);
        }
    }
    // trailing filler entries
    colors.resize(256, [0, 0, 0]);
    colors
}

/// Appends a 24-entry hue wheel running blue, magenta, red, yellow,
/// green, cyan and back toward blue, with channels ramping between
/// `low` and `high` in quarter steps.
fn hue_wheel(out: &mut Vec<[u8; 3]>, low: u8, high: u8) {
    let step = |k: u8| low + (high - low) * k / 4;
    let rising = [step(0), step(1), step(2), step(3)];
    let falling = [high, step(3), step(2), step(1)];

    for r in rising {
        out.push(scale6([r, low, high]));
    }
    for b in falling {
        out.push(scale6([high, low, b]));
    }
    for g in rising {
        out.push(scale6([high, g, low]));
    }
    for r in falling {
        out.push(scale6([r, high, low]));
    }
    for b in rising {
        out.push(scale6([low, high, b]));
    }
    for g in falling {
        out.push(scale6([low, g, high]));
    }
}

fn scale6([r, g, b]: [u8; 3]) -> [u8; 3] {
    let scale = |v: u8| (v as u16 * 255 / 63) as u8;
    [scale(r), scale(g), scale(b)]
}
