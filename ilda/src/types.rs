use std::fmt;

/// Bit 7 of a record's status byte. Marks the logical end of the
/// frame's points; the record itself is a sentinel, not a point.
pub const STATUS_LAST: u8 = 1 << 7;
/// Bit 6 of a record's status byte. The laser is off while traveling
/// to this point.
pub const STATUS_BLANK: u8 = 1 << 6;

/// Record layouts defined by the ILDA image data transfer format.
///
/// Only [`Format::Indexed3d`] is decodable; the other tags are
/// recognized so they can be reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// 3D coordinates with indexed color
    Indexed3d,
    /// 2D coordinates with indexed color
    Indexed2d,
    /// Color palette for indexed color frames
    ColorPalette,
    /// 3D coordinates with true color
    TrueColor3d,
    /// 2D coordinates with true color
    TrueColor2d,
    Unknown(u8),
}

impl From<u8> for Format {
    fn from(tag: u8) -> Self {
        match tag {
            0 => Self::Indexed3d,
            1 => Self::Indexed2d,
            2 => Self::ColorPalette,
            4 => Self::TrueColor3d,
            5 => Self::TrueColor2d,
            tag => Self::Unknown(tag),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed3d => write!(f, "3D Coordinates with Indexed Color"),
            Self::Indexed2d => write!(f, "2D Coordinates with Indexed Color"),
            Self::ColorPalette => write!(f, "Color Palette for Indexed Color Frames"),
            Self::TrueColor3d => write!(f, "3D Coordinates with True Color"),
            Self::TrueColor2d => write!(f, "2D Coordinates with True Color"),
            Self::Unknown(tag) => write!(f, "Unknown or invalid format ({})", tag),
        }
    }
}

/// One point sample of a laser path.
///
/// Coordinates cover the full signed 16-bit range. Colors are resolved
/// from the palette at decode time, so a record carries no palette
/// reference of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub status: u8,
}

impl Record {
    pub fn last(&self) -> bool {
        self.status & STATUS_LAST != 0
    }

    pub fn blank(&self) -> bool {
        self.status & STATUS_BLANK != 0
    }
}

/// One animation frame: the null-trimmed header names plus the point
/// sequence in path order. Record order defines segment adjacency.
#[derive(Debug, Clone)]
pub struct Frame {
    pub format: Format,
    pub frame_name: String,
    pub company_name: String,
    pub records: Vec<Record>,
}
