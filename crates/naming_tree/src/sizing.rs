use serde::{Deserialize, Serialize};

/// Size bucket an asset is sorted into by the engine importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    L,
    M,
    S,
}

impl SizeClass {
    /// Bounds volume above which an asset counts as large.
    pub const LARGE_VOLUME: f32 = 60.0;
    /// Bounds volume above which an asset counts as medium.
    pub const MEDIUM_VOLUME: f32 = 30.0;

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(SizeClass::L),
            'M' => Some(SizeClass::M),
            'S' => Some(SizeClass::S),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            SizeClass::L => 'L',
            SizeClass::M => 'M',
            SizeClass::S => 'S',
        }
    }

    pub fn from_volume(volume: f32) -> Self {
        if volume > Self::LARGE_VOLUME {
            SizeClass::L
        } else if volume > Self::MEDIUM_VOLUME {
            SizeClass::M
        } else {
            SizeClass::S
        }
    }

    /// Bucket for an asset whose grid cell declared `declared` (e.g. `"M"` or `"LS"`).
    ///
    /// A single letter is taken as is. A range picks the bucket from the bounds volume,
    /// limited to the range's first and last letters.
    pub fn classify(declared: &str, volume: f32) -> Option<Self> {
        let mut letters = declared.chars();
        let first = SizeClass::from_letter(letters.next()?)?;
        let Some(last) = letters.next_back() else {
            return Some(first);
        };
        let last = SizeClass::from_letter(last)?;

        let by_volume = SizeClass::from_volume(volume);
        Some(if by_volume < first {
            first
        } else if by_volume > last {
            last
        } else {
            by_volume
        })
    }
}
