/// Render layer, controls draw order.
///
/// Layers are drawn back-to-front: Sky first, Player last. The host picks
/// a fill style per layer; instances carry the discriminant as a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    Sky = 0,
    Stars = 1,
    Hills = 2,
    Tiles = 3,
    Platforms = 4,
    Player = 5,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 6;

    /// Convert from a u8 value to a RenderLayer.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Sky),
            1 => Some(Self::Stars),
            2 => Some(Self::Hills),
            3 => Some(Self::Tiles),
            4 => Some(Self::Platforms),
            5 => Some(Self::Player),
            _ => None,
        }
    }

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
