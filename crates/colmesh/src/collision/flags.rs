//! Per-triangle collision flags
//!
//! The low nibble classifies orientation (plus the runtime-only trigger bit),
//! the next nibble carries the surface type. The bit values are fixed by the
//! binary format and shared with the runtime loader.

use bitflags::bitflags;

bitflags! {
    /// 16-bit flag field stored with every collision triangle
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionFlags: u16 {
        /// Floor the player can stand on
        const WALKABLE = 0x0001;
        /// Steep surface that pushes the player out
        const WALL = 0x0002;
        /// Downward-facing surface
        const CEILING = 0x0004;
        /// Trigger volume; set by the runtime, never by the converter
        const TRIGGER = 0x0008;

        /// Water surface
        const WATER = 0x0010;
        /// Snow surface
        const SNOW = 0x0020;
        /// Wooden surface
        const WOOD = 0x0040;
        /// Cement surface
        const CEMENT = 0x0080;

        /// All orientation bits
        const ORIENTATION = Self::WALKABLE.bits() | Self::WALL.bits() | Self::CEILING.bits();
        /// All surface-type bits
        const SURFACE = Self::WATER.bits() | Self::SNOW.bits() | Self::WOOD.bits() | Self::CEMENT.bits();
    }
}

/// Normals with a vertical component at or above this are walkable
pub const WALKABLE_MIN_Y: f32 = 0.7;

/// Normals with a vertical component at or below this are ceilings
pub const CEILING_MAX_Y: f32 = -0.7;

/// Orientation class derived from a triangle's engine-space normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Facing up
    Walkable,
    /// Roughly horizontal facing
    Wall,
    /// Facing down
    Ceiling,
}

impl Orientation {
    /// Classify by the normal's vertical (engine Y) component
    pub fn from_normal_y(y: f32) -> Self {
        if y >= WALKABLE_MIN_Y {
            Self::Walkable
        } else if y <= CEILING_MAX_Y {
            Self::Ceiling
        } else {
            Self::Wall
        }
    }

    /// Flag bit for this orientation
    pub const fn flag(self) -> CollisionFlags {
        match self {
            Self::Walkable => CollisionFlags::WALKABLE,
            Self::Wall => CollisionFlags::WALL,
            Self::Ceiling => CollisionFlags::CEILING,
        }
    }
}

/// Recognized surface types; the set is closed because each owns a bit in
/// the file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceType {
    /// `water`
    Water,
    /// `snow`
    Snow,
    /// `wood`
    Wood,
    /// `cement`
    Cement,
}

impl SurfaceType {
    /// Every surface type, in bit order
    pub const ALL: [Self; 4] = [Self::Water, Self::Snow, Self::Wood, Self::Cement];

    /// Name used in sidecar configuration
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Snow => "snow",
            Self::Wood => "wood",
            Self::Cement => "cement",
        }
    }

    /// Flag bit for this surface type
    pub const fn flag(self) -> CollisionFlags {
        match self {
            Self::Water => CollisionFlags::WATER,
            Self::Snow => CollisionFlags::SNOW,
            Self::Wood => CollisionFlags::WOOD,
            Self::Cement => CollisionFlags::CEMENT,
        }
    }

    /// Look up a surface type by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|surface| surface.name().eq_ignore_ascii_case(name))
    }

    /// Comma-separated list of valid names, for diagnostics
    pub fn valid_names() -> String {
        Self::ALL.map(Self::name).join(", ")
    }
}

/// Triangle counts per flag, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagCounts {
    /// Triangles counted
    pub total: usize,
    /// Walkable triangles
    pub walkable: usize,
    /// Wall triangles
    pub wall: usize,
    /// Ceiling triangles
    pub ceiling: usize,
    surfaces: [usize; 4],
}

impl FlagCounts {
    /// Count one triangle's flags
    pub fn add(&mut self, flags: CollisionFlags) {
        self.total += 1;
        if flags.contains(CollisionFlags::WALKABLE) {
            self.walkable += 1;
        }
        if flags.contains(CollisionFlags::WALL) {
            self.wall += 1;
        }
        if flags.contains(CollisionFlags::CEILING) {
            self.ceiling += 1;
        }
        for (slot, surface) in self.surfaces.iter_mut().zip(SurfaceType::ALL) {
            if flags.contains(surface.flag()) {
                *slot += 1;
            }
        }
    }

    /// Triangles carrying the given surface type
    pub fn surface(&self, surface: SurfaceType) -> usize {
        self.surfaces[surface as usize]
    }

    /// Whether any triangle carries a surface type
    pub fn has_surfaces(&self) -> bool {
        self.surfaces.iter().any(|&count| count > 0)
    }
}

impl FromIterator<CollisionFlags> for FlagCounts {
    fn from_iter<I: IntoIterator<Item = CollisionFlags>>(iter: I) -> Self {
        let mut counts = Self::default();
        for flags in iter {
            counts.add(flags);
        }
        counts
    }
}
