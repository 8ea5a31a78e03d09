/// Direction in a hexagonal coordinate system.
///
/// Compass names assume pointy-top hexagons with `z` growing downward;
/// the axial offsets are the same for both orientations.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum Direction {
    #[display("e")]
    East,
    #[display("ne")]
    Northeast,
    #[display("nw")]
    Northwest,
    #[display("w")]
    West,
    #[display("sw")]
    Southwest,
    #[display("se")]
    Southeast,
}

impl Direction {
    /// Every direction, in neighbor order.
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::Northeast,
        Direction::Northwest,
        Direction::West,
        Direction::Southwest,
        Direction::Southeast,
    ];

    /// Iterate through all `Direction`s, counterclockwise from `East`.
    pub fn iter() -> impl Iterator<Item = Direction> {
        Self::ALL.into_iter()
    }

    /// Axial `(dx, dz)` step of this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::Northeast => (1, -1),
            Direction::Northwest => (0, -1),
            Direction::West => (-1, 0),
            Direction::Southwest => (-1, 1),
            Direction::Southeast => (0, 1),
        }
    }

    /// Position of this direction within [`Direction::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 6]
    }

    pub fn reverse(self) -> Direction {
        Self::from_index(self.index() + 3)
    }

    pub fn turn_left(self) -> Direction {
        Self::from_index(self.index() + 1)
    }

    pub fn turn_right(self) -> Direction {
        Self::from_index(self.index() + 5)
    }
}
