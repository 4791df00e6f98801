/// Coordinates are signed so shape algorithms can walk past the edges of the surface
pub type Coord = i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}
impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` if the position falls inside `[0, width) x [0, height)`
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }
}

/// Position from the top left of the surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}
impl Position {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: Coord, dy: Coord) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}
