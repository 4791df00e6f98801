use super::{Drawable, PixelSurface};
use crate::geometry::{Coord, Position, Size};
use crate::graphics::Color;

/// Thickness of the ring drawn by [`Ring`], independent of its radius
pub const RING_THICKNESS: Coord = 5;

/// Filled circle: every point within `radius` of the center, by squared distance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disc {
    pub radius: Coord,
}

/// Annulus with outer radius `radius` and inner radius `radius - RING_THICKNESS`.
///
/// The inner bound is compared squared, so for `radius < RING_THICKNESS` it sits at
/// `|radius - 5|` rather than collapsing to zero: radius 5 is a solid disc, 3 and 4
/// keep a small hole, and 0..=2 draw nothing at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
    pub radius: Coord,
}

impl Disc {
    pub fn contains(&self, dx: i64, dy: i64) -> bool {
        let radius = self.radius as i64;
        dx * dx + dy * dy <= radius * radius
    }
}

impl Ring {
    pub fn contains(&self, dx: i64, dy: i64) -> bool {
        let radius = self.radius as i64;
        let inner = radius - RING_THICKNESS as i64;
        let distance = dx * dx + dy * dy;
        inner * inner <= distance && distance <= radius * radius
    }
}

/// Visits the offsets of the bounding square `[-r, r] x [-r, r]` around `center` that
/// land on the surface. A negative radius gives an empty square.
fn for_each_in_square(
    bounds: Size,
    center: Position,
    radius: Coord,
    mut visit: impl FnMut(Coord, Coord, i64, i64),
) {
    let radius = radius as i64;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let left = (cx - radius).max(0);
    let right = (cx + radius).min(bounds.width as i64 - 1);
    let top = (cy - radius).max(0);
    let bottom = (cy + radius).min(bounds.height as i64 - 1);

    for y in top..=bottom {
        for x in left..=right {
            // both are on the surface, so they fit
            visit(x as Coord, y as Coord, x - cx, y - cy);
        }
    }
}

fn stamp(
    surface: &mut PixelSurface,
    center: Position,
    radius: Coord,
    color: Color,
    contains: impl Fn(i64, i64) -> bool,
) {
    for_each_in_square(surface.dimensions(), center, radius, |x, y, dx, dy| {
        if contains(dx, dy) {
            surface.set(x, y, color);
        }
    });
}

impl Drawable for Disc {
    fn draw_at(&self, surface: &mut PixelSurface, position: Position, color: Color) {
        stamp(surface, position, self.radius, color, |dx, dy| {
            self.contains(dx, dy)
        });
    }
}

impl Drawable for Ring {
    fn draw_at(&self, surface: &mut PixelSurface, position: Position, color: Color) {
        stamp(surface, position, self.radius, color, |dx, dy| {
            self.contains(dx, dy)
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::graphics::named::{GREEN, RED, WHITE};

    fn painted(surface: &PixelSurface, color: Color) -> BTreeSet<(Coord, Coord)> {
        let mut out = BTreeSet::new();
        for y in 0..surface.height() as Coord {
            for x in 0..surface.width() as Coord {
                if surface.get(x, y) == Some(color) {
                    out.insert((x, y));
                }
            }
        }
        out
    }

    fn expected(
        size: Size,
        center: Position,
        test: impl Fn(i64, i64) -> bool,
    ) -> BTreeSet<(Coord, Coord)> {
        let mut out = BTreeSet::new();
        for y in 0..size.height as Coord {
            for x in 0..size.width as Coord {
                if test((x - center.x) as i64, (y - center.y) as i64) {
                    out.insert((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn zero_radius_disc_is_one_pixel() {
        let mut surface = PixelSurface::new(Size::new(10, 10), WHITE);
        Disc { radius: 0 }.draw_at(&mut surface, Position::new(5, 5), RED);
        assert_eq!(painted(&surface, RED), BTreeSet::from([(5, 5)]));
    }

    #[test]
    fn negative_radius_draws_nothing() {
        let mut surface = PixelSurface::new(Size::new(10, 10), WHITE);
        Disc { radius: -3 }.draw_at(&mut surface, Position::new(5, 5), RED);
        Ring { radius: -3 }.draw_at(&mut surface, Position::new(5, 5), RED);
        assert!(painted(&surface, RED).is_empty());
    }

    #[test]
    fn disc_matches_squared_distance_set() {
        let size = Size::new(40, 30);
        for (center, radius) in [
            (Position::new(20, 15), 9),
            (Position::new(0, 0), 6),
            (Position::new(38, 2), 11),
            (Position::new(-4, 12), 7),
        ] {
            let mut surface = PixelSurface::new(size, WHITE);
            Disc { radius }.draw_at(&mut surface, center, GREEN);
            let want = expected(size, center, |dx, dy| dx * dx + dy * dy <= (radius * radius) as i64);
            assert_eq!(painted(&surface, GREEN), want, "center {center:?} radius {radius}");
        }
    }

    #[test]
    fn ring_matches_annulus_set() {
        let size = Size::new(40, 40);
        for radius in [0, 2, 3, 4, 5, 6, 12, 25] {
            let center = Position::new(20, 20);
            let mut surface = PixelSurface::new(size, WHITE);
            Ring { radius }.draw_at(&mut surface, center, RED);
            let inner = (radius - RING_THICKNESS) as i64;
            let outer = radius as i64;
            let want = expected(size, center, |dx, dy| {
                let d = dx * dx + dy * dy;
                inner * inner <= d && d <= outer * outer
            });
            assert_eq!(painted(&surface, RED), want, "radius {radius}");
        }
    }

    #[test]
    fn large_ring_has_a_hole() {
        let mut surface = PixelSurface::new(Size::new(40, 40), WHITE);
        Ring { radius: 12 }.draw_at(&mut surface, Position::new(20, 20), RED);
        assert_eq!(surface.get(20, 20), Some(WHITE));
        assert_eq!(surface.get(20 + 12, 20), Some(RED));
        assert_eq!(surface.get(20 + 7, 20), Some(RED));
        assert_eq!(surface.get(20 + 6, 20), Some(WHITE));
    }

    #[test]
    fn tiny_ring_is_empty() {
        let mut surface = PixelSurface::new(Size::new(20, 20), WHITE);
        for radius in 0..=2 {
            Ring { radius }.draw_at(&mut surface, Position::new(10, 10), RED);
        }
        assert!(painted(&surface, RED).is_empty());
    }

    #[test]
    fn small_ring_fills_in() {
        // inner bound is |4 - 5| = 1, so only the center is left out
        let mut surface = PixelSurface::new(Size::new(20, 20), WHITE);
        Ring { radius: 4 }.draw_at(&mut surface, Position::new(10, 10), RED);
        assert_eq!(surface.get(10, 10), Some(WHITE));
        assert_eq!(surface.get(11, 10), Some(RED));

        // radius 5 has inner bound 0 and is a solid disc
        let mut surface = PixelSurface::new(Size::new(20, 20), WHITE);
        Ring { radius: 5 }.draw_at(&mut surface, Position::new(10, 10), RED);
        assert_eq!(surface.get(10, 10), Some(RED));
    }

    #[test]
    fn huge_radius_only_visits_the_surface() {
        let started = std::time::Instant::now();
        let size = Size::new(10, 10);
        let mut surface = PixelSurface::new(size, WHITE);
        Disc { radius: 30_000 }.draw_at(&mut surface, Position::new(5, 5), GREEN);
        Ring { radius: Coord::MAX }.draw_at(&mut surface, Position::new(5, 5), RED);
        Disc { radius: Coord::MAX }.draw_at(&mut surface, Position::new(Coord::MIN, Coord::MAX), RED);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));

        // the ring's hole is far wider than the surface
        assert_eq!(painted(&surface, GREEN).len(), 100);
        assert!(painted(&surface, RED).is_empty());
    }

    #[test]
    fn ring_edge_crossing_the_surface_is_exact() {
        let size = Size::new(30, 30);
        let center = Position::new(-1_000, 15);
        let radius = 1_010;
        let mut surface = PixelSurface::new(size, WHITE);
        Ring { radius }.draw_at(&mut surface, center, RED);
        let want = expected(size, center, |dx, dy| Ring { radius }.contains(dx, dy));
        assert!(!want.is_empty());
        assert_eq!(painted(&surface, RED), want);
    }
}
