//! Tile coordinates and rectangular bounds.

use std::fmt;

/// Cardinal steps, clockwise from north.
const CARDINAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Diagonal steps, clockwise from north-east.
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// A tile coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// North, east, south and west neighbors, in that order.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        CARDINAL.map(|(dx, dy)| self.shift(dx, dy))
    }

    /// North-east, south-east, south-west and north-west neighbors.
    #[inline]
    pub fn diagonals(self) -> [Point; 4] {
        DIAGONAL.map(|(dx, dy)| self.shift(dx, dy))
    }

    /// Whether `other` is exactly one diagonal step away.
    #[inline]
    pub fn is_diagonal_to(self, other: Point) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Half-open rectangle: `min` is inside, `max` is one past the last tile on
/// each axis. Tiles are numbered row by row starting at `min`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Bounds spanning two corners given in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let min = Point::new(x0.min(x1), y0.min(y1));
        let max = Point::new(x0.max(x1), y0.max(y1));
        Self { min, max }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of tiles covered.
    #[inline]
    pub fn len(self) -> usize {
        self.width().max(0) as usize * self.height().max(0) as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Tile number of `p`, or `None` outside the bounds.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        self.contains(p).then(|| {
            let rel = Point::new(p.x - self.min.x, p.y - self.min.y);
            rel.y as usize * self.width() as usize + rel.x as usize
        })
    }

    /// The tile with number `idx`. Inverse of [`index_of`](Self::index_of)
    /// for `idx < len()`.
    #[inline]
    pub fn point_at(self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        self.min.shift((idx % w) as i32, (idx / w) as i32)
    }

    /// Every tile, in tile-number order.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            end: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    end: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.end {
            return None;
        }
        let p = self.range.point_at(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_neighbors() {
        let p = Point::new(1, 2);
        assert_eq!(p.shift(-1, 1), Point::new(0, 3));
        assert_eq!(
            p.neighbors_4(),
            [
                Point::new(1, 1),
                Point::new(2, 2),
                Point::new(1, 3),
                Point::new(0, 2),
            ]
        );
        assert_eq!(p.to_string(), "(1, 2)");
    }

    #[test]
    fn diagonal_detection() {
        let p = Point::new(2, 2);
        for d in p.diagonals() {
            assert!(p.is_diagonal_to(d));
        }
        for n in p.neighbors_4() {
            assert!(!p.is_diagonal_to(n));
        }
        assert!(!p.is_diagonal_to(p));
    }

    #[test]
    fn bounds_are_half_open() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!((r.min, r.max), (Point::new(0, 0), Point::new(3, 2)));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 1)));
    }

    #[test]
    fn index_round_trips_through_point_at() {
        let r = Range::new(2, 3, 7, 6);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.index_of(p), Some(i));
            assert_eq!(r.point_at(i), p);
        }
        assert_eq!(r.index_of(Point::new(0, 0)), None);
    }

    #[test]
    fn iteration_goes_row_by_row() {
        let r = Range::new(0, 0, 3, 2);
        let mut it = r.into_iter();
        assert_eq!(it.len(), 6);
        assert_eq!(it.next(), Some(Point::new(0, 0)));
        assert_eq!(it.next(), Some(Point::new(1, 0)));
        assert_eq!(it.nth(1), Some(Point::new(0, 1)));
        assert_eq!(it.len(), 2);
        assert_eq!(it.last(), Some(Point::new(2, 1)));
    }

    #[test]
    fn empty_range_iter() {
        let r = Range::new(0, 0, 0, 4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
