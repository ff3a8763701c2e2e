//! Contact predicates for circles in an axis-aligned box
//!
//! Screen coordinates: origin top-left, y grows downward, so "bottom" is
//! `y = height`.

use serde::{Deserialize, Serialize};

use super::vector::Vector2D;

/// Arena extent; walls sit at x = 0, x = width, y = 0, y = height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether the whole circle lies inside the box
    pub fn contains_circle(&self, center: Vector2D, radius: f64) -> bool {
        center.x - radius >= 0.0
            && center.y - radius >= 0.0
            && center.x + radius <= self.width
            && center.y + radius <= self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Bottom,
    Top,
    Right,
    Left,
}

/// A wall the circle touches, with the offset that puts its edge exactly on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub wall: Wall,
    /// Signed displacement along the wall normal axis
    pub correction: f64,
}

/// Walls touched or crossed by a circle, in bottom, top, right, left order
///
/// Each wall is tested independently against the same center, so a body in
/// a corner reports two contacts.
pub fn wall_contacts(center: Vector2D, radius: f64, bounds: &Bounds) -> Vec<WallContact> {
    let mut contacts = Vec::with_capacity(2);
    if center.y + radius >= bounds.height {
        contacts.push(WallContact {
            wall: Wall::Bottom,
            correction: bounds.height - center.y - radius,
        });
    }
    if center.y - radius <= 0.0 {
        contacts.push(WallContact {
            wall: Wall::Top,
            correction: radius - center.y,
        });
    }
    if center.x + radius >= bounds.width {
        contacts.push(WallContact {
            wall: Wall::Right,
            correction: bounds.width - center.x - radius,
        });
    }
    if center.x - radius <= 0.0 {
        contacts.push(WallContact {
            wall: Wall::Left,
            correction: radius - center.x,
        });
    }
    contacts
}

/// Overlap test between two circles
///
/// Coincident centers (distance exactly zero) never count, which is also what
/// keeps a body from colliding with itself.
#[inline]
pub fn circles_overlap(c1: Vector2D, r1: f64, c2: Vector2D, r2: f64) -> bool {
    let dist_sq = c1.distance_squared(c2);
    let reach = r1 + r2;
    dist_sq > 0.0 && dist_sq <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Bounds = Bounds::new(700.0, 400.0);

    #[test]
    fn test_no_contact_in_middle() {
        assert!(wall_contacts(Vector2D::new(350.0, 200.0), 20.0, &BOX).is_empty());
    }

    #[test]
    fn test_bottom_contact_touching_exactly() {
        let contacts = wall_contacts(Vector2D::new(350.0, 380.0), 20.0, &BOX);
        assert_eq!(
            contacts,
            vec![WallContact {
                wall: Wall::Bottom,
                correction: 0.0
            }]
        );
    }

    #[test]
    fn test_corner_reports_two_walls() {
        let contacts = wall_contacts(Vector2D::new(5.0, 395.0), 10.0, &BOX);
        let walls: Vec<Wall> = contacts.iter().map(|c| c.wall).collect();
        assert_eq!(walls, vec![Wall::Bottom, Wall::Left]);
        assert_eq!(contacts[0].correction, -5.0);
        assert_eq!(contacts[1].correction, 5.0);
    }

    #[test]
    fn test_overlap_predicate() {
        let a = Vector2D::new(0.0, 0.0);
        assert!(circles_overlap(a, 5.0, Vector2D::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(a, 5.0, Vector2D::new(3.0, 4.0), 1.0));
        assert!(!circles_overlap(a, 5.0, Vector2D::new(10.1, 0.0), 5.0));
    }

    #[test]
    fn test_coincident_centers_do_not_overlap() {
        let a = Vector2D::new(42.0, 17.0);
        assert!(!circles_overlap(a, 5.0, a, 5.0));
    }

    #[test]
    fn test_contains_circle() {
        assert!(BOX.contains_circle(Vector2D::new(20.0, 20.0), 20.0));
        assert!(!BOX.contains_circle(Vector2D::new(19.0, 20.0), 20.0));
        assert_eq!(BOX.center(), Vector2D::new(350.0, 200.0));
    }
}
