//! Perspective projection for a single row of screen columns.
//!
//! The camera plane is spanned by `right = (-forward.y, forward.x)`. Column
//! `c` of a `w`-pixel viewport maps to the normalized coordinate
//! `nx = 2c / w - 1` in `[-1, 1]`, which is scaled by `tan(fov / 2) * aspect`
//! to an offset along `right`. [`Camera::project`] is the algebraic inverse,
//! used to place billboards.
//!
//! Every division is floored with [`EPSILON`] so zero-sized viewports and
//! points on the camera plane stay finite.

use glam::DVec2;

use crate::types::{EPSILON, Player, Vector2Ext, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec2,
    pub forward: DVec2,
    right: DVec2,
    /// `tan(fov / 2)`.
    fov_scale: f64,
    aspect_ratio: f64,
    width: f64,
    draw_distance: f64,
}

/// A world point expressed in screen terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    /// Fractional screen column.
    pub column: f64,
    /// Distance in front of the camera plane.
    pub depth: f64,
}

impl Camera {
    /// `field_of_view` is in radians.
    pub fn new(player: &Player, viewport: Viewport, field_of_view: f64, draw_distance: f64) -> Self {
        Self {
            position: player.position,
            forward: player.forward,
            right: player.right(),
            fov_scale: (field_of_view * 0.5).tan(),
            aspect_ratio: viewport.aspect_ratio(),
            width: viewport.width as f64,
            draw_distance,
        }
    }

    #[inline]
    pub fn right(&self) -> DVec2 {
        self.right
    }

    #[inline]
    pub fn draw_distance(&self) -> f64 {
        self.draw_distance
    }

    /// Unit world direction of the ray through `column`.
    pub fn direction_for_column(&self, column: f64) -> DVec2 {
        let normalized_x = (2.0 * column) / (self.width + EPSILON) - 1.0;
        let right_scale = self.fov_scale * self.aspect_ratio * normalized_x;
        (self.forward + self.right * right_scale).normalize_guarded()
    }

    /// `(right . delta, forward . delta)` for `delta = point - position`.
    #[inline]
    pub fn to_view(&self, point: DVec2) -> DVec2 {
        let delta = point - self.position;
        DVec2::new(self.right.dot(delta), self.forward.dot(delta))
    }

    /// Screen column and depth of `point`, or `None` when it is behind the
    /// camera or beyond the draw distance.
    pub fn project(&self, point: DVec2) -> Option<ViewPoint> {
        let view = self.to_view(point);
        if view.y <= 0.0 || view.y > self.draw_distance {
            return None;
        }

        let right_scale = view.x / (view.y + EPSILON);
        let normalized_x = right_scale / (self.fov_scale * self.aspect_ratio + EPSILON);
        Some(ViewPoint {
            column: (normalized_x + 1.0) * (self.width + EPSILON) * 0.5,
            depth: view.y,
        })
    }

    /// Screen column a world direction projects to.
    pub fn column_for_direction(&self, direction: DVec2) -> Option<f64> {
        self.project(self.position + direction.normalize_guarded())
            .map(|p| p.column)
    }
}
