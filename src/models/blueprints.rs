use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Point;

/// A named, authored sequence of points.
///
/// `(author, name)` identifies a blueprint and never changes after construction; only the point
/// sequence can grow.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq, Hash)]
pub struct Blueprint {
    author: String,
    name: String,
    #[serde(default)]
    points: Vec<Point>,
}

impl Blueprint {
    pub fn new(author: impl Into<String>, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            points,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Replaces the point sequence while keeping the identity fields.
    pub fn map_points<F>(self, f: F) -> Self
    where
        F: FnOnce(Vec<Point>) -> Vec<Point>,
    {
        Self {
            points: f(self.points),
            ..self
        }
    }

    pub fn into_parts(self) -> (String, String, Vec<Point>) {
        (self.author, self.name, self.points)
    }
}
