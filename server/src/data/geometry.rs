//! Geometry values used by spatial predicates

use std::fmt;

/// A 2D position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Planar geometry literal
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    Line(Vec<Position>),
    /// Outer ring first, then holes. Every ring is closed.
    Polygon(Vec<Vec<Position>>),
}

impl Geometry {
    /// Well-known text representation
    pub fn to_wkt(&self) -> String {
        self.to_string()
    }
}

fn write_positions(f: &mut fmt::Formatter<'_>, positions: &[Position]) -> fmt::Result {
    for (i, p) in positions.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{} {}", p.x, p.y)?;
    }
    Ok(())
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => write!(f, "POINT({} {})", p.x, p.y),
            Self::Line(points) => {
                write!(f, "LINESTRING(")?;
                write_positions(f, points)?;
                write!(f, ")")
            }
            Self::Polygon(rings) => {
                write!(f, "POLYGON(")?;
                for (i, ring) in rings.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "(")?;
                    write_positions(f, ring)?;
                    write!(f, ")")?;
                }
                write!(f, ")")
            }
        }
    }
}
