use crate::math::Vector3d;
use crate::{Error, Result};
use std::fmt;

/// One of the four axis-aligned directions a vehicle can travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards +X.
    Right,
    /// Towards -X.
    Left,
    /// Towards +Z.
    Forward,
    /// Towards -Z.
    Back,
}

/// A presentational rotation, as Euler angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Heading {
    /// All headings, in a fixed order.
    pub const ALL: [Heading; 4] = [Self::Right, Self::Left, Self::Forward, Self::Back];

    /// Creates a heading from its ground plane components.
    pub fn from_components(dx: i32, dz: i32) -> Result<Self> {
        match (dx, dz) {
            (1, 0) => Ok(Self::Right),
            (-1, 0) => Ok(Self::Left),
            (0, 1) => Ok(Self::Forward),
            (0, -1) => Ok(Self::Back),
            _ => Err(Error::InvalidHeading { dx, dz }),
        }
    }

    /// The ground plane components `(dx, dz)` of the heading.
    pub fn components(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Forward => (0, 1),
            Self::Back => (0, -1),
        }
    }

    /// A unit vector in world space aligned with the heading.
    pub fn vector(self) -> Vector3d {
        let (dx, dz) = self.components();
        Vector3d::new(dx as f64, 0.0, dz as f64)
    }

    /// The heading after a right turn.
    pub fn turned_right(self) -> Self {
        match self {
            Self::Forward => Self::Right,
            Self::Right => Self::Back,
            Self::Back => Self::Left,
            Self::Left => Self::Forward,
        }
    }

    /// The rotation a renderer should give a vehicle model travelling in this direction.
    pub fn orientation(self) -> Orientation {
        let (pitch, yaw, roll) = match self {
            Self::Right => (-100.7, 104.19, -14.3),
            Self::Forward => (-97.68, 2.35, 0.0),
            Self::Left => (-96.07, -94.81, 5.92),
            Self::Back => (-88.49, 0.22, -180.6),
        };
        Orientation { pitch, yaw, roll }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dx, dz) = self.components();
        write!(f, "({}, 0, {})", dx, dz)
    }
}

#[cfg(test)]
mod test {
    use super::Heading;
    use crate::Error;
    use cgmath::InnerSpace;

    #[test]
    fn components_round_trip() {
        for heading in Heading::ALL {
            let (dx, dz) = heading.components();
            assert_eq!(Heading::from_components(dx, dz).unwrap(), heading);
            assert_eq!(heading.vector().magnitude(), 1.0);
        }
    }

    #[test]
    fn rejects_diagonals() {
        assert!(matches!(
            Heading::from_components(1, 1),
            Err(Error::InvalidHeading { dx: 1, dz: 1 })
        ));
        assert!(Heading::from_components(0, 0).is_err());
        assert!(Heading::from_components(2, 0).is_err());
    }

    #[test]
    fn orientation_per_heading() {
        let forward = Heading::Forward.orientation();
        assert_eq!(forward.yaw, 2.35);
        assert_eq!(forward.roll, 0.0);
        for (a, b) in [(Heading::Right, Heading::Left), (Heading::Forward, Heading::Back)] {
            assert_ne!(a.orientation(), b.orientation());
        }
    }

    #[test]
    fn four_right_turns_return_home() {
        let mut heading = Heading::Forward;
        assert_eq!(heading.turned_right(), Heading::Right);
        for _ in 0..4 {
            heading = heading.turned_right();
        }
        assert_eq!(heading, Heading::Forward);
    }
}
