use crate::math::Point3d;
use crate::{Error, LightId};
use std::fmt;
use std::str::FromStr;

/// A traffic light at a fixed position in the world.
#[derive(Clone, Debug)]
pub struct TrafficLight {
    /// The light's ID.
    id: LightId,
    /// The position of the light, used to decide which vehicles it governs.
    position: Point3d,
    /// The current phase.
    phase: LightPhase,
}

/// The phase of a traffic light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightPhase {
    #[default]
    Red,
    Yellow,
    Green,
}

impl TrafficLight {
    /// Creates a new traffic light, which starts out red.
    pub(crate) fn new(id: LightId, position: Point3d) -> Self {
        Self {
            id,
            position,
            phase: LightPhase::Red,
        }
    }

    /// Gets the light's ID.
    pub fn id(&self) -> LightId {
        self.id
    }

    /// The coordinates of the light in world space.
    pub fn position(&self) -> Point3d {
        self.position
    }

    /// The current phase of the light.
    pub fn phase(&self) -> LightPhase {
        self.phase
    }

    /// Sets the current phase. Any phase may follow any other.
    pub fn set_phase(&mut self, phase: LightPhase) {
        self.phase = phase;
    }
}

impl LightPhase {
    /// The lowercase name of the phase.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl FromStr for LightPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            other => Err(Error::UnknownPhase(other.to_owned())),
        }
    }
}

impl fmt::Display for LightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::{LightPhase, TrafficLight};
    use crate::math::ground_point;
    use crate::{Error, LightId};

    #[test]
    fn starts_red() {
        let light = TrafficLight::new(LightId(1), ground_point(5.0, 0.0));
        assert_eq!(light.phase(), LightPhase::Red);
    }

    #[test]
    fn set_phase_is_idempotent() {
        let mut once = TrafficLight::new(LightId(1), ground_point(5.0, 0.0));
        let mut twice = once.clone();
        once.set_phase(LightPhase::Yellow);
        twice.set_phase(LightPhase::Yellow);
        twice.set_phase(LightPhase::Yellow);
        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.position(), twice.position());
    }

    #[test]
    fn any_phase_may_follow_any_phase() {
        let mut light = TrafficLight::new(LightId(1), ground_point(0.0, 1.0));
        light.set_phase(LightPhase::Green);
        light.set_phase(LightPhase::Red);
        light.set_phase(LightPhase::Yellow);
        light.set_phase(LightPhase::Green);
        assert_eq!(light.phase(), LightPhase::Green);
    }

    #[test]
    fn parses_phases_strictly() {
        assert_eq!("green".parse::<LightPhase>().unwrap(), LightPhase::Green);
        assert_eq!("yellow".parse::<LightPhase>().unwrap(), LightPhase::Yellow);
        assert!(matches!(
            "Green".parse::<LightPhase>(),
            Err(Error::UnknownPhase(s)) if s == "Green"
        ));
        assert!("amber".parse::<LightPhase>().is_err());
    }
}
