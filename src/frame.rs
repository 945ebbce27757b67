use crate::vehicle::VehicleState;
use crate::{Error, LightId, LightPhase, Result, VehicleId};
use itertools::Itertools;

/// A snapshot of every vehicle and traffic light at one step of a scenario.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// The index of the step, counting from 0.
    pub index: usize,
    /// The reported vehicle states, in the order they should be applied.
    pub vehicles: Vec<VehicleSnapshot>,
    /// The reported light phases.
    pub lights: Vec<LightSnapshot>,
}

/// The reported state of one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub state: VehicleState,
    /// A display colour for the vehicle, if the source assigned one.
    pub color: Option<String>,
}

/// The reported phase of one traffic light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightSnapshot {
    pub id: LightId,
    pub phase: LightPhase,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Checks that no vehicle or light is reported more than once.
    pub fn validate(&self) -> Result<()> {
        if let Some(dup) = self.vehicles.iter().duplicates_by(|v| v.id).next() {
            return Err(Error::DuplicateVehicle {
                frame: self.index,
                id: dup.id,
            });
        }
        if let Some(dup) = self.lights.iter().duplicates_by(|l| l.id).next() {
            return Err(Error::DuplicateLight {
                frame: self.index,
                id: dup.id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::ground_point;
    use crate::Heading;

    fn vehicle(id: u32) -> VehicleSnapshot {
        VehicleSnapshot {
            id: VehicleId(id),
            state: VehicleState {
                position: ground_point(0.0, 0.0),
                heading: Heading::Right,
                stopped: false,
                passed_light: false,
                turn_right: false,
            },
            color: None,
        }
    }

    fn light(id: u32) -> LightSnapshot {
        LightSnapshot {
            id: LightId(id),
            phase: LightPhase::Red,
        }
    }

    #[test]
    fn unique_ids_are_valid() {
        let frame = Frame {
            index: 0,
            vehicles: vec![vehicle(1), vehicle(2)],
            lights: vec![light(1), light(2)],
        };
        assert!(frame.validate().is_ok());
        assert!(Frame::new(4).validate().is_ok());
    }

    #[test]
    fn duplicate_vehicle_is_malformed() {
        let frame = Frame {
            index: 3,
            vehicles: vec![vehicle(1), vehicle(2), vehicle(1)],
            lights: vec![],
        };
        assert!(matches!(
            frame.validate(),
            Err(Error::DuplicateVehicle { frame: 3, id: VehicleId(1) })
        ));
    }

    #[test]
    fn duplicate_light_is_malformed() {
        let frame = Frame {
            index: 0,
            vehicles: vec![],
            lights: vec![light(2), light(2)],
        };
        assert!(matches!(
            frame.validate(),
            Err(Error::DuplicateLight { frame: 0, id: LightId(2) })
        ));
    }
}
