use crate::light::{LightPhase, TrafficLight};
use crate::math::{horizontal, Point3d};
use crate::{Heading, VehicleId};
use cgmath::InnerSpace;
use log::{debug, info};
use smallvec::SmallVec;

/// Proximity at or below which a vehicle is still before its light,
/// and above which it has passed it.
pub const PROXIMITY_THRESHOLD: f64 = 1.0;

/// A replayed vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's ID.
    id: VehicleId,
    /// The world space coordinates of the vehicle.
    position: Point3d,
    /// The direction of travel.
    heading: Heading,
    /// Whether the vehicle is held by a red light.
    stopped: bool,
    /// Whether the vehicle has crossed its governing light. Never reset once set.
    passed_light: bool,
    /// Whether the vehicle intends to turn right. Carried through untouched.
    turn_right: bool,
}

/// The state of a vehicle as reported by a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    pub position: Point3d,
    pub heading: Heading,
    pub stopped: bool,
    pub passed_light: bool,
    pub turn_right: bool,
}

/// Where a vehicle is in its interaction with its governing light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleStatus {
    Approaching,
    Stopped,
    Passed,
}

/// A change caused by evaluating a vehicle against its light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightInteraction {
    /// The vehicle stopped at a red light.
    Stopped,
    /// The vehicle was released by a green light.
    Released,
    /// The vehicle crossed its light.
    Passed,
}

impl Vehicle {
    /// Creates a new vehicle.
    pub(crate) fn new(id: VehicleId, position: Point3d, heading: Heading) -> Self {
        Self {
            id,
            position,
            heading,
            stopped: false,
            passed_light: false,
            turn_right: false,
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// The coordinates in world space of the vehicle.
    pub fn position(&self) -> Point3d {
        self.position
    }

    /// The vehicle's direction of travel.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Whether the vehicle is held by a red light.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether the vehicle has crossed its governing light.
    pub fn has_passed_light(&self) -> bool {
        self.passed_light
    }

    /// Whether the vehicle intends to turn right.
    pub fn turn_right(&self) -> bool {
        self.turn_right
    }

    /// The vehicle's status with respect to its governing light.
    pub fn status(&self) -> VehicleStatus {
        match (self.passed_light, self.stopped) {
            (true, _) => VehicleStatus::Passed,
            (false, true) => VehicleStatus::Stopped,
            (false, false) => VehicleStatus::Approaching,
        }
    }

    /// The projection of the vehicle's position onto its heading.
    ///
    /// This is measured from the world origin, not from the governing light.
    pub fn proximity(&self) -> f64 {
        horizontal(self.position).dot(self.heading.vector())
    }

    /// Overwrites the vehicle's state with the one reported by a frame.
    ///
    /// The frame is authoritative for every field except `passed_light`,
    /// which is a latch: a frame can set it but never clear it. This makes
    /// `apply_state` a merge rather than a pure overwrite, so that a vehicle
    /// which has passed its light stays passed.
    pub fn apply_state(&mut self, state: &VehicleState) {
        self.position = state.position;
        self.heading = state.heading;
        self.stopped = state.stopped;
        self.passed_light |= state.passed_light;
        self.turn_right = state.turn_right;
    }

    /// Evaluates the vehicle against its governing light, returning the changes this caused.
    ///
    /// A red light stops a vehicle that has not yet moved past the light, a green light
    /// releases a stopped vehicle, and moving past the light latches `passed_light`
    /// regardless of the phase. A vehicle that has passed is never evaluated again.
    pub fn evaluate_light(&mut self, light: &TrafficLight) -> SmallVec<[LightInteraction; 2]> {
        let mut changes = SmallVec::new();
        if self.passed_light {
            return changes;
        }

        let proximity = self.proximity();
        match light.phase() {
            LightPhase::Red if proximity <= PROXIMITY_THRESHOLD => {
                if !self.stopped {
                    info!("Car {} is stopping at red light.", self.id);
                    changes.push(LightInteraction::Stopped);
                }
                self.stopped = true;
            }
            LightPhase::Green if self.stopped => {
                info!("Car {} is moving at green light.", self.id);
                changes.push(LightInteraction::Released);
                self.stopped = false;
            }
            _ => {}
        }

        if proximity > PROXIMITY_THRESHOLD {
            debug!("Car {} has passed traffic light {}.", self.id, light.id());
            changes.push(LightInteraction::Passed);
            self.passed_light = true;
        }

        changes
    }
}
