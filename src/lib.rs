pub use cgmath;
pub use error::{Error, Result};
pub use frame::{Frame, LightSnapshot, VehicleSnapshot};
pub use heading::{Heading, Orientation};
pub use light::{LightPhase, TrafficLight};
pub use registry::WorldRegistry;
pub use replay::{Player, ReplayEngine, ReplayEvent, Step, StepReport};
pub use resolver::resolve_light;
pub use scenario::{Scenario, ScenarioParams};
pub use source::{FrameSequence, StepSource};
pub use vehicle::{LightInteraction, Vehicle, VehicleState, VehicleStatus, PROXIMITY_THRESHOLD};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

mod error;
mod frame;
mod heading;
pub mod json;
mod light;
pub mod math;
mod registry;
mod replay;
mod resolver;
mod scenario;
mod source;
mod vehicle;

new_key_type! {
    /// Storage key of a [Vehicle] within a [WorldRegistry].
    pub struct VehicleKey;
    /// Storage key of a [TrafficLight] within a [WorldRegistry].
    pub struct LightKey;
}

/// External ID of a [Vehicle], assigned by the frame source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u32);

/// External ID of a [TrafficLight], assigned when the light is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
