//! Reading and writing step files.
//!
//! A step file is a JSON array with one entry per step:
//!
//! ```json
//! [{
//!     "step": 0,
//!     "cars": [{
//!         "id": 1, "pos": [-14.0, 0.0], "direction": [1, 0],
//!         "stopped": false, "passed_light": false, "turn_right": false, "color": "ro"
//!     }],
//!     "traffic_lights": [{ "id": 1, "state": "green" }]
//! }]
//! ```
//!
//! Car positions are given on the ground plane as `[x, z]`. Any other fields are ignored.

use crate::math::ground_point;
use crate::vehicle::VehicleState;
use crate::{Frame, Heading, LightId, LightSnapshot, Result, VehicleId, VehicleSnapshot};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct StepData {
    step: usize,
    cars: Vec<CarData>,
    traffic_lights: Vec<LightData>,
}

#[derive(Serialize, Deserialize)]
struct CarData {
    id: VehicleId,
    pos: [f64; 2],
    direction: [i32; 2],
    stopped: bool,
    passed_light: bool,
    turn_right: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct LightData {
    id: LightId,
    state: String,
}

/// Decodes the frames of a step file.
pub fn from_str(s: &str) -> Result<Vec<Frame>> {
    let steps: Vec<StepData> = serde_json::from_str(s)?;
    steps.into_iter().map(StepData::into_frame).collect()
}

/// Decodes the frames of a step file from a reader.
pub fn from_reader(reader: impl Read) -> Result<Vec<Frame>> {
    let steps: Vec<StepData> = serde_json::from_reader(reader)?;
    steps.into_iter().map(StepData::into_frame).collect()
}

/// Decodes the frames of the step file at `path`.
pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Frame>> {
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}

/// Encodes frames as a step file.
pub fn to_string(frames: &[Frame]) -> Result<String> {
    let steps: Vec<_> = frames.iter().map(StepData::from_frame).collect();
    Ok(serde_json::to_string_pretty(&steps)?)
}

/// Encodes frames as a step file into a writer.
pub fn to_writer(writer: impl Write, frames: &[Frame]) -> Result<()> {
    let steps: Vec<_> = frames.iter().map(StepData::from_frame).collect();
    serde_json::to_writer_pretty(writer, &steps)?;
    Ok(())
}

impl StepData {
    fn into_frame(self) -> Result<Frame> {
        let vehicles = self
            .cars
            .into_iter()
            .map(|car| -> Result<VehicleSnapshot> {
                let [x, z] = car.pos;
                let [dx, dz] = car.direction;
                Ok(VehicleSnapshot {
                    id: car.id,
                    state: VehicleState {
                        position: ground_point(x, z),
                        heading: Heading::from_components(dx, dz)?,
                        stopped: car.stopped,
                        passed_light: car.passed_light,
                        turn_right: car.turn_right,
                    },
                    color: car.color,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let lights = self
            .traffic_lights
            .into_iter()
            .map(|light| -> Result<LightSnapshot> {
                Ok(LightSnapshot {
                    id: light.id,
                    phase: light.state.parse()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Frame {
            index: self.step,
            vehicles,
            lights,
        })
    }

    fn from_frame(frame: &Frame) -> Self {
        Self {
            step: frame.index,
            cars: frame
                .vehicles
                .iter()
                .map(|vehicle| {
                    let state = &vehicle.state;
                    let (dx, dz) = state.heading.components();
                    CarData {
                        id: vehicle.id,
                        pos: [state.position.x, state.position.z],
                        direction: [dx, dz],
                        stopped: state.stopped,
                        passed_light: state.passed_light,
                        turn_right: state.turn_right,
                        color: vehicle.color.clone(),
                    }
                })
                .collect(),
            traffic_lights: frame
                .lights
                .iter()
                .map(|light| LightData {
                    id: light.id,
                    state: light.phase.to_string(),
                })
                .collect(),
        }
    }
}
