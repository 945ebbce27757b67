//! A synthetic four-way intersection, used to produce frames without a step file.
//!
//! The intersection is centred on the origin with one traffic light per approach.
//! The lights take turns being green, and cars spawn at the edges of the area
//! and drive straight through, stopping for red lights just before the origin.

use crate::light::LightPhase;
use crate::math::{ground_point, Point3d};
use crate::source::StepSource;
use crate::vehicle::VehicleState;
use crate::{Frame, Heading, LightId, LightSnapshot, VehicleId, VehicleSnapshot, WorldRegistry};
use cgmath::{EuclideanSpace, InnerSpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The approaches to the intersection, in spawn order:
/// the direction of travel, the spawn point and the display colour.
const APPROACHES: [(Heading, (f64, f64), &str); 4] = [
    (Heading::Left, (14.0, 1.0), "bo"),
    (Heading::Forward, (0.0, -14.0), "go"),
    (Heading::Right, (-14.0, 0.0), "ro"),
    (Heading::Back, (-1.0, 14.0), "mo"),
];

/// The traffic lights, in cycle order, with the direction of travel each governs.
const LIGHTS: [(u32, Heading); 4] = [
    (1, Heading::Right),
    (2, Heading::Forward),
    (3, Heading::Left),
    (4, Heading::Back),
];

/// Cars stop for a red light when their proximity is within this range.
const STOP_ZONE: (f64, f64) = (-2.0, 0.0);

/// The parameters of a generated scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioParams {
    /// The number of frames to generate.
    pub steps: usize,
    /// The number of steps a light stays green.
    pub green_duration: u32,
    /// The number of steps a light stays yellow.
    pub yellow_duration: u32,
    /// The number of steps a light stays red before the cycle moves on.
    pub red_duration: u32,
    /// The number of steps between spawn attempts.
    pub spawn_interval: u32,
    /// The probability that a car spawns on an approach at each attempt.
    pub spawn_probability: f64,
    /// The probability that a northbound car will turn right.
    pub turn_probability: f64,
    /// The distance a moving car travels per step.
    pub speed: f64,
    /// Seed for the random number generator.
    pub seed: u64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            steps: 1000,
            green_duration: 50,
            yellow_duration: 10,
            red_duration: 100,
            spawn_interval: 10,
            spawn_probability: 0.2,
            turn_probability: 0.5,
            speed: 0.2,
            seed: 0,
        }
    }
}

/// Generates the frames of a four-way intersection scenario.
pub struct Scenario {
    params: ScenarioParams,
    rng: StdRng,
    lights: Vec<Light>,
    cars: Vec<Car>,
    /// Index of the light whose cycle is currently running.
    current_light: usize,
    spawn_timer: u32,
    next_id: u32,
    step: usize,
}

struct Light {
    id: LightId,
    heading: Heading,
    phase: LightPhase,
    /// The number of steps spent in the current phase.
    timer: u32,
}

struct Car {
    id: VehicleId,
    position: Point3d,
    heading: Heading,
    initial_heading: Heading,
    stopped: bool,
    passed_light: bool,
    turn_right: bool,
    color: &'static str,
}

impl Scenario {
    /// Creates a new scenario.
    pub fn new(params: ScenarioParams) -> Self {
        let lights = LIGHTS
            .iter()
            .enumerate()
            .map(|(idx, &(id, heading))| Light {
                id: LightId(id),
                heading,
                phase: if idx == 0 {
                    LightPhase::Green
                } else {
                    LightPhase::Red
                },
                timer: 0,
            })
            .collect();
        Self {
            rng: StdRng::seed_from_u64(params.seed),
            params,
            lights,
            cars: vec![],
            current_light: 0,
            spawn_timer: 0,
            next_id: 1,
            step: 0,
        }
    }

    /// Creates a world with the scenario's traffic lights registered.
    ///
    /// Each light sits one unit from the origin in the direction of travel it governs.
    pub fn world() -> WorldRegistry {
        let mut world = WorldRegistry::new();
        for (id, heading) in LIGHTS {
            world
                .register_light(LightId(id), Point3d::from_vec(heading.vector()))
                .expect("scenario light IDs are unique");
        }
        world
    }

    /// Generates all the remaining frames.
    pub fn record(mut self) -> Vec<Frame> {
        std::iter::from_fn(|| self.next_frame()).collect()
    }

    /// Attempts to spawn a car on every approach.
    fn spawn_cars(&mut self) {
        for (heading, (x, z), color) in APPROACHES {
            let id = VehicleId(self.next_id);
            self.next_id += 1;
            if self.rng.gen::<f64>() > self.params.spawn_probability {
                continue;
            }
            let turn_right = heading == Heading::Forward
                && self.rng.gen::<f64>() < self.params.turn_probability;
            self.cars.push(Car {
                id,
                position: ground_point(x, z),
                heading,
                initial_heading: heading,
                stopped: false,
                passed_light: false,
                turn_right,
                color,
            });
        }
    }

    /// Advances the light cycle, handing over to the next light once the current one is red.
    fn update_lights(&mut self) {
        let params = &self.params;
        let light = &mut self.lights[self.current_light];
        light.timer += 1;
        let next = match light.phase {
            LightPhase::Green if light.timer >= params.green_duration => Some(LightPhase::Yellow),
            LightPhase::Yellow if light.timer >= params.yellow_duration => Some(LightPhase::Red),
            LightPhase::Red if light.timer >= params.red_duration => Some(LightPhase::Green),
            _ => None,
        };
        if let Some(phase) = next {
            light.phase = phase;
            light.timer = 0;
        }

        if light.phase == LightPhase::Red {
            self.current_light = (self.current_light + 1) % self.lights.len();
            self.lights[self.current_light].phase = LightPhase::Green;
        }
    }

    fn snapshot(&self) -> Frame {
        Frame {
            index: self.step,
            vehicles: self.cars.iter().map(Car::snapshot).collect(),
            lights: self
                .lights
                .iter()
                .map(|light| LightSnapshot {
                    id: light.id,
                    phase: light.phase,
                })
                .collect(),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl StepSource for Scenario {
    fn next_frame(&mut self) -> Option<Frame> {
        if self.step >= self.params.steps {
            return None;
        }

        self.spawn_timer += 1;
        if self.spawn_timer >= self.params.spawn_interval {
            self.spawn_timer = 0;
            self.spawn_cars();
        }

        for car in &mut self.cars {
            let light = self.lights.iter().find(|light| light.heading == car.heading);
            car.update(light.map(|light| light.phase), self.params.speed);
        }
        self.update_lights();

        let frame = self.snapshot();
        self.step += 1;
        Some(frame)
    }
}

impl Car {
    fn proximity(&self) -> f64 {
        self.position.to_vec().dot(self.heading.vector())
    }

    fn update(&mut self, phase: Option<LightPhase>, speed: f64) {
        if !self.passed_light {
            let proximity = self.proximity();
            let in_stop_zone = (STOP_ZONE.0..=STOP_ZONE.1).contains(&proximity);
            match phase {
                Some(LightPhase::Red) if in_stop_zone => self.stopped = true,
                Some(LightPhase::Green) if self.stopped => self.stopped = false,
                _ => {}
            }
            if proximity > STOP_ZONE.1 {
                self.passed_light = true;
            }
        }

        if !self.stopped {
            self.position += speed * self.heading.vector();
        }

        if self.passed_light
            && self.turn_right
            && self.initial_heading == Heading::Forward
            && self.position.x >= 0.0
        {
            self.heading = self.initial_heading.turned_right();
        }
    }

    fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            state: VehicleState {
                position: self.position,
                heading: self.heading,
                stopped: self.stopped,
                passed_light: self.passed_light,
                turn_right: self.turn_right,
            },
            color: Some(self.color.to_owned()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn params(steps: usize) -> ScenarioParams {
        ScenarioParams {
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn frames_are_contiguous() {
        let frames = Scenario::new(params(120)).record();
        assert_eq!(frames.len(), 120);
        for (idx, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, idx);
            assert!(frame.validate().is_ok());
            assert_eq!(frame.lights.len(), 4);
        }
    }

    #[test]
    fn same_seed_same_frames() {
        let a = Scenario::new(params(300)).record();
        let b = Scenario::new(params(300)).record();
        assert_eq!(a, b);
    }

    #[test]
    fn exhausted_after_last_step() {
        let mut scenario = Scenario::new(params(2));
        assert!(scenario.next_frame().is_some());
        assert!(scenario.next_frame().is_some());
        assert!(scenario.next_frame().is_none());
        assert!(scenario.next_frame().is_none());
    }

    #[test]
    fn one_light_cycles_at_a_time() {
        for frame in Scenario::new(params(600)).record() {
            let active = frame
                .lights
                .iter()
                .filter(|light| light.phase != LightPhase::Red)
                .count();
            assert!(active <= 1, "step {} has {} active lights", frame.index, active);
        }
    }

    #[test]
    fn light_cycle_timing() {
        let frames = Scenario::new(params(70)).record();
        let phase = |step: usize| frames[step].lights[0].phase;
        // Timers tick before each frame is recorded
        assert_eq!(phase(48), LightPhase::Green);
        assert_eq!(phase(49), LightPhase::Yellow);
        assert_eq!(phase(58), LightPhase::Yellow);
        assert_eq!(phase(59), LightPhase::Red);
        assert_eq!(frames[59].lights[1].phase, LightPhase::Green);
    }

    #[test]
    fn spawns_every_interval() {
        let frames = Scenario::new(ScenarioParams {
            steps: 25,
            spawn_probability: 1.0,
            ..Default::default()
        })
        .record();
        assert!(frames[8].vehicles.is_empty());
        let ids = frames[9].vehicles.iter().map(|v| v.id.0).collect_vec();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(frames[19].vehicles.len(), 8);
        assert!(frames.iter().all(|frame| frame.validate().is_ok()));
    }

    #[test]
    fn no_spawns_without_probability() {
        let frames = Scenario::new(ScenarioParams {
            steps: 50,
            spawn_probability: 0.0,
            ..Default::default()
        })
        .record();
        assert!(frames.iter().all(|frame| frame.vehicles.is_empty()));
    }

    #[test]
    fn car_stops_at_red_and_never_unpasses() {
        let frames = Scenario::new(ScenarioParams {
            steps: 400,
            spawn_probability: 1.0,
            ..Default::default()
        })
        .record();
        // Westbound cars meet a red light on arrival
        let westbound = |frame: &Frame| {
            frame
                .vehicles
                .iter()
                .find(|v| v.id == VehicleId(1))
                .map(|v| v.state)
        };
        assert!(frames.iter().filter_map(westbound).any(|state| state.stopped));

        let mut passed = false;
        for state in frames.iter().filter_map(westbound) {
            assert!(!passed || state.passed_light);
            passed = state.passed_light;
        }
    }

    #[test]
    fn only_northbound_cars_turn_right() {
        let frames = Scenario::new(ScenarioParams {
            steps: 200,
            spawn_probability: 1.0,
            turn_probability: 1.0,
            ..Default::default()
        })
        .record();

        // Every spawn attempt succeeds, so IDs cycle through the approaches in spawn order
        let northbound = |id: VehicleId| APPROACHES[(id.0 as usize - 1) % 4].0 == Heading::Forward;
        for snapshot in frames.iter().flat_map(|frame| &frame.vehicles) {
            let state = snapshot.state;
            assert_eq!(state.turn_right, northbound(snapshot.id));
            if northbound(snapshot.id) {
                match state.heading {
                    Heading::Forward => {}
                    Heading::Right => assert!(state.passed_light),
                    other => panic!("car {} heading {:?}", snapshot.id, other),
                }
            }
        }

        let headings = frames
            .iter()
            .filter_map(|frame| frame.vehicles.iter().find(|v| v.id == VehicleId(2)))
            .map(|v| v.state.heading)
            .dedup()
            .collect_vec();
        assert_eq!(headings, vec![Heading::Forward, Heading::Right]);
    }

    #[test]
    fn world_has_a_light_per_approach() {
        let world = Scenario::world();
        assert_eq!(world.light_count(), 4);
        for (id, heading) in LIGHTS {
            let light = world.find_light(LightId(id)).unwrap();
            assert_eq!(light.position(), Point3d::from_vec(heading.vector()));
        }
    }
}
