use crate::registry::WorldRegistry;
use crate::source::StepSource;
use crate::vehicle::LightInteraction;
use crate::{Error, Frame, LightId, LightPhase, Result, VehicleId};
use log::{debug, info, trace, warn};

/// Replays externally supplied frames into a [WorldRegistry].
#[derive(Clone, Default)]
pub struct ReplayEngine {
    /// The vehicles and lights being replayed.
    world: WorldRegistry,
    /// The index of the next frame to apply.
    step: usize,
}

/// The changes caused by applying one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// The index of the applied frame.
    pub step: usize,
    /// The changes, in the order they happened.
    pub events: Vec<ReplayEvent>,
}

/// A single observable change to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayEvent {
    /// A vehicle appeared for the first time.
    Spawned(VehicleId),
    /// A traffic light changed phase.
    PhaseChanged { light: LightId, phase: LightPhase },
    /// A vehicle stopped at a red light.
    Stopped(VehicleId),
    /// A stopped vehicle was released by a green light.
    Released(VehicleId),
    /// A vehicle crossed its governing light.
    Passed(VehicleId),
}

/// The outcome of [Player::step].
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// A frame was applied.
    Advanced(StepReport),
    /// The source has no more frames.
    Finished,
}

impl ReplayEngine {
    /// Creates a replay over a world whose traffic lights are already registered.
    pub fn new(world: WorldRegistry) -> Self {
        Self { world, step: 0 }
    }

    /// The world being replayed.
    pub fn world(&self) -> &WorldRegistry {
        &self.world
    }

    /// The index of the next frame to be applied.
    pub fn step_index(&self) -> usize {
        self.step
    }

    /// Moves the cursor past the current frame without applying it,
    /// so a caller can carry on after [advance](Self::advance) rejects a frame.
    /// Returns the index of the skipped frame.
    pub fn skip(&mut self) -> usize {
        let skipped = self.step;
        warn!("Skipping frame {}.", skipped);
        self.step += 1;
        skipped
    }

    /// Applies a frame to the world.
    ///
    /// All lights are updated before any vehicle is evaluated, so vehicles always see
    /// the current frame's phases. The frame is checked before anything is changed;
    /// if it is rejected the world is left exactly as it was.
    pub fn advance(&mut self, frame: &Frame) -> Result<StepReport> {
        if frame.index != self.step {
            return Err(Error::FrameOutOfOrder {
                expected: self.step,
                found: frame.index,
            });
        }
        frame.validate()?;

        let mut report = StepReport {
            step: self.step,
            events: vec![],
        };
        self.update_lights(frame, &mut report.events);
        self.update_vehicles(frame, &mut report.events);
        self.step += 1;
        Ok(report)
    }

    /// Sets the phase of every known light mentioned in the frame.
    fn update_lights(&mut self, frame: &Frame, events: &mut Vec<ReplayEvent>) {
        for snapshot in &frame.lights {
            let Some(light) = self.world.find_light_mut(snapshot.id) else {
                debug!(
                    "Ignoring unknown traffic light {} at step {}.",
                    snapshot.id, frame.index
                );
                continue;
            };
            if light.phase() != snapshot.phase {
                events.push(ReplayEvent::PhaseChanged {
                    light: snapshot.id,
                    phase: snapshot.phase,
                });
            }
            light.set_phase(snapshot.phase);
            debug!(
                "TrafficLight {} is {} at step {}.",
                snapshot.id, snapshot.phase, frame.index
            );
        }
    }

    /// Spawns or updates every vehicle in the frame, then evaluates it against its light.
    fn update_vehicles(&mut self, frame: &Frame, events: &mut Vec<ReplayEvent>) {
        for snapshot in &frame.vehicles {
            let state = &snapshot.state;
            let (key, created) =
                self.world.find_or_create_vehicle(snapshot.id, state.position, state.heading);
            if created {
                info!(
                    "Car {} spawned at position {:?} with direction {} at step {}.",
                    snapshot.id, state.position, state.heading, frame.index
                );
                events.push(ReplayEvent::Spawned(snapshot.id));
            }

            if let Some(vehicle) = self.world.vehicle_by_key_mut(key) {
                vehicle.apply_state(state);
            }

            let Some(changes) = self.world.evaluate_vehicle(key) else {
                trace!("Car {} has no governing light at step {}.", snapshot.id, frame.index);
                continue;
            };
            events.extend(changes.into_iter().map(|change| match change {
                LightInteraction::Stopped => ReplayEvent::Stopped(snapshot.id),
                LightInteraction::Released => ReplayEvent::Released(snapshot.id),
                LightInteraction::Passed => ReplayEvent::Passed(snapshot.id),
            }));
        }
    }
}

/// Drives a [ReplayEngine] from a [StepSource].
pub struct Player<S> {
    engine: ReplayEngine,
    source: S,
    finished: bool,
}

impl<S: StepSource> Player<S> {
    /// Creates a player which replays `source` into `world`.
    pub fn new(world: WorldRegistry, source: S) -> Self {
        Self {
            engine: ReplayEngine::new(world),
            source,
            finished: false,
        }
    }

    /// The engine being driven.
    pub fn engine(&self) -> &ReplayEngine {
        &self.engine
    }

    /// The world being replayed.
    pub fn world(&self) -> &WorldRegistry {
        self.engine.world()
    }

    /// Whether the source has been exhausted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pulls the next frame from the source and applies it.
    ///
    /// Once the source is exhausted this keeps returning [Step::Finished]
    /// without consulting the source again.
    pub fn step(&mut self) -> Result<Step> {
        if self.finished {
            return Ok(Step::Finished);
        }
        match self.source.next_frame() {
            Some(frame) => self.engine.advance(&frame).map(Step::Advanced),
            None => {
                self.finished = true;
                Ok(Step::Finished)
            }
        }
    }

    /// Gives up on the frame the last [step](Self::step) rejected,
    /// letting the replay continue with the next frame from the source.
    pub fn skip(&mut self) -> usize {
        self.engine.skip()
    }

    /// Applies every remaining frame, returning the number applied.
    pub fn run_to_end(&mut self) -> Result<usize> {
        let mut count = 0;
        while let Step::Advanced(_) = self.step()? {
            count += 1;
        }
        Ok(count)
    }
}
