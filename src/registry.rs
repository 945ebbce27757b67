use crate::light::TrafficLight;
use crate::math::Point3d;
use crate::resolver::resolve_light;
use crate::vehicle::{LightInteraction, Vehicle};
use crate::{Error, Heading, LightId, LightKey, Result, VehicleId, VehicleKey};
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::collections::HashMap;

/// The live vehicles and traffic lights of a replay, keyed by their external IDs.
///
/// Nothing is ever removed, so the slot maps iterate in insertion order.
#[derive(Clone, Default)]
pub struct WorldRegistry {
    /// The vehicles, in order of first appearance.
    vehicles: SlotMap<VehicleKey, Vehicle>,
    /// The traffic lights, in order of registration.
    lights: SlotMap<LightKey, TrafficLight>,
    /// Maps external vehicle IDs to storage keys.
    vehicle_index: HashMap<VehicleId, VehicleKey>,
    /// Maps external light IDs to storage keys.
    light_index: HashMap<LightId, LightKey>,
}

impl WorldRegistry {
    /// Creates an empty world.
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a traffic light at a fixed position.
    pub fn register_light(&mut self, id: LightId, position: Point3d) -> Result<LightKey> {
        if self.light_index.contains_key(&id) {
            return Err(Error::LightAlreadyRegistered(id));
        }
        let key = self.lights.insert(TrafficLight::new(id, position));
        self.light_index.insert(id, key);
        Ok(key)
    }

    /// Returns the vehicle with the given ID, creating it at the given position and
    /// heading if it doesn't exist yet. An existing vehicle is returned unchanged.
    ///
    /// The `bool` is `true` iff the vehicle was created by this call.
    pub fn find_or_create_vehicle(
        &mut self,
        id: VehicleId,
        position: Point3d,
        heading: Heading,
    ) -> (VehicleKey, bool) {
        if let Some(key) = self.vehicle_index.get(&id) {
            return (*key, false);
        }
        let key = self.vehicles.insert(Vehicle::new(id, position, heading));
        self.vehicle_index.insert(id, key);
        (key, true)
    }

    /// Gets the vehicle with the given ID.
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicle_index.get(&id).map(|key| &self.vehicles[*key])
    }

    pub(crate) fn vehicle_by_key_mut(&mut self, key: VehicleKey) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(key)
    }

    /// Evaluates a vehicle against the light governing its current heading.
    /// Returns `None` if the vehicle doesn't exist or no light governs it.
    pub(crate) fn evaluate_vehicle(
        &mut self,
        key: VehicleKey,
    ) -> Option<SmallVec<[LightInteraction; 2]>> {
        let vehicle = self.vehicles.get_mut(key)?;
        let light = resolve_light(vehicle.heading(), self.lights.values())?;
        Some(vehicle.evaluate_light(light))
    }

    /// Gets the traffic light with the given ID.
    pub fn find_light(&self, id: LightId) -> Option<&TrafficLight> {
        self.light_index.get(&id).map(|key| &self.lights[*key])
    }

    /// Gets a mutable reference to the traffic light with the given ID.
    pub fn find_light_mut(&mut self, id: LightId) -> Option<&mut TrafficLight> {
        let key = *self.light_index.get(&id)?;
        self.lights.get_mut(key)
    }

    /// Returns an iterator over all the vehicles, in order of first appearance.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Returns an iterator over all the traffic lights, in order of registration.
    pub fn iter_lights(&self) -> impl Iterator<Item = &TrafficLight> {
        self.lights.values()
    }

    /// The number of vehicles seen so far.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// The number of registered traffic lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
