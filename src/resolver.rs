use crate::light::TrafficLight;
use crate::math::horizontal;
use crate::Heading;
use cgmath::InnerSpace;

/// Selects the traffic light which governs a vehicle travelling with the given heading.
///
/// Returns the first light, in iteration order, whose ground plane position lies in the
/// direction of travel. This is a directional heuristic rather than a nearest-light search,
/// so when several lights qualify the earliest one wins.
pub fn resolve_light<'a>(
    heading: Heading,
    lights: impl IntoIterator<Item = &'a TrafficLight>,
) -> Option<&'a TrafficLight> {
    let dir = heading.vector();
    lights
        .into_iter()
        .find(|light| horizontal(light.position()).dot(dir) > 0.0)
}

#[cfg(test)]
mod test {
    use super::resolve_light;
    use crate::light::TrafficLight;
    use crate::math::{ground_point, Point3d};
    use crate::{Heading, LightId};

    fn lights(positions: &[(u32, f64, f64)]) -> Vec<TrafficLight> {
        positions
            .iter()
            .map(|&(id, x, z)| TrafficLight::new(LightId(id), ground_point(x, z)))
            .collect()
    }

    #[test]
    fn picks_light_ahead() {
        let lights = lights(&[(1, -5.0, 0.0), (2, 0.0, 5.0), (3, 5.0, 0.0)]);
        let id = |heading| resolve_light(heading, &lights).map(|light| light.id());
        assert_eq!(id(Heading::Right), Some(LightId(3)));
        assert_eq!(id(Heading::Left), Some(LightId(1)));
        assert_eq!(id(Heading::Forward), Some(LightId(2)));
        assert_eq!(id(Heading::Back), None);
    }

    #[test]
    fn first_match_wins() {
        let lights = lights(&[(4, 1.0, 1.0), (2, 10.0, 0.0)]);
        for _ in 0..3 {
            let light = resolve_light(Heading::Right, &lights).unwrap();
            assert_eq!(light.id(), LightId(4));
        }
    }

    #[test]
    fn ignores_height_and_perpendicular_lights() {
        let lights = vec![
            TrafficLight::new(LightId(1), Point3d::new(0.0, 20.0, 3.0)),
            TrafficLight::new(LightId(2), ground_point(0.0, 0.0)),
        ];
        assert!(resolve_light(Heading::Right, &lights).is_none());
        assert_eq!(
            resolve_light(Heading::Forward, &lights).map(|light| light.id()),
            Some(LightId(1))
        );
    }
}
