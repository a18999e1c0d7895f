use crate::api::sim::SimulationState;
use crate::core::calendar::simulated_datetime;
use crate::renderer::camera::CameraMode;
use crate::renderer::instance::{BodyInstance, RenderBuffer};
use crate::renderer::traits::{FrameData, FrameSink};

/// Advance the simulation to `now` (seconds): clock, bodies, camera.
/// Returns this frame's time factor.
pub fn step(state: &mut SimulationState, now: f64) -> f64 {
    let time_factor = state.clock.tick(now);
    for body in state.scene.iter_mut() {
        body.advance(time_factor);
    }
    state.camera.update(&state.scene);
    state.bump_frame();
    time_factor
}

/// Fill `buffer` with one instance per body, in scene order.
pub fn build_instances(state: &SimulationState, buffer: &mut RenderBuffer) {
    buffer.clear();
    let selected = state.selected();
    for body in state.scene.iter() {
        buffer.push(BodyInstance::from_body(body, selected == Some(body.id)));
    }
}

/// One full frame: step, build instances, and hand everything to `sink`.
/// `wall_clock_unix` is the current wall-clock time in Unix seconds, used
/// only for the date readout.
pub fn run_frame<S: FrameSink>(
    state: &mut SimulationState,
    now: f64,
    wall_clock_unix: f64,
    buffer: &mut RenderBuffer,
    sink: &mut S,
) -> f64 {
    let time_factor = step(state, now);
    build_instances(state, buffer);

    let sim_datetime = simulated_datetime(wall_clock_unix, time_factor);
    let frame = FrameData {
        frame: state.frame_count(),
        time_factor,
        instances: &buffer.instances,
        camera: state.camera.camera.view(),
        following: matches!(state.camera_mode(), CameraMode::Following(_)),
        selected: state.selected(),
        show_orbits: state.show_orbits(),
        show_labels: state.show_labels(),
        sim_datetime: &sim_datetime,
    };
    sink.submit(&frame);
    time_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    use crate::api::sim::SimConfig;
    use crate::api::types::BodyId;
    use crate::assets::catalog::BodyCatalog;
    use crate::components::descriptor::CelestialBodyDescriptor;
    use glam::DVec3;

    const EARTH_PERIOD: f64 = 365.25;

    fn state() -> SimulationState {
        let catalog = BodyCatalog::new(vec![
            CelestialBodyDescriptor::new("Sun", 0.0, 695_508.0, 0.0, Some(609.12)),
            CelestialBodyDescriptor::new("Mars", 227_943_824.0, 3389.5, 686.98, Some(24.6229)),
            CelestialBodyDescriptor::new("Earth", 149_598_023.0, 6371.0, EARTH_PERIOD, Some(23.9345)),
        ])
        .unwrap();
        SimulationState::new(SimConfig::default(), &catalog).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(u64, f64, Vec<BodyInstance>, bool, Option<BodyId>, String)>,
    }

    impl FrameSink for Recorder {
        fn submit(&mut self, frame: &FrameData<'_>) {
            self.frames.push((
                frame.frame,
                frame.time_factor,
                frame.instances.to_vec(),
                frame.following,
                frame.selected,
                frame.sim_datetime.to_string(),
            ));
        }
    }

    fn earth(state: &SimulationState) -> &crate::components::body::Body {
        state.scene.find_by_name("earth").unwrap()
    }

    #[test]
    fn earth_scenario() {
        let mut s = state();
        step(&mut s, 0.0);
        let tf = step(&mut s, 1.0);
        assert_eq!(tf, 1.0);

        let angle = earth(&s).state.orbit_angle;
        let expected = TAU / (EARTH_PERIOD * 60.0);
        assert!((angle - expected).abs() < 1e-12, "{angle} vs {expected}");
        assert!((angle - 2.867e-4).abs() < 1e-6);
    }

    #[test]
    fn full_period_returns_to_start() {
        let mut s = state();
        let start = earth(&s).state.position;
        step(&mut s, 0.0);
        step(&mut s, EARTH_PERIOD * 60.0);
        let b = earth(&s);
        assert!((b.state.orbit_angle - TAU).abs() < 1e-9);
        let d = b.state.display_distance;
        assert!((b.state.position - start).length() / d < 1e-9);
    }

    #[test]
    fn speed_zero_freezes_angles() {
        let mut s = state();
        step(&mut s, 0.0);
        step(&mut s, 1.0);
        s.set_speed(0.0);
        let before: Vec<_> = s.scene.iter().map(|b| (b.state.orbit_angle, b.state.rotation_angle)).collect();
        for i in 2..20 {
            assert_eq!(step(&mut s, i as f64), 0.0);
        }
        let after: Vec<_> = s.scene.iter().map(|b| (b.state.orbit_angle, b.state.rotation_angle)).collect();
        assert_eq!(before, after);
        assert_eq!(s.frame_count(), 20);
    }

    #[test]
    fn clock_regression_does_not_move_bodies() {
        let mut s = state();
        step(&mut s, 10.0);
        step(&mut s, 11.0);
        let before = earth(&s).state.orbit_angle;
        assert_eq!(step(&mut s, 5.0), 0.0);
        assert_eq!(earth(&s).state.orbit_angle, before);
    }

    #[test]
    fn central_body_stays_at_origin() {
        let mut s = state();
        s.set_speed(1000.0);
        for i in 0..50 {
            step(&mut s, i as f64 * 0.016);
        }
        let sun = s.scene.find_by_name("Sun").unwrap();
        assert_eq!(sun.state.position, DVec3::ZERO);
        assert_eq!(sun.state.display_distance, 0.0);
        assert_eq!(sun.state.orbit_angle, 0.0);
    }

    #[test]
    fn selection_then_frame_closes_on_target() {
        let mut s = state();
        step(&mut s, 0.0);
        let id = s.select_by_name("Earth").unwrap();

        let distance = |s: &SimulationState| {
            let pos = s.scene.get(id).unwrap().state.position;
            s.camera.camera.position.distance(s.camera.ideal_position(pos))
        };
        // Speed 0 keeps the body still so only the camera moves
        s.set_speed(0.0);
        let before = distance(&s);
        step(&mut s, 0.016);
        let after = distance(&s);
        assert!(after < before, "{after} >= {before}");
        assert_eq!(s.camera.camera.target, s.scene.get(id).unwrap().state.position);
    }

    #[test]
    fn compression_change_applies_before_next_frame() {
        let mut s = state();
        let mut buffer = RenderBuffer::default();
        let mut sink = Recorder::default();
        run_frame(&mut s, 0.0, 0.0, &mut buffer, &mut sink);
        let radius_k1 = sink.frames[0].2[2].radius;

        s.set_compression(5.0).unwrap();
        run_frame(&mut s, 0.016, 0.0, &mut buffer, &mut sink);
        let radius_k5 = sink.frames[1].2[2].radius;
        let expected = s.scene.get(BodyId(2)).unwrap().state.display_radius as f32;
        assert_eq!(radius_k5, expected);
        assert_ne!(radius_k1, radius_k5);
    }

    #[test]
    fn run_frame_submits_instances_and_date() {
        let mut s = state();
        let mut buffer = RenderBuffer::default();
        let mut sink = Recorder::default();
        s.select_by_name("mars").unwrap();
        s.set_speed(3600.0);

        run_frame(&mut s, 100.0, 0.0, &mut buffer, &mut sink);
        run_frame(&mut s, 101.0, 0.0, &mut buffer, &mut sink);

        let (frame, tf, instances, following, selected, date) = &sink.frames[1];
        assert_eq!(*frame, 2);
        assert_eq!(*tf, 3600.0);
        assert_eq!(instances.len(), 3);
        // Canonical order: sun, earth, mars
        assert_eq!(instances[0].flags as u32, BodyInstance::FLAG_CENTRAL);
        assert_eq!(instances[2].flags as u32, BodyInstance::FLAG_SELECTED);
        assert!(*following);
        assert_eq!(*selected, Some(BodyId(2)));
        assert_eq!(date, "1970-01-01 01:00:00 UTC");
        assert_eq!(buffer.instance_count(), 3);
    }
}
