//! Property tests over randomly generated populations.

use glam::Vec3;
use proptest::prelude::*;

use crate::collision::INVALID_DISTANCE;
use crate::object::{ObjectId, ObjectType};

use super::helpers::{empty_manager, RecordingRenderSink};

fn kind() -> impl Strategy<Value = ObjectType> {
    prop_oneof![
        Just(ObjectType::Plane),
        Just(ObjectType::Bullet),
        Just(ObjectType::Crow),
        Just(ObjectType::ExplodingCrow),
        Just(ObjectType::DeadCrow),
        Just(ObjectType::Unknown),
    ]
}

fn position() -> impl Strategy<Value = Vec3> {
    (-3000.0f32..3000.0, 0.0f32..800.0, -50.0f32..50.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

#[derive(Debug, Clone)]
enum Op {
    Create(ObjectType, Vec3, Vec3),
    Fire,
    Tick(u64),
    Render,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (kind(), position(), (-5.0f32..5.0, -2.0f32..2.0))
            .prop_map(|(k, p, (vx, vy))| Op::Create(k, p, Vec3::new(vx, vy, 0.0))),
        1 => Just(Op::Fire),
        4 => (0u64..400).prop_map(Op::Tick),
        1 => Just(Op::Render),
    ]
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in position(), b in position()) {
        let (_, mut m) = empty_manager();
        let ia = m.create(ObjectType::Crow, "a", a, Vec3::ZERO);
        let ib = m.create(ObjectType::Crow, "b", b, Vec3::ZERO);
        prop_assert_eq!(m.distance(ia, ib), m.distance(ib, ia));
        prop_assert!(m.distance(ia, ib) >= 0.0);
    }

    #[test]
    fn distance_to_missing_object_is_sentinel(a in position(), missing in 10u64..1000) {
        let (_, mut m) = empty_manager();
        let ia = m.create(ObjectType::Crow, "a", a, Vec3::ZERO);
        let gone = ObjectId::new(missing);
        prop_assert_eq!(m.distance(ia, gone), INVALID_DISTANCE);
        prop_assert_eq!(m.distance(gone, ia), INVALID_DISTANCE);
        prop_assert_eq!(m.distance(gone, gone), INVALID_DISTANCE);
    }

    #[test]
    fn render_order_is_back_to_front_and_stable(depths in prop::collection::vec(-5i8..5, 1..40)) {
        let (_, mut m) = empty_manager();
        for (index, z) in depths.iter().enumerate() {
            m.create(ObjectType::Crow, &format!("c{index}"), Vec3::new(0.0, 0.0, f32::from(*z)), Vec3::ZERO);
        }
        let before: Vec<String> = m.iter().map(|o| o.name().to_string()).collect();

        let mut sink = RecordingRenderSink::default();
        m.render(&mut sink);

        let drawn = sink.depths();
        prop_assert_eq!(drawn.len(), depths.len());
        prop_assert!(drawn.windows(2).all(|w| w[0] >= w[1]));

        let names = sink.names();
        for pair in sink.draws.windows(2) {
            if pair[0].position.z == pair[1].position.z {
                let first = before.iter().position(|n| *n == pair[0].name);
                let second = before.iter().position(|n| *n == pair[1].name);
                prop_assert!(first < second, "equal depth reordered: {:?}", names);
            }
        }
    }

    #[test]
    fn population_accounting_is_exact(ops in prop::collection::vec(op(), 1..80)) {
        let (clock, mut m) = empty_manager();
        // Creations count towards the next report, so the baseline is the
        // population before any of them.
        let mut live = 0;
        m.create(ObjectType::Plane, "plane", Vec3::new(626.0, 300.0, 0.0), Vec3::ZERO);
        let mut sink = RecordingRenderSink::default();

        for op in ops {
            match op {
                Op::Create(kind, position, velocity) => {
                    m.create(kind, kind.default_name(), position, velocity);
                }
                Op::Fire => {
                    m.fire_gun("plane");
                }
                Op::Tick(ms) => {
                    clock.advance(ms);
                    let report = m.tick();
                    prop_assert_eq!(live + report.created - report.reclaimed, report.live);
                    prop_assert!(m.iter().all(|o| !o.is_dead()));
                    live = report.live;
                }
                Op::Render => {
                    sink.clear();
                    m.render(&mut sink);
                }
            }
        }

        let stats = m.stats();
        prop_assert_eq!(stats.live(), m.len() as u64);
    }

    #[test]
    fn each_target_yields_at_most_one_successor(
        bullets in prop::collection::vec((-12.0f32..12.0, -12.0f32..12.0), 1..8),
        crows in 1usize..4,
    ) {
        let (_, mut m) = empty_manager();
        for index in 0..crows {
            m.create(ObjectType::Crow, &format!("crow{index}"), Vec3::new(100.0, 300.0, 0.0), Vec3::ZERO);
        }
        for (dx, dy) in &bullets {
            m.create(ObjectType::Bullet, "bullet", Vec3::new(100.0 + dx, 300.0 + dy, 0.0), Vec3::ZERO);
        }

        let report = m.tick();
        let explosions = m.iter().filter(|o| o.kind() == ObjectType::ExplodingCrow).count();
        let crows_left = m.iter().filter(|o| o.kind() == ObjectType::Crow).count();

        prop_assert_eq!(explosions, report.collisions);
        prop_assert!(report.collisions <= crows.min(bullets.len()));
        prop_assert_eq!(crows_left + explosions, crows);
    }

    #[test]
    fn immortal_objects_are_never_culled(ticks in 1usize..300, step in 1u64..500) {
        let (clock, mut m) = empty_manager();
        let plane = m.create(ObjectType::Plane, "plane", Vec3::new(626.0, 300.0, 0.0), Vec3::ZERO);
        let crow = m.create(ObjectType::Crow, "crow", Vec3::new(0.0, 600.0, 1.0), Vec3::new(4.0, 0.0, 0.0));
        for _ in 0..ticks {
            clock.advance(step);
            m.tick();
        }
        prop_assert!(m.get(plane).is_some());
        prop_assert!(m.get(crow).is_some());
    }
}
