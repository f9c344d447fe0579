use crate::{ChainStep, MotionFlags, NODE_COUNT, OwnerFrame, Tail, TailConstants, fan_angle};
use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

fn assert_approx(actual: f32, expected: f32, eps: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= eps,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn step(count: usize, spread: f32, flags: MotionFlags) -> ChainStep {
    ChainStep {
        count,
        scale: 1.0,
        spread,
        dt: 1.0 / 60.0,
        flags,
        constants: TailConstants::default(),
    }
}

fn assert_clamped(tail: &Tail, scale: f32) {
    for i in 1..NODE_COUNT {
        let distance = tail.nodes[i].position.distance(tail.nodes[i - 1].position);
        let reach = tail.nodes[i].radius() * scale;
        assert!(
            distance <= reach + 1.0e-3,
            "tail {} node {i}: distance {distance} exceeds reach {reach}",
            tail.index()
        );
    }
}

#[test]
fn clamp_pulls_node_back_along_its_direction() {
    let mut tail = Tail::new(0);
    tail.nodes[2].position = Vec2::ZERO;
    tail.nodes[3].position = Vec2::new(6.0, 8.0);

    tail.clamp_node(3, 1.0);

    let p = tail.nodes[3].position;
    assert_approx(p.length(), 3.0, 1.0e-5);
    assert_approx(p.x, 1.8, 1.0e-5);
    assert_approx(p.y, 2.4, 1.0e-5);
}

#[test]
fn clamp_leaves_nodes_within_reach_alone() {
    let mut tail = Tail::new(0);
    tail.nodes[0].position = Vec2::ZERO;
    tail.nodes[1].position = Vec2::new(1.0, 1.0);
    tail.clamp_node(1, 1.0);
    assert_eq!(tail.nodes[1].position, Vec2::new(1.0, 1.0));

    // Node 0 has no predecessor.
    tail.nodes[0].position = Vec2::new(50.0, 50.0);
    tail.clamp_node(0, 1.0);
    assert_eq!(tail.nodes[0].position, Vec2::new(50.0, 50.0));
}

#[test]
fn fan_angles_alternate_sides() {
    assert_approx(fan_angle(0, 1), 0.0, 1.0e-6);

    assert_approx(fan_angle(0, 2), -FRAC_PI_4, 1.0e-6);
    assert_approx(fan_angle(1, 2), FRAC_PI_4, 1.0e-6);

    assert_approx(fan_angle(0, 3), 0.0, 1.0e-6);
    assert_approx(fan_angle(1, 3), FRAC_PI_4, 1.0e-6);
    assert_approx(fan_angle(2, 3), -FRAC_PI_4, 1.0e-6);

    for count in 1..=9 {
        for index in 0..count {
            assert!(fan_angle(index, count).abs() < std::f32::consts::FRAC_PI_2);
        }
    }
}

#[test]
fn anchor_node_lands_on_anchor_plus_offset() {
    let offset = Vec2::new(-2.0, 6.0);
    for count in 1..=9 {
        for spread in [0.0, 0.25, 0.4, 0.75, 1.0] {
            for index in 0..count {
                let mut tail = Tail::new(index);
                tail.initialize_positions(Vec2::new(10.0, -30.0));

                let mut anchor = Vec2::new(100.0, 50.0);
                for frame_counter in 0..5u64 {
                    anchor += Vec2::new(7.5, -3.25);
                    let frame = OwnerFrame {
                        anchor,
                        frame_counter,
                        ..OwnerFrame::default()
                    };
                    tail.update(&frame, &step(count, spread, MotionFlags::default()), offset);

                    let base = tail.base_position();
                    assert_approx(base.x, anchor.x + offset.x, 1.0e-3);
                    assert_approx(base.y, anchor.y + offset.y, 1.0e-3);
                    assert_approx(tail.nodes[0].offset.x, offset.x, 1.0e-3);
                    assert_approx(tail.nodes[0].offset.y, offset.y, 1.0e-3);
                }
            }
        }
    }
}

#[test]
fn every_node_stays_within_reach_while_moving() {
    let poses = [
        "idle", "duck", "launch", "sleep", "sitDown", "dangling", "starFly", "fallPose", "runFast",
    ];
    for count in [1, 4, 6, 9] {
        for scale in [0.25, 1.0, 3.5] {
            let mut tails: Vec<Tail> = (0..count).map(Tail::new).collect();
            let mut anchor = Vec2::new(0.0, 0.0);
            for frame_counter in 0..240u64 {
                let pose = poses[(frame_counter / 20) as usize % poses.len()];
                anchor += Vec2::new((frame_counter as f32 / 9.0).sin() * 6.0, 2.5);
                let frame = OwnerFrame {
                    pose,
                    frame_counter,
                    facing: if frame_counter % 50 < 25 { 1.0 } else { -1.0 },
                    anchor,
                    ..OwnerFrame::default()
                };
                let mut s = step(count, 0.6, MotionFlags::evaluate(&frame));
                s.scale = scale;
                for tail in &mut tails {
                    tail.update(&frame, &s, Vec2::new(-2.0, 6.0));
                    assert_clamped(tail, scale);
                }
            }
        }
    }
}

#[test]
fn stationary_owner_settles() {
    let anchor = Vec2::new(100.0, 50.0);
    let offset = Vec2::new(-2.0, 6.0);
    let frame = OwnerFrame {
        anchor,
        ..OwnerFrame::default()
    };
    let s = step(3, 0.4, MotionFlags::evaluate(&frame));

    for index in 0..3 {
        let mut tail = Tail::new(index);
        tail.initialize_positions(anchor);
        for _ in 0..600 {
            tail.update(&frame, &s, offset);
        }

        let before: Vec<Vec2> = tail.nodes.iter().map(|n| n.position).collect();
        tail.update(&frame, &s, offset);
        for (node, previous) in tail.nodes.iter().zip(before) {
            assert!(
                node.position.distance(previous) < 1.0e-2,
                "tail {index} node {} still moving: {previous} -> {}",
                node.index(),
                node.position
            );
        }
    }
}

#[test]
fn tail_trails_behind_facing() {
    let anchor = Vec2::new(100.0, 50.0);
    let offset = Vec2::new(-2.0, 6.0);
    for facing in [1.0f32, -1.0] {
        let frame = OwnerFrame {
            anchor,
            facing,
            ..OwnerFrame::default()
        };
        let s = step(1, 0.4, MotionFlags::evaluate(&frame));
        let mut tail = Tail::new(0);
        tail.initialize_positions(anchor);
        let mirrored = offset * frame.face_direction();
        for _ in 0..300 {
            tail.update(&frame, &s, mirrored);
        }
        let tip = tail.nodes[NODE_COUNT - 1].position;
        let base = tail.base_position();
        assert!(
            (tip.x - base.x) * facing < 0.0,
            "facing {facing}: tip {tip} should trail base {base}"
        );
    }
}

#[test]
fn flight_zeroes_velocity() {
    let frame = OwnerFrame {
        pose: "starFly",
        anchor: Vec2::new(40.0, 40.0),
        ..OwnerFrame::default()
    };
    let mut tail = Tail::new(0);
    for node in &mut tail.nodes {
        node.velocity = Vec2::new(5.0, 5.0);
    }
    tail.update(&frame, &step(1, 0.4, MotionFlags::evaluate(&frame)), Vec2::ZERO);
    for node in &tail.nodes[1..] {
        assert_eq!(node.velocity, Vec2::ZERO);
    }
    assert_clamped(&tail, 1.0);
}

#[test]
fn frozen_motion_keeps_velocity_and_reach() {
    let frame = OwnerFrame {
        anchor: Vec2::new(40.0, 0.0),
        simulate_motion: false,
        ..OwnerFrame::default()
    };
    let mut tail = Tail::new(0);
    for node in &mut tail.nodes {
        node.velocity = Vec2::new(1.0, 2.0);
    }
    tail.update(&frame, &step(1, 0.4, MotionFlags::evaluate(&frame)), Vec2::ZERO);
    for node in &tail.nodes[1..] {
        assert_eq!(node.velocity, Vec2::new(1.0, 2.0));
    }
    assert_clamped(&tail, 1.0);
}

#[test]
fn fall_settle_pushes_nodes_down() {
    let frame = OwnerFrame {
        pose: "fallPose",
        pose_frame: 0,
        anchor: Vec2::ZERO,
        ..OwnerFrame::default()
    };
    let flags = MotionFlags::evaluate(&frame);
    assert!(flags.fall_settle);

    let mut tail = Tail::new(0);
    tail.update(&frame, &step(1, 0.0, flags), Vec2::ZERO);
    for node in &tail.nodes[1..] {
        let expected = node.normalized_index().exp() + node.radius();
        assert_approx(node.velocity.y, expected, 1.0e-5);
    }
}

fn settle(index: usize, count: usize, flags: MotionFlags, frame_counter: u64) -> Tail {
    let frame = OwnerFrame {
        anchor: Vec2::new(100.0, 50.0),
        frame_counter,
        ..OwnerFrame::default()
    };
    let s = step(count, 0.0, flags);
    let mut tail = Tail::new(index);
    tail.initialize_positions(frame.anchor);
    for _ in 0..600 {
        tail.update(&frame, &s, Vec2::ZERO);
    }
    tail
}

/// Offset of every node from its predecessor.
fn links(tail: &Tail) -> Vec<Vec2> {
    (1..NODE_COUNT)
        .map(|i| tail.nodes[i].position - tail.nodes[i - 1].position)
        .collect()
}

#[test]
fn rest_lays_the_tail_along_the_anchor_line() {
    let rest = MotionFlags {
        rest: true,
        ..MotionFlags::default()
    };
    let tail = settle(0, 1, rest, 0);
    for (link, node) in links(&tail).into_iter().zip(&tail.nodes[1..]) {
        assert_approx(link.x, -node.radius(), 1.0e-2);
        assert_approx(link.y, 0.0, 1.0e-2);
    }
    assert_approx(tail.nodes[NODE_COUNT - 1].position.y, 50.0, 1.0e-2);
}

#[test]
fn flip_moves_the_tail_to_the_facing_side() {
    let plain = settle(0, 1, MotionFlags::default(), 0);
    let flipped = settle(
        0,
        1,
        MotionFlags {
            flip: true,
            ..MotionFlags::default()
        },
        0,
    );
    for (a, b) in links(&plain).into_iter().zip(links(&flipped)) {
        assert_approx(b.x, -a.x, 1.0e-2);
        assert_approx(b.y, a.y, 1.0e-2);
    }
    assert!(flipped.nodes[NODE_COUNT - 1].position.x > 100.0);

    let sleeping = settle(
        0,
        1,
        MotionFlags {
            flip: true,
            rest: true,
            ..MotionFlags::default()
        },
        0,
    );
    for (link, node) in links(&sleeping).into_iter().zip(&sleeping.nodes[1..]) {
        assert_approx(link.x, node.radius(), 1.0e-2);
        assert_approx(link.y, 0.0, 1.0e-2);
    }
}

#[test]
fn stretch_flattens_and_stops_short_of_full_reach() {
    let plain = settle(0, 1, MotionFlags::default(), 0);
    let stretched = settle(
        0,
        1,
        MotionFlags {
            stretch: true,
            ..MotionFlags::default()
        },
        0,
    );
    let pairs = links(&plain).into_iter().zip(links(&stretched));
    for ((a, b), node) in pairs.zip(&stretched.nodes[1..]) {
        assert_approx(b.length(), node.radius() * 0.95, 1.0e-2);
        assert!(
            (b.y / b.x).abs() < (a.y / a.x).abs(),
            "node {}: {b} should be flatter than {a}",
            node.index()
        );
    }
}

#[test]
fn droop_sways_with_the_frame_counter() {
    let constants = TailConstants::default();
    let droop = MotionFlags {
        droop: true,
        ..MotionFlags::default()
    };
    let frame_counter = 45;
    let tail = settle(0, 1, droop, frame_counter);

    let phase = frame_counter as f32 / constants.sway_speed();
    for (link, node) in links(&tail).into_iter().zip(&tail.nodes[1..]) {
        let t = node.normalized_index();
        let sway = t
            * constants.sway_amplitude()
            * (phase - t * node.radius() * constants.sway_frequency()).sin();
        let expected = Vec2::new(sway, 1.0).normalize() * node.radius();
        assert_approx(link.x, expected.x, 1.0e-2);
        assert_approx(link.y, expected.y, 1.0e-2);
        assert!(link.y > 0.0);
    }

    // A different phase swings the tip elsewhere.
    let later = settle(0, 1, droop, frame_counter + 60);
    let tip = tail.nodes[NODE_COUNT - 1].position;
    assert!(later.nodes[NODE_COUNT - 1].position.distance(tip) > 0.1);
}

#[test]
fn every_third_tail_mirrors_from_six_tails() {
    let five = settle(2, 5, MotionFlags::default(), 0);
    let six = settle(2, 6, MotionFlags::default(), 0);
    for (a, b) in links(&five).into_iter().zip(links(&six)) {
        assert!(a.x < 0.0);
        assert_approx(b.x, -a.x, 1.0e-2);
        assert_approx(b.y, a.y, 1.0e-2);
    }

    // Other indices keep their direction.
    let five = settle(1, 5, MotionFlags::default(), 0);
    let six = settle(1, 6, MotionFlags::default(), 0);
    for (a, b) in links(&five).into_iter().zip(links(&six)) {
        assert_approx(b.x, a.x, 1.0e-2);
    }
}
