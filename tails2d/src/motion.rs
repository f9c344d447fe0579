//! Pose-driven motion rules.
//!
//! Every predicate is re-evaluated from the current [`OwnerFrame`]; nothing here keeps state.

use crate::OwnerFrame;
use glam::Vec2;

/// Stamina at or below which an owner is too tired to hold its tail up.
pub const CLIMB_TIRED_THRESHOLD: f32 = 20.0;

/// Pose during which tails trail passively.
pub const FLIGHT_POSE: &str = "starFly";

/// Pose whose first animation frame pushes the tail down after a long fall.
pub const FALL_SETTLE_POSE: &str = "fallPose";

/// Hand-tuned anchor offsets for poses where the procedural offset looks wrong.
const POSE_ANCHOR_OFFSETS: [(&str, Vec2); 5] = [
    ("starFly", Vec2::new(0.0, 0.0)),
    ("carryTheoWalk", Vec2::new(2.0, 6.0)),
    ("carryTheoCollapse", Vec2::new(8.0, -2.0)),
    ("bigFall", Vec2::new(7.0, -2.0)),
    ("bubble", Vec2::new(0.0, -4.0)),
];

pub fn is_crouched(pose: &str) -> bool {
    matches!(pose, "duck" | "slide" | "hug")
}

pub fn should_droop(pose: &str, stamina: Option<f32>) -> bool {
    matches!(pose, "launch" | "spin") || stamina.is_some_and(|s| s <= CLIMB_TIRED_THRESHOLD)
}

pub fn should_flip(pose: &str) -> bool {
    matches!(
        pose,
        "asleep" | "bagDown" | "edgeBack" | "halfWakeUp" | "sitDown" | "sleep" | "wakeUp"
    )
}

pub fn should_rest(pose: &str) -> bool {
    matches!(
        pose,
        "asleep"
            | "bagDown"
            | "carryTheoCollapse"
            | "downed"
            | "halfWakeUp"
            | "roll"
            | "rollGetUp"
            | "sitDown"
            | "sleep"
            | "wakeUp"
    )
}

pub fn should_stretch(pose: &str) -> bool {
    matches!(
        pose,
        "dangling"
            | "edge"
            | "edgeBack"
            | "idleC"
            | "runWind"
            | "shaking"
            | "tired"
            | "tiredStill"
    ) || is_crouched(pose)
}

pub fn is_flight(pose: &str) -> bool {
    pose == FLIGHT_POSE
}

pub fn is_fall_settle(pose: &str, pose_frame: u32) -> bool {
    pose == FALL_SETTLE_POSE && pose_frame == 0
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MotionFlags {
    pub crouched: bool,
    pub droop: bool,
    pub flip: bool,
    pub rest: bool,
    pub stretch: bool,
    pub flight: bool,
    pub fall_settle: bool,
}

impl MotionFlags {
    pub fn evaluate(frame: &OwnerFrame<'_>) -> Self {
        let pose = frame.pose;
        Self {
            crouched: is_crouched(pose),
            droop: should_droop(pose, frame.stamina),
            flip: should_flip(pose),
            rest: should_rest(pose),
            stretch: should_stretch(pose),
            flight: is_flight(pose),
            fall_settle: is_fall_settle(pose, frame.pose_frame),
        }
    }
}

/// Anchor offset for the current pose, before mirroring by face direction.
pub fn anchor_offset(frame: &OwnerFrame<'_>, flags: &MotionFlags) -> Vec2 {
    if let Some((_, offset)) = POSE_ANCHOR_OFFSETS
        .iter()
        .find(|(pose, _)| *pose == frame.pose)
    {
        return *offset;
    }

    let drift = (frame.frame_counter as f32 / 30.0).sin() / 2.0;
    Vec2::new(
        if flags.droop { 0.0 } else { -2.0 } + drift,
        if flags.crouched { 3.0 } else { 6.0 },
    )
}
