use crate::geometry::{lerp_snap, rotate, safe_normalize, sign_vec};
use crate::{MotionFlags, NODE_COUNT, NODE_RADII, NODE_TEXTURE_SLOTS, OwnerFrame, TailConstants};
use glam::Vec2;

/// Snap threshold for velocity smoothing, in pixels per second.
const VELOCITY_SNAP: f32 = 1.0;

/// Damping applied to stretched tails after normalisation so they never reach full length.
const STRETCH_SHRINK: f32 = 0.95;

#[derive(Clone, Debug, PartialEq)]
pub struct TailNode {
    index: usize,
    pub position: Vec2,
    /// Position relative to the owner anchor, refreshed every update for rendering.
    pub offset: Vec2,
    pub velocity: Vec2,
}

impl TailNode {
    fn new(index: usize) -> Self {
        Self {
            index,
            position: Vec2::ZERO,
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn radius(&self) -> f32 {
        NODE_RADII[self.index]
    }

    pub fn texture_slot(&self) -> usize {
        NODE_TEXTURE_SLOTS[self.index]
    }

    /// Position along the chain in `0..1`, anchor at `0`.
    pub fn normalized_index(&self) -> f32 {
        self.index as f32 / NODE_COUNT as f32
    }
}

/// Inputs shared by every tail of one owner for one update.
#[derive(Copy, Clone, Debug)]
pub struct ChainStep {
    pub count: usize,
    pub scale: f32,
    pub spread: f32,
    pub dt: f32,
    pub flags: MotionFlags,
    pub constants: TailConstants,
}

/// Fan angle (radians) for tail `index` out of `count`, before the spread multiplier.
///
/// The half circle is split into `count + 1` (odd) or `count + 2` (even) segments; tails alternate
/// sides with even indices turning clockwise.
pub fn fan_angle(index: usize, count: usize) -> f32 {
    let pad = if count % 2 == 0 { 2 } else { 1 };
    let split = (count + pad) as f32;
    let mut multiplier = ((index + pad) / 2) as f32;
    if index % 2 == 0 {
        multiplier = -multiplier;
    }
    std::f32::consts::PI / split * multiplier
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tail {
    index: usize,
    pub nodes: [TailNode; NODE_COUNT],
}

impl Tail {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            nodes: std::array::from_fn(TailNode::new),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn base_position(&self) -> Vec2 {
        self.nodes[0].position
    }

    pub fn initialize_positions(&mut self, position: Vec2) {
        for node in &mut self.nodes {
            node.position = position;
        }
    }

    pub fn move_by(&mut self, amount: Vec2) {
        for node in &mut self.nodes {
            node.position += amount;
        }
    }

    /// Pulls node `index` back within `radius * scale` of its predecessor, keeping its direction.
    pub fn clamp_node(&mut self, index: usize, scale: f32) {
        if index == 0 || index >= NODE_COUNT {
            return;
        }
        let previous = self.nodes[index - 1].position;
        let node = &mut self.nodes[index];
        let delta = previous - node.position;
        let reach = node.radius() * scale;
        if delta.length_squared() <= reach * reach {
            return;
        }
        node.position = previous - safe_normalize(delta) * reach;
    }

    /// Advances the chain by one frame.
    ///
    /// `anchor_offset` is the pose offset already mirrored by the face direction.
    pub fn update(&mut self, frame: &OwnerFrame<'_>, step: &ChainStep, anchor_offset: Vec2) {
        let face = frame.face_direction();
        let rotation = fan_angle(self.index, step.count) * step.spread;

        let base = &mut self.nodes[0];
        base.offset = anchor_offset;
        let old = base.position;
        let diff = frame.anchor + anchor_offset - old;
        // Fan the anchor's motion, not the anchor itself; undone at the end of the step.
        let rotated = rotate(diff.abs(), rotation) * sign_vec(diff);
        base.position = old + rotated;

        let constants = &step.constants;
        let flags = &step.flags;
        let smoothing = 1.0 - (1.0 - constants.control()).powf(step.dt);
        let integration = step.dt / (1.0 - constants.speed());

        for i in 1..NODE_COUNT {
            if flags.flight {
                self.nodes[i].velocity = Vec2::ZERO;
            } else if frame.simulate_motion {
                let node = &self.nodes[i];
                let t = node.normalized_index();
                let radius = node.radius();

                let mut x = (t - 0.5) * 2.0;
                if x < 0.0 {
                    x = (-x).sqrt();
                }
                let mut dir = Vec2::new(-0.5, -1.0 + x);

                if flags.droop {
                    let phase = frame.frame_counter as f32 / constants.sway_speed();
                    let node_lag = t * radius * constants.sway_frequency();
                    dir = Vec2::new(t * constants.sway_amplitude() * (phase - node_lag).sin(), 1.0);
                }
                if flags.flip {
                    dir.x = -dir.x;
                }
                if flags.rest {
                    dir.y = 0.0;
                }
                if flags.stretch {
                    dir *= Vec2::new(2.0, 0.5);
                }

                dir = safe_normalize(dir);
                if flags.stretch {
                    dir *= STRETCH_SHRINK;
                }

                dir = rotate(dir, rotation);
                if step.count >= 6 && self.index % 3 == 2 {
                    dir.x = -dir.x;
                }

                self.clamp_node(i, step.scale);

                let previous = self.nodes[i - 1].position;
                let node = &mut self.nodes[i];
                let target = previous + dir * radius * step.scale * face;
                node.velocity = lerp_snap(
                    node.velocity,
                    target - node.position,
                    smoothing,
                    VELOCITY_SNAP,
                );

                if flags.fall_settle {
                    node.velocity.y = t.exp() + radius;
                }

                node.position += node.velocity * integration;
            }

            self.clamp_node(i, step.scale);
        }

        let correction = rotated - diff;
        for node in &mut self.nodes {
            node.position -= correction;
            node.offset = node.position - frame.anchor;
        }
    }
}
