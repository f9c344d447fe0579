use glam::Vec2;

/// Identifier of a networked peer, as assigned by the transport.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PeerId(pub u32);

/// Host-assigned identifier of an avatar entity that may carry tails.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);

/// Which settings block applies to an owner.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OwnerClass {
    SelfOwner,
    AlternateSelf,
    RemotePeer(PeerId),
    Unsupported,
}

impl OwnerClass {
    /// Classifies an owner from its capability queries. Checked in priority order.
    pub fn classify<O: TailOwner + ?Sized>(owner: &O) -> Self {
        if owner.is_local_player() {
            Self::SelfOwner
        } else if owner.is_alternate_self() {
            Self::AlternateSelf
        } else if let Some(peer) = owner.remote_peer() {
            Self::RemotePeer(peer)
        } else {
            Self::Unsupported
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Per-frame snapshot of the owner state the simulation reads.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerFrame<'a> {
    /// Name of the current pose (animation id).
    pub pose: &'a str,
    /// Frame index inside the current pose's animation.
    pub pose_frame: u32,
    /// Host frame counter; drives sway and idle drift.
    pub frame_counter: u64,
    /// `1.0` facing right, `-1.0` facing left.
    pub facing: f32,
    /// Vertical sprite scale (squash/stretch and flips).
    pub sprite_scale_y: f32,
    /// Gravity inverted for this owner.
    pub inverted: bool,
    /// Stamina, for owners that have it.
    pub stamina: Option<f32>,
    /// World position the tails grow from (the hair root).
    pub anchor: Vec2,
    /// `false` while the host freezes secondary motion.
    pub simulate_motion: bool,
}

impl OwnerFrame<'_> {
    /// Face direction used to mirror offsets and targets.
    pub fn face_direction(&self) -> Vec2 {
        let flip = if self.inverted { -1.0 } else { 1.0 };
        Vec2::new(self.facing, self.sprite_scale_y * flip)
    }
}

impl Default for OwnerFrame<'_> {
    fn default() -> Self {
        Self {
            pose: "idle",
            pose_frame: 0,
            frame_counter: 0,
            facing: 1.0,
            sprite_scale_y: 1.0,
            inverted: false,
            stamina: None,
            anchor: Vec2::ZERO,
            simulate_motion: true,
        }
    }
}

/// Host-side avatar that tails attach to.
pub trait TailOwner {
    fn owner_id(&self) -> OwnerId;

    fn is_local_player(&self) -> bool;

    fn is_alternate_self(&self) -> bool {
        false
    }

    fn remote_peer(&self) -> Option<PeerId> {
        None
    }

    fn frame(&self) -> OwnerFrame<'_>;

    /// Entity position, used to place tails off-screen on spawn.
    fn entity_position(&self) -> Vec2;

    fn hair_count(&self) -> usize;

    /// Current colour of hair segment `index`.
    fn hair_color(&self, index: usize) -> [f32; 4];

    /// Colour hair segment `index` would have with `dashes` dashes left.
    fn hair_color_for_dashes(&self, index: usize, dashes: u32) -> [f32; 4] {
        let _ = dashes;
        self.hair_color(index)
    }

    fn has_backpack(&self) -> bool {
        true
    }
}
