use crate::{NodeTexture, OwnerFrame, OwnerId, PeerId, TailOwner, TextureHandle, TextureLookup};
use glam::Vec2;

/// Configurable avatar for tests.
#[derive(Clone, Debug)]
pub(crate) struct TestOwner {
    pub id: OwnerId,
    pub local: bool,
    pub alternate: bool,
    pub peer: Option<PeerId>,
    pub pose: String,
    pub pose_frame: u32,
    pub frame_counter: u64,
    pub facing: f32,
    pub inverted: bool,
    pub stamina: Option<f32>,
    pub anchor: Vec2,
    pub position: Vec2,
    pub hair: Vec<[f32; 4]>,
    pub backpack: bool,
    pub simulate_motion: bool,
}

impl TestOwner {
    pub fn local() -> Self {
        Self {
            id: OwnerId(1),
            local: true,
            alternate: false,
            peer: None,
            pose: "idle".to_string(),
            pose_frame: 0,
            frame_counter: 0,
            facing: 1.0,
            inverted: false,
            stamina: None,
            anchor: Vec2::new(100.0, 50.0),
            position: Vec2::new(100.0, 60.0),
            hair: vec![[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]],
            backpack: true,
            simulate_motion: true,
        }
    }

    pub fn remote(peer: u32) -> Self {
        Self {
            id: OwnerId(1000 + peer as u64),
            local: false,
            peer: Some(PeerId(peer)),
            ..Self::local()
        }
    }

    pub fn with_pose(mut self, pose: &str) -> Self {
        self.pose = pose.to_string();
        self
    }
}

impl TailOwner for TestOwner {
    fn owner_id(&self) -> OwnerId {
        self.id
    }

    fn is_local_player(&self) -> bool {
        self.local
    }

    fn is_alternate_self(&self) -> bool {
        self.alternate
    }

    fn remote_peer(&self) -> Option<PeerId> {
        self.peer
    }

    fn frame(&self) -> OwnerFrame<'_> {
        OwnerFrame {
            pose: &self.pose,
            pose_frame: self.pose_frame,
            frame_counter: self.frame_counter,
            facing: self.facing,
            sprite_scale_y: 1.0,
            inverted: self.inverted,
            stamina: self.stamina,
            anchor: self.anchor,
            simulate_motion: self.simulate_motion,
        }
    }

    fn entity_position(&self) -> Vec2 {
        self.position
    }

    fn hair_count(&self) -> usize {
        self.hair.len()
    }

    fn hair_color(&self, index: usize) -> [f32; 4] {
        self.hair[index]
    }

    fn hair_color_for_dashes(&self, _index: usize, dashes: u32) -> [f32; 4] {
        [dashes as f32 / 10.0, 0.5, 0.5, 1.0]
    }

    fn has_backpack(&self) -> bool {
        self.backpack
    }
}

/// Every texture exists; handle encodes `family * 10 + slot`.
pub(crate) struct AllTextures;

impl TextureLookup for AllTextures {
    fn node_texture(&self, family: usize, slot: usize) -> Option<NodeTexture> {
        Some(NodeTexture {
            handle: TextureHandle((family * 10 + slot) as u32),
            width: 8,
            height: 8,
        })
    }
}
