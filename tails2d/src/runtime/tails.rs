use crate::render::{
    DrawList, RenderInputs, append_tail_fill, append_tail_outline, draw_order, tails_visible,
};
use crate::{
    AppearanceConfig, ChainStep, MAX_TAIL_COUNT, MotionFlags, OwnerFrame, Tail, TailConstants,
    anchor_offset,
};
use glam::Vec2;

/// Distance (in pixels, both axes) below and behind the entity where tails start.
const SPAWN_OFFSET: f32 = 200.0;

/// All tails of one owner.
///
/// Tails are created lazily as the configured count grows and are never removed; tails beyond
/// the configured count are kept but neither simulated nor drawn.
#[derive(Clone, Debug)]
pub struct TailSet {
    tails: Vec<Tail>,
    configured_count: usize,
}

impl TailSet {
    pub fn new(count: usize) -> Self {
        let mut set = Self {
            tails: Vec::new(),
            configured_count: 0,
        };
        set.ensure_count(count);
        set
    }

    /// Records the configured count and grows the tail list to match it.
    pub fn ensure_count(&mut self, count: usize) {
        let count = count.clamp(1, MAX_TAIL_COUNT);
        self.configured_count = count;
        if self.tails.len() < count {
            log::debug!("growing tail set from {} to {count} tails", self.tails.len());
            let start_position = self.tails.first().map(|t| t.base_position());
            for index in self.tails.len()..count {
                let mut tail = Tail::new(index);
                if let Some(position) = start_position {
                    tail.initialize_positions(position);
                }
                self.tails.push(tail);
            }
        }
    }

    /// Number of tails currently simulated and drawn.
    pub fn count(&self) -> usize {
        self.configured_count.min(self.tails.len())
    }

    /// Number of tails allocated, including hidden ones.
    pub fn capacity(&self) -> usize {
        self.tails.len()
    }

    pub fn tails(&self) -> &[Tail] {
        &self.tails[..self.count()]
    }

    pub fn tail(&self, index: usize) -> Option<&Tail> {
        self.tails().get(index)
    }

    pub fn draw_order(&self) -> &'static [usize] {
        draw_order(self.count())
    }

    pub fn initialize_positions(&mut self, position: Vec2) {
        let count = self.count();
        for tail in &mut self.tails[..count] {
            tail.initialize_positions(position);
        }
    }

    /// Places every tail off-screen behind the entity so the first frames swing in.
    pub fn initialize_for_start(&mut self, entity_position: Vec2, facing: f32) {
        self.initialize_positions(entity_position + Vec2::new(-facing * SPAWN_OFFSET, SPAWN_OFFSET));
    }

    pub fn move_by(&mut self, amount: Vec2) {
        let count = self.count();
        for tail in &mut self.tails[..count] {
            tail.move_by(amount);
        }
    }

    /// Anchor positions in draw order, for debug overlays.
    pub fn base_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.draw_order()
            .iter()
            .filter_map(|&index| self.tails.get(index))
            .map(Tail::base_position)
    }

    /// Advances every active tail by `dt` seconds.
    pub fn update_frame(
        &mut self,
        frame: &OwnerFrame<'_>,
        appearance: &AppearanceConfig,
        constants: &TailConstants,
        dt: f32,
    ) {
        self.ensure_count(appearance.tail_count());

        let flags = MotionFlags::evaluate(frame);
        let offset = anchor_offset(frame, &flags) * frame.face_direction();
        let step = ChainStep {
            count: self.count(),
            scale: appearance.scale(),
            spread: appearance.spread(),
            dt,
            flags,
            constants: *constants,
        };

        let count = self.count();
        for tail in &mut self.tails[..count] {
            tail.update(frame, &step, offset);
        }
    }

    /// Builds the outline and fill draws for every active tail.
    pub fn render_frame(&self, inputs: &RenderInputs<'_>) -> DrawList {
        let mut out = DrawList::default();
        self.append_render_frame(&mut out, inputs);
        out
    }

    pub fn append_render_frame(&self, out: &mut DrawList, inputs: &RenderInputs<'_>) {
        if !tails_visible(inputs.appearance, inputs.pose) {
            return;
        }

        // The configured count may have changed since the last update; never draw more tails
        // than have been allocated.
        let order = draw_order(inputs.appearance.tail_count().min(self.tails.len()));
        if inputs.appearance.separate_outlines {
            for &index in order {
                let Some(tail) = self.tails.get(index) else {
                    continue;
                };
                append_tail_outline(out, tail, inputs);
                append_tail_fill(out, tail, inputs);
            }
            return;
        }

        for &index in order {
            if let Some(tail) = self.tails.get(index) {
                append_tail_outline(out, tail, inputs);
            }
        }
        for &index in order {
            if let Some(tail) = self.tails.get(index) {
                append_tail_fill(out, tail, inputs);
            }
        }
    }
}
