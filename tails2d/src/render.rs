use crate::geometry::lerp_rgba;
use crate::{AppearanceConfig, NODE_COUNT, Tail, TailConstants, TailNode, VARIANT_COUNT, is_flight};
use glam::Vec2;

/// Paint order of tails, indexed by tail count. Hand-tuned so overlaps look right.
const DRAW_ORDERS: [&[usize]; 10] = [
    &[],
    &[0],
    &[1, 0],
    &[2, 0, 1],
    &[2, 1, 3, 0],
    &[4, 0, 3, 1, 2],
    &[5, 0, 3, 2, 4, 1],
    &[6, 0, 5, 1, 4, 2, 3],
    &[7, 0, 6, 1, 4, 3, 5, 2],
    &[8, 0, 7, 1, 6, 5, 2, 3, 4],
];

const OUTLINE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

const OUTLINE_OFFSETS: [Vec2; 4] = [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y];

/// Draw order for `count` tails; empty for counts outside `0..=9`.
pub fn draw_order(count: usize) -> &'static [usize] {
    DRAW_ORDERS.get(count).copied().unwrap_or(DRAW_ORDERS[0])
}

/// Opaque texture handle owned by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

impl NodeTexture {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Resolves node textures. `family` is `variant - 1`, offset by [`VARIANT_COUNT`] for big tails.
pub trait TextureLookup {
    fn node_texture(&self, family: usize, slot: usize) -> Option<NodeTexture>;
}

/// Host draw primitive.
pub trait QuadSink {
    fn draw_textured_quad(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        origin: Vec2,
        color: [f32; 4],
        scale: f32,
    );
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DrawKind {
    Outline,
    Fill,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadDraw {
    pub kind: DrawKind,
    pub tail: usize,
    pub node: usize,
    pub texture: TextureHandle,
    pub position: Vec2,
    pub origin: Vec2,
    pub color: [f32; 4],
    pub scale: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub draws: Vec<QuadDraw>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn submit<S: QuadSink + ?Sized>(&self, sink: &mut S) {
        for draw in &self.draws {
            sink.draw_textured_quad(
                draw.texture,
                draw.position,
                draw.origin,
                draw.color,
                draw.scale,
            );
        }
    }
}

/// Everything the compositor needs for one owner and one render frame.
#[derive(Copy, Clone)]
pub struct RenderInputs<'a> {
    pub anchor: Vec2,
    pub pose: &'a str,
    pub appearance: &'a AppearanceConfig,
    pub constants: &'a TailConstants,
    /// One colour per hair segment, root first.
    pub hair_gradient: &'a [[f32; 4]],
    pub textures: &'a dyn TextureLookup,
}

impl RenderInputs<'_> {
    fn texture_family(&self) -> Option<usize> {
        let family = self.appearance.variant.texture_family()?;
        Some(if self.appearance.is_big() {
            family + VARIANT_COUNT
        } else {
            family
        })
    }

    fn draw_scale(&self) -> f32 {
        let scale = self.appearance.scale();
        if self.appearance.is_big() {
            scale / 2.0
        } else {
            scale
        }
    }
}

/// Whether tails are drawn at all for this appearance and pose.
pub fn tails_visible(appearance: &AppearanceConfig, pose: &str) -> bool {
    appearance.variant.texture_family().is_some() && (appearance.feather || !is_flight(pose))
}

fn node_draw_position(anchor: Vec2, node: &TailNode) -> Vec2 {
    anchor.floor() + node.offset.floor()
}

/// Fill colour for `node`: the hair gradient sampled along the chain, tinted toward the brush
/// colour on brushed nodes.
pub fn node_fill_color(
    node: &TailNode,
    hair_gradient: &[[f32; 4]],
    appearance: &AppearanceConfig,
    constants: &TailConstants,
) -> [f32; 4] {
    let brush = appearance.brush_color.to_rgba();
    let mut color = match hair_gradient.len() {
        0 => brush,
        hair_count => {
            let lerp = node.normalized_index().min(1.0) * hair_count as f32;
            let index = (lerp as usize).min(hair_count - 1);
            let next = (index + 1).min(hair_count - 1);
            lerp_rgba(hair_gradient[index], hair_gradient[next], lerp.fract())
        }
    };

    let solid = (node.index() as f32) < NODE_COUNT as f32 * constants.solid_fraction();
    if solid == appearance.paint_brush {
        color = lerp_rgba(brush, color, appearance.brush_tint());
    }
    color
}

pub(crate) fn append_tail_outline(out: &mut DrawList, tail: &Tail, inputs: &RenderInputs<'_>) {
    let Some(family) = inputs.texture_family() else {
        return;
    };
    let scale = inputs.draw_scale();

    for node in tail.nodes.iter().rev() {
        let Some(texture) = inputs.textures.node_texture(family, node.texture_slot()) else {
            continue;
        };
        let position = node_draw_position(inputs.anchor, node);
        for offset in OUTLINE_OFFSETS {
            out.draws.push(QuadDraw {
                kind: DrawKind::Outline,
                tail: tail.index(),
                node: node.index(),
                texture: texture.handle,
                position: position + offset,
                origin: texture.center(),
                color: OUTLINE_COLOR,
                scale,
            });
        }
    }
}

pub(crate) fn append_tail_fill(out: &mut DrawList, tail: &Tail, inputs: &RenderInputs<'_>) {
    let Some(family) = inputs.texture_family() else {
        return;
    };
    let scale = inputs.draw_scale();

    for node in tail.nodes.iter().rev() {
        let Some(texture) = inputs.textures.node_texture(family, node.texture_slot()) else {
            continue;
        };
        out.draws.push(QuadDraw {
            kind: DrawKind::Fill,
            tail: tail.index(),
            node: node.index(),
            texture: texture.handle,
            position: node_draw_position(inputs.anchor, node),
            origin: texture.center(),
            color: node_fill_color(node, inputs.hair_gradient, inputs.appearance, inputs.constants),
            scale,
        });
    }
}
