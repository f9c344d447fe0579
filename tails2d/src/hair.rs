//! Hair colours sampled by tail fills.

use crate::{OwnerClass, Rgb, TailOwner, TailSettings};

/// Dash count implied by cutscene poses when the owner carries a backpack.
const BACKPACK_CUTSCENE_DASHES: [(&str, u32); 14] = [
    ("bubble", 1),
    ("spin", 1),
    ("launch", 2),
    ("launchRecover", 2),
    ("wakeUp", 1),
    ("sleep", 1),
    ("sitDown", 1),
    ("fallPose", 1),
    ("bagDown", 1),
    ("asleep", 1),
    ("halfWakeUp", 1),
    ("bigFall", 1),
    ("carryTheoWalk", 1),
    ("carryTheoCollapse", 1),
];

/// Dash count implied by cutscene poses without a backpack.
const NO_BACKPACK_CUTSCENE_DASHES: [(&str, u32); 15] = [
    ("bubble", 2),
    ("spin", 1),
    ("launch", 2),
    ("launchRecover", 2),
    ("wakeUp", 1),
    ("roll", 1),
    ("sleep", 1),
    ("sitDown", 1),
    ("fallPose", 1),
    ("bagDown", 1),
    ("asleep", 1),
    ("halfWakeUp", 1),
    ("bigFall", 1),
    ("carryTheoWalk", 1),
    ("carryTheoCollapse", 1),
];

pub const USED_HAIR_COLOR: u32 = 0x44B7FF;
pub const NORMAL_HAIR_COLOR: u32 = 0xAC3232;
pub const TWO_DASHES_HAIR_COLOR: u32 = 0xFF6DEF;

/// Optional source of custom per-dash hair palettes (e.g. a hair-colour mod).
pub trait HairColorOverrideProvider {
    /// Palette for hair segment `index`, one colour per dash count, or `None` if the provider
    /// has nothing for this owner.
    fn hair_palette(&self, index: usize) -> Option<&[[f32; 4]]>;

    /// Palette used for segments without their own.
    fn default_palette(&self) -> Option<&[[f32; 4]]> {
        None
    }
}

pub fn cutscene_dashes(pose: &str, backpack: bool) -> Option<u32> {
    let table: &[(&str, u32)] = if backpack {
        &BACKPACK_CUTSCENE_DASHES
    } else {
        &NO_BACKPACK_CUTSCENE_DASHES
    };
    table
        .iter()
        .find(|(name, _)| *name == pose)
        .map(|(_, dashes)| *dashes)
}

fn vanilla_hair_color(dashes: u32) -> Option<[f32; 4]> {
    let hex = match dashes {
        0 => USED_HAIR_COLOR,
        1 => NORMAL_HAIR_COLOR,
        2 => TWO_DASHES_HAIR_COLOR,
        _ => return None,
    };
    Some(Rgb::from_hex(hex).to_rgba())
}

/// Bangs texture frame for the owner's current hair frame, clamped into `0..frames`. `None` when
/// there are no bangs frames to draw.
pub fn bangs_frame(hair_frame: i32, frames: usize) -> Option<usize> {
    let last = frames.checked_sub(1)?;
    Some(usize::try_from(hair_frame).unwrap_or(0).min(last))
}

/// Colour of hair segment `index`, corrected for cutscene poses that imply a dash count the
/// owner doesn't currently have.
pub fn hair_color<O: TailOwner + ?Sized>(
    owner: &O,
    class: OwnerClass,
    index: usize,
    settings: &TailSettings,
    overrides: Option<&dyn HairColorOverrideProvider>,
) -> [f32; 4] {
    if !settings.fix_cutscenes || class != OwnerClass::SelfOwner {
        return owner.hair_color(index);
    }
    let frame = owner.frame();
    let Some(dashes) = cutscene_dashes(frame.pose, owner.has_backpack()) else {
        return owner.hair_color(index);
    };

    let palette = overrides
        .and_then(|o| o.hair_palette(index).or_else(|| o.default_palette()))
        .unwrap_or(&[]);
    if let Some(color) = palette.get((dashes as usize).min(palette.len().saturating_sub(1))) {
        return *color;
    }

    if !settings.use_vanilla_hair_color {
        return owner.hair_color_for_dashes(index, dashes);
    }

    vanilla_hair_color(dashes).unwrap_or_else(|| owner.hair_color(index))
}

/// One colour per hair segment, root first.
pub fn hair_gradient<O: TailOwner + ?Sized>(
    owner: &O,
    class: OwnerClass,
    settings: &TailSettings,
    overrides: Option<&dyn HairColorOverrideProvider>,
) -> Vec<[f32; 4]> {
    (0..owner.hair_count())
        .map(|index| hair_color(owner, class, index, settings, overrides))
        .collect()
}
