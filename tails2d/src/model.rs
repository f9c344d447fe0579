use crate::Error;
use std::str::FromStr;

/// Number of nodes in every tail.
pub const NODE_COUNT: usize = 8;

/// Maximum number of tails on one owner.
pub const MAX_TAIL_COUNT: usize = 9;

/// Number of texture variants (excluding [`TailVariant::None`]).
pub const VARIANT_COUNT: usize = 3;

/// Node radii in pixels, indexed by node. Hand-picked.
pub const NODE_RADII: [f32; NODE_COUNT] = [3.0, 2.0, 1.0, 3.0, 1.0, 2.0, 2.0, 2.0];

/// Node texture slots, indexed by node. Hand-picked.
pub const NODE_TEXTURE_SLOTS: [usize; NODE_COUNT] = [0, 2, 3, 4, 4, 3, 1, 0];

pub const MIN_TAIL_SCALE_PERCENT: u16 = 25;
pub const MAX_TAIL_SCALE_PERCENT: u16 = 1000;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum TailVariant {
    None,
    #[default]
    Furry,
    Flat,
    Unlit,
}

impl TailVariant {
    pub fn to_wire(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Furry => 1,
            Self::Flat => 2,
            Self::Unlit => 3,
        }
    }

    /// Out-of-range values clamp to the last known variant.
    pub fn from_wire(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Furry,
            2 => Self::Flat,
            _ => Self::Unlit,
        }
    }

    /// Index of the texture family for this variant, `None` for [`TailVariant::None`].
    pub fn texture_family(self) -> Option<usize> {
        match self {
            Self::None => None,
            other => Some(other.to_wire() as usize - 1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Furry => "Furry",
            Self::Flat => "Flat",
            Self::Unlit => "Unlit",
        }
    }
}

impl FromStr for TailVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Furry" => Ok(Self::Furry),
            "Flat" => Ok(Self::Flat),
            "Unlit" => Ok(Self::Unlit),
            other => Err(Error::InvalidValue {
                message: format!("unknown tail variant '{other}'"),
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Appearance parameters for one owner. Ranged fields are stored in integer percent so the
/// wire format round-trips exactly.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AppearanceConfig {
    pub variant: TailVariant,
    pub scale_percent: u16,
    pub count: u8,
    pub spread_percent: u8,
    pub separate_outlines: bool,
    pub brush_tint_percent: u8,
    pub brush_color: Rgb,
    pub feather: bool,
    pub paint_brush: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            variant: TailVariant::Furry,
            scale_percent: 100,
            count: 1,
            spread_percent: 40,
            separate_outlines: false,
            brush_tint_percent: 15,
            brush_color: Rgb::WHITE,
            feather: true,
            paint_brush: false,
        }
    }
}

impl AppearanceConfig {
    pub fn with_variant(mut self, variant: TailVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Tail scale multiplier (`scale_percent / 100`).
    pub fn scale(&self) -> f32 {
        self.scale_percent as f32 / 100.0
    }

    /// Fan spread in `0..=1`.
    pub fn spread(&self) -> f32 {
        self.spread_percent.min(100) as f32 / 100.0
    }

    /// Brush tint in `0..=1`.
    pub fn brush_tint(&self) -> f32 {
        self.brush_tint_percent.min(100) as f32 / 100.0
    }

    pub fn tail_count(&self) -> usize {
        (self.count as usize).clamp(1, MAX_TAIL_COUNT)
    }

    /// Big tails use the high-resolution texture family and are drawn at half scale.
    pub fn is_big(&self) -> bool {
        self.scale() > 1.0
    }

    /// Clamps every ranged field into its documented range.
    pub fn normalized(mut self, context: &str) -> Self {
        let scale = self
            .scale_percent
            .clamp(MIN_TAIL_SCALE_PERCENT, MAX_TAIL_SCALE_PERCENT);
        if scale != self.scale_percent {
            log::warn!(
                "{context}: tail scale {}% clamped to {scale}%",
                self.scale_percent
            );
            self.scale_percent = scale;
        }
        let count = self.count.clamp(1, MAX_TAIL_COUNT as u8);
        if count != self.count {
            log::warn!("{context}: tail count {} clamped to {count}", self.count);
            self.count = count;
        }
        if self.spread_percent > 100 {
            log::warn!("{context}: tail spread {}% clamped to 100%", self.spread_percent);
            self.spread_percent = 100;
        }
        if self.brush_tint_percent > 100 {
            log::warn!(
                "{context}: brush tint {}% clamped to 100%",
                self.brush_tint_percent
            );
            self.brush_tint_percent = 100;
        }
        self
    }
}

/// Motion tuning. Local only; never synced.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TailConstants {
    pub droop_sway_amplitude: u8,
    pub droop_sway_frequency: u8,
    pub droop_sway_speed: u8,
    pub control: u8,
    pub speed: u8,
    pub softness: u8,
    /// Upper bound for scale values received from peers, in percent.
    pub max_remote_scale: u16,
}

impl Default for TailConstants {
    fn default() -> Self {
        Self {
            droop_sway_amplitude: 20,
            droop_sway_frequency: 20,
            droop_sway_speed: 30,
            control: 60,
            speed: 90,
            softness: 30,
            max_remote_scale: MAX_TAIL_SCALE_PERCENT,
        }
    }
}

impl TailConstants {
    pub fn sway_amplitude(&self) -> f32 {
        self.droop_sway_amplitude as f32 / 100.0
    }

    pub fn sway_frequency(&self) -> f32 {
        self.droop_sway_frequency as f32 / 100.0
    }

    pub fn sway_speed(&self) -> f32 {
        self.droop_sway_speed.max(1) as f32
    }

    /// Velocity smoothing factor in `0..=1`.
    pub fn control(&self) -> f32 {
        self.control.min(100) as f32 / 100.0
    }

    /// Integration speed in `0..=0.99`; never 1.
    pub fn speed(&self) -> f32 {
        self.speed.min(99) as f32 / 100.0
    }

    /// Fraction of the chain (from the anchor) drawn without brush tint.
    pub fn solid_fraction(&self) -> f32 {
        (100 - self.softness.min(100)) as f32 / 100.0
    }

    pub fn normalized(mut self) -> Self {
        fn clamp_field(name: &str, value: &mut u8, min: u8, max: u8) {
            let clamped = (*value).clamp(min, max);
            if clamped != *value {
                log::warn!("tail constant {name} = {value} clamped to {clamped}");
                *value = clamped;
            }
        }

        clamp_field("droop_sway_amplitude", &mut self.droop_sway_amplitude, 0, 100);
        clamp_field("droop_sway_frequency", &mut self.droop_sway_frequency, 0, 100);
        clamp_field("droop_sway_speed", &mut self.droop_sway_speed, 1, 100);
        clamp_field("control", &mut self.control, 0, 100);
        clamp_field("speed", &mut self.speed, 0, 99);
        clamp_field("softness", &mut self.softness, 0, 100);
        if self.max_remote_scale > MAX_TAIL_SCALE_PERCENT {
            log::warn!(
                "tail constant max_remote_scale = {} clamped to {MAX_TAIL_SCALE_PERCENT}",
                self.max_remote_scale
            );
            self.max_remote_scale = MAX_TAIL_SCALE_PERCENT;
        }
        self
    }
}

/// All locally configured tail settings.
#[derive(Clone, Debug, PartialEq)]
pub struct TailSettings {
    /// The local player's appearance; this is what gets broadcast to peers.
    pub local: AppearanceConfig,
    /// Appearance for the local player's alternate self (mirror/reflection characters).
    pub alternate: AppearanceConfig,
    /// Appearance for peers that never sent their settings.
    pub remote_default: AppearanceConfig,
    pub constants: TailConstants,
    /// Recolor hair during cutscene poses to match the dash count the pose implies.
    pub fix_cutscenes: bool,
    pub use_vanilla_hair_color: bool,
    /// Draw the local player's hair root with the bangs texture.
    pub local_bangs: bool,
    pub alternate_bangs: bool,
}

impl Default for TailSettings {
    fn default() -> Self {
        let local = AppearanceConfig::default();
        Self {
            local,
            alternate: local.with_variant(TailVariant::Flat),
            remote_default: local.with_variant(TailVariant::None),
            constants: TailConstants::default(),
            fix_cutscenes: true,
            use_vanilla_hair_color: true,
            local_bangs: true,
            alternate_bangs: true,
        }
    }
}

impl TailSettings {
    pub fn normalized(self) -> Self {
        Self {
            local: self.local.normalized("local"),
            alternate: self.alternate.normalized("alternate"),
            remote_default: self.remote_default.normalized("remote default"),
            constants: self.constants.normalized(),
            ..self
        }
    }
}
