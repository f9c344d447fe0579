use crate::{AppearanceConfig, TailSettings, TailVariant};
use std::collections::HashMap;

/// Tail appearance a character skin ships with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SkinDefault {
    pub variant: TailVariant,
    pub brush_tint_percent: u8,
    pub scale_percent: u16,
    pub feather: bool,
    pub paint_brush: bool,
}

impl Default for SkinDefault {
    fn default() -> Self {
        Self {
            variant: TailVariant::None,
            brush_tint_percent: 15,
            scale_percent: 100,
            feather: true,
            paint_brush: false,
        }
    }
}

impl SkinDefault {
    /// Overwrites the fields a skin controls, leaving the rest of `config` as is.
    pub fn apply_to(&self, config: &mut AppearanceConfig) {
        config.variant = self.variant;
        config.brush_tint_percent = self.brush_tint_percent;
        config.scale_percent = self.scale_percent;
        config.feather = self.feather;
        config.paint_brush = self.paint_brush;
    }
}

/// Source of per-skin tail defaults.
pub trait SkinDefaults {
    fn skin_default(&self, skin: &str) -> Option<SkinDefault>;
}

/// Skin defaults keyed by skin name, compared case-insensitively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkinDefaultTable {
    entries: HashMap<String, SkinDefault>,
}

impl SkinDefaultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same skin replace earlier ones.
    pub fn insert(&mut self, skin: &str, default: SkinDefault) {
        self.entries.insert(skin.to_lowercase(), default);
    }

    pub fn get(&self, skin: &str) -> Option<&SkinDefault> {
        self.entries.get(&skin.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `other` into `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: SkinDefaultTable) {
        self.entries.extend(other.entries);
    }
}

impl SkinDefaults for SkinDefaultTable {
    fn skin_default(&self, skin: &str) -> Option<SkinDefault> {
        self.get(skin).copied()
    }
}

impl TailSettings {
    /// Applies the defaults of `skin` to the local appearance. Returns whether the skin had any.
    pub fn apply_skin<D: SkinDefaults + ?Sized>(&mut self, skin: &str, defaults: &D) -> bool {
        let Some(default) = defaults.skin_default(skin) else {
            return false;
        };
        log::debug!("applying tail defaults of skin '{skin}'");
        default.apply_to(&mut self.local);
        self.local = self.local.normalized(skin);
        true
    }
}
