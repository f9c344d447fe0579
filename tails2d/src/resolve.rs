//! Per-attribute settings lookup by owner class.

use crate::{
    AppearanceConfig, OwnerClass, PeerSnapshot, PeerSettingsTable, Rgb, TailOwner, TailSettings,
    TailVariant,
};

/// One independently resolved appearance attribute.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    Variant,
    Scale,
    Count,
    Spread,
    SeparateOutlines,
    BrushTint,
    BrushColor,
    Feather,
    PaintBrush,
}

impl Attribute {
    pub const ALL: [Self; 9] = [
        Self::Variant,
        Self::Scale,
        Self::Count,
        Self::Spread,
        Self::SeparateOutlines,
        Self::BrushTint,
        Self::BrushColor,
        Self::Feather,
        Self::PaintBrush,
    ];
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AttributeValue {
    Variant(TailVariant),
    /// Percent.
    Scale(u16),
    Count(u8),
    /// Percent.
    Spread(u8),
    SeparateOutlines(bool),
    /// Percent.
    BrushTint(u8),
    BrushColor(Rgb),
    Feather(bool),
    PaintBrush(bool),
}

impl AttributeValue {
    fn of(config: &AppearanceConfig, attribute: Attribute) -> Self {
        match attribute {
            Attribute::Variant => Self::Variant(config.variant),
            Attribute::Scale => Self::Scale(config.scale_percent),
            Attribute::Count => Self::Count(config.count),
            Attribute::Spread => Self::Spread(config.spread_percent),
            Attribute::SeparateOutlines => Self::SeparateOutlines(config.separate_outlines),
            Attribute::BrushTint => Self::BrushTint(config.brush_tint_percent),
            Attribute::BrushColor => Self::BrushColor(config.brush_color),
            Attribute::Feather => Self::Feather(config.feather),
            Attribute::PaintBrush => Self::PaintBrush(config.paint_brush),
        }
    }

    fn apply(self, config: &mut AppearanceConfig) {
        match self {
            Self::Variant(v) => config.variant = v,
            Self::Scale(v) => config.scale_percent = v,
            Self::Count(v) => config.count = v,
            Self::Spread(v) => config.spread_percent = v,
            Self::SeparateOutlines(v) => config.separate_outlines = v,
            Self::BrushTint(v) => config.brush_tint_percent = v,
            Self::BrushColor(v) => config.brush_color = v,
            Self::Feather(v) => config.feather = v,
            Self::PaintBrush(v) => config.paint_brush = v,
        }
    }
}

/// Picks the settings block for an owner: local for the player, alternate for its alternate self,
/// the peer's last received settings for remote peers (remote default when none arrived), and the
/// remote default for anything else.
#[derive(Clone, Debug)]
pub struct SettingsResolver<'a> {
    settings: &'a TailSettings,
    peers: PeerSnapshot,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(settings: &'a TailSettings, peers: PeerSnapshot) -> Self {
        Self { settings, peers }
    }

    /// Resolver reading the current snapshot of `table`.
    pub fn with_table(settings: &'a TailSettings, table: &PeerSettingsTable) -> Self {
        Self::new(settings, table.snapshot())
    }

    pub fn settings(&self) -> &'a TailSettings {
        self.settings
    }

    fn block(&self, class: OwnerClass) -> &AppearanceConfig {
        match class {
            OwnerClass::SelfOwner => &self.settings.local,
            OwnerClass::AlternateSelf => &self.settings.alternate,
            OwnerClass::RemotePeer(peer) => self
                .peers
                .get(&peer)
                .unwrap_or(&self.settings.remote_default),
            OwnerClass::Unsupported => &self.settings.remote_default,
        }
    }

    pub fn resolve_class(&self, attribute: Attribute, class: OwnerClass) -> AttributeValue {
        AttributeValue::of(self.block(class), attribute)
    }

    pub fn resolve<O: TailOwner + ?Sized>(&self, attribute: Attribute, owner: &O) -> AttributeValue {
        self.resolve_class(attribute, OwnerClass::classify(owner))
    }

    /// Full appearance for `class`, assembled attribute by attribute.
    pub fn appearance_for_class(&self, class: OwnerClass) -> AppearanceConfig {
        let mut config = AppearanceConfig::default();
        for attribute in Attribute::ALL {
            self.resolve_class(attribute, class).apply(&mut config);
        }
        config
    }

    pub fn appearance<O: TailOwner + ?Sized>(&self, owner: &O) -> AppearanceConfig {
        self.appearance_for_class(OwnerClass::classify(owner))
    }

    pub fn variant<O: TailOwner + ?Sized>(&self, owner: &O) -> TailVariant {
        self.block(OwnerClass::classify(owner)).variant
    }

    pub fn scale<O: TailOwner + ?Sized>(&self, owner: &O) -> f32 {
        self.block(OwnerClass::classify(owner)).scale()
    }

    pub fn count<O: TailOwner + ?Sized>(&self, owner: &O) -> usize {
        self.block(OwnerClass::classify(owner)).tail_count()
    }

    pub fn spread<O: TailOwner + ?Sized>(&self, owner: &O) -> f32 {
        self.block(OwnerClass::classify(owner)).spread()
    }

    pub fn separate_outlines<O: TailOwner + ?Sized>(&self, owner: &O) -> bool {
        self.block(OwnerClass::classify(owner)).separate_outlines
    }

    pub fn brush_tint<O: TailOwner + ?Sized>(&self, owner: &O) -> f32 {
        self.block(OwnerClass::classify(owner)).brush_tint()
    }

    pub fn brush_color<O: TailOwner + ?Sized>(&self, owner: &O) -> Rgb {
        self.block(OwnerClass::classify(owner)).brush_color
    }

    pub fn feather<O: TailOwner + ?Sized>(&self, owner: &O) -> bool {
        self.block(OwnerClass::classify(owner)).feather
    }

    pub fn paint_brush<O: TailOwner + ?Sized>(&self, owner: &O) -> bool {
        self.block(OwnerClass::classify(owner)).paint_brush
    }

    /// Whether hair node 0 of `class` is drawn with the bangs texture. Never for remote peers.
    pub fn bangs_enabled_for_class(&self, class: OwnerClass) -> bool {
        match class {
            OwnerClass::SelfOwner => self.settings.local_bangs,
            OwnerClass::AlternateSelf => self.settings.alternate_bangs,
            OwnerClass::RemotePeer(_) | OwnerClass::Unsupported => false,
        }
    }

    pub fn bangs_enabled<O: TailOwner + ?Sized>(&self, owner: &O) -> bool {
        self.bangs_enabled_for_class(OwnerClass::classify(owner))
    }
}
