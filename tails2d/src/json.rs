use crate::{
    AppearanceConfig, Error, Rgb, SkinDefault, SkinDefaultTable, TailConstants, TailSettings,
    TailVariant,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SettingsDef {
    local: Option<AppearanceDef>,
    alternate: Option<AppearanceDef>,
    remote_default: Option<AppearanceDef>,
    constants: Option<ConstantsDef>,
    fix_cutscenes: Option<bool>,
    use_vanilla_hair_color: Option<bool>,
}

// Numbers are read wide so out-of-range values can be clamped with a warning instead of
// failing the whole document.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AppearanceDef {
    variant: Option<String>,
    scale: Option<i64>,
    count: Option<i64>,
    spread: Option<i64>,
    separate_outlines: Option<bool>,
    brush_tint: Option<i64>,
    brush_color: Option<String>,
    feather: Option<bool>,
    paint_brush: Option<bool>,
    // Not part of the appearance; only read from the local and alternate blocks.
    enable_bangs: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConstantsDef {
    droop_sway_amplitude: Option<i64>,
    droop_sway_frequency: Option<i64>,
    droop_sway_speed: Option<i64>,
    control: Option<i64>,
    speed: Option<i64>,
    softness: Option<i64>,
    max_remote_scale: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkinDef {
    skin_name: String,
    #[serde(default = "default_skin_tail")]
    tail: String,
    #[serde(default = "default_skin_brush_tint")]
    tail_brush_tint: i64,
    #[serde(default = "default_skin_scale")]
    tail_scale: i64,
    #[serde(default = "default_true")]
    feather_tail: bool,
    #[serde(default)]
    paint_brush_tail: bool,
}

fn default_skin_tail() -> String {
    "None".to_string()
}

fn default_skin_brush_tint() -> i64 {
    15
}

fn default_skin_scale() -> i64 {
    100
}

fn default_true() -> bool {
    true
}

fn narrow<T: TryFrom<i64> + Copy>(context: &str, name: &str, value: i64, min: T, max: T) -> T
where
    i64: From<T>,
{
    let clamped = value.clamp(i64::from(min), i64::from(max));
    if clamped != value {
        log::warn!("{context}: {name} = {value} clamped to {clamped}");
    }
    T::try_from(clamped).unwrap_or(min)
}

fn parse_color(context: &str, raw: &str) -> Result<Rgb, Error> {
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if hex.len() != 6 {
        return Err(Error::InvalidValue {
            message: format!("{context}: brush colour '{raw}' is not RRGGBB"),
        });
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| Error::InvalidValue {
        message: format!("{context}: brush colour '{raw}' is not RRGGBB"),
    })?;
    Ok(Rgb::from_hex(value))
}

impl AppearanceDef {
    fn apply(self, context: &str, base: AppearanceConfig) -> Result<AppearanceConfig, Error> {
        let mut out = base;
        if let Some(variant) = self.variant.as_deref() {
            out.variant = variant.parse()?;
        }
        if let Some(v) = self.scale {
            out.scale_percent = narrow(context, "scale", v, 25u16, 1000u16);
        }
        if let Some(v) = self.count {
            out.count = narrow(context, "count", v, 1u8, 9u8);
        }
        if let Some(v) = self.spread {
            out.spread_percent = narrow(context, "spread", v, 0u8, 100u8);
        }
        if let Some(v) = self.separate_outlines {
            out.separate_outlines = v;
        }
        if let Some(v) = self.brush_tint {
            out.brush_tint_percent = narrow(context, "brushTint", v, 0u8, 100u8);
        }
        if let Some(raw) = self.brush_color.as_deref() {
            out.brush_color = parse_color(context, raw)?;
        }
        if let Some(v) = self.feather {
            out.feather = v;
        }
        if let Some(v) = self.paint_brush {
            out.paint_brush = v;
        }
        Ok(out)
    }
}

impl ConstantsDef {
    fn apply(self, base: TailConstants) -> TailConstants {
        let mut out = base;
        let byte = |name: &str, value: Option<i64>, min: u8, max: u8, current: u8| {
            value.map_or(current, |v| narrow("constants", name, v, min, max))
        };
        out.droop_sway_amplitude = byte(
            "droopSwayAmplitude",
            self.droop_sway_amplitude,
            0,
            100,
            out.droop_sway_amplitude,
        );
        out.droop_sway_frequency = byte(
            "droopSwayFrequency",
            self.droop_sway_frequency,
            0,
            100,
            out.droop_sway_frequency,
        );
        out.droop_sway_speed = byte(
            "droopSwaySpeed",
            self.droop_sway_speed,
            1,
            100,
            out.droop_sway_speed,
        );
        out.control = byte("control", self.control, 0, 100, out.control);
        out.speed = byte("speed", self.speed, 0, 99, out.speed);
        out.softness = byte("softness", self.softness, 0, 100, out.softness);
        if let Some(v) = self.max_remote_scale {
            out.max_remote_scale = narrow("constants", "maxRemoteScale", v, 0u16, 1000u16);
        }
        out
    }
}

impl TailSettings {
    /// Parses settings from JSON. Missing fields keep their defaults; out-of-range numbers are
    /// clamped and logged.
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let root: SettingsDef = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

        let defaults = Self::default();
        let bangs = |def: &Option<AppearanceDef>, default: bool| {
            def.as_ref().and_then(|d| d.enable_bangs).unwrap_or(default)
        };
        let local_bangs = bangs(&root.local, defaults.local_bangs);
        let alternate_bangs = bangs(&root.alternate, defaults.alternate_bangs);

        let local = match root.local {
            Some(def) => def.apply("local", defaults.local)?,
            None => defaults.local,
        };
        let alternate = match root.alternate {
            Some(def) => def.apply("alternate", local.with_variant(defaults.alternate.variant))?,
            None => local.with_variant(defaults.alternate.variant),
        };
        let remote_default = match root.remote_default {
            Some(def) => def.apply("remoteDefault", defaults.remote_default)?,
            None => defaults.remote_default,
        };
        let constants = root
            .constants
            .map_or(defaults.constants, |def| def.apply(defaults.constants));

        Ok(Self {
            local,
            alternate,
            remote_default,
            constants,
            fix_cutscenes: root.fix_cutscenes.unwrap_or(defaults.fix_cutscenes),
            use_vanilla_hair_color: root
                .use_vanilla_hair_color
                .unwrap_or(defaults.use_vanilla_hair_color),
            local_bangs,
            alternate_bangs,
        }
        .normalized())
    }
}

impl SkinDef {
    fn into_default(self) -> Result<(String, SkinDefault), Error> {
        let variant: TailVariant = self.tail.parse().map_err(|_| Error::JsonUnknownVariant {
            skin: self.skin_name.clone(),
            value: self.tail.clone(),
        })?;
        let context = self.skin_name.as_str();
        let default = SkinDefault {
            variant,
            brush_tint_percent: narrow(context, "tailBrushTint", self.tail_brush_tint, 0u8, 100u8),
            scale_percent: narrow(context, "tailScale", self.tail_scale, 25u16, 1000u16),
            feather: self.feather_tail,
            paint_brush: self.paint_brush_tail,
        };
        Ok((self.skin_name, default))
    }
}

impl SkinDefaultTable {
    /// Parses a list of skin defaults. Entries with an unknown tail variant are logged and skipped.
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let mut table = Self::new();
        for def in parse_skin_defs(input)? {
            match def.into_default() {
                Ok((skin, default)) => table.insert(&skin, default),
                Err(err) => log::warn!("skipping skin tail defaults: {err}"),
            }
        }
        Ok(table)
    }

    /// Like [`SkinDefaultTable::from_json_str`], but an unknown tail variant is an error.
    pub fn from_json_str_strict(input: &str) -> Result<Self, Error> {
        let mut table = Self::new();
        for def in parse_skin_defs(input)? {
            let (skin, default) = def.into_default()?;
            table.insert(&skin, default);
        }
        Ok(table)
    }
}

fn parse_skin_defs(input: &str) -> Result<Vec<SkinDef>, Error> {
    serde_json::from_str(input).map_err(|e| Error::JsonParse {
        message: e.to_string(),
    })
}
