use crate::{Error, Rgb, SkinDefaultTable, TailSettings, TailVariant};

#[test]
fn empty_document_gives_defaults() {
    let settings = TailSettings::from_json_str("{}").expect("parse");
    assert_eq!(settings, TailSettings::default());
}

#[test]
fn parses_every_block() {
    let input = r##"{
        "local": {
            "variant": "Unlit",
            "scale": 250,
            "count": 5,
            "spread": 60,
            "separateOutlines": true,
            "brushTint": 40,
            "brushColor": "#FF8000",
            "feather": false,
            "paintBrush": true
        },
        "remoteDefault": { "variant": "Flat" },
        "constants": { "control": 75, "speed": 80, "softness": 10 },
        "fixCutscenes": false,
        "useVanillaHairColor": false
    }"##;
    let settings = TailSettings::from_json_str(input).expect("parse");

    assert_eq!(settings.local.variant, TailVariant::Unlit);
    assert_eq!(settings.local.scale_percent, 250);
    assert_eq!(settings.local.count, 5);
    assert_eq!(settings.local.spread_percent, 60);
    assert!(settings.local.separate_outlines);
    assert_eq!(settings.local.brush_tint_percent, 40);
    assert_eq!(settings.local.brush_color, Rgb::new(255, 128, 0));
    assert!(!settings.local.feather);
    assert!(settings.local.paint_brush);

    // The alternate self inherits the local block with its own variant.
    assert_eq!(settings.alternate, settings.local.with_variant(TailVariant::Flat));
    assert_eq!(settings.remote_default.variant, TailVariant::Flat);
    assert_eq!(settings.remote_default.count, 1);

    assert_eq!(settings.constants.control, 75);
    assert_eq!(settings.constants.speed, 80);
    assert_eq!(settings.constants.softness, 10);
    assert_eq!(settings.constants.droop_sway_speed, 30);
    assert!(!settings.fix_cutscenes);
    assert!(!settings.use_vanilla_hair_color);
}

#[test]
fn out_of_range_values_are_clamped() {
    let input = r#"{
        "local": { "scale": 5, "count": 40, "spread": -3, "brushTint": 900 },
        "constants": { "speed": 100, "control": 250, "droopSwaySpeed": 0, "maxRemoteScale": 5000 }
    }"#;
    let settings = TailSettings::from_json_str(input).expect("parse");
    assert_eq!(settings.local.scale_percent, 25);
    assert_eq!(settings.local.count, 9);
    assert_eq!(settings.local.spread_percent, 0);
    assert_eq!(settings.local.brush_tint_percent, 100);
    assert_eq!(settings.constants.speed, 99);
    assert_eq!(settings.constants.control, 100);
    assert_eq!(settings.constants.droop_sway_speed, 1);
    assert_eq!(settings.constants.max_remote_scale, 1000);
}

#[test]
fn invalid_documents_are_errors() {
    let err = TailSettings::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::JsonParse { .. }), "{err}");

    let err = TailSettings::from_json_str(r#"{ "local": { "variant": "Scaly" } }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }), "{err}");

    let err =
        TailSettings::from_json_str(r#"{ "local": { "brushColor": "blue" } }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }), "{err}");
}

const SKINS: &str = r#"[
    {
        "skinName": "katz404_ParrotDash",
        "tail": "Furry",
        "tailBrushTint": 0,
        "tailScale": 150,
        "featherTail": true,
        "paintBrushTail": false
    },
    { "skinName": "katz404_Broken", "tail": "Feathery" },
    { "skinName": "Minimal" }
]"#;

#[test]
fn skin_table_skips_unknown_variants() {
    let table = SkinDefaultTable::from_json_str(SKINS).expect("parse");
    assert_eq!(table.len(), 2);

    let parrot = table.get("KATZ404_PARROTDASH").copied().expect("parrot");
    assert_eq!(parrot.variant, TailVariant::Furry);
    assert_eq!(parrot.brush_tint_percent, 0);
    assert_eq!(parrot.scale_percent, 150);

    let minimal = table.get("minimal").copied().expect("minimal");
    assert_eq!(minimal.variant, TailVariant::None);
    assert_eq!(minimal.brush_tint_percent, 15);
    assert_eq!(minimal.scale_percent, 100);
    assert!(minimal.feather);
    assert!(table.get("katz404_Broken").is_none());
}

#[test]
fn strict_skin_table_reports_unknown_variants() {
    let err = SkinDefaultTable::from_json_str_strict(SKINS).unwrap_err();
    match err {
        Error::JsonUnknownVariant { skin, value } => {
            assert_eq!(skin, "katz404_Broken");
            assert_eq!(value, "Feathery");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn skin_table_requires_a_list() {
    let err = SkinDefaultTable::from_json_str(r#"{ "skinName": "x" }"#).unwrap_err();
    assert!(matches!(err, Error::JsonParse { .. }), "{err}");
}

#[test]
fn bangs_toggles_are_read_from_the_player_blocks() {
    let settings = TailSettings::from_json_str("{}").expect("parse");
    assert!(settings.local_bangs && settings.alternate_bangs);

    let input = r#"{
        "local": { "enableBangs": false },
        "alternate": { "enableBangs": true },
        "remoteDefault": { "enableBangs": false }
    }"#;
    let settings = TailSettings::from_json_str(input).expect("parse");
    assert!(!settings.local_bangs);
    assert!(settings.alternate_bangs);
    assert_eq!(settings.local, TailSettings::default().local);
}
