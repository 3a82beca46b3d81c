use anyhow::Result;
use serde_json::{json, Value};

use gltf_ext::extensions::bim_data::{BimDocument, BIM_DATA};
use gltf_ext::extensions::geometry_metadata::GeometryMetadata;
use gltf_ext::extensions::materials_anisotropy::MaterialsAnisotropy;
use gltf_ext::extensions::materials_emissive_strength::MaterialsEmissiveStrength;
use gltf_ext::extensions::materials_ior::MaterialsIor;
use gltf_ext::{Error, ExtensionType, Parent, Registry, TextureInfo};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn decode(name: &str, parent: Parent, input: &str) -> Result<gltf_ext::Extension, Error> {
    init_logging();
    Registry::global().decode(name, parent, input.as_bytes())
}

#[test]
fn ior_default_round_trip() -> Result<()> {
    let extension = decode("KHR_materials_ior", Parent::Material, "{}")?;
    let ior = extension.as_type::<MaterialsIor>().expect("ior payload");
    assert_eq!(ior.ior(), 1.5);
    assert_eq!(String::from_utf8(extension.encode()?)?, "{}");
    Ok(())
}

#[test]
fn ior_custom_round_trip() -> Result<()> {
    let extension = decode("KHR_materials_ior", Parent::Material, r#"{"ior":1.4}"#)?;
    assert_eq!(extension.as_type::<MaterialsIor>().map(MaterialsIor::ior), Some(1.4));
    assert_eq!(String::from_utf8(extension.encode()?)?, r#"{"ior":1.4}"#);
    Ok(())
}

#[test]
fn anisotropy_texture_with_defaults() -> Result<()> {
    let extension = decode(
        "KHR_materials_anisotropy",
        Parent::Material,
        r#"{"anisotropyTexture":{"index":0}}"#,
    )?;
    let anisotropy = extension.as_type::<MaterialsAnisotropy>().expect("anisotropy payload");
    assert_eq!(anisotropy.strength(), 0.0);
    assert_eq!(anisotropy.rotation(), 0.0);
    assert_eq!(anisotropy.texture(), Some(&TextureInfo::new(0)));
    assert_eq!(String::from_utf8(extension.encode()?)?, r#"{"anisotropyTexture":{"index":0}}"#);
    Ok(())
}

#[test]
fn emissive_strength_non_default() -> Result<()> {
    let extension = decode(
        "KHR_materials_emissive_strength",
        Parent::Material,
        r#"{"emissiveStrength":5.0}"#,
    )?;
    let strength = extension.as_type::<MaterialsEmissiveStrength>().expect("emissive payload");
    assert_eq!(strength.emissive_strength(), 5.0);
    assert_eq!(String::from_utf8(extension.encode()?)?, r#"{"emissiveStrength":5}"#);
    Ok(())
}

#[test]
fn scene_bounds_invalid_length() {
    let err = decode(
        "FB_geometry_metadata",
        Parent::Scene,
        r#"{"sceneBounds":{"min":[-1,-2],"max":[1,2,3]}}"#,
    )
    .unwrap_err();
    match err {
        Error::Validation { ref extension, ref source } => {
            assert_eq!(extension, GeometryMetadata::NAME);
            assert_eq!(source.field, "sceneBounds");
            assert!(source.message.contains("min/max length mismatch"));
        }
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn bim_root_round_trip() -> Result<()> {
    let input = json!({
        "propertyNames": ["Category", "Family", "Level"],
        "propertyValues": ["Walls", "Basic Wall", "Level 1", "Level 2"],
        "properties": [
            { "name": 0, "value": 0 },
            { "name": 1, "value": 1 },
            { "name": 2, "value": 2 },
            { "name": 2, "value": 3 },
        ],
        "types": [{ "properties": [0, 1] }],
    });
    let extension = decode(BIM_DATA, Parent::Document, &input.to_string())?;
    let document = extension.as_type::<BimDocument>().expect("bim document payload");
    assert_eq!(document.property(3), Some(("Level", "Level 2")));

    let encoded: Value = serde_json::from_slice(&extension.encode()?)?;
    assert_eq!(encoded, input);
    Ok(())
}

/// Default-valued payloads of every built-in extension whose fields are all
/// defaulted or optional.
fn empty_payloads() -> Vec<(&'static str, Parent)> {
    vec![
        ("KHR_materials_ior", Parent::Material),
        ("KHR_materials_emissive_strength", Parent::Material),
        ("KHR_materials_anisotropy", Parent::Material),
        ("KHR_materials_specular", Parent::Material),
        ("KHR_materials_transmission", Parent::Material),
        ("KHR_materials_unlit", Parent::Material),
        ("EXT_texture_webp", Parent::Texture),
        ("FB_geometry_metadata", Parent::Scene),
        (BIM_DATA, Parent::Node),
    ]
}

#[test]
fn empty_payloads_encode_to_empty_object() -> Result<()> {
    for (name, parent) in empty_payloads() {
        let extension = decode(name, parent, "{}")?;
        assert_eq!(extension.name(), name);
        assert_eq!(extension.parent(), parent);
        assert_eq!(String::from_utf8(extension.encode()?)?, "{}", "{name}");
    }
    Ok(())
}

#[test]
fn defaults_are_never_rendered() -> Result<()> {
    let cases = [
        ("KHR_materials_ior", r#"{"ior":1.5}"#, r#""ior""#),
        ("KHR_materials_emissive_strength", r#"{"emissiveStrength":1.0}"#, r#""emissiveStrength""#),
        ("KHR_materials_anisotropy", r#"{"anisotropyStrength":0,"anisotropyRotation":0.0}"#, "anisotropy"),
        ("KHR_materials_specular", r#"{"specularFactor":1,"specularColorFactor":[1,1,1]}"#, "specular"),
        ("KHR_materials_transmission", r#"{"transmissionFactor":0}"#, "transmission"),
    ];
    for (name, input, rendered) in cases {
        let encoded = String::from_utf8(decode(name, Parent::Material, input)?.encode()?)?;
        assert!(!encoded.contains(rendered), "{name} rendered {encoded}");
    }
    Ok(())
}

#[test]
fn nested_extensions_and_extras_survive() -> Result<()> {
    let nested = json!({
        "extensions": { "VENDOR_inner": { "deep": [1, { "x": null }] } },
        "extras": { "tags": ["a", "b"], "weight": 0.25 },
    });
    for (name, parent) in empty_payloads() {
        let extension = decode(name, parent, &nested.to_string())?;
        let encoded: Value = serde_json::from_slice(&extension.encode()?)?;
        assert_eq!(encoded, nested, "{name}");
        assert_eq!(decode(name, parent, &encoded.to_string())?, extension);
    }
    Ok(())
}

#[test]
fn errors_name_their_extension() {
    let err = decode("KHR_materials_emissive_strength", Parent::Material, "{").unwrap_err();
    assert!(err.to_string().starts_with("KHR_materials_emissive_strength parsing failed: "));

    let err = decode("KHR_materials_anisotropy", Parent::Material, r#"{"anisotropyStrength":-0.5}"#).unwrap_err();
    assert!(err.to_string().starts_with("KHR_materials_anisotropy validation failed: anisotropyStrength: "));
    assert_eq!(err.extension(), MaterialsAnisotropy::NAME);
}
