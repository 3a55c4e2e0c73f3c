mod common;

use common::{atom, ftyp, text_item};
use mp4reader::boxes::FourCC;
use mp4reader::envelope::BoxEnvelope;
use mp4reader::{BoxParser, BoxType, Payload, Registry, Result, default_registry};
use serde_json::json;
use std::io::Cursor;

fn decode_custom(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let remaining = parser.remaining(envelope);
    let bytes = parser.cursor().read_bytes(remaining)?;
    Ok(Payload::Json(json!({
        "foo": "bar",
        "len": bytes.len(),
    })))
}

fn decode_ftyp_brand_only(parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    let brand = parser.cursor().read_string(4)?;
    Ok(Payload::Json(json!({ "brand": brand })))
}

#[test]
fn test_default_registry_knows_core_boxes() {
    let registry = default_registry();
    for name in ["ftyp", "moov", "mvhd", "trak", "stbl", "stsd", "avc1", "mp4a", "ilst", "----"] {
        assert!(registry.lookup_name(name).is_some(), "missing {name}");
    }
    assert!(registry.lookup_name("zzzz").is_none());
    assert_eq!(
        registry.lookup(&FourCC(*b"mvhd")).map(|e| e.box_type),
        Some(BoxType::MovieHeader)
    );
}

#[test]
fn test_copyright_tags_resolve_without_prefix() {
    let registry = default_registry();
    let entry = registry.lookup(&FourCC([0xA9, b'n', b'a', b'm'])).unwrap();
    assert_eq!(entry.box_type, BoxType::ItemName);
    assert_eq!(FourCC([0xA9, b'n', b'a', b'm']).name(), "nam");

    let boxes = common::parse(atom(b"ilst", &text_item(&[0xA9, b'n', b'a', b'm'], "Green")));
    let item = &boxes[0].children()[0];
    assert_eq!(item.box_type(), Some(BoxType::ItemName));
    assert_eq!(item.payload.as_item().unwrap().key, "nam");
}

#[test]
fn test_custom_json_decoder() -> anyhow::Result<()> {
    let data = vec![
        0, 0, 0, 12, // size
        b't', b'e', b's', b't', // type
        0, 1, 2, 3, // payload
    ];
    let registry = Registry::built_in().with_decoder("test", BoxType::Custom("test"), decode_custom);
    let boxes = BoxParser::with_registry(Cursor::new(data), &registry)?.parse()?;

    assert_eq!(boxes.len(), 1);
    let b = &boxes[0];
    assert_eq!(b.tag().to_string(), "test");
    assert_eq!(b.box_type(), Some(BoxType::Custom("test")));

    let v = b.payload.as_json().expect("json payload");
    assert_eq!(v["foo"], "bar");
    assert_eq!(v["len"], 4);
    Ok(())
}

#[test]
fn test_registered_decoder_replaces_built_in() -> anyhow::Result<()> {
    let registry =
        Registry::built_in().with_decoder("ftyp", BoxType::FileType, decode_ftyp_brand_only);
    assert_eq!(registry.len(), default_registry().len());

    let boxes = BoxParser::with_registry(Cursor::new(ftyp()), &registry)?.parse()?;
    assert_eq!(boxes[0].payload.as_json().unwrap()["brand"], "M4V ");
    // the rest of the payload is skipped for the decoder
    assert_eq!(boxes[0].end(), ftyp().len() as u64);
    Ok(())
}

#[test]
fn test_empty_registry_leaves_everything_opaque() -> anyhow::Result<()> {
    let registry = Registry::new();
    assert!(registry.is_empty());

    let boxes = BoxParser::with_registry(Cursor::new(ftyp()), &registry)?.parse()?;
    assert_eq!(boxes.len(), 1);
    assert!(boxes[0].payload.is_opaque());
    assert_eq!(boxes[0].box_type(), None);
    Ok(())
}

#[test]
fn test_container_types() {
    for t in [BoxType::Movie, BoxType::Track, BoxType::SampleTable, BoxType::ItemList] {
        assert!(t.is_container(), "{t:?}");
    }
    for t in [BoxType::MovieHeader, BoxType::FileType, BoxType::Custom("test")] {
        assert!(!t.is_container(), "{t:?}");
    }
}
