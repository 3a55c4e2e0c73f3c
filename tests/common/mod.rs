#![allow(dead_code)]

use mp4reader::{BoxParser, Mp4Box};
use std::io::Cursor;

/// Box with a 32-bit size header.
pub fn atom(tag: &[u8], payload: &[u8]) -> Vec<u8> {
    assert_eq!(tag.len(), 4, "tags are four bytes");
    let mut v = Vec::with_capacity(8 + payload.len());
    v.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
    v.extend_from_slice(tag);
    v.extend_from_slice(payload);
    v
}

/// Box whose payload opens with a version byte and 24-bit flags.
pub fn full_atom(tag: &[u8], version: u8, flags: u32, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![version];
    payload.extend_from_slice(&flags.to_be_bytes()[1..]);
    payload.extend_from_slice(body);
    atom(tag, &payload)
}

/// Container holding `children` back to back.
pub fn container(tag: &[u8], children: &[Vec<u8>]) -> Vec<u8> {
    atom(tag, &children.concat())
}

pub fn data_atom(type_indicator: u32, value: &[u8]) -> Vec<u8> {
    let mut body = vec![0u8; 4];
    body.extend_from_slice(value);
    full_atom(b"data", 0, type_indicator, &body)
}

pub fn text_item(tag: &[u8], text: &str) -> Vec<u8> {
    atom(tag, &data_atom(1, text.as_bytes()))
}

/// `----` item: `mean`, `name` then `data`.
pub fn freeform_item(key: &str, value: &str) -> Vec<u8> {
    container(
        b"----",
        &[
            full_atom(b"mean", 0, 0, b"com.apple.iTunes"),
            full_atom(b"name", 0, 0, key.as_bytes()),
            data_atom(1, value.as_bytes()),
        ],
    )
}

pub fn ftyp() -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(b"M4V ");
    p.extend_from_slice(&1u32.to_be_bytes());
    p.extend_from_slice(b"M4V M4A mp42isom");
    atom(b"ftyp", &p)
}

/// Version 0 `mvhd` with the full 100-byte payload.
pub fn mvhd(timescale: u32, duration: u32, next_track_id: i32) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&2_082_844_800u32.to_be_bytes());
    b.extend_from_slice(&timescale.to_be_bytes());
    b.extend_from_slice(&duration.to_be_bytes());
    b.extend_from_slice(&[0x00, 0x01, 0x00, 0x00]); // rate 1.0
    b.extend_from_slice(&[0x01, 0x00]); // volume 1.0
    b.extend_from_slice(&[0u8; 10]);
    b.extend_from_slice(&identity_matrix());
    b.extend_from_slice(&[0u8; 24]);
    b.extend_from_slice(&next_track_id.to_be_bytes());
    full_atom(b"mvhd", 0, 0, &b)
}

pub fn identity_matrix() -> Vec<u8> {
    let cells: [u32; 9] = [
        0x0001_0000,
        0,
        0,
        0,
        0x0001_0000,
        0,
        0,
        0,
        0x4000_0000,
    ];
    cells.iter().flat_map(|c| c.to_be_bytes()).collect()
}

/// Version 0 `tkhd` with an 84-byte payload.
pub fn tkhd(track_id: u32, duration: u32, width: u16, height: u16) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&track_id.to_be_bytes());
    b.extend_from_slice(&[0u8; 4]);
    b.extend_from_slice(&duration.to_be_bytes());
    b.extend_from_slice(&[0u8; 8]);
    b.extend_from_slice(&0i16.to_be_bytes()); // layer
    b.extend_from_slice(&0i16.to_be_bytes()); // alternate group
    b.extend_from_slice(&[0x01, 0x00]); // volume
    b.extend_from_slice(&[0u8; 2]);
    b.extend_from_slice(&identity_matrix());
    b.extend_from_slice(&((width as u32) << 16).to_be_bytes());
    b.extend_from_slice(&((height as u32) << 16).to_be_bytes());
    full_atom(b"tkhd", 0, 0x3, &b)
}

/// Version 0 `mdhd` with an English language code.
pub fn mdhd(timescale: u32, duration: u32) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&timescale.to_be_bytes());
    b.extend_from_slice(&duration.to_be_bytes());
    b.extend_from_slice(&0x15C7u16.to_be_bytes()); // "eng"
    b.extend_from_slice(&0i16.to_be_bytes());
    full_atom(b"mdhd", 0, 0, &b)
}

pub fn hdlr(handler_type: &[u8], name: &str) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(&[0u8; 4]);
    b.extend_from_slice(handler_type);
    b.extend_from_slice(&[0u8; 12]);
    b.extend_from_slice(name.as_bytes());
    b.push(0);
    full_atom(b"hdlr", 0, 0, &b)
}

/// `stsz` listing each sample size.
pub fn stsz(sizes: &[u32]) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&(sizes.len() as u32).to_be_bytes());
    for s in sizes {
        b.extend_from_slice(&s.to_be_bytes());
    }
    full_atom(b"stsz", 0, 0, &b)
}

/// `stsd` wrapping the given sample entries.
pub fn stsd(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut b = (entries.len() as u32).to_be_bytes().to_vec();
    b.extend_from_slice(&entries.concat());
    full_atom(b"stsd", 0, 0, &b)
}

/// `avc1` entry with a 78-byte visual header followed by `children`.
pub fn avc1(width: u16, height: u16, children: &[Vec<u8>]) -> Vec<u8> {
    let mut b = vec![0u8; 6];
    b.extend_from_slice(&1u16.to_be_bytes()); // data reference index
    b.extend_from_slice(&[0u8; 4]); // version, revision
    b.extend_from_slice(b"appl");
    b.extend_from_slice(&0u32.to_be_bytes());
    b.extend_from_slice(&512u32.to_be_bytes());
    b.extend_from_slice(&width.to_be_bytes());
    b.extend_from_slice(&height.to_be_bytes());
    b.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    b.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    b.extend_from_slice(&0i32.to_be_bytes());
    b.extend_from_slice(&1u16.to_be_bytes());
    let name = b"JVT/AVC Coding";
    b.push(name.len() as u8);
    b.extend_from_slice(name);
    b.extend_from_slice(&vec![0u8; 31 - name.len()]);
    b.extend_from_slice(&0x0018u16.to_be_bytes());
    b.extend_from_slice(&(-1i16).to_be_bytes());
    b.extend_from_slice(&children.concat());
    atom(b"avc1", &b)
}

/// Audio entry (`mp4a`, `ac-3`) with a 28-byte sound header.
pub fn audio_entry(tag: &[u8], channels: u16, rate: u16, children: &[Vec<u8>]) -> Vec<u8> {
    let mut b = vec![0u8; 6];
    b.extend_from_slice(&1u16.to_be_bytes());
    b.extend_from_slice(&[0u8; 4]);
    b.extend_from_slice(&[0u8; 4]);
    b.extend_from_slice(&channels.to_be_bytes());
    b.extend_from_slice(&16u16.to_be_bytes());
    b.extend_from_slice(&0i16.to_be_bytes());
    b.extend_from_slice(&0i16.to_be_bytes());
    b.extend_from_slice(&((rate as u32) << 16).to_be_bytes());
    b.extend_from_slice(&children.concat());
    atom(tag, &b)
}

/// AAC `esds`: object type 0x40, audio stream, two bytes of decoder config.
pub fn esds(average_bit_rate: u32) -> Vec<u8> {
    let mut b = Vec::new();
    // ES descriptor
    b.extend_from_slice(&[0x03, 0x80, 0x80, 0x80, 0x22, 0x00, 0x01, 0x00]);
    // decoder config
    b.extend_from_slice(&[0x04, 0x80, 0x80, 0x80, 0x14, 0x40, 0x15, 0x00, 0x03, 0x00]);
    b.extend_from_slice(&128_000u32.to_be_bytes());
    b.extend_from_slice(&average_bit_rate.to_be_bytes());
    // decoder specific info
    b.extend_from_slice(&[0x05, 0x80, 0x80, 0x80, 0x02, 0x12, 0x10]);
    // SL config
    b.extend_from_slice(&[0x06, 0x80, 0x80, 0x80, 0x01, 0x02]);
    full_atom(b"esds", 0, 0, &b)
}

pub fn parse(bytes: Vec<u8>) -> Vec<Mp4Box> {
    BoxParser::new(Cursor::new(bytes))
        .expect("create parser")
        .parse()
        .expect("parse")
}

/// Every box in the forest, depth first.
pub fn flatten(boxes: &[Mp4Box]) -> Vec<&Mp4Box> {
    let mut out = Vec::new();
    for b in boxes {
        b.walk(&mut |n, _| out.push(n));
    }
    out
}
