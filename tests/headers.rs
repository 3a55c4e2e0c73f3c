mod common;

use chrono::{TimeZone, Utc};
use common::{full_atom, mdhd, mvhd, parse, tkhd};
use mp4reader::decoders::MEDIA_HEADER_WIDTHS;
use mp4reader::util::date_from_mac_seconds;

fn padded(body: Vec<u8>, len: usize) -> Vec<u8> {
    let mut body = body;
    body.resize(len, 0);
    body
}

#[test]
fn test_mac_epoch_dates() {
    assert_eq!(
        date_from_mac_seconds(0),
        Some(Utc.with_ymd_and_hms(1904, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        date_from_mac_seconds(2_082_844_800),
        Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(date_from_mac_seconds(u64::MAX), None);
}

#[test]
fn test_mvhd_full_payload() {
    let boxes = parse(mvhd(600, 1200, 3));
    let h = boxes[0].payload.as_movie_header().expect("mvhd");

    assert_eq!(h.version, 0);
    assert_eq!(h.timescale, 600);
    assert_eq!(h.duration, 1200);
    assert_eq!(h.duration_seconds(), Some(2.0));
    assert_eq!(
        h.creation_date(),
        Some(Utc.with_ymd_and_hms(1904, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        h.modification_date(),
        Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
    );

    let p = h.presentation.as_ref().expect("presentation fields");
    assert_eq!(p.playback_speed, 1.0);
    assert_eq!(p.user_volume, 1.0);
    assert_eq!(p.matrix.width_scale, 1.0);
    assert_eq!(p.matrix.divider_scale, 16384.0);
    assert_eq!(p.next_track_id, 3);
}

#[test]
fn test_mvhd_96_byte_payload_is_narrow() {
    let mut body = Vec::new();
    body.extend_from_slice(&7u32.to_be_bytes()); // creation
    body.extend_from_slice(&8u32.to_be_bytes()); // modification
    body.extend_from_slice(&1000u32.to_be_bytes()); // timescale
    body.extend_from_slice(&5000u32.to_be_bytes()); // duration
    let boxes = parse(full_atom(b"mvhd", 0, 0, &padded(body, 92)));

    assert_eq!(boxes[0].envelope.payload_size(), 96);
    let h = boxes[0].payload.as_movie_header().expect("mvhd");
    assert_eq!(h.creation_time, 7);
    assert_eq!(h.modification_time, 8);
    assert_eq!(h.timescale, 1000);
    assert_eq!(h.duration, 5000);
    assert!(h.presentation.is_none());
}

#[test]
fn test_mvhd_108_byte_payload_is_wide_under_version_0() {
    let mut body = Vec::new();
    body.extend_from_slice(&0x1_0000_0000u64.to_be_bytes()); // creation
    body.extend_from_slice(&0x1_0000_0001u64.to_be_bytes()); // modification
    body.extend_from_slice(&90_000u32.to_be_bytes()); // timescale
    body.extend_from_slice(&0x2_0000_0000u64.to_be_bytes()); // duration
    let boxes = parse(full_atom(b"mvhd", 0, 0, &padded(body, 104)));

    assert_eq!(boxes[0].envelope.payload_size(), 108);
    let h = boxes[0].payload.as_movie_header().expect("mvhd");
    assert_eq!(h.creation_time, 0x1_0000_0000);
    assert_eq!(h.modification_time, 0x1_0000_0001);
    assert_eq!(h.timescale, 90_000);
    assert_eq!(h.duration, 0x2_0000_0000);
    assert!(h.presentation.is_none());
}

#[test]
fn test_tkhd_fields() {
    let boxes = parse(tkhd(2, 5000, 1920, 1080));
    let h = boxes[0].payload.as_track_header().expect("tkhd");

    assert_eq!(h.flags, 0x3);
    assert!(h.is_enabled());
    assert_eq!(h.track_id, 2);
    assert_eq!(h.duration, 5000);
    assert_eq!(h.frame_size(), (1920, 1080));

    let p = h.presentation.as_ref().unwrap();
    assert_eq!(p.layer, 0);
    assert_eq!(p.volume, 1.0);
    assert_eq!(p.matrix.height_scale, 1.0);
}

#[test]
fn test_tkhd_version_1() {
    let mut body = Vec::new();
    body.extend_from_slice(&1u64.to_be_bytes());
    body.extend_from_slice(&2u64.to_be_bytes());
    body.extend_from_slice(&9u32.to_be_bytes()); // track id
    body.extend_from_slice(&[0u8; 4]);
    body.extend_from_slice(&0x3_0000_0000u64.to_be_bytes());
    let boxes = parse(full_atom(b"tkhd", 1, 0, &body));

    let h = boxes[0].payload.as_track_header().expect("tkhd");
    assert_eq!(h.version, 1);
    assert_eq!(h.track_id, 9);
    assert_eq!(h.duration, 0x3_0000_0000);
    assert!(h.presentation.is_none());
    assert_eq!(h.frame_size(), (0, 0));
}

#[test]
fn test_mdhd_language() {
    let boxes = parse(mdhd(44_100, 88_200));
    let h = boxes[0].payload.as_media_header().expect("mdhd");
    assert_eq!(h.timescale, 44_100);
    assert_eq!(h.duration, 88_200);
    assert_eq!(h.language, "eng");
}

#[test]
fn test_mdhd_version_1() {
    let mut body = Vec::new();
    body.extend_from_slice(&0u64.to_be_bytes());
    body.extend_from_slice(&0u64.to_be_bytes());
    body.extend_from_slice(&48_000u32.to_be_bytes());
    body.extend_from_slice(&0x1_0000_0000u64.to_be_bytes());
    body.extend_from_slice(&0u16.to_be_bytes()); // language unset
    body.extend_from_slice(&0i16.to_be_bytes());
    let boxes = parse(full_atom(b"mdhd", 1, 0, &body));

    let h = boxes[0].payload.as_media_header().expect("mdhd");
    assert_eq!(h.duration, 0x1_0000_0000);
    assert_eq!(h.language, "und");
}

#[test]
fn test_mdhd_version_1_short_payload_reads_wide_fields() {
    // 36-byte payload: too small for the size rule, wide because of the version
    assert!(!MEDIA_HEADER_WIDTHS.wide_timestamps(0, 36));
    assert!(MEDIA_HEADER_WIDTHS.wide_timestamps(1, 36));
    assert!(MEDIA_HEADER_WIDTHS.wide_duration(1, 36));

    let mut body = Vec::new();
    body.extend_from_slice(&0x1_0000_0001u64.to_be_bytes());
    body.extend_from_slice(&0x1_0000_0002u64.to_be_bytes());
    body.extend_from_slice(&600u32.to_be_bytes());
    body.extend_from_slice(&7_200u64.to_be_bytes());
    body.extend_from_slice(&0x15C7u16.to_be_bytes());
    body.extend_from_slice(&0i16.to_be_bytes());
    let data = full_atom(b"mdhd", 1, 0, &body);
    let len = data.len() as u64;
    let boxes = parse(data);

    assert_eq!(boxes[0].envelope.payload_size(), 36);
    assert_eq!(boxes[0].end(), len);
    let h = boxes[0].payload.as_media_header().expect("mdhd");
    assert_eq!(h.version, 1);
    assert_eq!(h.creation_time, 0x1_0000_0001);
    assert_eq!(h.modification_time, 0x1_0000_0002);
    assert_eq!(h.timescale, 600);
    assert_eq!(h.duration, 7_200);
    assert_eq!(h.language, "eng");
}
