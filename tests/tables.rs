mod common;

use common::{container, ftyp, full_atom, parse, stsz};
use mp4reader::BoxType;

fn words(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn sample_table() -> Vec<u8> {
    let stts = full_atom(b"stts", 0, 0, &words(&[2, 100, 1024, 1, 512]));
    let stsc = full_atom(b"stsc", 0, 0, &words(&[1, 1, 10, 1]));
    let stco = full_atom(b"stco", 0, 0, &words(&[2, 48, 4096]));
    let mut co64_body = 1u32.to_be_bytes().to_vec();
    co64_body.extend_from_slice(&0x1_0000_0000u64.to_be_bytes());
    let co64 = full_atom(b"co64", 0, 0, &co64_body);
    let stss = full_atom(b"stss", 0, 0, &words(&[2, 1, 31]));
    let mut ctts_body = words(&[2, 5, 1024, 1]);
    ctts_body.extend_from_slice(&(-512i32).to_be_bytes());
    let ctts = full_atom(b"ctts", 1, 0, &ctts_body);

    container(
        b"stbl",
        &[stts, stsc, stsz(&[1000, 2000, 3000]), stco, co64, stss, ctts],
    )
}

#[test]
fn test_sample_table_children() {
    let boxes = parse(sample_table());
    let stbl = boxes[0].payload.as_sample_table().expect("stbl");
    assert_eq!(boxes[0].children().len(), 7);

    let stts = stbl.time_to_sample().unwrap();
    assert_eq!(stts.entry_count, 2);
    assert_eq!(stts.entries[0].sample_count, 100);
    assert_eq!(stts.entries[0].sample_delta, 1024);
    assert_eq!(stts.entries[1].sample_delta, 512);
    assert!(stts.is_variable());
    assert_eq!(stts.total_samples(), 101);
    assert_eq!(stts.total_duration(), 100 * 1024 + 512);

    let stsc = stbl.sample_to_chunk().unwrap();
    assert_eq!(stsc.entries.len(), 1);
    assert_eq!(stsc.entries[0].first_chunk, 1);
    assert_eq!(stsc.entries[0].samples_per_chunk, 10);
    assert_eq!(stsc.entries[0].sample_description_index, 1);

    let stsz = stbl.sample_size().unwrap();
    assert_eq!(stsz.sample_count, 3);
    assert_eq!(stsz.sample_sizes, vec![1000, 2000, 3000]);
    assert_eq!(stsz.size_of(1), Some(2000));
    assert_eq!(stsz.size_of(3), None);
    assert_eq!(stbl.total_sample_bytes(), 6000);

    assert_eq!(stbl.chunk_offsets().unwrap().chunk_offsets, vec![48, 4096]);
    assert_eq!(
        stbl.chunk_offsets64().unwrap().chunk_offsets,
        vec![0x1_0000_0000]
    );
    assert_eq!(stbl.sync_samples().unwrap().sample_numbers, vec![1, 31]);

    let ctts = stbl.composition_offsets().unwrap();
    assert_eq!(ctts.version, 1);
    assert_eq!(ctts.entries[0].sample_offset, 1024);
    assert_eq!(ctts.entries[1].sample_offset, -512);
}

#[test]
fn test_stsz_shared_size() {
    let boxes = parse(full_atom(b"stsz", 0, 0, &words(&[512, 4])));
    let stsz = boxes[0].payload.as_sample_size().unwrap();
    assert!(stsz.sample_sizes.is_empty());
    assert_eq!(stsz.total_size, 2048);
    assert_eq!(stsz.size_of(3), Some(512));
    assert_eq!(stsz.size_of(4), None);
}

#[test]
fn test_ctts_version_0_is_unsigned() {
    let boxes = parse(full_atom(b"ctts", 0, 0, &words(&[1, 1, 0xFFFF_FFFF])));
    let ctts = boxes[0].payload.as_composition_offset().unwrap();
    assert_eq!(ctts.entries[0].sample_offset, 0xFFFF_FFFF);
}

#[test]
fn test_entry_count_beyond_payload_is_opaque() {
    // claims 1000 entries but carries one
    let stts = full_atom(b"stts", 0, 0, &words(&[1000, 1, 1024]));
    let mut data = stts.clone();
    data.extend_from_slice(&ftyp());

    let boxes = parse(data);
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].box_type(), Some(BoxType::TimeToSample));
    assert!(boxes[0].payload.is_opaque());
    assert_eq!(boxes[0].end(), stts.len() as u64);
    assert!(boxes[1].payload.as_file_type().is_some());
}

#[test]
fn test_ftyp_brands() {
    let boxes = parse(ftyp());
    let f = boxes[0].payload.as_file_type().unwrap();
    assert_eq!(f.major_brand, "M4V ");
    assert_eq!(f.minor_version, 1);
    assert_eq!(f.compatible_brands, vec!["M4V ", "M4A ", "mp42", "isom"]);
    assert!(f.is_compatible_with("mp42"));
    assert!(!f.is_compatible_with("qt  "));
}

#[test]
fn test_chap_lists_track_ids() {
    let chap = common::atom(b"chap", &words(&[3, 4]));
    let boxes = parse(container(b"tref", &[chap]));
    let tref = boxes[0].payload.as_track_reference().unwrap();
    assert_eq!(tref.chapters().unwrap().track_ids, vec![3, 4]);
}

#[test]
fn test_stts_totals_saturate() {
    let stts = full_atom(b"stts", 0, 0, &words(&[2, u32::MAX, u32::MAX, u32::MAX, u32::MAX]));
    let boxes = parse(stts);
    let t = boxes[0].payload.as_time_to_sample().expect("stts");

    assert_eq!(t.entries.len(), 2);
    assert_eq!(t.total_duration(), u64::MAX);
    assert_eq!(t.total_samples(), 2 * u32::MAX as u64);
}
