mod common;

use common::{
    atom, audio_entry, avc1, container, esds, ftyp, full_atom, hdlr, mdhd, mvhd, stsd, stsz,
    text_item, tkhd,
};
use mp4reader::decoders::TrackKind;
use mp4reader::discover::find_mp4_files;
use mp4reader::{Mp4Summary, parse_file};
use std::fs;

fn track(header: Vec<u8>, handler: &[u8], entry: Vec<u8>, sizes: &[u32], extra: &[Vec<u8>]) -> Vec<u8> {
    let stbl = container(b"stbl", &[stsd(&[entry]), stsz(sizes)]);
    let minf = container(b"minf", &[stbl]);
    let mdia = container(b"mdia", &[mdhd(1000, 2000), hdlr(handler, "Handler"), minf]);
    let mut children = vec![header, mdia];
    children.extend_from_slice(extra);
    container(b"trak", &children)
}

fn sample_file() -> Vec<u8> {
    let video = track(
        tkhd(2, 2000, 1920, 1080),
        b"vide",
        avc1(1920, 1080, &[]),
        &[100, 200],
        &[],
    );
    let audio = track(
        tkhd(1, 2000, 0, 0),
        b"soun",
        audio_entry(b"mp4a", 2, 44_100, &[esds(128_000)]),
        &[10, 20, 30],
        &[container(b"udta", &[atom(b"name", b"Stereo")])],
    );
    let duplicate = track(
        tkhd(1, 10, 0, 0),
        b"soun",
        audio_entry(b"mp4a", 6, 48_000, &[]),
        &[1],
        &[],
    );

    let ilst = container(b"ilst", &[text_item(&[0xA9, b'n', b'a', b'm'], "Green")]);
    let meta = full_atom(b"meta", 0, 0, &[hdlr(b"mdir", ""), ilst].concat());
    let udta = container(b"udta", &[meta]);

    let mut data = ftyp();
    data.extend_from_slice(&container(
        b"moov",
        &[mvhd(1000, 2000, 3), video, audio, duplicate, udta],
    ));
    data.extend_from_slice(&atom(b"mdat", &[0u8; 16]));
    data
}

#[test]
fn test_summary_fields() {
    let boxes = common::parse(sample_file());
    let s = Mp4Summary::from_boxes(&boxes, None);

    assert_eq!(s.major_brand.as_deref(), Some("M4V "));
    assert_eq!(s.timescale, 1000);
    assert_eq!(s.duration_seconds, Some(2.0));

    let ids: Vec<u32> = s.tracks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let audio = &s.tracks[0];
    assert_eq!(audio.kind, TrackKind::Audio);
    assert_eq!(audio.name.as_deref(), Some("Stereo"));
    assert_eq!(audio.codec.as_deref(), Some("mp4a"));
    assert_eq!(audio.language.as_deref(), Some("eng"));
    assert_eq!(audio.total_sample_bytes, 60);
    let a = audio.audio.as_ref().expect("audio details");
    assert_eq!(a.channels, 2.0);
    assert_eq!(a.sample_rate, 44_100);
    assert_eq!(a.average_bit_rate, 128_000);

    let video = &s.tracks[1];
    assert_eq!(video.kind, TrackKind::Video);
    assert_eq!(video.codec.as_deref(), Some("avc1"));
    assert_eq!(video.total_sample_bytes, 300);
    let v = video.video.as_ref().expect("video details");
    assert_eq!((v.width, v.height), (1920, 1080));
    assert_eq!((v.frame_width, v.frame_height), (1920, 1080));
    assert_eq!(v.compressor_name, "JVT/AVC Coding");
    assert!(video.audio.is_none());

    let meta = s.metadata.as_ref().expect("ilst metadata");
    assert_eq!(meta.title, "Green");
}

#[test]
fn test_summary_and_tree_serialize() -> anyhow::Result<()> {
    let boxes = common::parse(sample_file());
    let summary = serde_json::to_value(Mp4Summary::from_boxes(&boxes, None))?;
    assert_eq!(summary["major_brand"], "M4V ");
    assert_eq!(summary["tracks"][0]["kind"], "audio");
    assert_eq!(summary["tracks"][1]["video"]["width"], 1920);
    assert_eq!(summary["metadata"]["title"], "Green");

    let tree = serde_json::to_value(&boxes)?;
    assert_eq!(tree[1]["tag"], "moov");
    assert_eq!(tree[1]["payload"]["kind"], "movie");
    assert_eq!(tree[2]["payload"]["kind"], "media_data");
    Ok(())
}

#[test]
fn test_empty_input_summary() {
    let s = Mp4Summary::from_boxes(&[], None);
    assert_eq!(s.major_brand, None);
    assert!(s.tracks.is_empty());
    assert!(s.metadata.is_none());
    assert_eq!(s.duration_seconds, None);
}

#[test]
fn test_parse_file_and_discovery() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("mp4reader-test-{}", std::process::id()));
    fs::create_dir_all(dir.join("nested"))?;
    let movie = dir.join("nested").join("Green.M4V");
    fs::write(&movie, sample_file())?;
    fs::write(dir.join("notes.txt"), b"not a movie")?;

    let found = find_mp4_files(&dir);
    let boxes = parse_file(&movie);
    fs::remove_dir_all(&dir)?;

    assert_eq!(found, vec![movie.clone()]);
    assert_eq!(find_mp4_files(&movie), vec![movie]);
    let boxes = boxes?;
    assert_eq!(boxes.len(), 3);
    assert_eq!(Mp4Summary::from_boxes(&boxes, None).tracks.len(), 2);
    Ok(())
}
