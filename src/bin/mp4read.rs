use anyhow::Context;
use clap::{ArgAction, Parser};
use mp4reader::discover::find_mp4_files;
use mp4reader::{BoxParser, Mp4Box, Mp4Summary, ReaderOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "MP4/M4V/M4A box tree and metadata reader")]
struct Args {
    /// Files, or directories to search for .mp4/.m4v/.m4a files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Emit the summary as JSON instead of human-readable text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Print the decoded box tree
    #[arg(long, action = ArgAction::SetTrue)]
    tree: bool,

    /// Boxes nested deeper than this are left undecoded
    #[arg(long, default_value_t = 64)]
    max_depth: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = ReaderOptions {
        max_depth: args.max_depth,
    };

    let files: Vec<PathBuf> = args.paths.iter().flat_map(|p| find_mp4_files(p)).collect();
    if files.is_empty() {
        tracing::warn!("no MP4 files found");
    }

    for path in &files {
        let boxes = read_boxes(path, options)?;
        if args.tree {
            println!("{}", path.display());
            for b in &boxes {
                print_tree(b);
            }
        }

        let summary = Mp4Summary::from_boxes(&boxes, None);
        if args.json {
            let mut value = serde_json::to_value(&summary)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("file".into(), path.display().to_string().into());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print_human(path, &summary);
        }
    }

    Ok(())
}

fn read_boxes(path: &Path, options: ReaderOptions) -> anyhow::Result<Vec<Mp4Box>> {
    let mut parser = BoxParser::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_options(options);
    parser
        .parse()
        .with_context(|| format!("reading {}", path.display()))
}

fn print_tree(root: &Mp4Box) {
    root.walk(&mut |b, depth| {
        let indent = "  ".repeat(depth);
        let name = b.box_type().map(|t| t.full_name()).unwrap_or("Unknown");
        let marker = match b.box_type() {
            Some(_) if b.payload.is_opaque() => " (undecoded)".to_string(),
            Some(t) if t.is_container() => format!(" [{} children]", b.children().len()),
            _ => String::new(),
        };
        println!(
            "{}{} size={} off={:#x} {}{}",
            indent,
            b.tag(),
            b.size(),
            b.start(),
            name,
            marker
        );
    });
}

fn print_human(path: &Path, s: &Mp4Summary) {
    println!("File: {}", path.display());
    if let Some(brand) = &s.major_brand {
        println!("Major brand: {}", brand);
    }
    if let Some(created) = s.creation_date {
        println!("Created: {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(sec) = s.duration_seconds {
        println!(
            "Movie duration: {} ticks @ {} -> {:.3} s",
            s.duration, s.timescale, sec
        );
    }

    if s.tracks.is_empty() {
        println!("Tracks: (none)");
    } else {
        println!("Tracks:");
    }
    for t in &s.tracks {
        println!("  Track {}:", t.id);
        println!("    type: {}", t.kind.as_str());
        if let Some(name) = &t.name {
            println!("    name: {}", name);
        }
        if let Some(codec) = &t.codec {
            println!("    codec: {}", codec);
        }
        if let Some(v) = &t.video {
            println!("    size: {}x{}", v.width, v.height);
            if !v.compressor_name.is_empty() {
                println!("    compressor: {}", v.compressor_name);
            }
        }
        if let Some(a) = &t.audio {
            println!("    channels: {}", a.channels);
            println!("    sample rate: {} Hz", a.sample_rate);
            if a.average_bit_rate > 0 {
                println!("    bit rate: {} kbit/s", a.average_bit_rate / 1000);
            }
            println!("    object type: {}", a.object_type.description());
        }
        if let Some(lang) = &t.language {
            println!("    language: {}", lang);
        }
        println!("    sample bytes: {}", t.total_sample_bytes);
    }

    if let Some(m) = &s.metadata {
        println!("Metadata:");
        let fields = [
            ("title", &m.title),
            ("show", &m.show),
            ("genre", &m.genre),
            ("tv show", &m.tv_show),
            ("copyright", &m.copyright),
            ("encoder", &m.encoding_tool),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                println!("  {}: {}", label, value);
            }
        }
        if let Some(date) = m.date {
            println!("  release date: {}", date.format("%Y-%m-%d"));
        }
        if !m.rating.label().is_empty() {
            println!("  rating: {}", m.rating.label());
        }
        if m.tv_season > 0 || m.tv_episode > 0 {
            println!("  season {} episode {}", m.tv_season, m.tv_episode);
        }
        if !m.cover.is_empty() {
            println!("  cover: {} bytes", m.cover.len());
        }
    }
}
