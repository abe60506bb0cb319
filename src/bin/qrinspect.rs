use clap::{Parser, Subcommand};
use qr_inspect::tools::{draw_outline, list_images, load_rgba, save_rgba};
use qr_inspect::{CornerSet, Inspector, Point, ScanResult, SymbolLocator, read_format};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const OUTLINE_COLOR: [u8; 4] = [0xFF, 0x3B, 0x58, 0xFF];
const HEX_DUMP_BYTES: usize = 64;

#[derive(Parser)]
#[command(name = "qrinspect", version, about = "QR code structure inspector")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode one image and report payload and format information
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Write a copy of the image with the symbol outlined
        #[arg(long)]
        annotate: Option<PathBuf>,
    },
    /// Read only the format information from hand-supplied corners
    Format {
        #[arg(long)]
        image: PathBuf,
        /// x0,y0,x1,y1,x2,y2,x3,y3 clockwise from top-left
        #[arg(long)]
        corners: String,
        #[arg(long)]
        version: usize,
    },
    /// Scan a directory of frames in name order, stop at the first symbol
    Frames {
        #[arg(long)]
        dir: PathBuf,
    },
    /// Scan every image in a directory in parallel
    Batch {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Scan {
            image,
            json,
            annotate,
        } => scan_cmd(&image, json, annotate.as_deref()),
        Command::Format {
            image,
            corners,
            version,
        } => format_cmd(&image, &corners, version),
        Command::Frames { dir } => frames_cmd(&dir),
        Command::Batch { dir, json } => batch_cmd(&dir, json),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn scan_cmd(image: &Path, json: bool, annotate: Option<&Path>) -> bool {
    let (mut pixels, width, height) = match load_rgba(image) {
        Ok(loaded) => loaded,
        Err(err) => {
            log::error!("{err}");
            return false;
        }
    };

    let result = match Inspector::new().inspect(&pixels, width, height) {
        Ok(Some(result)) => result,
        Ok(None) => {
            println!("No QR code found in {}", image.display());
            return false;
        }
        Err(err) => {
            log::error!("{err}");
            return false;
        }
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                log::error!("cannot serialize result: {err}");
                return false;
            }
        }
    } else {
        println!("Image: {} ({}x{})", image.display(), width, height);
        print_report(&result);
    }

    if let Some(out) = annotate {
        draw_outline(&mut pixels, width, height, &result.corners, OUTLINE_COLOR, 4);
        if let Err(err) = save_rgba(out, &pixels, width, height) {
            log::error!("{err}");
            return false;
        }
        log::info!("wrote annotated image to {}", out.display());
    }
    true
}

fn print_report(r: &ScanResult) {
    println!("Payload:      {}", r.text);
    println!(
        "Version:      {} ({}x{} modules)",
        r.version, r.dimension, r.dimension
    );
    println!("EC level:     {} - {}", r.ec_level, r.ec_level.description());
    println!("Mask:         {}", r.mask_pattern);
    for line in r.mask_pattern.preview(8).to_text('#', '.').lines() {
        println!("              {line}");
    }
    println!(
        "Encoding:     {} ({} chunk(s))",
        r.primary_encoding(),
        r.chunks.len()
    );
    println!("Module size:  ~{:.2} px", r.module_size_px);
    println!("Total bytes:  {}", r.bytes.len());
    println!(
        "Format bits:  0b{:015b} (distance {}, source {:?})",
        r.format_bits, r.format_distance, r.format_source
    );
    println!("Chunks:");
    for chunk in &r.chunks {
        println!("  [{}] {}", chunk.kind, chunk.text);
    }
    println!("Hex dump (first {HEX_DUMP_BYTES} bytes):");
    println!("  {}", r.hex_dump(HEX_DUMP_BYTES));
}

fn parse_corners(text: &str) -> Option<CornerSet> {
    let vals: Vec<f32> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f32>().ok())
        .collect::<Option<_>>()?;
    if vals.len() != 8 {
        return None;
    }
    let pts: Vec<Point> = vals.chunks(2).map(|c| Point::new(c[0], c[1])).collect();
    Some(CornerSet::new(pts[0], pts[1], pts[2], pts[3]))
}

fn format_cmd(image: &Path, corners: &str, version: usize) -> bool {
    let Some(corners) = parse_corners(corners) else {
        log::error!("--corners needs 8 comma separated numbers");
        return false;
    };
    let (pixels, width, height) = match load_rgba(image) {
        Ok(loaded) => loaded,
        Err(err) => {
            log::error!("{err}");
            return false;
        }
    };

    match read_format(&pixels, width, height, corners, version) {
        Ok(info) => {
            println!("Image: {} ({}x{})", image.display(), width, height);
            println!("EC level:     {} - {}", info.ec_level, info.ec_level.description());
            println!("Mask:         {}", info.mask_pattern);
            println!(
                "Format bits:  0b{:015b} (distance {}, {} module(s) outside image)",
                info.raw_bits, info.distance, info.clipped
            );
            true
        }
        Err(err) => {
            log::error!("{err}");
            false
        }
    }
}

fn frames_cmd(dir: &Path) -> bool {
    let paths = list_images(dir);
    match scan_frames(&Inspector::new(), &paths, |path| load_rgba(path)) {
        Some((idx, result)) => {
            println!("Found symbol in frame {idx} ({})", paths[idx].display());
            print_report(&result);
            true
        }
        None => {
            println!("No QR code found in {} frame(s)", paths.len());
            false
        }
    }
}

/// Load and inspect frames in order until one holds a symbol.
///
/// The index is the position in `paths`; frames that fail to load are
/// skipped but still counted.
fn scan_frames<L, F>(
    inspector: &Inspector<L>,
    paths: &[PathBuf],
    mut load: F,
) -> Option<(usize, ScanResult)>
where
    L: SymbolLocator,
    F: FnMut(&Path) -> qr_inspect::Result<(Vec<u8>, usize, usize)>,
{
    for (idx, path) in paths.iter().enumerate() {
        let (pixels, width, height) = match load(path) {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("frame {idx} skipped: {err}");
                continue;
            }
        };
        match inspector.inspect(&pixels, width, height) {
            Ok(Some(result)) => return Some((idx, result)),
            Ok(None) => {}
            Err(err) => log::warn!("frame {idx} skipped: {err}"),
        }
    }
    None
}

fn batch_cmd(dir: &Path, json: bool) -> bool {
    let paths = list_images(dir);
    let inspector = Inspector::new();

    let results: Vec<(PathBuf, Option<ScanResult>)> = paths
        .par_iter()
        .map(|path| {
            let result = load_rgba(path)
                .and_then(|(pixels, w, h)| inspector.inspect(&pixels, w, h))
                .unwrap_or_else(|err| {
                    log::warn!("{err}");
                    None
                });
            (path.clone(), result)
        })
        .collect();

    let found = results.iter().filter(|(_, r)| r.is_some()).count();
    if json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|(path, r)| serde_json::json!({ "image": path.display().to_string(), "result": r }))
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                log::error!("cannot serialize results: {err}");
                return false;
            }
        }
    } else {
        for (path, r) in &results {
            match r {
                Some(r) => println!(
                    "{}: v{} {} mask {} raw 0x{:04X} \"{}\"",
                    path.display(),
                    r.version,
                    r.ec_level,
                    r.mask_pattern,
                    r.format_bits,
                    r.text
                ),
                None => println!("{}: no symbol", path.display()),
            }
        }
        println!("{found}/{} image(s) decoded", results.len());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_inspect::{InspectError, LocatedSymbol, RgbaView};

    #[test]
    fn test_parse_corners() {
        let c = parse_corners("10,10,200,10,200,200,10,200").expect("8 values");
        assert_eq!(c.bottom_right.x, 200.0);
        assert_eq!(c.bottom_left.y, 200.0);
        assert!(parse_corners("1,2,3").is_none());
        assert!(parse_corners("1,2,3,4,5,6,7,x").is_none());
    }

    #[test]
    fn test_scan_frames_counts_unreadable_frames() {
        let corners = CornerSet::new(
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(8.0, 8.0),
            Point::new(0.0, 8.0),
        );
        // a symbol only in all-dark frames
        let locator = move |view: RgbaView<'_>| {
            (view.rgb(0, 0) == Some([0, 0, 0])).then(|| LocatedSymbol {
                text: "hit".into(),
                bytes: b"hit".to_vec(),
                chunks: Vec::new(),
                version: 1,
                corners,
                format_hint: None,
            })
        };
        let inspector = Inspector::with_locator(locator);
        let paths: Vec<PathBuf> = ["a.png", "b.png", "c.png", "d.png"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let found = scan_frames(&inspector, &paths, |path| {
            let name = path.to_string_lossy();
            if name == "a.png" {
                Err(InspectError::EmptyImage {
                    width: 0,
                    height: 0,
                })
            } else if name == "b.png" {
                Ok((vec![255u8; 8 * 8 * 4], 8, 8))
            } else {
                Ok((vec![0u8; 8 * 8 * 4], 8, 8))
            }
        });
        let (idx, result) = found.expect("dark frame holds a symbol");
        assert_eq!(idx, 2);
        assert_eq!(result.text, "hit");

        assert!(scan_frames(&inspector, &paths[..2], |_| Ok((vec![255u8; 16], 2, 2))).is_none());
    }
}
