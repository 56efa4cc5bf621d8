// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a saved floor plan snapshot into a 3D scene
//!
//! Usage:
//!   plan-to-scene <plan.json> [options]

use planview_floorplan::{
    assemble_scene, detect_plan_rooms, write_obj, Error, FloorPlan, PipelineConfig,
};
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Obj,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let plan_path = PathBuf::from(&args[1]);

    // Parse options
    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut format: Option<Format> = None;
    let mut detect = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(value(&args, i, "--config")));
            }
            "--output" | "-o" => {
                i += 1;
                output_path = Some(PathBuf::from(value(&args, i, "--output")));
            }
            "--format" => {
                i += 1;
                format = Some(match value(&args, i, "--format") {
                    "json" => Format::Json,
                    "obj" => Format::Obj,
                    other => fail(&format!("Unknown format '{}', expected json or obj", other)),
                });
            }
            "--detect-rooms" => {
                detect = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // An .obj output path implies OBJ
    let format = format.unwrap_or_else(|| match &output_path {
        Some(p) if p.extension().is_some_and(|e| e.eq_ignore_ascii_case("obj")) => Format::Obj,
        _ => Format::Json,
    });

    let config = PipelineConfig::load(config_path.as_deref())
        .unwrap_or_else(|e| fail(&format!("Cannot load config: {}", e)));

    let mut plan = FloorPlan::from_json_file(&plan_path)
        .unwrap_or_else(|e| fail(&format!("Cannot load plan: {}", e)));

    eprintln!("=== Floor Plan to Scene ===");
    eprintln!(
        "  Plan: {} corners, {} walls, {} rooms, {} doors, {} windows, {} furniture",
        plan.corners.len(),
        plan.walls.len(),
        plan.rooms.len(),
        plan.doors.len(),
        plan.windows.len(),
        plan.furniture.len()
    );

    if detect {
        let rooms = detect_plan_rooms(&mut plan, &config);
        eprintln!("  Detected rooms: {}", rooms);
    }

    let scene = assemble_scene(&plan, &config);

    let written = match format {
        Format::Json => write_output(output_path.as_deref(), |w| {
            serde_json::to_writer_pretty(&mut *w, &scene)?;
            writeln!(w).map_err(|source| io_error(output_path.as_deref(), source))
        }),
        Format::Obj => {
            let meshes = scene.to_meshes();
            eprintln!("  Triangles: {}", meshes.triangle_count());
            write_output(output_path.as_deref(), |w| {
                write_obj(w, &meshes).map_err(|source| io_error(output_path.as_deref(), source))
            })
        }
    };
    if let Err(e) = written {
        fail(&format!("Cannot write output: {}", e));
    }

    // Print summary
    let stats = scene.stats();
    eprintln!();
    eprintln!("=== Scene Summary ===");
    eprintln!(
        "  Bounds: {:.1} ft x {:.1} ft",
        scene.bounds.width, scene.bounds.depth
    );
    eprintln!("  Floors: {}", stats.floors);
    eprintln!(
        "  Walls: {} edges, {} segments, {} corner posts",
        stats.wall_edges, stats.wall_segments, stats.corner_posts
    );
    eprintln!(
        "  Openings: {} attached, {} free-standing",
        stats.attached_openings, stats.unattached_openings
    );
    eprintln!("  Furniture: {}", stats.furniture);
    if let Some(path) = &output_path {
        eprintln!();
        eprintln!("Done! Wrote {}", path.display());
    }
}

/// Write to the output file, or stdout when none was given
fn write_output(
    path: Option<&Path>,
    write: impl FnOnce(&mut dyn Write) -> Result<(), Error>,
) -> Result<(), Error> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|source| io_error(Some(path), source))?;
            let mut out = BufWriter::new(file);
            write(&mut out)?;
            out.flush().map_err(|source| io_error(Some(path), source))
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write(&mut out)
        }
    }
}

fn io_error(path: Option<&Path>, source: std::io::Error) -> Error {
    Error::Io {
        path: path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("<stdout>")),
        source,
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => fail(&format!("Missing value for {}", flag)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("plan-to-scene - derive a 3D scene from a floor plan snapshot");
    eprintln!();
    eprintln!("Usage: plan-to-scene <plan.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file>      Pipeline settings JSON (PLANVIEW_* env vars override)");
    eprintln!("  --output, -o <path>  Output file (default: stdout)");
    eprintln!("  --format <fmt>       json (scene description) or obj (meshes, Y-up, feet)");
    eprintln!("  --detect-rooms       Re-detect rooms from the wall graph before assembly");
    eprintln!();
    eprintln!("Logging follows RUST_LOG (default: info).");
}
