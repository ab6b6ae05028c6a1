//! World builder demo — builds a fixed-extent voxel world and walks a
//! viewer through it, reporting meshing statistics.
//!
//! Usage: cargo run --release --bin build_world -- [OPTIONS]
//!
//! Options:
//!   --render-distance <N>  LOD band width in chunks (default: 2)
//!   --height <N>           Vertical chunk count (default: 4)
//!   --seed <SEED>          Terrain seed (default: 12345)
//!   --jobs <N>             Max parallel chunk builds (default: all cores)
//!   --ticks <N>            Viewer steps to simulate, one chunk east each (default: 8)
//!   --json                 Emit a JSON summary on stdout

use std::time::Instant;

use glam::Vec3;
use serde_json::json;

use voxen::core::WorldConfig;
use voxen::terrain::{HeightfieldTerrain, TerrainParams};
use voxen::voxel::CHUNK_SIZE;
use voxen::world::WorldGrid;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let render_distance = parse_u32_arg(&args, "--render-distance").unwrap_or(2);
    let height = parse_u32_arg(&args, "--height").unwrap_or(4);
    let seed = parse_u32_arg(&args, "--seed").unwrap_or(12345);
    let jobs = parse_usize_arg(&args, "--jobs");
    let ticks = parse_u32_arg(&args, "--ticks").unwrap_or(8);
    let emit_json = args.iter().any(|a| a == "--json");

    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .expect("Failed to configure thread pool");
    }

    let config = WorldConfig {
        render_distance,
        world_height: height,
        center_offset: [0, 0],
        terrain: TerrainParams {
            seed,
            ..TerrainParams::default()
        },
    };
    let terrain = HeightfieldTerrain::new(config.terrain.clone());

    println!("=== Voxen World Builder ===");
    println!("Render distance: {} chunks per band", render_distance);
    println!("Height: {} chunks", height);
    println!("Seed: {}", seed);
    println!();

    let build_start = Instant::now();
    let mut grid = WorldGrid::create(&config, &terrain).expect("world creation failed");
    let build_secs = build_start.elapsed().as_secs_f32();

    let initial_faces: u64 = grid
        .chunks()
        .filter_map(|c| c.mesh())
        .map(|m| m.record_count() as u64)
        .sum();
    println!(
        "Built {} chunks ({} populated) in {:.2}s, {} faces",
        grid.chunk_count(),
        grid.populated_count(),
        build_secs,
        initial_faces
    );

    // Walk the viewer east one chunk per step and let the grid re-LOD
    let tick_start = Instant::now();
    let eye_height = (height * CHUNK_SIZE as u32) as f32;
    for step in 0..ticks {
        let viewer = Vec3::new(
            (step as i32 * CHUNK_SIZE) as f32 + 8.0,
            eye_height,
            8.0,
        );
        grid.tick(viewer);
    }
    let tick_secs = tick_start.elapsed().as_secs_f32();

    let final_faces: u64 = grid
        .chunks()
        .filter_map(|c| c.mesh())
        .map(|m| m.record_count() as u64)
        .sum();
    let last_viewer = Vec3::new(
        ((ticks.max(1) - 1) as i32 * CHUNK_SIZE) as f32 + 8.0,
        eye_height,
        8.0,
    );
    let drawn = grid.visible_chunks(last_viewer, Vec3::X).count();

    println!(
        "Ticked {} viewer steps in {:.2}s: {} chunks remeshed, {} faces now, {} drawn looking east",
        ticks,
        tick_secs,
        grid.remesh_count(),
        final_faces,
        drawn
    );

    if emit_json {
        let summary = json!({
            "render_distance": render_distance,
            "height": height,
            "seed": seed,
            "chunks": grid.chunk_count(),
            "populated": grid.populated_count(),
            "build_seconds": build_secs,
            "ticks": ticks,
            "tick_seconds": tick_secs,
            "remeshed": grid.remesh_count(),
            "faces": final_faces,
            "drawn": drawn,
        });
        println!("{}", summary);
    }
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}
