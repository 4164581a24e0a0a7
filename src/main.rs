//! `ctm`: loads block models and a scene, then meshes or inspects them.

mod assets;
mod config;
mod error;
mod logging;
mod report;
mod scene;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use ctm_blocks::ItemStack;
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use ctm_model::{BakedModel, BakedModelLayer, Quad, build_grid_meshes, position_seed};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::Assets;
use crate::error::{ConfigError, Result};

#[derive(Parser, Debug)]
#[command(name = "ctm", about = "Connected-texture block models: mesh and inspect scenes")]
struct Cli {
    /// Directory holding `assets/voxels/*.toml`.
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Scene file; defaults to `assets/scene.toml` under the assets root.
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Re-run whenever the assets or scene change.
    #[arg(long)]
    watch: bool,
    /// Also log (at debug level) to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mesh every chunk of the scene and print per-chunk statistics.
    Mesh {
        /// Overrides the scene seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show quadrant connections and emitted quads of one block.
    Inspect {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
        /// Only this face (up, down, north, south, west, east).
        #[arg(long)]
        face: Option<String>,
    },
    /// Print the item quads of a block's model.
    Item { block: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    let root = assets::resolve_assets_root(cli.assets.clone());
    let scene_file = cli
        .scene
        .clone()
        .unwrap_or_else(|| assets::scene_path(&root));
    let changes = cli
        .watch
        .then(|| watch::spawn_watcher(vec![assets::voxels_dir(&root), scene_file.clone()]));

    loop {
        if let Err(e) = run(&cli.cmd, &root, &scene_file) {
            log::error!("{}", e);
            if changes.is_none() {
                return ExitCode::FAILURE;
            }
        }
        let Some(rx) = &changes else {
            return ExitCode::SUCCESS;
        };
        log::info!("watching {:?} for changes", root);
        if !watch::wait_for_change(rx) {
            return ExitCode::SUCCESS;
        }
        log::info!("change detected; reloading");
    }
}

fn run(cmd: &Command, root: &std::path::Path, scene_file: &std::path::Path) -> Result<()> {
    let t0 = Instant::now();
    let assets = Assets::load(root)?;
    match cmd {
        Command::Mesh { seed } => {
            let scene = scene::load_scene(scene_file, &assets.registry)?;
            let seed = seed.unwrap_or(scene.seed);
            let meshes = build_grid_meshes(&scene.grid, &assets.registry, &assets.models, seed);
            print!("{}", report::mesh_summary(&meshes, &assets.registry));
            log::info!("meshed {} chunks in {:?}", meshes.len(), t0.elapsed());
        }
        Command::Inspect { x, y, z, face } => {
            let scene = scene::load_scene(scene_file, &assets.registry)?;
            let faces = match face {
                Some(name) => vec![
                    Face::from_name(name).ok_or_else(|| ConfigError::UnknownFace(name.clone()))?,
                ],
                None => Face::ALL.to_vec(),
            };
            inspect(&assets, &scene, BlockPos::new(*x, *y, *z), &faces);
        }
        Command::Item { block } => {
            let b = assets
                .registry
                .make_block_by_name(block, None)
                .ok_or_else(|| ConfigError::UnknownBlock(block.clone()))?;
            let Some(model) = assets.models.get(b.id) else {
                println!("{block}: no model");
                return Ok(());
            };
            let mut quads: Vec<Quad> = Vec::new();
            let mut rng = StdRng::seed_from_u64(42);
            model.emit_item_quads(&ItemStack::of(b), &mut rng, &mut quads);
            println!("{block}: {} item quads", quads.len());
            for q in &quads {
                println!("  {}", report::quad(q, &assets.registry));
            }
        }
    }
    Ok(())
}

fn inspect(assets: &Assets, scene: &scene::Scene, pos: BlockPos, faces: &[Face]) {
    let reg = &assets.registry;
    let block = scene.grid.block_at(pos);
    println!("{} at {} (state {})", reg.name_of(block.id), pos, block.state);
    let Some(model) = assets.layered.get(&block.id) else {
        println!("  no model");
        return;
    };
    for (i, layer) in model.layers().iter().enumerate() {
        for &face in faces {
            if let Some(c) = layer.connections(&scene.grid, block, pos, face) {
                println!("  layer {i} {:<5} {}", face.name(), report::connections(&c));
            }
        }
    }
    let mut quads: Vec<Quad> = Vec::new();
    let mut rng = StdRng::seed_from_u64(position_seed(scene.seed, pos));
    model.emit_block_quads(&scene.grid, block, pos, &mut rng, &mut quads);
    for q in quads.iter().filter(|q| faces.contains(&q.nominal_face)) {
        let hidden = q
            .cull_face
            .is_some_and(|f| reg.is_solid(scene.grid.block_at(pos.offset(f))));
        let mark = if hidden { " (culled)" } else { "" };
        println!("  {}{}", report::quad(q, reg), mark);
    }
}
