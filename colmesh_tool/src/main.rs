//! `gltf_to_collision`: command-line front end for the collision mesh converter

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use colmesh::collision::{FlagCounts, SurfaceType};
use colmesh::format::read_collision_file;
use colmesh::foundation::logging;
use colmesh::pipeline::{convert_file, load_scene, ConversionOptions};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let matches = Command::new("gltf_to_collision")
        .about("Converts a glTF scene into a binary collision mesh")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Input .gltf/.glb file (or a collision file with --inspect)")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("Output collision file")
                .required_unless_present_any(["list-materials", "inspect"]),
        )
        .arg(
            Arg::new("scale")
                .short('s')
                .long("scale")
                .value_name("FACTOR")
                .help("Uniform model scale applied at the scene root")
                .value_parser(clap::value_parser!(f32))
                .default_value("1.0"),
        )
        .arg(
            Arg::new("list-materials")
                .long("list-materials")
                .help("Print the scene's material names and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inspect")
                .long("inspect")
                .help("Decode an existing collision file and print its contents")
                .action(ArgAction::SetTrue)
                .conflicts_with("list-materials"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Debug logging and per-flag statistics")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    logging::init_with_level(verbose);

    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .context("Missing input path")?;

    if matches.get_flag("inspect") {
        return inspect(&input);
    }

    if matches.get_flag("list-materials") {
        return list_materials(&input);
    }

    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .context("Missing output path")?;
    let scale = matches.get_one::<f32>("scale").copied().unwrap_or(1.0);
    let options = ConversionOptions::default().with_model_scale(scale);

    let conversion = convert_file(&input, &output, &options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if verbose {
        print_counts(&conversion.counts);
        if conversion.skipped_primitives > 0 {
            println!("Skipped primitives: {}", conversion.skipped_primitives);
        }
    }
    println!(
        "Wrote {} triangles to {} ({} bytes)",
        conversion.triangle_count(),
        output.display(),
        conversion.bytes.len()
    );
    Ok(())
}

fn list_materials(input: &Path) -> Result<()> {
    let scene = load_scene(input).with_context(|| format!("Failed to load {}", input.display()))?;
    println!("Materials in {}:", input.display());
    for (index, name) in scene.material_names().iter().enumerate() {
        println!("  [{}] {}", index, name);
    }
    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let file = read_collision_file(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let bounds = file.bounds();
    println!("Collision file: {}", path.display());
    println!("Version: {}", file.header.version);
    println!("Triangles: {}", file.triangle_count());
    println!(
        "AABB: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    print_counts(&file.summary());
    Ok(())
}

fn print_counts(counts: &FlagCounts) {
    println!("Walkable: {}", counts.walkable);
    println!("Wall: {}", counts.wall);
    println!("Ceiling: {}", counts.ceiling);
    if counts.has_surfaces() {
        for surface in SurfaceType::ALL {
            let count = counts.surface(surface);
            if count > 0 {
                println!("{}: {}", surface.name(), count);
            }
        }
    }
}
