//! Entry point: imports the airport scene meshes and reports what was loaded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{GpuVertex, StructuredMesh, import_model};
use corelib::{
    Mat4,
    scene::{AIRPORT_MESHES, SceneState, airport_tree},
};

#[derive(Debug)]
struct Options {
    mesh_dir: PathBuf,
    meshes: Vec<PathBuf>,
    strict: bool,
    show_hierarchy: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Options {
    let mut opts = Options {
        mesh_dir: PathBuf::from("res/meshes"),
        meshes: Vec::new(),
        strict: false,
        show_hierarchy: false,
    };

    for arg in args {
        if let Some(v) = arg.strip_prefix("--mesh-dir=") {
            opts.mesh_dir = PathBuf::from(v);
        } else if let Some(v) = arg.strip_prefix("--mesh=") {
            opts.meshes.push(PathBuf::from(v));
        } else if arg == "--strict" {
            opts.strict = true;
        } else if let Some(v) = arg.strip_prefix("--strict=") {
            opts.strict = is_on(v);
        } else if arg == "--show-hierarchy" {
            opts.show_hierarchy = true;
        } else {
            log::warn!("Unknown argument '{}', ignoring.", arg);
        }
    }
    opts
}

fn is_on(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Explicit `--mesh` paths win over the scene manifest.
fn mesh_paths(opts: &Options) -> Vec<PathBuf> {
    if !opts.meshes.is_empty() {
        return opts.meshes.clone();
    }
    AIRPORT_MESHES
        .iter()
        .map(|name| opts.mesh_dir.join(name))
        .collect()
}

fn import_all(paths: &[PathBuf], strict: bool) -> Result<Vec<Option<StructuredMesh>>> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        match import_model(path) {
            Ok(mesh) => {
                report(path, &mesh);
                out.push(Some(mesh));
            }
            Err(e) if strict => {
                return Err(e).with_context(|| format!("Failed to import {}", path.display()));
            }
            Err(e) => {
                log::error!("Skipping {} ({:?}): {}", path.display(), e.kind(), e);
                out.push(None);
            }
        }
    }
    Ok(out)
}

fn interleaved_bytes(mesh: &StructuredMesh) -> usize {
    mesh.vertex_count() * std::mem::size_of::<GpuVertex>()
}

fn report(path: &Path, mesh: &StructuredMesh) {
    let bytes = interleaved_bytes(mesh);
    log::info!(
        "{}: {} vertices, {} triangles, {} bytes interleaved",
        path.display(),
        mesh.vertex_count(),
        mesh.vertex_count() / 3,
        bytes
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args(std::env::args().skip(1));
    log::info!(
        "Starting airport mesh import. mesh_dir={}, strict={}",
        opts.mesh_dir.display(),
        opts.strict
    );

    let paths = mesh_paths(&opts);
    let meshes = import_all(&paths, opts.strict)?;
    let loaded = meshes.iter().filter(|m| m.is_some()).count();
    let total: usize = meshes.iter().flatten().map(StructuredMesh::vertex_count).sum();
    log::info!(
        "Imported {}/{} meshes, {} vertices total",
        loaded,
        paths.len(),
        total
    );

    if opts.show_hierarchy {
        let state = SceneState::new(16.0 / 9.0);
        let tree = airport_tree(&state).context("Failed to build scene hierarchy")?;
        for node in tree.world_matrices(Mat4::IDENTITY) {
            let scene_node = tree.node(node.id)?;
            let origin = node.world.transform_point3(corelib::Vec3::ZERO);
            let mesh = node
                .mesh
                .and_then(|slot| meshes.get(slot))
                .and_then(Option::as_ref)
                .map_or(0, StructuredMesh::vertex_count);
            log::info!(
                "node {:<14} origin=({:.2}, {:.2}, {:.2}) vertices={}",
                scene_node.name,
                origin.x,
                origin.y,
                origin.z,
                mesh
            );
        }
    }

    log::info!("Done.");
    Ok(())
}
