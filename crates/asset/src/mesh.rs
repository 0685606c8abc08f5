//! Per-vertex mesh records built from the parser's flat arrays.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::{
    error::{MeshImportError, MeshResult},
    obj,
};

/// Interleaved vertex handed to the renderer for buffer upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

/// Non-indexed triangle list, one record per face corner.
///
/// All sequences are index-aligned and `vertex_count` long.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredMesh {
    vertices: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
    tangents: Vec<Vec3>,
}

impl StructuredMesh {
    pub fn from_expanded(mesh: &obj::ExpandedMesh) -> Self {
        regroup(mesh, mesh.vertex_count())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Placeholder attribute: currently a copy of the positions.
    pub fn tangents(&self) -> &[Vec3] {
        &self.tangents
    }

    /// Interleave position/uv/normal for a single vertex buffer.
    pub fn interleaved(&self) -> Vec<GpuVertex> {
        self.vertices
            .iter()
            .zip(&self.tex_coords)
            .zip(&self.normals)
            .map(|((p, t), n)| GpuVertex {
                position: p.to_array(),
                tex_coord: t.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

/// Regroup the first `vertex_count` corners of `mesh` into per-vertex records.
pub fn expand(mesh: &obj::ExpandedMesh, vertex_count: usize) -> MeshResult<StructuredMesh> {
    let available = mesh.vertex_count();
    if vertex_count > available {
        return Err(MeshImportError::VertexCountOutOfRange {
            requested: vertex_count,
            available,
        });
    }
    Ok(regroup(mesh, vertex_count))
}

fn regroup(mesh: &obj::ExpandedMesh, vertex_count: usize) -> StructuredMesh {
    let verts = &mesh.triangle_verts()[..vertex_count * 3];
    let tcs = &mesh.texture_coords()[..vertex_count * 2];
    let nrms = &mesh.normals()[..vertex_count * 3];

    let vertices: Vec<Vec3> = verts.chunks_exact(3).map(Vec3::from_slice).collect();
    let tex_coords = tcs.chunks_exact(2).map(Vec2::from_slice).collect();
    let normals = nrms.chunks_exact(3).map(Vec3::from_slice).collect();
    // TODO: derive real tangents from position/uv deltas once a normal-mapped shader reads them.
    let tangents = vertices.clone();

    StructuredMesh {
        vertices,
        tex_coords,
        normals,
        tangents,
    }
}

/// Parse an OBJ file and expand it into per-vertex records.
pub fn import_model(path: impl AsRef<Path>) -> MeshResult<StructuredMesh> {
    let expanded = obj::load_obj_from_path(path)?;
    Ok(StructuredMesh::from_expanded(&expanded))
}
