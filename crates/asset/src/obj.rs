//! OBJ parser producing face-expanded attribute arrays.
//!
//! Supported directives: `v`, `vt`, `vn` and triangular `f p/t/n p/t/n p/t/n`
//! faces with 1-based references. Every other line is ignored. Vertices are
//! not deduplicated: each face corner becomes its own entry in the output.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::error::{MeshImportError, MeshResult, Table};

/// Flat, face-expanded attribute arrays. One entry per face corner.
///
/// `texture_coords` holds 2 floats per corner, the other two hold 3.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpandedMesh {
    triangle_verts: Vec<f32>,
    texture_coords: Vec<f32>,
    normals: Vec<f32>,
}

impl ExpandedMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.triangle_verts.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_verts.is_empty()
    }

    pub fn triangle_verts(&self) -> &[f32] {
        &self.triangle_verts
    }

    pub fn texture_coords(&self) -> &[f32] {
        &self.texture_coords
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    fn push_corner(&mut self, position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) {
        self.triangle_verts.extend_from_slice(&position);
        self.texture_coords.extend_from_slice(&uv);
        self.normals.extend_from_slice(&normal);
    }
}

/// Attribute tables in file order, indexed by face references.
#[derive(Debug, Default)]
struct RawTables {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

impl RawTables {
    fn resolve(
        &self,
        corner: FaceCorner,
        line_no: usize,
    ) -> MeshResult<([f32; 3], [f32; 2], [f32; 3])> {
        Ok((
            lookup(&self.positions, corner.position, Table::Position, line_no)?,
            lookup(&self.texcoords, corner.texcoord, Table::TexCoord, line_no)?,
            lookup(&self.normals, corner.normal, Table::Normal, line_no)?,
        ))
    }
}

/// 0-based references of one vertex-in-a-triangle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct FaceCorner {
    position: usize,
    texcoord: usize,
    normal: usize,
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> MeshResult<ExpandedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MeshImportError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = load_obj_from_reader(BufReader::new(file))?;
    log::info!(
        "Imported OBJ {} ({} vertices, {} triangles)",
        path.display(),
        mesh.vertex_count(),
        mesh.vertex_count() / 3
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> MeshResult<ExpandedMesh> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> MeshResult<ExpandedMesh> {
    parse_obj(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(reader: R) -> MeshResult<ExpandedMesh> {
    let mut tables = RawTables::default();
    let mut mesh = ExpandedMesh::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => {
                MeshImportError::malformed(line_no, "line is not valid UTF-8")
            }
            _ => MeshImportError::Unreadable {
                line: line_no,
                source,
            },
        })?;

        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let xyz = parse_floats(&mut parts, line_no, ["x", "y", "z"])?;
                tables.positions.push(xyz);
            }
            "vt" => {
                let uv = parse_floats(&mut parts, line_no, ["u", "v"])?;
                tables.texcoords.push(uv);
            }
            "vn" => {
                let n = parse_floats(&mut parts, line_no, ["nx", "ny", "nz"])?;
                tables.normals.push(n);
            }
            "f" => {
                for corner in parse_face(parts, line_no)? {
                    let (position, uv, normal) = tables.resolve(corner, line_no)?;
                    mesh.push_corner(position, uv, normal);
                }
            }
            other => log::trace!("Ignoring '{}' on line {}", other, line_no),
        }
    }

    log::debug!(
        "Parsed OBJ tables: {} positions, {} texcoords, {} normals -> {} face corners",
        tables.positions.len(),
        tables.texcoords.len(),
        tables.normals.len(),
        mesh.vertex_count()
    );

    Ok(mesh)
}

fn parse_floats<'a, const N: usize>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    names: [&str; N],
) -> MeshResult<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, what) in out.iter_mut().zip(names) {
        *slot = parse_f32(parts.next(), line_no, what)?;
    }
    Ok(out)
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> MeshResult<f32> {
    let token =
        value.ok_or_else(|| MeshImportError::malformed(line_no, format!("missing {what} component")))?;
    token.parse::<f32>().map_err(|e| {
        MeshImportError::malformed(line_no, format!("invalid {what} component '{token}': {e}"))
    })
}

fn parse_face<'a>(
    parts: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> MeshResult<[FaceCorner; 3]> {
    let tokens: Vec<&str> = parts.collect();
    // Triangles only; polygons are rejected instead of fanned out.
    let [a, b, c] = tokens.as_slice() else {
        return Err(MeshImportError::malformed(
            line_no,
            format!("expected 3 face corners, found {}", tokens.len()),
        ));
    };
    Ok([
        parse_corner(a, line_no)?,
        parse_corner(b, line_no)?,
        parse_corner(c, line_no)?,
    ])
}

fn parse_corner(token: &str, line_no: usize) -> MeshResult<FaceCorner> {
    let mut split = token.split('/');
    let (Some(p), Some(t), Some(n), None) = (split.next(), split.next(), split.next(), split.next())
    else {
        return Err(MeshImportError::malformed(
            line_no,
            format!("face corner '{token}' is not of the form p/t/n"),
        ));
    };

    Ok(FaceCorner {
        position: parse_reference(p, line_no)?,
        texcoord: parse_reference(t, line_no)?,
        normal: parse_reference(n, line_no)?,
    })
}

/// Parse a 1-based reference and return it 0-based.
fn parse_reference(token: &str, line_no: usize) -> MeshResult<usize> {
    if token.is_empty() {
        return Err(MeshImportError::malformed(
            line_no,
            "face corner has an empty reference",
        ));
    }
    if token.starts_with('-') {
        return Err(MeshImportError::malformed(
            line_no,
            format!("relative reference '{token}' is not supported"),
        ));
    }
    let raw = token.parse::<usize>().map_err(|e| {
        MeshImportError::malformed(line_no, format!("invalid reference '{token}': {e}"))
    })?;
    raw.checked_sub(1).ok_or_else(|| {
        MeshImportError::malformed(line_no, "OBJ references are 1-based; found 0")
    })
}

fn lookup<T: Copy>(values: &[T], index: usize, table: Table, line_no: usize) -> MeshResult<T> {
    values
        .get(index)
        .copied()
        .ok_or(MeshImportError::DanglingReference {
            line: line_no,
            table,
            index: index + 1,
            len: values.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshErrorKind;

    const TRIANGLE: &str = "v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.25 0.75
vn 0.0 0.0 1.0
f 1/1/1 2/1/1 3/1/1
";

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn positions(mesh: &ExpandedMesh) -> Vec<[f32; 3]> {
        mesh.triangle_verts()
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect()
    }

    #[test]
    fn parse_single_triangle() {
        let mesh = load_obj_from_str(TRIANGLE).expect("parse triangle");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(
            positions(&mesh),
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
        assert_eq!(mesh.texture_coords(), &[0.25, 0.75, 0.25, 0.75, 0.25, 0.75]);
        assert_eq!(
            mesh.normals(),
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn reversed_corners_reverse_output() {
        let src = TRIANGLE.replace("f 1/1/1 2/1/1 3/1/1", "f 3/1/1 2/1/1 1/1/1");
        let mesh = load_obj_from_str(&src).expect("parse reversed triangle");
        assert_eq!(
            positions(&mesh),
            vec![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn shared_vertices_are_duplicated_per_corner() {
        let src = format!("{TRIANGLE}f 1/1/1 3/1/1 2/1/1\n");
        let mesh = load_obj_from_str(&src).expect("parse two faces");
        assert_eq!(mesh.vertex_count(), 6);
        let p = positions(&mesh);
        assert_eq!(p[0], p[3]);
        assert_eq!(p[1], p[5]);
    }

    #[test]
    fn vertices_without_faces_yield_empty_mesh() {
        let mesh = load_obj_from_str("v 1 2 3\nv 4 5 6\nv 7 8 9\n").expect("parse");
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.is_empty());
        assert!(mesh.texture_coords().is_empty());
        assert!(mesh.normals().is_empty());
    }

    #[test]
    fn whitespace_style_does_not_matter() {
        let spaced = "v   0.0  0.0\t0.0\nv 1.0    0.0 0.0\n  v 0.0 1.0 0.0\nvt  0.25   0.75\nvn 0.0 0.0   1.0\nf  1/1/1   2/1/1 3/1/1  \n";
        let a = load_obj_from_str(TRIANGLE).expect("single spaces");
        let b = load_obj_from_str(spaced).expect("multiple spaces");
        assert_eq!(a, b);
    }

    #[test]
    fn indented_directives_are_parsed() {
        let indented: String = TRIANGLE.lines().map(|l| format!("    {l}\n")).collect();
        let mesh = load_obj_from_str(&indented).expect("parse indented");
        assert_eq!(mesh, load_obj_from_str(TRIANGLE).expect("parse plain"));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let crlf = TRIANGLE.replace('\n', "\r\n");
        let a = load_obj_from_str(TRIANGLE).expect("lf");
        let b = load_obj_from_str(&crlf).expect("crlf");
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_directives_and_comments_are_ignored() {
        let src = format!("# exported\no Falcon\ns off\nusemtl body\n\n{TRIANGLE}");
        let mesh = load_obj_from_str(&src).expect("parse with extras");
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn attribute_lengths_stay_aligned() {
        let mesh = load_obj_from_path(fixture("tetrahedron.obj")).expect("load fixture");
        let n = mesh.vertex_count();
        assert_eq!(n, 12);
        assert_eq!(mesh.texture_coords().len(), 2 * n);
        assert_eq!(mesh.normals().len(), mesh.triangle_verts().len());
    }

    #[test]
    fn dangling_position_reference() {
        let src = TRIANGLE.replace("f 1/1/1", "f 99/1/1");
        let err = load_obj_from_str(&src).unwrap_err();
        assert_eq!(err.kind(), MeshErrorKind::DanglingReference);
        assert!(matches!(
            err,
            MeshImportError::DanglingReference {
                line: 6,
                table: Table::Position,
                index: 99,
                len: 3,
            }
        ));
    }

    #[test]
    fn dangling_texcoord_and_normal_references() {
        let src = TRIANGLE.replace("2/1/1", "2/2/1");
        let err = load_obj_from_str(&src).unwrap_err();
        assert!(matches!(
            err,
            MeshImportError::DanglingReference {
                table: Table::TexCoord,
                ..
            }
        ));

        let src = TRIANGLE.replace("3/1/1", "3/1/5");
        let err = load_obj_from_str(&src).unwrap_err();
        assert!(matches!(
            err,
            MeshImportError::DanglingReference {
                table: Table::Normal,
                index: 5,
                ..
            }
        ));
    }

    #[test]
    fn face_referencing_later_vertex_is_dangling() {
        let src = "vt 0 0\nvn 0 0 1\nv 0 0 0\nv 1 0 0\nf 1/1/1 2/1/1 3/1/1\nv 0 1 0\n";
        let err = load_obj_from_str(src).unwrap_err();
        assert_eq!(err.kind(), MeshErrorKind::DanglingReference);
    }

    #[test]
    fn quads_are_rejected() {
        let src = format!("{TRIANGLE}v 1 1 0\nf 1/1/1 2/1/1 4/1/1 3/1/1\n");
        let err = load_obj_from_str(&src).unwrap_err();
        assert!(matches!(err, MeshImportError::Malformed { line: 8, .. }));
    }

    #[test]
    fn short_face_is_rejected() {
        let src = TRIANGLE.replace(" 3/1/1", "");
        let err = load_obj_from_str(&src).unwrap_err();
        assert_eq!(err.kind(), MeshErrorKind::Malformed);
    }

    #[test]
    fn shorthand_and_relative_references_are_rejected() {
        for face in ["f 1//1 2//1 3//1", "f 1/1 2/1 3/1", "f -3/1/1 -2/1/1 -1/1/1", "f 1/1/1/1 2/1/1 3/1/1"] {
            let src = TRIANGLE.replace("f 1/1/1 2/1/1 3/1/1", face);
            let err = load_obj_from_str(&src).unwrap_err();
            assert_eq!(err.kind(), MeshErrorKind::Malformed, "face '{face}'");
        }
    }

    #[test]
    fn zero_reference_is_rejected() {
        let src = TRIANGLE.replace("f 1/1/1", "f 0/1/1");
        let err = load_obj_from_str(&src).unwrap_err();
        assert_eq!(err.kind(), MeshErrorKind::Malformed);
    }

    #[test]
    fn bad_float_is_rejected() {
        let err = load_obj_from_str("v 0.0 abc 0.0\n").unwrap_err();
        assert!(matches!(err, MeshImportError::Malformed { line: 1, .. }));

        let err = load_obj_from_str("vt 0.5\n").unwrap_err();
        assert_eq!(err.kind(), MeshErrorKind::Malformed);
    }

    #[test]
    fn extra_components_are_ignored() {
        let src = TRIANGLE
            .replace("vt 0.25 0.75", "vt 0.25 0.75 0.0")
            .replace("v 0.0 0.0 0.0", "v 0.0 0.0 0.0 1.0");
        let mesh = load_obj_from_str(&src).expect("parse w components");
        assert_eq!(mesh, load_obj_from_str(TRIANGLE).expect("parse plain"));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"v 0 0 0\n\xff\xfe\n";
        let err = load_obj_from_reader(bytes).unwrap_err();
        assert!(matches!(err, MeshImportError::Malformed { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_obj_from_path(fixture("does_not_exist.obj")).unwrap_err();
        assert_eq!(err.kind(), MeshErrorKind::NotFound);
        assert!(matches!(err, MeshImportError::NotFound { .. }));
    }
}
