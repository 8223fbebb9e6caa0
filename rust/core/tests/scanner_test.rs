// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use obj_lite_core::{
    scan, CoordReference, CoordSlot, Error, Normal, ObjScanner, Result, ScanConfig, ScanHandler,
    ScanSummary, TexCoord, Vertex,
};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Comment(String),
    Vertex(Vertex),
    TexCoord(TexCoord),
    Normal(Normal),
    Object(String),
    Group(String),
    FaceStart,
    Reference(CoordReference),
    FaceEnd,
    MaterialLibrary(String),
    MaterialReference(String),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    fn comments(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Comment(c) => Some(c.as_str()),
                _ => None,
            })
            .collect()
    }

    fn vertices(&self) -> Vec<Vertex> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Vertex(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    fn tex_coords(&self) -> Vec<TexCoord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::TexCoord(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    fn normals(&self) -> Vec<Normal> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Normal(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    fn references(&self) -> Vec<CoordReference> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Reference(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    fn count(&self, wanted: &Event) -> usize {
        self.events.iter().filter(|e| *e == wanted).count()
    }
}

impl ScanHandler for Recorder {
    fn on_comment(&mut self, comment: &str) -> Result<()> {
        self.events.push(Event::Comment(comment.to_string()));
        Ok(())
    }

    fn on_vertex(&mut self, vertex: Vertex) -> Result<()> {
        self.events.push(Event::Vertex(vertex));
        Ok(())
    }

    fn on_tex_coord(&mut self, tex_coord: TexCoord) -> Result<()> {
        self.events.push(Event::TexCoord(tex_coord));
        Ok(())
    }

    fn on_normal(&mut self, normal: Normal) -> Result<()> {
        self.events.push(Event::Normal(normal));
        Ok(())
    }

    fn on_object(&mut self, name: &str) -> Result<()> {
        self.events.push(Event::Object(name.to_string()));
        Ok(())
    }

    fn on_group(&mut self, name: &str) -> Result<()> {
        self.events.push(Event::Group(name.to_string()));
        Ok(())
    }

    fn on_face_start(&mut self) -> Result<()> {
        self.events.push(Event::FaceStart);
        Ok(())
    }

    fn on_coord_reference(&mut self, reference: CoordReference) -> Result<()> {
        self.events.push(Event::Reference(reference));
        Ok(())
    }

    fn on_face_end(&mut self) -> Result<()> {
        self.events.push(Event::FaceEnd);
        Ok(())
    }

    fn on_material_library(&mut self, path: &str) -> Result<()> {
        self.events.push(Event::MaterialLibrary(path.to_string()));
        Ok(())
    }

    fn on_material_reference(&mut self, name: &str) -> Result<()> {
        self.events.push(Event::MaterialReference(name.to_string()));
        Ok(())
    }
}

fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = PathBuf::from(manifest_dir).join("tests").join("obj").join(name);
    if !path.exists() {
        panic!("Test OBJ file not found at: {}", path.display());
    }
    path
}

fn scan_file(name: &str) -> (ScanSummary, Recorder) {
    let file = File::open(fixture_path(name)).expect("open fixture");
    let mut recorder = Recorder::default();
    let summary = scan(BufReader::new(file), &mut recorder).expect("scan fixture");
    (summary, recorder)
}

fn scan_str(input: &str) -> (Result<ScanSummary>, Recorder) {
    let mut recorder = Recorder::default();
    let result = scan(Cursor::new(input.as_bytes()), &mut recorder);
    (result, recorder)
}

fn assert_xyz(vertex: &Vertex, x: f32, y: f32, z: f32) {
    assert_relative_eq!(vertex.x, x);
    assert_relative_eq!(vertex.y, y);
    assert_relative_eq!(vertex.z, z);
}

#[test]
fn test_basic_file() {
    let (summary, recorder) = scan_file("valid_basic.obj");

    assert_eq!(recorder.comments(), vec!["This is the beginning of this OBJ file."]);

    let vertices = recorder.vertices();
    assert_eq!(vertices.len(), 4);
    assert_xyz(&vertices[0], -1.0, 1.0, -1.0);
    assert_xyz(&vertices[1], -1.0, -1.0, 1.0);
    assert_xyz(&vertices[2], 1.0, -1.0, -1.0);
    assert_xyz(&vertices[3], 1.0, 1.0, 1.0);
    assert!(vertices.iter().all(|v| v.w.is_none()));

    let tex_coords = recorder.tex_coords();
    assert_eq!(tex_coords.len(), 4);
    assert_relative_eq!(tex_coords[1].u, 1.0);
    assert_eq!(tex_coords[3].v, Some(1.0));
    assert!(tex_coords.iter().all(|t| t.w.is_none()));

    let normals = recorder.normals();
    assert_eq!(normals.len(), 3);
    assert_relative_eq!(normals[0].y, 1.0);
    assert_relative_eq!(normals[2].z, 1.0);

    assert_eq!(recorder.count(&Event::Object("MyObject".into())), 1);
    assert_eq!(recorder.count(&Event::MaterialLibrary("valid_basic.mtl".into())), 1);
    assert_eq!(recorder.count(&Event::MaterialReference("BlueMaterial".into())), 1);

    assert_eq!(
        recorder.references(),
        vec![
            CoordReference::new(1).with_tex_coord(4).with_normal(1),
            CoordReference::new(2).with_tex_coord(1).with_normal(1),
            CoordReference::new(3).with_tex_coord(3).with_normal(2),
        ]
    );

    // usemtl comes right before the face
    let usemtl = recorder
        .events
        .iter()
        .position(|e| *e == Event::MaterialReference("BlueMaterial".into()))
        .unwrap();
    assert_eq!(recorder.events[usemtl + 1], Event::FaceStart);
    assert_eq!(recorder.events.last(), Some(&Event::FaceEnd));

    assert_eq!(summary.faces, 1);
    assert_eq!(summary.blank_lines, 6);
    assert_eq!(summary.ignored_count(), 0);
}

#[test]
fn test_comments_file() {
    let (summary, recorder) = scan_file("valid_comments.obj");
    assert_eq!(
        recorder.comments(),
        vec![
            "Comment at file start",
            "Comment that is right next to special char",
            "This comment uses",
            "two lines",
            "",
            "Previous comment was empty. This one contain the # character twice.",
            "Comment at file end",
        ]
    );
    assert_eq!(summary.comments, 7);
    assert_eq!(summary.ignored.get("s"), Some(&1));
}

#[test]
fn test_vertices_file() {
    let (_, recorder) = scan_file("valid_vertices.obj");
    let vertices = recorder.vertices();
    assert_eq!(vertices.len(), 2);
    assert_xyz(&vertices[0], 1.0, 1.0, -1.0);
    assert_eq!(vertices[0].w, None);
    assert_xyz(&vertices[1], -1.0, -1.0, 1.0);
    assert_eq!(vertices[1].w, Some(0.5));
}

#[test]
fn test_tex_coords_file() {
    let (_, recorder) = scan_file("valid_texcoords.obj");
    let tex_coords = recorder.tex_coords();
    assert_eq!(tex_coords.len(), 3);

    assert_relative_eq!(tex_coords[0].u, 1.6);
    assert_eq!(tex_coords[0].v, None);
    assert_eq!(tex_coords[0].w, None);

    assert_relative_eq!(tex_coords[1].u, 0.0);
    assert_relative_eq!(tex_coords[1].v.unwrap(), -0.5);
    assert_eq!(tex_coords[1].w, None);

    assert_relative_eq!(tex_coords[2].u, -0.2);
    assert_relative_eq!(tex_coords[2].v.unwrap(), 1.4);
    assert_relative_eq!(tex_coords[2].w.unwrap(), 3.0);
}

#[test]
fn test_normals_file() {
    let (_, recorder) = scan_file("valid_normals.obj");
    assert_eq!(
        recorder.normals(),
        vec![
            Normal { x: 1.0, y: 0.0, z: 0.0 },
            Normal { x: -1.0, y: -1.0, z: 1.0 },
        ]
    );
}

#[test]
fn test_objects_file() {
    let (summary, recorder) = scan_file("valid_objects.obj");
    let objects: Vec<_> = recorder
        .events
        .iter()
        .filter(|e| matches!(e, Event::Object(_)))
        .cloned()
        .collect();
    assert_eq!(
        objects,
        vec![Event::Object("FirstObject".into()), Event::Object("LastObject".into())]
    );
    assert_eq!(summary.objects, 2);
}

#[test]
fn test_material_references_file() {
    let (summary, recorder) = scan_file("valid_material_references.obj");
    let materials: Vec<_> = recorder
        .events
        .iter()
        .filter_map(|e| match e {
            Event::MaterialReference(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(materials, vec!["", "MyMaterial"]);
    assert_eq!(summary.material_references, 2);
}

#[test]
fn test_faces_file() {
    let (summary, recorder) = scan_file("valid_faces.obj");
    assert_eq!(recorder.count(&Event::FaceStart), 3);
    assert_eq!(recorder.count(&Event::FaceEnd), 3);
    assert_eq!(recorder.references().len(), 12);
    assert_eq!(summary.coord_references, 12);
}

#[test]
fn test_coord_references_file() {
    let (_, recorder) = scan_file("valid_coord_references.obj");
    let references = recorder.references();
    assert_eq!(references.len(), 12);

    assert_eq!(&references[0..3], &[1, 2, 3].map(CoordReference::new));
    assert_eq!(
        &references[3..6],
        &[
            CoordReference::new(2).with_tex_coord(1),
            CoordReference::new(3).with_tex_coord(2),
            CoordReference::new(4).with_tex_coord(3),
        ]
    );
    assert_eq!(
        &references[6..9],
        &[
            CoordReference::new(5).with_normal(1),
            CoordReference::new(6).with_normal(2),
            CoordReference::new(7).with_normal(3),
        ]
    );
    assert_eq!(
        &references[9..12],
        &[
            CoordReference::new(8).with_tex_coord(4).with_normal(5),
            CoordReference::new(9).with_tex_coord(6).with_normal(7),
            CoordReference::new(10).with_tex_coord(8).with_normal(9),
        ]
    );
}

#[test]
fn test_continuation_file() {
    let (summary, recorder) = scan_file("continuation.obj");
    assert_eq!(summary.logical_lines, 4);
    assert_eq!(
        recorder.events,
        vec![
            Event::MaterialLibrary("first.mtl".into()),
            Event::MaterialLibrary("second.mtl".into()),
            Event::Vertex(Vertex { x: 1.0, y: 2.0, z: 3.0, w: None }),
            Event::FaceStart,
            Event::Reference(CoordReference::new(1).with_tex_coord(1).with_normal(1)),
            Event::Reference(CoordReference::new(2).with_tex_coord(2).with_normal(2)),
            Event::Reference(CoordReference::new(3).with_tex_coord(3).with_normal(3)),
            Event::FaceEnd,
            Event::Comment("ends with  continuation".into()),
        ]
    );
}

#[test]
fn test_groups_reported_separately_when_overridden() {
    let (result, recorder) = scan_str("g left\no whole\ng right\n");
    let summary = result.unwrap();
    assert_eq!(
        recorder.events,
        vec![
            Event::Group("left".into()),
            Event::Object("whole".into()),
            Event::Group("right".into()),
        ]
    );
    assert_eq!(summary.groups, 2);
}

#[test]
fn test_malformed_vertex_coordinate() {
    let (result, recorder) = scan_str("v 1.0 1.0 1.0\nv 1.0 abc 1.0\nv 2.0 2.0 2.0\n");
    match result {
        Err(Error::MalformedNumber { line, index, text }) => {
            assert_eq!(line, 2);
            assert_eq!(index, 1);
            assert_eq!(text, "abc");
        }
        other => panic!("Expected MalformedNumber, got {:?}", other),
    }
    assert_eq!(recorder.vertices().len(), 1);
}

#[test]
fn test_malformed_coord_references() {
    let cases = [
        ("f x/1/1 2 3\n", CoordSlot::Vertex, 0),
        ("f 1 2/y 3\n", CoordSlot::TexCoord, 1),
        ("f 1 2 3//z\n", CoordSlot::Normal, 2),
    ];
    for (input, expected_slot, expected_index) in cases {
        match scan_str(input).0 {
            Err(Error::MalformedIndex { slot, index, line, .. }) => {
                assert_eq!(slot, expected_slot);
                assert_eq!(index, expected_index);
                assert_eq!(line, 1);
            }
            other => panic!("Expected MalformedIndex for {:?}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_arity_violations() {
    assert!(matches!(
        scan_str("vn 1.0 0.0\n").0,
        Err(Error::InvalidArity { command: "vn", found: 2, .. })
    ));
    assert!(matches!(
        scan_str("f 1 2\n").0,
        Err(Error::InvalidArity { command: "f", found: 2, .. })
    ));
}

#[test]
fn test_unknown_statements_are_skipped() {
    let input = "s 1\nl 1 2\ncstype bspline\nvp 0.5\nv 0 0 0\n";
    let (result, recorder) = scan_str(input);
    let summary = result.unwrap();
    assert_eq!(recorder.vertices().len(), 1);
    assert_eq!(summary.ignored_count(), 4);
    assert_eq!(summary.ignored.get("vp"), Some(&1));
}

#[test]
fn test_line_limit_from_config() {
    let config = ScanConfig::default().with_max_line_length(Some(16));
    let input = format!("v 1 2 3\n# {}\n", "x".repeat(32));
    let mut recorder = Recorder::default();
    let result = ObjScanner::with_config(config).scan(Cursor::new(input.into_bytes()), &mut recorder);
    assert!(matches!(result, Err(Error::LineTooLong { line: 2, limit: 16 })));
    assert_eq!(recorder.vertices().len(), 1);
}

#[test]
fn test_unlimited_lines() {
    let config = ScanConfig::default().with_max_line_length(None);
    let input = format!("o {}\n", "n".repeat(100_000));
    let mut recorder = Recorder::default();
    let summary = ObjScanner::with_config(config)
        .scan(Cursor::new(input.into_bytes()), &mut recorder)
        .unwrap();
    assert_eq!(summary.objects, 1);
}

#[test]
fn test_maximum_line_limit_reads_normally() {
    let config = ScanConfig::default().with_max_line_length(Some(usize::MAX));
    let mut recorder = Recorder::default();
    let summary = ObjScanner::with_config(config)
        .scan(Cursor::new(&b"v 1 2 3\nusemtl Red\n"[..]), &mut recorder)
        .unwrap();
    assert_eq!(summary.vertices, 1);
    assert_eq!(recorder.count(&Event::MaterialReference("Red".into())), 1);
}

#[test]
fn test_empty_stream() {
    let (result, recorder) = scan_str("");
    assert_eq!(result.unwrap().logical_lines, 0);
    assert!(recorder.events.is_empty());
}
