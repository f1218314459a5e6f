use showcase_core::mesh::product_watch;

#[test]
fn watch_exposes_its_named_parts() {
    let mesh = product_watch();
    for name in ["case", "bezel", "crown", "strap_upper", "strap_lower"] {
        assert!(mesh.part(name).is_some(), "missing part {name}");
    }
    assert!(mesh.part("bracelet").is_none());
    assert_eq!(mesh.parts().len(), 5);
}

#[test]
fn geometry_is_consistent() {
    let mesh = product_watch();
    for part in mesh.parts() {
        assert!(!part.vertices.is_empty(), "{} has no vertices", part.name);
        assert_eq!(part.indices.len() % 3, 0, "{} is not a triangle list", part.name);
        let n = part.vertices.len() as u32;
        assert!(
            part.indices.iter().all(|&i| i < n),
            "{} has out-of-range indices",
            part.name
        );
        assert!(
            part.edges.iter().all(|&i| i < n),
            "{} has out-of-range edge indices",
            part.name
        );
    }
}

#[test]
fn normals_are_unit_length() {
    let mesh = product_watch();
    for part in mesh.parts() {
        for v in &part.vertices {
            let len2 = v.normal[0] * v.normal[0] + v.normal[1] * v.normal[1] + v.normal[2] * v.normal[2];
            assert!((len2 - 1.0).abs() < 1e-3, "{} normal {:?}", part.name, v.normal);
        }
    }
}

#[test]
fn edge_lists_are_deduplicated() {
    let mesh = product_watch();
    for part in mesh.parts() {
        assert_eq!(part.edges.len() % 2, 0);
        let mut pairs: Vec<(u32, u32)> = part
            .edges
            .chunks_exact(2)
            .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
            .collect();
        let before = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), before, "{} repeats edges", part.name);
        // interior edges are shared by two triangles, so the unique-edge
        // count must undercut the naive three-per-triangle figure
        assert!(before < part.indices.len(), "{} looks un-deduplicated", part.name);
    }
}

#[test]
fn straps_sit_on_opposite_sides_of_the_case() {
    let mesh = product_watch();
    let upper = mesh.part("strap_upper").unwrap();
    let lower = mesh.part("strap_lower").unwrap();
    assert!(upper.vertices.iter().all(|v| v.position[1] > 0.0));
    assert!(lower.vertices.iter().all(|v| v.position[1] < 0.0));
}

#[test]
fn retain_part_isolates_a_single_node() {
    let mut mesh = product_watch();
    assert!(!mesh.retain_part("nonexistent"));
    assert_eq!(mesh.parts().len(), 5);
    assert!(mesh.retain_part("crown"));
    assert_eq!(mesh.parts().len(), 1);
    assert!(mesh.part("crown").is_some());
    assert!(mesh.part("case").is_none());
}
