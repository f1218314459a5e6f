use glam::Vec3;
use showcase_core::view::{
    default_deck, Background, DeckError, Material, ViewDeck, ViewDescriptor, SHADING_BASIC,
    SHADING_NORMAL, SHADING_STANDARD,
};

#[test]
fn empty_deck_is_rejected() {
    match ViewDeck::new(vec![]) {
        Err(DeckError::Empty) => {}
        other => panic!("expected Empty, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn non_positive_zoom_is_rejected() {
    let mut view = default_deck().view(0).clone();
    view.zoom = 0.0;
    assert!(matches!(
        ViewDeck::new(vec![view]),
        Err(DeckError::BadZoom { index: 0, .. })
    ));
}

#[test]
fn default_deck_is_well_formed() {
    let deck = default_deck();
    assert!(deck.len() >= 2, "a showcase needs something to scroll to");
    for v in deck.views() {
        assert!(!v.title.is_empty());
        assert!(v.zoom > 0.0);
    }
    // the deck exercises every flag somewhere
    assert!(deck.views().iter().any(|v| v.wireframe));
    assert!(deck.views().iter().any(|v| v.orbit));
    assert!(deck.views().iter().any(|v| !v.post));
}

#[test]
fn next_index_saturates_at_the_end() {
    let deck = default_deck();
    assert_eq!(deck.next_index(0), 1);
    assert_eq!(deck.next_index(deck.len() - 1), deck.len() - 1);
}

#[test]
fn view_lookup_clamps_into_range() {
    let deck = default_deck();
    assert_eq!(deck.view(deck.len() + 10).title, deck.view(deck.len() - 1).title);
}

#[test]
fn deck_round_trips_through_json() {
    let deck = default_deck();
    let json = serde_json::to_string(&deck).unwrap();
    let parsed = ViewDeck::from_json(&json).unwrap();
    assert_eq!(parsed, deck);
}

#[test]
fn flags_default_when_absent_from_json() {
    let json = r#"[{
        "title": "t",
        "description": "d",
        "background": { "top": [0, 0, 0], "bottom": [0, 0, 0] },
        "rotation": [0.0, 1.0, 0.0],
        "zoom": 1.0,
        "material": { "kind": "basic", "color": [1, 1, 1] }
    }]"#;
    let deck = ViewDeck::from_json(json).unwrap();
    let v = deck.view(0);
    assert!(!v.wireframe);
    assert!(!v.orbit);
    assert!(v.post, "post-processing defaults on");
    assert_eq!(v.rotation, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn invalid_json_surfaces_a_parse_error() {
    assert!(matches!(
        ViewDeck::from_json("not json"),
        Err(DeckError::Parse(_))
    ));
}

#[test]
fn materials_lower_to_the_expected_shading_modes() {
    let basic = Material::Basic {
        color: [1.0, 0.5, 0.0],
    }
    .shading();
    assert_eq!(basic.mode, SHADING_BASIC);
    assert_eq!(basic.color, Vec3::new(1.0, 0.5, 0.0));

    let standard = Material::Standard {
        color: [0.5; 3],
        roughness: 0.4,
        metalness: 0.9,
    }
    .shading();
    assert_eq!(standard.mode, SHADING_STANDARD);
    assert_eq!(standard.clearcoat, 0.0);

    let physical = Material::Physical {
        color: [0.5; 3],
        roughness: 0.1,
        metalness: 0.2,
        clearcoat: 0.8,
    }
    .shading();
    assert_eq!(physical.mode, SHADING_STANDARD);
    assert!((physical.clearcoat - 0.8).abs() < 1e-6);

    assert_eq!(Material::Normal.shading().mode, SHADING_NORMAL);
}

#[test]
fn shading_parameters_are_clamped_to_sane_ranges() {
    let s = Material::Standard {
        color: [1.0; 3],
        roughness: -2.0,
        metalness: 7.0,
    }
    .shading();
    assert!(s.roughness > 0.0);
    assert_eq!(s.metalness, 1.0);
}

#[test]
fn material_json_uses_tagged_variants() {
    let json = r#"{ "kind": "physical", "color": [1, 0, 0], "roughness": 0.2, "metalness": 1.0, "clearcoat": 0.5 }"#;
    let m: Material = serde_json::from_str(json).unwrap();
    assert!(matches!(m, Material::Physical { clearcoat, .. } if (clearcoat - 0.5).abs() < 1e-6));

    let background: Background =
        serde_json::from_str(r#"{ "top": [0.1, 0.2, 0.3], "bottom": [0, 0, 0] }"#).unwrap();
    assert!((background.top[2] - 0.3).abs() < 1e-6);
}
