use showcase_core::scroll::{ScrollSample, ScrollState};

const VIEWS: usize = 5;

fn tracked(offset: f32, viewport: f32) -> ScrollState {
    let mut s = ScrollState::default();
    s.apply(offset, viewport, VIEWS);
    s
}

#[test]
fn progress_stays_in_unit_interval() {
    let viewports = [320.0_f32, 768.0, 1000.0, 1080.5];
    for &vh in &viewports {
        for step in 0..400 {
            let offset = step as f32 * (vh / 7.3);
            let s = tracked(offset, vh);
            assert!(
                (0.0..1.0).contains(&s.progress),
                "offset {} viewport {} gave progress {}",
                offset,
                vh,
                s.progress
            );
        }
    }
}

#[test]
fn progress_is_exact_at_viewport_boundaries() {
    for k in 0..VIEWS {
        let s = tracked(k as f32 * 1000.0, 1000.0);
        assert_eq!(s.view_index, k);
        assert!(s.progress.abs() < 1e-6);
    }
}

#[test]
fn index_tracks_scroll_direction_monotonically() {
    let vh = 900.0;
    let mut s = ScrollState::default();
    let mut last = 0;
    // down the page
    for step in 0..((VIEWS as i32) * 90) {
        s.apply(step as f32 * 10.0, vh, VIEWS);
        assert!(s.view_index >= last);
        last = s.view_index;
    }
    assert_eq!(s.view_index, VIEWS - 1);
    // and back up
    for step in (0..((VIEWS as i32) * 90)).rev() {
        s.apply(step as f32 * 10.0, vh, VIEWS);
        assert!(s.view_index <= last);
        last = s.view_index;
    }
    assert_eq!(s.view_index, 0);
}

#[test]
fn partial_scroll_into_the_second_view() {
    let s = tracked(1800.0, 1000.0);
    assert_eq!(s.view_index, 1);
    assert!((s.progress - 0.8).abs() < 1e-6);
}

#[test]
fn index_never_advances_past_last_view() {
    let vh = 1000.0;
    let mut s = ScrollState::default();
    s.apply((VIEWS - 1) as f32 * vh, vh, VIEWS);
    assert_eq!(s.view_index, VIEWS - 1);

    // offsets beyond the deck keep the index pinned but still report
    // progress within the (virtual) viewport being scrolled
    s.apply(VIEWS as f32 * vh + 340.0, vh, VIEWS);
    assert_eq!(s.view_index, VIEWS - 1);
    assert!((s.progress - 0.34).abs() < 1e-6);
}

#[test]
fn malformed_measurements_are_ignored() {
    let mut s = ScrollState::default();
    s.apply(1234.0, 1000.0, VIEWS);
    let before = s;

    s.apply(2000.0, 0.0, VIEWS);
    assert_eq!(s, before, "zero viewport height must be a no-op");
    s.apply(2000.0, -50.0, VIEWS);
    assert_eq!(s, before, "negative viewport height must be a no-op");
    s.apply(f32::NAN, 1000.0, VIEWS);
    assert_eq!(s, before, "non-finite offset must be a no-op");
    s.apply(2000.0, 1000.0, 0);
    assert_eq!(s, before, "an empty deck must be a no-op");
}

#[test]
fn negative_offsets_clamp_to_the_first_view() {
    let s = tracked(-250.0, 1000.0);
    assert_eq!(s.view_index, 0);
    assert!(s.progress.abs() < 1e-6);
}

#[test]
fn clamp_derives_from_deck_length_not_a_constant() {
    // decks both shorter and longer than the historical hardcoded four
    for views in [1usize, 2, 4, 9, 23] {
        let vh = 800.0;
        let mut s = ScrollState::default();
        s.apply(1_000_000.0, vh, views);
        assert_eq!(s.view_index, 0, "huge jump outside range is ignored");
        for k in 0..views {
            s.apply(k as f32 * vh + 10.0, vh, views);
            assert_eq!(s.view_index, k);
        }
        s.apply(views as f32 * vh + 10.0, vh, views);
        assert_eq!(s.view_index, views - 1);
    }
}

#[test]
fn apply_sample_matches_apply() {
    let mut a = ScrollState::default();
    let mut b = ScrollState::default();
    a.apply(1450.0, 700.0, VIEWS);
    b.apply_sample(
        ScrollSample {
            offset_px: 1450.0,
            viewport_px: 700.0,
        },
        VIEWS,
    );
    assert_eq!(a, b);
}
