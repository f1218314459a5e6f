//! Eased interpolation between consecutive views.
//!
//! The interpolator is a pure function of `(deck, scroll state)`: it never
//! stores anything with an independent lifecycle, only a one-entry cache so
//! repeated renders at the same scroll position skip the arithmetic.

use glam::Vec3;

use crate::scroll::ScrollState;
use crate::view::{Background, ViewDeck};

/// Cubic ease-in-out: slow at both ends of the curve, fastest at the
/// midpoint.
///
/// Piecewise `4t^3` below the midpoint and `1 - (-2t + 2)^3 / 2` above it;
/// value and first derivative are continuous at `t = 0.5`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// `a * (1 - t) + b * t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Component-wise [`lerp`] over a 3-vector.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

#[inline]
fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// Per-frame values handed to the renderer: the eased blend of the current
/// view toward the next one. Recomputed from scratch every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    /// Model rotation in radians, XYZ euler.
    pub rotation: Vec3,
    pub zoom: f32,
    /// Background stops, blended with the same eased factor so the
    /// gradient tracks the transition.
    pub background: Background,
}

/// Blend the view at `state.view_index` toward its successor using the
/// eased scroll progress. At the last view source and target coincide, so
/// the output equals that view's own values for any progress.
pub fn sample(deck: &ViewDeck, state: ScrollState) -> RenderParams {
    let from = deck.view(state.view_index);
    let to = deck.view(deck.next_index(state.view_index));
    let t = ease_in_out_cubic(state.progress);
    RenderParams {
        rotation: lerp_vec3(from.rotation, to.rotation, t),
        zoom: lerp(from.zoom, to.zoom, t),
        background: Background {
            top: lerp_rgb(from.background.top, to.background.top, t),
            bottom: lerp_rgb(from.background.bottom, to.background.bottom, t),
        },
    }
}

/// Memoizing wrapper over [`sample`]. Caching is an optimization, not a
/// correctness requirement; the cache holds exactly the last input pair.
#[derive(Debug, Default)]
pub struct Interpolator {
    cache: Option<((usize, u32), RenderParams)>,
}

impl Interpolator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, deck: &ViewDeck, state: ScrollState) -> RenderParams {
        let key = (state.view_index, state.progress.to_bits());
        if let Some((cached_key, cached)) = self.cache {
            if cached_key == key {
                return cached;
            }
        }
        let params = sample(deck, state);
        self.cache = Some((key, params));
        params
    }
}
