//! Scroll tracking: raw vertical scroll offset to (view index, progress).
//!
//! Each view occupies one viewport height of scroll distance. The tracker
//! derives the discrete view index and the continuous intra-view progress
//! from the ambient offset; it owns no timers and keeps no history, so a
//! new scroll event simply supersedes the previous one.

/// A raw measurement taken from the host environment on a scroll event.
///
/// The web frontend fills this from `window.scrollY` / `innerHeight`; the
/// native preview synthesizes the offset from accumulated wheel deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub offset_px: f32,
    pub viewport_px: f32,
}

/// Largest value `progress` can take; keeps the invariant `progress < 1`
/// even when float rounding lands exactly on a viewport boundary.
const PROGRESS_MAX: f32 = 1.0 - f32::EPSILON;

/// Session-scoped scroll-derived state.
///
/// `view_index` is always a valid index into the active deck; it only
/// moves when the offset crosses a full viewport-height boundary, and
/// scrolling past the last view never advances it. `progress` is the
/// fraction of the current viewport height scrolled, in `[0, 1)`.
///
/// All mutation goes through [`ScrollState::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub view_index: usize,
    pub progress: f32,
}

impl ScrollState {
    /// Fold one scroll measurement into the state.
    ///
    /// `progress` is written unconditionally; `view_index` is written only
    /// when the computed index differs from the stored one and lies within
    /// `[0, view_count - 1]`. The range guard is derived from the actual
    /// deck length. Non-finite or non-positive viewport heights are
    /// ignored; negative offsets clamp to zero.
    pub fn apply(&mut self, offset_px: f32, viewport_px: f32, view_count: usize) {
        if !(viewport_px > 0.0) || !offset_px.is_finite() || view_count == 0 {
            return;
        }
        let offset = offset_px.max(0.0);
        let whole = (offset / viewport_px).floor();
        let frac = (offset - whole * viewport_px) / viewport_px;
        self.progress = frac.clamp(0.0, PROGRESS_MAX);

        let index = whole as usize;
        if index != self.view_index && index < view_count {
            self.view_index = index;
        }
    }

    /// Convenience wrapper over [`ScrollState::apply`] for a sample.
    #[inline]
    pub fn apply_sample(&mut self, sample: ScrollSample, view_count: usize) {
        self.apply(sample.offset_px, sample.viewport_px, view_count);
    }
}
