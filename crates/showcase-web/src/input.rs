// Pure keyboard-navigation helpers, kept free of web types so host-side
// tests can include this file directly.

/// Map a keydown to the view the page should scroll to, or `None` when the
/// key is not a navigation key or already points at the current view.
pub fn nav_target(key: &str, current: usize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let target = match key {
        "ArrowDown" | "PageDown" | "j" | "J" => current.saturating_add(1).min(last),
        "ArrowUp" | "PageUp" | "k" | "K" => current.saturating_sub(1),
        "Home" => 0,
        "End" => last,
        digit => {
            let n = digit.parse::<usize>().ok()?;
            if n == 0 || n > count {
                return None;
            }
            n - 1
        }
    };
    (target != current).then_some(target)
}

/// Scroll offset (CSS pixels) that puts the given view flush with the top
/// of the viewport.
#[inline]
pub fn offset_for_view(index: usize, viewport_px: f64) -> f64 {
    index as f64 * viewport_px
}
