/// A lightweight, serializable snapshot of the window.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub first_visible_index: usize,
    pub pool_size: usize,
    pub item_count: usize,
    pub scroll_offset: f64,
    pub viewport_width: f64,
    /// Negative until the host reports a size.
    pub viewport_height: f64,
    /// Present only for `Layout::Scroll` windows that completed a fill pass.
    pub estimated_total_extent: Option<f64>,
}
