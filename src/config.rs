/// Tunables for drag decisions and region expand/collapse.
///
/// Geometric constants (layer paddings, epsilons) stay next to the code that
/// uses them; this struct only holds what a host may want to change.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    /// Regions whose on-screen size (fraction of the viewport) reaches this
    /// are expanded.
    pub full_detail_threshold: f64,
    /// Fraction of the viewport added on every side before testing whether a
    /// region is visible.
    pub viewport_buffer: f64,
    /// Layered drags emit in-layer successor/predecessor constraints instead
    /// of absolute layer/position constraints.
    pub relative_constraints: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            full_detail_threshold: 0.2,
            viewport_buffer: 0.5,
            relative_constraints: false,
        }
    }
}

impl InteractionConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
