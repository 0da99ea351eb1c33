//! Layer model for the layered algorithm.
//!
//! A layer is a band perpendicular to the layout direction that holds all
//! nodes sharing one `layer_id`. Bands are recomputed every frame from node
//! geometry; the dragged node contributes its pre-drag (shadow) position so
//! the bands stay put while it moves.

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::geometry::Direction;
use crate::interactive::overlay::Frame;

// ─── Geometry constants ──────────────────────────────────────────────────────

/// Space added above and below the nodes of a band.
pub const LAYER_PADDING: f64 = 20.0;
/// Space added on both sides of the band when it is the only one.
pub const ONE_LAYER_PADDING: f64 = 10.0;

// ─── Layer ───────────────────────────────────────────────────────────────────

/// One band of the layered drawing.
///
/// `begin`/`end` are coordinates on the layer axis in travel order, so for
/// `Left` and `Up` we have `begin >= end`. `top_border`/`bottom_border` are
/// on the in-layer axis and always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layer {
    pub begin: f64,
    pub end: f64,
    /// Centre of the band's node extent.
    pub mid: f64,
    pub top_border: f64,
    pub bottom_border: f64,
    pub direction: Direction,
}

impl Layer {
    pub fn width(&self) -> f64 {
        (self.end - self.begin).abs()
    }

    /// `c` lies between `begin` and `end` (inclusive).
    pub fn contains(&self, c: f64) -> bool {
        let (lo, hi) = if self.begin <= self.end {
            (self.begin, self.end)
        } else {
            (self.end, self.begin)
        };
        c >= lo && c <= hi
    }
}

/// Running extent of one band while sweeping the sorted nodes.
struct Band {
    lo: f64,
    hi: f64,
    top: f64,
    bot: f64,
}

impl Band {
    fn extend(&mut self, lo: f64, hi: f64, top: f64, bot: f64) {
        self.lo = self.lo.min(lo);
        self.hi = self.hi.max(hi);
        self.top = self.top.min(top);
        self.bot = self.bot.max(bot);
    }

    fn into_layer(self, direction: Direction) -> Layer {
        let (begin, end) = if direction.is_reversed() {
            (self.hi, self.lo)
        } else {
            (self.lo, self.hi)
        };
        Layer {
            begin,
            end,
            mid: self.lo + (self.hi - self.lo) / 2.0,
            top_border: self.top - LAYER_PADDING,
            bottom_border: self.bot + LAYER_PADDING,
            direction,
        }
    }
}

// ─── Computation ─────────────────────────────────────────────────────────────

/// Compute the ordered layers of `nodes`. Index `i` of the result is layer `i`.
///
/// Nodes without layered properties are ignored. An empty input gives an
/// empty result; callers must guard against that.
pub fn compute_layers(frame: &Frame<'_>, nodes: &[NodeIndex], direction: Direction) -> Vec<Layer> {
    let mut sorted: Vec<(usize, NodeIndex)> = nodes
        .iter()
        .filter_map(|&n| frame.layer_id(n).map(|l| (l, n)))
        .collect();
    sorted.sort_by_key(|(layer, _)| *layer);

    let mut layers: Vec<Layer> = Vec::new();
    let mut band: Option<Band> = None;
    let mut current: Option<usize> = None;

    for (layer_id, node) in sorted {
        if current != Some(layer_id) {
            if let Some(b) = band.take() {
                layers.push(b.into_layer(direction));
            }
            current = Some(layer_id);
        }
        let origin = frame.origin(node);
        let size = frame.size(node);
        let lo = direction.primary(origin);
        let hi = lo + direction.primary_extent(size);
        let top = direction.secondary(origin);
        let bot = top + direction.secondary_extent(size);
        match band.as_mut() {
            Some(b) => b.extend(lo, hi, top, bot),
            None => band = Some(Band { lo, hi, top, bot }),
        }
    }
    if let Some(b) = band {
        layers.push(b.into_layer(direction));
    }

    adjust_borders(&mut layers, direction);
    layers
}

/// Make neighbouring layers share a border and widen the outer layers.
fn adjust_borders(layers: &mut [Layer], direction: Direction) {
    let sign = if direction.is_reversed() { -1.0 } else { 1.0 };
    let n = layers.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        layers[0].begin -= sign * ONE_LAYER_PADDING;
        layers[0].end += sign * ONE_LAYER_PADDING;
        return;
    }

    for i in 0..n - 1 {
        let middle = layers[i].end + (layers[i + 1].begin - layers[i].end) / 2.0;
        layers[i].end = middle;
        layers[i + 1].begin = middle;
    }

    let first_pad = layers[1].width() / 2.0;
    let last_pad = layers[n - 2].width() / 2.0;
    layers[0].begin -= sign * first_pad;
    layers[n - 1].end += sign * last_pad;
}

/// Nodes of `nodes` whose `layer_id` is `layer`.
pub fn nodes_of_layer(frame: &Frame<'_>, nodes: &[NodeIndex], layer: usize) -> Vec<NodeIndex> {
    nodes
        .iter()
        .copied()
        .filter(|&n| frame.layer_id(n) == Some(layer))
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/rust/test_layered_layers.rs"]
mod tests;
