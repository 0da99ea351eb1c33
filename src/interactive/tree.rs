//! Interactive sibling reordering for the tree (mrtree) algorithm.
//!
//! Tree levels play the part layers play in the layered algorithm, but only
//! siblings below the same parent can be reordered.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::geometry::{Direction, Point, direction_vector, dot_product};
use crate::interactive::actions::Action;
use crate::interactive::overlay::Frame;

/// Projections closer than this count as the same tree depth.
const ROOT_OFFSET_EPSILON: f64 = 0.5;

/// BFS levels of a tree level's nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeLevels {
    pub levels: Vec<Vec<NodeIndex>>,
    pub level_of: HashMap<NodeIndex, usize>,
}

/// The tree algorithm reads `Undefined` as top-down.
fn tree_direction(frame: &Frame<'_>, node: NodeIndex) -> Direction {
    match frame.direction(node) {
        Direction::Undefined => Direction::Down,
        d => d,
    }
}

fn origin_center(frame: &Frame<'_>, node: NodeIndex) -> Point {
    let o = frame.origin(node);
    let s = frame.size(node);
    Point::new(o.x + s.width / 2.0, o.y + s.height / 2.0)
}

fn projection(frame: &Frame<'_>, node: NodeIndex, direction: Direction) -> f64 {
    let c = origin_center(frame, node);
    dot_product((c.x, c.y), direction_vector(direction))
}

/// Nodes without incoming edges from the level, plus nodes sitting at the
/// root offset (the smallest projection along the tree direction).
pub fn get_root(frame: &Frame<'_>, nodes: &[NodeIndex]) -> Vec<NodeIndex> {
    let Some(&first) = nodes.first() else {
        return Vec::new();
    };
    let direction = tree_direction(frame, first);
    let members: HashSet<NodeIndex> = nodes.iter().copied().collect();
    let root_offset = nodes
        .iter()
        .map(|&n| projection(frame, n, direction))
        .fold(f64::MAX, f64::min);

    nodes
        .iter()
        .copied()
        .filter(|&n| {
            let no_parent = !frame
                .scene
                .incoming(n)
                .iter()
                .any(|src| members.contains(src) && *src != n);
            no_parent || (projection(frame, n, direction) - root_offset).abs() < ROOT_OFFSET_EPSILON
        })
        .collect()
}

/// Assign tree levels by BFS from the roots. Nodes unreachable from any root
/// get no level.
pub fn get_levels(frame: &Frame<'_>, nodes: &[NodeIndex]) -> TreeLevels {
    let members: HashSet<NodeIndex> = nodes.iter().copied().collect();
    let mut level_of: HashMap<NodeIndex, usize> = HashMap::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for root in get_root(frame, nodes) {
        if level_of.insert(root, 0).is_none() {
            queue.push_back(root);
        }
    }
    while let Some(n) = queue.pop_front() {
        let next = level_of[&n] + 1;
        for child in frame.scene.outgoing(n) {
            if members.contains(&child) && !level_of.contains_key(&child) {
                level_of.insert(child, next);
                queue.push_back(child);
            }
        }
    }

    let depth = level_of.values().copied().max().map_or(0, |m| m + 1);
    let mut levels: Vec<Vec<NodeIndex>> = vec![Vec::new(); depth];
    for &n in nodes {
        if let Some(&l) = level_of.get(&n) {
            levels[l].push(n);
        }
    }
    TreeLevels { levels, level_of }
}

/// The parent furthest along the tree direction; `None` for roots.
fn lowest_parent(
    frame: &Frame<'_>,
    members: &HashSet<NodeIndex>,
    node: NodeIndex,
    direction: Direction,
) -> Option<NodeIndex> {
    frame
        .scene
        .incoming(node)
        .into_iter()
        .filter(|src| members.contains(src) && *src != node)
        .max_by(|a, b| {
            projection(frame, *a, direction).total_cmp(&projection(frame, *b, direction))
        })
}

/// All nodes (including `target`) that share `target`'s lowest parent.
pub fn get_siblings(frame: &Frame<'_>, nodes: &[NodeIndex], target: NodeIndex) -> Vec<NodeIndex> {
    let direction = tree_direction(frame, target);
    let members: HashSet<NodeIndex> = nodes.iter().copied().collect();
    let parent = lowest_parent(frame, &members, target, direction);
    nodes
        .iter()
        .copied()
        .filter(|&n| lowest_parent(frame, &members, n, direction) == parent)
        .collect()
}

fn index_by<F>(siblings: &[NodeIndex], target: NodeIndex, coord: F) -> usize
where
    F: Fn(NodeIndex) -> f64,
{
    let mut sorted = siblings.to_vec();
    sorted.sort_by(|a, b| coord(*a).total_cmp(&coord(*b)));
    sorted.iter().position(|&n| n == target).unwrap_or(0)
}

/// Target's slot among its siblings: (before the drag, now).
pub fn sibling_positions(
    frame: &Frame<'_>,
    siblings: &[NodeIndex],
    target: NodeIndex,
) -> (usize, usize) {
    let direction = tree_direction(frame, target);
    let current = index_by(siblings, target, |n| direction.secondary(frame.origin(n)));
    let new = index_by(siblings, target, |n| direction.secondary(frame.position(n)));
    (current, new)
}

/// Position constraint for a dragged tree node, or `Refresh` if its slot
/// among its siblings did not change.
pub fn set_tree_properties(frame: &Frame<'_>, nodes: &[NodeIndex], target: NodeIndex) -> Action {
    if frame.scene.tree(target).is_none() {
        return Action::Refresh;
    }
    let siblings = get_siblings(frame, nodes, target);
    let (current, new) = sibling_positions(frame, &siblings, target);
    if current == new {
        return Action::Refresh;
    }
    let action = Action::TreeSetPositionConstraint {
        id: frame.id(target).to_string(),
        position: new,
    };
    debug!(?action, "tree drag decided");
    action
}

#[cfg(test)]
#[path = "../../tests/rust/test_tree.rs"]
mod tests;
