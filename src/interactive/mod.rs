//! Interactive constraint computation.
//!
//! Everything below runs against a read-only [`Frame`]: the scene graph plus
//! the transient overlay of the current drag. Each layout algorithm has its
//! own resolver; [`session`] picks the one matching the dragged node's level.

pub mod actions;
pub mod layered;
pub mod overlay;
pub mod rectpack;
pub mod session;
pub mod tree;

pub use actions::Action;
pub use overlay::{Frame, InteractionOverlay, NodeInteraction};
pub use session::{DragFeedback, DragSession, absolute_center, delete_constraints_action};
