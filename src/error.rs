use thiserror::Error;

pub type Result<T> = std::result::Result<T, InteractionError>;

/// Failures at the boundary where a scene is ingested or looked up by id.
///
/// The resolvers themselves never fail; they degrade to `Action::Refresh`.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    #[error("node {id} has no parent level")]
    NoParent { id: String },

    #[error("edge {edge} references unknown node {node}")]
    DanglingEdge { edge: String, node: String },

    #[error("unknown direction '{value}'; use UNDEFINED, RIGHT, LEFT, DOWN or UP")]
    UnknownDirection { value: String },

    #[error("node {node}: property {key} is missing")]
    MissingProperty { node: String, key: String },

    #[error("node {node}: property {key} must be {expected}")]
    InvalidProperty {
        node: String,
        key: String,
        expected: &'static str,
    },
}

impl InteractionError {
    #[must_use]
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    #[must_use]
    pub fn missing(node: &str, key: &str) -> Self {
        Self::MissingProperty {
            node: node.to_string(),
            key: key.to_string(),
        }
    }

    #[must_use]
    pub fn invalid(node: &str, key: &str, expected: &'static str) -> Self {
        Self::InvalidProperty {
            node: node.to_string(),
            key: key.to_string(),
            expected,
        }
    }
}
