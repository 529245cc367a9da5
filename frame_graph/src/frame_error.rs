use thiserror::Error;

/// Enumerates the different types of errors
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameError {
    /// A path string is malformed or does not resolve to a frame in the
    /// current tree.
    #[error("frame_graph: invalid path, {0}")]
    InvalidPath(String),
    /// `add_frame` targeted a parent that already has a child of this name.
    #[error("frame_graph: frame '{name}' already exists under '{parent}'")]
    NameCollision { parent: String, name: String },
    /// A handle refers to a frame that has been deleted since the handle was
    /// created, or to a different graph instance.
    #[error("frame_graph: frame has been deleted")]
    FrameDeleted,
    /// The root frame cannot be deleted.
    #[error("frame_graph: cannot delete the root frame")]
    CannotDeleteRoot,
}
