use std::collections::HashMap;

use nalgebra::Isometry3;

/// Arena address of a frame: the slot index plus the generation the slot had
/// when the frame was created. A stale id can never address a frame that
/// later reused the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FrameId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

/// A single node of the frame tree.
#[derive(Clone, Debug)]
pub(crate) struct Frame {
    pub(crate) name: String,
    /// Pose of this frame relative to its parent.
    pub(crate) local_pose: Isometry3<f64>,
    /// None only for the root.
    pub(crate) parent: Option<FrameId>,
    pub(crate) children: HashMap<String, FrameId>,
}

impl Frame {
    pub(crate) fn new(name: String, local_pose: Isometry3<f64>, parent: Option<FrameId>) -> Self {
        Frame {
            name,
            local_pose,
            parent,
            children: HashMap::new(),
        }
    }
}

/// A non-owning reference to a frame in a specific [`FrameGraph`].
///
/// Holding a `FrameRef` does not keep the frame alive. Once the frame (or any
/// of its ancestors) is deleted, every operation through the handle fails with
/// [`FrameError::FrameDeleted`]. A handle is only meaningful against the graph
/// that produced it; using it with another graph fails the same way.
///
/// [`FrameGraph`]: crate::FrameGraph
/// [`FrameError::FrameDeleted`]: crate::FrameError::FrameDeleted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRef {
    pub(crate) graph_id: u64,
    pub(crate) id: FrameId,
}
