use crate::frame::FrameRef;

/// A resolved (destination, source) frame pair, minted by
/// [`FrameGraph::create_relative_pose`] and consumed by
/// [`FrameGraph::pose_of`] to skip path re-resolution on repeated queries.
///
/// This is a cache, not a transaction: it holds two weak handles and nothing
/// else. If either frame is deleted the next query through it fails with
/// [`FrameError::FrameDeleted`].
///
/// [`FrameGraph::create_relative_pose`]: crate::FrameGraph::create_relative_pose
/// [`FrameGraph::pose_of`]: crate::FrameGraph::pose_of
/// [`FrameError::FrameDeleted`]: crate::FrameError::FrameDeleted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelativePose {
    dst: FrameRef,
    src: FrameRef,
}

impl RelativePose {
    pub(crate) fn new(dst: FrameRef, src: FrameRef) -> Self {
        RelativePose { dst, src }
    }

    /// The destination frame handle.
    pub fn dst(&self) -> FrameRef {
        self.dst
    }

    /// The source frame handle, i.e. the frame the pose is expressed in.
    pub fn src(&self) -> FrameRef {
        self.src
    }
}
