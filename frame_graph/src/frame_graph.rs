use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use nalgebra::Isometry3;

use crate::{
    frame::{Frame, FrameId, FrameRef},
    frame_arena::FrameArena,
    frame_error::FrameError,
    frame_path::{self, FramePath},
    relative_pose::RelativePose,
};

/// Distinguishes graph instances so a handle minted by one graph cannot
/// silently resolve against another.
static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// A tree of named coordinate frames and their relative poses.
///
/// The graph owns an implicit root frame at path `"/"` with an identity local
/// pose. Every other frame is added under an existing parent and stores its
/// pose relative to that parent. Relative poses between arbitrary frames are
/// obtained by composing local poses along the tree.
///
/// The graph has no internal synchronization; callers that share one across
/// threads must serialize access themselves.
#[derive(Debug)]
pub struct FrameGraph {
    graph_id: u64,
    arena: FrameArena,
    root: FrameId,
}

impl FrameGraph {
    pub fn new() -> Self {
        let mut arena = FrameArena::default();
        let root = arena.insert(Frame::new(String::new(), Isometry3::identity(), None));
        FrameGraph {
            graph_id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            arena,
            root,
        }
    }

    /// Adds a new frame under the frame at `parent_path`, with `local_pose`
    /// relative to that parent, and returns a handle to it.
    ///
    /// The parent must already exist; missing intermediate frames are never
    /// created implicitly. Fails with [`FrameError::InvalidPath`] if
    /// `parent_path` does not resolve or `name` is not a valid frame name,
    /// and with [`FrameError::NameCollision`] if the parent already has a
    /// child of that name. On failure the tree is left untouched.
    pub fn add_frame(
        &mut self,
        parent_path: &str,
        name: &str,
        local_pose: Isometry3<f64>,
    ) -> Result<FrameRef, FrameError> {
        if !frame_path::is_valid_name(name) {
            return Err(FrameError::InvalidPath(format!(
                "'{name}' is not a valid frame name"
            )));
        }
        let parent_id = self.resolve_str(parent_path)?;
        if self.node(parent_id).children.contains_key(name) {
            return Err(FrameError::NameCollision {
                parent: self.absolute_path_of(parent_id),
                name: name.to_string(),
            });
        }

        let child_id = self
            .arena
            .insert(Frame::new(name.to_string(), local_pose, Some(parent_id)));
        self.node_mut(parent_id)
            .children
            .insert(name.to_string(), child_id);
        debug!("added frame '{name}' under '{parent_path}'");
        Ok(self.handle(child_id))
    }

    /// Deletes the frame at `path` together with its entire subtree. Every
    /// outstanding handle or [`RelativePose`] into the subtree becomes stale.
    ///
    /// The root frame is undeletable; `delete_frame("/")` fails with
    /// [`FrameError::CannotDeleteRoot`].
    pub fn delete_frame(&mut self, path: &str) -> Result<(), FrameError> {
        let id = self.resolve_str(path)?;
        if id == self.root {
            return Err(FrameError::CannotDeleteRoot);
        }

        let (name, parent_id) = {
            let frame = self.node(id);
            (frame.name.clone(), frame.parent)
        };
        if let Some(parent_id) = parent_id {
            self.node_mut(parent_id).children.remove(&name);
        }

        // Drop the subtree, visiting each descendant exactly once.
        let mut pending = vec![id];
        let mut dropped = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(frame) = self.arena.remove(next) {
                pending.extend(frame.children.values().copied());
                dropped += 1;
            }
        }
        debug!("deleted frame '{path}' ({dropped} frames including descendants)");
        Ok(())
    }

    /// Returns the pose of the frame at `path` relative to its parent.
    pub fn local_pose(&self, path: &str) -> Result<Isometry3<f64>, FrameError> {
        let id = self.resolve_str(path)?;
        Ok(self.node(id).local_pose)
    }

    /// Returns the pose of the referenced frame relative to its parent.
    pub fn local_pose_of(&self, frame: &FrameRef) -> Result<Isometry3<f64>, FrameError> {
        let id = self.live(frame)?;
        Ok(self.node(id).local_pose)
    }

    /// Overwrites the local pose of the frame at `path`. Children keep their
    /// own local poses, so their effective global poses shift along.
    pub fn set_local_pose(&mut self, path: &str, pose: Isometry3<f64>) -> Result<(), FrameError> {
        let id = self.resolve_str(path)?;
        self.node_mut(id).local_pose = pose;
        Ok(())
    }

    /// Overwrites the local pose of the referenced frame.
    pub fn set_local_pose_of(
        &mut self,
        frame: &FrameRef,
        pose: Isometry3<f64>,
    ) -> Result<(), FrameError> {
        let id = self.live(frame)?;
        self.node_mut(id).local_pose = pose;
        Ok(())
    }

    /// Computes the pose of the frame at `dst_path` expressed in the
    /// coordinates of the frame at `src_path`. The two frames may lie on
    /// unrelated branches of the tree.
    pub fn pose(&self, dst_path: &str, src_path: &str) -> Result<Isometry3<f64>, FrameError> {
        let dst = self.resolve_str(dst_path)?;
        let src = self.resolve_str(src_path)?;
        Ok(self.pose_between(dst, src))
    }

    /// Same computation as [`pose`](Self::pose), using the frame pair already
    /// resolved inside `relative_pose` and skipping path parsing.
    pub fn pose_of(&self, relative_pose: &RelativePose) -> Result<Isometry3<f64>, FrameError> {
        let dst = self.live(&relative_pose.dst())?;
        let src = self.live(&relative_pose.src())?;
        Ok(self.pose_between(dst, src))
    }

    /// Resolves both paths once and returns a [`RelativePose`] that remembers
    /// the pair for repeated [`pose_of`](Self::pose_of) queries.
    ///
    /// `dst_path` must be absolute. `src_path` may be relative, in which case
    /// it is anchored at the graph root.
    pub fn create_relative_pose(
        &self,
        dst_path: &str,
        src_path: &str,
    ) -> Result<RelativePose, FrameError> {
        let dst = FramePath::parse(dst_path)?;
        if !dst.is_absolute() {
            return Err(FrameError::InvalidPath(format!(
                "destination path '{dst_path}' must be absolute"
            )));
        }
        let dst = self.resolve(&dst, self.root)?;
        let src = self.resolve(&FramePath::parse(src_path)?, self.root)?;
        Ok(RelativePose::new(self.handle(dst), self.handle(src)))
    }

    /// Resolves `path` and returns a non-owning handle to the frame.
    pub fn frame(&self, path: &str) -> Result<FrameRef, FrameError> {
        let id = self.resolve_str(path)?;
        Ok(self.handle(id))
    }

    /// Resolves `relative_path` starting at the frame denoted by `start`.
    /// An absolute path resolves from the root regardless of `start`.
    pub fn frame_relative(
        &self,
        start: &FrameRef,
        relative_path: &str,
    ) -> Result<FrameRef, FrameError> {
        let start = self.live(start)?;
        let path = FramePath::parse(relative_path)?;
        let id = self.resolve(&path, start)?;
        Ok(self.handle(id))
    }

    /// Returns the name of the referenced frame. The root's name is empty.
    pub fn name(&self, frame: &FrameRef) -> Result<String, FrameError> {
        let id = self.live(frame)?;
        Ok(self.node(id).name.clone())
    }

    /// Returns the absolute path of the referenced frame.
    pub fn frame_path(&self, frame: &FrameRef) -> Result<String, FrameError> {
        let id = self.live(frame)?;
        Ok(self.absolute_path_of(id))
    }

    /// Enumerates the absolute paths of every frame in the tree, sorted.
    pub fn frame_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            paths.push(self.absolute_path_of(id));
            pending.extend(self.node(id).children.values().copied());
        }
        paths.sort();
        paths
    }

    fn handle(&self, id: FrameId) -> FrameRef {
        FrameRef {
            graph_id: self.graph_id,
            id,
        }
    }

    /// Checks that a handle belongs to this graph and still refers to a live
    /// frame.
    fn live(&self, frame: &FrameRef) -> Result<FrameId, FrameError> {
        if frame.graph_id != self.graph_id || self.arena.get(frame.id).is_none() {
            return Err(FrameError::FrameDeleted);
        }
        Ok(frame.id)
    }

    /// Callers only pass ids that were just resolved against this graph.
    fn node(&self, id: FrameId) -> &Frame {
        self.arena.get(id).expect("resolved frame id is live")
    }

    fn node_mut(&mut self, id: FrameId) -> &mut Frame {
        self.arena.get_mut(id).expect("resolved frame id is live")
    }

    fn resolve_str(&self, path: &str) -> Result<FrameId, FrameError> {
        let path = FramePath::parse(path)?;
        self.resolve(&path, self.root)
    }

    /// Walks the segment sequence from `start` (or from the root for an
    /// absolute path), descending into the named child at each step.
    fn resolve(&self, path: &FramePath, start: FrameId) -> Result<FrameId, FrameError> {
        let mut current = if path.is_absolute() { self.root } else { start };
        for segment in path.segments() {
            current = *self.node(current).children.get(segment).ok_or_else(|| {
                FrameError::InvalidPath(format!(
                    "no frame named '{segment}' in '{}'",
                    self.absolute_path_of(current)
                ))
            })?;
        }
        Ok(current)
    }

    /// Pose of `dst` expressed in `src`, composed through the lowest common
    /// ancestor of the two frames. Equal to `T_root_src⁻¹ * T_root_dst`; the
    /// shared ancestor prefix cancels in that product, so the walk stops at
    /// the LCA instead of the root.
    fn pose_between(&self, dst: FrameId, src: FrameId) -> Isometry3<f64> {
        let dst_chain = self.ancestor_chain(dst);
        let src_chain = self.ancestor_chain(src);

        let mut common = 0;
        while common < dst_chain.len()
            && common < src_chain.len()
            && dst_chain[common] == src_chain[common]
        {
            common += 1;
        }

        let dst_to_lca = self.compose_descending(&dst_chain[common..]);
        let src_to_lca = self.compose_descending(&src_chain[common..]);
        src_to_lca.inv_mul(&dst_to_lca)
    }

    /// Chain of frame ids from the root down to `id`, inclusive.
    fn ancestor_chain(&self, id: FrameId) -> Vec<FrameId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Composes the local poses of a root-to-leaf slice of frame ids,
    /// ancestors first.
    fn compose_descending(&self, ids: &[FrameId]) -> Isometry3<f64> {
        let mut pose = Isometry3::identity();
        for id in ids {
            pose *= self.node(*id).local_pose;
        }
        pose
    }

    fn absolute_path_of(&self, id: FrameId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            names.push(self.node(current).name.clone());
            current = parent;
        }
        if names.is_empty() {
            return frame_path::SEPARATOR.to_string();
        }
        let mut out = String::new();
        for name in names.iter().rev() {
            out.push(frame_path::SEPARATOR);
            out.push_str(name);
        }
        out
    }
}

impl Default for FrameGraph {
    fn default() -> Self {
        Self::new()
    }
}
