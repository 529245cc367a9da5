//! A hierarchical registry of named, nested coordinate frames (a kinematic
//! tree). Frames are addressed by filesystem-like paths, carry a rigid-body
//! pose relative to their parent, and the graph answers "what is the pose of
//! frame A expressed in frame B's coordinates?" for any two frames by
//! composing local poses along the tree.
//!
//! Poses are [`nalgebra::Isometry3<f64>`] values; `*` composes them and
//! `inverse()` inverts them.
//!
//! Example usage:
//!
//! ```
//! use frame_graph::FrameGraph;
//! use nalgebra::{Isometry3, Vector3};
//!
//! let mut graph = FrameGraph::new();
//! graph.add_frame("/", "world", Isometry3::identity())?;
//! graph.add_frame("/world", "robot", Isometry3::translation(1.0, 0.0, 0.0))?;
//! graph.add_frame("/world/robot", "camera", Isometry3::translation(0.5, 0.0, 0.2))?;
//!
//! // Pose of the camera expressed in the world frame.
//! let pose = graph.pose("/world/robot/camera", "/world")?;
//! assert_eq!(pose.translation.vector, Vector3::new(1.5, 0.0, 0.2));
//!
//! // Resolve once, query repeatedly.
//! let rel = graph.create_relative_pose("/world/robot/camera", "/world")?;
//! assert_eq!(graph.pose_of(&rel)?, pose);
//! # Ok::<(), frame_graph::FrameError>(())
//! ```
//!
//! The graph exclusively owns its frames. [`FrameRef`] and [`RelativePose`]
//! are non-owning handles that detect deletion of their frame (or of an
//! ancestor) and report it as [`FrameError::FrameDeleted`] instead of
//! operating on stale state.

mod frame;
mod frame_arena;
mod frame_error;
mod frame_graph;
mod frame_path;
mod relative_pose;

pub use frame::FrameRef;
pub use frame_error::FrameError;
pub use frame_graph::FrameGraph;
pub use frame_path::{FramePath, SEPARATOR};
pub use relative_pose::RelativePose;
