//! # StickerKit Editor
//!
//! Transform engine for the sticker editing overlay. When an element is
//! focused it gets a highlight and an action cluster of four buttons laid
//! out on the element's bounding circle:
//!
//! - **Delete** (top-left corner): removes the element
//! - **Pin** (top-right corner): brings the element and the cluster to the front
//! - **Move** (top center): drag to translate
//! - **Resize-Rotate** (bottom-right corner): drag to scale and rotate about
//!   the element's center
//!
//! ## Components
//!
//! - [`placement`]: pure cluster layout from the element's pose
//! - [`gesture`]: the Move and Resize-Rotate drag controllers
//! - [`coordinator`]: focus, event routing and batched commits
//! - [`host`]: the traits a view tree implements to carry the overlay
//! - [`scene`]: an in-memory host
//!
//! Angles are in degrees, clockwise-positive on a y-down screen.

pub mod command;
pub mod coordinator;
pub mod focus;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod placement;
pub mod pose;
pub mod scene;

pub use command::{CommitBatch, HostCommand};
pub use coordinator::EditCoordinator;
pub use focus::FocusManager;
pub use geometry::{corner_angle, normalize_angle, pointer_angle};
pub use gesture::{GestureController, GesturePhase, MoveGesture, ResizeRotateGesture};
pub use host::{EditorHost, LayoutPhase};
pub use placement::{recompute, ActionSlot, ClusterLayout, ClusterTransform, CornerAngles};
pub use pose::{ElementPose, PoseUpdate, TransformState};
pub use scene::{PaintItem, SceneElement, SceneHost};
