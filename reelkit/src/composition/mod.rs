//! Built-in compositions and the registry that names them.
//!
//! Each composition is a pure function of its props and a frame index. Nothing in here touches
//! the filesystem or spawns work.

/// Slot-machine battle intro.
pub mod battle;
/// Spinning reels.
pub mod reel;
/// Composition registry and typed props.
pub mod registry;
/// Single-image reveal clips.
pub mod reveal;
/// Media stitching with transitions.
pub mod stitch;
