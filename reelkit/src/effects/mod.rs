/// Transition styles between stitched clips.
pub mod transitions;
