/// Media and static asset path resolution.
pub mod resolve;
