//! Marker types tagging what a [`DateTimeOf`] describes.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Moment an entity was created at.
#[derive(Clone, Copy, Debug)]
pub struct Creation;
