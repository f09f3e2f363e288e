//! Request-scoped value types.
//!
//! Everything here lives for a single navigation request: target
//! specifications arrive from the caller, are normalized into
//! [`NavigationTarget`] values by the resolver, and are consumed by the
//! annotation builder.

mod grounding;
mod target;

pub use grounding::{GroundingBox, GroundingChunk, GroundingPayload};
pub use target::{
    NavigationTarget, Rect, SynthesisParams, TargetSpec, TocItem, DEFAULT_HEIGHT, DEFAULT_WIDTH,
    DEFAULT_X,
};
