//! Visitor interaction tracking
//!
//! - `scope`: decides which routes take part in tracking
//! - `client`: browser/OS/device and address extraction
//! - `classifier`: path -> display label
//! - `tracker`: dedup window + persistence

pub mod classifier;
pub mod client;
pub mod scope;
pub mod sink;
pub mod tracker;
mod types;

pub use classifier::SectionLabels;
pub use client::ClientInfo;
pub use scope::RouteScope;
pub use sink::{InteractionStore, MemoryInteractionStore};
pub use tracker::InteractionTracker;
pub use types::{InteractionType, NewInteraction, TrackOutcome, TrackRequest};
