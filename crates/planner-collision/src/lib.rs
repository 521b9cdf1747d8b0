//! # Factory Planner Collision
//!
//! Footprint overlap detection. The editor asks whether the building under
//! the cursor would overlap anything already placed; the whole-layout check
//! reports every overlapping pair. Results are advisory and never block a
//! placement.

pub mod checker;
pub mod overlap;

pub use checker::{find_overlaps, footprints_overlap, CollisionChecker, DEFAULT_EPSILON};
pub use overlap::Overlap;
