//! Input handling
//!
//! The engine consumes already-decoded mono sample buffers; decoding and
//! resampling belong to the caller.

pub mod segment;

pub use segment::Segment;
