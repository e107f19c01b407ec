//! Domain records produced by a filter query.

pub mod event;

pub use event::Event;
