//! Attribute wheel: which category comes up next.

pub mod spinner;

pub use spinner::AttributeWheel;
