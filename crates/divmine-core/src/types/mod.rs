//! Collection aliases used throughout divmine.

pub mod collections;
