//! Scene ownership: clock, palette, entities and the factory that seeds them.

pub mod clock;
pub mod entity;
pub mod factory;
pub mod palette;
pub mod state;
