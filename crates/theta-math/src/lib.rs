//! Möbius transformation algebra and reduced-word group generation.

pub mod group;
pub mod mobius;
pub mod numeric;
