pub mod a_star;
pub mod common;
pub mod platformer;
pub mod reference;
pub mod standard;
