pub mod common;
pub mod player;
pub mod pelada;
pub mod participation;
pub mod matches;
pub mod goal;
