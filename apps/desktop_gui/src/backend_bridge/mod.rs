//! Bridge between the egui thread and the backend worker owning the cube
//! controller.

pub mod commands;
pub mod runtime;
