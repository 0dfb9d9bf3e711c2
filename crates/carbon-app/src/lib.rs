// Application layer and command-line surface

pub mod application;
pub mod presentation;
