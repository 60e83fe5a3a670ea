//! Terminal front end for the 2048 engine: configuration, input mapping,
//! rendering and the line-driven game loop.

pub mod app;
pub mod config;
pub mod input;
pub mod render;
