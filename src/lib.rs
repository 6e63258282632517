pub mod background;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod raster;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod surface;
