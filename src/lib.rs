#![warn(clippy::all, rust_2018_idioms)]

mod animator;
mod app;
mod camera;
mod error;
mod geometry;
mod render;
mod scene;
mod settings;
mod stats;
mod sun;
mod texture;
mod uniform;
mod util;

pub use app::FjordApp;
pub use error::RenderError;
