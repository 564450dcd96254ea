pub mod assets;
pub mod camera;
pub mod core;
pub mod director;
pub mod error;
pub mod input;
pub mod interaction;
pub mod loading;
pub mod particles;
pub mod render;
pub mod systems;
pub mod text;
