pub mod animate;
pub mod camera;
pub mod constants;
pub mod mesh;
pub mod scroll;
pub mod view;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animate::*;
pub use camera::*;
pub use constants::*;
pub use mesh::*;
pub use scroll::*;
pub use view::*;
