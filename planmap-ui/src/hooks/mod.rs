mod fullscreen;
mod image_loading;
mod viewport_interaction;

pub use fullscreen::{use_fullscreen, DocumentFullscreen, FullscreenHandle};
pub use image_loading::use_image_loading;
pub use viewport_interaction::{
    use_viewport_interaction, ViewportHandle, CONTROL_ATTRIBUTE, REGION_ATTRIBUTE,
};
