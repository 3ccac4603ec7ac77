pub mod fullscreen_button;
pub mod image_status;
pub mod interactive_map;
pub mod reset_view_button;
pub mod selection_panel;
pub mod tooltip_display;

pub use fullscreen_button::FullscreenButton;
pub use image_status::{ImageError, ImageLoader};
pub use interactive_map::InteractiveMap;
pub use reset_view_button::ResetViewButton;
pub use selection_panel::SelectionPanel;
pub use tooltip_display::TooltipDisplay;
