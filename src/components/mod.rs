//! The components module contains all shared components for our app.

mod app;
mod audio;
mod cached_image;
mod icons;
mod login;
mod navigation;
mod player;
mod settings;
mod state;
mod toast;
pub mod views;

pub use app::*;
pub use audio::*;
pub use cached_image::*;
pub use icons::*;
pub use login::*;
pub use navigation::*;
pub use player::*;
pub use settings::*;
pub use state::*;
pub use toast::*;
// Views are accessed via views::ViewName
