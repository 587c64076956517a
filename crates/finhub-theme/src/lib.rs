pub mod controller;
pub mod palette;

pub use controller::{ThemeController, THEME_CHANGED_EVENT, THEME_PREFERENCE_KEY};
pub use palette::Palette;
