//! Consent surface adapters.
//!
//! - `HeadlessSurface` - Records surface state without rendering
//!   anything; doubles as the test surface
//! - `HeadlessThemeSwitcher` - Records the applied theme

mod headless;

pub use headless::{HeadlessSurface, HeadlessThemeSwitcher};
