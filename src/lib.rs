//! A curved bottom-navigation bar for ratatui.
//!
//! A row of item cells sits on a curved background; selecting an item moves
//! the curve's control point under it while the outgoing cell shrinks its
//! circle indicator and the incoming one grows it. All animation is driven
//! by explicit [`BottomNavigation::tick`] calls from the host event loop.

pub mod animation;
pub mod cell;
pub mod config;
pub mod curve;
pub mod error;
pub mod item;
pub mod navigation;
pub mod ui;
pub mod units;

pub use error::{CurveNavError, CurveNavResult, PropertyUpdate};
pub use item::{Item, ItemId, ItemSpec};
pub use navigation::{BottomNavigation, Direction, NavStyle};
pub use ui::BottomNavigationWidget;
