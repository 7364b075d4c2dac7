pub mod bottom_nav;
pub mod components;
pub mod theme;

pub use bottom_nav::BottomNavigationWidget;
