mod nav_bar;
mod spinner;

pub use nav_bar::NavBar;
pub use spinner::LoadingSpinner;
