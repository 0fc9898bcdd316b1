pub mod coords;
pub mod date_conv;
pub mod place;
pub mod trips;
