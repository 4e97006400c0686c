pub mod calendar;
pub mod countdown;
pub mod header;
pub mod prayers;
pub mod statusbar;
pub mod times;
