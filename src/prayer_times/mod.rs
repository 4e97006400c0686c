pub mod api;
pub mod calendar;
pub mod error;
pub mod store;

pub use api::AladhanClient;
pub use calendar::{MonthCalendar, RamadanCalendar};
pub use error::CalendarError;
pub use store::CalendarStore;
