//! Sehar/Iftar countdown: which phase we are in, what we count down to,
//! how far along the window is, and the once-a-second loop that drives it.

pub mod clock;
pub mod error;
pub mod phase;
pub mod progress;
pub mod ticker;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CountdownError;
pub use phase::{Fallbacks, Phase};
pub use ticker::{evaluate, CountdownFrame, CountdownSink, CountdownSlot, TickerOptions};
