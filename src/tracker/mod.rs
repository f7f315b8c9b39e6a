//! Session tracking: the clock-in/clock-out state machine, the log of
//! finalized sessions and the clocks that timestamp them.

mod clock;
mod session;
mod session_log;

pub use clock::{Clock, FixedClock, RomeClock};
pub use session::{StopOutcome, Tracker, TrackerState};
pub use session_log::SessionLog;
