//! Background tasks module
//! 
//! The tick loop, the terminal view and the effect dispatcher that syncs
//! sessions with the backend.

pub mod display;
pub mod session_sync;
pub mod ticker;

// Re-export main functions
pub use display::display_task;
pub use session_sync::dispatch_effects;
pub use ticker::ticker_task;
