//! Pinkboard Runtime - Frame loop infrastructure
//!
//! Provides the building blocks of the display-synchronized animation loop:
//! - `FrameClock` - per-frame delta time from a wall or manual clock
//! - `FrameScheduler` - cancellable "run me on the next refresh" requests
//! - `RuntimeSystem` - trait for systems updated and drawn every frame
//! - `ViewportSync` - keeps the surface's pixel size equal to its displayed size
//! - `AnimationDriver` - ties the above into the per-frame procedure

mod clock;
mod driver;
mod scheduler;
mod system;
mod viewport;

pub use clock::{Clock, FrameClock, ManualClock, MonotonicClock};
pub use driver::{AnimationDriver, STARTUP_DELAY};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use system::{FrameInfo, RuntimeSystem};
pub use viewport::ViewportSync;
