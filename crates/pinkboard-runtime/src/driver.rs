//! The per-frame animation loop

use crate::clock::{Clock, FrameClock, MonotonicClock};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::system::{FrameInfo, RuntimeSystem};
use crate::viewport::ViewportSync;
use log::{debug, info};
use pinkboard_core::{DrawingSurface, Result};
use std::time::{Duration, Instant};

/// Delay before the first frame so the host has laid out the surface
pub const STARTUP_DELAY: Duration = Duration::from_millis(10);

/// Runs registered systems once per display refresh.
///
/// The host calls [`AnimationDriver::on_display_refresh`] every refresh; a
/// frame runs only while a request is pending, and every frame requests the
/// next one before doing any work. [`AnimationDriver::stop`] withdraws the
/// pending request, which ends the loop.
pub struct AnimationDriver<S: DrawingSurface, C: Clock = MonotonicClock> {
    clock: FrameClock<C>,
    scheduler: FrameScheduler,
    viewport: ViewportSync,
    systems: Vec<Box<dyn RuntimeSystem<S>>>,
    initialized: bool,
    frame: u64,
}

impl<S: DrawingSurface> AnimationDriver<S, MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl<S: DrawingSurface> Default for AnimationDriver<S, MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawingSurface, C: Clock> AnimationDriver<S, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock: FrameClock::with_source(clock),
            scheduler: FrameScheduler::new(),
            viewport: ViewportSync::new(),
            systems: Vec::new(),
            initialized: false,
            frame: 0,
        }
    }

    pub fn add_system(&mut self, system: Box<dyn RuntimeSystem<S>>) {
        debug!("Registered system '{}'", system.name());
        self.systems.push(system);
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub fn viewport(&self) -> &ViewportSync {
        &self.viewport
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Schedule the first frame [`STARTUP_DELAY`] after `now`
    pub fn start(&mut self, now: Instant) -> FrameHandle {
        info!(
            "Starting animation with {} system(s): {}",
            self.systems.len(),
            self.system_names().join(", ")
        );
        self.scheduler.request_frame_after(now, STARTUP_DELAY)
    }

    /// Schedule the first frame for the next refresh
    pub fn start_immediately(&mut self) -> FrameHandle {
        self.scheduler.request_frame()
    }

    /// Cancel the pending frame. Returns false if nothing was scheduled.
    pub fn stop(&mut self) -> bool {
        match self.scheduler.pending() {
            Some(handle) => {
                info!("Stopping animation after {} frame(s)", self.frame);
                self.scheduler.cancel_frame(handle)
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.pending().is_some()
    }

    /// Forward a host resize notification to the viewport
    pub fn on_resize(&mut self, surface: &mut S, width: u32, height: u32) -> Result<bool> {
        self.viewport.on_resize(surface, width, height)
    }

    /// Record the displayed size without touching the surface; it is applied
    /// when the first frame runs
    pub fn set_displayed_size(&mut self, width: u32, height: u32) {
        self.viewport = ViewportSync::with_displayed_size(width, height);
    }

    /// Host hook for one display refresh. Returns true if a frame ran.
    pub fn on_display_refresh(&mut self, surface: &mut S, now: Instant) -> Result<bool> {
        if self.scheduler.take_due(now).is_none() {
            return Ok(false);
        }
        self.frame(surface)?;
        Ok(true)
    }

    /// Run one frame unconditionally
    pub fn frame(&mut self, surface: &mut S) -> Result<()> {
        self.scheduler.request_frame();
        let delta_time = self.clock.tick() as f32;

        if !self.initialized {
            self.viewport.apply(surface)?;
            for system in &mut self.systems {
                system.initialize(surface)?;
            }
            self.initialized = true;
        }

        surface.clear();

        let info = FrameInfo {
            delta_time,
            width: surface.width(),
            height: surface.height(),
            frame: self.frame,
        };
        for system in &mut self.systems {
            system.update(&info)?;
        }
        for system in &self.systems {
            system.draw(surface)?;
        }

        self.frame += 1;
        Ok(())
    }

    /// Stop the loop and shut every system down
    pub fn shutdown(&mut self) -> Result<()> {
        self.stop();
        for system in &mut self.systems {
            system.shutdown()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use pinkboard_core::testing::{DrawCall, RecordingSurface};
    use pinkboard_core::PinkboardError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn push(&self, s: String) {
            self.0.borrow_mut().push(s);
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut self.0.borrow_mut())
        }
    }

    struct Scripted {
        name: &'static str,
        log: Log,
        fail_on_update: bool,
    }

    impl Scripted {
        fn boxed(name: &'static str, log: &Log) -> Box<Self> {
            Box::new(Self {
                name,
                log: log.clone(),
                fail_on_update: false,
            })
        }
    }

    impl RuntimeSystem<RecordingSurface> for Scripted {
        fn initialize(&mut self, surface: &RecordingSurface) -> Result<()> {
            self.log
                .push(format!("{}:init {}x{}", self.name, surface.width, surface.height));
            Ok(())
        }

        fn update(&mut self, frame: &FrameInfo) -> Result<()> {
            if self.fail_on_update {
                return Err(PinkboardError::RenderError("boom".into()));
            }
            self.log
                .push(format!("{}:update {:.2}", self.name, frame.delta_time));
            Ok(())
        }

        fn draw(&self, surface: &mut RecordingSurface) -> Result<()> {
            self.log.push(format!("{}:draw", self.name));
            surface.fill_text(self.name, 0.0, 0.0, 10.0, pinkboard_core::Color::WHITE);
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            self.log.push(format!("{}:shutdown", self.name));
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn driver_with(log: &Log) -> (AnimationDriver<RecordingSurface, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut driver = AnimationDriver::with_clock(clock.clone());
        driver.add_system(Scripted::boxed("hearts", log));
        driver.add_system(Scripted::boxed("words", log));
        (driver, clock)
    }

    #[test]
    fn first_frame_has_zero_delta_and_initializes() {
        let log = Log::default();
        let (mut driver, clock) = driver_with(&log);
        let mut surface = RecordingSurface::new(300, 150);
        driver.set_displayed_size(800, 600);

        clock.set(5.0);
        driver.frame(&mut surface).unwrap();

        assert_eq!(
            log.take(),
            vec![
                "hearts:init 800x600",
                "words:init 800x600",
                "hearts:update 0.00",
                "words:update 0.00",
                "hearts:draw",
                "words:draw",
            ]
        );
        assert_eq!(driver.frame_count(), 1);
    }

    #[test]
    fn frames_clear_before_drawing() {
        let log = Log::default();
        let (mut driver, clock) = driver_with(&log);
        let mut surface = RecordingSurface::new(200, 100);

        driver.frame(&mut surface).unwrap();
        clock.advance(0.5);
        surface.calls.clear();
        driver.frame(&mut surface).unwrap();

        assert_eq!(
            surface.calls[0],
            DrawCall::Clear {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 100.0
            }
        );
        assert_eq!(surface.texts().count(), 2);
        assert!(log.take().contains(&"hearts:update 0.50".to_string()));
    }

    #[test]
    fn every_frame_reschedules_the_next() {
        let log = Log::default();
        let (mut driver, _clock) = driver_with(&log);
        let mut surface = RecordingSurface::new(10, 10);
        let t0 = Instant::now();

        driver.start(t0);
        assert!(!driver.on_display_refresh(&mut surface, t0).unwrap());
        let later = t0 + STARTUP_DELAY;
        assert!(driver.on_display_refresh(&mut surface, later).unwrap());
        assert!(driver.is_running());
        assert!(driver.on_display_refresh(&mut surface, later).unwrap());
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn stop_ends_the_loop() {
        let log = Log::default();
        let (mut driver, _clock) = driver_with(&log);
        let mut surface = RecordingSurface::new(10, 10);

        driver.start_immediately();
        assert!(driver.on_display_refresh(&mut surface, Instant::now()).unwrap());
        assert!(driver.stop());
        assert!(!driver.is_running());
        assert!(!driver.on_display_refresh(&mut surface, Instant::now()).unwrap());
        assert!(!driver.stop());
    }

    #[test]
    fn failed_frame_still_leaves_next_frame_requested() {
        let log = Log::default();
        let mut driver: AnimationDriver<RecordingSurface, ManualClock> =
            AnimationDriver::with_clock(ManualClock::new());
        driver.add_system(Box::new(Scripted {
            name: "broken",
            log: log.clone(),
            fail_on_update: true,
        }));
        let mut surface = RecordingSurface::new(10, 10);

        assert!(driver.frame(&mut surface).is_err());
        assert!(driver.is_running());
    }

    #[test]
    fn shutdown_stops_and_notifies_systems() {
        let log = Log::default();
        let (mut driver, _clock) = driver_with(&log);
        driver.start_immediately();
        driver.shutdown().unwrap();
        assert!(!driver.is_running());
        assert_eq!(log.take(), vec!["hearts:shutdown", "words:shutdown"]);
    }
}
