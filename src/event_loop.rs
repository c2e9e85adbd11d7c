use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    /// Keep going, but poll no longer than until this instant so a pending
    /// menu timer is serviced on time.
    WakeAt(Instant),
    Quit,
}

/// Drives the UI thread: polls the input driver and hands every event, plus
/// an idle call after each poll, to one handler.
///
/// Menus are single-threaded and clock-driven, so the loop never sleeps past
/// the deadline the handler last asked for.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
    wake_at: Option<Instant>,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
            wake_at: None,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// How long the next poll may block.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.wake_at {
            Some(deadline) => deadline
                .saturating_duration_since(now)
                .min(self.poll_interval),
            None => self.poll_interval,
        }
    }

    /// Run until the handler returns `Quit`.
    ///
    /// The handler receives `None` once per loop turn (tick and draw there)
    /// and `Some(event)` for every event. Bursts of queued events are drained
    /// before the next idle call so input never lags behind drawing.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            let flow = handler(&mut self.driver, None)?;
            if !self.apply(flow) {
                return Ok(());
            }

            let timeout = self.poll_timeout(Instant::now());
            if self.driver.poll(timeout)? {
                loop {
                    let event = self.driver.read()?;
                    let flow = handler(&mut self.driver, Some(event))?;
                    if !self.apply(flow) {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
    }

    /// Record the handler's answer; false means stop.
    fn apply(&mut self, flow: ControlFlow) -> bool {
        match flow {
            ControlFlow::Continue => {
                self.wake_at = None;
                true
            }
            ControlFlow::WakeAt(deadline) => {
                self.wake_at = Some(deadline);
                true
            }
            ControlFlow::Quit => false,
        }
    }
}
