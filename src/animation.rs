use anyhow::Result;
use log::debug;

/// Platform primitive that runs a callback on the next display refresh.
pub trait FrameScheduler {
    type Handle;

    /// Queues one frame callback and returns a handle that can cancel it.
    fn request_frame(&mut self) -> Result<Self::Handle>;

    /// Cancels a previously queued frame callback.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Self-rescheduling frame loop with explicit state.
///
/// Every tick queues the next frame before the caller does any work, so the
/// loop keeps going as long as it is running. Stopping cancels the queued
/// frame and is final: a stopped loop ignores ticks and never reschedules.
#[derive(Debug)]
pub struct FrameLoop<H> {
    state: LoopState,
    pending: Option<H>,
    frames: u64,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
            frames: 0,
        }
    }
}

impl<H> FrameLoop<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of ticks that ran frame work.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn start<S>(&mut self, scheduler: &mut S) -> Result<()>
    where
        S: FrameScheduler<Handle = H>,
    {
        match self.state {
            LoopState::Idle => {
                self.pending = Some(scheduler.request_frame()?);
                self.state = LoopState::Running;
            }
            LoopState::Running => {}
            LoopState::Stopped => debug!("frame loop already stopped; ignoring start"),
        }
        Ok(())
    }

    /// Called from the frame callback. Returns `true` when the caller should
    /// run this frame's work. A failed request stops the loop.
    pub fn tick<S>(&mut self, scheduler: &mut S) -> Result<bool>
    where
        S: FrameScheduler<Handle = H>,
    {
        if self.state != LoopState::Running {
            return Ok(false);
        }
        // The delivered frame is consumed; queue the next one before any work.
        match scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                self.frames += 1;
                Ok(true)
            }
            Err(err) => {
                self.pending = None;
                self.state = LoopState::Stopped;
                Err(err.context("failed to schedule next frame; frame loop stopped"))
            }
        }
    }

    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }
}
