//! Frame scheduling with explicit cancellation.
//!
//! The host environment decides *when* a frame runs (a display refresh, a
//! redraw request, a plain loop). [`FrameLoop`] decides *whether* it runs:
//! once its [`CancellationToken`] is cancelled, no further update or render
//! happens.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::animator::Animator;
use crate::render::Renderer;

/// Shared flag that stops a [`FrameLoop`].
///
/// Clones observe the same flag, so a clone can be handed to whatever code
/// decides when the animation should end.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop before its next frame.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// What a call to [`FrameLoop::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The frame was updated and drawn; schedule the next one.
    Rendered,
    /// The token was cancelled; nothing ran and nothing should be scheduled.
    Cancelled,
}

/// An animator registered as the per-frame callback of its host.
pub struct FrameLoop<R: Renderer> {
    animator: Animator<R>,
    token: CancellationToken,
}

impl<R: Renderer> FrameLoop<R> {
    pub fn new(animator: Animator<R>) -> Self {
        Self::with_token(animator, CancellationToken::new())
    }

    /// Use an existing token, e.g. one already shared with a signal handler.
    pub fn with_token(animator: Animator<R>, token: CancellationToken) -> Self {
        Self { animator, token }
    }

    /// A handle that cancels this loop.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run one frame unless cancelled.
    pub fn tick(&mut self) -> Result<Tick, R::Error> {
        if self.token.is_cancelled() {
            return Ok(Tick::Cancelled);
        }
        self.animator.frame()?;
        Ok(Tick::Rendered)
    }

    /// Run up to `frames` frames back to back, stopping early on
    /// cancellation. Returns the number of frames that ran.
    pub fn run_frames(&mut self, frames: u64) -> Result<u64, R::Error> {
        let mut ran = 0;
        while ran < frames {
            match self.tick()? {
                Tick::Rendered => ran += 1,
                Tick::Cancelled => break,
            }
        }
        Ok(ran)
    }

    #[inline]
    pub fn animator(&self) -> &Animator<R> {
        &self.animator
    }

    #[inline]
    pub fn animator_mut(&mut self) -> &mut Animator<R> {
        &mut self.animator
    }

    /// Cancel the loop and tear the animator down.
    pub fn teardown(self) -> R {
        self.token.cancel();
        self.animator.teardown()
    }
}
