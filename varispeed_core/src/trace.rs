// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for attach and selection.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the startup flow and the selection handlers call at each stage. All
//! method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::rate::PlaybackRate;

/// Which startup stage just completed (or, for the load wait, began).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttachStage {
    /// Waiting on the hosting page's load event.
    LoadWait,
    /// The player iframe's document was acquired.
    FrameDocument,
    /// The video element was located.
    VideoElement,
    /// The controls container turned up.
    ControlsContainer,
}

/// Receives trace events from the attach flow and selection handlers.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called as each startup stage is reached.
    fn on_attach_stage(&mut self, stage: AttachStage) {
        _ = stage;
    }

    /// Called on each failed controls-container lookup, with the 1-based
    /// attempt number.
    fn on_poll_attempt(&mut self, attempt: u32) {
        _ = attempt;
    }

    /// Called once the widget is built and inserted into the control bar.
    fn on_attached(&mut self) {}

    /// Called when a button activation toggles the menu.
    fn on_menu_toggled(&mut self, open: bool) {
        _ = open;
    }

    /// Called when a rate is selected. `deferred` is `true` when the video
    /// was paused and the apply is parked for the next play notification.
    fn on_rate_selected(&mut self, rate: PlaybackRate, deferred: bool) {
        _ = (rate, deferred);
    }

    /// Called when a deferred rate is flushed by a play notification.
    fn on_pending_flushed(&mut self, rate: PlaybackRate) {
        _ = rate;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AttachStage`] event.
    #[inline]
    pub fn attach_stage(&mut self, stage: AttachStage) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attach_stage(stage);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = stage;
        }
    }

    /// Emits a poll-attempt event.
    #[inline]
    pub fn poll_attempt(&mut self, attempt: u32) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_poll_attempt(attempt);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = attempt;
        }
    }

    /// Emits the attach-completed event.
    #[inline]
    pub fn attached(&mut self) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attached();
        }
    }

    /// Emits a menu-toggled event.
    #[inline]
    pub fn menu_toggled(&mut self, open: bool) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_menu_toggled(open);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = open;
        }
    }

    /// Emits a rate-selected event.
    #[inline]
    pub fn rate_selected(&mut self, rate: PlaybackRate, deferred: bool) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rate_selected(rate, deferred);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (rate, deferred);
        }
    }

    /// Emits a pending-flushed event.
    #[inline]
    pub fn pending_flushed(&mut self, rate: PlaybackRate) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pending_flushed(rate);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_every_event() {
        let mut sink = NoopSink;
        sink.on_attach_stage(AttachStage::LoadWait);
        sink.on_poll_attempt(3);
        sink.on_attached();
        sink.on_menu_toggled(true);
        sink.on_rate_selected(PlaybackRate::new(1.5), false);
        sink.on_pending_flushed(PlaybackRate::new(2.0));
    }

    #[test]
    fn none_tracer_is_inert() {
        let mut tracer = Tracer::none();
        tracer.attach_stage(AttachStage::FrameDocument);
        tracer.poll_attempt(1);
        tracer.attached();
        tracer.menu_toggled(false);
        tracer.rate_selected(PlaybackRate::new(0.5), true);
        tracer.pending_flushed(PlaybackRate::new(0.5));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_the_sink() {
        #[derive(Default)]
        struct Counting {
            stages: u32,
            polls: u32,
            selected: u32,
        }

        impl TraceSink for Counting {
            fn on_attach_stage(&mut self, _stage: AttachStage) {
                self.stages += 1;
            }

            fn on_poll_attempt(&mut self, _attempt: u32) {
                self.polls += 1;
            }

            fn on_rate_selected(&mut self, _rate: PlaybackRate, _deferred: bool) {
                self.selected += 1;
            }
        }

        let mut sink = Counting::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.attach_stage(AttachStage::LoadWait);
        tracer.attach_stage(AttachStage::VideoElement);
        tracer.poll_attempt(1);
        tracer.rate_selected(PlaybackRate::new(1.25), false);

        assert_eq!(sink.stages, 2);
        assert_eq!(sink.polls, 1);
        assert_eq!(sink.selected, 1);
    }
}
