// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Varispeed splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Host acquisition** — Locates the player frame, the video element,
//!   and the controls container, pacing the bounded wait with a
//!   [`PollPlan`](crate::poll::PollPlan). This is backend-specific and not
//!   abstracted by a trait because lookup and scheduling mechanisms differ
//!   fundamentally across platforms.
//!
//! - **Media handle** — Implements [`MediaHandle`] over the platform's
//!   playback element so the selection machine can read the paused flag and
//!   write the playback rate.
//!
//! - **Presenter** — Implements the [`SelectorPresenter`] trait to render
//!   [`SelectorState`] into a platform-native control (DOM elements on the
//!   web, recording doubles in tests).
//!
//! - **One-shot play observer** — Arms a fire-once notification that
//!   flushes a deferred rate via
//!   [`SelectorState::playback_started`](crate::selector::SelectorState::playback_started).
//!
//! # Crate boundaries
//!
//! `varispeed_core` owns the rate table, selection logic, poll planning,
//! and this contract module. Backend crates depend on `varispeed_core` and
//! provide platform glue; application code wires the two together once at
//! startup.

use core::fmt;

use crate::selector::{SelectionChanges, SelectorState};

/// The playback element the selector drives.
///
/// The host page owns the element; this system only reads its paused flag
/// and writes its rate multiplier. The element must also emit a play
/// notification consumable by a one-shot observer, but observing it is
/// platform wiring and not part of this trait.
pub trait MediaHandle {
    /// Returns `true` if playback is currently paused.
    fn paused(&self) -> bool;

    /// Sets the playback-rate multiplier (1.0 = normal speed).
    fn set_rate(&mut self, rate: f64);
}

/// Renders selection state into a platform-native control surface.
///
/// `changes` says which parts moved since the last render; current values
/// are read from `state`. Rendering is one-directional — presenters never
/// report state back.
pub trait SelectorPresenter {
    /// Applies the drained [`SelectionChanges`] to the backing control,
    /// reading current values from `state` as needed.
    fn render(&mut self, state: &SelectorState, changes: &SelectionChanges);
}

/// Which part of the host page failed to turn up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostPart {
    /// The player iframe, or its nested document, after the page load event.
    Frame,
    /// The video element inside the player frame.
    Video,
    /// The control bar container, after the poll budget was exhausted.
    Controls,
}

/// Fatal startup failure: a required host element is absent.
///
/// All three situations abort startup identically — no partial UI is
/// inserted, no fallback selector is attempted, and the error is left to
/// the platform's default unhandled-error reporting. The end user simply
/// never sees the speed control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostError {
    /// The named host part could not be found.
    NotFound(HostPart),
}

impl HostError {
    /// The host part that was missing.
    #[must_use]
    pub const fn part(self) -> HostPart {
        match self {
            Self::NotFound(part) => part,
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part() {
            HostPart::Frame => write!(f, "player iframe (or its document) not found"),
            HostPart::Video => write!(f, "video element not found in player frame"),
            HostPart::Controls => {
                write!(f, "controls container did not appear within the poll budget")
            }
        }
    }
}

impl core::error::Error for HostError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString as _};
    use alloc::vec::Vec;

    use crate::rate::RateSet;
    use crate::selector::SelectorState;

    #[test]
    fn error_names_the_missing_part() {
        assert_eq!(HostError::NotFound(HostPart::Frame).part(), HostPart::Frame);
        let msg = HostError::NotFound(HostPart::Controls).to_string();
        assert!(msg.contains("poll budget"), "got: {msg}");
    }

    /// Records every render call: the drained bits plus the label and open
    /// flag read back from the state.
    #[derive(Default)]
    struct Recording {
        renders: Vec<(SelectionChanges, String, bool)>,
    }

    impl SelectorPresenter for Recording {
        fn render(&mut self, state: &SelectorState, changes: &SelectionChanges) {
            self.renders
                .push((*changes, state.button_label(), state.menu_open()));
        }
    }

    #[test]
    fn presenter_sees_drained_bits_and_current_state() {
        let mut state = SelectorState::new(RateSet::standard());
        let mut presenter = Recording::default();

        state.toggle_menu();
        let changes = state.take_changes();
        presenter.render(&state, &changes);

        state.select(5, false);
        let changes = state.take_changes();
        presenter.render(&state, &changes);

        let (first, label, open) = &presenter.renders[0];
        assert!(first.menu && !first.selection);
        assert_eq!(label, "x1");
        assert!(*open);

        let (second, label, open) = &presenter.renders[1];
        assert!(second.menu && second.selection, "selection closed the menu");
        assert_eq!(label, "x1.5");
        assert!(!*open);
    }
}
