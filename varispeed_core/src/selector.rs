// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rate-selection state machine.
//!
//! [`SelectorState`] is the single source of truth for the speed control:
//! which rate is selected, whether the dropdown menu is open, and whether a
//! rate change is still waiting for playback to start. The presentation
//! layer renders *from* this state and never feeds attribute values back —
//! checked marks, the button label, and menu visibility are all derived
//! here.
//!
//! # Change tracking
//!
//! Mutating operations mark change bits. [`take_changes`] drains them as a
//! [`SelectionChanges`], which the backend hands to
//! [`SelectorPresenter::render`] together with the state, so a render pass
//! only touches the parts of the native control that moved.
//!
//! # Deferred application
//!
//! Selecting a rate while the video is paused must not take effect until
//! playback starts (the host player resets externally-set rates on some
//! resume paths). The machine holds at most one pending rate; a later
//! selection while paused replaces it. [`playback_started`] takes the
//! pending rate — at most once per deferral, so a second play notification
//! applies nothing.
//!
//! The button label is updated optimistically at selection time even when
//! the apply is deferred; if playback never starts, the label and the actual
//! playback rate diverge. That mirrors the host control's observed behavior
//! and is accepted rather than hidden.
//!
//! [`take_changes`]: SelectorState::take_changes
//! [`playback_started`]: SelectorState::playback_started
//! [`SelectorPresenter::render`]: crate::backend::SelectorPresenter::render

use alloc::string::String;

use crate::backend::MediaHandle;
use crate::rate::{PlaybackRate, RateSet};

/// Visibility of the dropdown menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// The menu is hidden; only the toggle button shows.
    Closed,
    /// The menu is expanded above the button.
    Open,
}

/// What the caller must do to the media element after a selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectEffect {
    /// The video is playing: set the playback rate now.
    Apply(PlaybackRate),
    /// The video is paused: the rate is parked as pending and must be
    /// flushed on the next play notification.
    Defer(PlaybackRate),
}

/// Drained change bits for an incremental render pass.
///
/// Produced by [`SelectorState::take_changes`]; consumed by
/// [`SelectorPresenter::render`](crate::backend::SelectorPresenter::render).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionChanges {
    /// Menu visibility changed.
    pub menu: bool,
    /// The selected rate changed (button label and checked marks).
    pub selection: bool,
}

impl SelectionChanges {
    /// Changes with every bit set, for the initial full render.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            menu: true,
            selection: true,
        }
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.menu && !self.selection
    }
}

/// The selection state machine for one speed control.
///
/// Created once per attached control and owned for the life of the page.
/// All mutation happens on the single UI-event thread.
#[derive(Debug)]
pub struct SelectorState {
    rates: RateSet,
    selected: usize,
    menu: MenuState,
    pending: Option<PlaybackRate>,
    changes: SelectionChanges,
}

impl SelectorState {
    /// Creates a selector over `rates`, initially selecting normal speed
    /// (the host video's assumed starting rate) with the menu closed.
    #[must_use]
    pub fn new(rates: RateSet) -> Self {
        let selected = rates.default_index();
        Self {
            rates,
            selected,
            menu: MenuState::Closed,
            pending: None,
            changes: SelectionChanges::default(),
        }
    }

    /// The rate table this selector offers.
    #[inline]
    #[must_use]
    pub fn rates(&self) -> &RateSet {
        &self.rates
    }

    /// Index of the currently selected rate. Exactly this item renders as
    /// checked.
    #[inline]
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The currently selected rate.
    #[must_use]
    pub fn selected_rate(&self) -> PlaybackRate {
        self.rates
            .get(self.selected)
            .unwrap_or_else(|| unreachable!("selected index is kept in range"))
    }

    /// The toggle button's visible text: the selected rate's label.
    #[must_use]
    pub fn button_label(&self) -> String {
        self.selected_rate().label()
    }

    /// Returns `true` if the menu is currently open.
    #[inline]
    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu == MenuState::Open
    }

    /// The rate waiting for the next play notification, if any.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<PlaybackRate> {
        self.pending
    }

    /// Toggles menu visibility. Every button activation lands here
    /// regardless of prior state: closed becomes open, open becomes closed.
    ///
    /// Returns the new open state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu = match self.menu {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        self.changes.menu = true;
        self.menu_open()
    }

    /// Selects the rate at `index`.
    ///
    /// Runs the full sequence even when `index` is already selected (the end
    /// state is idempotent, not short-circuited): the selection moves, the
    /// menu closes unconditionally, and the effect tells the caller whether
    /// to set the playback rate now (`paused == false`) or park it for the
    /// next play notification (`paused == true`). A pending rate from an
    /// earlier paused selection is replaced, never stacked.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Items are built from the same
    /// rate set, so an out-of-range index is a wiring bug.
    pub fn select(&mut self, index: usize, paused: bool) -> SelectEffect {
        let rate = self
            .rates
            .get(index)
            .unwrap_or_else(|| panic!("rate index {index} out of range"));

        self.selected = index;
        self.changes.selection = true;

        if self.menu == MenuState::Open {
            self.changes.menu = true;
        }
        self.menu = MenuState::Closed;

        if paused {
            self.pending = Some(rate);
            SelectEffect::Defer(rate)
        } else {
            self.pending = None;
            SelectEffect::Apply(rate)
        }
    }

    /// Selects the rate at `index` against a live media handle: queries its
    /// paused flag and, when playing, writes the new rate immediately.
    ///
    /// Deferred flushes still go through [`playback_started`] /
    /// [`flush_pending`](Self::flush_pending) when the media emits its play
    /// notification.
    ///
    /// [`playback_started`]: Self::playback_started
    pub fn select_with(&mut self, index: usize, media: &mut dyn MediaHandle) -> SelectEffect {
        let effect = self.select(index, media.paused());
        if let SelectEffect::Apply(rate) = effect {
            media.set_rate(rate.value());
        }
        effect
    }

    /// Takes the pending rate on a play notification.
    ///
    /// Fires at most once per deferral: the first call after a paused
    /// selection yields the parked rate, subsequent calls yield `None`
    /// until another paused selection occurs.
    pub fn playback_started(&mut self) -> Option<PlaybackRate> {
        self.pending.take()
    }

    /// Flushes the pending rate into `media` on a play notification.
    ///
    /// Returns the applied rate, or `None` if nothing was pending.
    pub fn flush_pending(&mut self, media: &mut dyn MediaHandle) -> Option<PlaybackRate> {
        let rate = self.playback_started()?;
        media.set_rate(rate.value());
        Some(rate)
    }

    /// Drains the accumulated change bits for an incremental render pass.
    pub fn take_changes(&mut self) -> SelectionChanges {
        core::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MediaHandle;
    use alloc::vec::Vec;

    /// Records rate writes and exposes a settable paused flag.
    struct FakeMedia {
        paused: bool,
        rate: f64,
        writes: Vec<f64>,
    }

    impl FakeMedia {
        fn playing() -> Self {
            Self {
                paused: false,
                rate: 1.0,
                writes: Vec::new(),
            }
        }

        fn paused() -> Self {
            Self {
                paused: true,
                ..Self::playing()
            }
        }
    }

    impl MediaHandle for FakeMedia {
        fn paused(&self) -> bool {
            self.paused
        }

        fn set_rate(&mut self, rate: f64) {
            self.rate = rate;
            self.writes.push(rate);
        }
    }

    fn selector() -> SelectorState {
        SelectorState::new(RateSet::standard())
    }

    #[test]
    fn starts_at_normal_speed_with_menu_closed() {
        let state = selector();
        assert_eq!(state.selected_rate().value(), 1.0);
        assert_eq!(state.button_label(), "x1");
        assert!(!state.menu_open());
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn every_standard_rate_applies_immediately_while_playing() {
        for (i, expected) in RateSet::standard().iter().enumerate() {
            let mut state = selector();
            let mut media = FakeMedia::playing();
            let effect = state.select_with(i, &mut media);
            assert_eq!(effect, SelectEffect::Apply(expected));
            assert_eq!(media.rate, expected.value());
            assert_eq!(state.button_label(), expected.label());
        }
    }

    #[test]
    fn toggle_flips_in_both_directions() {
        let mut state = selector();
        assert!(state.toggle_menu());
        assert!(state.menu_open());
        assert!(!state.toggle_menu());
        assert!(!state.menu_open());
    }

    #[test]
    fn selection_closes_the_menu_from_either_state() {
        let mut state = selector();
        state.toggle_menu();
        state.select(5, false);
        assert!(!state.menu_open());

        // Already closed: stays closed.
        state.select(2, false);
        assert!(!state.menu_open());
    }

    #[test]
    fn paused_selection_defers_until_play() {
        let mut state = selector();
        let mut media = FakeMedia::paused();

        let effect = state.select_with(7, &mut media);
        assert_eq!(effect, SelectEffect::Defer(PlaybackRate::new(2.0)));
        // No write yet, but the label moved optimistically.
        assert!(media.writes.is_empty());
        assert_eq!(state.button_label(), "x2");
        assert_eq!(media.rate, 1.0);

        // Play notification flushes exactly once.
        assert_eq!(state.flush_pending(&mut media), Some(PlaybackRate::new(2.0)));
        assert_eq!(media.rate, 2.0);
        assert_eq!(state.flush_pending(&mut media), None);
        assert_eq!(media.writes.len(), 1, "second play must not reapply");
    }

    #[test]
    fn pending_rate_is_replaced_not_stacked() {
        let mut state = selector();
        state.select(1, true);
        state.select(6, true);
        assert_eq!(state.pending(), Some(PlaybackRate::new(1.75)));
        assert_eq!(state.playback_started(), Some(PlaybackRate::new(1.75)));
        assert_eq!(state.playback_started(), None);
    }

    #[test]
    fn playing_selection_clears_stale_pending() {
        let mut state = selector();
        let mut media = FakeMedia::paused();
        state.select_with(1, &mut media);
        assert!(state.pending().is_some());

        media.paused = false;
        state.select_with(4, &mut media);
        assert_eq!(state.pending(), None, "immediate apply supersedes deferral");
        assert_eq!(media.rate, 1.25);
    }

    #[test]
    fn reselecting_the_active_rate_runs_the_full_sequence() {
        let mut state = selector();
        let mut media = FakeMedia::playing();
        state.select_with(3, &mut media);
        state.toggle_menu();
        let effect = state.select_with(3, &mut media);
        assert_eq!(effect, SelectEffect::Apply(PlaybackRate::new(1.0)));
        assert_eq!(media.writes.len(), 2, "no no-op short-circuit");
        assert!(!state.menu_open());
    }

    #[test]
    fn selection_is_mutually_exclusive_and_most_recent() {
        let mut state = selector();
        for &i in &[0_usize, 5, 2, 7, 1] {
            state.select(i, false);
            assert_eq!(state.selected_index(), i);
        }
        // `selected_index` is the single checked item by construction; the
        // last selection wins.
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.button_label(), "x0.5");
    }

    #[test]
    fn changes_accumulate_and_drain() {
        let mut state = selector();
        assert!(state.take_changes().is_empty());

        state.toggle_menu();
        let changes = state.take_changes();
        assert!(changes.menu);
        assert!(!changes.selection);

        state.toggle_menu();
        state.select(5, false);
        let changes = state.take_changes();
        assert!(changes.menu, "open menu closed by selection");
        assert!(changes.selection);

        state.select(2, false);
        let changes = state.take_changes();
        assert!(!changes.menu, "closed menu stays closed");
        assert!(changes.selection);

        assert!(state.take_changes().is_empty(), "drain resets the bits");
    }

    #[test]
    fn paused_selection_with_no_play_event_never_touches_the_rate() {
        let mut state = selector();
        let mut media = FakeMedia::paused();
        state.select_with(7, &mut media);
        // No play notification ever arrives: the label says x2, the media
        // still runs at its old rate.
        assert_eq!(state.button_label(), "x2");
        assert!(media.writes.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_is_a_wiring_bug() {
        let mut state = selector();
        let _ = state.select(8, false);
    }
}
