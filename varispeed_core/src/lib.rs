// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and selection logic for injecting a playback-speed control
//! into an embedded third-party video player.
//!
//! `varispeed_core` owns everything that does not touch a browser: the fixed
//! playback-rate table, the selection state machine, the bounded poll plan
//! used while waiting for the host's control bar, and the contract that
//! platform backends implement. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! Startup flows through the backend's host acquisition into a single
//! long-lived state machine; everything afterwards is reactive:
//!
//! ```text
//!   Backend (host acquisition, PollPlan-paced)
//!       │
//!       ▼
//!   SelectorState ── toggle_menu() / select() ──► SelectionChanges
//!                                                      │
//!                     ┌────────────────────────────────┘
//!                     ▼
//!   SelectorPresenter::render() ──► native control surface
//!
//!   MediaHandle ◄── apply now, or flush via playback_started()
//! ```
//!
//! **[`rate`]** — [`PlaybackRate`](rate::PlaybackRate) and the ordered,
//! immutable [`RateSet`](rate::RateSet) of selectable multipliers.
//!
//! **[`selector`]** — The explicit selection state machine. The control
//! surface is rendered *from* this state; it is never read back from the
//! presentation layer. Mutations mark change bits that
//! [`take_changes`](selector::SelectorState::take_changes) drains as
//! [`SelectionChanges`](selector::SelectionChanges) for the presenter.
//!
//! **[`poll`]** — Bounded retry-with-delay plan for waiting on host
//! elements that render asynchronously.
//!
//! **[`backend`]** — The [`MediaHandle`](backend::MediaHandle) and
//! [`SelectorPresenter`](backend::SelectorPresenter) traits that platform
//! backends implement, plus [`HostError`](backend::HostError).
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event methods
//! for attach/selection instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod poll;
pub mod rate;
pub mod selector;
pub mod trace;
