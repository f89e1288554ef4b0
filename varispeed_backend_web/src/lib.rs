// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for varispeed.
//!
//! This crate provides the browser half of the speed control:
//!
//! - [`attach`]: the one-shot startup flow (load wait → host acquisition →
//!   widget construction → handler wiring)
//! - [`acquire`]: frame/video lookup and the bounded controls poll
//! - [`SpeedMenu`]: the dropdown widget and its DOM rendering
//! - [`WebMedia`]: [`MediaHandle`] over the host's `<video>` element
//! - [`once`]: one-shot event subscription (auto-removing listener)
//! - [`ConsoleTraceSink`]: console-backed trace output (`trace` feature)

#![no_std]

extern crate alloc;

pub mod acquire;
mod attach;
mod console;
pub mod host;
mod media;
pub mod once;
mod widget;

pub use attach::{AttachConfig, attach};
pub use console::ConsoleTraceSink;
pub use media::WebMedia;
pub use varispeed_core::backend::{MediaHandle, SelectorPresenter};
pub use widget::SpeedMenu;
