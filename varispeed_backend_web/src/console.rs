// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`TraceSink`] that writes one console line per event.

use alloc::format;

use wasm_bindgen::JsValue;

use varispeed_core::rate::PlaybackRate;
use varispeed_core::trace::{AttachStage, TraceSink};

/// Logs trace events through `console.log`, prefixed with `varispeed:`.
///
/// Dispatch only happens when the `trace` feature is enabled; without it the
/// [`Tracer`](varispeed_core::trace::Tracer) call sites compile to nothing
/// and this sink is never reached.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleTraceSink;

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(&format!("varispeed: {message}")));
}

impl TraceSink for ConsoleTraceSink {
    fn on_attach_stage(&mut self, stage: AttachStage) {
        let label = match stage {
            AttachStage::LoadWait => "waiting for page load",
            AttachStage::FrameDocument => "player frame document acquired",
            AttachStage::VideoElement => "video element located",
            AttachStage::ControlsContainer => "controls container found",
        };
        log(label);
    }

    fn on_poll_attempt(&mut self, attempt: u32) {
        log(&format!("controls lookup attempt {attempt} missed"));
    }

    fn on_attached(&mut self) {
        log("speed control attached");
    }

    fn on_menu_toggled(&mut self, open: bool) {
        log(if open { "menu opened" } else { "menu closed" });
    }

    fn on_rate_selected(&mut self, rate: PlaybackRate, deferred: bool) {
        if deferred {
            log(&format!("selected {rate}, deferred until playback starts"));
        } else {
            log(&format!("selected {rate}, applied"));
        }
    }

    fn on_pending_flushed(&mut self, rate: PlaybackRate) {
        log(&format!("playback started, applied deferred {rate}"));
    }
}
