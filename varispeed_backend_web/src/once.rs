// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot event subscription.
//!
//! [`listen`] registers a handler that fires at most once and then
//! deregisters itself: the listener is added with `{ once: true }` so the
//! browser removes it after the first dispatch, and the backing closure is
//! built with [`Closure::once_into_js`] so its memory is reclaimed when it
//! runs. If the event never fires, the closure lives for the rest of the
//! page — acceptable for the two uses here (the page `load` wait and the
//! deferred apply-on-play), both of which are page-lifetime anyway.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// Subscribes `handler` to the next `kind` event on `target`, auto-removing
/// the subscription once it fires.
pub fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnOnce(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(handler);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        callback.unchecked_ref(),
        &options,
    )
}
