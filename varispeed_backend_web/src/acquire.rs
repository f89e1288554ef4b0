// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host acquisition: frame document, video element, controls container.
//!
//! The first two lookups are synchronous and run only after the hosting
//! page's load event, when the iframe itself is assumed to exist; a miss is
//! fatal immediately. The controls container is the one element known to
//! render asynchronously, so [`await_controls`] polls for it on a
//! `setTimeout` cadence bounded by a [`PollPlan`] — on a miss past the
//! budget, startup fails with the same [`HostError`] taxonomy and nothing
//! is ever inserted into the page.
//!
//! Nothing in this module mutates the DOM.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlIFrameElement, HtmlVideoElement};

use varispeed_core::backend::{HostError, HostPart};
use varispeed_core::poll::{PollPlan, PollStep};
use varispeed_core::trace::{TraceSink, Tracer};

// Direct global binding instead of the `web_sys::Window` method — the poll
// runs from timeout context where re-fetching (and unwrapping) the Window
// object each tick buys nothing.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;
}

/// Reads the player iframe's nested document.
///
/// Runs after the hosting page's load event; the iframe is expected to
/// exist by then, so there is no retry.
pub fn frame_document(doc: &Document, selector: &str) -> Result<Document, HostError> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlIFrameElement>().ok())
        .and_then(|frame| frame.content_document())
        .ok_or(HostError::NotFound(HostPart::Frame))
}

/// Locates the video element inside the player frame.
///
/// Fatal on a miss — nothing downstream can function without it.
pub fn video_element(frame_doc: &Document, selector: &str) -> Result<HtmlVideoElement, HostError> {
    frame_doc
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
        .ok_or(HostError::NotFound(HostPart::Video))
}

struct PollState {
    frame_doc: Document,
    selector: String,
    plan: PollPlan,
    attempts: Cell<u32>,
    sink: Rc<RefCell<Box<dyn TraceSink>>>,
    on_done: RefCell<Option<Box<dyn FnOnce(Result<HtmlElement, HostError>)>>>,
}

impl PollState {
    fn lookup(&self) -> Option<HtmlElement> {
        self.frame_doc
            .query_selector(&self.selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn finish(&self, result: Result<HtmlElement, HostError>) {
        if let Some(done) = self.on_done.borrow_mut().take() {
            done(result);
        }
    }
}

fn tick(state: &Rc<PollState>) {
    if let Some(controls) = state.lookup() {
        state.finish(Ok(controls));
        return;
    }

    let attempts = state.attempts.get() + 1;
    state.attempts.set(attempts);
    Tracer::new(state.sink.borrow_mut().as_mut()).poll_attempt(attempts);

    match state.plan.step(attempts) {
        PollStep::Retry { delay_ms } => schedule(Rc::clone(state), delay_ms),
        PollStep::GiveUp => state.finish(Err(HostError::NotFound(HostPart::Controls))),
    }
}

fn schedule(state: Rc<PollState>, delay_ms: u32) {
    // A fresh one-shot closure per attempt: `once_into_js` reclaims the
    // closure's memory when the timeout fires, so nothing needs explicit
    // cancellation (startup waits have none).
    let callback = Closure::once_into_js(move || tick(&state));
    #[expect(
        clippy::cast_possible_wrap,
        reason = "poll delays are a few hundred ms; far below i32::MAX"
    )]
    let _id = set_timeout(callback.unchecked_ref(), delay_ms as i32);
}

/// Polls for the controls container, delivering the element (or the fatal
/// error once the [`PollPlan`] budget is exhausted) to `on_done` exactly
/// once.
///
/// The first lookup runs synchronously; each subsequent attempt is paced by
/// the plan's interval.
pub fn await_controls(
    frame_doc: &Document,
    selector: &str,
    plan: PollPlan,
    sink: Rc<RefCell<Box<dyn TraceSink>>>,
    on_done: impl FnOnce(Result<HtmlElement, HostError>) + 'static,
) {
    let state = Rc::new(PollState {
        frame_doc: frame_doc.clone(),
        selector: String::from(selector),
        plan,
        attempts: Cell::new(0),
        sink,
        on_done: RefCell::new(Some(Box::new(on_done))),
    });
    tick(&state);
}
