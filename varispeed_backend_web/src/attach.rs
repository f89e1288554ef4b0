// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Startup wiring: acquisition → construction → selection handlers.
//!
//! [`attach`] runs the whole flow once per page load. Acquisition completes
//! before construction begins (the widget closes over a live video handle),
//! construction wires the selection handlers but never invokes them, and
//! after the widget lands in the control bar all remaining behavior is
//! reactive to clicks.
//!
//! The two startup suspension points — the page load event (unbounded) and
//! the controls poll (bounded by the [`PollPlan`]) — have no cancellation;
//! each runs to success or to a fatal [`HostError`]. Fatal errors past the
//! async boundary surface through [`wasm_bindgen::throw_val`], i.e. the
//! browser's default unhandled-error reporting; the page itself shows no
//! message, the control simply never appears.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, HtmlVideoElement};

use varispeed_core::backend::{HostError, SelectorPresenter as _};
use varispeed_core::poll::PollPlan;
use varispeed_core::rate::RateSet;
use varispeed_core::selector::{SelectEffect, SelectionChanges, SelectorState};
use varispeed_core::trace::{AttachStage, TraceSink, Tracer};

use crate::acquire;
use crate::host;
use crate::media::WebMedia;
use crate::once;
use crate::widget::SpeedMenu;

type SharedSink = Rc<RefCell<Box<dyn TraceSink>>>;

/// Where to find the host's pieces and how long to wait for the control
/// bar.
///
/// The defaults are the real host contract from [`host`]; the fields exist
/// so the demo (and a future host revision) can point the same flow at a
/// different page shape, not for end-user configuration.
#[derive(Clone, Copy, Debug)]
pub struct AttachConfig {
    /// Selector for the player iframe on the hosting page.
    pub frame_selector: &'static str,
    /// Selector for the video element inside the frame.
    pub video_selector: &'static str,
    /// Selector for the control-bar container inside the frame.
    pub controls_selector: &'static str,
    /// Pacing for the controls-container wait.
    pub poll: PollPlan,
}

impl Default for AttachConfig {
    fn default() -> Self {
        Self {
            frame_selector: host::FRAME_SELECTOR,
            video_selector: host::VIDEO_SELECTOR,
            controls_selector: host::CONTROLS_SELECTOR,
            poll: PollPlan::controls(),
        }
    }
}

struct App {
    state: SelectorState,
    widget: SpeedMenu,
    media: WebMedia,
    play_armed: bool,
    sink: SharedSink,
}

/// Runs the attach flow once: wait for page load, acquire the host pieces,
/// build and insert the widget, wire the handlers.
///
/// Returns `Err` only for failures before the first suspension point (no
/// window/document). Everything after is driven by events; fatal
/// [`HostError`]s there are thrown, uncaught, to the hosting environment.
pub fn attach(config: AttachConfig, sink: Box<dyn TraceSink>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("varispeed: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("varispeed: no document"))?;
    let sink: SharedSink = Rc::new(RefCell::new(sink));

    // The load event is assumed sufficient for the iframe itself to exist;
    // only the controls inside it are expected to lag (and get the poll).
    if document.ready_state() == "complete" {
        acquire_and_build(&document, config, sink);
    } else {
        Tracer::new(sink.borrow_mut().as_mut()).attach_stage(AttachStage::LoadWait);
        once::listen(&window, "load", move |_event| {
            acquire_and_build(&document, config, sink);
        })?;
    }
    Ok(())
}

fn fail(err: HostError) -> ! {
    wasm_bindgen::throw_val(JsValue::from_str(&format!("varispeed: {err}")))
}

fn acquire_and_build(document: &Document, config: AttachConfig, sink: SharedSink) {
    let frame_doc = match acquire::frame_document(document, config.frame_selector) {
        Ok(doc) => doc,
        Err(err) => fail(err),
    };
    Tracer::new(sink.borrow_mut().as_mut()).attach_stage(AttachStage::FrameDocument);

    let video = match acquire::video_element(&frame_doc, config.video_selector) {
        Ok(video) => video,
        Err(err) => fail(err),
    };
    Tracer::new(sink.borrow_mut().as_mut()).attach_stage(AttachStage::VideoElement);

    let done_doc = frame_doc.clone();
    let done_sink = Rc::clone(&sink);
    acquire::await_controls(
        &frame_doc,
        config.controls_selector,
        config.poll,
        sink,
        move |result| match result {
            Ok(controls) => {
                Tracer::new(done_sink.borrow_mut().as_mut())
                    .attach_stage(AttachStage::ControlsContainer);
                if let Err(err) = build_and_wire(&done_doc, video, &controls, done_sink) {
                    wasm_bindgen::throw_val(err);
                }
            }
            Err(err) => fail(err),
        },
    );
}

fn build_and_wire(
    frame_doc: &Document,
    video: HtmlVideoElement,
    controls: &HtmlElement,
    sink: SharedSink,
) -> Result<(), JsValue> {
    let rates = RateSet::standard();
    let mut widget = SpeedMenu::build(frame_doc, &rates)?;
    let state = SelectorState::new(rates);
    widget.render(&state, &SelectionChanges::all());

    let app = Rc::new(RefCell::new(App {
        state,
        widget,
        media: WebMedia::new(video),
        play_armed: false,
        sink: Rc::clone(&sink),
    }));

    let toggle_app = Rc::clone(&app);
    let toggle_cb = Closure::wrap(Box::new(move |_event: Event| {
        let mut a = toggle_app.borrow_mut();
        let open = a.state.toggle_menu();
        Tracer::new(a.sink.borrow_mut().as_mut()).menu_toggled(open);
        render(&mut a);
    }) as Box<dyn FnMut(_)>);
    app.borrow()
        .widget
        .button()
        .add_event_listener_with_callback("click", toggle_cb.as_ref().unchecked_ref())?;
    toggle_cb.forget();

    // One handler per item, closing over its index; the rate never needs to
    // be re-parsed out of the label text.
    let item_count = app.borrow().state.rates().len();
    for index in 0..item_count {
        let item_app = Rc::clone(&app);
        let item_cb = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            on_select(&item_app, index);
        }) as Box<dyn FnMut(_)>);
        app.borrow().widget.items()[index]
            .add_event_listener_with_callback("click", item_cb.as_ref().unchecked_ref())?;
        item_cb.forget();
    }

    // Insertion is the only host-page mutation, and it happens last: a
    // failed startup never leaves partial UI behind.
    app.borrow().widget.insert_into(controls)?;
    Tracer::new(sink.borrow_mut().as_mut()).attached();
    Ok(())
}

fn render(app: &mut App) {
    let changes = app.state.take_changes();
    if changes.is_empty() {
        return;
    }
    let App {
        ref state,
        ref mut widget,
        ..
    } = *app;
    widget.render(state, &changes);
}

fn on_select(app: &Rc<RefCell<App>>, index: usize) {
    let mut a = app.borrow_mut();
    let effect = {
        let App {
            ref mut state,
            ref mut media,
            ..
        } = *a;
        state.select_with(index, media)
    };

    match effect {
        SelectEffect::Apply(rate) => {
            Tracer::new(a.sink.borrow_mut().as_mut()).rate_selected(rate, false);
        }
        SelectEffect::Defer(rate) => {
            Tracer::new(a.sink.borrow_mut().as_mut()).rate_selected(rate, true);
            // One observer covers any number of paused re-selections; the
            // machine keeps only the latest pending rate.
            if !a.play_armed {
                a.play_armed = true;
                let play_app = Rc::clone(app);
                let target = a.media.element().clone();
                let _ = once::listen(&target, "play", move |_event| on_play(&play_app));
            }
        }
    }

    render(&mut a);
}

fn on_play(app: &Rc<RefCell<App>>) {
    let mut a = app.borrow_mut();
    a.play_armed = false;
    let flushed = {
        let App {
            ref mut state,
            ref mut media,
            ..
        } = *a;
        state.flush_pending(media)
    };
    if let Some(rate) = flushed {
        Tracer::new(a.sink.borrow_mut().as_mut()).pending_flushed(rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_the_host_contract() {
        let config = AttachConfig::default();
        assert_eq!(config.frame_selector, host::FRAME_SELECTOR);
        assert_eq!(config.video_selector, host::VIDEO_SELECTOR);
        assert_eq!(config.controls_selector, host::CONTROLS_SELECTOR);
        assert_eq!(config.poll, PollPlan::controls());
    }
}
