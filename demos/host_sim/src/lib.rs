// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stand-in host page for the speed control.
//!
//! The real host is a third-party e-learning page we cannot ship, so this
//! demo fabricates the same shape: a `#lesson-player` wrapper holding a
//! same-origin iframe with a `<video>` inside, plus a control bar that is
//! deliberately appended only after a delay — which is exactly the
//! asynchronous rendering the attach flow's bounded poll exists for.
//!
//! Build with: `wasm-pack build --target web demos/host_sim`
//! Then serve the crate directory and open it in a browser. With the
//! `trace` feature enabled, each attach stage and selection lands in the
//! console.
//!
//! Lengthen `CONTROLS_DELAY_MS` past the poll budget (2 s) to watch the
//! fatal path instead: an uncaught host error and no widget.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::ToString as _;

use varispeed_backend_web::{AttachConfig, ConsoleTraceSink, attach};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlIFrameElement, HtmlVideoElement};

const VIDEO_URL: &str =
    "https://github.com/vidanov/video/raw/master/test_files/1080p50.mp4";
const VIDEO_W: u32 = 848;
const VIDEO_H: u32 = 480;

/// How long the fabricated host withholds its control bar.
const CONTROLS_DELAY_MS: i32 = 700;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;
}

/// Entry point for the host-page simulator.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .expect("window")
        .document()
        .expect("document");

    let wrap = element(&document, "div")?;
    wrap.set_id("lesson-player");
    style(
        &wrap,
        "width: 848px; margin: 24px auto; border-radius: 12px; overflow: hidden; box-shadow: 0 18px 40px rgba(7,18,44,0.25);",
    )?;

    let frame: HtmlIFrameElement = document.create_element("iframe")?.unchecked_into();
    frame.set_width(&VIDEO_W.to_string());
    frame.set_height(&(VIDEO_H + 48).to_string());
    style(&frame, "border: 0; display: block;")?;
    wrap.append_child(&frame)?;
    document.body().expect("body").append_child(&wrap)?;

    // A src-less iframe is same-origin `about:blank`; its document is
    // available synchronously once inserted.
    let frame_doc = frame.content_document().expect("iframe document");
    let frame_body = frame_doc.body().expect("iframe body");
    style(&frame_body, "margin: 0; background: #10121f;")?;

    let video: HtmlVideoElement = frame_doc.create_element("video")?.unchecked_into();
    video.set_src(VIDEO_URL);
    video.set_controls(true);
    video.set_muted(true);
    video.set_preload("auto");
    video.set_width(VIDEO_W);
    video.set_height(VIDEO_H);
    style(&video, "display: block; width: 100%;")?;
    frame_body.append_child(&video)?;

    // The host renders its control bar late; the attach flow has to poll
    // for it.
    let delayed = Closure::once_into_js(move || {
        if let Err(err) = add_control_bar(&frame_doc) {
            wasm_bindgen::throw_val(err);
        }
    });
    set_timeout(delayed.unchecked_ref(), CONTROLS_DELAY_MS);

    attach(AttachConfig::default(), Box::new(ConsoleTraceSink))
}

fn add_control_bar(frame_doc: &Document) -> Result<(), JsValue> {
    let bar = element(frame_doc, "div")?;
    bar.set_attribute("class", "player-controls")?;
    style(
        &bar,
        "display: flex; justify-content: space-between; align-items: center; height: 48px; padding: 0 12px; background: #1b2030; color: #d7edff; font: 13px/1.2 ui-monospace, SFMono-Regular, Menlo, monospace;",
    )?;

    let left = element(frame_doc, "div")?;
    left.set_attribute("class", "controls-left")?;
    left.set_text_content(Some("▶ 00:00"));
    bar.append_child(&left)?;

    let right = element(frame_doc, "div")?;
    right.set_attribute("class", "controls-right")?;
    bar.append_child(&right)?;

    frame_doc.body().expect("iframe body").append_child(&bar)?;
    Ok(())
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}

fn style(el: &web_sys::Element, css: &str) -> Result<(), JsValue> {
    el.set_attribute("style", css)
}
