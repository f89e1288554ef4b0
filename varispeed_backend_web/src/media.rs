// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`MediaHandle`] over the host's `<video>` element.

use web_sys::HtmlVideoElement;

use varispeed_core::backend::MediaHandle;

/// The host page's video element, viewed through the core contract: a
/// readable paused flag and a writable rate. The element itself stays owned
/// by the host — this wrapper never creates, destroys, or seeks it.
#[derive(Clone)]
pub struct WebMedia {
    video: HtmlVideoElement,
}

impl core::fmt::Debug for WebMedia {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebMedia").finish_non_exhaustive()
    }
}

impl WebMedia {
    /// Wraps the given video element.
    #[must_use]
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }

    /// The underlying element, e.g. for listener registration.
    #[must_use]
    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaHandle for WebMedia {
    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn set_rate(&mut self, rate: f64) {
        self.video.set_playback_rate(rate);
    }
}
