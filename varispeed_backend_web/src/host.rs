// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed integration contract with the host page.
//!
//! These selectors and class names are exact-match and not configurable at
//! runtime: the control only targets one known player on one known platform
//! page. The class names are copied from the host's own control bar so the
//! injected widget inherits the player's styling without shipping any CSS
//! of its own.

/// Selector for the player iframe on the hosting page.
pub const FRAME_SELECTOR: &str = "#lesson-player iframe";

/// Selector for the video element inside the player frame.
pub const VIDEO_SELECTOR: &str = "video";

/// Selector for the control-bar container the widget is inserted into.
/// Known to render asynchronously, some time after the video element.
pub const CONTROLS_SELECTOR: &str = ".player-controls .controls-right";

/// Class list for the widget container, mirroring the host's existing
/// dropup controls.
pub const CONTAINER_CLASSES: &str = "control dropup speed-control";

/// Class appended to the container while the menu is expanded (the host's
/// dropup open state).
pub const OPEN_CLASS: &str = "open";

/// Class list for the toggle button.
pub const BUTTON_CLASSES: &str = "control-button dropup-toggle";

/// Class list for the menu list.
pub const MENU_CLASSES: &str = "dropup-menu";

/// The button's accessible name. The host ships a single locale; so do we.
pub const BUTTON_ARIA_LABEL: &str = "Playback speed";
