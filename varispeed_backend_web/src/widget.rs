// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown widget: one container, one toggle button, one menu list,
//! one item per rate.
//!
//! [`SpeedMenu::build`] constructs the subtree fully wired for rendering
//! but *unattached*; the caller inserts it into the host's control bar only
//! after the whole acquisition pipeline has succeeded, so a failed startup
//! never leaves partial UI in the page. Event wiring also stays with the
//! caller — construction here is pure element creation and attribute
//! assignment, deterministic given the rate set.
//!
//! [`SpeedMenu`] implements [`SelectorPresenter`]: every attribute the host
//! sees (button text, open class, `aria-expanded`, `aria-checked`) is
//! derived from [`SelectorState`], never read back from the DOM.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use varispeed_core::backend::SelectorPresenter;
use varispeed_core::rate::RateSet;
use varispeed_core::selector::{SelectionChanges, SelectorState};

use crate::host;

/// The injected speed-selector control.
///
/// Owns the widget subtree once constructed; the host's control bar owns it
/// for rendering purposes after insertion. Never torn down explicitly — it
/// lives until the player frame unloads.
pub struct SpeedMenu {
    container: HtmlElement,
    button: HtmlButtonElement,
    menu: HtmlElement,
    items: Vec<HtmlElement>,
}

impl core::fmt::Debug for SpeedMenu {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpeedMenu")
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}

/// Container class attribute for the given menu state.
fn container_class(open: bool) -> String {
    if open {
        format!("{} {}", host::CONTAINER_CLASSES, host::OPEN_CLASS)
    } else {
        String::from(host::CONTAINER_CLASSES)
    }
}

impl SpeedMenu {
    /// Builds the unattached widget subtree for `rates`: a container
    /// carrying the host's dropup classes, the toggle button with the host's
    /// ARIA idiom, and one `menuitemcheckbox` per rate in ascending order,
    /// all initially unchecked.
    pub fn build(doc: &Document, rates: &RateSet) -> Result<Self, JsValue> {
        let container: HtmlElement = doc.create_element("div")?.unchecked_into();
        container.set_attribute("class", &container_class(false))?;

        let button: HtmlButtonElement = doc.create_element("button")?.unchecked_into();
        button.set_attribute("class", host::BUTTON_CLASSES)?;
        button.set_attribute("type", "button")?;
        button.set_attribute("aria-haspopup", "true")?;
        button.set_attribute("aria-expanded", "false")?;
        button.set_attribute("aria-label", host::BUTTON_ARIA_LABEL)?;
        button.set_attribute("tabindex", "0")?;
        container.append_child(&button)?;

        let menu: HtmlElement = doc.create_element("ul")?.unchecked_into();
        menu.set_attribute("class", host::MENU_CLASSES)?;
        menu.set_attribute("role", "menu")?;
        container.append_child(&menu)?;

        let mut items = Vec::with_capacity(rates.len());
        for rate in rates.iter() {
            let item: HtmlElement = doc.create_element("li")?.unchecked_into();
            item.set_attribute("role", "menuitemcheckbox")?;
            item.set_attribute("aria-checked", "false")?;
            item.set_attribute("tabindex", "-1")?;
            item.set_text_content(Some(&rate.label()));
            menu.append_child(&item)?;
            items.push(item);
        }

        Ok(Self {
            container,
            button,
            menu,
            items,
        })
    }

    /// Appends the widget into the host's controls container.
    pub fn insert_into(&self, controls: &HtmlElement) -> Result<(), JsValue> {
        controls.append_child(&self.container)?;
        Ok(())
    }

    /// The toggle button, for event wiring.
    #[must_use]
    pub fn button(&self) -> &HtmlButtonElement {
        &self.button
    }

    /// The menu list element.
    #[must_use]
    pub fn menu(&self) -> &HtmlElement {
        &self.menu
    }

    /// The menu items, in the rate set's ascending order.
    #[must_use]
    pub fn items(&self) -> &[HtmlElement] {
        &self.items
    }
}

impl SelectorPresenter for SpeedMenu {
    fn render(&mut self, state: &SelectorState, changes: &SelectionChanges) {
        if changes.menu {
            let open = state.menu_open();
            let _ = self.container.set_attribute("class", &container_class(open));
            let _ = self
                .button
                .set_attribute("aria-expanded", if open { "true" } else { "false" });
        }

        if changes.selection {
            self.button
                .set_text_content(Some(&state.button_label()));
            let selected = state.selected_index();
            for (i, item) in self.items.iter().enumerate() {
                let checked = if i == selected { "true" } else { "false" };
                let _ = item.set_attribute("aria-checked", checked);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_state_appends_the_host_open_class() {
        assert_eq!(container_class(false), host::CONTAINER_CLASSES);
        let open = container_class(true);
        assert!(open.starts_with(host::CONTAINER_CLASSES), "got: {open}");
        assert!(open.ends_with(host::OPEN_CLASS), "got: {open}");
    }
}
