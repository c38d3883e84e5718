// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Header bar builder
//!
//! Creates the application header bar with the page switcher and Save

use gtk4::{gio::Menu, prelude::WidgetExt, Button, HeaderBar, MenuButton, Stack, StackSwitcher};

/// Builds the application header bar
///
/// Creates a HeaderBar containing:
/// - Save button (app.save action) on the left
/// - Stack switcher for the pages as title
/// - Menu button with Quit (app.quit action) on the right
///
/// The switcher is hidden when `stack` has no pages.
///
/// # Returns
///
/// The configured HeaderBar widget
pub fn build_header_bar(stack: &Stack, has_pages: bool) -> HeaderBar {
    let header_bar = HeaderBar::new();

    // Menu options
    let menu = Menu::new();
    menu.append(Some("Quit"), Some("app.quit"));

    // Menu button
    let menu_button = MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");
    menu_button.set_menu_model(Some(&menu));

    let save_button = Button::builder()
        .label("Save")
        .action_name("app.save")
        .tooltip_text("Write changes to the device")
        .build();
    save_button.add_css_class("suggested-action");

    let switcher = StackSwitcher::builder().stack(stack).build();
    switcher.set_visible(has_pages);

    header_bar.pack_start(&save_button);
    header_bar.set_title_widget(Some(&switcher));
    header_bar.pack_end(&menu_button);

    header_bar
}
