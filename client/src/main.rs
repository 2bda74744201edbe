mod app;
mod colors;
mod config;
mod format;
mod icons;
#[cfg(target_arch = "wasm32")]
mod mapbox;
mod map_view;
mod overlay;
mod search;
mod sidebar;
mod surface;

#[cfg(not(target_arch = "wasm32"))]
mod mapbox {
    use mapjitsu_shared::{LocationId, ViewState};

    use crate::surface::{MapSurface, MarkerSpec, MountOptions, PopupSpec, SurfaceEvents};

    pub struct MapboxSurface;

    impl MapboxSurface {
        pub fn mount(_options: &MountOptions<'_>, _events: SurfaceEvents) -> Result<Self, String> {
            Err("not wasm".into())
        }
    }

    impl MapSurface for MapboxSurface {
        fn set_view(&mut self, _view: &ViewState) {}
        fn set_style(&mut self, _style_url: &str) {}
        fn add_marker(&mut self, _marker: &MarkerSpec) {}
        fn remove_marker(&mut self, _id: LocationId) {}
        fn show_popup(&mut self, _popup: &PopupSpec) {}
        fn hide_popup(&mut self) {}
    }
}

use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        return;
    };

    APP_MOUNT_HANDLE.with(move |slot| {
        // Drop any previous mount first so a re-entered main() can't leave two
        // apps driving the same map container.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, app::App);
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
