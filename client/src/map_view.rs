use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use mapjitsu_shared::{LocationId, MapController, ViewState};

use crate::app::MapNotice;
use crate::config::{self, MAP_CONTAINER_ID};
use crate::mapbox::MapboxSurface;
use crate::surface::{MountOptions, SurfaceEvents, SurfaceSync};

struct SurfaceBinding {
    surface: MapboxSurface,
    sync: SurfaceSync,
}

thread_local! {
    static MAP_SURFACE: RefCell<Option<SurfaceBinding>> = const { RefCell::new(None) };
}

fn mount_surface(controller: RwSignal<MapController>, notice: RwSignal<Option<String>>) {
    let token = match config::load_token() {
        Ok(token) => token,
        Err(e) => {
            web_sys::console::warn_1(&format!("Map disabled: {e}").into());
            notice.set(Some(e.to_string()));
            return;
        }
    };

    let initial = controller.get_untracked();
    let events = SurfaceEvents {
        on_camera_change: Rc::new(move |view: ViewState| {
            controller.update(|c| c.observe_camera(view));
        }),
        on_marker_click: Rc::new(move |id: LocationId| {
            controller.update(|c| {
                c.select_marker(id);
            });
        }),
        on_popup_close: Rc::new(move || controller.update(|c| c.clear_selection())),
        on_error: Rc::new(move |message: String| notice.set(Some(message))),
    };
    let options = MountOptions {
        container_id: MAP_CONTAINER_ID,
        token: &token,
        view: initial.view(),
        style: initial.style(),
    };

    match MapboxSurface::mount(&options, events) {
        Ok(surface) => {
            let mut binding = SurfaceBinding {
                surface,
                sync: SurfaceSync::attached(&initial),
            };
            binding.sync.apply(&initial, &mut binding.surface);
            MAP_SURFACE.with(|slot| {
                // Replacing the old binding drops its map and JS listeners.
                let _old = slot.borrow_mut().take();
                *slot.borrow_mut() = Some(binding);
            });
            web_sys::console::log_1(&"Map surface mounted".into());
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("Map init failed: {e}").into());
            notice.set(Some(format!("The map could not be loaded: {e}")));
        }
    }
}

fn unmount_surface() {
    let old = MAP_SURFACE.with(|slot| slot.borrow_mut().take());
    drop(old);
}

/// Map canvas container. Mounts the surface once the container is in the DOM
/// and replays every controller change onto it.
#[component]
pub fn MapView() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let MapNotice(notice) = expect_context();
    let container = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        if container.get().is_none() {
            return;
        }
        mount_surface(controller, notice);
    });

    // Work from a snapshot: surface calls can fire map events that write back
    // into the controller signal.
    Effect::new(move || {
        let snapshot = controller.get();
        MAP_SURFACE.with(|slot| {
            if let Some(binding) = slot.borrow_mut().as_mut() {
                binding.sync.apply(&snapshot, &mut binding.surface);
            }
        });
    });

    on_cleanup(unmount_surface);

    view! {
        <div
            id=MAP_CONTAINER_ID
            node_ref=container
            style="position: absolute; inset: 0;"
            style:visibility=move || if notice.get().is_some() { "hidden" } else { "visible" }
        />
    }
}
