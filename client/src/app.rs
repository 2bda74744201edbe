use leptos::prelude::*;
use mapjitsu_shared::{LocationSet, MapController};
use wasm_bindgen::JsCast;

use std::cell::RefCell;

use crate::map_view::MapView;
use crate::overlay::{Attribution, Legend, MapNoticeBanner, ModeControls};
use crate::sidebar::Sidebar;

pub(crate) const SIDEBAR_WIDTH: f64 = 384.0;

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// Set when the map cannot render: missing or rejected credential, or the map
/// library failed to start. The sidebar keeps working either way.
#[derive(Clone, Copy)]
pub(crate) struct MapNotice(pub RwSignal<Option<String>>);

/// Root component. Loads the bundled locations and hands them to the shell.
#[component]
pub fn App() -> impl IntoView {
    match LocationSet::bundled() {
        Ok(locations) => view! { <MapShell locations=locations /> }.into_any(),
        Err(e) => {
            web_sys::console::warn_1(&format!("Location data failed to load: {e}").into());
            view! { <DataError message=e.to_string() /> }.into_any()
        }
    }
}

#[component]
fn MapShell(locations: LocationSet) -> impl IntoView {
    let controller: RwSignal<MapController> = RwSignal::new(MapController::new(locations));
    let notice: RwSignal<Option<String>> = RwSignal::new(None);

    provide_context(controller);
    provide_context(MapNotice(notice));

    // Global keyboard shortcuts
    Effect::new(move || {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                let key = e.key();
                let target_tag = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .unwrap_or_default();

                // Don't intercept when typing in an input
                if target_tag == "INPUT" || target_tag == "TEXTAREA" {
                    if key == "Escape"
                        && let Some(el) = e
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    {
                        el.blur().ok();
                    }
                    return;
                }

                match key.as_str() {
                    "Escape" => {
                        controller.update(|c| c.clear_selection());
                    }
                    "/" => {
                        e.prevent_default();
                        let Some(window) = web_sys::window() else {
                            return;
                        };
                        let Some(doc) = window.document() else {
                            return;
                        };
                        if let Some(el) = doc.query_selector("[data-search-input]").ok().flatten()
                            && let Ok(input) = el.dyn_into::<web_sys::HtmlElement>()
                        {
                            input.focus().ok();
                        }
                    }
                    _ => {}
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    view! {
        <div style="display: flex; width: 100%; height: 100%; overflow: hidden; background: #f8fafc;">
            <div style=format!(
                "width: {SIDEBAR_WIDTH}px; flex-shrink: 0; height: 100%; background: #ffffff; border-right: 1px solid #e2e8f0; display: flex; flex-direction: column; z-index: 10; box-shadow: 4px 0 16px rgba(15,23,42,0.06);"
            )>
                <Sidebar />
            </div>
            <div style="flex: 1; height: 100%; position: relative; overflow: hidden;">
                <MapView />
                <MapNoticeBanner />
                <ModeControls />
                <Legend />
                <Attribution />
            </div>
        </div>
    }
}

#[component]
fn DataError(message: String) -> impl IntoView {
    view! {
        <div style="display: flex; align-items: center; justify-content: center; width: 100%; height: 100%; background: #f8fafc;">
            <div style="max-width: 420px; padding: 24px; background: #ffffff; border: 1px solid #fecaca; border-radius: 8px; font-family: 'Inter', system-ui, sans-serif;">
                <div style="font-size: 1rem; font-weight: 600; color: #dc2626;">"Location data unavailable"</div>
                <div style="margin-top: 8px; font-size: 0.85rem; color: #475569;">{message}</div>
            </div>
        </div>
    }
}
