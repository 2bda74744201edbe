//! Mapbox GL JS implementation of [`MapSurface`]. Expects `mapboxgl` to be
//! loaded globally by the host page.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use mapjitsu_shared::{LngLat, LocationId, ViewState};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::CAMERA_EASE_MS;
use crate::surface::{MapSurface, MarkerSpec, MountOptions, PopupSpec, SurfaceEvents};

#[wasm_bindgen(js_namespace = mapboxgl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    #[derive(Clone)]
    type JsMap;

    #[wasm_bindgen(constructor, js_class = "Map", catch)]
    fn create_map(options: &JsValue) -> Result<JsMap, JsValue>;

    #[wasm_bindgen(method, js_name = easeTo)]
    fn ease_to(this: &JsMap, options: &JsValue);

    #[wasm_bindgen(method, js_name = setStyle)]
    fn set_style(this: &JsMap, style: &str);

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &JsMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &JsMap, control: &JsValue, position: &str);

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &JsMap) -> JsLngLat;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &JsMap) -> f64;

    #[wasm_bindgen(method, js_name = getPitch)]
    fn get_pitch(this: &JsMap) -> f64;

    #[wasm_bindgen(method, js_name = getBearing)]
    fn get_bearing(this: &JsMap) -> f64;

    #[wasm_bindgen(method, js_name = remove)]
    fn remove_map(this: &JsMap);

    #[wasm_bindgen(js_name = LngLat)]
    type JsLngLat;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLngLat) -> f64;

    #[wasm_bindgen(js_name = Marker)]
    type JsMarker;

    #[wasm_bindgen(constructor, js_class = "Marker")]
    fn create_marker(options: &JsValue) -> JsMarker;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_marker_lng_lat(this: &JsMarker, lng_lat: &JsValue) -> JsMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &JsMarker, map: &JsMap) -> JsMarker;

    #[wasm_bindgen(method, js_name = remove)]
    fn remove_marker(this: &JsMarker);

    #[wasm_bindgen(js_name = Popup)]
    type JsPopup;

    #[wasm_bindgen(constructor, js_class = "Popup")]
    fn create_popup(options: &JsValue) -> JsPopup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_popup_lng_lat(this: &JsPopup, lng_lat: &JsValue) -> JsPopup;

    #[wasm_bindgen(method, js_name = setHTML)]
    fn set_html(this: &JsPopup, html: &str) -> JsPopup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_popup_to(this: &JsPopup, map: &JsMap) -> JsPopup;

    #[wasm_bindgen(method, js_name = on)]
    fn on_popup(this: &JsPopup, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = remove)]
    fn remove_popup(this: &JsPopup);

    #[wasm_bindgen(js_name = NavigationControl)]
    type JsNavigationControl;

    #[wasm_bindgen(constructor, js_class = "NavigationControl")]
    fn create_navigation_control() -> JsNavigationControl;

    #[wasm_bindgen(js_name = GeolocateControl)]
    type JsGeolocateControl;

    #[wasm_bindgen(constructor, js_class = "GeolocateControl")]
    fn create_geolocate_control() -> JsGeolocateControl;

    #[wasm_bindgen(js_name = ScaleControl)]
    type JsScaleControl;

    #[wasm_bindgen(constructor, js_class = "ScaleControl")]
    fn create_scale_control() -> JsScaleControl;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions<'a> {
    container: &'a str,
    access_token: &'a str,
    style: &'a str,
    center: [f64; 2],
    zoom: f64,
    pitch: f64,
    bearing: f64,
    attribution_control: bool,
}

#[derive(Serialize)]
struct CameraOptions {
    center: [f64; 2],
    zoom: f64,
    pitch: f64,
    bearing: f64,
    duration: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupOptions {
    anchor: &'static str,
    close_button: bool,
    close_on_click: bool,
    offset: u32,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(value).map_err(|e| e.to_string())
}

fn lng_lat_js(position: LngLat) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(position.longitude));
    pair.push(&JsValue::from_f64(position.latitude));
    pair.into()
}

fn describe_js_error(err: &JsValue) -> String {
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

struct MarkerBinding {
    marker: JsMarker,
    _on_click: Closure<dyn Fn(web_sys::MouseEvent)>,
}

struct PopupBinding {
    popup: JsPopup,
    _on_close: Closure<dyn Fn()>,
}

pub struct MapboxSurface {
    map: JsMap,
    events: SurfaceEvents,
    markers: HashMap<LocationId, MarkerBinding>,
    popup: Option<PopupBinding>,
    /// Set while the popup is being removed by us, so its `close` event is not
    /// mistaken for the user dismissing it.
    closing_popup: Rc<Cell<bool>>,
    _map_listeners: Vec<Closure<dyn Fn(JsValue)>>,
}

impl MapboxSurface {
    pub fn mount(options: &MountOptions<'_>, events: SurfaceEvents) -> Result<Self, String> {
        let loaded = Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
            .map(|value| !value.is_undefined())
            .unwrap_or(false);
        if !loaded {
            return Err("Mapbox GL JS is not loaded".to_string());
        }

        let map_options = to_js(&MapOptions {
            container: options.container_id,
            access_token: options.token.as_str(),
            style: options.style.style_url(),
            center: [options.view.longitude, options.view.latitude],
            zoom: options.view.zoom,
            pitch: options.view.pitch,
            bearing: options.view.bearing,
            attribution_control: false,
        })?;
        let map = JsMap::create_map(&map_options).map_err(|e| describe_js_error(&e))?;

        map.add_control(&JsNavigationControl::create_navigation_control().into(), "top-right");
        map.add_control(&JsGeolocateControl::create_geolocate_control().into(), "top-right");
        map.add_control(&JsScaleControl::create_scale_control().into(), "bottom-right");

        let mut listeners = Vec::with_capacity(2);

        let moveend = {
            let map = map.clone();
            let on_camera_change = events.on_camera_change.clone();
            Closure::<dyn Fn(JsValue)>::new(move |_event: JsValue| {
                let center = map.get_center();
                on_camera_change(ViewState {
                    longitude: center.lng(),
                    latitude: center.lat(),
                    zoom: map.get_zoom(),
                    pitch: map.get_pitch(),
                    bearing: map.get_bearing(),
                });
            })
        };
        map.on("moveend", moveend.as_ref().unchecked_ref());
        listeners.push(moveend);

        let on_error = {
            let report = events.on_error.clone();
            Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| {
                let error = Reflect::get(&event, &JsValue::from_str("error"))
                    .unwrap_or(JsValue::UNDEFINED);
                let status = Reflect::get(&error, &JsValue::from_str("status"))
                    .ok()
                    .and_then(|s| s.as_f64());
                let message = describe_js_error(&error);
                web_sys::console::warn_1(&format!("Map error: {message}").into());
                if matches!(status, Some(s) if s == 401.0 || s == 403.0) {
                    report("The map service rejected the access token.".to_string());
                }
            })
        };
        map.on("error", on_error.as_ref().unchecked_ref());
        listeners.push(on_error);

        Ok(Self {
            map,
            events,
            markers: HashMap::new(),
            popup: None,
            closing_popup: Rc::new(Cell::new(false)),
            _map_listeners: listeners,
        })
    }

    fn marker_element(spec: &MarkerSpec) -> Option<web_sys::HtmlElement> {
        let document = web_sys::window()?.document()?;
        let element = document
            .create_element("div")
            .ok()?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        element.set_class_name(if spec.selected {
            "map-marker map-marker-selected"
        } else {
            "map-marker"
        });
        element.set_title(&spec.title);
        element
            .style()
            .set_property("background-color", &spec.color)
            .ok();
        element.style().set_property("--pulse-color", &spec.color).ok();
        Some(element)
    }
}

impl MapSurface for MapboxSurface {
    fn set_view(&mut self, view: &ViewState) {
        let camera = CameraOptions {
            center: [view.longitude, view.latitude],
            zoom: view.zoom,
            pitch: view.pitch,
            bearing: view.bearing,
            duration: CAMERA_EASE_MS,
        };
        match to_js(&camera) {
            Ok(options) => self.map.ease_to(&options),
            Err(e) => web_sys::console::warn_1(&format!("Camera options: {e}").into()),
        }
    }

    fn set_style(&mut self, style_url: &str) {
        self.map.set_style(style_url);
    }

    fn add_marker(&mut self, spec: &MarkerSpec) {
        self.remove_marker(spec.id);
        let Some(element) = Self::marker_element(spec) else {
            web_sys::console::warn_1(&"Skipping marker: document is unavailable".into());
            return;
        };

        let id = spec.id;
        let on_marker_click = self.events.on_marker_click.clone();
        let on_click = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
            e.stop_propagation();
            on_marker_click(id);
        });
        if element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_err()
        {
            return;
        }

        let options = Object::new();
        let _ = Reflect::set(&options, &JsValue::from_str("element"), &element);
        let marker = JsMarker::create_marker(&options)
            .set_marker_lng_lat(&lng_lat_js(spec.position))
            .add_marker_to(&self.map);
        self.markers.insert(
            id,
            MarkerBinding {
                marker,
                _on_click: on_click,
            },
        );
    }

    fn remove_marker(&mut self, id: LocationId) {
        if let Some(binding) = self.markers.remove(&id) {
            binding.marker.remove_marker();
        }
    }

    fn show_popup(&mut self, spec: &PopupSpec) {
        self.hide_popup();
        let options = match to_js(&PopupOptions {
            anchor: "bottom",
            close_button: false,
            close_on_click: true,
            offset: 18,
        }) {
            Ok(options) => options,
            Err(e) => {
                web_sys::console::warn_1(&format!("Popup options: {e}").into());
                return;
            }
        };

        let closing = self.closing_popup.clone();
        let on_popup_close = self.events.on_popup_close.clone();
        let on_close = Closure::<dyn Fn()>::new(move || {
            if !closing.get() {
                on_popup_close();
            }
        });
        let popup = JsPopup::create_popup(&options)
            .set_popup_lng_lat(&lng_lat_js(spec.position))
            .set_html(&spec.html)
            .add_popup_to(&self.map);
        popup.on_popup("close", on_close.as_ref().unchecked_ref());
        self.popup = Some(PopupBinding {
            popup,
            _on_close: on_close,
        });
    }

    fn hide_popup(&mut self) {
        if let Some(binding) = self.popup.take() {
            self.closing_popup.set(true);
            binding.popup.remove_popup();
            self.closing_popup.set(false);
        }
    }
}

impl Drop for MapboxSurface {
    fn drop(&mut self) {
        self.hide_popup();
        for (_, binding) in self.markers.drain() {
            binding.marker.remove_marker();
        }
        self.map.remove_map();
    }
}
