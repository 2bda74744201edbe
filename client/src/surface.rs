use std::collections::HashMap;
use std::fmt::Write;
use std::rc::Rc;

use mapjitsu_shared::{LngLat, LocationId, LocationRecord, MapController, MapStyle, ViewState};

use crate::config::AccessToken;
use crate::format::{escape_html, format_count, format_score};

/// The map canvas. Tiles, projection and gestures all live on the other side
/// of this trait; the client only pushes camera, style, markers and popups.
pub trait MapSurface {
    fn set_view(&mut self, view: &ViewState);
    fn set_style(&mut self, style_url: &str);
    fn add_marker(&mut self, marker: &MarkerSpec);
    fn remove_marker(&mut self, id: LocationId);
    fn show_popup(&mut self, popup: &PopupSpec);
    fn hide_popup(&mut self);
}

/// Callbacks a surface fires back into the app.
#[derive(Clone)]
pub struct SurfaceEvents {
    pub on_camera_change: Rc<dyn Fn(ViewState)>,
    pub on_marker_click: Rc<dyn Fn(LocationId)>,
    pub on_popup_close: Rc<dyn Fn()>,
    pub on_error: Rc<dyn Fn(String)>,
}

pub struct MountOptions<'a> {
    pub container_id: &'a str,
    pub token: &'a AccessToken,
    pub view: ViewState,
    pub style: MapStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: LocationId,
    pub position: LngLat,
    pub color: String,
    pub title: String,
    pub selected: bool,
}

impl MarkerSpec {
    pub fn for_record(record: &LocationRecord, selected: bool) -> Self {
        Self {
            id: record.id,
            position: record.position,
            color: record.tier().color_hex(),
            title: record.name.clone(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupSpec {
    pub id: LocationId,
    pub position: LngLat,
    pub html: String,
}

impl PopupSpec {
    pub fn for_record(record: &LocationRecord) -> Self {
        let tier = record.tier();
        let mut html = String::with_capacity(256);
        let _ = write!(
            html,
            r#"<div class="popup"><h3 class="popup-title">{}</h3>"#,
            escape_html(&record.name)
        );
        if let Some(address) = &record.address {
            let _ = write!(
                html,
                r#"<p class="popup-address">{}</p>"#,
                escape_html(address)
            );
        }
        let _ = write!(
            html,
            r#"<div class="popup-meta"><span class="badge {}">{}/10</span><span class="popup-signals">{} signals</span></div></div>"#,
            tier.badge_class(),
            format_score(record.overall_score),
            format_count(u64::from(record.signal_count)),
        );
        Self {
            id: record.id,
            position: record.position,
            html,
        }
    }
}

/// Remembers what the surface was last told so each controller change turns
/// into the smallest set of surface calls.
#[derive(Debug, Default)]
pub struct SurfaceSync {
    markers: HashMap<LocationId, bool>,
    camera_epoch: Option<u64>,
    style: Option<MapStyle>,
    popup: Option<LocationId>,
}

impl SurfaceSync {
    /// For a surface that was created from the controller's current camera
    /// and style, so neither needs to be pushed again.
    pub fn attached(controller: &MapController) -> Self {
        Self {
            camera_epoch: Some(controller.camera_epoch()),
            style: Some(controller.style()),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, controller: &MapController, surface: &mut dyn MapSurface) {
        let style = controller.style();
        if self.style != Some(style) {
            surface.set_style(style.style_url());
            self.style = Some(style);
        }

        let selected = controller.selected_id();
        for record in controller.locations() {
            let is_selected = selected == Some(record.id);
            match self.markers.get(&record.id) {
                Some(&shown) if shown == is_selected => continue,
                Some(_) => surface.remove_marker(record.id),
                None => {}
            }
            surface.add_marker(&MarkerSpec::for_record(record, is_selected));
            self.markers.insert(record.id, is_selected);
        }

        let epoch = controller.camera_epoch();
        if self.camera_epoch != Some(epoch) {
            surface.set_view(&controller.view());
            self.camera_epoch = Some(epoch);
        }

        if self.popup != selected {
            if self.popup.is_some() {
                surface.hide_popup();
            }
            if let Some(record) = controller.selected() {
                surface.show_popup(&PopupSpec::for_record(record));
            }
            self.popup = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapjitsu_shared::LocationSet;

    #[derive(Debug, PartialEq)]
    enum Call {
        SetView(ViewState),
        SetStyle(String),
        AddMarker(LocationId, bool),
        RemoveMarker(LocationId),
        ShowPopup(LocationId),
        HidePopup,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl RecordingSurface {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl MapSurface for RecordingSurface {
        fn set_view(&mut self, view: &ViewState) {
            self.calls.push(Call::SetView(*view));
        }
        fn set_style(&mut self, style_url: &str) {
            self.calls.push(Call::SetStyle(style_url.to_string()));
        }
        fn add_marker(&mut self, marker: &MarkerSpec) {
            self.calls.push(Call::AddMarker(marker.id, marker.selected));
        }
        fn remove_marker(&mut self, id: LocationId) {
            self.calls.push(Call::RemoveMarker(id));
        }
        fn show_popup(&mut self, popup: &PopupSpec) {
            self.calls.push(Call::ShowPopup(popup.id));
        }
        fn hide_popup(&mut self) {
            self.calls.push(Call::HidePopup);
        }
    }

    fn controller() -> MapController {
        MapController::new(LocationSet::bundled().expect("bundled data should be valid"))
    }

    #[test]
    fn first_apply_adds_every_marker_only() {
        let c = controller();
        let mut sync = SurfaceSync::attached(&c);
        let mut surface = RecordingSurface::default();
        sync.apply(&c, &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Call::AddMarker(1, false),
                Call::AddMarker(2, false),
                Call::AddMarker(3, false),
                Call::AddMarker(4, false),
            ]
        );

        sync.apply(&c, &mut surface);
        assert!(surface.take().is_empty());
    }

    #[test]
    fn selection_moves_camera_highlights_marker_and_opens_popup() {
        let mut c = controller();
        let mut sync = SurfaceSync::attached(&c);
        let mut surface = RecordingSurface::default();
        sync.apply(&c, &mut surface);
        surface.take();

        c.select_marker(3);
        sync.apply(&c, &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Call::RemoveMarker(3),
                Call::AddMarker(3, true),
                Call::SetView(c.view()),
                Call::ShowPopup(3),
            ]
        );

        c.clear_selection();
        sync.apply(&c, &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Call::RemoveMarker(3),
                Call::AddMarker(3, false),
                Call::HidePopup,
            ]
        );
    }

    #[test]
    fn user_camera_moves_are_not_echoed() {
        let mut c = controller();
        let mut sync = SurfaceSync::attached(&c);
        let mut surface = RecordingSurface::default();
        sync.apply(&c, &mut surface);
        surface.take();

        let mut panned = c.view();
        panned.longitude += 0.01;
        panned.zoom = 16.5;
        c.observe_camera(panned);
        sync.apply(&c, &mut surface);
        assert!(surface.take().is_empty());
    }

    #[test]
    fn style_toggle_pushes_style_url() {
        let mut c = controller();
        let mut sync = SurfaceSync::attached(&c);
        let mut surface = RecordingSurface::default();
        sync.apply(&c, &mut surface);
        surface.take();

        c.toggle_style();
        sync.apply(&c, &mut surface);
        assert_eq!(
            surface.take(),
            vec![Call::SetStyle(MapStyle::Satellite.style_url().to_string())]
        );
    }

    #[test]
    fn switching_selection_replaces_popup() {
        let mut c = controller();
        let mut sync = SurfaceSync::attached(&c);
        let mut surface = RecordingSurface::default();
        c.select_marker(1);
        sync.apply(&c, &mut surface);
        surface.take();

        c.search("Metro");
        sync.apply(&c, &mut surface);
        let calls = surface.take();
        assert!(calls.contains(&Call::HidePopup));
        assert_eq!(calls.last(), Some(&Call::ShowPopup(2)));
    }

    #[test]
    fn marker_color_comes_from_overall_tier() {
        let set = LocationSet::bundled().expect("bundled data should be valid");
        let metro = set.get(2).expect("record 2");
        assert_eq!(MarkerSpec::for_record(metro, false).color, "#ca8a04");
    }

    #[test]
    fn popup_html_escapes_and_formats() {
        let set = LocationSet::bundled().expect("bundled data should be valid");
        let park = set.get(3).expect("record 3");
        let popup = PopupSpec::for_record(park);
        assert!(popup.html.contains("Riverside Park"));
        assert!(popup.html.contains("safety-excellent"));
        assert!(popup.html.contains("9.1/10"));
        assert!(popup.html.contains("2,156 signals"));

        let mut odd = park.clone();
        odd.name = "<b>Park & Ride</b>".to_string();
        let popup = PopupSpec::for_record(&odd);
        assert!(popup.html.contains("&lt;b&gt;Park &amp; Ride&lt;/b&gt;"));
    }
}
