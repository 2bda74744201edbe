use crate::camera::{
    BEARING_3D, DEFAULT_CENTER, Dimension, FALLBACK_ZOOM, FOCUS_ZOOM, MapStyle, PITCH_3D,
    ViewState,
};
use crate::location::{LocationId, LocationRecord, LocationSet};
use crate::summary::{self, Aggregates, LegendEntry};

/// Handle for one in-flight search. Only the most recently issued ticket may
/// resolve; older ones are dropped on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(LocationId),
    /// Camera reset to the default region, selection untouched.
    NotFound,
    /// A newer search was issued before this one resolved.
    Superseded,
}

/// Tilt and rotation to restore when leaving 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FlatCamera {
    pitch: f64,
    bearing: f64,
}

/// Owns camera, selection and search state for the map view. Every user
/// interaction is a method call here; the renderer only reads.
#[derive(Debug, Clone, PartialEq)]
pub struct MapController {
    locations: LocationSet,
    aggregates: Aggregates,
    view: ViewState,
    camera_epoch: u64,
    selected: Option<LocationId>,
    search_text: String,
    search_seq: u64,
    searching: bool,
    style: MapStyle,
    dimension: Dimension,
    flat_camera: Option<FlatCamera>,
}

impl MapController {
    pub fn new(locations: LocationSet) -> Self {
        let aggregates = Aggregates::from_set(&locations);
        Self {
            locations,
            aggregates,
            view: ViewState::default(),
            camera_epoch: 0,
            selected: None,
            search_text: String::new(),
            search_seq: 0,
            searching: false,
            style: MapStyle::default(),
            dimension: Dimension::default(),
            flat_camera: None,
        }
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Bumped on every camera move the controller makes itself. Moves reported
    /// by the map through [`observe_camera`](Self::observe_camera) leave it alone.
    pub fn camera_epoch(&self) -> u64 {
        self.camera_epoch
    }

    pub fn selected_id(&self) -> Option<LocationId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&LocationRecord> {
        self.selected.and_then(|id| self.locations.get(id))
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn aggregates(&self) -> Aggregates {
        self.aggregates
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        summary::legend(&self.locations)
    }

    /// First `n` records, for the empty-state list.
    pub fn preview(&self, n: usize) -> &[LocationRecord] {
        let slice = self.locations.as_slice();
        &slice[..n.min(slice.len())]
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Start a search. Returns `None` for blank queries, which change nothing.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.search_seq = self.search_seq.wrapping_add(1);
        self.searching = true;
        Some(SearchTicket {
            seq: self.search_seq,
            query: query.to_string(),
        })
    }

    /// Apply a search result, unless a newer search has been issued since.
    pub fn resolve_search(&mut self, ticket: &SearchTicket) -> SearchOutcome {
        if ticket.seq != self.search_seq {
            return SearchOutcome::Superseded;
        }
        self.searching = false;

        let found = self.locations.find(&ticket.query).map(|r| (r.id, r.position));
        match found {
            Some((id, position)) => {
                self.move_camera(|view| view.recenter(position, FOCUS_ZOOM));
                self.selected = Some(id);
                SearchOutcome::Found(id)
            }
            None => {
                self.move_camera(|view| view.recenter(DEFAULT_CENTER, FALLBACK_ZOOM));
                SearchOutcome::NotFound
            }
        }
    }

    /// Both search phases back to back, without the delay in between.
    pub fn search(&mut self, query: &str) -> Option<SearchOutcome> {
        let ticket = self.begin_search(query)?;
        Some(self.resolve_search(&ticket))
    }

    /// Select a location and focus the camera on it. Unknown ids are ignored.
    pub fn select_marker(&mut self, id: LocationId) -> bool {
        let Some(position) = self.locations.get(id).map(|r| r.position) else {
            return false;
        };
        self.selected = Some(id);
        self.move_camera(|view| view.recenter(position, FOCUS_ZOOM));
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn toggle_style(&mut self) -> MapStyle {
        self.style = self.style.next();
        self.style
    }

    pub fn toggle_dimension(&mut self) -> Dimension {
        self.dimension = self.dimension.toggled();
        match self.dimension {
            Dimension::Tilted => {
                let saved = FlatCamera {
                    pitch: self.view.pitch,
                    bearing: self.view.bearing,
                };
                self.flat_camera = Some(saved);
                self.move_camera(|view| {
                    view.pitch = PITCH_3D;
                    view.bearing = BEARING_3D;
                });
            }
            Dimension::Flat => {
                let saved = self.flat_camera.take().unwrap_or(FlatCamera {
                    pitch: 0.0,
                    bearing: 0.0,
                });
                self.move_camera(|view| {
                    view.pitch = saved.pitch;
                    view.bearing = saved.bearing;
                });
            }
        }
        self.dimension
    }

    /// Record a camera change the user made on the map itself.
    pub fn observe_camera(&mut self, view: ViewState) {
        self.view = view;
    }

    fn move_camera(&mut self, f: impl FnOnce(&mut ViewState)) {
        f(&mut self.view);
        self.camera_epoch = self.camera_epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::INITIAL_ZOOM;

    fn controller() -> MapController {
        MapController::new(LocationSet::bundled().expect("bundled data should be valid"))
    }

    #[test]
    fn blank_queries_are_noops() {
        let mut c = controller();
        c.select_marker(2);
        let before = c.clone();
        assert_eq!(c.search(""), None);
        assert_eq!(c.search("   "), None);
        assert_eq!(c, before);
    }

    #[test]
    fn search_focuses_match() {
        let mut c = controller();
        assert_eq!(c.search("Riverside"), Some(SearchOutcome::Found(3)));
        assert_eq!(c.selected().map(|r| r.name.as_str()), Some("Riverside Park"));
        assert!(c.view().zoom > INITIAL_ZOOM);
        assert_eq!(c.view().longitude, -73.989);
        assert_eq!(c.view().latitude, 40.7242);
        assert!(!c.is_searching());
    }

    #[test]
    fn search_miss_resets_camera_and_keeps_selection() {
        let mut c = controller();
        c.select_marker(4);
        c.observe_camera(ViewState::centered(
            crate::location::LngLat {
                longitude: 2.35,
                latitude: 48.85,
            },
            9.0,
        ));
        assert_eq!(c.search("doesnotexist"), Some(SearchOutcome::NotFound));
        assert_eq!(c.view().center(), DEFAULT_CENTER);
        assert_eq!(c.view().zoom, FALLBACK_ZOOM);
        assert_eq!(c.selected_id(), Some(4));
    }

    #[test]
    fn superseded_search_does_not_apply() {
        let mut c = controller();
        let stale = c.begin_search("Riverside").expect("ticket");
        let fresh = c.begin_search("Metro").expect("ticket");
        assert!(c.is_searching());

        assert_eq!(c.resolve_search(&fresh), SearchOutcome::Found(2));
        let after_fresh = c.clone();
        assert_eq!(c.resolve_search(&stale), SearchOutcome::Superseded);
        assert_eq!(c, after_fresh);
        assert_eq!(c.selected_id(), Some(2));
    }

    #[test]
    fn stale_result_arriving_first_is_still_dropped() {
        let mut c = controller();
        let stale = c.begin_search("Riverside").expect("ticket");
        let fresh = c.begin_search("doesnotexist").expect("ticket");
        assert_eq!(c.resolve_search(&stale), SearchOutcome::Superseded);
        assert!(c.is_searching());
        assert_eq!(c.selected_id(), None);
        assert_eq!(c.resolve_search(&fresh), SearchOutcome::NotFound);
        assert!(!c.is_searching());
    }

    #[test]
    fn select_and_clear() {
        let mut c = controller();
        assert!(c.select_marker(1));
        assert_eq!(c.view().zoom, FOCUS_ZOOM);
        c.clear_selection();
        assert_eq!(c.selected_id(), None);
        assert!(!c.select_marker(99));
        assert_eq!(c.selected_id(), None);
    }

    #[test]
    fn toggling_dimension_twice_restores_tilt() {
        let mut c = controller();
        let mut rotated = c.view();
        rotated.bearing = 33.0;
        rotated.pitch = 12.0;
        c.observe_camera(rotated);

        assert_eq!(c.toggle_dimension(), Dimension::Tilted);
        assert_eq!((c.view().pitch, c.view().bearing), (PITCH_3D, BEARING_3D));
        assert_eq!(c.toggle_dimension(), Dimension::Flat);
        assert_eq!((c.view().pitch, c.view().bearing), (12.0, 33.0));
    }

    #[test]
    fn style_toggle_cycles() {
        let mut c = controller();
        assert_eq!(c.toggle_style(), MapStyle::Satellite);
        assert_eq!(c.toggle_style(), MapStyle::Terrain);
        assert_eq!(c.toggle_style(), MapStyle::Street);
    }

    #[test]
    fn camera_epoch_tracks_programmatic_moves_only() {
        let mut c = controller();
        let start = c.camera_epoch();
        c.observe_camera(ViewState::default());
        assert_eq!(c.camera_epoch(), start);
        c.select_marker(1);
        assert_eq!(c.camera_epoch(), start + 1);
        c.search("nowhere");
        assert_eq!(c.camera_epoch(), start + 2);
        c.clear_selection();
        c.toggle_style();
        assert_eq!(c.camera_epoch(), start + 2);
    }

    #[test]
    fn preview_is_clamped() {
        let c = controller();
        assert_eq!(c.preview(3).len(), 3);
        assert_eq!(c.preview(10).len(), 4);
    }
}
