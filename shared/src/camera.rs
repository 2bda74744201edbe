use serde::{Deserialize, Serialize};

use crate::location::LngLat;

pub const DEFAULT_CENTER: LngLat = LngLat {
    longitude: -74.006,
    latitude: 40.7128,
};
pub const INITIAL_ZOOM: f64 = 13.0;
/// Zoom used when a search finds nothing.
pub const FALLBACK_ZOOM: f64 = 14.0;
/// Zoom used when focusing a single location.
pub const FOCUS_ZOOM: f64 = 15.0;

pub const PITCH_3D: f64 = 60.0;
pub const BEARING_3D: f64 = -17.6;

/// Camera parameters handed to the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub bearing: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::centered(DEFAULT_CENTER, INITIAL_ZOOM)
    }
}

impl ViewState {
    pub fn centered(center: LngLat, zoom: f64) -> Self {
        Self {
            longitude: center.longitude,
            latitude: center.latitude,
            zoom,
            pitch: 0.0,
            bearing: 0.0,
        }
    }

    pub fn center(&self) -> LngLat {
        LngLat {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }

    /// Move to `center` at `zoom`, keeping the current tilt and rotation.
    pub fn recenter(&mut self, center: LngLat, zoom: f64) {
        self.longitude = center.longitude;
        self.latitude = center.latitude;
        self.zoom = zoom;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    #[default]
    Street,
    Satellite,
    Terrain,
}

impl MapStyle {
    pub fn next(self) -> Self {
        match self {
            Self::Street => Self::Satellite,
            Self::Satellite => Self::Terrain,
            Self::Terrain => Self::Street,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Street => "Street",
            Self::Satellite => "Satellite",
            Self::Terrain => "Terrain",
        }
    }

    pub fn style_url(self) -> &'static str {
        match self {
            Self::Street => "mapbox://styles/mapbox/light-v11",
            Self::Satellite => "mapbox://styles/mapbox/satellite-streets-v12",
            Self::Terrain => "mapbox://styles/mapbox/outdoors-v12",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dimension {
    #[default]
    #[serde(rename = "2d")]
    Flat,
    #[serde(rename = "3d")]
    Tilted,
}

impl Dimension {
    pub fn toggled(self) -> Self {
        match self {
            Self::Flat => Self::Tilted,
            Self::Tilted => Self::Flat,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Flat => "2D",
            Self::Tilted => "3D",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_cycles_back_to_street() {
        let mut style = MapStyle::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            style = style.next();
            seen.push(style);
        }
        assert_eq!(
            seen,
            vec![MapStyle::Satellite, MapStyle::Terrain, MapStyle::Street]
        );
    }

    #[test]
    fn recenter_keeps_tilt() {
        let mut view = ViewState {
            pitch: PITCH_3D,
            bearing: BEARING_3D,
            ..ViewState::default()
        };
        view.recenter(
            LngLat {
                longitude: 1.0,
                latitude: 2.0,
            },
            FOCUS_ZOOM,
        );
        assert_eq!(view.center().longitude, 1.0);
        assert_eq!(view.zoom, FOCUS_ZOOM);
        assert_eq!(view.pitch, PITCH_3D);
        assert_eq!(view.bearing, BEARING_3D);
    }

    #[test]
    fn default_view_is_flat_over_lower_manhattan() {
        let view = ViewState::default();
        assert_eq!(view.center(), DEFAULT_CENTER);
        assert_eq!(view.zoom, INITIAL_ZOOM);
        assert_eq!((view.pitch, view.bearing), (0.0, 0.0));
    }
}
