//! Interface between the explorer and a map renderer.
//!
//! Tiles, markers, popups and route lines belong to the renderer. The
//! explorer hands it a [`MapFrame`] snapshot and receives [`MapEvent`]s back.

use crate::place::{Coordinate, Place, PlaceId};
use crate::routing::DirectionsRequest;

/// Zoom used when centering on the user.
pub const USER_ZOOM: u8 = 15;

/// Zoom used when centering on a selected place.
pub const PLACE_ZOOM: u8 = 16;

/// Where the map should fly to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFocus {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Everything a renderer needs for one draw. Borrows from the explorer, so
/// the list and the map always show the same places.
#[derive(Debug, Clone, Copy)]
pub struct MapFrame<'a> {
    pub user: Option<Coordinate>,
    pub places: &'a [Place],
    pub selected: Option<&'a Place>,
    pub directions: Option<&'a DirectionsRequest>,
}

impl MapFrame<'_> {
    /// Selected place wins over the user position.
    pub fn focus(&self) -> Option<MapFocus> {
        if let Some(place) = self.selected {
            return Some(MapFocus {
                center: place.coordinate(),
                zoom: PLACE_ZOOM,
            });
        }
        self.user.map(|center| MapFocus {
            center,
            zoom: USER_ZOOM,
        })
    }
}

/// Callbacks from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    MarkerSelected(PlaceId),
    DirectionsRequested(PlaceId),
}

pub trait MapView {
    fn render(&mut self, frame: &MapFrame<'_>);
}
