//! Application shell state.
//!
//! [`Explorer`] owns everything the list and the map render from: user
//! location, the fetched place set, filter criteria, selection and
//! directions. It is the only caller of the place source and of
//! [`select_places`], so the list and map never diverge.
//!
//! Fetches are identified by a [`FetchTicket`]. A new location supersedes the
//! previous ticket (and cancels it); results for a superseded ticket are
//! dropped, so a slow response can never overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::ExploreError;
use crate::location::{DEFAULT_FALLBACK, LocationState};
use crate::map::{MapEvent, MapFrame, MapView};
use crate::overpass::DEFAULT_RADIUS_METERS;
use crate::place::{Coordinate, Place, PlaceId};
use crate::routing::{DirectionsRequest, Route};
use crate::select::{CategoryFilter, Criteria, MAX_PRICE_CEILING, SortKey, select_places};
use crate::traits::{LocationProvider, PlaceSource, RouteProvider};

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Location used when the user continues without sharing theirs.
    pub fallback_location: Coordinate,
    pub radius_meters: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            fallback_location: DEFAULT_FALLBACK,
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Identifies one fetch. Cheap to clone and safe to move to a worker thread.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    token: u64,
    center: Coordinate,
    radius_meters: u32,
    cancel: CancelToken,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

/// Run the fetch described by `ticket`.
///
/// Checks the cancel flag before and after the request; a cancelled ticket
/// yields `ExploreError::Cancelled`.
pub fn run_fetch<S>(ticket: &FetchTicket, source: &S) -> Result<Vec<Place>, ExploreError>
where
    S: PlaceSource + ?Sized,
{
    if ticket.is_cancelled() {
        return Err(ExploreError::Cancelled);
    }
    let places = source.fetch_nearby(ticket.center, ticket.radius_meters)?;
    if ticket.is_cancelled() {
        return Err(ExploreError::Cancelled);
    }
    Ok(places)
}

/// What [`Explorer::complete_fetch`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Place set replaced with this many records.
    Applied(usize),
    /// Fetch succeeded with nothing nearby; the place set is now empty.
    Empty,
    /// Fetch failed; the place set is now empty.
    Failed,
    /// Ticket was superseded; result discarded.
    Stale,
}

/// The only view of fetch state the rendering layer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesStatus {
    /// No coordinate yet.
    Locating,
    Loading,
    Ready,
    /// Places exist upstream or not, but none pass the current filters.
    NoResults,
    /// Last fetch failed (only reachable when the source propagates errors).
    Unavailable,
}

#[derive(Debug)]
pub struct Explorer {
    config: ExplorerConfig,
    location: Option<Coordinate>,
    places: Vec<Place>,
    criteria: Criteria,
    visible: Vec<Place>,
    selected: Option<PlaceId>,
    directions: Option<DirectionsRequest>,
    loading: bool,
    last_fetch_failed: bool,
    next_token: u64,
    in_flight: Option<FetchTicket>,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(ExplorerConfig::default())
    }
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            location: None,
            places: Vec::new(),
            criteria: Criteria::default(),
            visible: Vec::new(),
            selected: None,
            directions: None,
            loading: false,
            last_fetch_failed: false,
            next_token: 1,
            in_flight: None,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    /// Request the user's position through `state` and start a fetch for it.
    pub fn locate<P>(
        &mut self,
        state: &mut LocationState,
        provider: &P,
    ) -> Result<Option<FetchTicket>, ExploreError>
    where
        P: LocationProvider + ?Sized,
    {
        let coordinate = state.request(provider)?;
        Ok(self.set_location(coordinate))
    }

    /// Use the configured fallback location.
    pub fn continue_without_location(&mut self, state: &mut LocationState) -> Option<FetchTicket> {
        let coordinate = state.use_fallback(self.config.fallback_location);
        self.set_location(coordinate)
    }

    /// Move the user. Distances are recomputed immediately, pending
    /// directions start from the new position, and a new fetch ticket is
    /// issued; returns `None` if the coordinate did not change.
    pub fn set_location(&mut self, coordinate: Coordinate) -> Option<FetchTicket> {
        if self.location == Some(coordinate) {
            return None;
        }
        self.location = Some(coordinate);
        if let Some(directions) = self.directions.as_mut() {
            directions.start = coordinate;
        }
        self.places
            .par_iter_mut()
            .for_each(|place| place.update_distance(coordinate));
        self.refresh_visible();
        Some(self.begin_fetch(coordinate))
    }

    /// Issue a fresh ticket for the current location (retry).
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let coordinate = self.location?;
        Some(self.begin_fetch(coordinate))
    }

    fn begin_fetch(&mut self, center: Coordinate) -> FetchTicket {
        if let Some(previous) = self.in_flight.take() {
            debug!(token = previous.token, "superseding in-flight fetch");
            previous.cancel.cancel();
        }

        let ticket = FetchTicket {
            token: self.next_token,
            center,
            radius_meters: self.config.radius_meters,
            cancel: CancelToken::new(),
        };
        self.next_token += 1;
        self.loading = true;
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// The ticket whose result will be accepted, if any.
    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|current| current.token == ticket.token)
    }

    /// Apply a fetch result if `ticket` is still the latest one.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Place>, ExploreError>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            warn!(token = ticket.token, "discarding stale fetch result");
            return FetchOutcome::Stale;
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(mut places) => {
                if let Some(origin) = self.location {
                    places
                        .par_iter_mut()
                        .for_each(|place| place.update_distance(origin));
                }
                let count = places.len();
                self.places = places;
                self.last_fetch_failed = false;
                self.drop_missing_selection();
                self.refresh_visible();
                info!(token = ticket.token, count, visible = self.visible.len(), "applied fetch result");
                if count == 0 {
                    FetchOutcome::Empty
                } else {
                    FetchOutcome::Applied(count)
                }
            }
            Err(err) => {
                warn!(token = ticket.token, error = %err, "fetch failed");
                self.places.clear();
                self.last_fetch_failed = true;
                self.drop_missing_selection();
                self.refresh_visible();
                FetchOutcome::Failed
            }
        }
    }

    /// Run the in-flight fetch synchronously against `source` and apply it.
    pub fn refresh<S>(&mut self, source: &S) -> Option<FetchOutcome>
    where
        S: PlaceSource + ?Sized,
    {
        let ticket = self.in_flight.clone()?;
        let result = run_fetch(&ticket, source);
        Some(self.complete_fetch(&ticket, result))
    }

    /// Cancel any in-flight fetch. Its result will be discarded.
    pub fn shutdown(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            debug!(token = ticket.token, "cancelling fetch on shutdown");
            ticket.cancel.cancel();
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> PlacesStatus {
        if self.location.is_none() {
            PlacesStatus::Locating
        } else if self.loading {
            PlacesStatus::Loading
        } else if self.last_fetch_failed {
            PlacesStatus::Unavailable
        } else if self.visible.is_empty() {
            PlacesStatus::NoResults
        } else {
            PlacesStatus::Ready
        }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
        self.refresh_visible();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.criteria.category = category;
        self.refresh_visible();
    }

    pub fn set_max_price(&mut self, max_price: f64) {
        self.criteria.max_price = max_price;
        self.refresh_visible();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
        self.refresh_visible();
    }

    /// Raise the price ceiling to the slider maximum.
    pub fn reset_filters(&mut self) {
        self.set_max_price(MAX_PRICE_CEILING);
    }

    /// Every place from the last applied fetch, in fetch order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Places passing the current criteria, in display order.
    pub fn visible(&self) -> &[Place] {
        &self.visible
    }

    fn refresh_visible(&mut self) {
        self.visible = select_places(&self.places, &self.criteria);
    }

    fn find(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    fn drop_missing_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.find(id).is_none() {
                debug!(%id, "selected place no longer present");
                self.selected = None;
            }
        }
    }

    pub fn select(&mut self, id: PlaceId) -> Result<&Place, ExploreError> {
        if self.find(id).is_none() {
            return Err(ExploreError::UnknownPlace(id));
        }
        self.selected = Some(id);
        self.find(id).ok_or(ExploreError::UnknownPlace(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Directions from the user to place `id`. Replaces any previous request.
    pub fn request_directions(&mut self, id: PlaceId) -> Result<DirectionsRequest, ExploreError> {
        let start = self.location.ok_or_else(|| {
            ExploreError::LocationUnavailable("enable location services to get directions".to_string())
        })?;
        let place = self.find(id).ok_or(ExploreError::UnknownPlace(id))?;
        let request = DirectionsRequest {
            start,
            end: place.coordinate(),
        };
        self.directions = Some(request);
        Ok(request)
    }

    pub fn directions(&self) -> Option<&DirectionsRequest> {
        self.directions.as_ref()
    }

    pub fn clear_directions(&mut self) {
        self.directions = None;
    }

    /// Resolve the current directions request through `router`.
    pub fn route<R>(&self, router: &R) -> Result<Option<Route>, ExploreError>
    where
        R: RouteProvider + ?Sized,
    {
        self.directions
            .as_ref()
            .map(|request| router.route(request))
            .transpose()
    }

    pub fn handle_map_event(&mut self, event: MapEvent) -> Result<(), ExploreError> {
        match event {
            MapEvent::MarkerSelected(id) => self.select(id).map(|_| ()),
            MapEvent::DirectionsRequested(id) => self.request_directions(id).map(|_| ()),
        }
    }

    pub fn map_frame(&self) -> MapFrame<'_> {
        MapFrame {
            user: self.location,
            places: &self.visible,
            selected: self.selected(),
            directions: self.directions.as_ref(),
        }
    }

    pub fn render<V>(&self, view: &mut V)
    where
        V: MapView + ?Sized,
    {
        view.render(&self.map_frame());
    }
}

impl Drop for Explorer {
    fn drop(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            ticket.cancel.cancel();
        }
    }
}
