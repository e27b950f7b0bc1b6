//! User position and geolocation permission state.

use tracing::{info, warn};

use crate::error::ExploreError;
use crate::place::Coordinate;
use crate::traits::LocationProvider;

/// Used when the user continues without sharing a location (Indiranagar, Bangalore).
pub const DEFAULT_FALLBACK: Coordinate = Coordinate::new_unchecked(12.9716, 77.5946);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    #[default]
    Prompt,
    Granted,
    Denied,
}

/// A provider that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinate, ExploreError> {
        Ok(self.0)
    }
}

/// A provider for platforms without geolocation support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_position(&self) -> Result<Coordinate, ExploreError> {
        Err(ExploreError::LocationUnavailable(
            "geolocation is not supported".to_string(),
        ))
    }
}

/// Position plus permission status, passed explicitly to whoever needs it.
#[derive(Debug, Clone, Default)]
pub struct LocationState {
    coordinate: Option<Coordinate>,
    permission: PermissionStatus,
    error: Option<String>,
}

impl LocationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    /// Message from the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Ask `provider` for a position and record the outcome.
    pub fn request<P>(&mut self, provider: &P) -> Result<Coordinate, ExploreError>
    where
        P: LocationProvider + ?Sized,
    {
        match provider.current_position() {
            Ok(coordinate) => {
                info!(%coordinate, "location granted");
                self.coordinate = Some(coordinate);
                self.permission = PermissionStatus::Granted;
                self.error = None;
                Ok(coordinate)
            }
            Err(err) => {
                warn!(error = %err, "location request failed");
                self.permission = PermissionStatus::Denied;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Continue without location: use `fallback` and treat it as granted.
    pub fn use_fallback(&mut self, fallback: Coordinate) -> Coordinate {
        self.coordinate = Some(fallback);
        self.permission = PermissionStatus::Granted;
        fallback
    }
}
