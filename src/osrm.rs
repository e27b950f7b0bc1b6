//! OSRM HTTP adapter for turn-by-turn routes.

use serde::Deserialize;
use tracing::debug;

use crate::error::ExploreError;
use crate::polyline::Polyline;
use crate::routing::{DirectionsRequest, Route, RouteStep};
use crate::traits::RouteProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmRouter {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmRouter {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, request: &DirectionsRequest) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&steps=true",
            self.config.base_url,
            self.config.profile,
            request.start.lng,
            request.start.lat,
            request.end.lng,
            request.end.lat,
        )
    }
}

impl RouteProvider for OsrmRouter {
    fn route(&self, request: &DirectionsRequest) -> Result<Route, ExploreError> {
        let url = self.route_url(request);
        debug!(%url, "requesting OSRM route");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .map_err(|err| ExploreError::RouteUnavailable(err.to_string()))?;

        if body.code != "Ok" {
            let reason = body.message.unwrap_or(body.code);
            return Err(ExploreError::RouteUnavailable(reason));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| ExploreError::RouteUnavailable("no route found".to_string()))?;

        Ok(route.into_route())
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
    modifier: Option<String>,
}

impl OsrmRoute {
    fn into_route(self) -> Route {
        let steps = self
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| RouteStep {
                instruction: instruction(&step.maneuver, &step.name),
                distance_m: step.distance,
                duration_secs: step.duration,
            })
            .collect();

        Route {
            distance_km: self.distance / 1000.0,
            duration_secs: self.duration,
            geometry: Polyline::from_geojson(&self.geometry.coordinates),
            steps,
        }
    }
}

/// Human-readable text for a maneuver, e.g. "Turn left onto 100 Feet Road".
fn instruction(maneuver: &OsrmManeuver, road: &str) -> String {
    let verb = match maneuver.kind.as_str() {
        "depart" => "Head".to_string(),
        "arrive" => return "Arrive at destination".to_string(),
        "turn" | "end of road" | "fork" => "Turn".to_string(),
        "roundabout" | "rotary" => "Enter the roundabout and exit".to_string(),
        other => capitalize(other),
    };

    let mut text = match &maneuver.modifier {
        Some(modifier) => format!("{verb} {modifier}"),
        None => verb,
    };
    if !road.is_empty() {
        text.push_str(" onto ");
        text.push_str(road);
    }
    text
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
