//! Animation scenarios for deterministic runs.

use std::time::Duration;
use wayline_core::{Easing, PathStyle};
use wayline_env::GeoPoint;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Two-point straight route, run to completion
    StraightLine,

    /// Multi-waypoint urban route with eased sampling
    CityRoute,

    /// Route containing consecutive duplicate waypoints
    DuplicatePoints,

    /// Cancel the animation at roughly 40% progress
    CancelMidway,

    /// Heavy frame-time jitter; traversal time must not drift
    JitterStorm,

    /// Quarter-speed traversal, still completes
    SlowMotion,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::StraightLine,
            ScenarioId::CityRoute,
            ScenarioId::DuplicatePoints,
            ScenarioId::CancelMidway,
            ScenarioId::JitterStorm,
            ScenarioId::SlowMotion,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::StraightLine => "straight_line",
            ScenarioId::CityRoute => "city_route",
            ScenarioId::DuplicatePoints => "duplicate_points",
            ScenarioId::CancelMidway => "cancel_midway",
            ScenarioId::JitterStorm => "jitter_storm",
            ScenarioId::SlowMotion => "slow_motion",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::StraightLine => "Two waypoints, lifted arc, completion expected",
            ScenarioId::CityRoute => "Six-waypoint city loop with ease-in-out sampling",
            ScenarioId::DuplicatePoints => "Duplicate consecutive waypoints must not break tangents",
            ScenarioId::CancelMidway => "Cancel at ~40% progress; no completion fires",
            ScenarioId::JitterStorm => "90% frame jitter; traversal stays frame-rate independent",
            ScenarioId::SlowMotion => "0.25x speed multiplier over the city route",
        }
    }

    /// Run parameters for this scenario.
    pub fn config(&self) -> ScenarioConfig {
        match self {
            ScenarioId::StraightLine => ScenarioConfig {
                route: straight_route(),
                speed_multiplier: 1.0,
                clock_jitter: 0.1,
                easing: Easing::Linear,
                style: PathStyle::Lifted { lift: 0.5 },
                cancel_at: None,
            },
            ScenarioId::CityRoute => ScenarioConfig {
                route: city_route(),
                speed_multiplier: 1.0,
                clock_jitter: 0.1,
                easing: Easing::EaseInOut,
                style: PathStyle::Direct,
                cancel_at: None,
            },
            ScenarioId::DuplicatePoints => ScenarioConfig {
                route: duplicate_route(),
                speed_multiplier: 1.0,
                clock_jitter: 0.1,
                easing: Easing::Linear,
                style: PathStyle::Direct,
                cancel_at: None,
            },
            ScenarioId::CancelMidway => ScenarioConfig {
                route: city_route(),
                speed_multiplier: 1.0,
                clock_jitter: 0.1,
                easing: Easing::Linear,
                style: PathStyle::Direct,
                cancel_at: Some(0.4),
            },
            ScenarioId::JitterStorm => ScenarioConfig {
                route: city_route(),
                speed_multiplier: 1.0,
                clock_jitter: 0.9,
                easing: Easing::Linear,
                style: PathStyle::Direct,
                cancel_at: None,
            },
            ScenarioId::SlowMotion => ScenarioConfig {
                route: city_route(),
                speed_multiplier: 0.25,
                clock_jitter: 0.1,
                easing: Easing::Linear,
                style: PathStyle::Direct,
                cancel_at: None,
            },
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "straight_line" | "straightline" => Ok(ScenarioId::StraightLine),
            "city_route" | "cityroute" => Ok(ScenarioId::CityRoute),
            "duplicate_points" | "duplicatepoints" => Ok(ScenarioId::DuplicatePoints),
            "cancel_midway" | "cancelmidway" => Ok(ScenarioId::CancelMidway),
            "jitter_storm" | "jitterstorm" => Ok(ScenarioId::JitterStorm),
            "slow_motion" | "slowmotion" => Ok(ScenarioId::SlowMotion),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

/// Concrete run parameters for one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Geographic route from the (canned) routing collaborator
    pub route: Vec<GeoPoint>,

    /// Speed multiplier over the 5s baseline
    pub speed_multiplier: f64,

    /// Frame jitter fraction for the sim clock
    pub clock_jitter: f64,

    /// Sampling easing policy
    pub easing: Easing,

    /// Two-point curve style
    pub style: PathStyle,

    /// Cancel once progress reaches this value
    pub cancel_at: Option<f64>,
}

impl ScenarioConfig {
    /// Expected traversal duration for a full run.
    pub fn expected_duration(&self) -> Duration {
        Duration::from_secs_f64(5.0 / self.speed_multiplier)
    }
}

/// Delhi city-center to the north-west outskirts.
fn straight_route() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(28.6139, 77.209),
        GeoPoint::new(28.7041, 77.1025),
    ]
}

/// Six waypoints looping through central Delhi.
fn city_route() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(28.6139, 77.2090),
        GeoPoint::new(28.6271, 77.2166),
        GeoPoint::new(28.6410, 77.2100),
        GeoPoint::new(28.6507, 77.1934),
        GeoPoint::new(28.6692, 77.1817),
        GeoPoint::new(28.7041, 77.1025),
    ]
}

/// Straight route with consecutive duplicates injected.
fn duplicate_route() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(28.6139, 77.2090),
        GeoPoint::new(28.6139, 77.2090),
        GeoPoint::new(28.6410, 77.2100),
        GeoPoint::new(28.6410, 77.2100),
        GeoPoint::new(28.7041, 77.1025),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_names_round_trip() {
        for id in ScenarioId::all() {
            let parsed: ScenarioId = id.name().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        assert!("warp_speed".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn test_all_routes_have_at_least_two_points() {
        for id in ScenarioId::all() {
            assert!(id.config().route.len() >= 2, "{} too short", id);
        }
    }

    #[test]
    fn test_slow_motion_expected_duration() {
        let cfg = ScenarioId::SlowMotion.config();
        assert_eq!(cfg.expected_duration(), Duration::from_secs(20));
    }
}
