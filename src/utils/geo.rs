//! Coarse geocoding for the cities the platform serves, and great-circle distance.

pub const DEFAULT_COORDINATES: (f64, f64) = (52.3676, 4.9041);

const CITY_COORDINATES: &[(&str, (f64, f64))] = &[
    ("amsterdam", (52.3676, 4.9041)),
    ("rotterdam", (51.9244, 4.4777)),
    ("den haag", (52.0705, 4.3007)),
    ("utrecht", (52.0907, 5.1214)),
    ("eindhoven", (51.4416, 5.4697)),
    ("groningen", (53.2194, 6.5665)),
];

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Looks a city up case-insensitively; unknown cities fall back to Amsterdam.
pub fn city_coordinates(city: &str) -> (f64, f64) {
    let needle = city.trim().to_lowercase();
    CITY_COORDINATES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, coords)| *coords)
        .unwrap_or(DEFAULT_COORDINATES)
}

/// Haversine distance in kilometres.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lng2) = (to.0.to_radians(), to.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
