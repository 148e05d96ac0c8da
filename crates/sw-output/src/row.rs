//! Plain data row type written by output backends.

/// One summary entry of one route's criterion, tagged with its route.
///
/// A route contributes one row per entry of its criterion summary; every
/// row of a route carries the same `exposure`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummaryRow {
    /// Artifact file stem, e.g. `route_12_noon_recommended`.
    pub source:      String,
    pub pair_id:     u32,
    pub time_of_day: String,
    pub preference:  String,
    /// Criterion class value of this entry.
    pub value:       f64,
    /// Metres of the route with this value.
    pub distance:    f64,
    /// Share of the route with this value, in percent.
    pub amount:      f64,
    /// Distance-weighted mean criterion value of the whole route; `NaN` when
    /// the route's summary covers zero distance.
    pub exposure:    f64,
}

/// Column names shared by every backend, in order.
pub const COLUMNS: [&str; 8] = [
    "source",
    "pair_id",
    "time_of_day",
    "preference",
    "value",
    "distance",
    "amount",
    "exposure",
];
