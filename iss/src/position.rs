//! Position of the ISS and the wire format it is decoded from.
//!
//! The API sends coordinates as JSON strings like `"29.9314"`.  We check they are proper
//! floating-point numbers then store them as `Decimal` with exactly `SCALE` digits after
//! the decimal point.
//!

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;

use crate::IssError;

/// Number of digits kept after the decimal point
pub const SCALE: u32 = 4;

/// Geographical coordinates of the International Space Station at the time of the request.
///
/// Serialized with both coordinates in their canonical string form.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Position {
    /// Latitude
    #[serde(serialize_with = "serialize_canonical")]
    pub lat: Decimal,
    /// Longitude
    #[serde(serialize_with = "serialize_canonical")]
    pub long: Decimal,
}

impl Position {
    /// Both coordinates in their canonical string form.
    ///
    pub fn as_strings(&self) -> (String, String) {
        (canonical(&self.lat), canonical(&self.long))
    }
}

/// Canonical string form: trailing zeros stripped, `10.0000` is `10`.
///
fn canonical(d: &Decimal) -> String {
    d.normalize().to_string()
}

fn serialize_canonical<S: Serializer>(d: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&canonical(d))
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (lat, long) = self.as_strings();
        write!(f, "{lat} {long}")
    }
}

/// What the API sends back.
///
/// `timestamp` and `message` are only logged.
///
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    message: String,
    iss_position: RawPosition,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    latitude: String,
    longitude: String,
}

/// Decode the body of a successful answer into a `Position`.
///
#[tracing::instrument(skip(body))]
pub(crate) fn parse_response(body: &str) -> Result<Position, IssError> {
    let res: RawResponse = serde_json::from_str(body)?;
    trace!("timestamp={} message={}", res.timestamp, res.message);

    let lat = to_decimal("latitude", &res.iss_position.latitude)?;
    let long = to_decimal("longitude", &res.iss_position.longitude)?;
    Ok(Position { lat, long })
}

/// Convert one coordinate into a fixed-scale decimal.
///
/// The string must be a valid finite float.  The decimal itself is built from the string
/// whenever possible so we do not inherit binary rounding, the float is only a fallback.
///
pub(crate) fn to_decimal(field: &'static str, coordinate: &str) -> Result<Decimal, IssError> {
    let bad = |reason: String| IssError::Conversion {
        field,
        value: coordinate.to_owned(),
        reason,
    };

    let value = coordinate
        .parse::<f64>()
        .map_err(|e| bad(e.to_string()))?;
    if !value.is_finite() {
        return Err(bad("not a finite number".to_string()));
    }

    let dec = Decimal::from_str(coordinate)
        .or_else(|_| Decimal::from_scientific(coordinate))
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .ok_or_else(|| bad("out of decimal range".to_string()))?;

    let mut dec = dec.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    dec.rescale(SCALE);

    // `rescale()` stops short when the integer part leaves no room for the fraction.
    //
    if dec.scale() != SCALE {
        return Err(bad("out of decimal range".to_string()));
    }
    Ok(dec)
}
