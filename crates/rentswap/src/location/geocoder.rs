use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Coordinates, LocationError};

const USER_AGENT: &str = "rentswap/0.1 (+https://rentswap.app)";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Human-readable place returned by reverse geocoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl GeocodedPlace {
    /// Postal-style address: name or street, city, region, postal code, country.
    pub fn formatted_address(&self) -> Option<String> {
        let street_line = match (&self.street, &self.street_number) {
            (Some(street), Some(number)) => Some(format!("{number} {street}")),
            (Some(street), None) => Some(street.clone()),
            _ => None,
        };
        let lead = self.name.clone().or(street_line);

        let parts: Vec<String> = [
            lead,
            self.city.clone(),
            self.region.clone(),
            self.postal_code.clone(),
            self.country.clone(),
        ]
        .into_iter()
        .flatten()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Converts coordinates into a human-readable place.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<GeocodedPlace>, LocationError>;
}

/// Geocoder used when reverse geocoding is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGeocoder;

#[async_trait]
impl ReverseGeocoder for NullGeocoder {
    async fn reverse_geocode(
        &self,
        _coordinates: Coordinates,
    ) -> Result<Option<GeocodedPlace>, LocationError> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

/// Reverse geocoder backed by a Nominatim-compatible HTTP endpoint.
///
/// One request per lookup; there is no cache and no retry.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str) -> Result<Self, LocationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| LocationError::Unavailable(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<GeocodedPlace>, LocationError> {
        coordinates.validate()?;

        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| LocationError::Geocoding(err.to_string()))?;

        if !response.status().is_success() {
            return Err(LocationError::Geocoding(format!(
                "geocoder returned status {}",
                response.status()
            )));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|err| LocationError::Geocoding(err.to_string()))?;

        let place = place_from_response(body);
        debug!(
            lat = coordinates.latitude,
            lon = coordinates.longitude,
            city = place.as_ref().and_then(|p| p.city.as_deref()).unwrap_or("unknown"),
            "reverse geocoded coordinates"
        );
        Ok(place)
    }
}

fn place_from_response(response: NominatimResponse) -> Option<GeocodedPlace> {
    if response.error.is_some() {
        return None;
    }
    let address = response.address?;

    Some(GeocodedPlace {
        name: response.name.filter(|name| !name.trim().is_empty()),
        street: address.road,
        street_number: address.house_number,
        city: address.city.or(address.town).or(address.village),
        region: address.state,
        postal_code: address.postcode,
        country: address.country,
        country_code: address.country_code.map(|code| code.to_uppercase()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<GeocodedPlace> {
        let response: NominatimResponse = serde_json::from_str(raw).expect("valid payload");
        place_from_response(response)
    }

    #[test]
    fn maps_nominatim_address_fields() {
        let place = parse(
            r#"{
                "name": "",
                "address": {
                    "house_number": "12",
                    "road": "Sheikh Zayed Road",
                    "town": "Dubai",
                    "state": "Dubai",
                    "postcode": "00000",
                    "country": "United Arab Emirates",
                    "country_code": "ae"
                }
            }"#,
        )
        .expect("place parsed");

        assert_eq!(place.city.as_deref(), Some("Dubai"));
        assert_eq!(place.country_code.as_deref(), Some("AE"));
        assert!(place.name.is_none());
        assert_eq!(
            place.formatted_address().as_deref(),
            Some("12 Sheikh Zayed Road, Dubai, Dubai, 00000, United Arab Emirates")
        );
    }

    #[test]
    fn error_payload_yields_no_place() {
        assert!(parse(r#"{"error": "Unable to geocode"}"#).is_none());
    }

    #[test]
    fn formatted_address_prefers_name_and_skips_gaps() {
        let place = GeocodedPlace {
            name: Some("Marina Mall".to_string()),
            street: Some("Corniche".to_string()),
            city: Some("Abu Dhabi".to_string()),
            country: Some("United Arab Emirates".to_string()),
            ..GeocodedPlace::default()
        };
        assert_eq!(
            place.formatted_address().as_deref(),
            Some("Marina Mall, Abu Dhabi, United Arab Emirates")
        );
        assert!(GeocodedPlace::default().formatted_address().is_none());
    }

    #[tokio::test]
    async fn null_geocoder_returns_nothing() {
        let coordinates = Coordinates::new(0.0, 0.0).expect("valid");
        assert_eq!(NullGeocoder.reverse_geocode(coordinates).await, Ok(None));
    }
}
