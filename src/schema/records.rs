use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

use super::datasets::{AIRLINES, AIRPORTS, ROUTES};
use super::types::{DatasetSchema, NodeLabel};

/// Attribute set of one graph node, in cleaned-file column order
pub type Properties = Vec<(&'static str, String)>;

/// A cleaned row that becomes one node in the graph
pub trait GraphRecord: DeserializeOwned {
    const LABEL: NodeLabel;

    fn schema() -> &'static DatasetSchema;

    fn properties(&self) -> Properties;
}

/// Accept only integer ids but keep them as written, so `010` still matches
/// the same text in route foreign keys
fn integer_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let text = String::deserialize(deserializer)?;
    text.parse::<i64>()
        .map_err(|_| de::Error::custom(format!("invalid integer id {:?}", text)))?;
    Ok(text)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airport {
    #[serde(rename = "AirportID", deserialize_with = "integer_text")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    pub country: String,
    /// 3-letter code, `N/A` if unassigned
    #[serde(rename = "IATA")]
    pub iata: String,
    /// 4-letter code, `N/A` if unassigned
    #[serde(rename = "ICAO")]
    pub icao: String,
    #[serde(rename = "Latitude")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    pub longitude: String,
}

impl GraphRecord for Airport {
    const LABEL: NodeLabel = NodeLabel::Airport;

    fn schema() -> &'static DatasetSchema {
        &AIRPORTS
    }

    fn properties(&self) -> Properties {
        vec![
            ("AirportID", self.id.clone()),
            ("Name", self.name.clone()),
            ("City", self.city.clone()),
            ("Country", self.country.clone()),
            ("IATA", self.iata.clone()),
            ("ICAO", self.icao.clone()),
            ("Latitude", self.latitude.clone()),
            ("Longitude", self.longitude.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airline {
    #[serde(rename = "AirlineID", deserialize_with = "integer_text")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IATA")]
    pub iata: String,
    #[serde(rename = "ICAO")]
    pub icao: String,
    #[serde(rename = "Callsign")]
    pub callsign: String,
    #[serde(rename = "Country")]
    pub country: String,
    /// "Y" or "N"; not reliable upstream
    #[serde(rename = "Active")]
    pub active: String,
}

impl GraphRecord for Airline {
    const LABEL: NodeLabel = NodeLabel::Airline;

    fn schema() -> &'static DatasetSchema {
        &AIRLINES
    }

    fn properties(&self) -> Properties {
        vec![
            ("AirlineID", self.id.clone()),
            ("Name", self.name.clone()),
            ("IATA", self.iata.clone()),
            ("ICAO", self.icao.clone()),
            ("Callsign", self.callsign.clone()),
            ("Country", self.country.clone()),
            ("Active", self.active.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Codeshare {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl Codeshare {
    pub fn as_str(&self) -> &'static str {
        match self {
            Codeshare::Yes => "Y",
            Codeshare::No => "N",
        }
    }
}

/// Foreign keys stay textual: unknown ids are `N/A` after cleaning
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    #[serde(rename = "Airline")]
    pub airline: String,
    #[serde(rename = "AirlineID")]
    pub airline_id: String,
    #[serde(rename = "SourceAirport")]
    pub source_airport: String,
    #[serde(rename = "SourceAirportID")]
    pub source_airport_id: String,
    #[serde(rename = "DestinationAirport")]
    pub destination_airport: String,
    #[serde(rename = "DestinationAirportID")]
    pub destination_airport_id: String,
    #[serde(rename = "Codeshare")]
    pub codeshare: Codeshare,
    #[serde(rename = "Stops")]
    pub stops: String,
}

impl GraphRecord for Route {
    const LABEL: NodeLabel = NodeLabel::Route;

    fn schema() -> &'static DatasetSchema {
        &ROUTES
    }

    fn properties(&self) -> Properties {
        vec![
            ("Airline", self.airline.clone()),
            ("AirlineID", self.airline_id.clone()),
            ("SourceAirport", self.source_airport.clone()),
            ("SourceAirportID", self.source_airport_id.clone()),
            ("DestinationAirport", self.destination_airport.clone()),
            ("DestinationAirportID", self.destination_airport_id.clone()),
            ("Codeshare", self.codeshare.as_str().to_string()),
            ("Stops", self.stops.clone()),
        ]
    }
}
