//! Layouts of the three OpenFlights datasets

use super::types::*;

pub static AIRPORTS: DatasetSchema = DatasetSchema {
    name: "airports",
    label: NodeLabel::Airport,
    raw_file: "airports.csv",
    clean_file: "airports.csv",
    upstream_file: "airports.dat",
    columns: &[
        Column::keep("AirportID"),
        Column::keep("Name"),
        Column::keep("City"),
        Column::keep("Country"),
        Column::keep("IATA"),
        Column::keep("ICAO"),
        Column::keep("Latitude"),
        Column::keep("Longitude"),
        Column::dropped("Altitude"),
        Column::dropped("Timezone"),
        Column::dropped("DST"),
        Column::dropped("TzDatabase"),
        Column::dropped("Type"),
        Column::dropped("Source"),
    ],
    extra_sentinels: &[],
    row_filter: None,
};

pub static AIRLINES: DatasetSchema = DatasetSchema {
    name: "airlines",
    label: NodeLabel::Airline,
    raw_file: "airlines.csv",
    clean_file: "airlines.csv",
    upstream_file: "airlines.dat",
    columns: &[
        Column::keep("AirlineID"),
        Column::keep("Name"),
        Column::dropped("Alias"),
        Column::keep("IATA"),
        Column::keep("ICAO"),
        Column::keep("Callsign"),
        Column::keep("Country"),
        Column::keep("Active"),
    ],
    extra_sentinels: &["Unknown"],
    // The upstream file starts with a placeholder airline numbered -1
    row_filter: Some(RowFilter {
        column: "AirlineID",
        excluded_ids: &[-1],
    }),
};

pub static ROUTES: DatasetSchema = DatasetSchema {
    name: "routes",
    label: NodeLabel::Route,
    raw_file: "routes.csv",
    clean_file: "routes.csv",
    upstream_file: "routes.dat",
    columns: &[
        Column::keep("Airline"),
        Column::keep("AirlineID"),
        Column::keep("SourceAirport"),
        Column::keep("SourceAirportID"),
        Column::keep("DestinationAirport"),
        Column::keep("DestinationAirportID"),
        Column::flag("Codeshare", "N"),
        Column::keep("Stops"),
        Column::dropped("Equipment"),
    ],
    extra_sentinels: &[],
    row_filter: None,
};

/// All datasets, in load order
pub static ALL_DATASETS: &[&DatasetSchema] = &[&AIRPORTS, &AIRLINES, &ROUTES];
