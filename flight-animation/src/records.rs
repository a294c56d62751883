use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::types::{Coordinate, FlightRecord, LoadError, RecordError, DEFAULT_FLIGHT_COLOR};

/// A source of flight records, in playback order.
pub trait FlightSource {
    fn load_flights(&mut self) -> Result<LoadReport, LoadError>;
}

/// Flights accepted from a source plus the rows that were rejected.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    pub flights: Vec<FlightRecord>,
    pub rejected: Vec<RecordError>,
}

/// Reads flights from a CSV file with the columns
/// `id,text,origin_name,origin_lon,origin_lat,destination_name,destination_lon,destination_lat,color`.
pub struct CsvFlightSource {
    path: PathBuf,
}

impl CsvFlightSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl FlightSource for CsvFlightSource {
    fn load_flights(&mut self) -> Result<LoadReport, LoadError> {
        let file = File::open(&self.path)?;
        parse_flights(file)
    }
}

#[derive(Debug, Deserialize)]
struct FlightRow {
    id: i64,
    text: String,
    origin_name: String,
    origin_lon: f64,
    origin_lat: f64,
    destination_name: String,
    destination_lon: f64,
    destination_lat: f64,
    #[serde(default)]
    color: Option<String>,
}

impl FlightRow {
    fn into_record(self, row: usize) -> Result<FlightRecord, RecordError> {
        let origin = Coordinate::new(self.origin_lon, self.origin_lat);
        if !origin.is_valid() {
            return Err(RecordError::new(row, format!("invalid origin {:?}", origin)));
        }

        let destination = Coordinate::new(self.destination_lon, self.destination_lat);
        if !destination.is_valid() {
            return Err(RecordError::new(
                row,
                format!("invalid destination {:?}", destination),
            ));
        }

        let color = self
            .color
            .filter(|color| !color.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FLIGHT_COLOR.to_string());

        Ok(FlightRecord {
            id: self.id,
            label: self.text,
            origin_name: self.origin_name,
            origin,
            destination_name: self.destination_name,
            destination,
            color,
        })
    }
}

/// Parses CSV flight data. Rows that fail to parse or carry unusable
/// coordinates are reported in [`LoadReport::rejected`] and skipped, so the
/// accepted flights keep contiguous indices.
pub fn parse_flights<R: Read>(reader: R) -> Result<LoadReport, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut report = LoadReport::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let row = e.position().map_or(0, |p| p.line() as usize);
                report.rejected.push(RecordError::new(row, e.to_string()));
                continue;
            }
        };

        let row = record.position().map_or(0, |p| p.line() as usize);
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let parsed = record
            .deserialize::<FlightRow>(Some(&headers))
            .map_err(|e| RecordError::new(row, e.to_string()))
            .and_then(|flight_row| flight_row.into_record(row));

        match parsed {
            Ok(flight) => report.flights.push(flight),
            Err(e) => report.rejected.push(e),
        }
    }

    Ok(report)
}

/// Loads flights, degrading any failure to an empty list so playback starts inert.
pub fn load_or_empty<S: FlightSource>(source: &mut S) -> Vec<FlightRecord> {
    match source.load_flights() {
        Ok(report) => {
            for rejected in &report.rejected {
                log::warn!("{}", rejected);
            }
            log::info!("Flight data loaded: {} flights", report.flights.len());
            report.flights
        }
        Err(e) => {
            log::error!("Error loading flight data: {}", e);
            Vec::new()
        }
    }
}
