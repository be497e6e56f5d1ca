//! Flat-file record sink.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Departure, FaqEntry, Station};

use super::error::SinkError;

pub const STATIONS_FILE: &str = "nj_transit_stations.csv";
pub const DEPARTURES_FILE: &str = "nj_transit_departures.csv";
pub const FAQS_CSV_FILE: &str = "nj_transit_faqs.csv";
pub const FAQS_JSON_FILE: &str = "nj_transit_faqs.json";

#[derive(Debug, Serialize, Deserialize)]
struct StationRow {
    name: String,
    #[serde(with = "title_bool")]
    is_accessible: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct DepartureRow {
    #[serde(rename = "Train")]
    train: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Track")]
    track: String,
    #[serde(rename = "Station")]
    station: String,
    #[serde(rename = "Accessible", with = "title_bool")]
    accessible: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct FaqRow {
    question: String,
    answer: String,
}

impl From<&Station> for StationRow {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            is_accessible: station.is_accessible(),
        }
    }
}

impl From<&Departure> for DepartureRow {
    fn from(d: &Departure) -> Self {
        Self {
            train: d.train.clone(),
            time: d.time.clone(),
            track: d.track.clone(),
            station: d.station.clone(),
            accessible: d.accessible,
        }
    }
}

impl From<DepartureRow> for Departure {
    fn from(row: DepartureRow) -> Self {
        Self {
            train: row.train,
            time: row.time,
            track: row.track,
            station: row.station,
            accessible: row.accessible,
        }
    }
}

impl From<&FaqEntry> for FaqRow {
    fn from(faq: &FaqEntry) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
        }
    }
}

/// Booleans as `True`/`False`, the format downstream consumers of these
/// files already parse. Reading is case-insensitive.
mod title_bool {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean {other:?}"))),
        }
    }
}

/// Writes scraped records as CSV (and JSON, for FAQs) into a directory.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    /// Create a sink writing into `dir`. The directory is created on
    /// first write if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of an output file inside the sink's directory.
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Write `nj_transit_stations.csv`.
    pub fn write_stations(&self, stations: &[Station]) -> Result<PathBuf, SinkError> {
        let path = self.path(STATIONS_FILE);
        self.write_csv(&path, stations.iter().map(StationRow::from))?;
        info!(count = stations.len(), path = %path.display(), "saved stations to CSV");
        Ok(path)
    }

    /// Write `nj_transit_departures.csv`.
    ///
    /// Callers skip this when there is nothing to write.
    pub fn write_departures(&self, departures: &[Departure]) -> Result<PathBuf, SinkError> {
        let path = self.path(DEPARTURES_FILE);
        self.write_csv(&path, departures.iter().map(DepartureRow::from))?;
        info!(count = departures.len(), path = %path.display(), "saved departures to CSV");
        Ok(path)
    }

    /// Write `nj_transit_faqs.csv` and `nj_transit_faqs.json`.
    ///
    /// Callers skip this when there is nothing to write.
    pub fn write_faqs(&self, faqs: &[FaqEntry]) -> Result<(PathBuf, PathBuf), SinkError> {
        let rows: Vec<FaqRow> = faqs.iter().map(FaqRow::from).collect();

        let csv_path = self.path(FAQS_CSV_FILE);
        self.write_csv(&csv_path, rows.iter())?;

        let json_path = self.path(FAQS_JSON_FILE);
        let json = serde_json::to_string_pretty(&rows)?;
        std::fs::write(&json_path, json).map_err(io_error(&json_path))?;

        info!(count = faqs.len(), dir = %self.dir.display(), "saved FAQs to CSV and JSON");
        Ok((csv_path, json_path))
    }

    /// Read back `nj_transit_stations.csv`.
    pub fn read_stations(&self) -> Result<Vec<Station>, SinkError> {
        let rows: Vec<StationRow> = read_csv(&self.path(STATIONS_FILE))?;
        rows.into_iter()
            .map(|row| Ok(Station::new(row.name, row.is_accessible)?))
            .collect()
    }

    /// Read back `nj_transit_departures.csv`.
    pub fn read_departures(&self) -> Result<Vec<Departure>, SinkError> {
        let rows: Vec<DepartureRow> = read_csv(&self.path(DEPARTURES_FILE))?;
        Ok(rows.into_iter().map(Departure::from).collect())
    }

    /// Read back `nj_transit_faqs.json`.
    pub fn read_faqs(&self) -> Result<Vec<FaqEntry>, SinkError> {
        let path = self.path(FAQS_JSON_FILE);
        let contents = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        let rows: Vec<FaqRow> = serde_json::from_str(&contents)?;
        Ok(rows
            .into_iter()
            .map(|row| FaqEntry::new(row.question, row.answer))
            .collect())
    }

    fn write_csv<T: Serialize>(
        &self,
        path: &Path,
        rows: impl IntoIterator<Item = T>,
    ) -> Result<(), SinkError> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(io_error(path))?;
        Ok(())
    }
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SinkError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SinkError + '_ {
    move |source| SinkError::Io {
        path: path.display().to_string(),
        source,
    }
}
