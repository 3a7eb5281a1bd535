//! Loading of the lots/permits sheet and the special events sheet.

mod events;
mod normalizer;
mod parser;

pub use events::{SpecialEventCalendar, SpecialEventDay, SpecialEventRecord, EVENT_DATE_FORMAT};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

use super::eligibility::MAX_ALTERNATIVES;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// All columns of the sheet row that named a lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotRecord {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

/// Contents of the lots/permits sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LotCatalog {
    pub lots: BTreeSet<String>,
    pub permits: BTreeSet<String>,
    pub records: BTreeMap<String, LotRecord>,
}

/// Immutable snapshot of everything the eligibility check consults.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    catalog: LotCatalog,
    events: SpecialEventCalendar,
}

impl ReferenceData {
    pub fn new(catalog: LotCatalog, events: SpecialEventCalendar) -> Self {
        Self { catalog, events }
    }

    /// Strict load from two readers; header-level failures are returned.
    pub fn from_readers<L: Read, E: Read>(lots: L, events: E) -> Result<Self, ReferenceDataError> {
        Ok(Self::new(
            ReferenceDataLoader::lots_from_reader(lots)?,
            ReferenceDataLoader::events_from_reader(events)?,
        ))
    }

    pub fn lots(&self) -> &BTreeSet<String> {
        &self.catalog.lots
    }

    pub fn permits(&self) -> &BTreeSet<String> {
        &self.catalog.permits
    }

    pub fn lot(&self, name: &str) -> Option<&LotRecord> {
        self.catalog.records.get(name)
    }

    pub fn events(&self) -> &SpecialEventCalendar {
        &self.events
    }

    pub fn has_lot(&self, name: &str) -> bool {
        self.catalog.lots.contains(name)
    }

    pub fn has_permit(&self, name: &str) -> bool {
        self.catalog.permits.contains(name)
    }

    pub fn lot_alternatives(&self) -> Vec<String> {
        self.catalog
            .lots
            .iter()
            .take(MAX_ALTERNATIVES)
            .cloned()
            .collect()
    }

    pub fn permit_alternatives(&self) -> Vec<String> {
        self.catalog
            .permits
            .iter()
            .take(MAX_ALTERNATIVES)
            .cloned()
            .collect()
    }
}

pub struct ReferenceDataLoader;

impl ReferenceDataLoader {
    pub fn lots_from_path<P: AsRef<Path>>(path: P) -> Result<LotCatalog, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        Self::lots_from_reader(file)
    }

    pub fn lots_from_reader<R: Read>(reader: R) -> Result<LotCatalog, ReferenceDataError> {
        Ok(parser::parse_lot_catalog(reader)?)
    }

    pub fn events_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<SpecialEventCalendar, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        Self::events_from_reader(file)
    }

    pub fn events_from_reader<R: Read>(
        reader: R,
    ) -> Result<SpecialEventCalendar, ReferenceDataError> {
        let records = parser::parse_event_records(reader)?;
        Ok(SpecialEventCalendar::from_records(records))
    }

    /// Serving loader: a file that cannot be read degrades to empty data.
    pub fn from_paths<L, E>(lots_path: L, events_path: E) -> ReferenceData
    where
        L: AsRef<Path>,
        E: AsRef<Path>,
    {
        let lots_path = lots_path.as_ref();
        let events_path = events_path.as_ref();

        let catalog = Self::lots_from_path(lots_path).unwrap_or_else(|err| {
            error!(path = %lots_path.display(), error = %err, "could not load lots file; serving without lots or permits");
            LotCatalog::default()
        });
        let events = Self::events_from_path(events_path).unwrap_or_else(|err| {
            error!(path = %events_path.display(), error = %err, "could not load special events file; serving without closures");
            SpecialEventCalendar::default()
        });

        info!(
            lots = catalog.lots.len(),
            permits = catalog.permits.len(),
            event_days = events.len(),
            "reference data loaded"
        );

        ReferenceData::new(catalog, events)
    }
}
