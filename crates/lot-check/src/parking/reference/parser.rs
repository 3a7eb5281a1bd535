use super::events::SpecialEventRecord;
use super::normalizer::normalize_label;
use super::{LotCatalog, LotRecord};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, warn};

pub(crate) const LOT_COLUMN: &str = "Parking Lot / Zone Name";
pub(crate) const PERMIT_COLUMN: &str = "Permits Type (Category)";

pub(crate) fn parse_lot_catalog<R: Read>(reader: R) -> Result<LotCatalog, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(normalize_label).collect();

    let lot_index = column_index(&headers, LOT_COLUMN);
    let permit_index = column_index(&headers, PERMIT_COLUMN);
    let mut catalog = LotCatalog::default();

    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "skipping unreadable row in lots file");
                continue;
            }
        };
        let field = |index: Option<usize>| {
            index
                .and_then(|index| record.get(index))
                .map(normalize_label)
                .filter(|value| !value.is_empty())
        };

        if let Some(lot) = field(lot_index) {
            let attributes: BTreeMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), normalize_label(value)))
                .filter(|(header, value)| !header.is_empty() && !value.is_empty())
                .collect();

            // later rows for the same lot replace earlier attribute rows
            catalog.records.insert(
                lot.clone(),
                LotRecord {
                    name: lot.clone(),
                    attributes,
                },
            );
            catalog.lots.insert(lot);
        }

        if let Some(permit) = field(permit_index) {
            catalog.permits.insert(permit);
        }
    }

    Ok(catalog)
}

fn column_index(headers: &[String], column: &'static str) -> Option<usize> {
    let index = headers.iter().position(|header| header == column);
    if index.is_none() {
        warn!(column, "column missing from lots file");
    }
    index
}

pub(crate) fn parse_event_records<R: Read>(
    reader: R,
) -> Result<Vec<SpecialEventRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<EventRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(error = %err, "skipping unreadable row in special events file");
                continue;
            }
        };

        let (Some(start), Some(end), Some(lot)) = (
            row.start_date.as_deref(),
            row.end_date.as_deref(),
            row.affected_lot.as_deref(),
        ) else {
            debug!(?row, "special event row is missing a date or lot");
            continue;
        };

        match SpecialEventRecord::parse(start, end, &normalize_label(lot)) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(start, end, lot, error = %err, "skipping special event with unparseable dates");
            }
        }
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(
        rename = "Start Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    start_date: Option<String>,
    #[serde(rename = "End Date", default, deserialize_with = "empty_string_as_none")]
    end_date: Option<String>,
    #[serde(
        rename = "Affected Lot/Populations",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    affected_lot: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !normalize_label(value).is_empty()))
}
