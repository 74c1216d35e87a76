use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{parse_amount, provided, PropertyRecord, DEFAULT_HOLDING_COST};

#[derive(Debug, thiserror::Error)]
pub enum DealImportError {
    #[error("failed to read property export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid property CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a CSV export of properties. Amount columns are parsed leniently so blank or
/// garbled cells count as "not provided".
pub fn import_properties<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, DealImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<PropertyRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

pub fn import_properties_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PropertyRecord>, DealImportError> {
    let file = std::fs::File::open(path)?;
    import_properties(file)
}

#[derive(Debug, Deserialize)]
struct PropertyRow {
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    arv: String,
    #[serde(default)]
    mao: String,
    #[serde(default)]
    sqft: String,
    #[serde(default)]
    repair_costs: String,
    #[serde(default)]
    holding_costs: String,
}

impl PropertyRow {
    fn into_record(self) -> PropertyRecord {
        PropertyRecord {
            address: self.address,
            city: self.city,
            state: self.state,
            asking_price: parse_amount(&self.price),
            arv: parse_amount(&self.arv),
            mao: parse_amount(&self.mao),
            square_feet: parse_amount(&self.sqft),
            repair_cost_estimate: parse_amount(&self.repair_costs),
            holding_cost_estimate: provided(parse_amount(&self.holding_costs))
                .unwrap_or(DEFAULT_HOLDING_COST),
            ..PropertyRecord::default()
        }
    }
}
