//! Team roster import: one team per CSV record, name in the first column.

use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Could not read roster: {0}")]
    Csv(#[from] csv::Error),
}

/// Read team names in seed order. A leading `name` header is skipped, as are
/// blank records. Names are trimmed; count and emptiness are checked by
/// `register_teams`.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<String>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(name) = record.get(0) else {
            continue;
        };
        if index == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        if name.is_empty() && record.iter().all(str::is_empty) {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
