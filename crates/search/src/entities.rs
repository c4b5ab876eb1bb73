use crate::identifier::same_registrant;
use filings_indexer::RecordCollection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// What the search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Case-insensitive substring of the company name
    ByName,
    /// Exact registrant identifier (CIK), zero padding ignored
    ByIdentifier,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "by_name" => Ok(SearchMode::ByName),
            "cik" | "id" | "identifier" | "by_identifier" => Ok(SearchMode::ByIdentifier),
            other => Err(format!(
                "Invalid search type {other:?}: expected 'name' or 'cik'"
            )),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::ByName => f.write_str("name"),
            SearchMode::ByIdentifier => f.write_str("CIK"),
        }
    }
}

/// Distinct (company name, registrant id) pair found by a search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityMatch {
    pub company_name: String,
    pub registrant_id: String,
}

/// Resolve a search term to the distinct entities it names.
///
/// Results keep the order in which each pair is first met in `records`, so
/// ordinals shown to the user stay stable across identical queries. An empty
/// term in [`SearchMode::ByName`] matches every record.
pub fn find_entities(records: &RecordCollection, term: &str, mode: SearchMode) -> Vec<EntityMatch> {
    if records.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    let matches = |company_name: &str, registrant_id: &str| match mode {
        SearchMode::ByName => company_name.to_lowercase().contains(&needle),
        SearchMode::ByIdentifier => same_registrant(term, registrant_id),
    };

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut found = Vec::new();
    for record in records {
        let key = (record.company_name.as_str(), record.registrant_id.as_str());
        if !matches(key.0, key.1) || !seen.insert(key) {
            continue;
        }
        found.push(EntityMatch {
            company_name: record.company_name.clone(),
            registrant_id: record.registrant_id.clone(),
        });
    }

    log::debug!(
        "search by {mode} for {term:?}: {} entities out of {} records",
        found.len(),
        records.len()
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use filings_indexer::FilingRecord;
    use pretty_assertions::assert_eq;

    fn record(name: &str, cik: &str, date: &str) -> FilingRecord {
        FilingRecord::new(name, "10-K", cik, date, format!("edgar/data/{cik}/{date}.txt"))
    }

    fn collection() -> RecordCollection {
        vec![
            record("APPLE INC", "320193", "2023-01-10"),
            record("Pineapple Holdings", "777", "2023-01-11"),
            record("APPLE INC", "320193", "2023-04-02"),
            record("MICROSOFT CORP", "789019", "2023-04-03"),
            record("APPLE INC /FKA/", "320193", "2023-05-01"),
        ]
        .into()
    }

    fn pairs(found: &[EntityMatch]) -> Vec<(&str, &str)> {
        found
            .iter()
            .map(|m| (m.company_name.as_str(), m.registrant_id.as_str()))
            .collect()
    }

    #[test]
    fn name_search_is_case_insensitive_and_ordered() {
        let records = collection();
        let lower = find_entities(&records, "apple", SearchMode::ByName);
        let upper = find_entities(&records, "APPLE", SearchMode::ByName);

        assert_eq!(lower, upper);
        assert_eq!(
            pairs(&lower),
            vec![
                ("APPLE INC", "320193"),
                ("Pineapple Holdings", "777"),
                ("APPLE INC /FKA/", "320193"),
            ]
        );
    }

    #[test]
    fn empty_name_term_matches_everything() {
        let records = collection();
        let all = find_entities(&records, "", SearchMode::ByName);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].company_name, "APPLE INC /FKA/");
    }

    #[test]
    fn identifier_search_ignores_zero_padding() {
        let records = collection();
        let padded = find_entities(&records, "0000320193", SearchMode::ByIdentifier);
        let plain = find_entities(&records, "320193", SearchMode::ByIdentifier);

        assert_eq!(padded, plain);
        assert_eq!(
            pairs(&plain),
            vec![("APPLE INC", "320193"), ("APPLE INC /FKA/", "320193")]
        );
    }

    #[test]
    fn identifier_search_is_exact() {
        let records = collection();
        assert!(find_entities(&records, "32019", SearchMode::ByIdentifier).is_empty());
        assert!(find_entities(&records, "", SearchMode::ByIdentifier).is_empty());
    }

    #[test]
    fn zero_padded_stored_identifier_matches_plain_query() {
        let records: RecordCollection = vec![record("PADDED CO", "0000001234", "2023-01-01")].into();
        let found = find_entities(&records, "1234", SearchMode::ByIdentifier);

        assert_eq!(found.len(), 1);
        // stored value is reported as-is
        assert_eq!(found[0].registrant_id, "0000001234");
    }

    #[test]
    fn no_match_is_empty_not_error() {
        assert!(find_entities(&collection(), "tesla", SearchMode::ByName).is_empty());
        assert!(find_entities(&RecordCollection::empty(), "", SearchMode::ByName).is_empty());
    }

    #[test]
    fn search_mode_parses_cli_spellings() {
        assert_eq!("name".parse::<SearchMode>(), Ok(SearchMode::ByName));
        assert_eq!("CIK".parse::<SearchMode>(), Ok(SearchMode::ByIdentifier));
        assert!("ticker".parse::<SearchMode>().is_err());
    }
}
