//! Load scoring assumptions from JSON

use super::ScoringAssumptions;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load and validate assumptions from a JSON reader
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<ScoringAssumptions> {
    let assumptions: ScoringAssumptions = serde_json::from_reader(reader)?;
    assumptions.validate()?;
    Ok(assumptions)
}

/// Load and validate assumptions from a JSON file
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<ScoringAssumptions> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let assumptions = load_assumptions_from_reader(BufReader::new(file))?;
    log::info!("loaded scoring assumptions from {}", path.display());
    Ok(assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = serde_json::to_string(&ScoringAssumptions::default()).expect("serialize");
        let loaded = load_assumptions_from_reader(json.as_bytes()).expect("load");
        let defaults = ScoringAssumptions::default();

        assert_eq!(loaded.weights, defaults.weights);
        assert_eq!(loaded.income, defaults.income);
        assert_eq!(loaded.debt_service, defaults.debt_service);
        assert_eq!(loaded.categories, defaults.categories);
        assert_eq!(loaded.collateral.lookup(0.5), 5);
        assert_eq!(loaded.collateral.lookup(0.0), 0);
    }

    #[test]
    fn test_invalid_assumptions_rejected_on_load() {
        let mut assumptions = ScoringAssumptions::default();
        assumptions.eligibility_threshold = 120;
        let json = serde_json::to_string(&assumptions).expect("serialize");

        match load_assumptions_from_reader(json.as_bytes()) {
            Err(EngineError::InvalidAssumptions(_)) => {}
            other => panic!("expected invalid assumptions, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_assumptions_from_reader("{ not json".as_bytes()),
            Err(EngineError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_assumptions("does/not/exist.json"),
            Err(EngineError::Io(_))
        ));
    }
}
