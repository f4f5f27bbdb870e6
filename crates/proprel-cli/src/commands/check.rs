//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output::Formatter;
use proprel_store::{CorpusStats, RelationshipStore};

/// Load and index the corpus, returning its figures.
pub fn run_check(args: &CheckArgs) -> Result<CorpusStats> {
    let store = RelationshipStore::from_path(&args.corpus)?;
    Ok(store.snapshot()?.stats())
}

/// Execute the check command.
pub fn execute_check(args: CheckArgs, formatter: &Formatter) -> Result<()> {
    let stats = run_check(&args)?;
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use proprel_store::StoreError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_valid_corpus() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tile.toml"),
            r#"
[[relationships]]
materialType = "tile"
sourceProperty = "finish"
sourceValue = "glossy"
targetProperty = "material"
targetValue = "fabric"
compatibilityType = "INCOMPATIBLE"
"#,
        )
        .unwrap();

        let stats = run_check(&CheckArgs {
            corpus: dir.path().to_path_buf(),
        })
        .unwrap();
        assert_eq!(stats.relationship_count, 1);
        assert_eq!(stats.materials["tile"].properties, 2);
    }

    #[test]
    fn test_check_reports_invalid_rule() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tile.json");
        fs::write(
            &path,
            r#"{"relationships": [{
                "materialType": "tile",
                "sourceProperty": "finish",
                "sourceValue": "glossy",
                "targetProperty": "material",
                "targetValue": "fabric",
                "compatibilityType": "MAYBE"
            }]}"#,
        )
        .unwrap();

        let err = run_check(&CheckArgs { corpus: path }).unwrap_err();
        assert!(matches!(err, CliError::Store(StoreError::InvalidData(_))));
    }
}
