//! Recommend command implementation.

use crate::cli::RecommendArgs;
use crate::commands::{load_orchestrator, parse_assignment};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use proprel_domain::Recommendation;

/// Rank values of the target property for the assignment given on the command line.
pub fn run_recommend(args: RecommendArgs, config: &Config) -> Result<Vec<Recommendation>> {
    let assignment = parse_assignment(&args.properties)?;
    let corpus = config.resolve_corpus(args.corpus)?;
    let orchestrator = load_orchestrator(&corpus, config)?;
    Ok(orchestrator.recommend(&args.material, &assignment, &args.target)?)
}

/// Execute the recommend command.
pub fn execute_recommend(args: RecommendArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let recommendations = run_recommend(args, config)?;
    println!("{}", formatter.format_recommendations(&recommendations)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proprel_domain::PropertyValue;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_ceramic_finish() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tile.toml");
        fs::write(
            &path,
            r#"
[[relationships]]
materialType = "tile"
sourceProperty = "material"
sourceValue = "ceramic"
targetProperty = "finish"
targetValue = "matte"
compatibilityType = "COMPATIBLE"
confidence = 0.9

[[relationships]]
materialType = "tile"
sourceProperty = "material"
sourceValue = "ceramic"
targetProperty = "finish"
targetValue = "glossy"
compatibilityType = "NOT_RECOMMENDED"
confidence = 0.6
"#,
        )
        .unwrap();

        let recs = run_recommend(
            RecommendArgs {
                corpus: Some(path),
                material: "tile".to_string(),
                target: "finish".to_string(),
                properties: vec!["material=ceramic".to_string()],
            },
            &Config::default(),
        )
        .unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommended_value, PropertyValue::from("matte"));
        assert!((recs[0].confidence.value() - 0.9).abs() < 1e-9);
    }
}
