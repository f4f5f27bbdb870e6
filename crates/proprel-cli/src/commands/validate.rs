//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::commands::{load_orchestrator, parse_assignment};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use proprel_domain::ValidationResult;
use tracing::debug;

/// Validate the assignment given on the command line.
pub fn run_validate(args: ValidateArgs, config: &Config) -> Result<ValidationResult> {
    let assignment = parse_assignment(&args.properties)?;
    let corpus = config.resolve_corpus(args.corpus)?;
    debug!("Validating {} propert(ies) against {}", assignment.len(), corpus.display());

    let orchestrator = load_orchestrator(&corpus, config)?;
    Ok(orchestrator.validate(&args.material, &assignment)?)
}

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let result = run_validate(args, config)?;
    println!("{}", formatter.format_validation(&result)?);
    Ok(())
}
