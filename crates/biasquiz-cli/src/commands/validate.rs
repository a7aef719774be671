//! The `biasquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use biasquiz_core::loader::{parse_claims_file, validate_claims};

pub fn execute(data: PathBuf) -> Result<()> {
    let claims = parse_claims_file(&data)?;
    let authentic = claims.iter().filter(|c| c.is_authentic).count();

    println!(
        "Claim file: {} ({} claims, {} authentic, {} fake)",
        data.display(),
        claims.len(),
        authentic,
        claims.len() - authentic
    );

    let warnings = validate_claims(&claims);
    for w in &warnings {
        let prefix = w
            .position
            .map(|p| format!("  [#{p}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Claim file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
