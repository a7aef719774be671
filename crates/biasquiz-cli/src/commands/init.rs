//! The `biasquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("biases.json");
    if path.exists() {
        println!("biases.json already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_BIASES)?;
        println!("Created biases.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own claims to biases.json");
    println!("  2. Run: biasquiz validate --data biases.json");
    println!("  3. Run: biasquiz play");

    Ok(())
}

const SAMPLE_BIASES: &str = r#"{
  "biases": [
    {
      "title": "Anchoring bias",
      "definition": "The tendency to rely too heavily on the first piece of information offered when making decisions.",
      "is_authentic": true,
      "reference": "Tversky & Kahneman, 1974",
      "category": "Decision-making"
    },
    {
      "title": "Availability heuristic",
      "definition": "Judging how likely an event is by how easily examples come to mind.",
      "is_authentic": true,
      "reference": "Tversky & Kahneman, 1973",
      "category": "Decision-making"
    },
    {
      "title": "Reverse echo effect",
      "definition": "The tendency to remember a statement better the fewer times it has been repeated.",
      "is_authentic": false,
      "reference": "",
      "category": "Memory"
    },
    {
      "title": "Halo effect",
      "definition": "Letting an overall impression of a person colour judgements about their specific traits.",
      "is_authentic": true,
      "reference": "Thorndike, 1920",
      "category": "Social"
    },
    {
      "title": "Parallel parking paradox",
      "definition": "Overestimating one's skill at tasks performed while being watched by strangers.",
      "is_authentic": false,
      "reference": "",
      "category": "Social"
    }
  ]
}
"#;
