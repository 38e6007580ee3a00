use anyhow::{Context, Result, bail};
use colored::*;
use std::{fs, path::Path};

const TEMPLATE: &str = r#"# docnav Configuration File

# Search index location, relative to the docs root
index_path = "assets/search-index.json"

# Maximum number of search results shown in the sidebar
result_cap = 20

# Quiet period after the last keystroke before the sidebar is filtered
debounce_ms = 150

# Nearby classes: "package" (same package only) or "tree"
# (current package plus sibling and child packages, collapsible)
nearby_mode = "package"

# Page titles look like "<Class><separator><site name>"
title_separator = " - "

# Title of the class browser page, which has no current class
# all_classes_title = "My API - All Classes"
"#;

pub fn init_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, TEMPLATE)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;

    println!("{} Created {}", "✅".green(), config_path.display());
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!("  {} index_path = \"assets/search-index.json\"", "•".blue());
    println!("  {} result_cap = 20", "•".blue());
    println!("  {} debounce_ms = 150", "•".blue());
    println!("  {} nearby_mode = \"package\"", "•".blue());
    println!(
        "\n{}",
        "Edit docnav.toml to customize the sidebar.".cyan()
    );

    Ok(())
}
