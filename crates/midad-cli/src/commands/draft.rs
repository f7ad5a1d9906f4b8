//! Draft command handlers

use anyhow::{anyhow, Result};

use midad_core::Catalog;

use crate::output::{Output, OutputFormat};

/// List saved drafts
pub fn list(catalog: &mut Catalog, output: &Output) -> Result<()> {
    let drafts = catalog.list_drafts()?;
    output.print_drafts(&drafts);
    Ok(())
}

/// Show a draft by its storage key
pub fn show(catalog: &mut Catalog, key: &str, output: &Output) -> Result<()> {
    let draft = catalog
        .load_draft(key)?
        .ok_or_else(|| anyhow!("No draft saved under key: {}", key))?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        OutputFormat::Quiet => {
            println!("{}", draft.version);
        }
        OutputFormat::Human => {
            println!("Key:      {}", key);
            println!("Version:  {}", draft.version);
            println!("Saved:    {}", draft.saved_at);
            println!("Title:    {}", draft.title);
            println!("Category: {}", draft.category_slug);
            if !draft.tags.is_empty() {
                println!("Tags:     {}", draft.tags);
            }
            println!();
            if draft.content.is_empty() {
                println!("{}", draft.excerpt);
            } else {
                println!("{}", draft.content);
            }
        }
    }

    Ok(())
}

/// Discard a draft
pub fn clear(catalog: &mut Catalog, key: &str, output: &Output) -> Result<()> {
    catalog.clear_draft(key)?;
    output.success(&format!("Cleared draft {}", key));
    Ok(())
}
