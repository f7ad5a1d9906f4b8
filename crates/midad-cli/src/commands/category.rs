//! Category command handlers

use anyhow::Result;

use midad_core::seed::category_description;
use midad_core::Catalog;

use crate::output::{Output, OutputFormat};

/// List categories with their post counts
pub fn list(catalog: &mut Catalog, output: &Output) -> Result<()> {
    let categories = catalog.all_categories()?;

    let mut rows = Vec::with_capacity(categories.len());
    for category in categories {
        let count = catalog.posts_by_category(&category.slug)?.len();
        rows.push((category, count));
    }

    output.print_categories(&rows);

    if output.format == OutputFormat::Human {
        println!();
        for (category, _) in &rows {
            if let Some(description) = category_description(&category.slug) {
                println!("{}: {}", category.name, description);
            }
        }
    }

    Ok(())
}
