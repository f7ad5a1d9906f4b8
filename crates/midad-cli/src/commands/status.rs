//! Status command handler

use anyhow::Result;

use midad_core::{Catalog, Config};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(catalog: &mut Catalog, config: &Config, output: &Output) -> Result<()> {
    let session = catalog.session()?;
    let post_count = catalog.post_count()?;
    let category_count = catalog.all_categories()?.len();
    let media_count = catalog.all_media()?.len();
    let draft_count = catalog.list_drafts()?.len();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "session": session,
                    "data_dir": config.data_dir,
                    "store_path": config.store_path(),
                    "counts": {
                        "posts": post_count,
                        "categories": category_count,
                        "media": media_count,
                        "drafts": draft_count
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(session) = session {
                println!("{}", session.email);
            }
        }
        OutputFormat::Human => {
            println!("Midad Status");
            println!("============");
            println!();
            println!("Session:");
            match session {
                Some(session) => println!("  Logged in as {}", session.email),
                None => println!("  Not logged in"),
            }
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Store:    {}", config.store_path().display());
            println!();
            println!("Contents:");
            println!("  Posts:      {}", post_count);
            println!("  Categories: {}", category_count);
            println!("  Media:      {}", media_count);
            println!("  Drafts:     {}", draft_count);
        }
    }

    Ok(())
}
