//! Media library command handlers

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use midad_core::Catalog;

use crate::output::Output;
use crate::prompt;

/// List the media library
pub fn list(catalog: &mut Catalog, output: &Output) -> Result<()> {
    let media = catalog.all_media()?;
    output.print_media(&media);
    Ok(())
}

/// Upload a local file into the media library
///
/// The file's bytes are embedded as a base64 data URL, mirroring how the
/// browser uploader stored files. There is no separate asset storage.
pub fn upload(catalog: &mut Catalog, path: &Path, output: &Output) -> Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| "file".to_string());

    let mime = mime_for(path);

    let item = catalog
        .upload_file(&name, mime, &bytes)
        .context("Failed to store media item")?;

    output.success(&format!("Uploaded {} as {}", name, item.id));
    if output.is_quiet() {
        println!("{}", item.id);
    }
    Ok(())
}

/// Delete a media item by id
pub fn delete(catalog: &mut Catalog, id: &str, force: bool, output: &Output) -> Result<()> {
    if !force && output.should_prompt() {
        let question = format!("Delete media item {}?", id);
        if !prompt::confirm(&question)? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    if !catalog.delete_media(id)? {
        bail!("Media item not found: {}", id);
    }

    output.success(&format!("Deleted media item {}", id));
    Ok(())
}

/// Guess a MIME type from the file extension
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for(&PathBuf::from("photo.JPG")), "image/jpeg");
        assert_eq!(mime_for(&PathBuf::from("icon.png")), "image/png");
        assert_eq!(mime_for(&PathBuf::from("logo.svg")), "image/svg+xml");
    }

    #[test]
    fn test_mime_for_unknown_extension() {
        assert_eq!(
            mime_for(&PathBuf::from("document.pdf")),
            "application/octet-stream"
        );
        assert_eq!(mime_for(&PathBuf::from("noext")), "application/octet-stream");
    }
}
