//! Post command handlers

use anyhow::{anyhow, bail, Context, Result};

use midad_core::store::{edit_draft_key, CREATE_DRAFT_KEY};
use midad_core::{Catalog, Config, Post, PostDraft};

use crate::content;
use crate::output::Output;
use crate::prompt;

/// Create a post
#[allow(clippy::too_many_arguments)]
pub fn create(
    catalog: &mut Catalog,
    config: &Config,
    title: String,
    excerpt: String,
    content: Option<String>,
    category_slug: String,
    cover_image: Option<String>,
    tags: Vec<String>,
    html_file: Option<String>,
    output: &Output,
) -> Result<()> {
    let category_name = category_display_name(catalog, &category_slug)?;
    let cover_image = cover_image.unwrap_or_else(|| config.default_cover_image.clone());

    let mut post = Post::new(title, excerpt, category_name, category_slug, cover_image);
    post.set_content(content);
    post.set_tags(tags);
    post.html_file = html_file;

    catalog
        .create_post(&post)
        .context("Failed to create post")?;

    // An abandoned new-post form may have left an autosaved draft behind
    catalog.clear_draft(CREATE_DRAFT_KEY)?;

    output.success(&format!("Created post {} (/{}/{})", post.id, post.category_slug, post.slug));
    if output.is_quiet() {
        println!("{}", post.id);
    }
    Ok(())
}

/// List posts, optionally filtered by category
pub fn list(catalog: &mut Catalog, category: Option<String>, output: &Output) -> Result<()> {
    let posts = match category {
        Some(slug) => catalog.posts_by_category(&slug)?,
        None => catalog.all_posts()?,
    };
    output.print_posts(&posts);
    Ok(())
}

/// Show a single post by id
pub fn show(catalog: &mut Catalog, id: &str, output: &Output) -> Result<()> {
    let post = catalog
        .post_by_id(id)?
        .ok_or_else(|| anyhow!("Post not found: {}", id))?;
    output.print_post(&post);
    Ok(())
}

/// Edit a post interactively
///
/// The form state is autosaved to an edit draft keyed by the post id
/// before publishing. A draft left behind by an interrupted session is
/// restored as the starting point. On successful publish the draft is
/// cleared.
pub fn edit(catalog: &mut Catalog, id: &str, output: &Output) -> Result<()> {
    let post = catalog
        .post_by_id(id)?
        .ok_or_else(|| anyhow!("Post not found: {}", id))?;

    let draft_key = edit_draft_key(&post.id);
    let existing = catalog.load_draft(&draft_key)?;
    let base_version = existing.as_ref().map(|d| d.version).unwrap_or(0);
    if existing.is_some() {
        output.message("Restored an unsaved draft for this post.");
    }
    let mut form = existing.unwrap_or_else(|| PostDraft::from_post(&post));

    if let Some(value) = prompt::prompt_with_default("Title", &form.title)? {
        form.title = value;
    }
    if let Some(value) = prompt::prompt_with_default("Excerpt", &form.excerpt)? {
        form.excerpt = value;
    }
    if let Some(value) = prompt::prompt_with_default("Category slug", &form.category_slug)? {
        form.category_slug = value;
    }
    if let Some(value) = prompt::prompt_with_default("Cover image URL", &form.cover_image)? {
        form.cover_image = value;
    }
    if let Some(value) = prompt::prompt_with_default("Tags (comma-separated)", &form.tags)? {
        form.tags = value;
    }
    if let Some(value) = prompt::prompt_with_default("Content (HTML)", &form.content)? {
        form.content = value;
    }

    // Snapshot the form; a concurrent writer to the same draft key fails
    // the publish rather than being silently clobbered
    catalog
        .save_draft(&draft_key, &form, Some(base_version))
        .context("Draft was modified by another session")?;

    let mut updated = post.clone();
    updated.title = form.title;
    updated.excerpt = form.excerpt;
    updated.category = category_display_name(catalog, &form.category_slug)?;
    updated.category_slug = form.category_slug;
    updated.cover_image = form.cover_image;
    updated.set_tags_from_str(&form.tags);
    updated.set_content(Some(form.content));

    catalog
        .update_post(&updated)
        .context("Failed to update post")?;
    catalog.clear_draft(&draft_key)?;

    output.success(&format!("Updated post {}", updated.id));
    Ok(())
}

/// Delete a post
pub fn delete(catalog: &mut Catalog, id: &str, force: bool, output: &Output) -> Result<()> {
    let post = catalog
        .post_by_id(id)?
        .ok_or_else(|| anyhow!("Post not found: {}", id))?;

    if !force && output.should_prompt() {
        let question = format!("Delete post \"{}\"?", post.title);
        if !prompt::confirm(&question)? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    catalog.delete_post(id).context("Failed to delete post")?;
    output.success(&format!("Deleted post {}", id));
    Ok(())
}

/// Render a post by its public route, resolving any external fragment
pub async fn view(catalog: &mut Catalog, route: &str, output: &Output) -> Result<()> {
    let (category_slug, slug) = route
        .split_once('/')
        .ok_or_else(|| anyhow!("Route must look like <category>/<slug>"))?;

    let post = catalog
        .post_by_route(category_slug, slug)?
        .ok_or_else(|| anyhow!("No post at /{}", route))?;

    if output.is_json() {
        output.print_post(&post);
        return Ok(());
    }

    println!("{}", post.title);
    println!("{} | {}", post.date, post.category);
    println!();

    match post.html_file {
        Some(ref url) => match content::fetch_fragment(url).await {
            Ok(body) => println!("{}", body),
            // Fetch failures render inline, the post header still shows
            Err(err) => println!("[تعذر تحميل المحتوى: {}]", err),
        },
        None => println!("{}", post.display_content()),
    }

    Ok(())
}

/// Resolve a category slug to its display name
///
/// Unknown slugs fall back to the slug itself, matching how the admin
/// form behaves when a post carries a category that was never declared.
fn category_display_name(catalog: &Catalog, slug: &str) -> Result<String> {
    if slug.is_empty() {
        bail!("Category slug must not be empty");
    }
    let name = catalog
        .all_categories()?
        .into_iter()
        .find(|c| c.slug == slug)
        .map(|c| c.name)
        .unwrap_or_else(|| slug.to_string());
    Ok(name)
}
