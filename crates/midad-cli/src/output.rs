//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use midad_core::{Category, MediaItem, Post, PostDraft};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single post
    pub fn print_post(&self, post: &Post) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", post.id);
                println!("Title:    {}", post.title);
                println!("Route:    /{}/{}", post.category_slug, post.slug);
                println!("Category: {}", post.category);
                println!("Date:     {}", post.date);
                println!("Cover:    {}", post.cover_image);
                if !post.tags.is_empty() {
                    println!("Tags:     {}", post.tags.join(", "));
                }
                if let Some(ref html_file) = post.html_file {
                    println!("Fragment: {}", html_file);
                }
                println!();
                println!("{}", post.excerpt);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(post).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", post.id);
            }
        }
    }

    /// Print a list of posts
    pub fn print_posts(&self, posts: &[Post]) {
        match self.format {
            OutputFormat::Human => {
                if posts.is_empty() {
                    println!("No posts found.");
                    return;
                }
                for post in posts {
                    println!(
                        "{} | {} | {} | {}",
                        post.id,
                        truncate(&post.title, 40),
                        post.category_slug,
                        post.date
                    );
                }
                println!("\n{} post(s)", posts.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(posts).unwrap());
            }
            OutputFormat::Quiet => {
                for post in posts {
                    println!("{}", post.id);
                }
            }
        }
    }

    /// Print a list of categories
    pub fn print_categories(&self, categories: &[(Category, usize)]) {
        match self.format {
            OutputFormat::Human => {
                for (category, count) in categories {
                    println!("{} | {} ({})", category.slug, category.name, count);
                }
                println!("\n{} categor(ies)", categories.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(c, count)| {
                        serde_json::json!({"slug": c.slug, "name": c.name, "posts": count})
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for (category, _) in categories {
                    println!("{}", category.slug);
                }
            }
        }
    }

    /// Print the media library
    pub fn print_media(&self, media: &[MediaItem]) {
        match self.format {
            OutputFormat::Human => {
                if media.is_empty() {
                    println!("Media library is empty.");
                    return;
                }
                for item in media {
                    println!(
                        "{} | {} | {} | {} | {}",
                        item.id,
                        truncate(&item.name, 30),
                        item.media_type,
                        human_size(item.size),
                        item.upload_date
                    );
                }
                println!("\n{} item(s)", media.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(media).unwrap());
            }
            OutputFormat::Quiet => {
                for item in media {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print saved drafts
    pub fn print_drafts(&self, drafts: &[(String, PostDraft)]) {
        match self.format {
            OutputFormat::Human => {
                if drafts.is_empty() {
                    println!("No drafts saved.");
                    return;
                }
                for (key, draft) in drafts {
                    println!(
                        "{} | {} | v{} | {}",
                        key,
                        truncate(&draft.title, 40),
                        draft.version,
                        draft.saved_at
                    );
                }
                println!("\n{} draft(s)", drafts.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = drafts
                    .iter()
                    .map(|(key, draft)| serde_json::json!({"key": key, "draft": draft}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for (key, _) in drafts {
                    println!("{}", key);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Truncate a string to max characters, adding "..." if truncated
///
/// Counts characters, not bytes - titles here are mostly Arabic.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render a byte count for humans
fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Arabic text must not be split mid-codepoint
        assert_eq!(truncate("مرحبا بالعالم الواسع", 10), "مرحبا ب...");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(10240), "10.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
