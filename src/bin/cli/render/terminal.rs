use acf_importer::storage::Post;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Longest meta value printed before eliding
const MAX_VALUE_WIDTH: usize = 72;

/// Render a post and its meta to terminal text
pub fn render_post(post: &Post, use_color: bool) -> String {
    let mut lines = Vec::new();

    if use_color {
        lines.push(format!("{}{}{}", Color::BOLD, post.title, Color::RESET));
    } else {
        lines.push(post.title.clone());
    }

    let details = format!(
        "#{} {} ({}, {}, author {})",
        post.id, post.name, post.post_type, post.status, post.author_id
    );
    if use_color {
        lines.push(format!("{}{}{}", Color::DIM, details, Color::RESET));
    } else {
        lines.push(details);
    }

    if post.meta.is_empty() {
        lines.push("  (no meta)".to_string());
    }

    for (key, value) in &post.meta {
        let value = truncate(value, MAX_VALUE_WIDTH);
        if use_color {
            lines.push(format!("  {}{}{} = {}", Color::CYAN, key, Color::RESET, value));
        } else {
            lines.push(format!("  {} = {}", key, value));
        }
    }

    lines.join("\n")
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let cut: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
