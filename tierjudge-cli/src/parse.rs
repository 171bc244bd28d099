/// Argument and item-file parsing.
///
/// Item files are only split into names: either a JSON array of strings or
/// one name per line.
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A `--tier` argument: `LABEL` or `LABEL=FILE`.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSpec {
    pub label: String,
    pub items: Option<PathBuf>,
}

/// An `--item` argument: `LABEL=NAME`.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineItem {
    pub tier_label: String,
    pub name: String,
}

/// Split on the first '='. The label is trimmed and must not be blank.
fn split_label(value: &str) -> Result<(String, Option<&str>), String> {
    let (label, rest) = match value.split_once('=') {
        Some((label, rest)) => (label, Some(rest)),
        None => (value, None),
    };
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing tier label in \"{value}\""));
    }
    Ok((label.to_string(), rest))
}

pub fn parse_tier_spec(value: &str) -> Result<TierSpec, String> {
    let (label, path) = split_label(value)?;
    let items = match path.map(str::trim) {
        None => None,
        Some("") => return Err(format!("missing items file after '=' in \"{value}\"")),
        Some(p) => Some(PathBuf::from(p)),
    };
    Ok(TierSpec { label, items })
}

pub fn parse_inline_item(value: &str) -> Result<InlineItem, String> {
    let (tier_label, name) = split_label(value)?;
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| format!("expected LABEL=NAME, got \"{value}\""))?;
    Ok(InlineItem {
        tier_label,
        name: name.to_string(),
    })
}

/// Parse a string as either a JSON array of strings or plain text (one item per line).
pub fn parse_items_from_str(content: &str) -> Result<Vec<String>> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let items: Vec<String> = serde_json::from_str(trimmed)
            .context("File looks like JSON but failed to parse")?;
        Ok(items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    } else {
        Ok(trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

/// Read item names from a file.
pub fn load_items(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file {}", path.display()))?;
    parse_items_from_str(&content).with_context(|| format!("Invalid items file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tier_spec() {
        assert_eq!(
            parse_tier_spec("S=s.txt").unwrap(),
            TierSpec { label: "S".to_string(), items: Some(PathBuf::from("s.txt")) }
        );
        assert_eq!(
            parse_tier_spec(" A ").unwrap(),
            TierSpec { label: "A".to_string(), items: None }
        );
        // Only the first '=' splits.
        assert_eq!(
            parse_tier_spec("B=dir/a=b.txt").unwrap().items,
            Some(PathBuf::from("dir/a=b.txt"))
        );
        assert!(parse_tier_spec("=s.txt").is_err());
        assert!(parse_tier_spec("S=").is_err());
        assert!(parse_tier_spec("  ").is_err());
    }

    #[test]
    fn test_parse_inline_item() {
        let item = parse_inline_item("S= Pizza ").unwrap();
        assert_eq!(item.tier_label, "S");
        assert_eq!(item.name, "Pizza");
        assert!(parse_inline_item("S").is_err());
        assert!(parse_inline_item("S=   ").is_err());
        assert!(parse_inline_item("=Pizza").is_err());
    }

    #[test]
    fn test_items_one_per_line() {
        let items = parse_items_from_str("  Pizza\n\nSushi  \r\n Tacos\n").unwrap();
        assert_eq!(items, vec!["Pizza", "Sushi", "Tacos"]);
    }

    #[test]
    fn test_items_json_array() {
        let items = parse_items_from_str("[\"Pizza\", \"  \", \" Sushi\"]").unwrap();
        assert_eq!(items, vec!["Pizza", "Sushi"]);
    }

    #[test]
    fn test_items_bad_json() {
        assert!(parse_items_from_str("[\"Pizza\", 3]").is_err());
    }

    #[test]
    fn test_items_empty() {
        assert!(parse_items_from_str("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_load_items_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        std::fs::write(&path, "Pizza\nSushi\n").unwrap();
        assert_eq!(load_items(&path).unwrap(), vec!["Pizza", "Sushi"]);
        assert!(load_items(&dir.path().join("missing.txt")).is_err());
    }
}
