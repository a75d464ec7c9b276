use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

const EXCERPT_MAX_CHARS: usize = 160;

static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid wiki link pattern"));
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid markdown link pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+\s+.+$").expect("valid heading pattern"));
static FORMATTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`~]").expect("valid formatting pattern"));
static NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("valid newline pattern"));
static TRAILING_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\S*$").expect("valid trailing word pattern"));

/// Referenced slugs in order of first appearance: `[[Wiki Links]]` first,
/// then relative `[text](target.md)` links. External `http` targets are ignored.
pub fn extract_links(content: &str) -> Vec<String> {
    let wiki = WIKI_LINK.captures_iter(content).map(|captures| {
        WHITESPACE
            .replace_all(&captures[1].to_lowercase(), "-")
            .into_owned()
    });

    let markdown = MARKDOWN_LINK
        .captures_iter(content)
        .filter(|captures| !captures[2].starts_with("http"))
        .map(|captures| {
            let target = &captures[2];
            target.strip_suffix(".md").unwrap_or(target).to_owned()
        });

    let mut seen = HashSet::new();
    wiki.chain(markdown)
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

pub fn generate_excerpt(content: &str) -> String {
    let plain = HEADING.replace_all(content, "");
    let plain = MARKDOWN_LINK.replace_all(&plain, "$1");
    let plain = FORMATTING.replace_all(&plain, "");
    let plain = NEWLINES.replace_all(&plain, " ");
    let plain = plain.trim();

    if plain.chars().count() <= EXCERPT_MAX_CHARS {
        return plain.to_owned();
    }

    let cut = plain.chars().take(EXCERPT_MAX_CHARS).collect::<String>();
    let cut = TRAILING_WORD.replace(&cut, "");
    format!("{cut}…")
}
