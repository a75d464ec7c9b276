use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document kinds known to the brain. Drives node color and the legend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Concept,
    Journal,
    #[default]
    Insight,
    Research,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Concept,
        Category::Journal,
        Category::Insight,
        Category::Research,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::Journal => "Journal",
            Self::Insight => "Insight",
            Self::Research => "Research",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Concept => "Deep exploration of a topic",
            Self::Journal => "Daily entries and reflections",
            Self::Insight => "Quick observations and learnings",
            Self::Research => "In-depth investigation results",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Journal => "journal",
            Self::Insight => "insight",
            Self::Research => "research",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown document type `{value}`"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: String,
    pub category: Category,
    pub references: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Relative path without the `.md` extension, `/`-separated.
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub date: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub links: Vec<String>,
}

impl Document {
    pub fn to_ref(&self) -> DocumentRef {
        DocumentRef {
            id: self.slug.clone(),
            category: self.category,
            references: self.links.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

pub fn tag_counts(documents: &[Document]) -> Vec<TagCount> {
    let mut order = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in documents.iter().flat_map(|document| document.tags.iter()) {
        let entry = counts.entry(tag.as_str()).or_insert_with(|| {
            order.push(tag.as_str());
            0
        });
        *entry += 1;
    }

    let mut tags = order
        .into_iter()
        .map(|tag| TagCount {
            tag: tag.to_owned(),
            count: counts[tag],
        })
        .collect::<Vec<_>>();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags
}
