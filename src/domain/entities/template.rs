use super::pagination::Pagination;
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CATEGORY: &str = "general";
const MAX_NAME_LEN: usize = 255;

/// Closed set of content units a template can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Text,
    Image,
    Button,
    Divider,
    Spacer,
    Social,
    Columns,
    Html,
    Video,
}

impl BlockKind {
    pub const ALL: [BlockKind; 10] = [
        BlockKind::Heading,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Button,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::Social,
        BlockKind::Columns,
        BlockKind::Html,
        BlockKind::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::Social => "social",
            BlockKind::Columns => "columns",
            BlockKind::Html => "html",
            BlockKind::Video => "video",
        }
    }

    fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid block type '{}'. Must be one of: {}",
                    s,
                    Self::allowed_list()
                )
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub styles: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub tags: Vec<String>,
    pub is_public: bool,
    pub usage_count: i64,
    pub rating: f64,
    pub created_at: String, // ISO 8601
    pub updated_at: String, // ISO 8601
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    pub blocks: Vec<TemplateBlock>,
    pub metadata: TemplateMetadata,
}

impl Template {
    pub fn new(draft: TemplateDraft) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            category: draft.category,
            blocks: draft.blocks,
            metadata: TemplateMetadata {
                tags: draft.tags,
                is_public: draft.is_public,
                usage_count: 0,
                rating: draft.rating,
                created_at: now.clone(),
                updated_at: now,
            },
        }
    }

    /// Replace the editable parts, keeping identity, usage and creation time.
    pub fn apply(&mut self, draft: TemplateDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.blocks = draft.blocks;
        self.metadata.tags = draft.tags;
        self.metadata.is_public = draft.is_public;
        self.metadata.rating = draft.rating;
        self.metadata.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Block as received from a client; `type` is checked against [`BlockKind`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub styles: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadataInput {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub rating: f64,
}

/// Body of `POST /templates` and `PUT /templates/:id`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplateInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockInput>,
    #[serde(default)]
    pub metadata: Option<TemplateMetadataInput>,
}

/// A template input that passed validation
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    pub name: String,
    pub category: String,
    pub blocks: Vec<TemplateBlock>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub rating: f64,
}

impl TemplateInput {
    /// Validate every field and collect all problems before failing.
    pub fn validate(self) -> DomainResult<TemplateDraft> {
        let mut details = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            details.push("Template name must be between 1 and 255 characters".to_string());
        }

        let mut blocks = Vec::with_capacity(self.blocks.len());
        for (position, block) in self.blocks.into_iter().enumerate() {
            match block.kind.parse::<BlockKind>() {
                Ok(kind) => blocks.push(TemplateBlock {
                    id: block
                        .id
                        .filter(|id| !id.trim().is_empty())
                        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                    kind,
                    content: block.content,
                    styles: block.styles,
                }),
                Err(e) => details.push(format!("blocks[{}]: {}", position, e)),
            }
        }

        let metadata = self.metadata.unwrap_or_default();
        if !(0.0..=5.0).contains(&metadata.rating) {
            details.push("Rating must be between 0 and 5".to_string());
        }

        if !details.is_empty() {
            return Err(DomainError::validation_with_details(
                format!("Template validation failed: {}", details.join("; ")),
                details,
            ));
        }

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let tags = metadata
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(TemplateDraft {
            name,
            category,
            blocks,
            tags,
            is_public: metadata.is_public,
            rating: metadata.rating,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(kind: &str) -> BlockInput {
        BlockInput {
            id: None,
            kind: kind.to_string(),
            content: json!({ "text": "hello" }),
            styles: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_block_kind_round_trips_names() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_block_kind_is_named_in_error() {
        let err = "carousel".parse::<BlockKind>().unwrap_err();
        assert!(err.contains("'carousel'"));
        assert!(err.contains("heading"));
    }

    #[test]
    fn test_validate_defaults_category_and_assigns_block_ids() {
        let draft = TemplateInput {
            name: "  Spring Sale ".into(),
            category: None,
            blocks: vec![block("heading"), block("text")],
            metadata: None,
        }
        .validate()
        .unwrap();

        assert_eq!(draft.name, "Spring Sale");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
        assert_eq!(draft.blocks.len(), 2);
        assert!(draft.blocks.iter().all(|b| !b.id.is_empty()));
        assert_eq!(draft.blocks[0].kind, BlockKind::Heading);
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let err = TemplateInput {
            name: "".into(),
            category: Some("promo".into()),
            blocks: vec![block("text"), block("marquee")],
            metadata: Some(TemplateMetadataInput {
                tags: vec![],
                is_public: false,
                rating: 7.5,
            }),
        }
        .validate()
        .unwrap_err();

        match err {
            DomainError::ValidationError { message, details } => {
                assert_eq!(details.len(), 3);
                assert!(message.contains("'marquee'"));
                assert!(details.iter().any(|d| d.starts_with("blocks[1]")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_apply_keeps_identity_and_usage() {
        let mut template = Template::new(
            TemplateInput {
                name: "Original".into(),
                ..Default::default()
            }
            .validate()
            .unwrap(),
        );
        template.metadata.usage_count = 4;
        let id = template.id.clone();
        let created_at = template.metadata.created_at.clone();

        template.apply(
            TemplateInput {
                name: "Renamed".into(),
                category: Some("newsletter".into()),
                ..Default::default()
            }
            .validate()
            .unwrap(),
        );

        assert_eq!(template.id, id);
        assert_eq!(template.name, "Renamed");
        assert_eq!(template.category, "newsletter");
        assert_eq!(template.metadata.usage_count, 4);
        assert_eq!(template.metadata.created_at, created_at);
    }
}
