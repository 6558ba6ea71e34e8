//! Catalog document parsing and the canonical `Logo` record
//!
//! `CatalogRecord` mirrors the upstream Simple Icons JSON shape, including
//! keys it does not model, so a cached document matches what was fetched. `Logo` is what the rest of logocn works with; the two are
//! connected by `Logo::from_record`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::slugify;
use crate::error::{CatalogError, Result};

/// The full catalog document (`{ "icons": [...] }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Every icon record, in upstream order
    pub icons: Vec<CatalogRecord>,
}

/// One upstream icon record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Display name
    pub title: String,

    /// Brand color, six hex digits without `#`
    pub hex: String,

    /// Canonical source URL for the artwork
    pub source: String,

    /// Upstream identifier; absent when upstream derives it from the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Alternate names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<CatalogAliases>,

    /// Brand guidelines, preserved verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<serde_json::Value>,

    /// License information, preserved verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<serde_json::Value>,

    /// Upstream keys logocn does not model, written back unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Alias block of an upstream record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogAliases {
    /// "Also known as" names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aka: Option<Vec<String>>,

    /// Duplicate brands sharing this artwork, preserved but not searched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dup: Option<Vec<serde_json::Value>>,

    /// Localized names keyed by locale code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A canonical logo record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// Display name (e.g. "Apple")
    pub name: String,

    /// Unique lowercase identifier, also the SVG filename stem
    pub slug: String,

    /// Brand color
    pub hex: String,

    /// Official source URL
    pub source: String,

    /// Alternate search strings; never `Some` with an empty list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl CatalogDocument {
    /// Parse a document from JSON, naming `origin` in the error
    pub fn from_json(content: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| CatalogError::Parse {
            origin: "catalog document".to_string(),
            source,
        })
    }

    /// Fill in every missing slug from the record's title
    pub fn normalize_slugs(&mut self) {
        for record in &mut self.icons {
            if record.slug.as_deref().map_or(true, str::is_empty) {
                record.slug = Some(slugify(&record.title));
            }
        }
    }

    /// Number of icon records
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl CatalogRecord {
    /// The record's slug, derived from the title when upstream omitted it
    pub fn effective_slug(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.title),
        }
    }

    /// `aka` names followed by `loc` values, or `None` when there are none
    pub fn flattened_aliases(&self) -> Option<Vec<String>> {
        let aliases = self.aliases.as_ref()?;

        let flattened: Vec<String> = aliases
            .aka
            .iter()
            .flatten()
            .chain(aliases.loc.iter().flat_map(|loc| loc.values()))
            .cloned()
            .collect();

        if flattened.is_empty() {
            None
        } else {
            Some(flattened)
        }
    }
}

impl Logo {
    /// Build the canonical record from an upstream one
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            name: record.title.clone(),
            slug: record.effective_slug(),
            hex: record.hex.clone(),
            source: record.source.clone(),
            aliases: record.flattened_aliases(),
        }
    }

    /// Aliases as a slice, empty when there are none
    pub fn alias_list(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or_default()
    }

    /// Aliases joined for display
    pub fn aliases_display(&self) -> String {
        self.alias_list().join(", ")
    }
}

impl From<&CatalogRecord> for Logo {
    fn from(record: &CatalogRecord) -> Self {
        Logo::from_record(record)
    }
}

#[cfg(test)]
mod record_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_document_json() -> &'static str {
        r#"{
  "icons": [
    {
      "title": "Microsoft Teams",
      "hex": "6264A7",
      "source": "https://www.microsoft.com/",
      "slug": "microsoftteams",
      "aliases": {
        "aka": ["MS Teams", "Teams"],
        "loc": { "zh-CN": "微软团队", "de-DE": "Teams DE" }
      },
      "guidelines": "https://docs.microsoft.com/",
      "license": { "type": "custom", "url": "https://example.com/license" }
    },
    {
      "title": "Node.js",
      "hex": "339933",
      "source": "https://nodejs.org/en/about/resources/"
    },
    {
      "title": "Airbnb",
      "hex": "FF5A5F",
      "source": "https://www.airbnb.com",
      "aliases": { "dup": [{ "title": "Airbnb Plus", "hex": "000000" }] }
    }
  ]
}"#
    }

    #[test]
    fn test_parse_document() {
        let doc = CatalogDocument::from_json(sample_document_json(), "test").unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.icons[0].slug.as_deref(), Some("microsoftteams"));
        assert!(doc.icons[1].slug.is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = CatalogDocument::from_json(r#"{"logos": []}"#, "upstream").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("upstream"));

        let err = CatalogDocument::from_json("<html>", "upstream").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_normalize_fills_missing_slugs_only() {
        let mut doc = CatalogDocument::from_json(sample_document_json(), "test").unwrap();
        doc.normalize_slugs();

        assert_eq!(doc.icons[0].slug.as_deref(), Some("microsoftteams"));
        assert_eq!(doc.icons[1].slug.as_deref(), Some("nodedotjs"));
        assert_eq!(doc.icons[2].slug.as_deref(), Some("airbnb"));
    }

    #[test]
    fn test_logo_flattens_aka_then_loc() {
        let doc = CatalogDocument::from_json(sample_document_json(), "test").unwrap();
        let logo = Logo::from_record(&doc.icons[0]);

        assert_eq!(logo.name, "Microsoft Teams");
        assert_eq!(
            logo.aliases,
            Some(vec![
                "MS Teams".to_string(),
                "Teams".to_string(),
                "Teams DE".to_string(),
                "微软团队".to_string(),
            ])
        );
    }

    #[test]
    fn test_logo_aliases_absent_never_empty() {
        let doc = CatalogDocument::from_json(sample_document_json(), "test").unwrap();

        // No alias block at all
        let node = Logo::from_record(&doc.icons[1]);
        assert_eq!(node.aliases, None);
        assert_eq!(node.slug, "nodedotjs");

        // Alias block with only duplicates
        let airbnb = Logo::from(&doc.icons[2]);
        assert_eq!(airbnb.aliases, None);
        assert!(airbnb.alias_list().is_empty());
    }

    #[test]
    fn test_passthrough_fields_survive_serialization() {
        let doc = CatalogDocument::from_json(sample_document_json(), "test").unwrap();
        let json = doc.to_json_pretty().unwrap();
        let reparsed = CatalogDocument::from_json(&json, "roundtrip").unwrap();

        assert_eq!(reparsed, doc);
        assert!(json.contains("\"dup\""));
        assert!(json.contains("\"license\""));
    }

    #[test]
    fn test_unknown_upstream_keys_survive_roundtrip() {
        let json = r#"{"icons":[{"title":"X","hex":"000000","source":"s","deprecated":true,"aliases":{"old":["Y"]}}]}"#;
        let mut doc = CatalogDocument::from_json(json, "test").unwrap();
        doc.normalize_slugs();

        let record = &doc.icons[0];
        assert_eq!(record.extra.get("deprecated"), Some(&serde_json::json!(true)));
        let aliases = record.aliases.as_ref().unwrap();
        assert_eq!(aliases.extra.get("old"), Some(&serde_json::json!(["Y"])));

        // Unknown alias kinds are not searchable names
        assert_eq!(record.flattened_aliases(), None);

        let written: serde_json::Value =
            serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "icons": [{
                    "title": "X",
                    "hex": "000000",
                    "source": "s",
                    "slug": "x",
                    "deprecated": true,
                    "aliases": { "old": ["Y"] }
                }]
            })
        );
    }
}
