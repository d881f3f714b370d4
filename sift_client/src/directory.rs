//! Attribute discovery
//!
//! Attributes come from three sources, merged in this order:
//!
//! 1. the built-in standard attributes, once a sample person confirms access
//! 2. account-defined custom attributes (paged)
//! 3. list attributes with their element schema (paged, optional feature)

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use sift_core::attribute::standard_attributes;
use sift_core::{Attribute, AttributeType, LIST_SEPARATOR};

use crate::{ClientError, PeopleClient};

pub const DEFAULT_PAGE_LIMIT: usize = 1000;

/// Hard stop for servers that keep returning full pages.
pub const MAX_PAGES: usize = 1000;

const SAMPLE_PERSON_PATH: &str = "/people/2/persons?limit=1";
const CUSTOM_ATTRIBUTES_PATH: &str = "/people/2/customAttributes";
const LISTS_PATH: &str = "/people/3/lists";

/// Attributes that loaded, plus the sources that failed along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryReport {
    pub attributes: Vec<Attribute>,
    pub warnings: Vec<String>,
}

impl DirectoryReport {
    /// Find an attribute by name; dots and the list separator are interchangeable.
    pub fn find(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is_named(name))
    }

    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Loads the filterable attributes of an account.
#[derive(Debug, Clone)]
pub struct AttributeDirectory {
    client: PeopleClient,
    page_limit: usize,
}

impl AttributeDirectory {
    pub fn new(client: PeopleClient) -> Self {
        Self {
            client,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Set how many items each page request asks for.
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    /// Load attributes from every source.
    ///
    /// Failed sources are reported as warnings as long as at least one
    /// attribute loaded. If nothing loaded, all collected messages are
    /// returned as [`ClientError::AttributesUnavailable`].
    pub async fn list_attributes(&self) -> Result<DirectoryReport, ClientError> {
        let (standard, custom, lists) =
            tokio::join!(self.standard(), self.custom(), self.lists());

        let mut report = DirectoryReport::default();
        let mut errors = Vec::new();

        for (source, result) in [
            ("standard attributes", standard),
            ("custom attributes", custom),
            ("list attributes", lists),
        ] {
            match result {
                Ok(attributes) => {
                    debug!("Loaded {} {}", attributes.len(), source);
                    report.attributes.extend(attributes);
                }
                Err(e) => {
                    warn!("Failed to load {}: {}", source, e);
                    errors.push(format!("Failed to load {}: {}", source, e));
                }
            }
        }

        if report.attributes.is_empty() {
            if errors.is_empty() {
                errors.push("No attributes were returned".to_string());
            }
            return Err(ClientError::AttributesUnavailable(errors));
        }

        info!("Loaded {} attributes", report.attributes.len());
        report.warnings = errors;
        Ok(report)
    }

    /// Standard attributes, available once a sample person can be fetched.
    async fn standard(&self) -> Result<Vec<Attribute>, ClientError> {
        self.client.get_json(SAMPLE_PERSON_PATH).await?;
        Ok(standard_attributes())
    }

    async fn custom(&self) -> Result<Vec<Attribute>, ClientError> {
        let items = self
            .fetch_pages(CUSTOM_ATTRIBUTES_PATH, &["customAttributes", "results"])
            .await?;
        Ok(items.iter().filter_map(parse_custom_attribute).collect())
    }

    /// List attributes. Accounts without the feature answer 404 or 400.
    async fn lists(&self) -> Result<Vec<Attribute>, ClientError> {
        match self.fetch_pages(LISTS_PATH, &["lists", "results"]).await {
            Ok(items) => Ok(items.iter().filter_map(parse_list_attribute).collect()),
            Err(ClientError::Http { status: 400 | 404, .. }) => {
                info!("List attributes are not available for this account");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch pages starting at 1 until a page comes back short.
    async fn fetch_pages(&self, path: &str, keys: &[&str]) -> Result<Vec<Value>, ClientError> {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let body = self
                .client
                .get_json(&format!("{}?limit={}&page={}", path, self.page_limit, page))
                .await?;
            let page_items = page_items(body, keys)?;
            let count = page_items.len();
            debug!("{} page {} returned {} items", path, page, count);
            items.extend(page_items);

            if count < self.page_limit {
                return Ok(items);
            }
        }

        warn!("Stopped paging {} after {} pages", path, MAX_PAGES);
        Ok(items)
    }
}

/// Items of one page: a bare array, or the first array under one of `keys`.
fn page_items(body: Value, keys: &[&str]) -> Result<Vec<Value>, ClientError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                ClientError::Decode(format!("expected an array under one of: {}", keys.join(", ")))
            }),
        _ => Err(ClientError::Decode("expected a JSON object or array".to_string())),
    }
}

/// Type label of a remote item, under `dataType` or `type`.
fn type_label(item: &Value) -> Option<&str> {
    item.get("dataType")
        .or_else(|| item.get("type"))
        .and_then(Value::as_str)
}

fn parse_custom_attribute(item: &Value) -> Option<Attribute> {
    let name = item.get("name").and_then(Value::as_str)?;
    let attribute_type = type_label(item)
        .map(AttributeType::from_remote)
        .unwrap_or_default();

    let attribute = match item.get("enumValues").and_then(Value::as_array) {
        Some(values) if attribute_type == AttributeType::Enum => {
            let values: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
            Attribute::enumeration(&format!("customAttributes.{}", name), &values)
        }
        _ => Attribute::new(&format!("customAttributes.{}", name), attribute_type),
    };

    Some(attribute.custom())
}

fn parse_list_attribute(item: &Value) -> Option<Attribute> {
    let name = item.get("name").and_then(Value::as_str)?;
    let schema = item
        .get("schema")
        .or_else(|| item.get("fields"))
        .map(parse_schema)
        .unwrap_or_default();

    Some(Attribute::list(&format!("data{}{}", LIST_SEPARATOR, name), schema).custom())
}

/// Element schema, either `{"field": {"type": ..}}` or `[{"name": .., "type": ..}]`.
fn parse_schema(schema: &Value) -> BTreeMap<String, AttributeType> {
    match schema {
        Value::Object(fields) => fields
            .iter()
            .map(|(name, descriptor)| {
                let label = descriptor.as_str().or_else(|| type_label(descriptor));
                (name.clone(), label.map(AttributeType::from_remote).unwrap_or_default())
            })
            .collect(),
        Value::Array(fields) => fields
            .iter()
            .filter_map(|field| {
                let name = field.get("name").and_then(Value::as_str)?;
                let label = type_label(field);
                Some((
                    name.to_string(),
                    label.map(AttributeType::from_remote).unwrap_or_default(),
                ))
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_page_items_bare_array() {
        let items = page_items(json!([1, 2]), &["results"]).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_page_items_under_key() {
        let items = page_items(json!({"total": 2, "results": [1, 2]}), &["lists", "results"]).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_page_items_missing_key() {
        assert_matches!(page_items(json!({"total": 0}), &["lists"]), Err(ClientError::Decode(_)));
    }

    #[test]
    fn test_parse_custom_attribute() {
        let attribute = parse_custom_attribute(&json!({"name": "loyaltyPoints", "dataType": "DECIMAL"})).unwrap();
        assert_eq!(attribute.name, "customAttributes.loyaltyPoints");
        assert_eq!(attribute.attribute_type, AttributeType::Decimal);
        assert!(attribute.is_custom);
    }

    #[test]
    fn test_parse_custom_attribute_without_name() {
        assert!(parse_custom_attribute(&json!({"dataType": "STRING"})).is_none());
    }

    #[test]
    fn test_parse_list_attribute_object_schema() {
        let attribute = parse_list_attribute(&json!({
            "name": "Orders",
            "schema": {"total": {"type": "DECIMAL"}, "status": "STRING"}
        }))
        .unwrap();

        assert_eq!(attribute.name, "data\u{1}Orders");
        assert_eq!(attribute.attribute_type, AttributeType::List);
        assert_eq!(attribute.schema_type("total"), Some(AttributeType::Decimal));
        assert_eq!(attribute.schema_type("status"), Some(AttributeType::String));
    }

    #[test]
    fn test_parse_list_attribute_array_schema() {
        let attribute = parse_list_attribute(&json!({
            "name": "Visits",
            "fields": [{"name": "count", "dataType": "INTEGER"}, {"type": "STRING"}]
        }))
        .unwrap();

        assert_eq!(attribute.schema().unwrap().len(), 1);
        assert_eq!(attribute.schema_type("count"), Some(AttributeType::Integer));
    }
}
