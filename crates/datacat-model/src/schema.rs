// SPDX-License-Identifier: Apache-2.0

//! Declarative schemas for catalog and software records, validated directly
//! against raw document values so defective files still get field-level
//! reports instead of a hard decode failure.

use crate::record::{CatalogType, Violation, COVERAGE_LEVELS};
use crate::software::KNOWN_PROTOCOL_TAGS;
use serde_json::Value;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum FieldKind {
    Str,
    Bool,
    Int,
    Url,
    OneOf(Vec<&'static str>),
    IntOneOf(Vec<u32>),
    ListOf(Box<FieldKind>),
    Object(Vec<FieldSpec>),
    /// Mapping with arbitrary keys; each key must be in the allowed list
    /// when one is given, each value must match the inner kind.
    MapOf {
        allowed_keys: Option<Vec<&'static str>>,
        value: Box<FieldKind>,
    },
    /// `<family>` or `<family>:<probe>` endpoint type tags.
    EndpointType,
    Any,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    #[must_use]
    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Schema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
    pub allow_unknown: bool,
}

/// Pure validation of a document against a schema. Never mutates the value.
#[must_use]
pub fn validate_value(value: &Value, schema: &Schema) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(map) = value.as_object() else {
        out.push(Violation::new(schema.name, "document must be a mapping"));
        return out;
    };

    for spec in &schema.fields {
        match map.get(spec.name) {
            None | Some(Value::Null) if spec.required => {
                out.push(Violation::new(spec.name, "required field is missing"));
            }
            None | Some(Value::Null) => {}
            Some(v) => check_kind(v, &spec.kind, spec.name, &mut out),
        }
    }

    if !schema.allow_unknown {
        for key in map.keys() {
            if !schema.fields.iter().any(|f| f.name == key) {
                out.push(Violation::new(key.clone(), "field is not in the schema"));
            }
        }
    }

    out
}

fn check_kind(value: &Value, kind: &FieldKind, field: &str, out: &mut Vec<Violation>) {
    match kind {
        FieldKind::Any => {}
        FieldKind::Str => {
            if !value.is_string() {
                out.push(Violation::new(field, "expected a string"));
            }
        }
        FieldKind::Bool => {
            if !value.is_boolean() {
                out.push(Violation::new(field, "expected a boolean"));
            }
        }
        FieldKind::Int => {
            if !value.is_i64() && !value.is_u64() {
                out.push(Violation::new(field, "expected an integer"));
            }
        }
        FieldKind::Url => match value.as_str() {
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => {}
            Some(_) => out.push(Violation::new(field, "expected an absolute http(s) URL")),
            None => out.push(Violation::new(field, "expected a URL string")),
        },
        FieldKind::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => {}
            Some(s) => out.push(Violation::new(
                field,
                format!("'{s}' is not one of the allowed values"),
            )),
            None => out.push(Violation::new(field, "expected an enum string")),
        },
        FieldKind::IntOneOf(allowed) => match value.as_u64() {
            Some(n) if allowed.contains(&u32::try_from(n).unwrap_or(u32::MAX)) => {}
            _ => out.push(Violation::new(
                field,
                format!("expected one of {allowed:?}"),
            )),
        },
        FieldKind::ListOf(inner) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_kind(item, inner, &format!("{field}[{i}]"), out);
                }
            }
            None => out.push(Violation::new(field, "expected a list")),
        },
        FieldKind::Object(fields) => match value.as_object() {
            Some(map) => {
                for spec in fields {
                    match map.get(spec.name) {
                        None | Some(Value::Null) if spec.required => out.push(Violation::new(
                            format!("{field}.{}", spec.name),
                            "required field is missing",
                        )),
                        None | Some(Value::Null) => {}
                        Some(v) => {
                            check_kind(v, &spec.kind, &format!("{field}.{}", spec.name), out);
                        }
                    }
                }
            }
            None => out.push(Violation::new(field, "expected a mapping")),
        },
        FieldKind::MapOf {
            allowed_keys,
            value: inner,
        } => match value.as_object() {
            Some(map) => {
                for (k, v) in map {
                    if let Some(allowed) = allowed_keys {
                        if !allowed.contains(&k.as_str()) {
                            out.push(Violation::new(
                                format!("{field}.{k}"),
                                "key is not a known tag",
                            ));
                        }
                    }
                    check_kind(v, inner, &format!("{field}.{k}"), out);
                }
            }
            None => out.push(Violation::new(field, "expected a mapping")),
        },
        FieldKind::EndpointType => match value.as_str() {
            Some(s) => {
                let family = s.split_once(':').map_or(s, |(f, _)| f);
                let ok = !family.is_empty()
                    && family
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
                if !ok {
                    out.push(Violation::new(
                        field,
                        "endpoint type must be '<family>' or '<family>:<probe>'",
                    ));
                }
            }
            None => out.push(Violation::new(field, "expected an endpoint type string")),
        },
    }
}

fn location_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required(
            "country",
            FieldKind::Object(vec![
                FieldSpec::required("id", FieldKind::Str),
                FieldSpec::required("name", FieldKind::Str),
            ]),
        ),
        FieldSpec::optional("level", FieldKind::IntOneOf(COVERAGE_LEVELS.to_vec())),
        FieldSpec::optional(
            "macroregion",
            FieldKind::Object(vec![
                FieldSpec::required("id", FieldKind::Str),
                FieldSpec::required("name", FieldKind::Str),
            ]),
        ),
        FieldSpec::optional("subregion", FieldKind::Str),
    ]
}

#[must_use]
pub fn catalog_schema() -> Schema {
    let catalog_types: Vec<&'static str> =
        CatalogType::ALL.iter().map(|t| t.as_str()).collect();
    Schema {
        name: "catalog_record",
        allow_unknown: false,
        fields: vec![
            FieldSpec::required("id", FieldKind::Str),
            FieldSpec::optional("uid", FieldKind::Str),
            FieldSpec::required("name", FieldKind::Str),
            FieldSpec::required("link", FieldKind::Url),
            FieldSpec::optional("description", FieldKind::Str),
            FieldSpec::required("catalog_type", FieldKind::OneOf(catalog_types)),
            FieldSpec::required(
                "software",
                FieldKind::Object(vec![
                    FieldSpec::required("id", FieldKind::Str),
                    FieldSpec::required("name", FieldKind::Str),
                ]),
            ),
            FieldSpec::optional("api", FieldKind::Bool),
            FieldSpec::optional(
                "api_status",
                FieldKind::OneOf(vec!["active", "inactive", "uncertain"]),
            ),
            FieldSpec::required(
                "access_mode",
                FieldKind::ListOf(Box::new(FieldKind::OneOf(vec![
                    "open",
                    "restricted",
                    "paid",
                ]))),
            ),
            FieldSpec::required(
                "content_types",
                FieldKind::ListOf(Box::new(FieldKind::OneOf(vec![
                    "dataset",
                    "map_layer",
                    "indicator",
                    "microdataset",
                    "ml_model",
                    "document",
                    "publication",
                    "statistics",
                    "geodata",
                    "api",
                    "timeseries",
                    "other",
                ]))),
            ),
            FieldSpec::required(
                "langs",
                FieldKind::ListOf(Box::new(FieldKind::Object(vec![
                    FieldSpec::required("id", FieldKind::Str),
                    FieldSpec::required("name", FieldKind::Str),
                ]))),
            ),
            FieldSpec::required(
                "coverage",
                FieldKind::ListOf(Box::new(FieldKind::Object(vec![FieldSpec::required(
                    "location",
                    FieldKind::Object(location_fields()),
                )]))),
            ),
            FieldSpec::required(
                "owner",
                FieldKind::Object(vec![
                    FieldSpec::required("name", FieldKind::Str),
                    FieldSpec::optional("link", FieldKind::Str),
                    FieldSpec::required(
                        "type",
                        FieldKind::OneOf(vec![
                            "Central government",
                            "Regional government",
                            "Local government",
                            "Academy",
                            "Business",
                            "Civil society",
                            "Community",
                            "NGO",
                            "International",
                        ]),
                    ),
                    FieldSpec::required("location", FieldKind::Object(location_fields())),
                ]),
            ),
            FieldSpec::optional(
                "rights",
                FieldKind::Object(vec![
                    FieldSpec::required(
                        "rights_type",
                        FieldKind::OneOf(vec!["granular", "global", "unknown", "inapplicable"]),
                    ),
                    FieldSpec::optional("license_id", FieldKind::Str),
                    FieldSpec::optional("license_name", FieldKind::Str),
                    FieldSpec::optional("license_url", FieldKind::Url),
                    FieldSpec::optional("tos_url", FieldKind::Url),
                    FieldSpec::optional("privacy_policy_url", FieldKind::Url),
                ]),
            ),
            FieldSpec::optional(
                "endpoints",
                FieldKind::ListOf(Box::new(FieldKind::Object(vec![
                    FieldSpec::required("type", FieldKind::EndpointType),
                    FieldSpec::required("url", FieldKind::Url),
                    FieldSpec::optional("version", FieldKind::Str),
                ]))),
            ),
            FieldSpec::optional(
                "identifiers",
                FieldKind::ListOf(Box::new(FieldKind::Object(vec![
                    FieldSpec::required("id", FieldKind::Str),
                    FieldSpec::required("value", FieldKind::Str),
                    FieldSpec::optional("url", FieldKind::Url),
                ]))),
            ),
            FieldSpec::required("tags", FieldKind::ListOf(Box::new(FieldKind::Str))),
            FieldSpec::optional(
                "topics",
                FieldKind::ListOf(Box::new(FieldKind::Object(vec![
                    FieldSpec::required("id", FieldKind::Str),
                    FieldSpec::required("name", FieldKind::Str),
                    FieldSpec::required(
                        "type",
                        FieldKind::OneOf(vec!["eudatatheme", "iso19115"]),
                    ),
                ]))),
            ),
            FieldSpec::required(
                "status",
                FieldKind::OneOf(vec!["active", "inactive", "scheduled", "uncertain"]),
            ),
            FieldSpec::optional(
                "properties",
                FieldKind::Object(vec![
                    FieldSpec::optional("is_national", FieldKind::Bool),
                    FieldSpec::optional("has_doi", FieldKind::Bool),
                    FieldSpec::optional("transferable_location", FieldKind::Bool),
                ]),
            ),
            FieldSpec::optional("trust_score", FieldKind::Int),
            FieldSpec::optional(
                "trust_breakdown",
                FieldKind::Object(vec![
                    FieldSpec::required("owner_type", FieldKind::Int),
                    FieldSpec::required("catalog_type", FieldKind::Int),
                    FieldSpec::required("license", FieldKind::Int),
                    FieldSpec::required("re3data", FieldKind::Int),
                    FieldSpec::required("extras", FieldKind::Int),
                    FieldSpec::required("total", FieldKind::Int),
                ]),
            ),
        ],
    }
}

#[must_use]
pub fn software_schema() -> Schema {
    Schema {
        name: "software_record",
        allow_unknown: false,
        fields: vec![
            FieldSpec::required("id", FieldKind::Str),
            FieldSpec::required("name", FieldKind::Str),
            FieldSpec::required(
                "category",
                FieldKind::OneOf(vec!["open_source", "commercial", "custom", "unknown"]),
            ),
            FieldSpec::optional("has_api", FieldKind::Bool),
            FieldSpec::optional("has_bulk", FieldKind::Bool),
            FieldSpec::optional("datatypes", FieldKind::ListOf(Box::new(FieldKind::Str))),
            FieldSpec::optional("pid_support", FieldKind::Bool),
            FieldSpec::optional("rights_management", FieldKind::Bool),
            FieldSpec::optional(
                "metadata_support",
                FieldKind::MapOf {
                    allowed_keys: Some(KNOWN_PROTOCOL_TAGS.to_vec()),
                    value: Box::new(FieldKind::OneOf(vec![
                        "Yes",
                        "No",
                        "Plugin only",
                        "Uncertain",
                    ])),
                },
            ),
            FieldSpec::optional("version", FieldKind::Str),
            FieldSpec::optional("repository_url", FieldKind::Url),
            FieldSpec::optional("documentation_url", FieldKind::Url),
            FieldSpec::optional("export_formats", FieldKind::ListOf(Box::new(FieldKind::Str))),
            FieldSpec::optional("capabilities", FieldKind::ListOf(Box::new(FieldKind::Str))),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::{catalog_schema, validate_value};
    use serde_json::json;

    #[test]
    fn schema_flags_missing_required_fields() {
        let doc = json!({ "id": "x" });
        let violations = validate_value(&doc, &catalog_schema());
        assert!(violations.iter().any(|v| v.field == "name"));
        assert!(violations.iter().any(|v| v.field == "link"));
        assert!(violations.iter().any(|v| v.field == "status"));
    }

    #[test]
    fn schema_flags_unknown_top_level_field() {
        let doc = json!({ "id": "x", "bogus": 1 });
        let violations = validate_value(&doc, &catalog_schema());
        assert!(violations.iter().any(|v| v.field == "bogus"));
    }

    #[test]
    fn schema_flags_bad_enum_and_endpoint_type() {
        let doc = json!({
            "id": "x",
            "catalog_type": "Portal of portals",
            "endpoints": [{"type": "CKAN API", "url": "https://x.org/api"}],
        });
        let violations = validate_value(&doc, &catalog_schema());
        assert!(violations.iter().any(|v| v.field == "catalog_type"));
        assert!(violations.iter().any(|v| v.field == "endpoints[0].type"));
    }
}
