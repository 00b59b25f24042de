//! Intermediate representation for parsed REST API descriptors.
//!
//! Both front-ends (WADL+XSD, Swagger v2) normalize to this IR before it is
//! handed to an output backend. Everything here is built fresh per parse
//! invocation and never mutated after the parse future resolves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete parse result: root URL, data types, and services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// Base URL all method paths are relative to, if one is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    /// All data types referenced by methods, in discovery order.
    pub types: Vec<TypeDef>,
    /// Services in discovery order.
    pub services: Vec<Service>,
}

/// A named data shape referenced by methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Formatted identifier, unique within one parse result.
    pub name: String,
    /// The type's shape.
    pub kind: TypeKind,
}

/// The kind of type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A class with fields and an optional base type.
    Class(ClassDef),
    /// A string enumeration.
    Enum(EnumDef),
}

/// A class definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Base type name when the source schema declares extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub fields: Vec<Field>,
}

/// A string enumeration definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub values: Vec<String>,
}

/// A property of a class type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub optional: bool,
    pub array: bool,
}

/// A field's type: primitive tag, literal union, or reference to a named type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Primitive(Primitive),
    Union(Vec<String>),
    Named(String),
}

/// Language-neutral primitive type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Date,
    Object,
}

/// A method parameter. Parameters carry primitive types only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Primitive,
}

/// One operation of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Formatted identifier, from an explicit operation id or a generated
    /// fallback.
    pub name: String,
    pub http_method: String,
    /// URL template, duplicate slashes collapsed.
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_media_type: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            http_method: http_method.into(),
            path: path.into(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            form_params: Vec::new(),
            request_type: None,
            response_type: None,
            request_media_type: None,
            response_media_type: None,
        }
    }
}

/// A named, ordered collection of methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub methods: Vec<Method>,
}

/// Accumulates services keyed by formatted name, preserving creation order.
///
/// Two operations resolving to the same service name merge into one Service's
/// method list; the final `services` array keeps first-reference order.
#[derive(Debug, Default)]
pub(crate) struct ServiceRegistry {
    index: HashMap<String, usize>,
    services: Vec<Service>,
}

impl ServiceRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a method to the named service, creating it on first reference.
    pub(crate) fn push_method(&mut self, name: &str, method: Method) {
        let idx = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.index.insert(name.to_string(), self.services.len());
                self.services.push(Service {
                    name: name.to_string(),
                    methods: Vec::new(),
                });
                self.services.len() - 1
            }
        };
        self.services[idx].methods.push(method);
    }

    pub(crate) fn into_services(self) -> Vec<Service> {
        self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_merges_same_name_in_order() {
        let mut registry = ServiceRegistry::new();
        registry.push_method("UserService", Method::new("list", "GET", "/users"));
        registry.push_method("AdminService", Method::new("purge", "DELETE", "/all"));
        registry.push_method("UserService", Method::new("get", "GET", "/users/{id}"));

        let services = registry.into_services();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "UserService");
        assert_eq!(services[0].methods.len(), 2);
        assert_eq!(services[0].methods[1].name, "get");
        assert_eq!(services[1].name, "AdminService");
    }

    #[test]
    fn method_serialization_omits_empty_parts() {
        let method = Method::new("ping", "GET", "/ping");
        let value = serde_json::to_value(&method).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("pathParams"));
        assert!(!object.contains_key("requestType"));
        assert_eq!(object["httpMethod"], "GET");
    }

    #[test]
    fn field_types_serialize_flat() {
        let primitive = serde_json::to_value(FieldType::Primitive(Primitive::Date)).unwrap();
        assert_eq!(primitive, serde_json::json!("date"));

        let named = serde_json::to_value(FieldType::Named("User".to_string())).unwrap();
        assert_eq!(named, serde_json::json!("User"));

        let union = serde_json::to_value(FieldType::Union(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(union, serde_json::json!(["a", "b"]));
    }
}
