//! Swagger v2 (OpenAPI v2) front-end.
//!
//! Single pass over a JSON or YAML document: paths become methods grouped by
//! tag, definitions become class types. Unlike WADL, one operation may land in
//! several services, once per tag.

use super::ParseError;
use crate::fetch::Fetcher;
use crate::ident::{format_ident, strip_once};
use crate::ir::{
    ApiMeta, ClassDef, Field, FieldType, Method, Param, Primitive, ServiceRegistry, TypeDef,
    TypeKind,
};
use crate::options::GeneratorOptions;
use serde_json::Value;

const HTTP_VERBS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Parse a Swagger v2 descriptor into the IR.
pub async fn parse_swagger2(
    options: &GeneratorOptions,
    fetcher: &Fetcher,
) -> Result<ApiMeta, ParseError> {
    let json = options.input.ends_with(".json") || options.input.ends_with(".JSON");
    let yaml = options.input.ends_with(".yaml") || options.input.ends_with(".YAML");
    if !json && !yaml {
        return Err(ParseError::UnsupportedFormat(options.input.clone()));
    }

    let text = fetcher.fetch(&options.input).await?;
    let document: Value = if json {
        serde_json::from_str(&text)?
    } else {
        serde_yaml::from_str(&text)?
    };

    Ok(read_document(&document, options))
}

fn read_document(document: &Value, options: &GeneratorOptions) -> ApiMeta {
    let mut parser = Swagger2Parser {
        options,
        services: ServiceRegistry::new(),
        method_counter: 0,
    };
    parser.read_paths(document);
    let types = parser.read_definitions(document);

    let root_url = options.root_url.clone().or_else(|| {
        let host = document.get("host").and_then(Value::as_str)?;
        let base_path = document.get("basePath").and_then(Value::as_str)?;
        Some(format!(
            "{}/{}",
            host.trim_end_matches('/'),
            base_path.trim_start_matches('/')
        ))
    });

    ApiMeta {
        root_url,
        types,
        services: parser.services.into_services(),
    }
}

struct Swagger2Parser<'o> {
    options: &'o GeneratorOptions,
    services: ServiceRegistry,
    method_counter: usize,
}

impl Swagger2Parser<'_> {
    fn read_paths(&mut self, document: &Value) {
        let Some(paths) = document.get("paths").and_then(Value::as_object) else {
            return;
        };
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };
            for (verb, operation) in item {
                if !HTTP_VERBS.contains(&verb.as_str()) {
                    continue;
                }
                let method = self.read_operation(operation, verb, path);
                for service_name in self.service_names(operation) {
                    self.services.push_method(&service_name, method.clone());
                }
            }
        }
    }

    /// Service names an operation belongs to, one per tag. Untagged
    /// operations group under the configured default name.
    fn service_names(&self, operation: &Value) -> Vec<String> {
        let tags: Vec<&str> = operation
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        if tags.is_empty() {
            return vec![self.service_name(&self.options.default_service_name)];
        }
        tags.iter().map(|tag| self.service_name(tag)).collect()
    }

    fn service_name(&self, raw: &str) -> String {
        let stripped = strip_once(raw, &self.options.service_exclude);
        format!(
            "{}{}",
            format_ident(&stripped, self.options.capitalize),
            self.options.service_suffix
        )
    }

    fn read_operation(&mut self, operation: &Value, verb: &str, path: &str) -> Method {
        let raw_name = match operation.get("operationId").and_then(Value::as_str) {
            Some(id) => strip_once(id, &self.options.method_exclude),
            None => {
                let n = self.method_counter;
                self.method_counter += 1;
                format!("method{n}")
            }
        };
        let mut method = Method::new(format_ident(&raw_name, false), verb.to_uppercase(), path);

        // Only the first declared media type is modeled.
        method.request_media_type = operation
            .pointer("/consumes/0")
            .and_then(Value::as_str)
            .map(str::to_string);
        method.response_media_type = operation
            .pointer("/produces/0")
            .and_then(Value::as_str)
            .map(str::to_string);

        let parameters: &[Value] = operation
            .get("parameters")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        method.request_type = parameters
            .iter()
            .find(|param| param.get("in").and_then(Value::as_str) == Some("body"))
            .and_then(|param| param.pointer("/schema/$ref"))
            .and_then(Value::as_str)
            .map(|reference| self.ref_type(reference));

        method.query_params = self.params_at(parameters, "query");
        method.form_params = self.params_at(parameters, "formData");
        method.path_params = self.params_at(parameters, "path");

        method.response_type = operation
            .pointer("/responses/200/schema/$ref")
            .and_then(Value::as_str)
            .map(|reference| self.ref_type(reference));

        method
    }

    /// Parameters at one `in` location. Arrays are not supported for
    /// parameters; they fall through to the object tag.
    fn params_at(&self, parameters: &[Value], location: &str) -> Vec<Param> {
        parameters
            .iter()
            .filter(|param| param.get("in").and_then(Value::as_str) == Some(location))
            .map(|param| Param {
                name: param
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                ty: swagger_primitive(param),
            })
            .collect()
    }

    fn ref_type(&self, reference: &str) -> String {
        let local = reference.strip_prefix("#/definitions/").unwrap_or(reference);
        format_ident(local, self.options.capitalize)
    }

    fn read_definitions(&self, document: &Value) -> Vec<TypeDef> {
        let Some(definitions) = document.get("definitions").and_then(Value::as_object) else {
            return Vec::new();
        };
        definitions
            .iter()
            .map(|(name, definition)| TypeDef {
                name: format_ident(name, self.options.capitalize),
                kind: TypeKind::Class(ClassDef {
                    parent: None,
                    fields: self.read_properties(definition),
                }),
            })
            .collect()
    }

    fn read_properties(&self, definition: &Value) -> Vec<Field> {
        let required: Vec<&str> = definition
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let Some(properties) = definition.get("properties").and_then(Value::as_object) else {
            return Vec::new();
        };
        properties
            .iter()
            .map(|(name, property)| {
                let (ty, array) = self.property_type(property);
                Field {
                    name: name.clone(),
                    ty,
                    optional: !required.contains(&name.as_str()),
                    array,
                }
            })
            .collect()
    }

    fn property_type(&self, property: &Value) -> (FieldType, bool) {
        if let Some(values) = literal_union(property) {
            return (FieldType::Union(values), false);
        }
        if property.get("type").and_then(Value::as_str) == Some("array") {
            let ty = match property.get("items") {
                Some(items) => {
                    if let Some(values) = literal_union(items) {
                        FieldType::Union(values)
                    } else if let Some(reference) = items.get("$ref").and_then(Value::as_str) {
                        FieldType::Named(self.ref_type(reference))
                    } else {
                        FieldType::Primitive(swagger_primitive(items))
                    }
                }
                None => FieldType::Primitive(Primitive::Object),
            };
            return (ty, true);
        }
        if property.get("type").is_some() {
            return (FieldType::Primitive(swagger_primitive(property)), false);
        }
        if let Some(reference) = property.get("$ref").and_then(Value::as_str) {
            return (FieldType::Named(self.ref_type(reference)), false);
        }
        (FieldType::Primitive(Primitive::Object), false)
    }
}

/// Inline enum values render as a literal union.
fn literal_union(schema: &Value) -> Option<Vec<String>> {
    let values = schema.get("enum")?.as_array()?;
    Some(
        values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

fn swagger_primitive(definition: &Value) -> Primitive {
    match definition.get("type").and_then(Value::as_str) {
        Some("string") => match definition.get("format").and_then(Value::as_str) {
            Some("date") | Some("date-time") => Primitive::Date,
            _ => Primitive::String,
        },
        Some("number") | Some("integer") => Primitive::Number,
        Some("boolean") => Primitive::Boolean,
        _ => Primitive::Object,
    }
}
