//! WADL + XSD front-end.
//!
//! Parses an XML resource tree plus its included XSD grammars into the IR.
//! Grammar includes are fetched concurrently, but every fetched schema is
//! merged into the type registry before the resource walk starts: a
//! representation resolves its request/response type by element id and must
//! observe the complete registry.

use super::ParseError;
use crate::fetch::{Fetcher, is_url};
use crate::ident::format_ident;
use crate::ir::{
    ApiMeta, ClassDef, EnumDef, Field, FieldType, Method, Param, Primitive, ServiceRegistry,
    TypeDef, TypeKind,
};
use crate::options::GeneratorOptions;
use futures_util::future::try_join_all;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::path::Path;
use url::Url;

const WADL_NS: &str = "http://wadl.dev.java.net/2009/02";
const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Parse a WADL descriptor and its included grammars into the IR.
pub async fn parse_wadl(
    options: &GeneratorOptions,
    fetcher: &Fetcher,
) -> Result<ApiMeta, ParseError> {
    let text = fetcher.fetch(&options.input).await?;
    let doc = Document::parse(&text)?;
    let application = doc.root_element();

    let references = ns_children(application, WADL_NS, "grammars")
        .flat_map(|grammars| ns_children(grammars, WADL_NS, "include"))
        .filter_map(|include| include.attribute("href"))
        .map(|href| resolve_include(&options.input, href))
        .collect::<Result<Vec<_>, _>>()?;

    let grammars = try_join_all(references.iter().map(|reference| fetcher.fetch(reference))).await?;

    let mut parser = WadlParser {
        options,
        types: TypeRegistry::default(),
        services: ServiceRegistry::new(),
        method_counter: 0,
    };

    // Merge in include order so repeated parses of one descriptor agree.
    for grammar in &grammars {
        let schema = Document::parse(grammar)?;
        parser.read_grammar(schema.root_element());
    }

    let mut root_url = None;
    for resources in ns_children(application, WADL_NS, "resources") {
        root_url = options
            .root_url
            .clone()
            .or_else(|| resources.attribute("base").map(str::to_string));
        for resource in ns_children(resources, WADL_NS, "resource") {
            parser.read_resource(resource, "/", &[], None);
        }
    }

    Ok(ApiMeta {
        root_url,
        types: parser.types.types,
        services: parser.services.into_services(),
    })
}

/// Resolve a grammar include href against the root document's location.
fn resolve_include(input: &str, href: &str) -> Result<String, ParseError> {
    if is_url(input) {
        let base = Url::parse(input).map_err(|source| ParseError::InvalidInclude {
            href: href.to_string(),
            source,
        })?;
        let joined = base.join(href).map_err(|source| ParseError::InvalidInclude {
            href: href.to_string(),
            source,
        })?;
        Ok(joined.to_string())
    } else {
        let parent = Path::new(input).parent().unwrap_or_else(|| Path::new(""));
        Ok(parent.join(href).to_string_lossy().into_owned())
    }
}

/// Type entries keyed by the local name of the schema element referencing
/// them. Types with no referencing element stay in the output but are not
/// resolvable by element id.
#[derive(Debug, Default)]
struct TypeRegistry {
    by_element: HashMap<String, usize>,
    types: Vec<TypeDef>,
}

impl TypeRegistry {
    fn insert(&mut self, element_id: Option<&str>, def: TypeDef) {
        if let Some(id) = element_id {
            self.by_element.insert(id.to_string(), self.types.len());
        }
        self.types.push(def);
    }

    fn lookup(&self, element_id: &str) -> Option<&TypeDef> {
        self.by_element.get(element_id).map(|&i| &self.types[i])
    }
}

struct WadlParser<'o> {
    options: &'o GeneratorOptions,
    types: TypeRegistry,
    services: ServiceRegistry,
    method_counter: usize,
}

impl WadlParser<'_> {
    fn read_grammar(&mut self, schema: Node<'_, '_>) {
        let type_nodes = schema.children().filter(|n| {
            n.is_element()
                && n.tag_name().namespace() == Some(XS_NS)
                && matches!(n.tag_name().name(), "complexType" | "simpleType")
        });
        for type_node in type_nodes {
            let raw_name = type_node.attribute("name").unwrap_or("");
            let element_id = ns_children(schema, XS_NS, "element")
                .find(|element| element.attribute("type") == Some(raw_name))
                .and_then(|element| element.attribute("name"));

            let kind = if type_node.tag_name().name() == "complexType" {
                Some(TypeKind::Class(self.read_complex_type(type_node)))
            } else {
                // A simpleType only classifies when it restricts xs:string
                // with enumeration facets.
                read_simple_type(type_node)
            };
            if let Some(kind) = kind {
                self.types.insert(
                    element_id,
                    TypeDef {
                        name: format_ident(raw_name, self.options.capitalize),
                        kind,
                    },
                );
            }
        }
    }

    fn read_complex_type(&self, node: Node<'_, '_>) -> ClassDef {
        let parent = first_ns_child(node, XS_NS, "complexContent")
            .and_then(|content| first_ns_child(content, XS_NS, "extension"))
            .and_then(|extension| extension.attribute("base"))
            .map(|base| format_ident(base, self.options.capitalize));

        let mut fields = Vec::new();
        for element in ns_children(node, XS_NS, "sequence")
            .flat_map(|sequence| ns_children(sequence, XS_NS, "element"))
        {
            fields.push(self.element_field(element));
        }
        for element in ns_children(node, XS_NS, "complexContent")
            .flat_map(|content| ns_children(content, XS_NS, "extension"))
            .flat_map(|extension| ns_children(extension, XS_NS, "sequence"))
            .flat_map(|sequence| ns_children(sequence, XS_NS, "element"))
        {
            fields.push(self.element_field(element));
        }
        for attribute in ns_children(node, XS_NS, "attribute") {
            fields.push(self.attribute_field(attribute));
        }

        ClassDef { parent, fields }
    }

    fn element_field(&self, node: Node<'_, '_>) -> Field {
        Field {
            name: format_ident(node.attribute("name").unwrap_or(""), false),
            ty: self.field_type(node.attribute("type").unwrap_or("")),
            optional: node.attribute("minOccurs") == Some("0"),
            array: node.attribute("maxOccurs").is_some_and(|max| max != "1"),
        }
    }

    fn attribute_field(&self, node: Node<'_, '_>) -> Field {
        Field {
            name: format_ident(node.attribute("name").unwrap_or(""), false),
            ty: self.field_type(node.attribute("type").unwrap_or("")),
            optional: node.attribute("use") != Some("required"),
            array: false,
        }
    }

    fn field_type(&self, raw: &str) -> FieldType {
        if raw.starts_with("xs:") {
            FieldType::Primitive(xsd_primitive(raw))
        } else {
            FieldType::Named(format_ident(raw, self.options.capitalize))
        }
    }

    fn read_resource(
        &mut self,
        node: Node<'_, '_>,
        parent_path: &str,
        parent_params: &[Param],
        parent_name: Option<&str>,
    ) {
        let name = match parent_name {
            Some(inherited) => inherited.to_string(),
            None => {
                let from_path = node.attribute("path").unwrap_or("").replacen('/', "", 1);
                if from_path.is_empty() {
                    self.options.default_service_name.clone()
                } else {
                    from_path
                }
            }
        };

        let url_path = format!("{}{}", parent_path, node.attribute("path").unwrap_or(""));

        let mut own_params: Vec<Param> = ns_children(node, WADL_NS, "param")
            .filter(|param| param.attribute("style") == Some("template"))
            .map(|param| Param {
                name: param.attribute("name").unwrap_or("").to_string(),
                ty: xsd_primitive(param.attribute("type").unwrap_or("")),
            })
            .collect();
        // Parameters appear in the signature in the order their placeholders
        // occur in the accumulated URL template.
        own_params.sort_by_key(|param| placeholder_offset(&url_path, &param.name));
        let mut url_params = parent_params.to_vec();
        url_params.append(&mut own_params);

        for method_node in ns_children(node, WADL_NS, "method") {
            let raw_name = match method_node.attribute("id") {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    let n = self.method_counter;
                    self.method_counter += 1;
                    format!("method{n}")
                }
            };
            let mut method = Method::new(
                format_ident(&raw_name, false),
                method_node.attribute("name").unwrap_or(""),
                collapse_slashes(&url_path),
            );
            method.path_params = url_params.clone();

            self.read_request_response(method_node, Variant::Request, &mut method);
            self.read_request_response(method_node, Variant::Response, &mut method);

            let service_name = format!(
                "{}{}",
                format_ident(&name, self.options.capitalize),
                self.options.service_suffix
            );
            self.services.push_method(&service_name, method);
        }

        let next_name = if name.is_empty() { None } else { Some(name.as_str()) };
        for child in ns_children(node, WADL_NS, "resource") {
            self.read_resource(child, &url_path, &url_params, next_name);
        }
    }

    /// Request and response sub-elements share one shape: direct query params,
    /// plus a representation carrying the media type, the element-id type
    /// reference, and nested query-style params that express form fields.
    fn read_request_response(
        &self,
        method_node: Node<'_, '_>,
        variant: Variant,
        method: &mut Method,
    ) {
        let Some(node) = first_ns_child(method_node, WADL_NS, variant.tag()) else {
            return;
        };

        let query_params: Vec<Param> = ns_children(node, WADL_NS, "param")
            .filter(|param| param.attribute("style") == Some("query"))
            .map(|param| self.query_param(param))
            .collect();
        if !query_params.is_empty() {
            method.query_params = query_params;
        }

        let Some(representation) = first_ns_child(node, WADL_NS, "representation") else {
            return;
        };

        let mut type_name = None;
        if let Some(element) = representation.attribute("element") {
            match self.types.lookup(element) {
                Some(def) => type_name = Some(def.name.clone()),
                None => tracing::warn!(
                    element,
                    "representation references unknown element id, type dropped"
                ),
            }
        }
        let media_type = representation
            .attribute("mediaType")
            .filter(|media| !media.is_empty())
            .map(str::to_string);

        let form_params: Vec<Param> = ns_children(representation, WADL_NS, "param")
            .filter(|param| param.attribute("style") == Some("query"))
            .map(|param| self.query_param(param))
            .collect();
        if !form_params.is_empty() {
            method.form_params = form_params;
        }

        match variant {
            Variant::Request => {
                method.request_type = type_name;
                method.request_media_type = media_type;
            }
            Variant::Response => {
                method.response_type = type_name;
                method.response_media_type = media_type;
            }
        }
    }

    fn query_param(&self, node: Node<'_, '_>) -> Param {
        Param {
            name: format_ident(node.attribute("name").unwrap_or(""), false),
            ty: xsd_primitive(node.attribute("type").unwrap_or("")),
        }
    }
}

#[derive(Clone, Copy)]
enum Variant {
    Request,
    Response,
}

impl Variant {
    fn tag(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

fn read_simple_type(node: Node<'_, '_>) -> Option<TypeKind> {
    let restriction = first_ns_child(node, XS_NS, "restriction")
        .filter(|restriction| restriction.attribute("base") == Some("xs:string"))?;
    let values: Vec<String> = ns_children(restriction, XS_NS, "enumeration")
        .filter_map(|facet| facet.attribute("value").map(str::to_string))
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(TypeKind::Enum(EnumDef { values }))
}

fn ns_children<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'static str,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| {
        n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(ns)
    })
}

fn first_ns_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'static str,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    ns_children(node, ns, name).next()
}

fn xsd_primitive(ty: &str) -> Primitive {
    match ty {
        "xs:string" | "xs:normalizedString" => Primitive::String,
        "xs:byte" | "xs:short" | "xs:int" | "xs:long" | "xs:integer" | "xs:float" | "xs:double"
        | "xs:number" | "xs:decimal" | "xs:positiveInteger" | "xs:nonPositiveInteger"
        | "xs:negativeInteger" | "xs:unsignedByte" | "xs:unsignedShort" | "xs:unsignedInt"
        | "xs:unsignedLong" => Primitive::Number,
        "xs:boolean" => Primitive::Boolean,
        "xs:date" | "xs:time" | "xs:dateTime" => Primitive::Date,
        _ => Primitive::Object,
    }
}

/// Missing placeholders sort first, like a not-found index.
fn placeholder_offset(path: &str, name: &str) -> i64 {
    path.find(&format!("{{{name}}}"))
        .map_or(-1, |offset| offset as i64)
}

/// Collapse every run of slashes to a single one.
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }
    out
}
