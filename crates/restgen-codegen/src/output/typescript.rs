//! TypeScript client backend.
//!
//! Renders interfaces and literal-union aliases for the IR's types, and one
//! class per service whose methods call a shared fetch helper.

use super::Backend;
use crate::ident::format_ident;
use crate::ir::{ApiMeta, FieldType, Method, Param, Primitive, TypeKind};
use crate::options::GeneratorOptions;

pub struct TypeScriptBackend;

impl Backend for TypeScriptBackend {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn render(&self, meta: &ApiMeta, options: &GeneratorOptions) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "// {}. Generated REST client, do not edit.\n\n",
            options.module_name
        ));
        out.push_str(&format!(
            "export const ROOT_URL = '{}';\n\n",
            meta.root_url.as_deref().unwrap_or("")
        ));

        for def in &meta.types {
            match &def.kind {
                TypeKind::Enum(e) => {
                    let union = e
                        .values
                        .iter()
                        .map(|v| format!("'{v}'"))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    out.push_str(&format!("export type {} = {};\n\n", def.name, union));
                }
                TypeKind::Class(class) => {
                    let extends = class
                        .parent
                        .as_ref()
                        .map(|parent| format!(" extends {parent}"))
                        .unwrap_or_default();
                    out.push_str(&format!("export interface {}{} {{\n", def.name, extends));
                    for field in &class.fields {
                        let marker = if field.optional { "?" } else { "" };
                        let mut ty = field_type(&field.ty);
                        if field.array {
                            ty.push_str("[]");
                        }
                        out.push_str(&format!("  {}{}: {};\n", field.name, marker, ty));
                    }
                    out.push_str("}\n\n");
                }
            }
        }

        out.push_str(REQUEST_HELPER);

        for service in &meta.services {
            out.push_str(&format!("export class {} {{\n", service.name));
            for method in &service.methods {
                out.push_str(&render_method(method));
            }
            out.push_str("}\n\n");
        }

        out
    }
}

fn render_method(method: &Method) -> String {
    let mut args = Vec::new();
    for param in &method.path_params {
        args.push(format!(
            "{}: {}",
            format_ident(&param.name, false),
            primitive(param.ty)
        ));
    }
    if let Some(request_type) = &method.request_type {
        args.push(format!("body: {request_type}"));
    }
    for param in method.query_params.iter().chain(&method.form_params) {
        args.push(format!(
            "{}?: {}",
            format_ident(&param.name, false),
            primitive(param.ty)
        ));
    }

    let response = method.response_type.as_deref().unwrap_or("void");

    // `/a/{x}` becomes `/a/${x}` inside the template literal.
    let mut url = method.path.clone();
    for param in &method.path_params {
        url = url.replace(
            &format!("{{{}}}", param.name),
            &format!("${{{}}}", format_ident(&param.name, false)),
        );
    }

    let body = if method.request_type.is_some() {
        "body"
    } else {
        "undefined"
    };

    format!(
        "  async {}({}): Promise<{}> {{\n    return request<{}>('{}', `${{ROOT_URL}}{}`, {}, {}, {});\n  }}\n\n",
        method.name,
        args.join(", "),
        response,
        response,
        method.http_method,
        url,
        object_literal(&method.query_params),
        body,
        object_literal(&method.form_params),
    )
}

/// Object literal mapping raw parameter names to formatted argument names.
fn object_literal(params: &[Param]) -> String {
    if params.is_empty() {
        return "undefined".to_string();
    }
    let entries = params
        .iter()
        .map(|param| format!("'{}': {}", param.name, format_ident(&param.name, false)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {entries} }}")
}

fn field_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(p) => primitive(*p).to_string(),
        FieldType::Named(name) => name.clone(),
        FieldType::Union(values) => {
            let union = values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            format!("({union})")
        }
    }
}

fn primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "string",
        Primitive::Number => "number",
        Primitive::Boolean => "boolean",
        Primitive::Date => "Date",
        Primitive::Object => "Object",
    }
}

const REQUEST_HELPER: &str = r#"async function request<T>(
  method: string,
  url: string,
  query?: Record<string, unknown>,
  body?: unknown,
  form?: Record<string, unknown>,
): Promise<T> {
  const target = new URL(url);
  if (query) {
    for (const [k, v] of Object.entries(query)) {
      if (v !== undefined) target.searchParams.set(k, String(v));
    }
  }
  let payload: BodyInit | undefined;
  const headers: Record<string, string> = {};
  if (form) {
    const data = new URLSearchParams();
    for (const [k, v] of Object.entries(form)) {
      if (v !== undefined) data.set(k, String(v));
    }
    payload = data;
  } else if (body !== undefined) {
    payload = JSON.stringify(body);
    headers['Content-Type'] = 'application/json';
  }
  const res = await fetch(target.toString(), { method, headers, body: payload });
  if (!res.ok) throw new Error(`HTTP ${res.status}`);
  return (res.status === 204 ? undefined : await res.json()) as T;
}

"#;
