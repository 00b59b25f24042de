//! Integration tests over fixture descriptors.

use restgen_codegen::ir::{FieldType, Primitive, TypeKind};
use restgen_codegen::{
    FetchError, Fetcher, GeneratorOptions, ParseError, generate, parse_descriptor,
};

fn wadl_options() -> GeneratorOptions {
    let mut options = GeneratorOptions::for_input("tests/fixtures/application.wadl");
    options.default_service_name = "health".to_string();
    options
}

fn swagger_options(input: &str) -> GeneratorOptions {
    let mut options = GeneratorOptions::for_input(input);
    options.method_exclude = "api.".to_string();
    options.default_service_name = "misc".to_string();
    options
}

#[tokio::test]
async fn wadl_builds_services_and_types() {
    let meta = parse_descriptor(&wadl_options(), &Fetcher::new())
        .await
        .unwrap();

    assert_eq!(meta.root_url.as_deref(), Some("http://example.com/rest/"));

    let names: Vec<&str> = meta.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["UsersService", "StatusService", "HealthService"]);

    let users = &meta.services[0];
    let method_names: Vec<&str> = users.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(method_names, ["listusers", "createUser", "assignRole"]);

    let list = &users.methods[0];
    assert_eq!(list.http_method, "GET");
    assert_eq!(list.path, "/users");
    let query: Vec<&str> = list.query_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(query, ["page", "pagesize"]);
    assert_eq!(list.response_type.as_deref(), Some("UserListType"));
    assert_eq!(list.response_media_type.as_deref(), Some("application/json"));
    assert!(list.request_media_type.is_none());

    let create = &users.methods[1];
    assert_eq!(create.request_type.as_deref(), Some("UserType"));
    assert_eq!(create.response_type.as_deref(), Some("UserType"));

    let type_names: Vec<&str> = meta.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        type_names,
        ["BaseEntity", "UserType", "UserListType", "StatusType", "RoleType"]
    );

    let user = meta.types.iter().find(|t| t.name == "UserType").unwrap();
    let TypeKind::Class(class) = &user.kind else {
        panic!("expected class");
    };
    assert_eq!(class.parent.as_deref(), Some("BaseEntity"));
    assert_eq!(class.fields[0].name, "username");
    assert_eq!(class.fields[1].ty, FieldType::Named("RoleType".to_string()));
    assert!(class.fields[1].array);
    let active = class.fields.iter().find(|f| f.name == "active").unwrap();
    assert!(!active.optional);

    let role = meta.types.iter().find(|t| t.name == "RoleType").unwrap();
    let TypeKind::Enum(role_enum) = &role.kind else {
        panic!("expected enum");
    };
    assert_eq!(role_enum.values, ["admin", "editor", "viewer"]);
}

#[tokio::test]
async fn wadl_path_params_follow_placeholder_order() {
    let meta = parse_descriptor(&wadl_options(), &Fetcher::new())
        .await
        .unwrap();

    let assign = &meta.services[0].methods[2];
    assert_eq!(assign.path, "/users/{user-id}/roles/{role}");
    // Declared role first, user-id second; the URL template decides.
    let params: Vec<&str> = assign.path_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, ["user-id", "role"]);
    assert_eq!(assign.path_params[0].ty, Primitive::Number);
    assert_eq!(assign.path_params[1].ty, Primitive::String);
}

#[tokio::test]
async fn wadl_form_params_come_from_the_representation() {
    let meta = parse_descriptor(&wadl_options(), &Fetcher::new())
        .await
        .unwrap();

    let assign = &meta.services[0].methods[2];
    let form: Vec<&str> = assign.form_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(form, ["comment", "expires"]);
    assert_eq!(assign.form_params[1].ty, Primitive::Date);
    assert_eq!(
        assign.request_media_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert!(assign.query_params.is_empty());
}

#[tokio::test]
async fn wadl_unresolved_element_yields_no_type() {
    let meta = parse_descriptor(&wadl_options(), &Fetcher::new())
        .await
        .unwrap();

    // assignRole's response references an element no grammar declares.
    let assign = &meta.services[0].methods[2];
    assert!(assign.response_type.is_none());
    assert_eq!(assign.response_media_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn wadl_collapses_duplicate_slashes() {
    let meta = parse_descriptor(&wadl_options(), &Fetcher::new())
        .await
        .unwrap();

    let status = &meta.services[1];
    assert_eq!(status.name, "StatusService");
    assert_eq!(status.methods[0].path, "/status");
}

#[tokio::test]
async fn wadl_pathless_resource_uses_default_name() {
    let meta = parse_descriptor(&wadl_options(), &Fetcher::new())
        .await
        .unwrap();

    let health = &meta.services[2];
    assert_eq!(health.name, "HealthService");
    assert_eq!(health.methods[0].name, "method0");
    assert_eq!(health.methods[0].path, "/");
    assert_eq!(health.methods[0].response_type.as_deref(), Some("StatusType"));
}

#[tokio::test]
async fn wadl_root_url_override_wins() {
    let mut options = wadl_options();
    options.root_url = Some("http://localhost:9090/rest".to_string());
    let meta = parse_descriptor(&options, &Fetcher::new()).await.unwrap();
    assert_eq!(meta.root_url.as_deref(), Some("http://localhost:9090/rest"));
}

#[tokio::test]
async fn wadl_parse_is_idempotent() {
    let fetcher = Fetcher::new();
    let first = parse_descriptor(&wadl_options(), &fetcher).await.unwrap();
    let second = parse_descriptor(&wadl_options(), &fetcher).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn swagger_multi_tag_operation_lands_in_both_services() {
    let meta = parse_descriptor(
        &swagger_options("tests/fixtures/petstore.json"),
        &Fetcher::new(),
    )
    .await
    .unwrap();

    let names: Vec<&str> = meta.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["PetsService", "AdminService", "MiscService"]);

    let pets_create = meta.services[0]
        .methods
        .iter()
        .find(|m| m.name == "createPet")
        .unwrap();
    let admin_create = meta.services[1]
        .methods
        .iter()
        .find(|m| m.name == "createPet")
        .unwrap();
    assert_eq!(pets_create, admin_create);
    assert_eq!(pets_create.request_type.as_deref(), Some("Pet"));
    assert_eq!(pets_create.request_media_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn swagger_operations_map_parameters_by_location() {
    let meta = parse_descriptor(
        &swagger_options("tests/fixtures/petstore.json"),
        &Fetcher::new(),
    )
    .await
    .unwrap();

    let list = &meta.services[0].methods[0];
    assert_eq!(list.name, "listPets");
    assert_eq!(list.http_method, "GET");
    assert_eq!(list.response_type.as_deref(), Some("PetList"));
    assert_eq!(list.response_media_type.as_deref(), Some("application/json"));
    assert_eq!(list.query_params[0].name, "limit");
    assert_eq!(list.query_params[0].ty, Primitive::Number);
    assert_eq!(list.query_params[1].name, "born-after");
    assert_eq!(list.query_params[1].ty, Primitive::Date);

    let get = meta.services[0]
        .methods
        .iter()
        .find(|m| m.name == "getPet")
        .unwrap();
    assert_eq!(get.path, "/pets/{petId}");
    assert_eq!(get.path_params[0].name, "petId");

    // The delete operation has no operationId and falls back to the counter.
    let fallback = meta.services[1]
        .methods
        .iter()
        .find(|m| m.name == "method0")
        .unwrap();
    assert_eq!(fallback.http_method, "DELETE");
    assert!(fallback.response_type.is_none());

    let upload = &meta.services[2].methods[0];
    assert_eq!(upload.name, "uploadImage");
    assert_eq!(upload.request_media_type.as_deref(), Some("multipart/form-data"));
    let form: Vec<&str> = upload.form_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(form, ["file", "caption"]);
    assert_eq!(upload.form_params[0].ty, Primitive::Object);
}

#[tokio::test]
async fn swagger_required_list_controls_optional() {
    let meta = parse_descriptor(
        &swagger_options("tests/fixtures/petstore.json"),
        &Fetcher::new(),
    )
    .await
    .unwrap();

    let pet = meta.types.iter().find(|t| t.name == "Pet").unwrap();
    let TypeKind::Class(class) = &pet.kind else {
        panic!("expected class");
    };
    let field = |name: &str| class.fields.iter().find(|f| f.name == name).unwrap();

    assert!(!field("name").optional);
    assert!(field("id").optional);
    assert_eq!(
        field("status").ty,
        FieldType::Union(vec![
            "available".to_string(),
            "pending".to_string(),
            "sold".to_string()
        ])
    );
    assert!(field("tags").array);
    assert_eq!(field("photoDates").ty, FieldType::Primitive(Primitive::Date));
    assert_eq!(field("category").ty, FieldType::Named("Category".to_string()));
    assert_eq!(field("metadata").ty, FieldType::Primitive(Primitive::Object));

    let list = meta.types.iter().find(|t| t.name == "PetList").unwrap();
    let TypeKind::Class(class) = &list.kind else {
        panic!("expected class");
    };
    let items = class.fields.iter().find(|f| f.name == "items").unwrap();
    assert!(items.array);
    assert_eq!(items.ty, FieldType::Named("Pet".to_string()));
}

#[tokio::test]
async fn swagger_yaml_parses_like_json() {
    let fetcher = Fetcher::new();
    let from_json = parse_descriptor(&swagger_options("tests/fixtures/petstore.json"), &fetcher)
        .await
        .unwrap();
    let from_yaml = parse_descriptor(&swagger_options("tests/fixtures/petstore.yaml"), &fetcher)
        .await
        .unwrap();
    assert_eq!(from_json, from_yaml);
}

#[tokio::test]
async fn swagger_root_url_joins_host_and_base_path() {
    let meta = parse_descriptor(
        &swagger_options("tests/fixtures/petstore.json"),
        &Fetcher::new(),
    )
    .await
    .unwrap();
    assert_eq!(meta.root_url.as_deref(), Some("petstore.example.com/v2"));
}

#[tokio::test]
async fn missing_input_is_a_fetch_error() {
    let options = GeneratorOptions::for_input("tests/fixtures/missing.wadl");
    let err = parse_descriptor(&options, &Fetcher::new()).await.unwrap_err();
    assert!(matches!(err, ParseError::Fetch(FetchError::Io { .. })));
}

#[tokio::test]
async fn unsupported_extension_is_a_hard_error() {
    let options = GeneratorOptions::for_input("tests/fixtures/petstore.toml");
    let err = parse_descriptor(&options, &Fetcher::new()).await.unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn generate_renders_a_typescript_client() {
    let source = generate(&wadl_options(), &Fetcher::new()).await.unwrap();
    assert!(source.contains("export const ROOT_URL = 'http://example.com/rest/';"));
    assert!(source.contains("export interface UserType extends BaseEntity {"));
    assert!(source.contains("export type RoleType = 'admin' | 'editor' | 'viewer';"));
    assert!(source.contains("export class UsersService {"));
    assert!(source.contains("async assignRole(userid: number, role: string, comment?: string, expires?: Date): Promise<void> {"));
}
