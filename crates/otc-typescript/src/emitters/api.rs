use std::collections::HashSet;
use std::fmt::Write as _;

use indexmap::IndexMap;
use otc_core::grouping::derive_group_and_member;
use otc_core::naming::{NamingPolicy, OperationContext};
use otc_core::parse::media_type::preferred_content;
use otc_core::parse::operation::{HttpMethod, Operation};
use otc_core::parse::spec::OpenApiDocument;

use crate::resolver::TypeResolver;

/// The emitted API module plus the query interfaces synthesized while
/// building stubs, ready to be merged into the declaration module.
#[derive(Debug, Clone)]
pub struct ApiModule {
    pub content: String,
    pub query_interfaces: Vec<String>,
}

/// One generated stub and where it belongs.
struct Stub {
    group: String,
    member: String,
    code: String,
    query_interface: Option<String>,
}

/// Emit the API module: every path × method pair becomes one request stub,
/// bucketed into `export let <group> = { ... }` objects in document order.
pub fn emit_api(doc: &OpenApiDocument, policy: &dyn NamingPolicy, base_name: &str) -> ApiModule {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut query_interfaces = Vec::new();
    let mut seen_members: HashSet<(String, String)> = HashSet::new();

    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            let stub = build_stub(path, method, op, policy);

            if !seen_members.insert((stub.group.clone(), stub.member.clone())) {
                log::warn!(
                    "duplicate function `{}` in group `{}` ({} {}): later declaration shadows the earlier one",
                    stub.member,
                    stub.group,
                    method.as_str(),
                    path
                );
            }

            if let Some(interface) = stub.query_interface {
                query_interfaces.push(interface);
            }
            groups.entry(stub.group).or_default().push(stub.code);
        }
    }

    let mut content = format!(
        "import request from \"./request\"\nimport {{ AxiosRequestConfig }} from 'axios'\nimport * as Type from './{base_name}.d'\n\n"
    );
    for (group, stubs) in &groups {
        let _ = write!(content, "export let {group} = {{\n");
        for stub in stubs {
            content.push_str(stub);
        }
        content.push_str("}\n\n");
    }

    ApiModule {
        content,
        query_interfaces,
    }
}

/// Build one request stub. Returns the stub text and the zero-or-one query
/// interface it synthesized; the caller merges interfaces, so no state is
/// shared between passes.
fn build_stub(path: &str, method: HttpMethod, op: &Operation, policy: &dyn NamingPolicy) -> Stub {
    let qualified = TypeResolver::qualified("Type.");
    let bare = TypeResolver::bare();

    let (default_group, default_member) =
        derive_group_and_member(path, method, op.operation_id.as_deref());

    let ctx = OperationContext {
        operation_id: op.operation_id.as_deref().unwrap_or(""),
        description: op.doc_comment().unwrap_or(""),
        path,
        method: method.as_str(),
        tag: op.first_tag(),
    };
    let naming = policy.resolve(&ctx);
    let group = naming.module().unwrap_or(&default_group).to_string();
    let member = naming.function().unwrap_or(&default_member).to_string();

    // 1. Query/path parameters → synthesized local interface.
    let params: Vec<_> = op
        .parameters
        .iter()
        .filter_map(|p| p.as_parameter())
        .collect();

    let (query_type, query_interface) = if params.is_empty() {
        ("any".to_string(), None)
    } else {
        let type_name = format!("QueryType{default_member}");
        let mut interface = format!("export interface {type_name} {{\n");
        for param in &params {
            // Parameters without a schema contribute no property, matching
            // their absence from the synthesized type.
            if let Some(schema) = &param.schema {
                let _ = write!(interface, "  {}?: {};\n", param.name, bare.resolve(schema));
            }
        }
        interface.push_str("}\n\n");
        (format!("Type.{type_name}"), Some(interface))
    };

    // 2. Request body type, by content-type preference.
    let param_type = match &op.request_body {
        Some(body) => qualified.resolve_opt(
            preferred_content(&body.content).and_then(|media| media.schema.as_ref()),
        ),
        None => "any".to_string(),
    };

    // 3. Response type from the 200 response, same preference order.
    let response_type = match op.responses.get("200") {
        Some(resp) => qualified
            .resolve_opt(preferred_content(&resp.content).and_then(|media| media.schema.as_ref())),
        None => "any".to_string(),
    };

    // 4. Combined parameter type.
    let combined = combine_param_type(&query_type, &param_type);

    // 5. Function body.
    let description = op.doc_comment().unwrap_or("").replace('\n', " ");
    let mut code = format!(
        "\n    // {description}\n    {member}: async (param: {combined}, opt: AxiosRequestConfig = {{}}): Promise<{response_type}> => await request({{\n"
    );
    let _ = write!(code, "      url: {},\n", render_url(path));
    let _ = write!(code, "      method: '{}',\n", method.as_str());
    if !params.is_empty() {
        let mut bag = String::from("{");
        for param in &params {
            let _ = write!(bag, "{0}: param?.{0},", param.name);
        }
        bag.push('}');
        let _ = write!(code, "      params: {bag},\n");
    }
    if op.request_body.is_some() {
        code.push_str("      data: param,\n");
    }
    code.push_str("      ...opt,\n    }),\n");

    Stub {
        group,
        member,
        code,
        query_interface,
    }
}

/// Union rule for the stub's parameter type. The `| any` on the full union is
/// deliberate looseness carried over from the source tool.
fn combine_param_type(query_type: &str, param_type: &str) -> String {
    match (query_type == "any", param_type == "any") {
        (true, true) => "any".to_string(),
        (false, true) => query_type.to_string(),
        (true, false) => param_type.to_string(),
        (false, false) => format!("{query_type} | {param_type} | any"),
    }
}

/// Rewrite a path template into its generated URL expression. Paths without
/// placeholders stay plain strings; every `{name}` becomes a runtime lookup
/// in the parameter bag inside a template literal.
fn render_url(path: &str) -> String {
    if !path.contains('{') {
        return format!("'{path}'");
    }
    let mut out = String::from("`");
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let _ = write!(out, "${{param?.{}}}", &after[..end]);
                rest = &after[end + 1..];
            }
            None => {
                // Unbalanced brace; emit the remainder verbatim.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out.push('`');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use otc_core::naming::{DefaultNaming, NamingOverride};
    use otc_core::parse;

    #[test]
    fn render_url_substitutes_placeholders() {
        assert_eq!(render_url("/pet"), "'/pet'");
        assert_eq!(render_url("/pet/{petId}"), "`/pet/${param?.petId}`");
        assert_eq!(
            render_url("/pet/{petId}/uploadImage"),
            "`/pet/${param?.petId}/uploadImage`"
        );
        assert_eq!(
            render_url("/a/{x}/b/{y}"),
            "`/a/${param?.x}/b/${param?.y}`"
        );
    }

    #[test]
    fn render_url_leaves_unbalanced_braces() {
        assert_eq!(render_url("/pet/{petId"), "`/pet/{petId`");
    }

    #[test]
    fn combine_rules() {
        assert_eq!(combine_param_type("any", "any"), "any");
        assert_eq!(combine_param_type("Type.QueryTypex", "any"), "Type.QueryTypex");
        assert_eq!(combine_param_type("any", "Type.Pet"), "Type.Pet");
        assert_eq!(
            combine_param_type("Type.QueryTypex", "Type.Pet"),
            "Type.QueryTypex | Type.Pet | any"
        );
    }

    fn doc_with(paths: &str) -> OpenApiDocument {
        let json = format!(
            r#"{{"openapi": "3.0.0", "info": {{"title": "t", "version": "1"}}, "paths": {paths}}}"#
        );
        parse::from_json(&json).unwrap()
    }

    #[test]
    fn stub_with_params_and_body_gets_union_type() {
        let doc = doc_with(
            r##"{
                "/user/{username}": {
                    "put": {
                        "operationId": "updateUser",
                        "parameters": [
                            {"name": "username", "in": "path", "required": true,
                             "schema": {"type": "string"}}
                        ],
                        "requestBody": {
                            "content": {"application/json": {
                                "schema": {"$ref": "#/components/schemas/User"}}}
                        },
                        "responses": {}
                    }
                }
            }"##,
        );
        let api = emit_api(&doc, &DefaultNaming, "index");
        assert!(api.content.contains(
            "updateUser: async (param: Type.QueryTypeupdateUser | Type.User | any"
        ));
        // No 200 response → any.
        assert!(api.content.contains("): Promise<any>"));
        assert!(api.content.contains("data: param,"));
        assert!(api.content.contains("params: {username: param?.username,},"));
        assert_eq!(api.query_interfaces.len(), 1);
        assert_eq!(
            api.query_interfaces[0],
            "export interface QueryTypeupdateUser {\n  username?: string;\n}\n\n"
        );
    }

    #[test]
    fn body_only_operation_skips_params() {
        let doc = doc_with(
            r##"{
                "/pet": {
                    "post": {
                        "operationId": "addPet",
                        "requestBody": {
                            "content": {"application/json": {
                                "schema": {"$ref": "#/components/schemas/Pet"}}}
                        },
                        "responses": {"200": {"description": "ok",
                            "content": {"application/json": {
                                "schema": {"$ref": "#/components/schemas/Pet"}}}}}
                    }
                }
            }"##,
        );
        let api = emit_api(&doc, &DefaultNaming, "index");
        assert!(api.content.contains("addPet: async (param: Type.Pet, opt"));
        assert!(api.content.contains("): Promise<Type.Pet>"));
        assert!(!api.content.contains("params:"));
        assert!(api.query_interfaces.is_empty());
    }

    #[test]
    fn groups_follow_document_order() {
        let doc = doc_with(
            r#"{
                "/store/order/{orderId}": {
                    "get": {"operationId": "getOrderById", "responses": {}}
                },
                "/pet/{petId}": {
                    "get": {"operationId": "getPetById", "responses": {}}
                }
            }"#,
        );
        let api = emit_api(&doc, &DefaultNaming, "index");
        let store = api.content.find("export let store = {").unwrap();
        let pet = api.content.find("export let pet = {").unwrap();
        assert!(store < pet);
    }

    #[test]
    fn naming_policy_overrides_group_and_member() {
        struct Stubbed;
        impl NamingPolicy for Stubbed {
            fn resolve(&self, ctx: &OperationContext<'_>) -> NamingOverride {
                NamingOverride {
                    module_name: ctx.tag.map(String::from),
                    function_name: Some(format!("call_{}", ctx.operation_id)),
                }
            }
        }
        let doc = doc_with(
            r#"{
                "/store/order/{orderId}": {
                    "get": {"operationId": "getOrderById", "tags": ["orders"], "responses": {}}
                }
            }"#,
        );
        let api = emit_api(&doc, &Stubbed, "index");
        assert!(api.content.contains("export let orders = {"));
        assert!(api.content.contains("call_getOrderById: async"));
        assert!(!api.content.contains("export let store"));
    }

    #[test]
    fn content_type_preference_for_body() {
        let doc = doc_with(
            r#"{
                "/upload": {
                    "post": {
                        "operationId": "upload",
                        "requestBody": {
                            "content": {
                                "application/octet-stream": {"schema": {"type": "string"}},
                                "text/plain": {"schema": {"type": "integer"}}
                            }
                        },
                        "responses": {}
                    }
                }
            }"#,
        );
        let api = emit_api(&doc, &DefaultNaming, "index");
        // octet-stream outranks text/plain.
        assert!(api.content.contains("upload: async (param: string, opt"));
    }

    #[test]
    fn description_newlines_are_stripped() {
        let doc = doc_with(
            r#"{
                "/pet": {
                    "get": {"operationId": "listPets",
                            "description": "first line\nsecond line",
                            "responses": {}}
                }
            }"#,
        );
        let api = emit_api(&doc, &DefaultNaming, "index");
        assert!(api.content.contains("// first line second line\n"));
    }
}
