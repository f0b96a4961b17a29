//! OpenAPI document.
//!
//! `#[utoipa::path]` cannot annotate generic handlers, so the entity operations are described
//! here with the builder API, one set per record type, and merged into the derived document.

use api_shared::{ErrorRes, HealthRes};
use trends_core::models::{
    Audit, ClinicalTrial, Disease, Gene, Patent, Publication, Trend, TrialOutcome, TrialStatus,
};
use trends_core::Entity;
use utoipa::openapi::path::{
    Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemBuilder,
    PathItemType,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Ref, Schema, SchemaType};
use utoipa::openapi::{ContentBuilder, RefOr, Required, ResponseBuilder};
use utoipa::{Modify, OpenApi};

/// Prefix for every data route.
pub const API_PREFIX: &str = "/v1/api";

const BASIC_AUTH: &str = "basic_auth";

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::health),
    components(schemas(
        HealthRes,
        ErrorRes,
        Audit,
        Disease,
        Gene,
        Patent,
        Publication,
        ClinicalTrial,
        TrialStatus,
        TrialOutcome,
        Trend,
    )),
    modifiers(&BasicAuthAddon)
)]
struct ApiDoc;

struct BasicAuthAddon;

impl Modify for BasicAuthAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BASIC_AUTH,
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// The full document served at `/api-docs/openapi.json`.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    add_entity_paths::<Disease>(&mut doc);
    add_entity_paths::<Gene>(&mut doc);
    add_entity_paths::<Patent>(&mut doc);
    add_entity_paths::<Publication>(&mut doc);
    add_entity_paths::<ClinicalTrial>(&mut doc);
    add_entity_paths::<Trend>(&mut doc);
    doc
}

fn add_entity_paths<E: Entity>(doc: &mut utoipa::openapi::OpenApi) {
    let singular = E::SINGULAR;
    let plural = E::PLURAL;
    let paths = &mut doc.paths.paths;

    paths.insert(
        format!("{API_PREFIX}/{plural}"),
        PathItemBuilder::new()
            .operation(
                PathItemType::Get,
                operation::<E>(format!("list_{plural}"), format!("List all {plural}"))
                    .response("200", json_response(&format!("All {plural}"), list_of::<E>()))
                    .build(),
            )
            .operation(
                PathItemType::Post,
                operation::<E>(format!("add_{plural}"), format!("Insert many {plural}"))
                    .request_body(Some(json_body(list_of::<E>())))
                    .response("201", json_response(&format!("Stored {plural}"), list_of::<E>()))
                    .response("400", error_response("Validation failed"))
                    .response("409", error_response("Duplicate id"))
                    .build(),
            )
            .build(),
    );

    paths.insert(
        format!("{API_PREFIX}/{plural}/keyword/{{keyword}}"),
        single_operation(
            PathItemType::Get,
            operation::<E>(
                format!("find_{plural}_by_keyword"),
                format!("Find {plural} tagged with a keyword"),
            )
            .parameter(path_parameter("keyword"))
            .response("200", json_response(&format!("Matching {plural}"), list_of::<E>()))
            .build(),
        ),
    );

    let by_id = || {
        operation::<E>(format!("find_{singular}_by_id"), format!("Find a {singular} by id"))
            .parameter(path_parameter("id"))
            .response("200", json_response(&format!("The {singular}"), one_of::<E>()))
            .response("404", error_response("Not found"))
            .build()
    };
    paths.insert(
        format!("{API_PREFIX}/{plural}/id/{{id}}"),
        single_operation(PathItemType::Get, by_id()),
    );
    paths.insert(
        format!("{API_PREFIX}/{singular}/id/{{id}}"),
        single_operation(PathItemType::Get, by_id()),
    );

    paths.insert(
        format!("{API_PREFIX}/{singular}/add"),
        single_operation(
            PathItemType::Post,
            operation::<E>(format!("add_{singular}"), format!("Insert one {singular}"))
                .request_body(Some(json_body(one_of::<E>())))
                .response("201", json_response(&format!("Stored {singular}"), one_of::<E>()))
                .response("400", error_response("Validation failed"))
                .response("409", error_response("Duplicate id"))
                .build(),
        ),
    );

    let update = || {
        operation::<E>(format!("update_{singular}"), format!("Replace a {singular}"))
            .parameter(path_parameter("id"))
            .request_body(Some(json_body(one_of::<E>())))
            .response("200", json_response(&format!("Updated {singular}"), one_of::<E>()))
            .response("400", error_response("Validation failed"))
            .response("404", error_response("Not found"))
            .response("409", error_response("Stale version"))
            .build()
    };
    paths.insert(
        format!("{API_PREFIX}/{plural}/update/{{id}}"),
        single_operation(PathItemType::Put, update()),
    );
    paths.insert(
        format!("{API_PREFIX}/{singular}/update/{{id}}"),
        single_operation(PathItemType::Put, update()),
    );
}

fn operation<E: Entity>(operation_id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tag(E::PLURAL)
        .operation_id(Some(operation_id))
        .summary(Some(summary))
        .security(SecurityRequirement::new(BASIC_AUTH, Vec::<String>::new()))
        .response("401", error_response("Missing or invalid credentials"))
}

fn single_operation(kind: PathItemType, operation: Operation) -> PathItem {
    PathItemBuilder::new().operation(kind, operation).build()
}

fn one_of<E: Entity>() -> RefOr<Schema> {
    Ref::from_schema_name(E::SCHEMA).into()
}

fn list_of<E: Entity>() -> RefOr<Schema> {
    RefOr::T(Schema::Array(
        ArrayBuilder::new().items(Ref::from_schema_name(E::SCHEMA)).build(),
    ))
}

fn json_body(schema: RefOr<Schema>) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", ContentBuilder::new().schema(schema).build())
        .required(Some(Required::True))
        .build()
}

fn json_response(description: &str, schema: RefOr<Schema>) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", ContentBuilder::new().schema(schema).build())
        .build()
}

fn error_response(description: &str) -> utoipa::openapi::Response {
    json_response(description, Ref::from_schema_name("ErrorRes").into())
}

fn path_parameter(name: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new().schema_type(SchemaType::String).build(),
        ))))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_entity_route() {
        let doc = openapi();
        let paths = &doc.paths.paths;

        for (singular, plural) in [
            ("disease", "diseases"),
            ("gene", "genes"),
            ("patent", "patents"),
            ("publication", "publications"),
            ("trial", "trials"),
            ("trend", "trends"),
        ] {
            for path in [
                format!("/v1/api/{plural}"),
                format!("/v1/api/{plural}/keyword/{{keyword}}"),
                format!("/v1/api/{plural}/id/{{id}}"),
                format!("/v1/api/{singular}/id/{{id}}"),
                format!("/v1/api/{singular}/add"),
                format!("/v1/api/{plural}/update/{{id}}"),
                format!("/v1/api/{singular}/update/{{id}}"),
            ] {
                assert!(paths.contains_key(&path), "missing {path}");
            }
        }
        assert!(paths.contains_key("/health"));
    }

    #[test]
    fn test_document_registers_schemas_and_security() {
        let doc = openapi();
        let components = doc.components.expect("components should be present");

        assert!(components.schemas.contains_key("ClinicalTrial"));
        assert!(components.schemas.contains_key("ErrorRes"));
        assert!(components.security_schemes.contains_key(BASIC_AUTH));
    }
}
