use crate::routes::movies;
use crate::schema::{MovieRecord, PosterRecord};
use crate::util::ResponseMessage;
use actix_web::HttpResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Movie lookup API", version = "0.1.0"),
    paths(movies::get_movie),
    components(schemas(MovieRecord, PosterRecord, ResponseMessage)),
    tags((name = "tmdb", description = "TMDB lookup endpoint"))
)]
pub struct ApiDoc;

pub async fn openapi_spec() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, ObjectSchema, MOVIE_SCHEMA, POSTER_SCHEMA};
    use serde_json::Value;
    use std::collections::BTreeSet;

    fn json_type(kind: &FieldType) -> Option<&'static str> {
        match kind {
            FieldType::Integer => Some("integer"),
            FieldType::Number => Some("number"),
            FieldType::String | FieldType::DateTime | FieldType::Uri => Some("string"),
            FieldType::Boolean => Some("boolean"),
            FieldType::Array(_) => Some("array"),
            FieldType::Object(_) => None,
        }
    }

    fn declared_types(property: &Value) -> Vec<&str> {
        match &property["type"] {
            Value::String(kind) => vec![kind.as_str()],
            Value::Array(kinds) => kinds.iter().filter_map(Value::as_str).collect(),
            _ => vec![],
        }
    }

    fn assert_documented_as(doc: &Value, component: &str, schema: &ObjectSchema) {
        let documented = &doc["components"]["schemas"][component];
        assert!(documented.is_object(), "`{}` is not documented", component);

        let properties = documented["properties"]
            .as_object()
            .unwrap_or_else(|| panic!("`{}` has no properties", component));
        let documented_names: BTreeSet<&str> = properties.keys().map(String::as_str).collect();
        let declared_names: BTreeSet<&str> = schema.fields.iter().map(|field| field.name).collect();
        assert_eq!(documented_names, declared_names, "`{}` properties", component);

        let documented_required: BTreeSet<&str> = documented["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let declared_required: BTreeSet<&str> = schema.required().collect();
        assert_eq!(documented_required, declared_required, "`{}` required", component);

        assert_eq!(
            documented["additionalProperties"],
            Value::Bool(schema.additional_properties),
            "`{}` additionalProperties",
            component
        );

        for field in schema.fields {
            let types = declared_types(&properties[field.name]);
            assert_eq!(
                types.contains(&"null"),
                field.nullable,
                "`{}.{}` nullability",
                component,
                field.name
            );
            if let Some(expected) = json_type(&field.kind) {
                assert!(
                    types.contains(&expected),
                    "`{}.{}` documented as {:?}, expected {}",
                    component,
                    field.name,
                    types,
                    expected
                );
            }
        }
    }

    #[test]
    fn documented_records_match_the_enforced_contract() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_documented_as(&doc, "MovieRecord", &MOVIE_SCHEMA);
        assert_documented_as(&doc, "PosterRecord", &POSTER_SCHEMA);
    }
}
