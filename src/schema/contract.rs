use chrono::DateTime;
use reqwest::Url;
use serde::Serialize;
use serde_json::{Map, Value};

/// Type of a single declared field.
#[derive(Debug)]
pub enum FieldType {
    Integer,
    Number,
    String,
    Boolean,
    /// RFC 3339 timestamp string.
    DateTime,
    /// Absolute URL string.
    Uri,
    Array(&'static FieldType),
    Object(&'static ObjectSchema),
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
    pub nullable: bool,
}

/// A closed object contract: every field in `fields` must be present, and
/// nothing else may be when `additional_properties` is false.
#[derive(Debug)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    pub additional_properties: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("`{path}` must be an object")]
    NotAnObject { path: String },
    #[error("`{path}` is required but missing")]
    MissingField { path: String },
    #[error("`{path}` is not declared by the `{schema}` schema")]
    UnexpectedField { path: String, schema: &'static str },
    #[error("`{path}` must not be null")]
    NullField { path: String },
    #[error("`{path}` must be of type {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("record could not be serialized: {0}")]
    Serialization(String),
}

const fn required(name: &'static str, kind: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        nullable: false,
    }
}

const fn nullable(name: &'static str, kind: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        nullable: true,
    }
}

static POSTER_FIELDS: [FieldSpec; 10] = [
    required("id", FieldType::Integer),
    required("movie_id", FieldType::Integer),
    required("url", FieldType::Uri),
    required("file_path", FieldType::String),
    required("width", FieldType::Integer),
    required("height", FieldType::Integer),
    required("aspect_ratio", FieldType::Number),
    required("vote_average", FieldType::Number),
    required("vote_count", FieldType::Integer),
    required("language", FieldType::String),
];

pub static POSTER_SCHEMA: ObjectSchema = ObjectSchema {
    name: "poster",
    fields: &POSTER_FIELDS,
    additional_properties: false,
};

static POSTER_ITEM: FieldType = FieldType::Object(&POSTER_SCHEMA);
static GENRE_ITEM: FieldType = FieldType::String;

static MOVIE_FIELDS: [FieldSpec; 22] = [
    required("id", FieldType::Integer),
    nullable("imdb_id", FieldType::String),
    nullable("url", FieldType::Uri),
    required("name", FieldType::String),
    nullable("original_name", FieldType::String),
    nullable("alternative_name", FieldType::String),
    required("year", FieldType::Integer),
    nullable("certification", FieldType::String),
    required("runtime", FieldType::Integer),
    required("language", FieldType::String),
    required("overview", FieldType::String),
    required("tagline", FieldType::String),
    nullable("rating", FieldType::Number),
    nullable("votes", FieldType::Integer),
    nullable("popularity", FieldType::Integer),
    required("adult", FieldType::Boolean),
    nullable("budget", FieldType::Integer),
    nullable("revenue", FieldType::Integer),
    nullable("homepage", FieldType::Uri),
    required("posters", FieldType::Array(&POSTER_ITEM)),
    required("genres", FieldType::Array(&GENRE_ITEM)),
    required("updated", FieldType::DateTime),
];

pub static MOVIE_SCHEMA: ObjectSchema = ObjectSchema {
    name: "movie",
    fields: &MOVIE_FIELDS,
    additional_properties: false,
};

impl FieldType {
    fn describe(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::DateTime => "date-time string",
            FieldType::Uri => "uri string",
            FieldType::Array(_) => "array",
            FieldType::Object(_) => "object",
        }
    }

    fn check(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        let wrong_type = || SchemaViolation::WrongType {
            path: path.to_string(),
            expected: self.describe(),
        };
        match self {
            FieldType::Integer if value.is_i64() || value.is_u64() => Ok(()),
            FieldType::Number if value.is_number() => Ok(()),
            FieldType::String if value.is_string() => Ok(()),
            FieldType::Boolean if value.is_boolean() => Ok(()),
            FieldType::DateTime => value
                .as_str()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|_| ())
                .ok_or_else(wrong_type),
            FieldType::Uri => value
                .as_str()
                .and_then(|raw| Url::parse(raw).ok())
                .map(|_| ())
                .ok_or_else(wrong_type),
            FieldType::Array(items) => {
                let elements = value.as_array().ok_or_else(wrong_type)?;
                for (index, element) in elements.iter().enumerate() {
                    let element_path = format!("{}[{}]", path, index);
                    if element.is_null() {
                        return Err(SchemaViolation::NullField { path: element_path });
                    }
                    items.check(&element_path, element)?;
                }
                Ok(())
            }
            FieldType::Object(schema) => schema.validate_at(path, value),
            _ => Err(wrong_type()),
        }
    }
}

impl ObjectSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Names of every field that must be present in a conforming object.
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at(self.name, value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        let object: &Map<String, Value> =
            value.as_object().ok_or_else(|| SchemaViolation::NotAnObject {
                path: path.to_string(),
            })?;

        if !self.additional_properties {
            if let Some(key) = object.keys().find(|key| self.field(key).is_none()) {
                return Err(SchemaViolation::UnexpectedField {
                    path: format!("{}.{}", path, key),
                    schema: self.name,
                });
            }
        }

        for field in self.fields {
            let field_path = format!("{}.{}", path, field.name);
            match object.get(field.name) {
                None => return Err(SchemaViolation::MissingField { path: field_path }),
                Some(Value::Null) if field.nullable => {}
                Some(Value::Null) => return Err(SchemaViolation::NullField { path: field_path }),
                Some(value) => field.kind.check(&field_path, value)?,
            }
        }
        Ok(())
    }

    /// Serializes `record` and checks the result against this schema.
    ///
    /// Returns the validated JSON bytes; a non-conforming record is an error,
    /// never a partially valid payload.
    pub fn to_validated_json<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, SchemaViolation> {
        let value = serde_json::to_value(record)
            .map_err(|err| SchemaViolation::Serialization(err.to_string()))?;
        self.validate(&value)?;
        serde_json::to_vec(&value).map_err(|err| SchemaViolation::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn poster() -> Value {
        json!({
            "id": 1,
            "movie_id": 27205,
            "url": "https://image.tmdb.org/t/p/original/inception.jpg",
            "file_path": "/inception.jpg",
            "width": 2000,
            "height": 3000,
            "aspect_ratio": 0.667,
            "vote_average": 5.4,
            "vote_count": 12,
            "language": "en"
        })
    }

    fn movie() -> Value {
        json!({
            "id": 27205,
            "imdb_id": "tt1375666",
            "url": "https://www.themoviedb.org/movie/27205",
            "name": "Inception",
            "original_name": null,
            "alternative_name": null,
            "year": 2010,
            "certification": "PG-13",
            "runtime": 148,
            "language": "en",
            "overview": "",
            "tagline": "Your mind is the scene of the crime.",
            "rating": 8.4,
            "votes": 35000,
            "popularity": 90,
            "adult": false,
            "budget": null,
            "revenue": null,
            "homepage": null,
            "posters": [poster()],
            "genres": ["Action", "Sci-Fi"],
            "updated": "2024-03-01T12:00:00Z"
        })
    }

    #[test]
    fn accepts_conforming_movie() {
        assert_eq!(MOVIE_SCHEMA.validate(&movie()), Ok(()));
    }

    #[test]
    fn required_set_matches_declared_fields() {
        let required: Vec<_> = MOVIE_SCHEMA.required().collect();
        assert_eq!(required.len(), MOVIE_SCHEMA.fields.len());
        assert!(!required.contains(&"match"));
        assert_eq!(POSTER_SCHEMA.required().count(), 10);
    }

    #[test]
    fn rejects_missing_field() {
        let mut value = movie();
        value.as_object_mut().unwrap().remove("tagline");
        assert_eq!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::MissingField {
                path: "movie.tagline".to_string()
            })
        );
    }

    #[test]
    fn missing_nullable_field_is_still_missing() {
        let mut value = movie();
        value.as_object_mut().unwrap().remove("budget");
        assert!(matches!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::MissingField { .. })
        ));
    }

    #[test]
    fn rejects_extra_field() {
        let mut value = movie();
        value["match"] = json!(0.9);
        assert_eq!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::UnexpectedField {
                path: "movie.match".to_string(),
                schema: "movie"
            })
        );
    }

    #[test]
    fn rejects_null_in_non_nullable_field() {
        let mut value = movie();
        value["runtime"] = Value::Null;
        assert!(matches!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::NullField { .. })
        ));
    }

    #[test]
    fn rejects_wrong_types() {
        let mut value = movie();
        value["year"] = json!("2010");
        assert!(matches!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::WrongType { expected: "integer", .. })
        ));

        let mut value = movie();
        value["rating"] = json!("high");
        assert!(MOVIE_SCHEMA.validate(&value).is_err());

        let mut value = movie();
        value["updated"] = json!("last tuesday");
        assert!(matches!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::WrongType { expected: "date-time string", .. })
        ));

        let mut value = movie();
        value["homepage"] = json!("not a url");
        assert!(MOVIE_SCHEMA.validate(&value).is_err());

        let mut value = movie();
        value["genres"] = json!(["Action", 3]);
        assert!(MOVIE_SCHEMA.validate(&value).is_err());
    }

    #[test]
    fn validates_nested_posters() {
        let mut value = movie();
        value["posters"][0]["thumbnail"] = json!(true);
        assert_eq!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::UnexpectedField {
                path: "movie.posters[0].thumbnail".to_string(),
                schema: "poster"
            })
        );

        let mut value = movie();
        value["posters"][0]["aspect_ratio"] = Value::Null;
        assert!(matches!(
            MOVIE_SCHEMA.validate(&value),
            Err(SchemaViolation::NullField { .. })
        ));
    }

    #[test]
    fn empty_collections_are_valid() {
        let mut value = movie();
        value["posters"] = json!([]);
        value["genres"] = json!([]);
        assert_eq!(MOVIE_SCHEMA.validate(&value), Ok(()));
    }
}
