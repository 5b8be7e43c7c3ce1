use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema formats accepted by the registry.
///
/// The registry treats schema content as an opaque string; the type is a
/// tag carried alongside it, never used to parse or validate the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaType {
    /// Apache Avro schema (JSON definition)
    Avro,
    /// JSON Schema
    Json,
    /// Protocol Buffers definition
    Protobuf,
}

impl SchemaType {
    /// String representation used in API paths and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Avro => "avro",
            SchemaType::Json => "json",
            SchemaType::Protobuf => "protobuf",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avro" => Ok(SchemaType::Avro),
            "json" | "json_schema" | "jsonschema" => Ok(SchemaType::Json),
            "protobuf" | "proto" => Ok(SchemaType::Protobuf),
            other => Err(format!("unknown schema type: '{}'", other)),
        }
    }
}

/// A registered schema version.
///
/// Created only by a successful [`crate::SchemaRegistry::register_schema`]
/// call and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// Globally unique schema id, assigned at registration (starts at 1,
    /// strictly increasing across all subjects)
    pub id: u64,
    /// Subject the schema was registered under
    pub subject: String,
    /// Version within the subject (starts at 1, dense)
    pub version: u32,
    /// Format tag for the schema content
    pub schema_type: SchemaType,
    /// Raw schema text, stored verbatim
    pub schema: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_type_round_trips_through_str() {
        for st in [SchemaType::Avro, SchemaType::Json, SchemaType::Protobuf] {
            assert_eq!(st.as_str().parse::<SchemaType>(), Ok(st));
        }
        assert_eq!("PROTO".parse::<SchemaType>(), Ok(SchemaType::Protobuf));
        assert_eq!("json_schema".parse::<SchemaType>(), Ok(SchemaType::Json));
        assert!("thrift".parse::<SchemaType>().is_err());
    }
}
