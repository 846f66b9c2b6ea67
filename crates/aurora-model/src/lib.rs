pub mod mapping;
pub mod schema;
pub mod token;
pub mod value;

pub use mapping::{ColumnHint, ColumnMapping};
pub use schema::{ColumnSchema, ColumnType};
pub use token::{Token, TokenType};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_serializes_with_lowercase_type() {
        let token = Token {
            token_type: TokenType::Str,
            value: "\"hi\"".to_string(),
            start: 0,
            end: 4,
        };
        let json = serde_json::to_string(&token).expect("serialize token");
        assert!(json.contains("\"string\""));
        let round: Token = serde_json::from_str(&json).expect("deserialize token");
        assert_eq!(round, token);
    }

    #[test]
    fn mapping_serializes() {
        let mapping = ColumnMapping {
            source_column: "E-Mail".to_string(),
            target_column: "email".to_string(),
            is_new: false,
            confidence: Some(0.9),
        };
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        let round: ColumnMapping = serde_json::from_str(&json).expect("deserialize mapping");
        assert_eq!(round.target_column, "email");
        assert_eq!(round.confidence, Some(0.9));
    }

    #[test]
    fn manual_mapping_omits_confidence() {
        let mapping = ColumnMapping::manual("age", "age_years");
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        assert!(!json.contains("confidence"));
    }
}
