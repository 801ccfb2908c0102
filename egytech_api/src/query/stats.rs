use serde_json::{Map, Value};

use crate::config::Endpoint;
use crate::errors::ValidationError;
use crate::types::ProgrammingLanguage;

use super::common::{decode_enum, Query, RangePolicy};
use super::ParticipantsQuery;

/// Validated filter set for the stats endpoint: every participant filter plus
/// an optional programming language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsQuery {
    base: ParticipantsQuery,
    programming_language: Option<ProgrammingLanguage>,
}

impl StatsQuery {
    pub fn new(base: ParticipantsQuery, programming_language: Option<ProgrammingLanguage>) -> Self {
        Self {
            base,
            programming_language,
        }
    }

    /// Returns a copy of this query restricted to one programming language.
    pub fn with_programming_language(mut self, language: ProgrammingLanguage) -> Self {
        self.programming_language = Some(language);
        self
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        Self::from_map_with(map, RangePolicy::default())
    }

    /// Same rules as [`ParticipantsQuery::from_map_with`], with
    /// `programming_language` added to the schema.
    pub fn from_map_with(
        map: &Map<String, Value>,
        policy: RangePolicy,
    ) -> Result<Self, ValidationError> {
        let mut programming_language = None;
        let mut rest = Map::new();
        for (key, value) in map {
            if key == "programming_language" {
                programming_language = decode_enum("programming_language", value)?;
            } else {
                rest.insert(key.clone(), value.clone());
            }
        }
        Ok(Self {
            base: ParticipantsQuery::from_map_with(&rest, policy)?,
            programming_language,
        })
    }

    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.base.to_map();
        if let Some(language) = self.programming_language {
            map.insert(
                "programming_language".to_string(),
                language.wire_value().into(),
            );
        }
        map
    }

    pub fn programming_language(&self) -> Option<ProgrammingLanguage> {
        self.programming_language
    }

    pub fn participants(&self) -> &ParticipantsQuery {
        &self.base
    }
}

impl Query for StatsQuery {
    const ENDPOINT: Endpoint = Endpoint::Stats;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.base.query_pairs();
        if let Some(language) = self.programming_language {
            pairs.push(("programming_language", language.to_string()));
        }
        pairs
    }

    fn filters(&self) -> &ParticipantsQuery {
        &self.base
    }
}

impl AsRef<ParticipantsQuery> for StatsQuery {
    fn as_ref(&self) -> &ParticipantsQuery {
        &self.base
    }
}

impl From<ParticipantsQuery> for StatsQuery {
    fn from(base: ParticipantsQuery) -> Self {
        Self::new(base, None)
    }
}

impl From<StatsQuery> for ParticipantsQuery {
    fn from(query: StatsQuery) -> Self {
        query.base
    }
}

impl TryFrom<Value> for StatsQuery {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_map(&map),
            _ => Err(ValidationError::NotAnObject),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::types::{Level, Title};

    #[test]
    fn test_stats_query_url() {
        let url = Url::parse("https://example.com/stats").unwrap();
        let base = ParticipantsQuery::builder()
            .with_title(Title::Backend)
            .with_level(Level::MidLevel)
            .build()
            .unwrap();

        insta::assert_snapshot!(
            StatsQuery::from(base.clone()).add_to_url(&url).to_string(),
            @"https://example.com/stats?title=backend&level=mid_level"
        );

        insta::assert_snapshot!(
            StatsQuery::from(base)
                .with_programming_language(ProgrammingLanguage::CPlusPlus)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/stats?title=backend&level=mid_level&programming_language=c_cplusplus"
        );
    }

    #[test]
    fn programming_language_is_validated() {
        let ok = StatsQuery::try_from(json!({"programming_language": "rust"})).unwrap();
        assert_eq!(ok.programming_language(), Some(ProgrammingLanguage::Rust));
        assert!(ok.participants().is_empty());

        let err = StatsQuery::try_from(json!({"programming_language": "cobol"})).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue {
                field: "programming_language",
                ..
            }
        ));
    }

    #[test]
    fn base_rules_still_apply() {
        assert!(StatsQuery::try_from(json!({"max_yoe": 27})).is_err());
        assert!(StatsQuery::try_from(json!({"wrong_field": "python"})).is_err());
        assert!(StatsQuery::try_from(json!({"title": ["backend"]})).is_err());
    }

    #[test]
    fn filters_expose_the_base_query() {
        let query = StatsQuery::try_from(json!({"level": "staff", "programming_language": "go"}))
            .unwrap();
        assert_eq!(query.filters().level(), Some(Level::Staff));
        let base: ParticipantsQuery = query.into();
        assert_eq!(base.to_map(), json!({"level": "staff"}).as_object().unwrap().clone());
    }
}
