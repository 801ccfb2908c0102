use serde_json::{Map, Value};

use crate::config::Endpoint;
use crate::errors::ValidationError;
use crate::types::{BusinessFocus, BusinessLine, BusinessMarket, BusinessSize, Gender, Level, Title};

use super::common::{
    check_range, decode_enum, decode_flag, decode_integer, FlagEncoding, Query, RangePolicy,
    MAX_YOE_RANGE, MIN_YOE_RANGE,
};

/// Validated filter set for the participants endpoint.
///
/// Values are immutable once built. Use [`ParticipantsQuery::builder`] for
/// typed construction or [`ParticipantsQuery::from_map`] for a JSON mapping.
/// `ParticipantsQuery::default()` is the empty filter set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantsQuery {
    title: Option<Title>,
    level: Option<Level>,
    min_yoe: Option<u8>,
    max_yoe: Option<u8>,
    gender: Option<Gender>,
    cs_degree: Option<bool>,
    business_market: Option<BusinessMarket>,
    business_size: Option<BusinessSize>,
    business_focus: Option<BusinessFocus>,
    business_line: Option<BusinessLine>,
    include_relocated: Option<bool>,
    include_remote_abroad: Option<bool>,
}

impl ParticipantsQuery {
    /// Field names accepted by [`ParticipantsQuery::from_map`].
    pub const FIELDS: &'static [&'static str] = &[
        "title",
        "level",
        "min_yoe",
        "max_yoe",
        "gender",
        "cs_degree",
        "business_market",
        "business_size",
        "business_focus",
        "business_line",
        "include_relocated",
        "include_remote_abroad",
    ];

    pub fn builder() -> ParticipantsQueryBuilder {
        ParticipantsQueryBuilder::default()
    }

    /// Builds a query from a JSON mapping using [`RangePolicy::Unchecked`].
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        Self::from_map_with(map, RangePolicy::default())
    }

    /// Builds a query from a JSON mapping, rejecting unknown keys, values of
    /// the wrong shape, enum non-members and out-of-range integers.
    pub fn from_map_with(
        map: &Map<String, Value>,
        policy: RangePolicy,
    ) -> Result<Self, ValidationError> {
        let mut b = Self::builder().with_range_policy(policy);
        for (key, value) in map {
            match key.as_str() {
                "title" => b.title = decode_enum("title", value)?,
                "level" => b.level = decode_enum("level", value)?,
                "min_yoe" => b.min_yoe = decode_integer("min_yoe", value, MIN_YOE_RANGE)?,
                "max_yoe" => b.max_yoe = decode_integer("max_yoe", value, MAX_YOE_RANGE)?,
                "gender" => b.gender = decode_enum("gender", value)?,
                "cs_degree" => b.cs_degree = decode_flag("cs_degree", value, FlagEncoding::YesNo)?,
                "business_market" => b.business_market = decode_enum("business_market", value)?,
                "business_size" => b.business_size = decode_enum("business_size", value)?,
                "business_focus" => b.business_focus = decode_enum("business_focus", value)?,
                "business_line" => b.business_line = decode_enum("business_line", value)?,
                "include_relocated" => {
                    b.include_relocated =
                        decode_flag("include_relocated", value, FlagEncoding::TrueFalse)?
                }
                "include_remote_abroad" => {
                    b.include_remote_abroad =
                        decode_flag("include_remote_abroad", value, FlagEncoding::TrueFalse)?
                }
                other => return Err(ValidationError::UnknownField(other.to_string())),
            }
        }
        b.build()
    }

    /// Dumps the set filters keyed by field name. Integers stay numbers, enums
    /// and booleans use their wire strings. Feeding the result back to
    /// [`ParticipantsQuery::from_map`] yields an equal query.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        };
        put("title", self.title.map(|v| v.wire_value().into()));
        put("level", self.level.map(|v| v.wire_value().into()));
        put("min_yoe", self.min_yoe.map(Value::from));
        put("max_yoe", self.max_yoe.map(Value::from));
        put("gender", self.gender.map(|v| v.wire_value().into()));
        put(
            "cs_degree",
            self.cs_degree.map(|v| FlagEncoding::YesNo.encode(v).into()),
        );
        put(
            "business_market",
            self.business_market.map(|v| v.wire_value().into()),
        );
        put("business_size", self.business_size.map(|v| v.wire_value().into()));
        put(
            "business_focus",
            self.business_focus.map(|v| v.wire_value().into()),
        );
        put("business_line", self.business_line.map(|v| v.wire_value().into()));
        put(
            "include_relocated",
            self.include_relocated
                .map(|v| FlagEncoding::TrueFalse.encode(v).into()),
        );
        put(
            "include_remote_abroad",
            self.include_remote_abroad
                .map(|v| FlagEncoding::TrueFalse.encode(v).into()),
        );
        map
    }

    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn title(&self) -> Option<Title> {
        self.title
    }
    pub fn level(&self) -> Option<Level> {
        self.level
    }
    pub fn min_yoe(&self) -> Option<u8> {
        self.min_yoe
    }
    pub fn max_yoe(&self) -> Option<u8> {
        self.max_yoe
    }
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }
    pub fn cs_degree(&self) -> Option<bool> {
        self.cs_degree
    }
    pub fn business_market(&self) -> Option<BusinessMarket> {
        self.business_market
    }
    pub fn business_size(&self) -> Option<BusinessSize> {
        self.business_size
    }
    pub fn business_focus(&self) -> Option<BusinessFocus> {
        self.business_focus
    }
    pub fn business_line(&self) -> Option<BusinessLine> {
        self.business_line
    }
    pub fn include_relocated(&self) -> Option<bool> {
        self.include_relocated
    }
    pub fn include_remote_abroad(&self) -> Option<bool> {
        self.include_remote_abroad
    }
}

impl Query for ParticipantsQuery {
    const ENDPOINT: Endpoint = Endpoint::Participants;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(title) = self.title {
            pairs.push(("title", title.to_string()));
        }
        if let Some(level) = self.level {
            pairs.push(("level", level.to_string()));
        }
        if let Some(min_yoe) = self.min_yoe {
            pairs.push(("yoe_from_included", min_yoe.to_string()));
        }
        if let Some(max_yoe) = self.max_yoe {
            pairs.push(("yoe_to_excluded", max_yoe.to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.to_string()));
        }
        if let Some(cs_degree) = self.cs_degree {
            pairs.push(("cs_degree", FlagEncoding::YesNo.encode(cs_degree).to_string()));
        }
        if let Some(market) = self.business_market {
            pairs.push(("business_market", market.to_string()));
        }
        if let Some(size) = self.business_size {
            pairs.push(("business_size", size.to_string()));
        }
        if let Some(focus) = self.business_focus {
            pairs.push(("business_focus", focus.to_string()));
        }
        if let Some(line) = self.business_line {
            pairs.push(("business_line", line.to_string()));
        }
        if let Some(relocated) = self.include_relocated {
            pairs.push((
                "include_relocated",
                FlagEncoding::TrueFalse.encode(relocated).to_string(),
            ));
        }
        if let Some(remote) = self.include_remote_abroad {
            pairs.push((
                "include_remote_abroad",
                FlagEncoding::TrueFalse.encode(remote).to_string(),
            ));
        }
        pairs
    }

    fn filters(&self) -> &ParticipantsQuery {
        self
    }
}

impl TryFrom<Value> for ParticipantsQuery {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_map(&map),
            _ => Err(ValidationError::NotAnObject),
        }
    }
}

/// Collects filters for a [`ParticipantsQuery`]. Bounds and the range policy
/// are checked in [`ParticipantsQueryBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct ParticipantsQueryBuilder {
    pub(crate) title: Option<Title>,
    pub(crate) level: Option<Level>,
    pub(crate) min_yoe: Option<i64>,
    pub(crate) max_yoe: Option<i64>,
    pub(crate) gender: Option<Gender>,
    pub(crate) cs_degree: Option<bool>,
    pub(crate) business_market: Option<BusinessMarket>,
    pub(crate) business_size: Option<BusinessSize>,
    pub(crate) business_focus: Option<BusinessFocus>,
    pub(crate) business_line: Option<BusinessLine>,
    pub(crate) include_relocated: Option<bool>,
    pub(crate) include_remote_abroad: Option<bool>,
    pub(crate) range_policy: RangePolicy,
}

impl ParticipantsQueryBuilder {
    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Minimum years of experience, included. Must be in `0..=20`.
    pub fn with_min_yoe(mut self, min_yoe: i64) -> Self {
        self.min_yoe = Some(min_yoe);
        self
    }

    /// Maximum years of experience, excluded. Must be in `1..=26`.
    pub fn with_max_yoe(mut self, max_yoe: i64) -> Self {
        self.max_yoe = Some(max_yoe);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_cs_degree(mut self, cs_degree: bool) -> Self {
        self.cs_degree = Some(cs_degree);
        self
    }

    pub fn with_business_market(mut self, market: BusinessMarket) -> Self {
        self.business_market = Some(market);
        self
    }

    pub fn with_business_size(mut self, size: BusinessSize) -> Self {
        self.business_size = Some(size);
        self
    }

    pub fn with_business_focus(mut self, focus: BusinessFocus) -> Self {
        self.business_focus = Some(focus);
        self
    }

    pub fn with_business_line(mut self, line: BusinessLine) -> Self {
        self.business_line = Some(line);
        self
    }

    pub fn with_include_relocated(mut self, include: bool) -> Self {
        self.include_relocated = Some(include);
        self
    }

    pub fn with_include_remote_abroad(mut self, include: bool) -> Self {
        self.include_remote_abroad = Some(include);
        self
    }

    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    pub fn build(self) -> Result<ParticipantsQuery, ValidationError> {
        let min_yoe = check_range("min_yoe", self.min_yoe, MIN_YOE_RANGE)?;
        let max_yoe = check_range("max_yoe", self.max_yoe, MAX_YOE_RANGE)?;
        self.range_policy.check(min_yoe, max_yoe)?;
        Ok(ParticipantsQuery {
            title: self.title,
            level: self.level,
            min_yoe,
            max_yoe,
            gender: self.gender,
            cs_degree: self.cs_degree,
            business_market: self.business_market,
            business_size: self.business_size,
            business_focus: self.business_focus,
            business_line: self.business_line,
            include_relocated: self.include_relocated,
            include_remote_abroad: self.include_remote_abroad,
        })
    }
}
