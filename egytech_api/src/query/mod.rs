mod common;
pub use self::common::{FlagEncoding, Query, RangePolicy, MAX_YOE_RANGE, MIN_YOE_RANGE};

mod participants;
pub use self::participants::{ParticipantsQuery, ParticipantsQueryBuilder};

mod stats;
pub use self::stats::StatsQuery;
