mod dataset;
pub use self::dataset::{Dataset, Record};

mod filters;
pub use self::filters::{
    BusinessFocus, BusinessLine, BusinessMarket, BusinessSize, Gender, Level, ProgrammingLanguage,
    Title,
};

mod response;
pub use self::response::{
    ParticipantsResponse, ParticipantsResult, StatsResponse, StatsResult, StatsSummary,
};
