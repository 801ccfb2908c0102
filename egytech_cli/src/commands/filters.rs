//! Survey population filters shared by every subcommand.

use clap::Args;
use egytech_lib::types::{BusinessFocus, BusinessLine, BusinessMarket, BusinessSize, Level, Title};
use egytech_lib::validation;
use egytech_lib::{EgytechError, ParticipantsQuery, RangePolicy};

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Job title (e.g. backend, data-engineer, ui-ux)
    #[arg(long)]
    pub title: Option<String>,

    /// Seniority level (e.g. junior, mid-level, senior, team-lead)
    #[arg(long)]
    pub level: Option<String>,

    /// Minimum years of experience, inclusive (0-20)
    #[arg(long)]
    pub min_yoe: Option<i64>,

    /// Maximum years of experience, exclusive (1-26)
    #[arg(long)]
    pub max_yoe: Option<i64>,

    /// Gender: female (f) or male (m)
    #[arg(long)]
    pub gender: Option<String>,

    /// Holds a computer science degree: yes or no
    #[arg(long)]
    pub cs_degree: Option<String>,

    /// Business market: global, regional, local
    #[arg(long)]
    pub business_market: Option<String>,

    /// Business size: small, medium, large
    #[arg(long)]
    pub business_size: Option<String>,

    /// Business focus: product, software-house
    #[arg(long)]
    pub business_focus: Option<String>,

    /// Business line: b2b, b2c, both
    #[arg(long)]
    pub business_line: Option<String>,

    /// Include participants who relocated abroad
    #[arg(long, num_args = 0..=1, default_missing_value = "yes")]
    pub include_relocated: Option<String>,

    /// Include participants working remotely for companies abroad
    #[arg(long, num_args = 0..=1, default_missing_value = "yes")]
    pub include_remote_abroad: Option<String>,

    /// Reject years ranges where --min-yoe is not below --max-yoe
    #[arg(long)]
    pub strict_range: bool,
}

impl FilterArgs {
    pub fn range_policy(&self) -> RangePolicy {
        if self.strict_range {
            RangePolicy::Ordered
        } else {
            RangePolicy::Unchecked
        }
    }

    /// Normalises the flags and builds a validated query.
    pub fn to_query(&self) -> Result<ParticipantsQuery, EgytechError> {
        let mut builder = ParticipantsQuery::builder().with_range_policy(self.range_policy());

        if let Some(title) = &self.title {
            builder = builder.with_title(validation::parse_choice::<Title>(title)?);
        }
        if let Some(level) = &self.level {
            builder = builder.with_level(validation::parse_choice::<Level>(level)?);
        }
        if let Some(min_yoe) = self.min_yoe {
            builder = builder.with_min_yoe(min_yoe);
        }
        if let Some(max_yoe) = self.max_yoe {
            builder = builder.with_max_yoe(max_yoe);
        }
        if let Some(gender) = &self.gender {
            builder = builder.with_gender(validation::validate_gender(gender)?);
        }
        if let Some(cs_degree) = &self.cs_degree {
            builder = builder.with_cs_degree(validation::parse_flag(cs_degree)?);
        }
        if let Some(market) = &self.business_market {
            builder = builder.with_business_market(validation::parse_choice::<BusinessMarket>(market)?);
        }
        if let Some(size) = &self.business_size {
            builder = builder.with_business_size(validation::parse_choice::<BusinessSize>(size)?);
        }
        if let Some(focus) = &self.business_focus {
            builder = builder.with_business_focus(validation::parse_choice::<BusinessFocus>(focus)?);
        }
        if let Some(line) = &self.business_line {
            builder = builder.with_business_line(validation::parse_choice::<BusinessLine>(line)?);
        }
        if let Some(include) = &self.include_relocated {
            builder = builder.with_include_relocated(validation::parse_flag(include)?);
        }
        if let Some(include) = &self.include_remote_abroad {
            builder = builder.with_include_remote_abroad(validation::parse_flag(include)?);
        }

        Ok(builder.build()?)
    }
}
