//! Closed value sets for the categorical survey filters.
//!
//! Every enum (de)serializes as, displays as, and parses from its wire value:
//! the exact string the API expects in the query string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

macro_rules! filter_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The string sent to the API for this member.
            pub fn wire_value(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.wire_value())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ValidationError::InvalidValue {
                        field: $field,
                        reason: format!(
                            "'{}' is not one of: {}",
                            s,
                            [$($wire,)+].join(", ")
                        ),
                    }),
                }
            }
        }
    };
}

filter_enum! {
    /// Job title of a survey participant.
    Title, "title" {
        AiAutomation => "ai_automation",
        Backend => "backend",
        Crm => "crm",
        DataAnalytics => "data_analytics",
        DataEngineer => "data_engineer",
        DataScientist => "data_scientist",
        DevopsSrePlatform => "devops_sre_platform",
        Embedded => "embedded",
        EngineeringManager => "engineering_manager",
        Executive => "executive",
        Frontend => "frontend",
        Fullstack => "fullstack",
        Hardware => "hardware",
        Mobile => "mobile",
        ProductManager => "product_manager",
        ProductOwner => "product_owner",
        Research => "research",
        Scrum => "scrum",
        Security => "security",
        SystemArch => "system_arch",
        TechnicalSupport => "technical_support",
        Testing => "testing",
        UiUx => "ui_ux",
    }
}

filter_enum! {
    /// Seniority level of a survey participant.
    Level, "level" {
        CLevel => "c_level",
        Director => "director",
        GroupProductManager => "group_product_manager",
        Intern => "intern",
        Junior => "junior",
        Manager => "manager",
        MidLevel => "mid_level",
        Principal => "principal",
        Senior => "senior",
        SeniorManager => "senior_manager",
        SeniorPrincipal => "senior_principal",
        SeniorStaff => "senior_staff",
        Staff => "staff",
        TeamLead => "team_lead",
        Vp => "vp",
    }
}

filter_enum! {
    Gender, "gender" {
        Male => "male",
        Female => "female",
    }
}

filter_enum! {
    /// Market scope of the participant's employer.
    BusinessMarket, "business_market" {
        Global => "global",
        Regional => "regional",
        Local => "local",
    }
}

filter_enum! {
    BusinessSize, "business_size" {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

filter_enum! {
    /// Whether the employer builds its own product or sells engineering services.
    BusinessFocus, "business_focus" {
        Product => "product",
        SoftwareHouse => "software_house",
    }
}

filter_enum! {
    BusinessLine, "business_line" {
        B2b => "b2b",
        B2c => "b2c",
        Both => "both",
    }
}

filter_enum! {
    /// Main programming language. Only accepted by the stats endpoint.
    ProgrammingLanguage, "programming_language" {
        JavaScript => "java_script",
        TypeScript => "type_script",
        Python => "python",
        CSharp => "c_sharp",
        Java => "java",
        Php => "php",
        CPlusPlus => "c_cplusplus",
        Kotlin => "kotlin",
        Swift => "swift",
        Dart => "dart",
        Go => "go",
        R => "r",
        Scala => "scala",
        Rust => "rust",
    }
}
