//! Enumerated choices offered by the registration and settings forms.
//!
//! Wire values match what the backend stores, so every enum serializes to the
//! exact string the form would have sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not one of an option's wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearsOfExperience {
    #[serde(rename = "0-1")]
    UpToOne,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl YearsOfExperience {
    pub const ALL: [Self; 5] = [
        Self::UpToOne,
        Self::OneToThree,
        Self::ThreeToFive,
        Self::FiveToTen,
        Self::TenPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpToOne => "0-1",
            Self::OneToThree => "1-3",
            Self::ThreeToFive => "3-5",
            Self::FiveToTen => "5-10",
            Self::TenPlus => "10+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpToOne => "0-1 years",
            Self::OneToThree => "1-3 years",
            Self::ThreeToFive => "3-5 years",
            Self::FiveToTen => "5-10 years",
            Self::TenPlus => "10+ years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    pub const ALL: [Self; 5] = [
        Self::Entry,
        Self::Mid,
        Self::Senior,
        Self::Lead,
        Self::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
            Self::Lead => "Lead",
            Self::Executive => "Executive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Entry => "Entry Level",
            Self::Mid => "Mid Level",
            Self::Senior => "Senior",
            Self::Lead => "Lead",
            Self::Executive => "Executive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    Basic,
    Intermediate,
    Advanced,
    Native,
}

impl Proficiency {
    pub const ALL: [Self; 4] = [Self::Basic, Self::Intermediate, Self::Advanced, Self::Native];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Native => "Native",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkMode {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkMode {
    pub const ALL: [Self; 3] = [Self::Remote, Self::Hybrid, Self::OnSite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobType {
    pub const ALL: [Self; 5] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Freelance,
        Self::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Freelance => "Freelance",
            Self::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SalaryCurrency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "PKR")]
    Pkr,
}

impl SalaryCurrency {
    pub const ALL: [Self; 4] = [Self::Usd, Self::Eur, Self::Gbp, Self::Pkr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Pkr => "PKR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub const ALL: [Self; 5] = [
        Self::Startup,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::Enterprise => "Enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Tech,
    Finance,
    Healthcare,
    Education,
    #[serde(rename = "E-commerce")]
    ECommerce,
    Manufacturing,
    Consulting,
    Media,
}

impl Industry {
    pub const ALL: [Self; 8] = [
        Self::Tech,
        Self::Finance,
        Self::Healthcare,
        Self::Education,
        Self::ECommerce,
        Self::Manufacturing,
        Self::Consulting,
        Self::Media,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Finance => "Finance",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::ECommerce => "E-commerce",
            Self::Manufacturing => "Manufacturing",
            Self::Consulting => "Consulting",
            Self::Media => "Media",
        }
    }
}

// Display and FromStr go through `as_str` so the CLI and draft files accept
// exactly the wire values.
macro_rules! wire_string {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownOption;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::ALL
                        .iter()
                        .copied()
                        .find(|v| v.as_str() == s)
                        .ok_or_else(|| UnknownOption {
                            kind: $kind,
                            value: s.to_string(),
                        })
                }
            }
        )*
    };
}

wire_string! {
    YearsOfExperience => "years of experience",
    ExperienceLevel => "experience level",
    Proficiency => "proficiency",
    WorkMode => "work mode",
    JobType => "job type",
    SalaryCurrency => "currency",
    CompanySize => "company size",
    Industry => "industry",
}
