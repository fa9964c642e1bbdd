// src/form.rs
//! Form collection and validation for a generation request

use crate::core::ApiKey;
use crate::models::{find_model, ModelInfo, DEFAULT_MODEL};
use serde::Deserialize;
use thiserror::Error;

pub const MISSING_API_KEY_MESSAGE: &str = "Please enter your API key in the sidebar";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingRequiredFields { missing: Vec<&'static str> },
    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    #[default]
    UnderOneThousand,
    OneToFiveThousand,
    FiveToTenThousand,
    TenToFiftyThousand,
    OverFiftyThousand,
}

impl Budget {
    pub const ALL: [Budget; 5] = [
        Budget::UnderOneThousand,
        Budget::OneToFiveThousand,
        Budget::FiveToTenThousand,
        Budget::TenToFiftyThousand,
        Budget::OverFiftyThousand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Budget::UnderOneThousand => "Under $1,000",
            Budget::OneToFiveThousand => "$1,000-$5,000",
            Budget::FiveToTenThousand => "$5,000-$10,000",
            Budget::TenToFiftyThousand => "$10,000-$50,000",
            Budget::OverFiftyThousand => "Over $50,000",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCommitment {
    FullTime,
    PartTime,
    Flexible,
}

impl TimeCommitment {
    pub const ALL: [TimeCommitment; 3] = [
        TimeCommitment::FullTime,
        TimeCommitment::PartTime,
        TimeCommitment::Flexible,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeCommitment::FullTime => "Full-time",
            TimeCommitment::PartTime => "Part-time",
            TimeCommitment::Flexible => "Flexible",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPreference {
    Local,
    National,
    International,
    Online,
}

impl MarketPreference {
    pub const ALL: [MarketPreference; 4] = [
        MarketPreference::Local,
        MarketPreference::National,
        MarketPreference::International,
        MarketPreference::Online,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MarketPreference::Local => "Local",
            MarketPreference::National => "National",
            MarketPreference::International => "International",
            MarketPreference::Online => "Online",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

/// Preferences gathered for a single generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInputs {
    pub budget: Budget,
    pub skills: String,
    pub interests: String,
    pub location: String,
    pub time_commitment: Option<TimeCommitment>,
    pub market_preference: Vec<MarketPreference>,
}

impl UserInputs {
    pub fn time_commitment_label(&self) -> &'static str {
        self.time_commitment
            .map(TimeCommitment::label)
            .unwrap_or(NOT_SPECIFIED)
    }

    pub fn market_preference_label(&self) -> String {
        if self.market_preference.is_empty() {
            return NOT_SPECIFIED.to_string();
        }
        self.market_preference
            .iter()
            .map(|m| m.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Raw form values as submitted by the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub api_key: ApiKey,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub time_commitment: Option<String>,
    #[serde(default)]
    pub market_preference: Vec<String>,
}

#[derive(Debug)]
pub struct ValidatedForm {
    pub api_key: ApiKey,
    pub model: &'static ModelInfo,
    pub inputs: UserInputs,
}

impl FormSubmission {
    /// Validate the submission. Nothing is kept when this fails.
    pub fn collect(self) -> Result<ValidatedForm, FormError> {
        if self.api_key.is_empty() {
            return Err(FormError::MissingApiKey);
        }

        let missing: Vec<&'static str> = [
            ("skills", &self.skills),
            ("interests", &self.interests),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(FormError::MissingRequiredFields { missing });
        }

        let model_id = non_empty(self.model.as_deref()).unwrap_or(DEFAULT_MODEL);
        let model = find_model(model_id).ok_or_else(|| unknown("model", model_id))?;

        let budget = match non_empty(self.budget.as_deref()) {
            Some(label) => Budget::from_label(label).ok_or_else(|| unknown("budget", label))?,
            None => Budget::default(),
        };

        let time_commitment = match non_empty(self.time_commitment.as_deref()) {
            Some(label) => Some(
                TimeCommitment::from_label(label)
                    .ok_or_else(|| unknown("time commitment", label))?,
            ),
            None => None,
        };

        let market_preference = self
            .market_preference
            .iter()
            .map(|label| {
                MarketPreference::from_label(label).ok_or_else(|| unknown("market", label))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedForm {
            api_key: self.api_key,
            model,
            inputs: UserInputs {
                budget,
                skills: self.skills,
                interests: self.interests,
                location: self.location,
                time_commitment,
                market_preference,
            },
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn unknown(field: &'static str, value: &str) -> FormError {
    FormError::UnknownOption {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormSubmission {
        FormSubmission {
            api_key: ApiKey::new("pplx-test"),
            skills: "cooking".to_string(),
            interests: "travel".to_string(),
            location: "Paris".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_checked_first() {
        let submission = FormSubmission {
            api_key: ApiKey::default(),
            skills: String::new(),
            ..filled()
        };
        let err = submission.collect().unwrap_err();
        assert_eq!(err, FormError::MissingApiKey);
        assert_eq!(err.to_string(), MISSING_API_KEY_MESSAGE);
    }

    #[test]
    fn test_missing_skills() {
        let submission = FormSubmission {
            skills: String::new(),
            ..filled()
        };
        let err = submission.collect().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingRequiredFields {
                missing: vec!["skills"]
            }
        );
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        let submission = FormSubmission {
            location: " ".to_string(),
            ..filled()
        };
        assert_eq!(submission.collect().unwrap().inputs.location, " ");
    }

    #[test]
    fn test_defaults() {
        let form = filled().collect().unwrap();
        assert_eq!(form.model.id, "sonar-pro");
        assert_eq!(form.inputs.budget, Budget::UnderOneThousand);
        assert_eq!(form.inputs.time_commitment_label(), "Not specified");
        assert_eq!(form.inputs.market_preference_label(), "Not specified");
    }

    #[test]
    fn test_enumerated_options() {
        let submission = FormSubmission {
            model: Some("r1-1776".to_string()),
            budget: Some("$10,000-$50,000".to_string()),
            time_commitment: Some("Part-time".to_string()),
            market_preference: vec!["Online".to_string(), "Local".to_string()],
            ..filled()
        };
        let form = submission.collect().unwrap();
        assert_eq!(form.model.id, "r1-1776");
        assert_eq!(form.inputs.budget, Budget::TenToFiftyThousand);
        assert_eq!(form.inputs.time_commitment_label(), "Part-time");
        assert_eq!(form.inputs.market_preference_label(), "Online, Local");
    }

    #[test]
    fn test_unknown_option() {
        let submission = FormSubmission {
            budget: Some("A million".to_string()),
            ..filled()
        };
        assert_eq!(
            submission.collect().unwrap_err().to_string(),
            "Unknown budget option: A million"
        );
    }

    #[test]
    fn test_labels_round_trip() {
        for budget in Budget::ALL {
            assert_eq!(Budget::from_label(budget.label()), Some(budget));
        }
        assert_eq!(TimeCommitment::from_label("Flexible"), Some(TimeCommitment::Flexible));
        assert_eq!(MarketPreference::from_label("online"), None);
    }
}
