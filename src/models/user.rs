use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(ValidationError::UnknownGender(s.to_string())),
        }
    }
}

/// The single local profile. Its existence marks onboarding as done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: Gender,
}

impl User {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        if self.surname.trim().is_empty() {
            return Err(ValidationError::EmptySurname);
        }
        if self.age <= 0 {
            return Err(ValidationError::InvalidAge);
        }
        Ok(())
    }
}
