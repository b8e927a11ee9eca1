//! Member Record Model
//!
//! Types for the single `users` table: the record being inserted, the three
//! closed enumerations stored as text, and the editable-column whitelist.
//!
//! # Whitelists
//! Enum values are matched exactly (case-sensitive), since the store's CHECK
//! constraints compare the exact spelling. Column names are matched loosely
//! (case and underscores ignored) but always resolve to a closed [`Column`];
//! a column name typed by the user never reaches statement text.

use std::fmt;
use std::str::FromStr;

use crate::error::{GymError, Result};

/// Member gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Every accepted value
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Stored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| GymError::validation_failed("Invalid gender"))
    }
}

/// Training plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Normal,
    SemiInteractive,
    FullyInteractive,
}

impl Plan {
    /// Every accepted value
    pub const ALL: [Self; 3] = [Self::Normal, Self::SemiInteractive, Self::FullyInteractive];

    /// Stored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::SemiInteractive => "semi-interactive",
            Self::FullyInteractive => "fully-interactive",
        }
    }
}

impl FromStr for Plan {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| GymError::validation_failed("Invalid plan"))
    }
}

/// Self-reported skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Master,
}

impl SkillLevel {
    /// Every accepted value
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Master];

    /// Stored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Master => "Master",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| GymError::validation_failed("Invalid skill level"))
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Gender, Plan, SkillLevel);

/// A member record before insertion
///
/// `id` and `created` are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name: String,
    pub last_name: String,
    pub age: i32,
    pub height: i32,
    /// Kilograms, stored with two fractional digits
    pub weight: f64,
    pub gender: Gender,
    pub plan: Plan,
    pub skill_level: SkillLevel,
}

/// Editable columns of the `users` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    LastName,
    Age,
    Height,
    Weight,
    Gender,
    Plan,
    SkillLevel,
}

impl Column {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::LastName,
        Self::Age,
        Self::Height,
        Self::Weight,
        Self::Gender,
        Self::Plan,
        Self::SkillLevel,
    ];

    /// Column name in the store
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LastName => "last_name",
            Self::Age => "age",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Gender => "gender",
            Self::Plan => "plan",
            Self::SkillLevel => "skill_level",
        }
    }

    /// Parse a raw value typed for this column into a typed update
    ///
    /// Enum columns go through their whitelist; numeric columns must parse.
    pub fn parse_value(self, raw: &str) -> Result<FieldUpdate> {
        Ok(match self {
            Self::Name => FieldUpdate::Name(raw.to_string()),
            Self::LastName => FieldUpdate::LastName(raw.to_string()),
            Self::Age => FieldUpdate::Age(parse_int(raw, "age")?),
            Self::Height => FieldUpdate::Height(parse_int(raw, "height")?),
            Self::Weight => FieldUpdate::Weight(parse_weight(raw)?),
            Self::Gender => FieldUpdate::Gender(raw.parse()?),
            Self::Plan => FieldUpdate::Plan(raw.parse()?),
            Self::SkillLevel => FieldUpdate::SkillLevel(raw.parse()?),
        })
    }
}

impl FromStr for Column {
    type Err = GymError;

    /// Case-insensitive, underscores ignored (`LastName`, `Lastname`, `last_name`).
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect::<String>().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.column_name().replace('_', "") == wanted)
            .ok_or_else(|| GymError::validation_failed(format!("Invalid column name: {s}")))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// A single-column change with its already-validated value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    LastName(String),
    Age(i32),
    Height(i32),
    Weight(f64),
    Gender(Gender),
    Plan(Plan),
    SkillLevel(SkillLevel),
}

impl FieldUpdate {
    /// Column this update targets
    #[must_use]
    pub const fn column(&self) -> Column {
        match self {
            Self::Name(_) => Column::Name,
            Self::LastName(_) => Column::LastName,
            Self::Age(_) => Column::Age,
            Self::Height(_) => Column::Height,
            Self::Weight(_) => Column::Weight,
            Self::Gender(_) => Column::Gender,
            Self::Plan(_) => Column::Plan,
            Self::SkillLevel(_) => Column::SkillLevel,
        }
    }
}

/// Parse a whole-number field (age, height)
pub fn parse_int(raw: &str, field: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| GymError::invalid_input(format!("{field} must be a whole number, got '{raw}'")))
}

/// Parse a weight; must be a finite decimal number
pub fn parse_weight(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(w),
        _ => Err(GymError::invalid_input(format!("weight must be a decimal number, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enum_whitelists_round_trip_spelling() {
        for g in Gender::ALL {
            assert_eq!(g.as_str().parse::<Gender>().unwrap(), g);
        }
        for p in Plan::ALL {
            assert_eq!(p.as_str().parse::<Plan>().unwrap(), p);
        }
        for l in SkillLevel::ALL {
            assert_eq!(l.as_str().parse::<SkillLevel>().unwrap(), l);
        }
    }

    #[test]
    fn test_enum_values_are_case_sensitive() {
        assert!("male".parse::<Gender>().is_err());
        assert!("Normal".parse::<Plan>().is_err());
        assert!("beginner".parse::<SkillLevel>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_enum_error_messages() {
        assert_eq!("Other".parse::<Gender>().unwrap_err().to_string(), "Invalid gender");
        assert_eq!("vip".parse::<Plan>().unwrap_err().to_string(), "Invalid plan");
        assert_eq!("Expert".parse::<SkillLevel>().unwrap_err().to_string(), "Invalid skill level");
    }

    #[test]
    fn test_column_name_spellings() {
        assert_eq!("Age".parse::<Column>().unwrap(), Column::Age);
        assert_eq!("LastName".parse::<Column>().unwrap(), Column::LastName);
        assert_eq!("Lastname".parse::<Column>().unwrap(), Column::LastName);
        assert_eq!("last_name".parse::<Column>().unwrap(), Column::LastName);
        assert_eq!("Skilllevel".parse::<Column>().unwrap(), Column::SkillLevel);
        assert_eq!("plan".parse::<Column>().unwrap(), Column::Plan);
        assert_eq!("gender".parse::<Column>().unwrap(), Column::Gender);
    }

    #[test]
    fn test_column_whitelist_rejects_unknown_and_injection() {
        for bad in ["id", "created", "age = 0; DROP TABLE users; --", "", "name,age"] {
            let err = bad.parse::<Column>().unwrap_err();
            assert!(matches!(err, GymError::ValidationFailed(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(Column::Age.parse_value("31").unwrap(), FieldUpdate::Age(31));
        assert_eq!(Column::Weight.parse_value("60.50").unwrap(), FieldUpdate::Weight(60.5));
        assert_eq!(Column::Plan.parse_value("normal").unwrap(), FieldUpdate::Plan(Plan::Normal));
        assert_eq!(
            Column::Name.parse_value("Ana Maria").unwrap(),
            FieldUpdate::Name("Ana Maria".to_string())
        );
    }

    #[test]
    fn test_parse_value_rejects_malformed() {
        assert!(matches!(Column::Age.parse_value("thirty"), Err(GymError::InvalidInput(_))));
        assert!(matches!(Column::Weight.parse_value("NaN"), Err(GymError::InvalidInput(_))));
        assert!(matches!(Column::Gender.parse_value("x"), Err(GymError::ValidationFailed(_))));
    }

    #[test]
    fn test_update_targets_its_column() {
        for column in Column::ALL {
            let raw = match column {
                Column::Age | Column::Height => "1",
                Column::Weight => "1.5",
                Column::Gender => "Male",
                Column::Plan => "normal",
                Column::SkillLevel => "Master",
                Column::Name | Column::LastName => "x",
            };
            assert_eq!(column.parse_value(raw).unwrap().column(), column);
        }
    }
}
