//! Study subject data models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a subject is studied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectCategory {
    #[default]
    Theoretical,
    Practical,
    Mixed,
}

impl SubjectCategory {
    pub fn label(self) -> &'static str {
        match self {
            SubjectCategory::Theoretical => "Theoretical",
            SubjectCategory::Practical => "Practical",
            SubjectCategory::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SubjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "theoretical" => Ok(SubjectCategory::Theoretical),
            "practical" => Ok(SubjectCategory::Practical),
            "mixed" => Ok(SubjectCategory::Mixed),
            other => Err(format!(
                "unknown category '{}' (expected theoretical, practical or mixed)",
                other
            )),
        }
    }
}

/// Subject color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubjectColor {
    #[default]
    #[serde(rename = "bg-blue-500")]
    Blue,
    #[serde(rename = "bg-green-500")]
    Green,
    #[serde(rename = "bg-purple-500")]
    Purple,
    #[serde(rename = "bg-orange-500")]
    Orange,
    #[serde(rename = "bg-pink-500")]
    Pink,
    #[serde(rename = "bg-teal-500")]
    Teal,
}

impl SubjectColor {
    pub const PALETTE: [SubjectColor; 6] = [
        SubjectColor::Blue,
        SubjectColor::Green,
        SubjectColor::Purple,
        SubjectColor::Orange,
        SubjectColor::Pink,
        SubjectColor::Teal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubjectColor::Blue => "blue",
            SubjectColor::Green => "green",
            SubjectColor::Purple => "purple",
            SubjectColor::Orange => "orange",
            SubjectColor::Pink => "pink",
            SubjectColor::Teal => "teal",
        }
    }
}

impl fmt::Display for SubjectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubjectColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::PALETTE
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::PALETTE.iter().map(|c| c.name()).collect();
                format!("unknown color '{}' (expected one of: {})", wanted, names.join(", "))
            })
    }
}

/// A subject in the study cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: SubjectColor,
    /// Accumulated study time in hours
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub category: SubjectCategory,
}

impl Subject {
    pub fn new(name: String, category: SubjectCategory, color: SubjectColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            total_hours: 0.0,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_and_color() {
        assert_eq!("Practical".parse::<SubjectCategory>(), Ok(SubjectCategory::Practical));
        assert_eq!(" teal ".parse::<SubjectColor>(), Ok(SubjectColor::Teal));
        assert!("crimson".parse::<SubjectColor>().is_err());
    }

    #[test]
    fn test_subject_json_shape() {
        let subject = Subject::new(
            "Constitutional Law".to_string(),
            SubjectCategory::Mixed,
            SubjectColor::Purple,
        );
        let json = serde_json::to_value(&subject).unwrap();

        assert_eq!(json["name"], "Constitutional Law");
        assert_eq!(json["color"], "bg-purple-500");
        assert_eq!(json["category"], "mixed");
        assert_eq!(json["totalHours"], 0.0);

        let restored: Subject = serde_json::from_value(json).unwrap();
        assert_eq!(restored, subject);
    }
}
