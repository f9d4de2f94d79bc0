use serde::{Deserialize, Serialize};

/// Member gender as stored in `members.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Gender {
    #[serde(rename = "남성", alias = "male")]
    Male,
    #[serde(rename = "여성", alias = "female")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Label used by the club's data files and pages.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Member {
    pub id: i64,
    pub name: String,
    /// Intake class. Not guaranteed to be contiguous.
    pub generation: u32,
    pub gender: Gender,
    #[serde(default)]
    pub phone: String,
}

impl Member {
    /// Last four digits of the phone number, ignoring separators.
    /// The simulated login uses this as the member password.
    pub fn phone_last_four(&self) -> Option<String> {
        let digits: Vec<char> = self.phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < 4 {
            return None;
        }
        Some(digits[digits.len() - 4..].iter().collect())
    }

    pub fn display_name(&self) -> String {
        format!("{} ({}기)", self.name, self.generation)
    }
}
