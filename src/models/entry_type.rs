use serde::Serialize;

/// Kind of a time entry. Only `Work` entries count towards worked minutes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Work,
    Travel,
}

impl EntryType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::Work => "work",
            EntryType::Travel => "travel",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(EntryType::Work),
            "travel" => Some(EntryType::Travel),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        EntryType::from_db_str(&code.to_lowercase())
    }
}
