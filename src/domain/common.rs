use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
    Ceo,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Ceo => "ceo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            "ceo" => Some(Role::Ceo),
            _ => None,
        }
    }

    /// Admin and CEO accounts see every department and moderate content.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::Ceo)
    }
}

/// Organizational scope. `All` is a wildcard on records and never a user's
/// own department.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    Hr,
    Finance,
    Operations,
    All,
}

impl Department {
    pub const CONCRETE: [Department; 6] = [
        Department::Engineering,
        Department::Marketing,
        Department::Sales,
        Department::Hr,
        Department::Finance,
        Department::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "engineering",
            Department::Marketing => "marketing",
            Department::Sales => "sales",
            Department::Hr => "hr",
            Department::Finance => "finance",
            Department::Operations => "operations",
            Department::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "engineering" => Some(Department::Engineering),
            "marketing" => Some(Department::Marketing),
            "sales" => Some(Department::Sales),
            "hr" => Some(Department::Hr),
            "finance" => Some(Department::Finance),
            "operations" => Some(Department::Operations),
            "all" => Some(Department::All),
            _ => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Department::All)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Important,
    Event,
    Deadline,
    Ceo,
    #[default]
    General,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Important => "important",
            Priority::Event => "event",
            Priority::Deadline => "deadline",
            Priority::Ceo => "ceo",
            Priority::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "urgent" => Some(Priority::Urgent),
            "important" => Some(Priority::Important),
            "event" => Some(Priority::Event),
            "deadline" => Some(Priority::Deadline),
            "ceo" => Some(Priority::Ceo),
            "general" => Some(Priority::General),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

/// Pick the Japanese variant of a bilingual field when it exists.
pub fn localized<'a>(language: Language, en: &'a str, ja: Option<&'a str>) -> &'a str {
    match (language, ja) {
        (Language::Ja, Some(ja)) if !ja.is_empty() => ja,
        _ => en,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_round_trip_strings() {
        for dept in Department::CONCRETE {
            assert_eq!(Department::from_str(dept.as_str()), Some(dept));
        }
        assert_eq!(Department::from_str("ALL"), Some(Department::All));
        assert_eq!(Department::from_str("legal"), None);
    }

    #[test]
    fn test_privileged_roles() {
        assert!(Role::Admin.is_privileged());
        assert!(Role::Ceo.is_privileged());
        assert!(!Role::Employee.is_privileged());
    }

    #[test]
    fn test_priority_wire_format() {
        let json = serde_json::to_string(&Priority::Deadline).unwrap();
        assert_eq!(json, "\"deadline\"");
        let parsed: Priority = serde_json::from_str("\"ceo\"").unwrap();
        assert_eq!(parsed, Priority::Ceo);
    }

    #[test]
    fn test_localized_falls_back_to_english() {
        assert_eq!(localized(Language::Ja, "Hello", Some("こんにちは")), "こんにちは");
        assert_eq!(localized(Language::Ja, "Hello", None), "Hello");
        assert_eq!(localized(Language::Ja, "Hello", Some("")), "Hello");
        assert_eq!(localized(Language::En, "Hello", Some("こんにちは")), "Hello");
    }
}
