use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub usize);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Gender {
    M,
    F,
    Other,
}

impl FromStr for Gender {
    type Err = std::convert::Infallible;

    /// Anything that is neither `M` nor `F` counts as `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "M" | "m" => Gender::M,
            "F" | "f" => Gender::F,
            _ => Gender::Other,
        })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Gender::M => "M",
            Gender::F => "F",
            Gender::Other => "Other",
        })
    }
}

/// A student as read from the roster. Records are never mutated by the
/// solver, per-trial state lives in [`Assignments`](super::Assignments).
#[derive(Clone, Debug)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    /// Subcategory names, most preferred first.
    pub preferences: Vec<String>,
    pub gender: Gender,
    /// POC cell as read, written back unchanged.
    pub poc: String,
    /// Set only for a POC cell reading exactly `Yes`.
    pub protected_class: bool,
    pub dorm: String,
    pub team: String,
}

impl Student {
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn rank_of(&self, subcategory: &str) -> Option<usize> {
        self.preferences.iter().position(|p| p == subcategory)
    }

    pub fn preferences_str(&self) -> String {
        self.preferences.join(", ")
    }

    pub fn has_preferences(&self) -> bool {
        !self.preferences.is_empty()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.id_number)
    }
}
