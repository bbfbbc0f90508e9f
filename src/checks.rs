use crate::config::ChecksConfig;
use crate::model::{Gender, Student, TripState};
use std::fmt;

/// Reason for which a student cannot join a trip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rejection {
    Full,
    GenderBalance,
    ProtectedClass,
    Dorm,
    Team,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Rejection::Full => "trip is full",
            Rejection::GenderBalance => "would disrupt gender distribution",
            Rejection::ProtectedClass => "would disrupt protected-class distribution",
            Rejection::Dorm => "dorm already present on trip",
            Rejection::Team => "team already present on trip",
        })
    }
}

/// Eligibility rules for adding a student to a trip. None of the checks
/// modify the trip.
pub struct Checker<'c> {
    config: &'c ChecksConfig,
    population: usize,
}

impl<'c> Checker<'c> {
    /// `population` is the total number of students in the cohort, which
    /// takes part in the gender ratio check.
    pub fn new(config: &'c ChecksConfig, population: usize) -> Checker<'c> {
        Checker { config, population }
    }

    pub fn can_add(&self, trip: &TripState, student: &Student) -> bool {
        self.rejection(trip, student).is_none()
    }

    /// First failing check, in evaluation order, if any.
    pub fn rejection(&self, trip: &TripState, student: &Student) -> Option<Rejection> {
        if !has_room(trip) {
            Some(Rejection::Full)
        } else if !self.gender_balanced(trip, student) {
            Some(Rejection::GenderBalance)
        } else if !self.protected_class_allows(trip) {
            Some(Rejection::ProtectedClass)
        } else if !dorm_available(trip, student) {
            Some(Rejection::Dorm)
        } else if !self.team_available(trip, student) {
            Some(Rejection::Team)
        } else {
            None
        }
    }

    /// `Other` is first folded into the smaller (or equal) of the M and F
    /// counts, then the student is added on their side. The trip passes if
    /// either population-relative ratio exceeds the threshold, or if both
    /// resulting shares lie within the tolerance of one half.
    pub fn gender_balanced(&self, trip: &TripState, student: &Student) -> bool {
        let counts = trip.gender_counts();
        let (mut current_m, mut current_f) = (f64::from(counts.m), f64::from(counts.f));
        if current_m <= current_f {
            current_m += f64::from(counts.other);
        } else {
            current_f += f64::from(counts.other);
        }
        let (mut future_m, mut future_f) = match student.gender {
            Gender::M => (current_m + 1.0, current_f),
            Gender::F => (current_m, current_f + 1.0),
            Gender::Other if current_m <= current_f => (current_m + 1.0, current_f),
            Gender::Other => (current_m, current_f + 1.0),
        };
        let total_future = future_m + future_f;
        let future_ratio_m = future_m / total_future;
        let future_ratio_f = future_f / total_future;
        if future_m == 0.0 {
            future_m = 0.1;
        }
        if future_f == 0.0 {
            future_f = 0.1;
        }
        let half = self.population as f64 / 2.0;
        let threshold = self.config.gender_ratio_threshold;
        if (half + future_m) / future_f > threshold || (half + future_f) / future_m > threshold {
            return true;
        }
        let tolerance = self.config.gender_balance_tolerance;
        (future_ratio_m - 0.5).abs() <= tolerance && (future_ratio_f - 0.5).abs() <= tolerance
    }

    /// Blocks any addition while the trip holds exactly the configured
    /// number of protected-class students, whatever the newcomer's flag.
    pub fn protected_class_allows(&self, trip: &TripState) -> bool {
        trip.protected_class_count() != self.config.protected_class_blocked_count
    }

    pub fn team_available(&self, trip: &TripState, student: &Student) -> bool {
        student.team == self.config.no_team || !trip.has_team(&student.team)
    }
}

pub fn has_room(trip: &TripState) -> bool {
    !trip.is_full()
}

/// Students without a dorm never conflict.
pub fn dorm_available(trip: &TripState, student: &Student) -> bool {
    student.dorm.is_empty() || !trip.has_dorm(&student.dorm)
}
