use super::{Gender, Student, StudentId};
use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TripId(pub usize);

#[derive(Clone, Debug)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub capacity: u32,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenderCounts {
    pub m: u32,
    pub f: u32,
    pub other: u32,
}

impl GenderCounts {
    fn add(&mut self, gender: Gender) {
        match gender {
            Gender::M => self.m += 1,
            Gender::F => self.f += 1,
            Gender::Other => self.other += 1,
        }
    }
}

/// Roster and distribution counters of a trip during one trial.
///
/// `remaining_capacity() + assigned_students().len()` always equals the
/// trip capacity.
#[derive(Clone, Debug)]
pub struct TripState {
    assigned: Vec<StudentId>,
    remaining: u32,
    genders: GenderCounts,
    protected_class: u32,
    dorms: HashSet<String>,
    teams: HashSet<String>,
}

impl TripState {
    pub fn new(trip: &Trip) -> TripState {
        TripState {
            assigned: Vec::new(),
            remaining: trip.capacity,
            genders: GenderCounts::default(),
            protected_class: 0,
            dorms: HashSet::new(),
            teams: HashSet::new(),
        }
    }

    /// Add a student to the roster and update every counter. `no_team` is the
    /// team marker that is never recorded in the team set, and an empty dorm
    /// is never recorded either.
    pub fn add(&mut self, student: &Student, no_team: &str) {
        assert!(self.remaining > 0, "cannot add a student to a full trip");
        self.assigned.push(student.id);
        self.remaining -= 1;
        self.genders.add(student.gender);
        if student.protected_class {
            self.protected_class += 1;
        }
        if !student.dorm.is_empty() {
            self.dorms.insert(student.dorm.clone());
        }
        if student.team != no_team {
            self.teams.insert(student.team.clone());
        }
    }

    pub fn assigned_students(&self) -> &[StudentId] {
        &self.assigned
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.remaining
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }

    pub fn gender_counts(&self) -> GenderCounts {
        self.genders
    }

    pub fn protected_class_count(&self) -> u32 {
        self.protected_class
    }

    pub fn has_dorm(&self, dorm: &str) -> bool {
        self.dorms.contains(dorm)
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.contains(team)
    }
}
