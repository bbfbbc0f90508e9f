use super::*;

/// The state of a single trial: which trip every student went to, and the
/// roster of every trip. It borrows the loaded records, so building a fresh
/// one for every trial is cheap and never shares state between trials.
#[derive(Clone, Debug)]
pub struct Assignments<'a> {
    pub students: &'a [Student],
    pub trips: &'a [Trip],
    no_team: String,
    assigned_to: Vec<Option<TripId>>,
    assignment_order: Vec<StudentId>,
    states: Vec<TripState>,
}

impl<'a> Assignments<'a> {
    pub fn new(students: &'a [Student], trips: &'a [Trip], no_team: &str) -> Assignments<'a> {
        Assignments {
            students,
            trips,
            no_team: no_team.to_owned(),
            assigned_to: vec![None; students.len()],
            assignment_order: Vec::new(),
            states: trips.iter().map(TripState::new).collect(),
        }
    }

    pub fn student(&self, StudentId(student): StudentId) -> &'a Student {
        &self.students[student]
    }

    pub fn trip(&self, TripId(trip): TripId) -> &'a Trip {
        &self.trips[trip]
    }

    pub fn state(&self, TripId(trip): TripId) -> &TripState {
        &self.states[trip]
    }

    pub fn all_students(&self) -> Vec<StudentId> {
        self.students.iter().map(|s| s.id).collect()
    }

    pub fn all_trips(&self) -> Vec<TripId> {
        self.filter_trips(|_| true)
    }

    pub fn filter_trips<F>(&self, condition: F) -> Vec<TripId>
    where
        F: Fn(TripId) -> bool,
    {
        self.trips
            .iter()
            .map(|t| t.id)
            .filter(|&trip| condition(trip))
            .collect()
    }

    pub fn trip_for(&self, StudentId(student): StudentId) -> Option<TripId> {
        self.assigned_to[student]
    }

    pub fn students_for(&self, trip: TripId) -> &[StudentId] {
        self.state(trip).assigned_students()
    }

    pub fn rank_of(&self, student: StudentId, trip: TripId) -> Option<usize> {
        self.student(student).rank_of(&self.trip(trip).subcategory)
    }

    pub fn remaining_capacity(&self, trip: TripId) -> u32 {
        self.state(trip).remaining_capacity()
    }

    pub fn assign_to(&mut self, student: StudentId, trip: TripId) {
        assert!(
            self.trip_for(student).is_none(),
            "a trip is already assigned to this student"
        );
        let record = self.student(student);
        self.states[trip.0].add(record, &self.no_team);
        self.assigned_to[student.0] = Some(trip);
        self.assignment_order.push(student);
    }

    /// Assigned students, in the order they were assigned.
    pub fn assigned_students(&self) -> &[StudentId] {
        &self.assignment_order
    }

    pub fn unassigned_students(&self) -> Vec<StudentId> {
        self.assigned_to
            .iter()
            .enumerate()
            .filter_map(|(id, assignment)| {
                if assignment.is_none() {
                    Some(StudentId(id))
                } else {
                    None
                }
            })
            .collect()
    }
}
