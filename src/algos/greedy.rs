use super::Algo;
use crate::checks::Checker;
use crate::config::ChecksConfig;
use crate::model::*;
use crate::stats::RankHistogram;
use rand::prelude::*;
use tracing::{instrument, trace};

/// Randomized greedy pass: students are processed in a random order, and
/// each one takes the first eligible trip of their best possible rank. The
/// trips are reshuffled for every student to break ties between trips of
/// the same subcategory.
pub struct Greedy<'a, 'r, R: Rng + ?Sized> {
    assignments: Assignments<'a>,
    checker: Checker<'a>,
    ranks: RankHistogram,
    rng: &'r mut R,
}

impl<'a, 'r, R: Rng + ?Sized> Greedy<'a, 'r, R> {
    pub fn new(
        students: &'a [Student],
        trips: &'a [Trip],
        config: &'a ChecksConfig,
        rng: &'r mut R,
    ) -> Greedy<'a, 'r, R> {
        Greedy {
            assignments: Assignments::new(students, trips, &config.no_team),
            checker: Checker::new(config, students.len()),
            ranks: RankHistogram::default(),
            rng,
        }
    }

    /// Find the best ranked trip accepting this student, scanning the trips in
    /// the given order within each rank.
    fn find_trip(&self, student: StudentId, trips: &[TripId]) -> Option<(TripId, usize)> {
        let record = self.assignments.student(student);
        for (rank, subcategory) in record.preferences.iter().enumerate() {
            for &trip in trips {
                if self.assignments.trip(trip).subcategory != *subcategory {
                    continue;
                }
                match self.checker.rejection(self.assignments.state(trip), record) {
                    None => return Some((trip, rank)),
                    Some(reason) => trace!(
                        student = %record,
                        trip = %self.assignments.trip(trip),
                        %reason,
                        "Trip rejected student",
                    ),
                }
            }
        }
        None
    }
}

impl<'a, R: Rng + ?Sized> Algo<'a> for Greedy<'a, '_, R> {
    #[instrument(skip_all)]
    fn assign(&mut self) {
        let mut students = self.assignments.all_students();
        students.shuffle(&mut *self.rng);
        let mut trips = self.assignments.all_trips();
        for student in students {
            trips.shuffle(&mut *self.rng);
            if let Some((trip, rank)) = self.find_trip(student, &trips) {
                trace!(
                    student = %self.assignments.student(student),
                    trip = %self.assignments.trip(trip),
                    rank = rank + 1,
                    "Assigning student to trip",
                );
                self.assignments.assign_to(student, trip);
                self.ranks.record(rank);
            } else {
                trace!(
                    student = %self.assignments.student(student),
                    "No trip accepts student",
                );
            }
        }
    }

    fn into_parts(self) -> (Assignments<'a>, RankHistogram) {
        (self.assignments, self.ranks)
    }
}
