use crate::algos::{Algo, Greedy};
use crate::config::ChecksConfig;
use crate::model::{Assignments, Student, Trip};
use crate::stats::RankHistogram;
use rand::Rng;
use tracing::{debug, info, instrument};

/// Outcome of one randomized assignment pass.
#[derive(Clone, Debug)]
pub struct Trial<'a> {
    pub index: usize,
    pub assignments: Assignments<'a>,
    pub ranks: RankHistogram,
}

impl Trial<'_> {
    pub fn first_choice_percent(&self) -> f64 {
        self.ranks.first_choice_percent()
    }
}

/// Best candidate seen so far. A candidate replaces the incumbent only when
/// its score is strictly greater, so ties keep the earliest one.
#[derive(Debug)]
pub struct Incumbent<T> {
    best: Option<(f64, T)>,
    accepted: Vec<usize>,
}

impl<T> Default for Incumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Incumbent<T> {
    pub fn new() -> Self {
        Incumbent {
            best: None,
            accepted: Vec::new(),
        }
    }

    /// Offer the candidate of trial `index`, and return `true` if it has
    /// been installed.
    pub fn offer(&mut self, index: usize, score: f64, candidate: T) -> bool {
        if self.best.as_ref().is_some_and(|&(best, _)| score <= best) {
            return false;
        }
        self.best = Some((score, candidate));
        self.accepted.push(index);
        true
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best.as_ref().map(|&(score, _)| score)
    }

    pub fn best(&self) -> Option<&T> {
        self.best.as_ref().map(|(_, candidate)| candidate)
    }

    /// Indices of the installed candidates, in installation order.
    pub fn accepted(&self) -> &[usize] {
        &self.accepted
    }

    pub fn into_best(self) -> Option<T> {
        self.best.map(|(_, candidate)| candidate)
    }
}

#[instrument(skip(students, trips, config, rng))]
pub fn run_trial<'a, R: Rng + ?Sized>(
    index: usize,
    students: &'a [Student],
    trips: &'a [Trip],
    config: &'a ChecksConfig,
    rng: &mut R,
) -> Trial<'a> {
    let mut algo = Greedy::new(students, trips, config, rng);
    algo.assign();
    let (assignments, ranks) = algo.into_parts();
    debug!(
        assigned = assignments.assigned_students().len(),
        unassigned = assignments.unassigned_students().len(),
        first_choice_percent = ranks.first_choice_percent(),
        "Trial done",
    );
    Trial {
        index,
        assignments,
        ranks,
    }
}

/// Run `trials` passes one after the other, each on fresh state and drawing
/// from the same random generator. `on_accept` is called with every trial
/// that improves on the first choice percentage of the previous ones.
pub fn run_trials<'a, R, F>(
    students: &'a [Student],
    trips: &'a [Trip],
    config: &'a ChecksConfig,
    trials: usize,
    rng: &mut R,
    mut on_accept: F,
) -> Incumbent<Trial<'a>>
where
    R: Rng + ?Sized,
    F: FnMut(&Trial<'a>),
{
    let mut incumbent = Incumbent::new();
    for index in 0..trials {
        let trial = run_trial(index, students, trips, config, &mut *rng);
        let score = trial.first_choice_percent();
        if incumbent.offer(index, score, trial) {
            info!(trial = index, first_choice_percent = score, "Trial accepted");
            if let Some(best) = incumbent.best() {
                on_accept(best);
            }
        } else {
            debug!(
                trial = index,
                first_choice_percent = score,
                best = incumbent.best_score(),
                "Trial discarded",
            );
        }
    }
    incumbent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::student::tests::student;
    use crate::model::trip::tests::trip;
    use crate::model::{Gender, TripId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_incumbent_strictly_improving() {
        let mut incumbent = Incumbent::new();
        let installed = [40.0, 40.0, 55.0, 30.0]
            .into_iter()
            .enumerate()
            .map(|(index, score)| incumbent.offer(index, score, format!("trial {index}")))
            .collect::<Vec<_>>();
        assert_eq!(installed, vec![true, false, true, false]);
        assert_eq!(incumbent.accepted(), &[0, 2]);
        assert_eq!(incumbent.best_score(), Some(55.0));
        assert_eq!(incumbent.into_best().as_deref(), Some("trial 2"));
    }

    #[test]
    fn test_incumbent_first_offer_always_installed() {
        let mut incumbent = Incumbent::new();
        assert!(incumbent.offer(0, 0.0, ()));
        assert!(!incumbent.offer(1, 0.0, ()));
        assert_eq!(incumbent.accepted(), &[0]);
    }

    #[test]
    fn test_empty_cohort() {
        let students: Vec<Student> = Vec::new();
        let trips = vec![trip(0, "A", 3), trip(1, "B", 3)];
        let config = ChecksConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = 0;
        let incumbent = run_trials(&students, &trips, &config, 10, &mut rng, |_| seen += 1);
        assert_eq!(seen, 1);
        assert_eq!(incumbent.accepted(), &[0]);
        let best = incumbent.into_best().unwrap();
        assert_eq!(best.first_choice_percent(), 0.0);
        assert!(best.assignments.assigned_students().is_empty());
        assert_eq!(best.assignments.remaining_capacity(TripId(0)), 3);
    }

    #[test]
    fn test_no_trips() {
        let students = vec![student(0, Gender::M, "Dana", "N", &["A"])];
        let trips: Vec<Trip> = Vec::new();
        let config = ChecksConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let best = run_trials(&students, &trips, &config, 3, &mut rng, |_| ())
            .into_best()
            .unwrap();
        assert_eq!(best.assignments.unassigned_students().len(), 1);
        assert_eq!(best.first_choice_percent(), 0.0);
    }

    #[test]
    fn test_zero_trials() {
        let config = ChecksConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let incumbent = run_trials(&[], &[], &config, 0, &mut rng, |_| ());
        assert!(incumbent.best().is_none());
    }

    #[test]
    fn test_accepted_trials_improve() {
        let students = (0..24)
            .map(|i| {
                student(
                    i,
                    if i % 2 == 0 { Gender::M } else { Gender::F },
                    &format!("Dorm{}", i % 6),
                    "N",
                    if i % 3 == 0 { &["A", "B"] } else { &["B", "A"] },
                )
            })
            .collect::<Vec<_>>();
        let trips = vec![trip(0, "A", 6), trip(1, "A", 6), trip(2, "B", 6), trip(3, "B", 6)];
        let config = ChecksConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut scores = Vec::new();
        let incumbent = run_trials(&students, &trips, &config, 10, &mut rng, |t| {
            scores.push((t.index, t.first_choice_percent()))
        });
        assert!(!scores.is_empty());
        assert_eq!(scores[0].0, 0);
        assert!(scores.windows(2).all(|w| w[0].1 < w[1].1));
        assert_eq!(
            incumbent.accepted(),
            scores.iter().map(|&(i, _)| i).collect::<Vec<_>>()
        );
        let best = incumbent.into_best().unwrap();
        assert_eq!(best.index, scores.last().unwrap().0);
        assert_eq!(best.ranks.total(), best.assignments.assigned_students().len());
    }
}
