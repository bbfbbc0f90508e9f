use crate::model::Assignments;
use crate::stats::RankHistogram;

pub trait Algo<'a> {
    /// Run a full assignment pass over fresh trial state.
    fn assign(&mut self);
    fn into_parts(self) -> (Assignments<'a>, RankHistogram);
}
