pub use self::assignments::Assignments;
pub use self::student::{Gender, Student, StudentId};
pub use self::trip::{Trip, TripId, TripState};

mod assignments;
pub mod student;
pub mod trip;
