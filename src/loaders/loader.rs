use crate::model::{Student, Trip};
use eyre::Error;

pub trait Loader {
    fn load(&mut self) -> Result<(Vec<Student>, Vec<Trip>), Error>;
}
