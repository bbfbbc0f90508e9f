pub use self::algo::Algo;
pub use self::greedy::Greedy;

mod algo;
mod greedy;
