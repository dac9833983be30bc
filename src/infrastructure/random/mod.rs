mod rand_source;

pub use rand_source::{FixedRandom, SeededRandom, ThreadRandom};
