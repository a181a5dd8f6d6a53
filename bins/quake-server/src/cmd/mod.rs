pub mod lookup;
pub mod serve;
