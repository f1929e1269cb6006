pub mod bond;
pub mod equity;
