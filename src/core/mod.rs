pub mod occupancy;
pub mod poisson;
pub mod reference;
pub mod sweep;
