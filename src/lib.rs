pub mod autocorr;
pub mod chain;
pub mod error;
pub mod fss;
pub mod lattice;
pub mod resampling;
pub mod statistic;
