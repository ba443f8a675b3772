// Lead domain module

pub mod lead;

pub use lead::{Lead, LeadGroup};
