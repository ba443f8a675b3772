// User identity value objects

pub mod value_objects;

pub use value_objects::{Email, UserId};
