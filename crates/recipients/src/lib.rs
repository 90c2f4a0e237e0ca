//! People the kitchen serves and the people who run it.

pub mod recipient;
pub mod volunteer;

pub use recipient::{Recipient, SpecialNeeds};
pub use volunteer::Volunteer;
