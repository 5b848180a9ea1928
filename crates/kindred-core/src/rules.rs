//! Front-door validation rules
//!
//! The storage engine is the authority for every constraint listed here.
//! These checks let the CLI and the seed parser reject bad input before a
//! transaction is opened, with a message that names the offending field.

pub mod validation;

pub use validation::{
    validate_mood_score, validate_new_comment, validate_new_post, validate_new_resource,
    validate_new_user,
};
