use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::common::invalid_choice;

pub mod asset;
pub mod hierarchy;
pub mod history;
pub mod office;
pub mod report;
pub mod security_user;
pub mod specs;

/// Keeps an explicit `null` apart from an absent field.
pub(crate) fn double_option<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

pub(crate) fn choice_error(value: &str) -> ValidationError {
    ValidationError::new("choice").with_message(Cow::Owned(invalid_choice(value)))
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }
    Ok(())
}
