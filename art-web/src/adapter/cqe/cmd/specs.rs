use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::choice_error;
use crate::repo::model::asset_specs::{
    valid_speed, valid_year, MEMORY_SIZES, PROCESSOR_TYPES, SCREEN_SIZES, STORAGE_SIZES,
};

fn year_choice(value: i32) -> Result<(), ValidationError> {
    if valid_year(value) {
        Ok(())
    } else {
        Err(choice_error(&value.to_string()))
    }
}

fn speed_choice(value: f64) -> Result<(), ValidationError> {
    if valid_speed(value) {
        Ok(())
    } else {
        Err(choice_error(&value.to_string()))
    }
}

fn screen_choice(value: i32) -> Result<(), ValidationError> {
    one_of(value, &SCREEN_SIZES)
}

fn storage_choice(value: i32) -> Result<(), ValidationError> {
    one_of(value, &STORAGE_SIZES)
}

fn memory_choice(value: i32) -> Result<(), ValidationError> {
    one_of(value, &MEMORY_SIZES)
}

fn one_of(value: i32, allowed: &[i32]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(choice_error(&value.to_string()))
    }
}

fn processor_choice(value: &str) -> Result<(), ValidationError> {
    if PROCESSOR_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(choice_error(value))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssetSpecsCmd {
    #[validate(custom(function = "year_choice"))]
    pub year_of_manufacture: Option<i32>,
    #[validate(custom(function = "speed_choice"))]
    pub processor_speed: Option<f64>,
    #[validate(custom(function = "screen_choice"))]
    pub screen_size: Option<i32>,
    #[validate(custom(function = "processor_choice"))]
    pub processor_type: Option<String>,
    #[validate(custom(function = "storage_choice"))]
    pub storage: Option<i32>,
    #[validate(custom(function = "memory_choice"))]
    pub memory: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_checked_per_field() {
        let cmd = AssetSpecsCmd {
            screen_size: Some(14),
            processor_type: Some("Intel core i7".to_string()),
            memory: Some(8),
            ..Default::default()
        };
        let err = cmd.validate().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("screen_size"));
        assert!(!fields.contains_key("processor_type"));
        assert!(!fields.contains_key("memory"));
    }
}
