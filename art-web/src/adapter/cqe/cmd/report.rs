use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::{choice_error, not_blank};
use crate::common::{IncidentTypeEnum, ReportTypeEnum};

fn incident_choice(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<IncidentTypeEnum>()
        .map(|_| ())
        .map_err(|_| choice_error(value))
}

fn report_choice(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ReportTypeEnum>()
        .map(|_| ())
        .map_err(|_| choice_error(value))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IncidentReportCmd {
    #[validate(required(message = "This field is required."))]
    pub asset: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "incident_choice")
    )]
    pub incident_type: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub incident_location: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub incident_description: Option<String>,
    pub injuries_sustained: Option<String>,
    pub loss_of_property: Option<String>,
    pub witnesses: Option<String>,
    pub police_responded: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FeedbackCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub message: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "report_choice")
    )]
    pub report_type: Option<String>,
}
