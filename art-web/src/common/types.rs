use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Lifecycle state of an asset, stored by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum AssetStatusEnum {
    Available,
    Allocated,
    Lost,
    Damaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString)]
pub enum LogTypeEnum {
    Checkin,
    Checkout,
}

/// Derived from the latest security-desk log of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckinStatusEnum {
    CheckedIn,
    CheckedOut,
}

impl From<LogTypeEnum> for CheckinStatusEnum {
    fn from(value: LogTypeEnum) -> Self {
        match value {
            LogTypeEnum::Checkin => CheckinStatusEnum::CheckedIn,
            LogTypeEnum::Checkout => CheckinStatusEnum::CheckedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString)]
pub enum IncidentTypeEnum {
    Loss,
    Damage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportTypeEnum {
    Bug,
    Feedback,
}

/// Error message for a value outside an enumerated set.
pub fn invalid_choice(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

/// Parses `value` as one of `E`'s variants.
pub fn parse_choice<E>(value: &str) -> Result<E, String>
where
    E: std::str::FromStr,
{
    value.parse::<E>().map_err(|_| invalid_choice(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_choices() {
        assert_eq!(AssetStatusEnum::Allocated.to_string(), "Allocated");
        assert_eq!(
            parse_choice::<AssetStatusEnum>("Damaged"),
            Ok(AssetStatusEnum::Damaged)
        );
        assert_eq!(
            parse_choice::<AssetStatusEnum>("Unused"),
            Err("\"Unused\" is not a valid choice.".to_string())
        );
    }

    #[test]
    fn checkin_status_names() {
        assert_eq!(
            CheckinStatusEnum::from(LogTypeEnum::Checkin).as_ref(),
            "checked_in"
        );
        assert_eq!(
            serde_json::to_value(CheckinStatusEnum::CheckedOut).unwrap(),
            serde_json::json!("checked_out")
        );
        assert_eq!(ReportTypeEnum::Bug.as_ref(), "bug");
    }
}
