use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("expected a json object")]
    NotAnObject,
    #[error("convert error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Copies the fields `source` and `D` share into a new `D`.
///
/// Fields are matched by name in snake_case or camelCase. Fields missing in
/// the source keep the value of `D::default()`, and scalar values are coerced
/// to the destination field's json type where possible.
pub fn copy<S, D>(source: &S) -> Result<D, ConvertError>
where
    S: Serialize,
    D: DeserializeOwned + Serialize + Default,
{
    let value = serde_json::to_value(source)?;
    let type_map = type_map::<D>()?;
    let converted = convert_value(value, type_map)?;
    Ok(serde_json::from_value(converted)?)
}

fn type_map<D>() -> Result<HashMap<String, Value>, ConvertError>
where
    D: Serialize + Default,
{
    let Value::Object(obj) = serde_json::to_value(D::default())? else {
        return Err(ConvertError::NotAnObject);
    };
    Ok(obj.into_iter().collect())
}

fn convert_value(value: Value, type_map: HashMap<String, Value>) -> Result<Value, ConvertError> {
    let Value::Object(obj) = value else {
        return Err(ConvertError::NotAnObject);
    };
    let mut new_map = Map::with_capacity(type_map.len());
    for (key, ty) in type_map {
        let found = obj
            .get(&key)
            .or_else(|| obj.get(&snake_to_camel(&key)))
            .or_else(|| obj.get(&camel_to_snake(&key)));
        let value = match found {
            None => ty,
            Some(v) => convert_single_value(v, &ty),
        };
        new_map.insert(key, value);
    }
    Ok(Value::Object(new_map))
}

fn convert_single_value(value: &Value, field_type: &Value) -> Value {
    // null keeps whatever the destination defaults to (Option -> null)
    if value.is_null() {
        return field_type.to_owned();
    }
    match field_type {
        Value::String(_) => match value {
            Value::String(_) => value.clone(),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            _ => Value::String(String::new()),
        },
        Value::Number(_) => match value {
            Value::Number(_) => value.clone(),
            Value::String(s) => serde_json::Number::from_str(s.trim())
                .map(Value::Number)
                .unwrap_or_else(|_| field_type.to_owned()),
            _ => field_type.to_owned(),
        },
        Value::Bool(_) => match value {
            Value::Bool(_) => value.clone(),
            Value::String(s) => Value::Bool(matches!(s.as_str(), "true" | "1")),
            Value::Number(n) => Value::Bool(n.as_i64().is_some_and(|n| n != 0)),
            _ => Value::Bool(false),
        },
        _ => value.clone(),
    }
}

pub fn camel_to_snake(input: &str) -> String {
    let mut snake_case = String::with_capacity(input.len() + 4);
    for (i, c) in input.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                snake_case.push('_');
            }
            snake_case.extend(c.to_lowercase());
        } else {
            snake_case.push(c);
        }
    }
    snake_case
}

pub fn snake_to_camel(input: &str) -> String {
    let mut camel_case = String::with_capacity(input.len());
    let mut uppercase_next = false;
    for c in input.chars() {
        if c == '_' {
            uppercase_next = true;
        } else if uppercase_next {
            camel_case.extend(c.to_uppercase());
            uppercase_next = false;
        } else {
            camel_case.push(c);
        }
    }
    camel_case
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize)]
    struct SpecsCmd {
        #[serde(rename = "screenSize")]
        screen_size: Option<i32>,
        storage: String,
        memory: Option<i32>,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct SpecsRow {
        id: i32,
        screen_size: Option<i32>,
        storage: i32,
        memory: Option<i32>,
        processor_type: Option<String>,
    }

    #[test]
    fn copy_matches_camel_and_coerces_scalars() {
        let cmd = SpecsCmd {
            screen_size: Some(15),
            storage: "512".to_string(),
            memory: None,
        };
        let row: SpecsRow = copy(&cmd).unwrap();
        assert_eq!(
            row,
            SpecsRow {
                id: 0,
                screen_size: Some(15),
                storage: 512,
                memory: None,
                processor_type: None,
            }
        );
    }

    #[test]
    fn copy_rejects_non_objects() {
        assert!(matches!(
            copy::<_, SpecsRow>(&vec![1, 2]),
            Err(ConvertError::NotAnObject)
        ));
    }

    #[test]
    fn case_helpers() {
        assert_eq!(camel_to_snake("subCategoryName"), "sub_category_name");
        assert_eq!(snake_to_camel("sub_category_name"), "subCategoryName");
    }
}
