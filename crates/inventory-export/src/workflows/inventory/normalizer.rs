use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const GRADE_FALLBACK: &str = "N/A";
const YEAR_MONTH_FALLBACK: &str = "0/0";
// Rendered in MAKE_MODEL for a missing make or model.
const MISSING_NAME: &str = "None";

/// Scalar cell whose type follows whatever the upstream sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Text(flag.to_string())),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Some(Self::Integer(integer)),
                None => number.as_f64().map(Self::Float),
            },
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

/// One vehicle flattened onto the fixed export schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    #[serde(rename = "MAKE")]
    pub make: Option<String>,
    #[serde(rename = "MODEL")]
    pub model: Option<String>,
    #[serde(rename = "GRADE")]
    pub grade: String,
    #[serde(rename = "CHASSIS NO")]
    pub chassis_no: Option<String>,
    #[serde(rename = "STOCK_ID")]
    pub stock_id: Option<String>,
    #[serde(rename = "COLOUR")]
    pub colour: Option<String>,
    #[serde(rename = "IMAGE_URL")]
    pub image_url: String,
    #[serde(rename = "ENGINE CC")]
    pub engine_cc: Option<FieldValue>,
    #[serde(rename = "MILEAGE")]
    pub mileage: Option<FieldValue>,
    #[serde(rename = "YEAR/MONTH")]
    pub year_month: Option<i64>,
    #[serde(rename = "LOCATION")]
    pub location: Option<String>,
    #[serde(rename = "PRICE")]
    pub price: i64,
    #[serde(rename = "FEATURES")]
    pub features: Option<String>,
    #[serde(rename = "YEAR")]
    pub year: Option<i64>,
    #[serde(rename = "MAKE_MODEL")]
    pub make_model: String,
}

impl VehicleRecord {
    /// Whether each column holds a value, in export column order.
    pub fn column_presence(&self) -> [bool; 15] {
        [
            self.make.is_some(),
            self.model.is_some(),
            true,
            self.chassis_no.is_some(),
            self.stock_id.is_some(),
            self.colour.is_some(),
            true,
            self.engine_cc.is_some(),
            self.mileage.is_some(),
            self.year_month.is_some(),
            self.location.is_some(),
            true,
            self.features.is_some(),
            self.year.is_some(),
            true,
        ]
    }
}

/// Normalizes every mapping in `items`, dropping anything else.
pub(crate) fn normalize_items(items: &[Value]) -> Vec<VehicleRecord> {
    let records: Vec<VehicleRecord> = items.iter().filter_map(normalize_item).collect();
    let skipped = items.len() - records.len();
    if skipped > 0 {
        debug!(skipped, "ignored non-object inventory entries");
    }
    records
}

pub(crate) fn normalize_item(item: &Value) -> Option<VehicleRecord> {
    if !item.is_object() {
        return None;
    }

    let make = text_at(item, &["make", "name"]);
    let model = text_at(item, &["model", "name"]);
    let make_model = format!(
        "{} {}",
        make.as_deref().unwrap_or(MISSING_NAME),
        model.as_deref().unwrap_or(MISSING_NAME)
    );

    Some(VehicleRecord {
        grade: truthy(lookup(item, &["grade"]))
            .and_then(FieldValue::from_json)
            .map(|value| value.to_string())
            .unwrap_or_else(|| GRADE_FALLBACK.to_string()),
        chassis_no: truthy(lookup(item, &["chassis_no", "last_5_digits"]))
            .and_then(FieldValue::from_json)
            .map(|value| value.to_string()),
        stock_id: stock_id(lookup(item, &["slug"])),
        colour: text_at(item, &["specifications", "color"]),
        image_url: String::new(),
        engine_cc: lookup(item, &["specifications", "engine_cc"]).and_then(FieldValue::from_json),
        mileage: lookup(item, &["specifications", "mileage"]).and_then(FieldValue::from_json),
        year_month: parse_year_month(lookup(item, &["specifications", "year_with_month"])),
        location: text_at(item, &["location", "name"]),
        price: 0,
        features: join_features(lookup(item, &["features"])),
        year: parse_year(lookup(item, &["specifications", "year"])),
        make,
        model,
        make_model,
    })
}

/// Walks `path` through nested objects. Missing keys, nulls and non-object
/// intermediates all come back as `None`.
pub(crate) fn lookup<'a>(item: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(item, |current, key| current.as_object()?.get(*key))
        .filter(|value| !value.is_null())
}

fn text_at(item: &Value, path: &[&str]) -> Option<String> {
    lookup(item, path)
        .and_then(FieldValue::from_json)
        .map(|value| value.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| is_truthy(value))
}

fn join_features(features: Option<&Value>) -> Option<String> {
    let names: Vec<&str> = features?
        .as_array()?
        .iter()
        .filter_map(|entry| entry.as_object()?.get("name")?.as_str())
        .collect();
    let joined = names.join(", ");
    (!joined.is_empty()).then_some(joined)
}

/// `"2023/05"` becomes `202305`. Values without a `/` yield nothing; a
/// missing value falls back to `"0/0"` and so yields `0`.
fn parse_year_month(raw: Option<&Value>) -> Option<i64> {
    let raw = match truthy(raw) {
        Some(Value::String(text)) => text.as_str(),
        Some(_) => return None,
        None => YEAR_MONTH_FALLBACK,
    };

    if !raw.contains('/') {
        return None;
    }

    raw.replace('/', "").trim().parse().ok()
}

fn stock_id(slug: Option<&Value>) -> Option<String> {
    let slug = slug?.as_str().filter(|slug| !slug.is_empty())?;
    slug.rsplit('-').next().map(str::to_string)
}

fn parse_year(raw: Option<&Value>) -> Option<i64> {
    match truthy(raw)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|year| year.trunc() as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
