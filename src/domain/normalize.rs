//! Field normalizer for the Tour aggregate.
//!
//! Admin clients submit nested Tour data in three physical encodings, often
//! mixed inside one multipart request: a JSON document serialized into a
//! single text field, flat bracket-indexed keys (`gallery[2][image]`), or
//! already-structured values when the body is JSON. The functions here fold
//! all of them into one canonical shape.
//!
//! Every function in this module is total over its input: a value that
//! fails to decode degrades to a documented fallback instead of erroring.
//! Required-field validation is the caller's job.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Raw request fields: form key → value. Multipart text fields arrive as
/// strings; JSON bodies contribute structured values directly.
pub type FieldMap = Map<String, Value>;

/// Uploaded-asset URLs keyed by their original field path, e.g.
/// `gallery[2][image]` → hosted URL.
pub type UploadMap = HashMap<String, String>;

type JsonMap = Map<String, Value>;

// Bracket keys tolerate quoted sub-field names (`gallery[0]['image']`),
// which some form serializers emit.
#[allow(clippy::unwrap_used)]
static GALLERY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^gallery\[(\d+)\]\[(?:'|")?(\w+)(?:'|")?\]$"#).unwrap());
#[allow(clippy::unwrap_used)]
static GALLERY_IMAGE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gallery\[(\d+)\]\[image\]$").unwrap());
#[allow(clippy::unwrap_used)]
static SCHEDULE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^schedule\[(\d+)\]\[(?:'|")?(\w+)(?:'|")?\]$"#).unwrap());
#[allow(clippy::unwrap_used)]
static SCHEDULE_IMAGE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^schedule\[(\d+)\]\[dayImage\]$").unwrap());

/// Whether a form key addresses a gallery entry's image slot, e.g.
/// `gallery[2][image]`.
#[must_use]
pub fn is_gallery_image_key(key: &str) -> bool {
    GALLERY_IMAGE_KEY.is_match(key)
}

/// Whether a form key addresses a schedule entry's day image slot, e.g.
/// `schedule[0][dayImage]`.
#[must_use]
pub fn is_schedule_image_key(key: &str) -> bool {
    SCHEDULE_IMAGE_KEY.is_match(key)
}

/// How a logical array field physically arrived in the request.
#[derive(Debug, Clone)]
pub enum Encoding {
    /// A JSON document serialized into a single text field.
    Json(String),
    /// Flat `field[index][sub]` keys spread across the form.
    BracketIndexed(Vec<BracketEntry>),
    /// Already-structured data, as sent by JSON request bodies.
    Structured(Value),
}

/// One flat bracket-indexed key occurrence.
#[derive(Debug, Clone)]
pub struct BracketEntry {
    /// Zero-based slot index from the key.
    pub index: usize,
    /// Sub-field name inside the second bracket pair.
    pub sub: String,
    /// Raw field value.
    pub value: Value,
    /// The original form key, used to match uploaded assets.
    pub key: String,
}

impl Encoding {
    /// Classifies the direct value of a field: textual values are treated
    /// as candidate JSON, everything else is already structured.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Json(text.clone()),
            other => Self::Structured(other.clone()),
        }
    }

    /// Collects every key in `fields` matching `key_pattern` into the
    /// bracket-indexed arm.
    #[must_use]
    pub fn from_bracket_keys(fields: &FieldMap, key_pattern: &Regex) -> Self {
        let mut entries = Vec::new();
        for (key, value) in fields {
            if let Some(caps) = key_pattern.captures(key)
                && let Some(index) = caps.get(1).and_then(|m| m.as_str().parse().ok())
                && let Some(sub) = caps.get(2)
            {
                entries.push(BracketEntry {
                    index,
                    sub: sub.as_str().to_string(),
                    value: value.clone(),
                    key: key.clone(),
                });
            }
        }
        Self::BracketIndexed(entries)
    }

    /// Decodes into a single structured value.
    ///
    /// The `Json` arm is lenient: a failed parse yields the original text
    /// back, never an error. Bracket entries fold into an array of objects
    /// with sparse slots dropped.
    #[must_use]
    pub fn decode(self) -> Value {
        match self {
            Self::Json(text) => {
                serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
            }
            Self::Structured(value) => value,
            Self::BracketIndexed(entries) => {
                let mut rows: BTreeMap<usize, JsonMap> = BTreeMap::new();
                for entry in entries {
                    rows.entry(entry.index).or_default().insert(entry.sub, entry.value);
                }
                Value::Array(rows.into_values().map(Value::Object).collect())
            }
        }
    }

    fn into_entries(self) -> Vec<BracketEntry> {
        match self {
            Self::BracketIndexed(entries) => entries,
            _ => Vec::new(),
        }
    }
}

/// Canonical nested structures extracted from a raw payload.
///
/// `None` means the request did not touch that field class at all; callers
/// decide whether that maps to an empty list (create) or "retain stored
/// value" (update).
#[derive(Debug, Clone, Default)]
pub struct NormalizedFields {
    /// Packages with their sharing tiers decoded.
    pub packages: Option<Value>,
    /// Merged gallery entries.
    pub gallery: Option<Vec<Value>>,
    /// Merged and normalized schedule entries.
    pub schedule: Option<Vec<Value>>,
    /// Places list, run through the leniency ladder.
    pub places_to_be_visited: Option<Vec<String>>,
    /// Recommendation sections, lenient-decoded.
    pub recommended: Option<Value>,
    /// Track activity sections, lenient-decoded.
    pub track_activity: Option<Value>,
    /// Raw available-dates value; date parsing happens in the service
    /// layer where a malformed date is a validation failure.
    pub available_dates: Option<Value>,
}

/// Normalizes all variadic Tour fields out of a raw payload.
///
/// `gallery_uploads` and `schedule_uploads` map original field paths of
/// freshly uploaded files to their hosted URLs; they are overlaid onto the
/// merged entries as a final pass and always win over client-provided
/// image values at the same index.
#[must_use]
pub fn normalize_fields(
    fields: &FieldMap,
    gallery_uploads: &UploadMap,
    schedule_uploads: &UploadMap,
) -> NormalizedFields {
    NormalizedFields {
        packages: supplied(fields, "packages").map(|v| normalize_packages(Encoding::of(v).decode())),
        gallery: normalize_gallery(fields, gallery_uploads),
        schedule: normalize_schedule(fields, schedule_uploads),
        places_to_be_visited: supplied(fields, "placesToBeVisited")
            .map(|v| normalize_places(&Encoding::of(v).decode())),
        recommended: supplied(fields, "recommended").map(|v| Encoding::of(v).decode()),
        track_activity: supplied(fields, "trackActivity").map(|v| Encoding::of(v).decode()),
        available_dates: supplied(fields, "availableDates").map(|v| Encoding::of(v).decode()),
    }
}

/// Returns the field value only when it carries something usable: empty
/// strings and nulls count as absent.
fn supplied<'a>(fields: &'a FieldMap, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| is_supplied(v))
}

fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        Value::Bool(flag) => *flag,
        _ => true,
    }
}

/// `None`, empty string → absent for per-entry sub-fields. Unlike
/// [`is_supplied`], numeric zero and `false` are meaningful here.
fn is_meaningful(value: &Value) -> bool {
    !matches!(value, Value::Null) && !matches!(value, Value::String(s) if s.is_empty())
}

/// Decodes each package's nested sharing tiers. A textual `sharingTypes`
/// is independently JSON-decoded; an absent one becomes an empty list.
fn normalize_packages(decoded: Value) -> Value {
    match decoded {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(mut package) => {
                        let tiers = match package.remove("sharingTypes") {
                            Some(raw) if is_supplied(&raw) => Encoding::of(&raw).decode(),
                            _ => Value::Array(Vec::new()),
                        };
                        package.insert("sharingTypes".to_string(), tiers);
                        Value::Object(package)
                    }
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Normalizes `placesToBeVisited` to a list of strings.
///
/// Leniency ladder, in order: absent → empty; textual JSON → decoded;
/// non-JSON text → single-element list; a single-element array whose item
/// is itself a JSON array string → that inner array; plain arrays →
/// stringified with empties dropped; objects → their values.
#[must_use]
pub fn normalize_places(input: &Value) -> Vec<String> {
    let value = match input {
        Value::Null => return Vec::new(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => parsed,
            Err(_) => {
                return if text.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![text.clone()]
                };
            }
        },
        other => other.clone(),
    };

    match value {
        Value::Array(items) => {
            if let [Value::String(first)] = items.as_slice()
                && first.trim().starts_with('[')
                && let Ok(Value::Array(inner)) = serde_json::from_str::<Value>(first)
            {
                return inner.iter().map(value_to_string).collect();
            }
            items
                .iter()
                .map(value_to_string)
                .filter(|s| !s.is_empty())
                .collect()
        }
        Value::Object(map) => map
            .values()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Merges the gallery's two physical encodings into one entry list.
///
/// Flat-key entries are compacted first (index gaps dropped), then merged
/// position-wise over a JSON-provided array with flat keys winning
/// per-field; freshly uploaded images are overlaid last by their original
/// index. Returns `None` when the request carried no gallery data at all.
fn normalize_gallery(fields: &FieldMap, uploads: &UploadMap) -> Option<Vec<Value>> {
    let json_value = supplied(fields, "gallery").map(|v| Encoding::of(v).decode());
    let bracket = Encoding::from_bracket_keys(fields, &GALLERY_KEY).into_entries();

    if json_value.is_none() && bracket.is_empty() && uploads.is_empty() {
        return None;
    }

    let mut rows: BTreeMap<usize, JsonMap> = BTreeMap::new();
    for entry in &bracket {
        let row = rows.entry(entry.index).or_default();
        if entry.sub == "image" {
            // A URL-shaped string is the client re-submitting an existing
            // asset; anything else only lands if a matching upload exists.
            if let Value::String(text) = &entry.value
                && text.starts_with("http")
            {
                row.insert("image".to_string(), entry.value.clone());
            } else if let Some(url) = uploads.get(&entry.key) {
                row.insert("image".to_string(), Value::String(url.clone()));
            }
        } else {
            row.insert(entry.sub.clone(), entry.value.clone());
        }
    }
    overlay_uploads(&mut rows, uploads, &GALLERY_IMAGE_KEY, "image");

    let from_fields: Vec<JsonMap> = rows
        .into_values()
        .map(|row| collapse_list_field(row, "image"))
        .collect();

    let entries = match json_value {
        Some(Value::Array(json_items)) => {
            let mut merged: BTreeMap<usize, JsonMap> = BTreeMap::new();
            let len = json_items.len().max(from_fields.len());
            for i in 0..len {
                let mut row = match json_items.get(i) {
                    Some(Value::Object(map)) => map.clone(),
                    _ => JsonMap::new(),
                };
                if let Some(winner) = from_fields.get(i) {
                    row.extend(winner.clone());
                }
                merged.insert(i, row);
            }
            overlay_uploads(&mut merged, uploads, &GALLERY_IMAGE_KEY, "image");
            merged
                .into_values()
                .map(|row| collapse_list_field(row, "image"))
                .collect()
        }
        _ => from_fields,
    };

    Some(entries.into_iter().map(Value::Object).collect())
}

/// Merges the schedule's two physical encodings over
/// `{day, title, desc, dayImage}` and normalizes each entry.
///
/// `day` is numeric-parsed with the original text retained on failure;
/// `dayImage` collapses list values to their first element; empty-string
/// sub-fields are dropped.
fn normalize_schedule(fields: &FieldMap, uploads: &UploadMap) -> Option<Vec<Value>> {
    let json_value = supplied(fields, "schedule").map(|v| Encoding::of(v).decode());
    let bracket = Encoding::from_bracket_keys(fields, &SCHEDULE_KEY).into_entries();

    if json_value.is_none() && bracket.is_empty() && uploads.is_empty() {
        return None;
    }

    let mut rows: BTreeMap<usize, JsonMap> = BTreeMap::new();
    if let Some(Value::Array(items)) = &json_value {
        for (i, item) in items.iter().enumerate() {
            let row = rows.entry(i).or_default();
            if let Value::Object(map) = item {
                for sub in ["day", "title", "desc", "dayImage"] {
                    if let Some(value) = map.get(sub) {
                        row.insert(sub.to_string(), value.clone());
                    }
                }
            }
        }
    }

    for entry in &bracket {
        let row = rows.entry(entry.index).or_default();
        if entry.sub == "dayImage" {
            if let Value::String(text) = &entry.value
                && text.starts_with("http")
            {
                row.insert("dayImage".to_string(), entry.value.clone());
            } else if let Some(url) = uploads.get(&entry.key) {
                row.insert("dayImage".to_string(), Value::String(url.clone()));
            } else if is_supplied(&entry.value) {
                row.insert("dayImage".to_string(), entry.value.clone());
            }
        } else if matches!(entry.sub.as_str(), "day" | "title" | "desc") {
            row.insert(entry.sub.clone(), entry.value.clone());
        }
    }
    overlay_uploads(&mut rows, uploads, &SCHEDULE_IMAGE_KEY, "dayImage");

    Some(
        rows.into_values()
            .map(|row| Value::Object(normalize_schedule_entry(row)))
            .collect(),
    )
}

fn normalize_schedule_entry(row: JsonMap) -> JsonMap {
    let mut out = JsonMap::new();

    if let Some(day) = row.get("day").filter(|v| is_meaningful(v)) {
        let normalized = match day {
            Value::String(text) => parse_day_number(text).unwrap_or_else(|| day.clone()),
            other => other.clone(),
        };
        out.insert("day".to_string(), normalized);
    }

    for sub in ["title", "desc"] {
        if let Some(value) = row.get(sub).filter(|v| is_meaningful(v)) {
            out.insert(sub.to_string(), value.clone());
        }
    }

    if let Some(image) = row.get("dayImage").filter(|v| is_meaningful(v)) {
        match image {
            Value::Array(items) => {
                if let Some(first) = items.first() {
                    out.insert("dayImage".to_string(), first.clone());
                }
            }
            other => {
                out.insert("dayImage".to_string(), other.clone());
            }
        }
    }

    out
}

/// Parses a textual day number; returns `None` when the text is not
/// numeric so the caller can retain the original value.
fn parse_day_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Some(Value::from(whole));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

/// Final overlay pass: an uploaded asset always overrides any
/// client-provided value in the same slot.
fn overlay_uploads(
    rows: &mut BTreeMap<usize, JsonMap>,
    uploads: &UploadMap,
    key_pattern: &Regex,
    sub: &str,
) {
    for (key, url) in uploads {
        if let Some(caps) = key_pattern.captures(key)
            && let Some(index) = caps.get(1).and_then(|m| m.as_str().parse().ok())
        {
            rows.entry(index)
                .or_default()
                .insert(sub.to_string(), Value::String(url.clone()));
        }
    }
}

fn collapse_list_field(mut row: JsonMap, key: &str) -> JsonMap {
    if let Some(Value::Array(items)) = row.get(key) {
        match items.first().cloned() {
            Some(first) => {
                row.insert(key.to_string(), first);
            }
            None => {
                row.remove(key);
            }
        }
    }
    row
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fields must be an object"),
        }
    }

    fn no_uploads() -> UploadMap {
        UploadMap::new()
    }

    #[test]
    fn untouched_payload_normalizes_to_absent() {
        let raw = fields(json!({ "title": "Valley Trek" }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert!(out.packages.is_none());
        assert!(out.gallery.is_none());
        assert!(out.schedule.is_none());
        assert!(out.places_to_be_visited.is_none());
        assert!(out.recommended.is_none());
        assert!(out.available_dates.is_none());
    }

    #[test]
    fn empty_string_field_counts_as_absent() {
        let raw = fields(json!({ "packages": "" }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert!(out.packages.is_none());
    }

    #[test]
    fn packages_decode_from_json_text() {
        let raw = fields(json!({
            "packages": r#"[{"from":"Delhi","price":1000,"sharingTypes":[{"type":"tent","twoSharing":1200}]}]"#
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        let packages = out.packages.unwrap();
        assert_eq!(
            packages,
            json!([{"from":"Delhi","price":1000,"sharingTypes":[{"type":"tent","twoSharing":1200}]}])
        );
    }

    #[test]
    fn textual_sharing_tiers_decode_independently() {
        let raw = fields(json!({
            "packages": [{"from": "Manali", "price": 900,
                          "sharingTypes": "[{\"type\":\"room\",\"twoSharing\":1100}]"}]
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        let packages = out.packages.unwrap();
        assert_eq!(
            packages.pointer("/0/sharingTypes"),
            Some(&json!([{"type":"room","twoSharing":1100}]))
        );
    }

    #[test]
    fn absent_sharing_tiers_become_empty_list() {
        let raw = fields(json!({ "packages": [{"from": "Leh", "price": 2000}] }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(out.packages.unwrap().pointer("/0/sharingTypes"), Some(&json!([])));
    }

    #[test]
    fn malformed_packages_json_degrades_to_raw_text() {
        let raw = fields(json!({ "packages": "{not json" }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(out.packages.unwrap(), json!("{not json"));
    }

    #[test]
    fn places_plain_text_becomes_single_element_list() {
        assert_eq!(normalize_places(&json!("Rohtang Pass")), vec!["Rohtang Pass"]);
    }

    #[test]
    fn places_blank_text_becomes_empty() {
        assert_eq!(normalize_places(&json!("   ")), Vec::<String>::new());
        assert_eq!(normalize_places(&Value::Null), Vec::<String>::new());
    }

    #[test]
    fn places_json_array_text_decodes() {
        assert_eq!(
            normalize_places(&json!(r#"["Solang","Sissu"]"#)),
            vec!["Solang", "Sissu"]
        );
    }

    #[test]
    fn places_single_element_array_of_json_text_unwraps() {
        assert_eq!(
            normalize_places(&json!([r#"["Solang","Sissu"]"#])),
            vec!["Solang", "Sissu"]
        );
    }

    #[test]
    fn places_array_drops_nulls_and_stringifies() {
        assert_eq!(
            normalize_places(&json!(["Solang", null, 42])),
            vec!["Solang", "42"]
        );
    }

    #[test]
    fn gallery_flat_keys_with_resubmitted_url() {
        let raw = fields(json!({
            "gallery[0][image]": "https://assets.example/a.jpg",
            "gallery[0][title]": "Summit",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.gallery.unwrap(),
            json!([{"image": "https://assets.example/a.jpg", "title": "Summit"}]).as_array().unwrap().clone()
        );
    }

    #[test]
    fn gallery_flat_non_url_image_without_upload_is_dropped() {
        let raw = fields(json!({
            "gallery[0][image]": "placeholder.jpg",
            "gallery[0][title]": "Summit",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(out.gallery.unwrap(), vec![json!({"title": "Summit"})]);
    }

    #[test]
    fn gallery_index_gaps_are_compacted() {
        let raw = fields(json!({
            "gallery[0][title]": "First",
            "gallery[2][title]": "Third",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.gallery.unwrap(),
            vec![json!({"title": "First"}), json!({"title": "Third"})]
        );
    }

    #[test]
    fn gallery_flat_keys_override_json_but_json_fields_survive() {
        let raw = fields(json!({
            "gallery": r#"[{"image":"https://assets.example/old.jpg","title":"Original"}]"#,
            "gallery[0][title]": "Replaced",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.gallery.unwrap(),
            vec![json!({"image": "https://assets.example/old.jpg", "title": "Replaced"})]
        );
    }

    #[test]
    fn uploaded_gallery_image_overrides_json_image() {
        let raw = fields(json!({
            "gallery": [{"image": "https://assets.example/old.jpg", "title": "Keep me"}],
        }));
        let mut uploads = UploadMap::new();
        uploads.insert(
            "gallery[0][image]".to_string(),
            "https://assets.example/new.jpg".to_string(),
        );
        let out = normalize_fields(&raw, &uploads, &no_uploads());
        assert_eq!(
            out.gallery.unwrap(),
            vec![json!({"image": "https://assets.example/new.jpg", "title": "Keep me"})]
        );
    }

    #[test]
    fn uploads_alone_make_the_gallery_supplied() {
        let raw = fields(json!({}));
        let mut uploads = UploadMap::new();
        uploads.insert(
            "gallery[1][image]".to_string(),
            "https://assets.example/b.jpg".to_string(),
        );
        let out = normalize_fields(&raw, &uploads, &no_uploads());
        assert_eq!(
            out.gallery.unwrap(),
            vec![json!({"image": "https://assets.example/b.jpg"})]
        );
    }

    #[test]
    fn gallery_list_valued_image_collapses_to_first() {
        let raw = fields(json!({
            "gallery": [{"image": ["https://assets.example/a.jpg", "https://assets.example/b.jpg"]}],
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.gallery.unwrap(),
            vec![json!({"image": "https://assets.example/a.jpg"})]
        );
    }

    #[test]
    fn schedule_textual_day_parses_to_number() {
        let raw = fields(json!({
            "schedule[0][day]": "2",
            "schedule[0][title]": "Acclimatization",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.schedule.unwrap(),
            vec![json!({"day": 2, "title": "Acclimatization"})]
        );
    }

    #[test]
    fn schedule_non_numeric_day_is_retained_verbatim() {
        let raw = fields(json!({ "schedule[0][day]": "Day One" }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(out.schedule.unwrap(), vec![json!({"day": "Day One"})]);
    }

    #[test]
    fn schedule_merges_json_and_flat_keys() {
        let raw = fields(json!({
            "schedule": r#"[{"day":1,"title":"Arrival","desc":"Reach base"}]"#,
            "schedule[0][title]": "Arrival day",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.schedule.unwrap(),
            vec![json!({"day": 1, "title": "Arrival day", "desc": "Reach base"})]
        );
    }

    #[test]
    fn uploaded_day_image_overrides_resubmitted_url() {
        let raw = fields(json!({
            "schedule[0][day]": "1",
            "schedule[0][dayImage]": "https://assets.example/old.jpg",
        }));
        let mut uploads = UploadMap::new();
        uploads.insert(
            "schedule[0][dayImage]".to_string(),
            "https://assets.example/new.jpg".to_string(),
        );
        let out = normalize_fields(&raw, &no_uploads(), &uploads);
        assert_eq!(
            out.schedule.unwrap(),
            vec![json!({"day": 1, "dayImage": "https://assets.example/new.jpg"})]
        );
    }

    #[test]
    fn schedule_drops_empty_string_fields() {
        let raw = fields(json!({
            "schedule[0][day]": "3",
            "schedule[0][title]": "",
            "schedule[0][desc]": "Ridge walk",
        }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(
            out.schedule.unwrap(),
            vec![json!({"day": 3, "desc": "Ridge walk"})]
        );
    }

    #[test]
    fn bracket_arm_decodes_to_compacted_object_rows() {
        let raw = fields(json!({
            "gallery[0][title]": "A",
            "gallery[3][title]": "B",
        }));
        let decoded = Encoding::from_bracket_keys(&raw, &GALLERY_KEY).decode();
        assert_eq!(decoded, json!([{"title": "A"}, {"title": "B"}]));
    }

    #[test]
    fn structured_values_pass_through_unchanged() {
        let value = json!([{"title": "Top picks", "points": ["boots"]}]);
        assert_eq!(Encoding::of(&value).decode(), value);
    }

    #[test]
    fn available_dates_pass_through_decoded() {
        let raw = fields(json!({ "availableDates": r#"["2026-09-01","2026-10-01"]"# }));
        let out = normalize_fields(&raw, &no_uploads(), &no_uploads());
        assert_eq!(out.available_dates.unwrap(), json!(["2026-09-01", "2026-10-01"]));
    }
}
