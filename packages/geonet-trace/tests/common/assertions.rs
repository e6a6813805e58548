//! Response assertions

use geonet_trace::shared::models::FeatureSet;
use serde_json::Value;

/// `(class_id, oids)` of every feature set
pub fn set_oids(sets: &[FeatureSet]) -> Vec<(i32, Vec<i32>)> {
    sets.iter().map(|set| (set.class_id, set.oids())).collect()
}

/// `(classId, OBJECTID values)` of every feature set under `key` in a JSON response
pub fn json_oids(response: &Value, key: &str) -> Vec<(i64, Vec<i64>)> {
    response[key]
        .as_array()
        .map(|sets| {
            sets.iter()
                .map(|set| {
                    let class_id = set["classId"].as_i64().unwrap_or(-1);
                    let oids = set["features"]
                        .as_array()
                        .map(|features| {
                            features
                                .iter()
                                .filter_map(|f| f["attributes"]["OBJECTID"].as_i64())
                                .collect()
                        })
                        .unwrap_or_default();
                    (class_id, oids)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Panic unless the response is an error with `message`
pub fn assert_error(response: &Value, message: &str) {
    assert_eq!(response["hasError"], Value::Bool(true), "expected an error response: {}", response);
    assert_eq!(response["errorDescription"].as_str(), Some(message), "response: {}", response);
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {} got {}", expected, actual);
}
