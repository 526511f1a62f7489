// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serialization of query parameters.
//!
//! Query parameters are held as JSON values. Scalars become a single
//! `name=value` pair, arrays repeat the parameter name once per element, and
//! objects are flattened using `name.field` for each field. `null` values are
//! skipped.

use serde_json::Value;

/// Appends the query pairs for the parameter `name` with value `value`.
pub fn flatten(pairs: &mut Vec<(String, String)>, name: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((name.to_string(), s.clone())),
        Value::Number(n) => pairs.push((name.to_string(), n.to_string())),
        Value::Bool(b) => pairs.push((name.to_string(), b.to_string())),
        Value::Array(array) => array.iter().for_each(|v| flatten(pairs, name, v)),
        Value::Object(object) => object
            .iter()
            .for_each(|(k, v)| flatten(pairs, &format!("{name}.{k}"), v)),
    }
}
