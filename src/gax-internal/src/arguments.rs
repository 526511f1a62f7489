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

//! The arguments for a single operation call.

use gax::error::Error;
use serde_json::Value;
use std::collections::HashMap;

/// Maps parameter names to their values for one call.
///
/// The values are JSON values so path, query and header parameters of any
/// scalar type can be bound uniformly. A value of `null` is the same as an
/// absent value.
///
/// # Example
/// ```
/// # use datapipelines_gax_internal::arguments::Arguments;
/// let args = Arguments::new()
///     .set("pipelineName", "my-pipeline")
///     .set_opt("If-None-Match", None::<String>);
/// assert_eq!(args.get("pipelineName").and_then(|v| v.as_str()), Some("my-pipeline"));
/// assert!(args.get("If-None-Match").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<&'static str, Value>,
    body: Option<Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a path, query, or header parameter.
    pub fn set<V: Into<Value>>(mut self, name: &'static str, v: V) -> Self {
        match v.into() {
            Value::Null => {
                self.values.remove(name);
            }
            v => {
                self.values.insert(name, v);
            }
        };
        self
    }

    /// Sets the value of a parameter only if `v` contains a value.
    pub fn set_opt<V: Into<Value>>(self, name: &'static str, v: Option<V>) -> Self {
        match v {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Serializes `body` as the request body.
    pub fn with_body<T: serde::Serialize>(mut self, body: &T) -> gax::Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::ser)?);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub(crate) fn take_body(&mut self) -> Option<Value> {
        self.body.take()
    }
}
