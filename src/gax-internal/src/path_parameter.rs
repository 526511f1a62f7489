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

//! Binding of path parameters.
//!
//! Path templates use `{name}` placeholders. Each placeholder is replaced by
//! the percent-encoded value of the argument with the same name. Path
//! parameters are always required, a missing value is a binding error and is
//! detected before any request is sent.

use crate::arguments::Arguments;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

/// Encode everything except the RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("missing required parameter {0}")]
    MissingRequiredParameter(String),
    #[error("the path template {template} has an unterminated placeholder")]
    UnterminatedPlaceholder { template: String },
    #[error("the value for parameter {0} cannot be used in a path")]
    InvalidValue(String),
}

pub fn missing(name: &str) -> gax::error::Error {
    gax::error::Error::binding(Error::MissingRequiredParameter(name.to_string()))
}

/// Substitutes every `{name}` placeholder in `template` with its argument.
///
/// # Example
/// ```
/// # use datapipelines_gax_internal::arguments::Arguments;
/// # use datapipelines_gax_internal::path_parameter::expand;
/// let args = Arguments::new().set("pipelineName", "my pipeline");
/// let path = expand("/pipelines/{pipelineName}/rename", &args)?;
/// assert_eq!(path, "/pipelines/my%20pipeline/rename");
/// # gax::Result::<()>::Ok(())
/// ```
pub fn expand(template: &str, args: &Arguments) -> gax::Result<String> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        let (literal, tail) = rest.split_at(start);
        path.push_str(literal);
        let end = match (tail.starts_with('{'), tail.find('}')) {
            (true, Some(end)) => end,
            _ => return Err(unterminated(template)),
        };
        let name = &tail[1..end];
        if name.is_empty() || name.contains('{') {
            return Err(unterminated(template));
        }
        path.push_str(&segment(name, args.get(name))?);
        rest = &tail[end + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

fn segment(name: &str, value: Option<&Value>) -> gax::Result<String> {
    let raw = match value {
        None | Some(Value::Null) => return Err(missing(name)),
        Some(Value::String(s)) if s.is_empty() => return Err(missing(name)),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            return Err(gax::error::Error::binding(Error::InvalidValue(
                name.to_string(),
            )));
        }
    };
    Ok(utf8_percent_encode(&raw, PATH_SEGMENT).to_string())
}

fn unterminated(template: &str) -> gax::error::Error {
    gax::error::Error::binding(Error::UnterminatedPlaceholder {
        template: template.to_string(),
    })
}
