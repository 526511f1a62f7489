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

//! Generate random pipeline names for tests.

use rand::{Rng, distr::Distribution};

/// A common prefix for randomly generated pipeline names.
pub const PREFIX: &str = "rust-sdk-testing-";

/// Pipeline names are limited to 260 characters, we use much shorter names.
const PIPELINE_NAME_LENGTH: usize = 48;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-";

/// Generate a random pipeline name.
///
/// # Example
/// ```
/// use datapipelines_test_utils::resource_names::{PREFIX, random_pipeline_name};
/// let got = random_pipeline_name();
/// assert!(got.starts_with(PREFIX));
/// ```
pub fn random_pipeline_name() -> String {
    let id = PipelineNameChars.random_string(PIPELINE_NAME_LENGTH - PREFIX.len());
    format!("{PREFIX}{id}")
}

/// Sample a `u8` from the characters valid in a pipeline name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineNameChars;

impl PipelineNameChars {
    /// Create a string with `n` characters from the character set.
    pub fn random_string(&self, n: usize) -> String {
        rand::rng()
            .sample_iter(self)
            .take(n)
            .map(char::from)
            .collect()
    }
}

impl Distribution<u8> for PipelineNameChars {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        CHARSET[rng.random_range(0..CHARSET.len())]
    }
}
