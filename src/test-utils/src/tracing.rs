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

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// The environment variable used to override the default filter.
pub const FILTER_VAR: &str = "DATAPIPELINES_TEST_LOG";

/// Enables tracing for the current thread.
///
/// The filter comes from `DATAPIPELINES_TEST_LOG` if set, using the
/// `tracing_subscriber::EnvFilter` syntax. Otherwise only warnings are
/// printed, or `info` and above with the `log-integration-tests` feature.
pub fn enable_tracing() -> ::tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_env_filter(filter())
        .with_test_writer()
        .finish();
    ::tracing::subscriber::set_default(subscriber)
}

fn filter() -> EnvFilter {
    std::env::var(FILTER_VAR)
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive()))
}

fn default_directive() -> &'static str {
    if cfg!(feature = "log-integration-tests") {
        "info"
    } else {
        "warn"
    }
}
