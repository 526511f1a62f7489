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

//! Capture tracing spans emitted by the client libraries.
//!
//! The client libraries create one span per client method when tracing is
//! enabled. Tests use [TestLayer] to verify these spans are created, and
//! that they carry the expected fields.

use std::collections::HashMap;
use std::sync::{Mutex, Once};
use tracing::{Subscriber, field, span};
use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

/// The name of the span used to scope captures to a single test.
const SCOPE_SPAN: &str = "test_scope";

/// A span captured by [TestLayer].
#[derive(Clone, Debug)]
pub struct CapturedSpan {
    /// The span name, for instrumented functions this is the function name.
    pub name: String,
    /// The span target, typically the module path.
    pub target: String,
    /// The span fields, formatted with their `Debug` representation.
    pub fields: HashMap<String, String>,
    /// The number of events recorded while the span was entered.
    pub events: usize,
    id: span::Id,
    scope: Option<String>,
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl field::Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

static CAPTURED: Mutex<Vec<CapturedSpan>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

#[derive(Clone, Debug)]
struct Scope(String);

/// A [Layer] that records spans, grouped by test.
///
/// # Example
/// ```
/// use datapipelines_test_utils::test_layer::TestLayer;
/// let _guard = TestLayer::initialize("doc_example");
/// tracing::info_span!("list_pipelines", pipeline = "p1").in_scope(|| {});
/// let spans = TestLayer::capture("doc_example");
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].name, "list_pipelines");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TestLayer;

impl TestLayer {
    /// Installs the layer, and starts capturing spans for `scope`.
    ///
    /// The layer is installed as the global default subscriber the first
    /// time this is called. Spans are captured for `scope` while the
    /// returned guard is alive. Any spans previously captured for `scope` are
    /// discarded.
    pub fn initialize(scope: &'static str) -> span::EnteredSpan {
        INIT.call_once(|| {
            let subscriber = tracing_subscriber::registry().with(TestLayer);
            // Another test framework may have installed a global subscriber.
            let _ = tracing::subscriber::set_global_default(subscriber);
        });
        with_captured(|spans| spans.retain(|s| s.scope.as_deref() != Some(scope)));
        tracing::info_span!(SCOPE_SPAN, scope = scope).entered()
    }

    /// Returns and removes the spans captured for `scope`.
    pub fn capture(scope: &str) -> Vec<CapturedSpan> {
        with_captured(|spans| {
            let (taken, kept) = std::mem::take(spans)
                .into_iter()
                .partition(|s| s.scope.as_deref() == Some(scope) && s.name != SCOPE_SPAN);
            *spans = kept;
            taken
        })
    }
}

fn with_captured<F, T>(f: F) -> T
where
    F: FnOnce(&mut Vec<CapturedSpan>) -> T,
{
    let mut guard = CAPTURED.lock().unwrap_or_else(|e| e.into_inner());
    f(&mut guard)
}

impl<S> Layer<S> for TestLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        attrs.record(&mut FieldVisitor(&mut fields));
        let Some(span) = ctx.span(id) else {
            return;
        };
        let scope = if span.name() == SCOPE_SPAN {
            let scope = fields.get("scope").cloned();
            if let Some(s) = &scope {
                span.extensions_mut().insert(Scope(s.clone()));
            }
            scope
        } else {
            span.scope()
                .skip(1)
                .find_map(|parent| parent.extensions().get::<Scope>().map(|s| s.0.clone()))
        };
        with_captured(|spans| {
            spans.push(CapturedSpan {
                name: span.name().to_string(),
                target: span.metadata().target().to_string(),
                fields,
                events: 0,
                id: id.clone(),
                scope,
            })
        });
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, _ctx: Context<'_, S>) {
        with_captured(|spans| {
            if let Some(s) = spans.iter_mut().rev().find(|s| s.id == *id) {
                values.record(&mut FieldVisitor(&mut s.fields));
            }
        });
    }

    fn on_event(&self, _event: &tracing::Event<'_>, ctx: Context<'_, S>) {
        let Some(current) = ctx.lookup_current() else {
            return;
        };
        let id = current.id();
        with_captured(|spans| {
            if let Some(s) = spans.iter_mut().rev().find(|s| s.id == id) {
                s.events += 1;
            }
        });
    }
}
