//! In-memory capture of operation boundary events
//!
//! Tests install one global recorder and query it by operation name or
//! stall. Field lookups go through the schema constants, so a renamed field
//! in the macros shows up here as a missing value.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use stallmap_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_EVENT,
    FIELD_OP, FIELD_STALL_ID,
};

/// One recorded event, with the boundary fields lifted out
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub stall_id: Option<i64>,
    pub duration_ms: Option<u64>,
    pub err_code: Option<String>,
    /// Every field as text, including the ones above
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: BTreeMap<String, String>) -> Self {
        let text = |key: &str| fields.get(key).cloned();
        Self {
            level,
            op: text(FIELD_OP),
            event: text(FIELD_EVENT),
            stall_id: fields.get(FIELD_STALL_ID).and_then(|v| v.parse().ok()),
            duration_ms: fields.get(FIELD_DURATION_MS).and_then(|v| v.parse().ok()),
            err_code: text(FIELD_ERR_CODE),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn is(&self, event: &str) -> bool {
        self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct TextFields(BTreeMap<String, String>);

impl Visit for TextFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct Recorder {
    buffer: Buffer,
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = TextFields::default();
        event.record(&mut fields);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), fields.0);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(captured);
        }
    }
}

/// Query handle over the shared event buffer
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Events for one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Events for one operation that carry the given stall
    pub fn events_for_stall(&self, op: &str, stall_id: i64) -> Vec<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .filter(|e| e.stall_id == Some(stall_id))
            .collect()
    }

    /// The first end or end-error event of `op`
    pub fn outcome(&self, op: &str) -> Option<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .find(|e| e.is(EVENT_END) || e.is(EVENT_END_ERROR))
    }

    /// Assert `op` logged a start and then a successful end with a duration
    ///
    /// # Panics
    ///
    /// Panics when either event is missing or the operation failed.
    pub fn assert_completed(&self, op: &str) {
        let events = self.events_for_op(op);
        assert!(
            events.iter().any(|e| e.is(EVENT_START)),
            "no start event for op={op}: {events:?}"
        );
        let outcome = self.outcome(op);
        assert!(
            matches!(&outcome, Some(e) if e.is(EVENT_END) && e.duration_ms.is_some()),
            "op={op} did not complete: {outcome:?}"
        );
    }

    /// Assert `op` ended with an error carrying `code`
    ///
    /// # Panics
    ///
    /// Panics when no matching end-error event was recorded.
    pub fn assert_failed(&self, op: &str, code: &str) {
        let failures: Vec<_> = self
            .events_for_op(op)
            .into_iter()
            .filter(|e| e.is(EVENT_END_ERROR))
            .collect();
        assert!(
            failures.iter().any(|e| e.err_code.as_deref() == Some(code)),
            "op={op} has no failure with {code}: {failures:?}"
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the recorder as the global subscriber and return its handle
///
/// Repeated calls return the same handle. Tests in one binary share the
/// buffer, so each test should use its own operation names or stall ids.
///
/// ```
/// use stallmap_core::logging_facility::test_capture::init_test_capture;
/// use stallmap_core::{log_op_end, log_op_start};
///
/// let capture = init_test_capture();
/// let started = log_op_start!("doc_example_op");
/// log_op_end!("doc_example_op", started);
/// capture.assert_completed("doc_example_op");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let buffer = Buffer::default();
            let recorder = Recorder {
                buffer: buffer.clone(),
            };
            tracing_subscriber::registry().with(recorder).try_init().ok();
            TestCapture { buffer }
        })
        .clone()
}
