//! Logging bootstrap
//!
//! Two sinks:
//! - one-line JSON records in a daily rolling file (always)
//! - human-readable coloured lines on stderr (debug builds only)
//!
//! Every JSON record carries timestamp (ISO 8601 with offset, millisecond
//! precision), level, target, pid, tid, file and line, message, structured
//! fields and the crate version.
//!
//! Events emitted through the `log` facade are forwarded into `tracing`.

use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

pub const LOG_FILE_NAME: &str = "carbon-tracker.log";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialise the global logger. Later calls are no-ops.
///
/// `default_level` is an `EnvFilter` directive used when `RUST_LOG` is unset,
/// e.g. `"info"` or `"warn,carbon_app=debug"`.
pub fn init_logger(log_dir: &Path, default_level: &str) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;
    let _ = LOG_DIR.set(log_dir.to_path_buf());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .event_format(JsonFormatter::new())
        .with_filter(build_filter(default_level));

    let stderr_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .event_format(HumanReadableFormatter::new())
                .with_filter(build_filter(default_level)),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "carbon_tracker::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

/// `RUST_LOG` wins; otherwise the given directive; otherwise `info`
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

pub fn is_initialized() -> bool {
    LOGGER_READY.get().is_some()
}

// ============================================================
// Formatters
// ============================================================

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// One-line JSON
struct JsonFormatter {
    pid: u32,
    version: &'static str,
}

impl JsonFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
            .to_string();
        let thread = std::thread::current();

        let mut json = serde_json::json!({
            "timestamp": timestamp,
            "level": metadata.level().to_string(),
            "pid": self.pid,
            "tid": format!("{:?}", thread.id()),
            "thread_name": thread.name().unwrap_or("unnamed"),
            "target": metadata.target(),
            "version": self.version,
        });

        if let Some(file) = metadata.file() {
            json["file"] = serde_json::json!(file);
        }
        if let Some(line) = metadata.line() {
            json["line"] = serde_json::json!(line);
        }

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        if let Some(message) = visitor.fields.remove("message") {
            json["message"] = message;
        }
        // Records bridged from `log` carry their origin in `log.*` fields
        visitor.fields.retain(|key, _| !key.starts_with("log."));
        if !visitor.fields.is_empty() {
            json["fields"] = serde_json::Value::Object(visitor.fields);
        }

        writeln!(
            writer,
            "{}",
            serde_json::to_string(&json).unwrap_or_default()
        )
    }
}

/// `2025-12-09 10:32:15.123 [INFO] (carbon_app::cli) pid=12345 tid=ThreadId(1) key=value: message (src/main.rs:40)`
struct HumanReadableFormatter {
    pid: u32,
}

impl HumanReadableFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for HumanReadableFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string();
        let tid = format!("{:?}", std::thread::current().id());

        let level = match *metadata.level() {
            Level::ERROR => "\x1b[31mERROR\x1b[0m",
            Level::WARN => "\x1b[33mWARN\x1b[0m",
            Level::INFO => "\x1b[32mINFO\x1b[0m",
            Level::DEBUG => "\x1b[36mDEBUG\x1b[0m",
            Level::TRACE => "\x1b[35mTRACE\x1b[0m",
        };

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let message = visitor
            .fields
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let fields: String = visitor
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != "message" && !key.starts_with("log."))
            .map(|(key, value)| format!(" {}={}", key, value))
            .collect();

        let location = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line),
            _ => String::new(),
        };

        writeln!(
            writer,
            "{} [{}] ({}) pid={} tid={}{}: {}{}",
            timestamp,
            level,
            metadata.target(),
            self.pid,
            tid,
            fields,
            message,
            location
        )
    }
}

/// Collects event fields as JSON values
struct FieldVisitor {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            fields: serde_json::Map::new(),
        }
    }

    fn insert(&mut self, field: &tracing::field::Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.insert(field, serde_json::json!(format!("{:?}", value)));
    }
}
