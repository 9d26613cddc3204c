//! `tracing` events forwarded to the browser console.

use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "info";

/// Collects the `message` field and `key=value` pairs for the rest.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

fn format_line(level: &Level, target: &str, visitor: &LineVisitor) -> String {
    format!("{level} {target}: {}{}", visitor.message, visitor.fields)
}

pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        let line = wasm_bindgen::JsValue::from_str(&format_line(meta.level(), meta.target(), &visitor));
        match *meta.level() {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Install the console subscriber once. Invalid directives fall back to
/// `info`; a second call is a no-op.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(ConsoleLayer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::{LineVisitor, format_line};
    use tracing::Level;

    #[test]
    fn line_has_level_target_message_and_fields() {
        let visitor = LineVisitor {
            message: "model parsed".to_string(),
            fields: " meshes=3".to_string(),
        };
        assert_eq!(
            format_line(&Level::INFO, "formats::loader", &visitor),
            "INFO formats::loader: model parsed meshes=3"
        );
    }
}
