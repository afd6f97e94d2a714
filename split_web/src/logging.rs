//! Browser console logging.
//!
//! `tracing` events are formatted by `tracing-subscriber` without timestamps
//! (no system clock on wasm32) and each formatted line goes to the console
//! method matching its level.

use std::io;

use once_cell::sync::OnceCell;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

static INIT: OnceCell<()> = OnceCell::new();

/// Install the panic hook and console subscriber. Later calls are no-ops.
pub fn init() {
    INIT.get_or_init(|| {
        console_error_panic_hook::set_once();

        let max_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        // another subscriber may already be installed by the embedding page
        let _ = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(max_level)
            .without_time()
            .with_target(false)
            .try_init();
    });
}

/// Hands out one [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it when dropped.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        ConsoleWriter {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }

        let message = JsValue::from_str(line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&message);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&message);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&message);
        } else {
            web_sys::console::debug_1(&message);
        }
    }
}
