use gloo::console;
use std::io;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

const MAX_LEVEL: Level = Level::DEBUG;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

// TRACE has no console counterpart and shares `console.debug`
fn console_method(level: Level) -> ConsoleMethod {
    if level == Level::ERROR {
        ConsoleMethod::Error
    } else if level == Level::WARN {
        ConsoleMethod::Warn
    } else if level == Level::INFO {
        ConsoleMethod::Info
    } else {
        ConsoleMethod::Debug
    }
}

// Collects one formatted record and hands it to the browser console on drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
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
        if self.buffer.is_empty() {
            return;
        }
        let record = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        match console_method(self.level) {
            ConsoleMethod::Error => console::error!(record),
            ConsoleMethod::Warn => console::warn!(record),
            ConsoleMethod::Info => console::info!(record),
            ConsoleMethod::Debug => console::debug!(record),
        }
    }
}

pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

pub fn init() {
    // wasm32 has no wall clock, so records carry no timestamp
    let subscriber = tracing_subscriber::fmt()
        .json()
        .without_time()
        .with_max_level(MAX_LEVEL)
        .with_writer(MakeConsoleWriter)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        console::error!(format!("failed to install tracing subscriber: {}", err));
    }
}
