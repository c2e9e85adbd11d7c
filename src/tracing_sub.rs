//! Subscriber setup for the menu's `tracing` output.

use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::log_buffer::{LogBuffer, LogWriter, global_log};

/// Where formatted log lines end up.
#[derive(Debug, Clone)]
pub enum LogSink {
    Buffer(LogBuffer),
    Stderr,
}

impl LogSink {
    /// The globally installed `LogBuffer`, or stderr when there is none.
    pub fn from_global() -> Self {
        global_log().map_or(LogSink::Stderr, LogSink::Buffer)
    }
}

pub enum SinkWriter {
    Buffer(LogWriter),
    Stderr(io::Stderr),
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::Buffer(w) => w.write(buf),
            SinkWriter::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::Buffer(w) => w.flush(),
            SinkWriter::Stderr(s) => s.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            LogSink::Buffer(log) => SinkWriter::Buffer(log.writer()),
            LogSink::Stderr => SinkWriter::Stderr(io::stderr()),
        }
    }
}

/// Install a compact fmt subscriber capped at `level`.
///
/// Returns false if a global subscriber was already set.
pub fn init(level: Level, sink: LogSink) -> bool {
    let ansi = matches!(sink, LogSink::Stderr);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(sink)
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_names(false)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sink_writes_whole_lines() {
        let log = LogBuffer::new(4);
        let sink = LogSink::Buffer(log.clone());
        let mut writer = sink.make_writer();
        writer.write_all(b" DEBUG submenu opening\n").unwrap();
        assert_eq!(log.tail(1), vec![" DEBUG submenu opening"]);
    }
}
