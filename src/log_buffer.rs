//! In-memory log sink.
//!
//! The demo draws over the whole terminal, so log output written to stderr
//! would tear the screen. When a `LogBuffer` is installed globally the
//! tracing subscriber writes into it instead and the demo shows its tail.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::theme;
use crate::ui::UiFrame;

pub const DEFAULT_MAX_LINES: usize = 500;

static GLOBAL_LOG: OnceLock<LogBuffer> = OnceLock::new();

/// Install `buffer` as the process-wide log sink. Only the first call wins.
pub fn set_global_log(buffer: LogBuffer) -> bool {
    GLOBAL_LOG.set(buffer).is_ok()
}

pub fn global_log() -> Option<LogBuffer> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct Lines {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl Lines {
    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

/// Shared, bounded list of log lines. Clones share the same storage.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    inner: Arc<Mutex<Lines>>,
}

impl LogBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Lines {
                lines: VecDeque::new(),
                max_lines: max_lines.max(1),
            })),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.inner.lock() {
            lines.push_line(line.into());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|l| l.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> Vec<String> {
        let Ok(lines) = self.inner.lock() else {
            return Vec::new();
        };
        let skip = lines.lines.len().saturating_sub(count);
        lines.lines.iter().skip(skip).cloned().collect()
    }

    pub fn writer(&self) -> LogWriter {
        LogWriter {
            buffer: self.clone(),
            pending: Vec::new(),
        }
    }

    /// Draw as many trailing lines as fit in `area`.
    pub fn render_tail(&self, frame: &mut UiFrame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let lines = self
            .tail(area.height as usize)
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>();
        let style = Style::default()
            .fg(theme::status_fg())
            .bg(theme::status_bg());
        frame.render_widget(Paragraph::new(lines).style(style), area);
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

/// `io::Write` adapter that splits written bytes into lines.
#[derive(Debug)]
pub struct LogWriter {
    buffer: LogBuffer,
    pending: Vec<u8>,
}

impl LogWriter {
    fn push_complete_lines(&mut self) {
        let Some(pos) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return;
        };
        let drained: Vec<u8> = self.pending.drain(..=pos).collect();
        for line in String::from_utf8_lossy(&drained).split('\n') {
            if !line.is_empty() {
                self.buffer.push(line);
            }
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.push_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let text = String::from_utf8_lossy(&self.pending).to_string();
            self.pending.clear();
            self.buffer.push(text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn buffer_is_bounded() {
        let log = LogBuffer::new(3);
        for line in ["one", "two", "three", "four"] {
            log.push(line);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.tail(10), vec!["two", "three", "four"]);
        assert_eq!(log.tail(1), vec!["four"]);
    }

    #[test]
    fn writer_splits_lines_and_flushes_partial() {
        let log = LogBuffer::new(10);
        let mut writer = log.writer();
        writer.write_all(b"first line\nsecond").unwrap();
        assert_eq!(log.tail(10), vec!["first line"]);
        writer.write_all(b" half\npartial").unwrap();
        writer.flush().unwrap();
        assert_eq!(log.tail(10), vec!["first line", "second half", "partial"]);
    }

    #[test]
    fn render_tail_shows_latest_lines() {
        let log = LogBuffer::new(10);
        for i in 0..5 {
            log.push(format!("line{i}"));
        }
        let area = Rect::new(0, 0, 8, 2);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        log.render_tail(&mut frame, area);
        let row: String = (0..5)
            .map(|x| frame.buffer().cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(row, "line4");
    }
}
