#![forbid(unsafe_code)]

//! Thread-safe, heat-aware line writer.
//!
//! [`HeatLogger`] wraps an arbitrary byte sink and renders each logical
//! message as exactly one terminal line, colored according to the heat
//! state machine in [`crate::gauge`]. A single coarse mutex guards the
//! whole instance: the state transition, the scratch-buffer assembly,
//! and the sink write happen as one atomic unit, so concurrent callers
//! serialize fully and writes are never torn. Line ordering depends on
//! that lock; the sink write is synchronous and a slow sink throttles
//! every caller.

use std::fmt;
use std::io::{self, Write};
use std::process;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::gauge::{HeatGauge, HeatState};
use crate::paint;

/// Line logger that colors output as throughput rises.
///
/// Created in the cold state with terminal mode on, a heating-up
/// threshold of 10 lines/sec, an on-fire threshold of 20 lines/sec,
/// and a blazing escalation after 5 seconds of sustained fire.
///
/// All methods take `&self`; the logger is meant to be shared across
/// threads behind an `Arc` (or a `static`).
pub struct HeatLogger {
    inner: Mutex<Inner>,
}

struct Inner {
    out: Box<dyn Write + Send>,
    prefix: String,
    term: bool,
    /// Reusable scratch for assembling one output line.
    buf: Vec<u8>,
    gauge: HeatGauge,
}

impl HeatLogger {
    /// Create a logger writing to `out`.
    pub fn new(out: impl Write + Send + 'static, prefix: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out: Box::new(out),
                prefix: prefix.into(),
                term: true,
                buf: Vec::new(),
                gauge: HeatGauge::new(),
            }),
        }
    }

    /// A logger must keep accepting lines even after a panic in some
    /// thread that held the lock, so poisoning is recovered here.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write one message as exactly one line.
    ///
    /// Runs the heat state machine, prepends any pending transition
    /// banner, applies the active color transform when terminal mode
    /// is on, guarantees a single trailing newline, and writes the
    /// whole line to the sink in one call. A failed write is returned
    /// to the caller unchanged; it is never retried and does not
    /// affect the heat state.
    pub fn output(&self, message: &str) -> io::Result<()> {
        // Timestamp before waiting on the lock, so contention does not
        // skew the rate sampling.
        let now = unix_second();
        self.output_at(message, now)
    }

    fn output_at(&self, message: &str, now_second: i64) -> io::Result<()> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        inner.buf.clear();
        inner.gauge.record(now_second);

        if let Some(banner) = inner.gauge.take_banner() {
            if inner.term {
                paint::write_banner(banner, &mut inner.buf);
            } else {
                inner.buf.extend_from_slice(banner.as_bytes());
            }
        }

        let needs_newline = !message.ends_with('\n');
        match inner.gauge.paint() {
            Some(p) if inner.term => p.write_to(message.as_bytes(), &mut inner.buf),
            _ => inner.buf.extend_from_slice(message.as_bytes()),
        }
        if needs_newline {
            inner.buf.push(b'\n');
        }
        inner.out.write_all(&inner.buf)
    }

    /// Write anything displayable as one line.
    pub fn print(&self, message: impl fmt::Display) -> io::Result<()> {
        self.output(&message.to_string())
    }

    /// Like [`print`](Self::print) with an explicit trailing newline.
    ///
    /// [`output`](Self::output) already guarantees one newline, so the
    /// observable difference is only for callers that treat the two
    /// entry points differently.
    pub fn println(&self, message: impl fmt::Display) -> io::Result<()> {
        self.output(&format!("{message}\n"))
    }

    /// Write a formatted message, e.g. `log.print_fmt(format_args!("{n} jobs"))`.
    pub fn print_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.output(&args.to_string())
    }

    /// Emit `message` and return a [`FatalSignal`] for the caller's
    /// boundary layer to act on.
    ///
    /// The signal carries the sink write result, but neither
    /// [`FatalSignal::exit`] nor [`FatalSignal::raise`] depends on the
    /// write having succeeded.
    pub fn fatal(&self, message: impl fmt::Display) -> FatalSignal {
        let message = message.to_string();
        let write_result = self.output(&message);
        FatalSignal {
            message,
            write_result,
        }
    }

    /// Formatted variant of [`fatal`](Self::fatal).
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) -> FatalSignal {
        self.fatal(args)
    }

    /// Newline-terminated variant of [`fatal`](Self::fatal), mirroring
    /// [`println`](Self::println).
    ///
    /// The emitted line is identical to `fatal`'s, since the write
    /// path already guarantees one trailing newline; the difference is
    /// the newline carried by [`FatalSignal::message`].
    pub fn fatal_line(&self, message: impl fmt::Display) -> FatalSignal {
        self.fatal(format_args!("{message}\n"))
    }

    /// Replace the output sink.
    pub fn set_output(&self, out: impl Write + Send + 'static) {
        self.lock().out = Box::new(out);
    }

    /// Replace the output sink, returning the previous one.
    ///
    /// An owned `dyn Write` cannot be copied out of the logger, so
    /// this swap is the way to retrieve the current destination.
    pub fn replace_output(&self, out: impl Write + Send + 'static) -> Box<dyn Write + Send> {
        std::mem::replace(&mut self.lock().out, Box::new(out))
    }

    /// The stored output prefix.
    ///
    /// The prefix is informational: it is reported here but the line
    /// formatting path does not currently prepend it.
    pub fn prefix(&self) -> String {
        self.lock().prefix.clone()
    }

    /// Set the stored output prefix. See [`prefix`](Self::prefix).
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.lock().prefix = prefix.into();
    }

    /// Whether color transforms are applied to emitted bytes.
    pub fn terminal_mode(&self) -> bool {
        self.lock().term
    }

    /// Enable or disable color output. The state machine still runs
    /// when disabled; output simply stays plain.
    ///
    /// Disabling guarantees that no escape sequence reaches the sink,
    /// but a line that crosses a state transition still carries the
    /// (uncolored) announcement banner before the message bytes.
    pub fn set_terminal_mode(&self, on: bool) {
        self.lock().term = on;
    }

    /// Lines/sec above which output starts warming.
    pub fn heating_up_rate(&self) -> i64 {
        self.lock().gauge.heating_up_rate
    }

    /// Set the heating-up threshold. Takes effect at the next
    /// per-second evaluation.
    pub fn set_heating_up_rate(&self, rate: i64) {
        self.lock().gauge.heating_up_rate = rate;
    }

    /// Lines/sec above which output is on fire.
    pub fn on_fire_rate(&self) -> i64 {
        self.lock().gauge.on_fire_rate
    }

    /// Set the on-fire threshold. Takes effect at the next per-second
    /// evaluation.
    pub fn set_on_fire_rate(&self, rate: i64) {
        self.lock().gauge.on_fire_rate = rate;
    }

    /// Seconds of sustained fire before output starts blazing.
    pub fn blazing_after(&self) -> i64 {
        self.lock().gauge.blazing_after
    }

    /// Set the blazing duration threshold, in seconds.
    pub fn set_blazing_after(&self, seconds: i64) {
        self.lock().gauge.blazing_after = seconds;
    }

    /// Current heat classification of the stream.
    pub fn heat_state(&self) -> HeatState {
        self.lock().gauge.state()
    }
}

impl fmt::Debug for HeatLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("HeatLogger")
            .field("prefix", &inner.prefix)
            .field("terminal_mode", &inner.term)
            .field("heat_state", &inner.gauge.state())
            .finish_non_exhaustive()
    }
}

/// Outcome of a fatal emit, to be turned into process exit or a panic
/// by the caller's boundary layer.
///
/// The logger core stays termination-policy-free: it renders and
/// writes the line, then hands the decision back through this value.
#[must_use = "a FatalSignal terminates nothing until exit() or raise() is called"]
#[derive(Debug)]
pub struct FatalSignal {
    message: String,
    write_result: io::Result<()>,
}

impl FatalSignal {
    /// The rendered message, without trailing newline handling.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Result of the emit that produced this signal.
    pub fn write_result(&self) -> &io::Result<()> {
        &self.write_result
    }

    /// Terminate the process with exit code 1.
    pub fn exit(self) -> ! {
        process::exit(1)
    }

    /// Raise the message as an unrecoverable condition.
    pub fn raise(self) -> ! {
        panic!("{}", self.message)
    }
}

fn unix_second() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}
