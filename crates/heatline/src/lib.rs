#![forbid(unsafe_code)]

//! Heat-aware terminal line logging.
//!
//! `heatline` is a drop-in, thread-safe line logger that gives a human
//! watching a terminal an at-a-glance sense of how busy the stream is:
//! as the rate of lines per second rises, output is progressively
//! colorized.
//!
//! - **Cold** — plain output.
//! - **Heating up** — lines wrapped in yellow once the rate exceeds
//!   the heating-up threshold.
//! - **On fire** — lines wrapped in red once the rate exceeds the
//!   on-fire threshold.
//! - **Blazing** — a flickering red/yellow two-tone once the fire has
//!   been sustained for a configurable number of seconds.
//!
//! Each transition prefixes the next line with a one-shot announcement
//! banner. The rate is sampled once per wall-clock second, so bursty
//! per-call jitter does not flicker the colors.
//!
//! # Example
//!
//! ```
//! use heatline::HeatLogger;
//!
//! let log = HeatLogger::new(std::io::stderr(), "worker: ");
//! log.println("starting up")?;
//! log.print_fmt(format_args!("{} jobs queued", 42))?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! The logger decides only how a rendered line looks and whether a
//! banner prefixes it; producing the line's text is the caller's job.
//! There are no levels, filtering, or multiple sinks.

mod gauge;
mod logger;
mod paint;

pub use gauge::HeatState;
pub use logger::{FatalSignal, HeatLogger};
pub use paint::Paint;
