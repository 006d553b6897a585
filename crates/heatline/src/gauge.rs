#![forbid(unsafe_code)]

//! Per-second rate sampling and the heat state machine.
//!
//! The gauge classifies log throughput into four severity states and
//! picks the rendering transform plus an optional one-shot banner for
//! the line that crosses a transition. It is sampled at most once per
//! wall-clock second: every line bumps a counter, and the transition
//! table is only evaluated when the second bucket advances. Sampling
//! per second rather than per line smooths bursty jitter, and the
//! cooling path goes through an intermediate state so a single quiet
//! second cannot flicker the output between cold and hot.
//!
//! The blazing escalation is time-based, not rate-based: staying on
//! fire for longer than `blazing_after` consecutive seconds switches
//! to the two-tone transform, signalling a prolonged incident rather
//! than a momentary spike.

use crate::paint::Paint;

pub(crate) const HEATING_UP_BANNER: &str = "It's heating up!!! ";
pub(crate) const ON_FIRE_BANNER: &str = "It's on fire!!! ";
pub(crate) const BLAZING_BANNER: &str = "Boomshakalaka!!! ";

/// Severity classification of the current log throughput.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeatState {
    /// Throughput below the heating-up threshold.
    Cold,
    /// Recently dropped below the on-fire threshold; still warm.
    CoolingDown,
    /// Throughput above the heating-up threshold.
    HeatingUp,
    /// Throughput above the on-fire threshold.
    OnFire,
}

/// Rate-sampling state machine driving paint selection.
#[derive(Debug)]
pub(crate) struct HeatGauge {
    state: HeatState,
    /// Unix-second bucket currently being counted.
    period: i64,
    /// Second at which `OnFire` was entered.
    fire_period: i64,
    /// Lines seen so far in the current bucket.
    count: i64,
    /// Lines/sec above which output starts warming.
    pub(crate) heating_up_rate: i64,
    /// Lines/sec above which output is on fire.
    pub(crate) on_fire_rate: i64,
    /// Seconds of sustained fire before blazing.
    pub(crate) blazing_after: i64,
    paint: Option<Paint>,
    banner: Option<&'static str>,
}

impl HeatGauge {
    pub(crate) fn new() -> Self {
        Self {
            state: HeatState::Cold,
            period: 0,
            fire_period: 0,
            count: 0,
            heating_up_rate: 10,
            on_fire_rate: 20,
            blazing_after: 5,
            paint: None,
            banner: None,
        }
    }

    pub(crate) fn state(&self) -> HeatState {
        self.state
    }

    pub(crate) fn paint(&self) -> Option<Paint> {
        self.paint
    }

    /// Consume the pending one-shot banner, if any.
    pub(crate) fn take_banner(&mut self) -> Option<&'static str> {
        self.banner.take()
    }

    /// Count one line at `now_second` and, when the second bucket has
    /// advanced, re-evaluate the transition table.
    ///
    /// The line that crosses the bucket boundary is included in the
    /// evaluated rate, and the new bucket starts from zero.
    pub(crate) fn record(&mut self, now_second: i64) {
        self.count += 1;
        if self.period == now_second {
            return;
        }
        self.period = now_second;
        let rate = self.count;

        match self.state {
            HeatState::Cold => {
                self.paint = None;
                if rate > self.heating_up_rate {
                    self.banner = Some(HEATING_UP_BANNER);
                    self.state = HeatState::HeatingUp;
                    self.paint = Some(Paint::Warming);
                    tracing::debug!(rate, "log stream heating up");
                }
            }
            HeatState::CoolingDown => {
                if rate > self.heating_up_rate {
                    self.state = HeatState::HeatingUp;
                    self.paint = Some(Paint::Warming);
                } else if rate < self.heating_up_rate {
                    self.state = HeatState::Cold;
                    self.paint = None;
                    tracing::debug!(rate, "log stream cooled off");
                }
                // Exactly at the threshold: hold the state and keep
                // the warming paint.
            }
            HeatState::HeatingUp => {
                self.paint = Some(Paint::Warming);
                if rate > self.on_fire_rate {
                    self.banner = Some(ON_FIRE_BANNER);
                    self.state = HeatState::OnFire;
                    self.fire_period = now_second;
                    self.paint = Some(Paint::Fire);
                    tracing::debug!(rate, "log stream on fire");
                }
            }
            HeatState::OnFire => {
                if rate < self.on_fire_rate {
                    self.state = HeatState::CoolingDown;
                    self.paint = Some(Paint::Warming);
                } else if self.fire_period.saturating_add(self.blazing_after) < now_second {
                    // Announce blazing only on entry, not every second
                    // the fire is sustained.
                    if self.paint != Some(Paint::Blazing) {
                        self.banner = Some(BLAZING_BANNER);
                        tracing::debug!(rate, "log stream blazing");
                    }
                    self.paint = Some(Paint::Blazing);
                } else {
                    self.paint = Some(Paint::Fire);
                }
            }
        }
        self.count = 0;
    }
}
