#![forbid(unsafe_code)]

//! ANSI color transforms for heat-aware line rendering.
//!
//! Transforms are pure byte-level functions that append into a caller
//! supplied buffer; they carry no state of their own. The palette is a
//! fixed set of bold ANSI-16 escapes so output stays legible on basic
//! terminals.

/// Clears every attribute set by the other escapes.
pub(crate) const RESET: &str = "\x1b[0m";
/// Bold yellow: warming output.
pub(crate) const YELLOW: &str = "\x1b[1;33m";
/// Bold red: on-fire output.
pub(crate) const RED: &str = "\x1b[1;31m";
/// Bold green: one-shot transition announcements.
pub(crate) const GREEN: &str = "\x1b[1;32m";

/// Rendering transform selected by the heat state machine.
///
/// Cold output has no transform at all; that case is represented as
/// `Option::<Paint>::None` rather than an extra variant, so a `Paint`
/// value always means escapes will be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    /// Whole line wrapped in yellow.
    Warming,
    /// Whole line wrapped in red.
    Fire,
    /// Alternating red/yellow per byte: a flickering two-tone line.
    Blazing,
}

impl Paint {
    /// Append `msg` to `out` with this transform's escapes applied.
    pub fn write_to(self, msg: &[u8], out: &mut Vec<u8>) {
        match self {
            Paint::Warming => wrap(YELLOW, msg, out),
            Paint::Fire => wrap(RED, msg, out),
            Paint::Blazing => {
                for (i, b) in msg.iter().enumerate() {
                    let color = if i & 1 == 0 { RED } else { YELLOW };
                    out.extend_from_slice(color.as_bytes());
                    out.push(*b);
                }
                out.extend_from_slice(RESET.as_bytes());
            }
        }
    }
}

#[inline]
fn wrap(color: &str, msg: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(color.as_bytes());
    out.extend_from_slice(msg);
    out.extend_from_slice(RESET.as_bytes());
}

/// Append a transition banner wrapped in the announcement color.
pub(crate) fn write_banner(text: &str, out: &mut Vec<u8>) {
    wrap(GREEN, text.as_bytes(), out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(paint: Paint, msg: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        paint.write_to(msg, &mut out);
        out
    }

    #[test]
    fn warming_wraps_whole_line_in_yellow() {
        let out = painted(Paint::Warming, b"hot soon");
        assert_eq!(out, b"\x1b[1;33mhot soon\x1b[0m");
    }

    #[test]
    fn fire_wraps_whole_line_in_red() {
        let out = painted(Paint::Fire, b"burning");
        assert_eq!(out, b"\x1b[1;31mburning\x1b[0m");
    }

    #[test]
    fn blazing_alternates_red_then_yellow_per_byte() {
        let out = painted(Paint::Blazing, b"ab");
        assert_eq!(out, b"\x1b[1;31ma\x1b[1;33mb\x1b[0m");
    }

    #[test]
    fn blazing_single_byte_is_red() {
        let out = painted(Paint::Blazing, b"x");
        assert_eq!(out, b"\x1b[1;31mx\x1b[0m");
    }

    #[test]
    fn blazing_empty_input_is_just_reset() {
        let out = painted(Paint::Blazing, b"");
        assert_eq!(out, b"\x1b[0m");
    }

    #[test]
    fn banner_uses_announcement_green() {
        let mut out = Vec::new();
        write_banner("It's on fire!!! ", &mut out);
        assert_eq!(out, b"\x1b[1;32mIt's on fire!!! \x1b[0m");
    }

    #[test]
    fn transforms_append_without_clearing() {
        let mut out = b"already here ".to_vec();
        Paint::Fire.write_to(b"x", &mut out);
        assert!(out.starts_with(b"already here "));
    }
}
