//! # engine::session
//!
//! **Session Resolver** — maps wall-clock time in the market time zone to a
//! trading phase.
//!
//! ```text
//!  00:00 ─────── 09:30 ═══════════ 16:00 ─────── 20:00 ─────── 24:00
//!        PRE     [      REG       ]      POST   ]     POST
//! ```
//!
//! Boundaries are a wall-clock approximation; holidays and half days are not
//! modelled.

use chrono::{NaiveTime, Utc};
use chrono_tz::Tz;

use crate::models::{Session, SessionChoice};

const REGULAR_OPEN: (u32, u32) = (9, 30);
const REGULAR_CLOSE: (u32, u32) = (16, 0);

/// Session for a local time of day. Total: every time maps to a label.
pub fn session_at(time: NaiveTime) -> Session {
    let open  = hm(REGULAR_OPEN);
    let close = hm(REGULAR_CLOSE);

    if time < open {
        Session::Pre
    } else if time <= close {
        Session::Reg
    } else {
        // 16:00 < t <= 20:00 is after-hours proper; later is folded into POST.
        Session::Post
    }
}

/// Resolve a caller's choice against "now" in `tz`. Explicit sessions bypass
/// the clock entirely.
pub fn resolve(choice: SessionChoice, tz: Tz) -> Session {
    match choice {
        SessionChoice::Fixed(session) => session,
        SessionChoice::Auto => session_at(Utc::now().with_timezone(&tz).time()),
    }
}

fn hm((h, m): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}
