//! Verbose start-up report

use std::io::Write;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::{HparamSet, Result};

/// Offset of the report clock, UTC+09:00 (JST)
pub const REPORT_OFFSET_SECS: i32 = 9 * 3600;

/// Timestamp layout, e.g. `2024-05-01 18:30:00.123456+09:00`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f%:z";

/// The fixed report time zone
#[must_use]
pub fn report_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORT_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time in the report time zone
#[must_use]
pub fn report_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&report_offset())
}

/// Write the start announcement and a dump of all four groups
pub fn write_report<W: Write>(
    out: &mut W,
    hparams: &HparamSet,
    started_at: DateTime<FixedOffset>,
) -> Result<()> {
    writeln!(out, "Start running at {}.", started_at.format(TIMESTAMP_FORMAT))?;
    writeln!(out, "Hyper parameters are below.")?;
    serde_json::to_writer_pretty(&mut *out, hparams)?;
    writeln!(out)?;
    Ok(())
}
