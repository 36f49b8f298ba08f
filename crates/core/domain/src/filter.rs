//! 报修单查询条件与自然日时间窗口。

use crate::error::TriageError;
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 查询条件（不持久化，每次查询构造一次）。
///
/// 每个字段独立收窄结果集，未设置的字段不施加约束。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date: Option<NaiveDate>,
    pub building_id: Option<String>,
    pub floor_id: Option<String>,
    pub room_id: Option<String>,
}

impl FilterCriteria {
    /// 无约束条件。
    pub fn all() -> Self {
        Self::default()
    }

    /// 仅按日期筛选。
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// 给定时区下的“今天”。
    pub fn today(zone: DayZone) -> Self {
        Self::on(zone.today())
    }

    pub fn with_building(mut self, building_id: impl Into<String>) -> Self {
        self.building_id = Some(building_id.into());
        self
    }

    pub fn with_floor(mut self, floor_id: impl Into<String>) -> Self {
        self.floor_id = Some(floor_id.into());
        self
    }

    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.date.is_none()
            && self.building_id.is_none()
            && self.floor_id.is_none()
            && self.room_id.is_none()
    }
}

/// 划分自然日所用的时区。
///
/// `Local` 按每个日期各自的 UTC 偏移解析（含夏令时），`Fixed` 为固定偏移。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DayZone {
    /// 该时区下的当前日期。
    pub fn today(&self) -> NaiveDate {
        match self {
            DayZone::Local => Local::now().date_naive(),
            DayZone::Fixed(offset) => Utc::now().with_timezone(offset).date_naive(),
        }
    }

    pub fn window(&self, date: NaiveDate) -> Result<DayWindow, TriageError> {
        match self {
            DayZone::Local => DayWindow::new(date, &Local),
            DayZone::Fixed(offset) => DayWindow::new(date, offset),
        }
    }
}

impl std::fmt::Display for DayZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayZone::Local => f.write_str("local"),
            DayZone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// 一个自然日在本地时间下的闭区间 [00:00:00.000, 23:59:59.999]，以 UTC 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// 午夜重复时取较早时刻，23:59:59.999 重复时取较晚时刻；
    /// 落在夏令时跳过的区间内时，分别取区间之后/之前最近的有效时刻。
    pub fn new<Tz: TimeZone>(date: NaiveDate, zone: &Tz) -> Result<Self, TriageError> {
        let start = local_instant(zone, time_of_day(date, 0, 0, 0, 0)?, true)
            .ok_or_else(|| unresolvable(date))?;
        let end = local_instant(zone, time_of_day(date, 23, 59, 59, 999)?, false)
            .ok_or_else(|| unresolvable(date))?;
        Ok(Self { start, end })
    }

    /// 两端均包含。
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// 夏令时跳过区间的上限（分钟）。
const MAX_GAP_MINUTES: i32 = 180;

fn time_of_day(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
    milli: u32,
) -> Result<NaiveDateTime, TriageError> {
    date.and_hms_milli_opt(hour, minute, second, milli)
        .ok_or_else(|| TriageError::Validation(format!("invalid time of day for {date}")))
}

fn local_instant<Tz: TimeZone>(
    zone: &Tz,
    naive: NaiveDateTime,
    earliest: bool,
) -> Option<DateTime<Utc>> {
    let step = if earliest {
        Duration::minutes(1)
    } else {
        Duration::minutes(-1)
    };
    (0..=MAX_GAP_MINUTES).find_map(|i| {
        let resolved = zone.from_local_datetime(&(naive + step * i));
        let instant = if earliest {
            resolved.earliest()
        } else {
            resolved.latest()
        };
        instant.map(|value| value.with_timezone(&Utc))
    })
}

fn unresolvable(date: NaiveDate) -> TriageError {
    TriageError::Validation(format!("no local time for {date}"))
}

/// 解析 `YYYY-MM-DD` 日期输入。
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, TriageError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| TriageError::Validation(format!("date must be YYYY-MM-DD, got {trimmed:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn day_window_is_closed_at_both_ends() {
        let offset = FixedOffset::east_opt(8 * 3600).expect("offset");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        let window = DayWindow::new(date, &offset).expect("window");

        assert_eq!(window.start.to_rfc3339(), "2024-04-30T16:00:00+00:00");
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::milliseconds(1)));
        assert!(!window.contains(window.end + Duration::milliseconds(1)));
        assert_eq!(window.end - window.start, Duration::milliseconds(86_399_999));
    }

    #[test]
    fn parse_calendar_date_rejects_garbage() {
        assert!(parse_calendar_date("2024-13-40").is_err());
        assert!(parse_calendar_date("yesterday").is_err());
        assert_eq!(
            parse_calendar_date(" 2024-02-29 ").expect("leap day"),
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("date")
        );
    }
}
