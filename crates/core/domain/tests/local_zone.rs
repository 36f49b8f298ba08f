//! 本地时区（含夏令时）下的自然日窗口。
//!
//! 通过 `TZ` 指定时区，单独成一个测试二进制，避免影响其他测试。

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use domain::{DayWindow, DayZone};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("date")
}

fn utc(year: i32, month: u32, day: u32, hour: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("utc")
}

// 环境变量是进程全局状态，全部场景放在同一个测试里顺序执行。
#[test]
fn local_day_window_follows_daylight_saving() {
    // 美东规则：3 月第二个周日 02:00 进入夏令时，11 月第一个周日 02:00 结束。
    unsafe { std::env::set_var("TZ", "EST5EDT,M3.2.0,M11.1.0") };

    let winter = DayZone::Local.window(date(2026, 1, 15)).expect("winter");
    assert_eq!(winter.start, utc(2026, 1, 15, 5));
    assert_eq!(winter.end, utc(2026, 1, 16, 5) - Duration::milliseconds(1));

    let summer = DayZone::Local.window(date(2026, 7, 15)).expect("summer");
    assert_eq!(summer.start, utc(2026, 7, 15, 4));
    assert_eq!(summer.end, utc(2026, 7, 16, 4) - Duration::milliseconds(1));

    // 23:30 本地时间的报修单属于当天，而不是第二天。
    let late_evening = utc(2026, 1, 16, 4) + Duration::minutes(30);
    assert!(winter.contains(late_evening));
    let next = DayZone::Local.window(date(2026, 1, 16)).expect("next");
    assert!(!next.contains(late_evening));

    // 切换日当天长度为 23h / 25h。
    let spring = DayZone::Local.window(date(2026, 3, 8)).expect("spring");
    assert_eq!(spring.end - spring.start, Duration::hours(23) - Duration::milliseconds(1));
    let autumn = DayZone::Local.window(date(2026, 11, 1)).expect("autumn");
    assert_eq!(autumn.end - autumn.start, Duration::hours(25) - Duration::milliseconds(1));

    // 午夜本身被跳过或重复的规则也不会报错。
    unsafe { std::env::set_var("TZ", "XST5XDT,M3.2.0/0,M11.1.0/1") };
    let skipped = DayWindow::new(date(2026, 3, 8), &chrono::Local).expect("skipped midnight");
    assert_eq!(skipped.start, utc(2026, 3, 8, 5));
    let repeated = DayWindow::new(date(2026, 11, 1), &chrono::Local).expect("repeated midnight");
    assert_eq!(repeated.start, utc(2026, 11, 1, 4));

    unsafe { std::env::remove_var("TZ") };
}
