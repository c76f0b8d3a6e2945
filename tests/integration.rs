use chrono::{TimeZone, Utc};
use qtty::{Day, Days, Second};
use tempofmt::{
    format_phone, format_ssn, mask_format, CalendarUnit, ClockSource, Error, PhoneFormat,
    PhonePatterns, TimeContext, TimeLike, DAY, HOUR, WEEK,
};

/// Thursday 2026-01-01 09:30:00 UTC; ISO week 2026-W01.
fn new_year() -> TimeContext {
    TimeContext::utc().with_fixed_now(Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap())
}

#[test]
fn classification_around_new_year() {
    let ctx = new_year();

    assert!(ctx.is_today(TimeLike::Now).unwrap());
    assert!(!ctx.is_today(ctx.now_instant() - WEEK).unwrap());
    assert!(ctx.was_yesterday("2025-12-31 23:59:59").unwrap());
    assert!(ctx.is_this_week("2025-12-29").unwrap());
    assert!(!ctx.is_this_year("2025-12-29").unwrap());
    assert!(ctx.was_last_week("2025-12-22").unwrap());
    assert!(ctx.was_last_month("2025-12-01").unwrap());
    assert!(ctx.was_last_year("2025-06-15").unwrap());
    assert!(ctx.is_tomorrow("friday").unwrap());
}

#[test]
fn difference_properties() {
    let ctx = new_year();
    let pairs = [("tomorrow", "yesterday"), ("+3 hours", "-1 week"), ("2020-01-01", "@0")];
    for (a, b) in pairs {
        assert_eq!(
            ctx.difference(a, b).unwrap(),
            -ctx.difference(b, a).unwrap(),
            "{a} / {b}"
        );
    }
    assert_eq!(ctx.difference("tomorrow", "yesterday").unwrap(), 2 * DAY);
    assert_eq!(ctx.difference("+3 hours", TimeLike::Now).unwrap(), 3 * HOUR);
}

#[test]
fn within_queries_keep_time_like_bounds() {
    let ctx = new_year();
    assert!(ctx.is_within_next("tomorrow", "next week").unwrap());
    assert!(!ctx.is_within_next("next month", "next week").unwrap());
    assert!(ctx.was_within_last("yesterday", "last week").unwrap());

    let span = Days::new(2.0).to::<Second>();
    assert!(ctx.is_within_next_span("tomorrow", span).unwrap());
    assert!(!ctx.was_within_last_span("last week", span).unwrap());

    let diff = ctx.difference_span("tomorrow", "yesterday").unwrap();
    assert_eq!(diff.to::<Day>(), Days::new(2.0));
}

#[test]
fn unparseable_strings_are_errors_everywhere() {
    let ctx = new_year();
    let bad = "the twelfth of never";
    let expected = Err::<i64, _>(Error::UnparseableTime(bad.into()));
    assert_eq!(ctx.to_instant(bad), expected);
    assert!(ctx.is_this_month(bad).is_err());
    assert!(ctx.to_rss_string(bad).is_err());
    assert!(ctx.date_time_factory(bad, None).is_err());
}

#[test]
fn formats_follow_the_context_timezone_except_http() {
    let ctx = new_year().with_timezone(chrono_tz::America::New_York);
    let now = TimeLike::Now;

    assert_eq!(ctx.to_atom_string(now.clone()).unwrap(), "2026-01-01T04:30:00-05:00");
    assert_eq!(ctx.to_rss_string(now.clone()).unwrap(), "Thu, 01 Jan 2026 04:30:00 -0500");
    assert_eq!(ctx.to_http_string(now.clone()).unwrap(), "Thu, 01 Jan 2026 09:30:00 GMT");
    assert_eq!(ctx.to_date_time_string(now, None).unwrap(), "2026-01-01 04:30:00");
}

#[test]
fn formatted_feeds_parse_back_to_the_same_instant() {
    let ctx = new_year().with_timezone(chrono_tz::Asia::Kolkata);
    let instant = ctx.now_instant();
    for text in [
        ctx.to_atom_string(instant).unwrap(),
        ctx.to_rss_string(instant).unwrap(),
        ctx.to_http_string(instant).unwrap(),
        ctx.to_date_time_string(instant, None).unwrap(),
    ] {
        assert_eq!(ctx.to_instant(text.as_str()).unwrap(), instant, "{text}");
    }
}

#[test]
fn factory_and_timezones() {
    let ctx = new_year();
    let sydney = ctx.date_time_factory("tomorrow", Some("Australia/Sydney")).unwrap();
    assert_eq!(sydney.format("%Y-%m-%d %H:%M").to_string(), "2026-01-02 00:00");
    assert_eq!(ctx.timezone_of(None).unwrap(), chrono_tz::Tz::UTC);
    assert_eq!(
        ctx.timezone_of(Some("Atlantis/Capital")),
        Err(Error::InvalidTimezone("Atlantis/Capital".into()))
    );
}

#[test]
fn system_clock_context_sees_the_present() {
    let ctx = TimeContext::utc();
    assert_eq!(ctx.clock(), ClockSource::System);
    assert!(ctx.is_today(Utc::now()).unwrap());
    assert!(ctx.is_within_next("+1 hour", "+1 day").unwrap());
}

#[test]
fn masking_examples() {
    assert_eq!(mask_format("1234567890", "(###) ###-####"), "(123) 456-7890");
    assert_eq!(mask_format("1234567890123456", "****-****-####-####"), "****-****-9012-3456");
    assert_eq!(mask_format("12", "###-###"), "12#-###");
    assert_eq!(mask_format("", "###"), "###");

    let table = PhoneFormat::from(PhonePatterns::new(
        "###-####",
        "(###) ###-####",
        "+# (###) ###-####",
    ));
    assert_eq!(format_phone("1.800.555.0100", &table), "+1 (800) 555-0100");
    assert_eq!(format_ssn("078-05-1120".replace('-', ""), "***-**-####"), "***-**-1120");
    assert_eq!(CalendarUnit::Year.label(&new_year().now()), "2026");
}

#[cfg(feature = "serde")]
#[test]
fn serde_context_and_phone_format() {
    let ctx = new_year().with_timezone(chrono_tz::Europe::Berlin);
    let json = serde_json::to_string(&ctx).unwrap();
    assert!(json.contains("Europe/Berlin"));
    let back: TimeContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ctx);

    let defaulted: TimeContext = serde_json::from_str("{}").unwrap();
    assert_eq!(defaulted, TimeContext::utc());

    let single: PhoneFormat = serde_json::from_str(r####""###-####""####).unwrap();
    assert_eq!(single, PhoneFormat::from("###-####"));
    let table: PhoneFormat = serde_json::from_str(
        r####"{"local":"###-####","national":"(###) ###-####","international":"# (###) ###-####"}"####,
    )
    .unwrap();
    assert!(matches!(table, PhoneFormat::ByDigitCount(_)));
}
