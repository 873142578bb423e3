use crate::{
    db::{categories::Categories, tags::Tags, tasks::Tasks},
    libs::{
        context::AppContext,
        date_range::{DateRange, DateRangePicker, DateRangePreset},
        formatter::format_day,
        messages::Message,
        task::TaskFilter,
        time_parser::parse_range_bound,
        view::{Names, View},
    },
    msg_error, msg_error_anyhow, msg_print,
};
use anyhow::Result;
use chrono::{NaiveDateTime, NaiveTime};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Quick range ending today
    #[arg(long, value_enum, conflicts_with_all = ["from", "to"])]
    preset: Option<DateRangePreset>,
    /// First day, e.g. 2026-10-01 or "next monday"; defaults to the start of this month
    #[arg(long)]
    from: Option<String>,
    /// Last day; defaults to the end of this month
    #[arg(long)]
    to: Option<String>,
}

pub fn cmd(ctx: &AppContext, args: CalendarArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let now = ctx.now();

    let Some(range) = select_range(&args, now)? else {
        return Ok(());
    };

    let conn = &ctx.db.conn;
    let tasks = Tasks::new(conn, user.id).fetch(TaskFilter::DueBetween(range.start_date(), range.end_date()))?;
    let names = Names::new(&Tags::new(conn, user.id).list()?, &Categories::new(conn, user.id).list()?);

    msg_print!(
        Message::CalendarHeader(format_day(&range.start_date()), format_day(&range.end_date())),
        true
    );
    View::calendar(&range, &tasks, &names, now, &ctx.view_options()).print();
    Ok(())
}

/// Resolves the flags into a range; `None` after reporting an invalid one.
fn select_range(args: &CalendarArgs, now: NaiveDateTime) -> Result<Option<DateRange>> {
    let mut picker = DateRangePicker::new(DateRange::month_of(now), |_| {});

    if let Some(preset) = args.preset {
        picker.apply_preset(preset, now);
        return Ok(Some(picker.range()));
    }

    let current = picker.range();
    let start = match args.from.as_deref() {
        Some(input) => day_start(parse_day(input, now)?),
        None => current.start,
    };
    let end = match args.to.as_deref() {
        Some(input) => day_end(parse_day(input, now)?),
        None => current.end,
    };

    if !picker.select(start, end) {
        if let Some(error) = picker.error() {
            msg_error!(error);
        }
        return Ok(None);
    }
    Ok(Some(picker.range()))
}

fn parse_day(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    parse_range_bound(input, now).ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(input.to_string())))
}

fn day_start(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(NaiveTime::MIN)
}

fn day_end(value: NaiveDateTime) -> NaiveDateTime {
    let date = value.date();
    date.and_hms_opt(23, 59, 59).unwrap_or(value)
}
