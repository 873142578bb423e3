use crate::{
    db::tasks::Tasks,
    libs::{
        context::AppContext,
        editable::{EditableField, FieldAction, FieldEvent, Submission},
        formatter::format_due,
        messages::Message,
        task::Task,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io::{self, Write};

const PROMPT: &str = "> ";

/// Restores the terminal when dropped, including on early returns.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableBracketedPaste);
        let _ = disable_raw_mode();
    }
}

pub fn cmd(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user()?;
    let now = ctx.now();
    let reverse = ctx.config.accessibility.high_contrast;

    msg_print!(Message::CaptureHint);
    let submission = {
        let _guard = RawModeGuard::new()?;
        read_task(EditableField::new(now), now, reverse)?
    };

    let Some(submission) = submission else {
        msg_info!(Message::CaptureCancelled);
        return Ok(());
    };

    let task = Task::new(&submission.title, "", submission.due);
    Tasks::new(&ctx.db.conn, user.id).insert(&task)?;
    match task.due_date {
        Some(due) => msg_success!(Message::TaskCreatedWithDue(task.title, format_due(&due, &now))),
        None => msg_success!(Message::TaskCreated(task.title)),
    }
    Ok(())
}

fn read_task(mut field: EditableField, now: NaiveDateTime, reverse: bool) -> Result<Option<Submission>> {
    let mut stdout = io::stdout();
    redraw(&mut stdout, &field, now, reverse)?;

    loop {
        let event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => FieldEvent::from_key(key),
            Event::Paste(text) => Some(FieldEvent::Paste(text)),
            _ => None,
        };
        let Some(event) = event else { continue };

        match field.handle(event) {
            FieldAction::Submit(submission) => {
                write!(stdout, "\r\n")?;
                stdout.flush()?;
                return Ok(Some(submission));
            }
            FieldAction::Cancel => {
                write!(stdout, "\r\n")?;
                stdout.flush()?;
                return Ok(None);
            }
            FieldAction::None => redraw(&mut stdout, &field, now, reverse)?,
        }
    }
}

fn redraw(stdout: &mut io::Stdout, field: &EditableField, now: NaiveDateTime, reverse: bool) -> Result<()> {
    let hint = match field.parsed().time {
        Some(due) => format!("   [{}]", format_due(&due, &now)),
        None => String::new(),
    };
    let caret_column = PROMPT.chars().count() + field.caret_offset();

    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(PROMPT),
        Print(field.content().render(reverse)),
        Print(hint),
        MoveToColumn(caret_column as u16)
    )?;
    stdout.flush()?;
    Ok(())
}
