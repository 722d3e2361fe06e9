use crate::components::calendar::Period;
use crate::components::schedule::SectionKind;
use crate::components::{CalendarHandle, ComponentManager, ScheduleHandle};
use crate::config::Config;
use crate::error::{invalid_argument, ScheduleResult};
use crate::utils::time::today_in;
use rust_i18n::t;
use std::sync::Arc;
use std::time::Duration;
use std::io::BufRead;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error};

// Export submodules
pub mod calendar;
pub mod projects;

/// Polling interval while waiting for background fetches
const SETTLE_POLL: Duration = Duration::from_millis(25);
/// Upper bound on how long a command waits for fetches before redrawing
const SETTLE_LIMIT: Duration = Duration::from_secs(2);

/// Shared context for all commands
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<RwLock<Config>>,
    pub calendar: Option<CalendarHandle>,
    pub schedule: Option<ScheduleHandle>,
}

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Redraw without changing anything
    Show,
    Next,
    Previous,
    Goto(Period),
    Day(u32),
    Reload,
    Apply(String),
    Cancel(String),
    Toggle(SectionKind),
    Help,
    Quit,
}

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

fn required<'a>(arg: Option<&'a str>, what: &str) -> ScheduleResult<&'a str> {
    arg.ok_or_else(|| invalid_argument(&format!("missing {}", what)))
}

fn parse_period(raw: &str) -> ScheduleResult<Period> {
    let (year, month) = raw
        .split_once('-')
        .ok_or_else(|| invalid_argument(&format!("expected YYYY-MM, got {}", raw)))?;
    let year = year
        .parse::<i32>()
        .map_err(|_| invalid_argument(&format!("bad year: {}", year)))?;
    let month = month
        .parse::<u32>()
        .map_err(|_| invalid_argument(&format!("bad month: {}", month)))?;
    Period::new(year, month)
}

impl Command {
    /// Parse a console line
    pub fn parse(input: &str) -> ScheduleResult<Self> {
        let mut parts = input.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(Command::Show);
        };
        let arg = parts.next();

        let command = match verb {
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "g" | "goto" => Command::Goto(parse_period(required(arg, "month")?)?),
            "d" | "day" => {
                let raw = required(arg, "day")?;
                let day = raw
                    .parse::<u32>()
                    .map_err(|_| invalid_argument(&format!("bad day: {}", raw)))?;
                Command::Day(day)
            }
            "r" | "reload" => Command::Reload,
            "a" | "apply" => Command::Apply(required(arg, "project id")?.to_string()),
            "c" | "cancel" => Command::Cancel(required(arg, "project id")?.to_string()),
            "e" | "expand" => {
                let raw = required(arg, "section")?;
                let kind = SectionKind::parse(raw)
                    .ok_or_else(|| invalid_argument(&format!("unknown section: {}", raw)))?;
                Command::Toggle(kind)
            }
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => {
                return Err(invalid_argument(&t!("unknown_command", input = other)));
            }
        };

        if parts.next().is_some() {
            return Err(invalid_argument(&format!("too many arguments: {}", input.trim())));
        }
        Ok(command)
    }
}

impl CommandContext {
    /// Build the context from the initialized components
    pub async fn from_components(components: &ComponentManager) -> Self {
        let (calendar, schedule) =
            futures::join!(components.calendar_handle(), components.schedule_handle());
        Self {
            config: components.get_config(),
            calendar,
            schedule,
        }
    }

    fn calendar(&self) -> ScheduleResult<&CalendarHandle> {
        self.calendar
            .as_ref()
            .ok_or_else(|| invalid_argument(&t!("component_unavailable", name = "calendar")))
    }

    fn schedule(&self) -> ScheduleResult<&ScheduleHandle> {
        self.schedule
            .as_ref()
            .ok_or_else(|| invalid_argument(&t!("component_unavailable", name = "schedule")))
    }

    async fn today(&self) -> ScheduleResult<chrono::NaiveDate> {
        let timezone = self.config.read().await.timezone.clone();
        today_in(&timezone)
    }

    /// Wait a little for in-flight fetches so the redraw shows their results
    pub async fn settle(&self) -> ScheduleResult<()> {
        let today = self.today().await?;
        let deadline = tokio::time::Instant::now() + SETTLE_LIMIT;

        while tokio::time::Instant::now() < deadline {
            let mut loading = false;
            if let Some(calendar) = &self.calendar {
                loading |= calendar.snapshot(today).await?.status.is_loading();
            }
            if let Some(schedule) = &self.schedule {
                let board = schedule.snapshot().await?;
                loading |= board.sections().any(|s| s.status().is_loading());
            }
            if !loading {
                return Ok(());
            }
            tokio::time::sleep(SETTLE_POLL).await;
        }

        debug!("Fetches still running after {:?}, drawing anyway", SETTLE_LIMIT);
        Ok(())
    }

    /// Calendar and project sections as text
    pub async fn render(&self) -> ScheduleResult<String> {
        let mut out = String::new();
        if let Some(handle) = &self.calendar {
            let snapshot = handle.snapshot(self.today().await?).await?;
            out.push_str(&calendar::render_month(&snapshot));
        }
        if let Some(handle) = &self.schedule {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&projects::render_board(&handle.snapshot().await?));
        }
        Ok(out)
    }

    /// Run one command and produce the text to print
    pub async fn execute(&self, command: Command) -> ScheduleResult<Outcome> {
        let alert = match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => return Ok(Outcome::Print(t!("help").to_string())),
            Command::Day(day) => {
                let snapshot = self.calendar()?.snapshot(self.today().await?).await?;
                return Ok(Outcome::Print(calendar::render_day(&snapshot.grid, day)));
            }
            Command::Show => None,
            Command::Next => {
                self.calendar()?.next().await?;
                None
            }
            Command::Previous => {
                self.calendar()?.previous().await?;
                None
            }
            Command::Goto(period) => {
                self.calendar()?.show(period).await?;
                None
            }
            Command::Reload => {
                if let Some(calendar) = &self.calendar {
                    calendar.reload().await?;
                }
                if let Some(schedule) = &self.schedule {
                    schedule.refresh().await?;
                }
                None
            }
            Command::Toggle(kind) => {
                self.schedule()?.toggle_section(kind).await?;
                None
            }
            Command::Apply(id) => Some(match self.schedule()?.apply(id).await {
                Ok(project) => t!("applied_ok", title = project.title).to_string(),
                Err(e) => t!("apply_failed", error = e).to_string(),
            }),
            Command::Cancel(id) => Some(match self.schedule()?.cancel(id).await {
                Ok(project) => t!("cancelled_ok", title = project.title).to_string(),
                Err(e) => t!("cancel_failed", error = e).to_string(),
            }),
        };

        self.settle().await?;
        let mut out = self.render().await?;
        if let Some(alert) = alert {
            out.push('\n');
            out.push_str(&alert);
            out.push('\n');
        }
        Ok(Outcome::Print(out))
    }
}

/// Stdin lines forwarded from a detached thread, so a pending read never
/// holds up runtime shutdown
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read stdin: {:?}", e);
                    break;
                }
            }
        }
    });
    line_rx
}

/// Run commands from `lines` until `q` or the end of input
pub async fn run_console<W>(
    ctx: CommandContext,
    mut lines: mpsc::Receiver<String>,
    mut out: W,
) -> ScheduleResult<()>
where
    W: AsyncWrite + Unpin,
{
    ctx.settle().await?;
    out.write_all(ctx.render().await?.as_bytes()).await?;
    out.write_all(b"> ").await?;
    out.flush().await?;

    while let Some(line) = lines.recv().await {
        let output = match Command::parse(&line) {
            Ok(command) => match ctx.execute(command).await {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Print(text)) => text,
                Err(e) => {
                    error!("Command '{}' failed: {:?}", line.trim(), e);
                    format!("{}\n", e)
                }
            },
            Err(e) => format!("{}\n", e),
        };

        out.write_all(output.as_bytes()).await?;
        out.write_all(b"> ").await?;
        out.flush().await?;
    }

    Ok(())
}
