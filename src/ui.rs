//! Display lines and renderers.
//!
//! [`build_lines`] turns a snapshot into text; [`TerminalRenderer`] shows it
//! live on the alternate screen, [`PlainRenderer`] writes it to any stream.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::debug;

use crate::analyzers::advice::{disksize_sufficient, min_recommended_disksize};
use crate::display_rules::{human, human_pct};
use crate::error::Result;
use crate::monitor::{Interrupt, Renderer};
use crate::theme;
use crate::types::{Confidence, Context, Snapshot};

/// How a line should be emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    /// A failed advisory check
    Warning,
    /// Carries a projection of this confidence
    Projection(Confidence),
    /// Memory usage at this percent of RAM
    Usage(u8),
}

/// One rendered line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub tone: Tone,
}

impl DisplayLine {
    fn normal(text: String) -> Self {
        Self {
            text,
            tone: Tone::Normal,
        }
    }

    fn check(text: String, ok: bool) -> Self {
        let tone = if ok { Tone::Normal } else { Tone::Warning };
        Self { text, tone }
    }
}

/// Static header (clock, distro, checks) and per-tick body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLines {
    pub header: Vec<DisplayLine>,
    pub body: Vec<DisplayLine>,
}

impl DisplayLines {
    /// All lines, header first.
    pub fn iter(&self) -> impl Iterator<Item = &DisplayLine> {
        self.header.iter().chain(self.body.iter())
    }
}

fn check_mark(ok: bool) -> &'static str {
    if ok {
        "...."
    } else {
        " NOT"
    }
}

/// Build the display for one snapshot. `clock` is the `HH:MM:SS` stamp.
#[must_use]
pub fn build_lines(snapshot: &Snapshot, context: &Context, clock: &str) -> DisplayLines {
    let memory = &snapshot.memory;
    let eff = &snapshot.projection;
    let ram = memory.total_bytes;
    let mut header = Vec::with_capacity(context.tunables.len() + 2);
    let mut body = Vec::new();

    header.push(DisplayLine::normal(format!(
        "{clock:<8}{:>8} : {}",
        "Distro", context.distro
    )));
    for t in &context.tunables {
        header.push(DisplayLine::check(
            format!(
                "{:>16} : vm.{:.<24}{} in [{}, {}]",
                t.value,
                t.name,
                check_mark(t.in_range()),
                t.least,
                t.most
            ),
            t.in_range(),
        ));
    }

    let disksize = snapshot.aggregated.disksize;
    let sufficient = disksize_sufficient(ram, disksize);
    header.push(DisplayLine::check(
        format!(
            "{:>16} : {:.<27}{} >= {}",
            human(disksize as f64),
            "zRAM.disksize",
            check_mark(sufficient),
            human(min_recommended_disksize(ram))
        ),
        sufficient,
    ));

    let used_pct = if ram > 0 {
        (100.0 * memory.used_bytes as f64 / ram as f64)
            .round_ties_even()
            .clamp(0.0, 100.0) as u8
    } else {
        0
    };
    body.push(DisplayLine::normal(format!(
        "{:>16} : {:<16} eTotal={}",
        human(ram as f64),
        "Total Memory",
        human_pct(eff.effective_max_capacity, ram)
    )));
    body.push(DisplayLine {
        text: format!(
            "{:>16} : {:<16}  eUsed={}",
            human_pct(memory.used_bytes as f64, ram),
            "Used",
            human_pct(eff.effective_used, ram)
        ),
        tone: Tone::Usage(used_pct),
    });
    body.push(DisplayLine::normal(format!(
        "{:>16} : {:<16} eAvail={}",
        human_pct(memory.available_bytes as f64, ram),
        "Available",
        human_pct(eff.effective_available, ram)
    )));

    for (dev, stats) in &snapshot.devices {
        body.push(DisplayLine::normal(format!(
            "{:>16} : {} limit={}",
            format!("{dev}: uncmpr"),
            human(stats.orig_data_size as f64),
            human(stats.disksize as f64)
        )));

        let factor = stats.compression_factor();
        let mut line = format!(
            "{:>16} : {} {factor:.2}:1",
            "cmpr",
            human_pct(stats.compr_data_size as f64, ram)
        );
        if eff.ratio_current != factor {
            line.push_str(&format!(" eff={:.2}:1", eff.ratio_current));
        }
        line.push_str(&format!(" → {:.2}:1 ({})", eff.ratio_projected, eff.confidence));
        body.push(DisplayLine {
            text: line,
            tone: Tone::Projection(eff.confidence),
        });

        let ram_part = if stats.mem_used_total > 0 {
            human_pct(stats.mem_used_total as f64, ram)
        } else {
            "n/a".to_string()
        };
        body.push(DisplayLine::normal(format!(
            "{:>16} : {ram_part} most={} limit={}",
            "RAM",
            human_pct(stats.mem_used_max as f64, ram),
            human_pct(stats.mem_limit as f64, ram)
        )));
    }

    DisplayLines { header, body }
}

/// Current wall-clock time as `HH:MM:SS`.
#[must_use]
pub fn clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn styled(line: &DisplayLine, base: Style) -> Line<'_> {
    let style = match line.tone {
        Tone::Normal => base,
        Tone::Warning => theme::warning_style(),
        Tone::Projection(c) => base.fg(theme::confidence_color(c)),
        Tone::Usage(pct) => base.fg(theme::percent_color(f64::from(pct))),
    };
    Line::styled(line.text.as_str(), style)
}

/// Draw header and body blocks filling the frame.
pub fn draw(f: &mut Frame, lines: &DisplayLines) {
    let area = f.area();
    let header_height = (lines.header.len() as u16).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);

    let header: Vec<Line> = lines
        .header
        .iter()
        .map(|l| styled(l, theme::header_style()))
        .collect();
    let header_block = Block::default()
        .title(" zram-advisor │ any key quits ")
        .borders(Borders::ALL)
        .border_type(theme::borders::STYLE)
        .border_style(Style::default().fg(theme::borders::HEADER));
    f.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

    let body: Vec<Line> = lines
        .body
        .iter()
        .map(|l| styled(l, Style::default()))
        .collect();
    let body_block = Block::default()
        .title(" Effective Memory ")
        .borders(Borders::ALL)
        .border_type(theme::borders::STYLE)
        .border_style(Style::default().fg(theme::borders::BODY));
    f.render_widget(Paragraph::new(body).block(body_block), chunks[1]);
}

fn write_final<W: Write>(out: &mut W, lines: &DisplayLines) -> io::Result<()> {
    writeln!(out, "\nFinal snapshot:")?;
    for line in lines.iter() {
        writeln!(out, "{}", line.text)?;
    }
    writeln!(out)?;
    out.flush()
}

/// Writes lines as plain text (single-shot mode, pipes).
pub struct PlainRenderer<W: Write> {
    out: W,
    clock: fn() -> String,
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, clock }
    }

    /// Use a fixed clock (tests).
    pub fn with_clock(out: W, clock: fn() -> String) -> Self {
        Self { out, clock }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot, context: &Context) -> Result<()> {
        let lines = build_lines(snapshot, context, &(self.clock)());
        for line in lines.iter() {
            writeln!(self.out, "{}", line.text)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, snapshot: &Snapshot, context: &Context) -> Result<()> {
        let lines = build_lines(snapshot, context, &(self.clock)());
        write_final(&mut self.out, &lines)?;
        Ok(())
    }
}

/// Live view on the alternate screen.
///
/// The terminal is restored before the final snapshot is printed, and on drop
/// if the loop bails out early.
pub struct TerminalRenderer {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self { terminal: None }
    }

    /// Every teardown step runs; the first failure is reported.
    fn restore(&mut self) -> io::Result<()> {
        let Some(mut terminal) = self.terminal.take() else {
            return Ok(());
        };
        let steps = [
            disable_raw_mode(),
            io::stdout().execute(LeaveAlternateScreen).map(|_| ()),
            terminal.show_cursor(),
        ];
        debug!("terminal restored");
        first_error(steps)
    }
}

fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().fold(Ok(()), |acc, step| acc.and(step))
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn start(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        self.terminal = Some(terminal);
        debug!("terminal started");
        Ok(())
    }

    fn render(&mut self, snapshot: &Snapshot, context: &Context) -> Result<()> {
        self.start()?;
        let lines = build_lines(snapshot, context, &clock());
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.draw(|f| draw(f, &lines))?;
        }
        Ok(())
    }

    fn finish(&mut self, snapshot: &Snapshot, context: &Context) -> Result<()> {
        self.restore()?;
        let lines = build_lines(snapshot, context, &clock());
        write_final(&mut io::stdout().lock(), &lines)?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Cancels on any key press (Ctrl-C arrives as a key in raw mode).
#[derive(Debug, Default)]
pub struct KeypressInterrupt;

impl Interrupt for KeypressInterrupt {
    fn wait(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(false);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    debug!(code = ?key.code, "key press");
                    return Ok(true);
                }
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
        }
    }
}
