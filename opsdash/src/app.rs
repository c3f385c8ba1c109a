//! App state and main loop: input handling, polling subscriptions, and drawing.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use tokio::time::sleep;

use crate::api::{ApiClient, ApiError};
use crate::poll::Poller;
use crate::tasks::{top_recent, ActionOutcome, TaskController};
use crate::types::{DiskIoMetrics, DiskMetrics, Health, LogEntry, NetMetrics};
use crate::ui::chartpane::{draw_chart, draw_placeholder};
use crate::ui::header::draw_header;
use crate::ui::kpi::{draw_kpi_row, KpiCard};
use crate::ui::logs::draw_logs;
use crate::ui::tasks::{draw_add_form, draw_task_table, draw_top_tasks, AddForm, FormFocus};
use crate::ui::{theme, util};
use crate::window::{seeded_wave, RandomWalk, SeriesWindow};

const SYNTH_TICK: Duration = Duration::from_millis(1200);
const HEALTH_TICK: Duration = Duration::from_secs(2);
const LOGS_TICK: Duration = Duration::from_secs(5);
const PANEL_TICK: Duration = Duration::from_secs(15);

const METRIC_RANGES: &[&str] = &["5m", "30m", "1h", "6h", "24h"];
const DISK_RANGES: &[&str] = &["1h", "6h", "24h"];
const IO_RANGES: &[&str] = &["30m", "1h", "6h"];

fn next_range(ranges: &[&str], current: &str) -> String {
    let idx = ranges.iter().position(|r| *r == current).unwrap_or(0);
    ranges[(idx + 1) % ranges.len()].to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Dashboard,
    CpuMem,
    Disk,
    Net,
    Logs,
    Tasks,
}

impl View {
    fn tab_index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::CpuMem => 1,
            View::Disk => 2,
            View::Net => 3,
            View::Logs => 4,
            View::Tasks => 5,
        }
    }
}

/// CPU and memory panels load together as one joined pair of requests, so
/// the two charts always show the same range.
#[derive(Debug, Clone)]
pub struct CpuMemData {
    pub cpu: crate::types::CpuMetrics,
    pub mem: crate::types::MemMetrics,
}

// One synthetic KPI feed: a bounded random walk pushed into a window.
struct Synth {
    label: &'static str,
    walk: RandomWalk,
    window: SeriesWindow<f64>,
    color: Color,
    fmt: fn(f64) -> String,
}

impl Synth {
    fn new(
        label: &'static str,
        start: f64,
        amp: f64,
        lo: f64,
        hi: f64,
        color: Color,
        fmt: fn(f64) -> String,
        rng: &mut StdRng,
    ) -> Self {
        let seed = seeded_wave(60, start, amp * 5.0, rng)
            .into_iter()
            .map(|v| v.clamp(lo, hi));
        Self {
            label,
            walk: RandomWalk::new(start, amp, lo, hi),
            window: SeriesWindow::with_seed(60, seed),
            color,
            fmt,
        }
    }
}

pub struct App {
    client: ApiClient,
    tasks_ctl: Arc<TaskController<ApiClient>>,
    health: Poller<(), Health>,
    view: View,

    rng: StdRng,
    synths: Vec<Synth>,
    last_synth_tick: Instant,

    cpu_mem: Option<Poller<String, CpuMemData>>,
    disk: Option<Poller<String, DiskMetrics>>,
    diskio: Option<Poller<String, DiskIoMetrics>>,
    selected_mount: usize,
    net: Option<Poller<String, NetMetrics>>,
    logs: Option<Poller<String, Vec<LogEntry>>>,

    filter: String,
    filter_edit: Option<String>,
    task_sel: usize,
    add_form: Option<AddForm>,
    notice: Arc<Mutex<Option<String>>>,

    should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        let tasks_ctl = Arc::new(TaskController::new(client.clone()));
        let health = {
            let client = client.clone();
            Poller::spawn(HEALTH_TICK, (), move |()| -> BoxFuture<'static, Result<Health, ApiError>> {
                let client = client.clone();
                Box::pin(async move { client.health().await })
            })
        };

        let mut rng = StdRng::from_entropy();
        let synths = vec![
            Synth::new("CPU", 42.0, 0.6, 5.0, 98.0, theme::ACCENT, util::fmt_pct, &mut rng),
            Synth::new("Memory", 73.0, 0.5, 10.0, 97.0, theme::MEM, util::fmt_pct, &mut rng),
            Synth::new("Disk I/O", 32.5, 1.2, 1.0, 120.0, theme::READ, util::fmt_mbs, &mut rng),
            Synth::new("Network", 540.0, 8.0, 10.0, 2000.0, theme::WRITE, util::fmt_kbs, &mut rng),
        ];

        // Prime the task list for the dashboard excerpt.
        {
            let ctl = Arc::clone(&tasks_ctl);
            tokio::spawn(async move { ctl.reload().await });
        }

        Self {
            client,
            tasks_ctl,
            health,
            view: View::Dashboard,
            rng,
            synths,
            last_synth_tick: Instant::now(),
            cpu_mem: None,
            disk: None,
            diskio: None,
            selected_mount: 0,
            net: None,
            logs: None,
            filter: String::new(),
            filter_edit: None,
            task_sel: 0,
            add_form: None,
            notice: Arc::new(Mutex::new(None)),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    self.handle_key(k);
                }
            }
            if self.should_quit {
                break;
            }

            if self.last_synth_tick.elapsed() >= SYNTH_TICK {
                for s in &mut self.synths {
                    let v = s.walk.step(&mut self.rng);
                    s.window.push(v);
                }
                self.last_synth_tick = Instant::now();
            }

            terminal.draw(|f| self.draw(f))?;
            sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    }

    // --- input -----------------------------------------------------------

    fn handle_key(&mut self, k: KeyEvent) {
        // Text-entry modes capture keys first.
        if self.filter_edit.is_some() {
            self.handle_filter_key(k);
            return;
        }
        if self.add_form.is_some() {
            self.handle_form_key(k);
            return;
        }

        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.switch_view(View::Dashboard),
            KeyCode::Char('2') => self.switch_view(View::CpuMem),
            KeyCode::Char('3') => self.switch_view(View::Disk),
            KeyCode::Char('4') => self.switch_view(View::Net),
            KeyCode::Char('5') => self.switch_view(View::Logs),
            KeyCode::Char('6') => self.switch_view(View::Tasks),
            KeyCode::Char('r') => self.cycle_range(),
            KeyCode::Char('i') => {
                if self.view == View::Disk {
                    if let Some(p) = &self.diskio {
                        p.set_params(next_range(IO_RANGES, &p.params()));
                    }
                }
            }
            KeyCode::Char('/') if self.view == View::Logs => {
                self.filter_edit = Some(self.filter.clone());
            }
            KeyCode::Left if self.view == View::Disk => {
                self.selected_mount = self.selected_mount.saturating_sub(1);
            }
            KeyCode::Right if self.view == View::Disk => {
                let count = self.mount_count();
                if count > 0 {
                    self.selected_mount = (self.selected_mount + 1).min(count - 1);
                }
            }
            KeyCode::Up if self.view == View::Tasks => {
                self.task_sel = self.task_sel.saturating_sub(1);
            }
            KeyCode::Down if self.view == View::Tasks => {
                let count = self.tasks_ctl.snapshot().tasks.len();
                if count > 0 {
                    self.task_sel = (self.task_sel + 1).min(count - 1);
                }
            }
            KeyCode::Enter if self.view == View::Tasks => self.run_selected_task(),
            KeyCode::Char('d') if self.view == View::Tasks => self.delete_selected_task(),
            KeyCode::Char('a') if self.view == View::Tasks => {
                self.add_form = Some(AddForm::default());
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Enter => {
                if let Some(buf) = self.filter_edit.take() {
                    self.filter = buf;
                    if let Some(p) = &self.logs {
                        // Filter is the subscription's parameter: changing
                        // it re-enters the fetch cycle immediately.
                        p.set_params(self.filter.clone());
                    }
                }
            }
            KeyCode::Esc => {
                self.filter_edit = None;
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.filter_edit.as_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = self.filter_edit.as_mut() {
                    buf.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Esc => {
                self.add_form = None;
            }
            KeyCode::Tab => {
                if let Some(form) = self.add_form.as_mut() {
                    form.focus = match form.focus {
                        FormFocus::Name => FormFocus::Every,
                        FormFocus::Every => FormFocus::Name,
                    };
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.add_form.as_mut() {
                    match form.focus {
                        FormFocus::Name => form.name.pop(),
                        FormFocus::Every => form.every.pop(),
                    };
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.add_form.as_mut() {
                    match form.focus {
                        FormFocus::Name => form.name.push(c),
                        FormFocus::Every if c.is_ascii_digit() => form.every.push(c),
                        FormFocus::Every => {}
                    }
                }
            }
            KeyCode::Enter => {
                let Some(form) = self.add_form.take() else { return };
                let every = form.every.trim().parse::<u32>().unwrap_or(0);
                let ctl = Arc::clone(&self.tasks_ctl);
                let notice = Arc::clone(&self.notice);
                tokio::spawn(async move {
                    let msg = match ctl.create(&form.name, every).await {
                        Ok(()) => None,
                        Err(e) => Some(e.to_string()),
                    };
                    *notice.lock().unwrap() = msg;
                });
            }
            _ => {}
        }
    }

    fn switch_view(&mut self, next: View) {
        if next == self.view {
            return;
        }
        // Dropping a poller stops its timer and invalidates its generation,
        // so nothing settles into a panel that is no longer on screen.
        match self.view {
            View::CpuMem => self.cpu_mem = None,
            View::Disk => {
                self.disk = None;
                self.diskio = None;
            }
            View::Net => self.net = None,
            View::Logs => {
                self.logs = None;
                self.filter_edit = None;
            }
            View::Tasks => self.add_form = None,
            View::Dashboard => {}
        }
        self.view = next;
        self.ensure_view_pollers();
    }

    fn ensure_view_pollers(&mut self) {
        let client = self.client.clone();
        match self.view {
            View::CpuMem => {
                if self.cpu_mem.is_none() {
                    self.cpu_mem = Some(Poller::spawn(
                        PANEL_TICK,
                        "1h".to_string(),
                        move |range: String| -> BoxFuture<'static, Result<CpuMemData, ApiError>> {
                            let client = client.clone();
                            Box::pin(async move {
                                let (cpu, mem) =
                                    tokio::try_join!(client.cpu(&range), client.mem(&range))?;
                                Ok(CpuMemData { cpu, mem })
                            })
                        },
                    ));
                }
            }
            View::Disk => {
                if self.disk.is_none() {
                    let c = client.clone();
                    self.disk = Some(Poller::spawn(
                        PANEL_TICK,
                        "24h".to_string(),
                        move |range: String| -> BoxFuture<'static, Result<DiskMetrics, ApiError>> {
                            let c = c.clone();
                            Box::pin(async move { c.disk(&range).await })
                        },
                    ));
                }
                if self.diskio.is_none() {
                    self.diskio = Some(Poller::spawn(
                        PANEL_TICK,
                        "1h".to_string(),
                        move |range: String| -> BoxFuture<'static, Result<DiskIoMetrics, ApiError>> {
                            let client = client.clone();
                            Box::pin(async move { client.diskio(&range).await })
                        },
                    ));
                }
            }
            View::Net => {
                if self.net.is_none() {
                    self.net = Some(Poller::spawn(
                        PANEL_TICK,
                        "1h".to_string(),
                        move |range: String| -> BoxFuture<'static, Result<NetMetrics, ApiError>> {
                            let client = client.clone();
                            Box::pin(async move { client.net(&range).await })
                        },
                    ));
                }
            }
            View::Logs => {
                if self.logs.is_none() {
                    self.logs = Some(Poller::spawn(
                        LOGS_TICK,
                        self.filter.clone(),
                        move |q: String| -> BoxFuture<'static, Result<Vec<LogEntry>, ApiError>> {
                            let client = client.clone();
                            Box::pin(async move { client.logs(&q).await })
                        },
                    ));
                }
            }
            View::Tasks | View::Dashboard => {
                let ctl = Arc::clone(&self.tasks_ctl);
                tokio::spawn(async move { ctl.reload().await });
            }
        }
    }

    fn cycle_range(&mut self) {
        match self.view {
            View::CpuMem => {
                if let Some(p) = &self.cpu_mem {
                    p.set_params(next_range(METRIC_RANGES, &p.params()));
                }
            }
            View::Disk => {
                if let Some(p) = &self.disk {
                    p.set_params(next_range(DISK_RANGES, &p.params()));
                }
            }
            View::Net => {
                if let Some(p) = &self.net {
                    p.set_params(next_range(METRIC_RANGES, &p.params()));
                }
            }
            _ => {}
        }
    }

    fn mount_count(&self) -> usize {
        self.disk
            .as_ref()
            .and_then(|p| p.snapshot().data.map(|d| d.mounts.len()))
            .unwrap_or(0)
    }

    fn run_selected_task(&mut self) {
        let snap = self.tasks_ctl.snapshot();
        let Some(task) = snap.tasks.get(self.task_sel) else { return };
        let id = task.id.clone();
        let ctl = Arc::clone(&self.tasks_ctl);
        let notice = Arc::clone(&self.notice);
        tokio::spawn(async move {
            let msg = match ctl.run_now(&id).await {
                ActionOutcome::Busy => Some("another action is still running".to_string()),
                ActionOutcome::Failed => Some("run failed — list reloaded".to_string()),
                ActionOutcome::Applied => None,
            };
            *notice.lock().unwrap() = msg;
        });
    }

    fn delete_selected_task(&mut self) {
        let snap = self.tasks_ctl.snapshot();
        let Some(task) = snap.tasks.get(self.task_sel) else { return };
        let id = task.id.clone();
        let ctl = Arc::clone(&self.tasks_ctl);
        let notice = Arc::clone(&self.notice);
        tokio::spawn(async move {
            let msg = match ctl.remove(&id).await {
                ActionOutcome::Busy => Some("another action is still running".to_string()),
                ActionOutcome::Failed => Some("delete failed — list reloaded".to_string()),
                ActionOutcome::Applied => None,
            };
            *notice.lock().unwrap() = msg;
        });
    }

    // --- drawing ---------------------------------------------------------

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(6)])
            .split(f.area());

        draw_header(f, rows[0], &self.health.snapshot(), self.view.tab_index());

        match self.view {
            View::Dashboard => self.draw_dashboard(f, rows[1]),
            View::CpuMem => self.draw_cpu_mem(f, rows[1]),
            View::Disk => self.draw_disk(f, rows[1]),
            View::Net => self.draw_net(f, rows[1]),
            View::Logs => {
                let snap = self
                    .logs
                    .as_ref()
                    .map(|p| p.snapshot())
                    .unwrap_or_default();
                let (text, editing) = match &self.filter_edit {
                    Some(buf) => (buf.as_str(), true),
                    None => (self.filter.as_str(), false),
                };
                draw_logs(f, rows[1], &snap, text, editing);
            }
            View::Tasks => self.draw_tasks(f, rows[1]),
        }
    }

    fn draw_dashboard(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(6)])
            .split(area);

        let cards: Vec<KpiCard> = self
            .synths
            .iter()
            .map(|s| KpiCard {
                label: s.label,
                value: (s.fmt)(s.walk.last()),
                data: s.window.iter().map(|v| v.round() as u64).collect(),
                color: s.color,
            })
            .collect();
        draw_kpi_row(f, rows[0], &cards);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let io = &self.synths[2];
        draw_chart(
            f,
            cols[0],
            &format!("{} (MB/s)", io.label),
            &io.window.samples(),
            io.color,
        );

        let snap = self.tasks_ctl.snapshot();
        draw_top_tasks(f, cols[1], &top_recent(&snap.tasks, 3));
    }

    fn draw_cpu_mem(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let snap = self
            .cpu_mem
            .as_ref()
            .map(|p| p.snapshot())
            .unwrap_or_default();
        match (&snap.data, &snap.error) {
            (Some(d), _) => {
                let cpu_series: Vec<f64> = d.cpu.points.iter().map(|p| p.v).collect();
                let cpu_title = format!(
                    "CPU % ({}) avg {:.1} p95 {:.1} (r cycles range)",
                    d.cpu.range, d.cpu.avg, d.cpu.p95
                );
                draw_chart(f, rows[0], &cpu_title, &cpu_series, theme::ACCENT);

                let mem_series: Vec<f64> = d.mem.points.iter().map(|p| p.v).collect();
                let mem_title =
                    format!("Memory used % ({}) latest {:.1}", d.mem.range, d.mem.latest);
                draw_chart(f, rows[1], &mem_title, &mem_series, theme::MEM);
            }
            (None, Some(e)) => {
                draw_placeholder(f, rows[0], &format!("CPU % — error: {e}"));
                draw_placeholder(f, rows[1], "Memory used %");
            }
            (None, None) => {
                draw_placeholder(f, rows[0], "CPU %");
                draw_placeholder(f, rows[1], "Memory used %");
            }
        }
    }

    fn draw_disk(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(9),
            ])
            .split(area);

        let disk_snap = self.disk.as_ref().map(|p| p.snapshot()).unwrap_or_default();
        match &disk_snap.data {
            Some(d) if !d.mounts.is_empty() => {
                let sel = self.selected_mount.min(d.mounts.len() - 1);
                let mut spans = vec![Span::styled("Mounts (←/→): ", Style::default().fg(theme::DIM))];
                for (i, m) in d.mounts.iter().enumerate() {
                    let style = if i == sel {
                        Style::default().fg(theme::ACCENT)
                    } else {
                        Style::default().fg(theme::DIM)
                    };
                    spans.push(Span::styled(
                        format!(" {} ", util::truncate_middle(&m.mount, 20)),
                        style,
                    ));
                }
                f.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

                let mount = &d.mounts[sel];
                let series: Vec<f64> = mount.points.iter().map(|p| p.used_pct).collect();
                let title = match mount.points.last() {
                    Some(last) => format!(
                        "{} usage % ({}) — {} / {} (r cycles range)",
                        mount.mount,
                        d.range,
                        util::fmt_gb(last.used_gb),
                        util::fmt_gb(last.total_gb),
                    ),
                    None => format!("{} usage % ({})", mount.mount, d.range),
                };
                draw_chart(f, rows[1], &title, &series, theme::ACCENT);
            }
            Some(_) => {
                draw_placeholder(f, rows[1], "No partitions reported yet.");
            }
            None => {
                let title = match &disk_snap.error {
                    Some(e) => format!("Partitions — error: {e}"),
                    None => "Partitions".to_string(),
                };
                draw_placeholder(f, rows[1], &title);
            }
        }

        let io_snap = self.diskio.as_ref().map(|p| p.snapshot()).unwrap_or_default();
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        match &io_snap.data {
            Some(d) => {
                let read: Vec<f64> = d.points.iter().map(|p| p.read_mbs).collect();
                let write: Vec<f64> = d.points.iter().map(|p| p.write_mbs).collect();
                draw_chart(
                    f,
                    cols[0],
                    &format!("Read MB/s ({}) (i cycles range)", d.range),
                    &read,
                    theme::READ,
                );
                draw_chart(f, cols[1], &format!("Write MB/s ({})", d.range), &write, theme::WRITE);
            }
            None => {
                draw_placeholder(f, cols[0], "Read MB/s");
                draw_placeholder(f, cols[1], "Write MB/s");
            }
        }
    }

    fn draw_net(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let snap = self.net.as_ref().map(|p| p.snapshot()).unwrap_or_default();
        match (&snap.data, &snap.error) {
            (Some(d), _) => {
                let rx: Vec<f64> = d.points.iter().map(|p| p.rx_kbs).collect();
                let tx: Vec<f64> = d.points.iter().map(|p| p.tx_kbs).collect();
                draw_chart(
                    f,
                    rows[0],
                    &format!("Download KB/s ({}) (r cycles range)", d.range),
                    &rx,
                    theme::READ,
                );
                draw_chart(f, rows[1], &format!("Upload KB/s ({})", d.range), &tx, theme::WRITE);
            }
            (None, Some(e)) => {
                draw_placeholder(f, rows[0], &format!("Download KB/s — error: {e}"));
                draw_placeholder(f, rows[1], "Upload KB/s");
            }
            (None, None) => {
                draw_placeholder(f, rows[0], "Download KB/s");
                draw_placeholder(f, rows[1], "Upload KB/s");
            }
        }
    }

    fn draw_tasks(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let has_form = self.add_form.is_some();
        let constraints = if has_form {
            vec![
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
            ]
        } else {
            vec![Constraint::Min(4), Constraint::Length(1)]
        };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        if let Some(form) = &self.add_form {
            draw_add_form(f, rows[idx], form);
            idx += 1;
        }

        let snap = self.tasks_ctl.snapshot();
        if !snap.tasks.is_empty() {
            self.task_sel = self.task_sel.min(snap.tasks.len() - 1);
        }
        draw_task_table(f, rows[idx], &snap, self.task_sel);
        idx += 1;

        if let Some(msg) = self.notice.lock().unwrap().clone() {
            f.render_widget(
                Paragraph::new(msg).style(Style::default().fg(theme::BAD)),
                rows[idx],
            );
        }
    }
}
