use anyhow::Result;
use chrono::Utc;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{
        Axis, BarChart, Block, BorderType, Borders, Chart, Clear, Dataset, Gauge, GraphType,
        Paragraph, Tabs, Wrap,
    },
};
use std::io::stdout;
use std::time::Duration;
use tracing::warn;

use crate::carousel::{Carousel, ITEMS_PER_VIEW};
use crate::client::JobsApi;
use crate::fetch::{FetchEvent, Fetcher};
use crate::models::{Analytics, Job};
use crate::report::{self, Tab};

enum JobsState {
    Loading,
    Loaded(Vec<Job>),
}

enum ReportState {
    Loading,
    Ready(Box<Analytics>),
    Unavailable,
}

struct Modal {
    job: Job,
    tab: Tab,
    report: ReportState,
}

struct AppState {
    company_id: i64,
    jobs: JobsState,
    carousel: Carousel,
    cursor: usize,
    modal: Option<Modal>,
    fetcher: Fetcher,
}

impl AppState {
    fn new(fetcher: Fetcher, company_id: i64) -> Self {
        Self {
            company_id,
            jobs: JobsState::Loading,
            carousel: Carousel::new(0),
            cursor: 0,
            modal: None,
            fetcher,
        }
    }

    fn jobs(&self) -> &[Job] {
        match &self.jobs {
            JobsState::Loaded(jobs) => jobs,
            JobsState::Loading => &[],
        }
    }

    fn apply(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Jobs(Ok(jobs)) => {
                self.carousel.set_len(jobs.len());
                self.cursor = 0;
                self.jobs = JobsState::Loaded(jobs);
            }
            FetchEvent::Jobs(Err(err)) => {
                // Degrades to an empty list; the header still renders.
                warn!(error = %err, "job list fetch failed");
                self.carousel.set_len(0);
                self.cursor = 0;
                self.jobs = JobsState::Loaded(Vec::new());
            }
            FetchEvent::Analytics(Ok(analytics)) => {
                if let Some(modal) = &mut self.modal {
                    modal.report = ReportState::Ready(Box::new(analytics));
                }
            }
            FetchEvent::Analytics(Err(err)) => {
                warn!(error = %err, "analytics fetch failed");
                if let Some(modal) = &mut self.modal {
                    modal.report = ReportState::Unavailable;
                }
            }
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.jobs().len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor as i64 + delta;
        self.cursor = cursor.clamp(0, len as i64 - 1) as usize;
        self.carousel.scroll_to(self.cursor);
    }

    fn window_prev(&mut self) {
        self.carousel.prev();
        self.clamp_cursor_to_window();
    }

    fn window_next(&mut self) {
        self.carousel.next();
        self.clamp_cursor_to_window();
    }

    fn jump_page(&mut self, page: usize) {
        if page < self.carousel.page_count() {
            self.carousel.jump_to_page(page);
            self.cursor = self.carousel.offset();
        }
    }

    fn clamp_cursor_to_window(&mut self) {
        let window = self.carousel.visible_range();
        if window.is_empty() {
            self.cursor = 0;
        } else if self.cursor < window.start {
            self.cursor = window.start;
        } else if self.cursor >= window.end {
            self.cursor = window.end - 1;
        }
    }

    fn open_selected(&mut self) {
        let Some(job) = self.jobs().get(self.cursor).cloned() else {
            return;
        };
        self.fetcher.request_analytics(job.job_id);
        self.modal = Some(Modal {
            job,
            tab: Tab::Overview,
            report: ReportState::Loading,
        });
    }

    fn close_modal(&mut self) {
        self.modal = None;
        self.fetcher.cancel_analytics();
    }

    fn refresh(&mut self) {
        self.jobs = JobsState::Loading;
        self.carousel.set_len(0);
        self.cursor = 0;
        self.fetcher.request_jobs(self.company_id);
    }
}

pub fn run_dashboard(api: impl JobsApi, company_id: i64) -> Result<()> {
    let mut fetcher = Fetcher::spawn(api);
    fetcher.request_jobs(company_id);
    let mut state = AppState::new(fetcher, company_id);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    loop {
        while let Some(event) = state.fetcher.poll() {
            state.apply(event);
        }

        terminal.draw(|frame| draw(frame, state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if state.modal.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => state.close_modal(),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                    if let Some(modal) = &mut state.modal {
                        modal.tab = modal.tab.next();
                    }
                }
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                    if let Some(modal) = &mut state.modal {
                        modal.tab = modal.tab.prev();
                    }
                }
                KeyCode::Char(c @ '1'..='4') => {
                    if let Some(modal) = &mut state.modal {
                        modal.tab = Tab::ALL[c as usize - '1' as usize];
                    }
                }
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Left | KeyCode::Char('h') => state.move_cursor(-1),
                KeyCode::Right | KeyCode::Char('l') => state.move_cursor(1),
                KeyCode::Char('[') => state.window_prev(),
                KeyCode::Char(']') => state.window_next(),
                KeyCode::Char(c @ '1'..='9') => state.jump_page(c as usize - '1' as usize),
                KeyCode::Enter => state.open_selected(),
                KeyCode::Char('r') => state.refresh(),
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, state, chunks[0]);
    draw_cards(frame, state, chunks[1]);
    draw_dots(frame, state, chunks[2]);

    let help = if state.modal.is_some() {
        " Tab/h/l:switch tab  1-4:tab  Esc:close"
    } else {
        " h/l:move  [/]:scroll  1-9:page  Enter:analytics  r:refresh  q:quit"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    if let Some(modal) = &state.modal {
        draw_modal(frame, modal);
    }
}

fn draw_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(20)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Open Job Roles",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        cols[0],
    );

    let badge = match &state.jobs {
        JobsState::Loading => "...".to_string(),
        JobsState::Loaded(jobs) => format!("{} Jobs Created", jobs.len()),
    };
    frame.render_widget(
        Paragraph::new(badge)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        cols[1],
    );
}

fn draw_cards(frame: &mut Frame, state: &AppState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Length(2),
        ])
        .split(area);

    let arrow_style = |disabled: bool| {
        if disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        }
    };

    match &state.jobs {
        JobsState::Loading => {
            frame.render_widget(Paragraph::new("<").style(arrow_style(true)), cols[0]);
            frame.render_widget(Paragraph::new(">").style(arrow_style(true)), cols[5]);
            for slot in 0..ITEMS_PER_VIEW {
                draw_skeleton_card(frame, cols[1 + slot]);
            }
        }
        JobsState::Loaded(jobs) if jobs.is_empty() => {
            frame.render_widget(
                Paragraph::new("No jobs found.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }
        JobsState::Loaded(jobs) => {
            frame.render_widget(
                Paragraph::new("<").style(arrow_style(state.carousel.at_start())),
                cols[0],
            );
            frame.render_widget(
                Paragraph::new(">").style(arrow_style(state.carousel.at_end())),
                cols[5],
            );
            for (slot, index) in state.carousel.visible_range().enumerate() {
                draw_job_card(frame, &jobs[index], index == state.cursor, cols[1 + slot]);
            }
        }
    }
}

fn draw_skeleton_card(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let filler = "\u{2592}".repeat(inner.width.saturating_sub(4) as usize);
    let lines: Vec<Line> = (0..3)
        .map(|_| Line::from(Span::styled(filler.clone(), Style::default().fg(Color::DarkGray))))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_job_card(frame: &mut Frame, job: &Job, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let initial = report::company_initial(job.comp_name.as_deref());
    let comp = job.comp_name.as_deref().unwrap_or("");

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {initial} "),
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(" "),
            Span::styled(
                report::truncate(comp, width.saturating_sub(4)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            report::truncate(&job.job_title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            report::posted_label(&job.created_date, Utc::now()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!("Job ID: {}", job.job_id)),
    ];

    let submissions = job.total_submissions.unwrap_or(0);
    lines.push(Line::from(vec![
        Span::styled(
            submissions.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" submissions  "),
        // Share / document actions from the source design; inert here.
        Span::styled("\u{2197} \u{25a4}", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_dots(frame: &mut Frame, state: &AppState, area: Rect) {
    let pages = state.carousel.page_count();
    if pages == 0 {
        return;
    }
    let active = state.carousel.active_page();
    let spans: Vec<Span> = (0..pages)
        .map(|page| {
            if page == active {
                Span::styled("\u{25cf} ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("\u{25cb} ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

// --- Analytics modal ---

fn draw_modal(frame: &mut Frame, modal: &Modal) {
    let area = centered_rect(frame.area(), 88, 90);
    frame.render_widget(Clear, area);

    let title_room = (area.width as usize).saturating_sub(18);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Analytics for {} ",
            report::truncate(&modal.job.job_title, title_room)
        ))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &modal.report {
        ReportState::Loading => {
            frame.render_widget(Paragraph::new("Loading..."), inner);
        }
        ReportState::Unavailable => {
            frame.render_widget(Paragraph::new("No analytics data available"), inner);
        }
        ReportState::Ready(analytics) => {
            draw_report(frame, inner, modal, analytics);
        }
    }
}

fn draw_report(frame: &mut Frame, area: Rect, modal: &Modal, analytics: &Analytics) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(8),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(format!("Showing analytics for Job ID: {}", modal.job.job_id))
            .style(Style::default().fg(Color::DarkGray)),
        rows[0],
    );

    draw_metric_tiles(frame, rows[1], analytics);

    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(modal.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, rows[2]);

    match modal.tab {
        Tab::Overview => draw_overview_tab(frame, rows[3], analytics),
        Tab::Assessment => draw_assessment_tab(frame, rows[3], analytics),
        Tab::Technical => draw_technical_tab(frame, rows[3], analytics),
        Tab::Demographics => draw_demographics_tab(frame, rows[3], analytics),
    }
}

fn draw_metric_tiles(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let overview = &analytics.overview;
    let tiles = [
        ("Total Applications", overview.total_applications),
        ("Complete", overview.complete_submissions),
        ("Incomplete", overview.incomplete_submissions),
        ("Not Started", overview.not_started),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, (label, value)) in tiles.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {label} "))
            .title_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(cols[i]);
        frame.render_widget(block, cols[i]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                value.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            inner,
        );
    }
}

fn draw_overview_tab(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let series = report::stage_series(&analytics.overview);
    let progress = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Application Progress "),
        )
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().add_modifier(Modifier::BOLD))
        .data(&series[..]);
    frame.render_widget(progress, cols[0]);

    let timeline = &analytics.timeline;
    if timeline.is_empty() {
        frame.render_widget(
            Paragraph::new("No timeline data")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Application Timeline "),
                ),
            cols[1],
        );
        return;
    }

    let points: Vec<(f64, f64)> = timeline
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.applications as f64))
        .collect();
    let max_y = timeline
        .iter()
        .map(|p| p.applications)
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let max_x = (points.len() - 1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("applications")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
    ];
    let x_labels = vec![
        report::short_date(&timeline[0].date),
        report::short_date(&timeline[timeline.len() - 1].date),
    ];
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Application Timeline "),
        )
        .x_axis(Axis::default().bounds([0.0, max_x]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([0.0, max_y])
                .labels(vec!["0".to_string(), format!("{max_y:.0}")]),
        );
    frame.render_widget(chart, cols[1]);
}

fn draw_assessment_tab(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_video_card(frame, top[0], analytics);
    draw_resume_card(frame, top[1], analytics);
    draw_mcq_card(frame, bottom[0], analytics);
    draw_case_study_card(frame, bottom[1], analytics);
}

fn metric_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn draw_video_card(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let video = &analytics.video_assessment;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Video Assessment ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(vec![
            metric_line("Average Score", format!("{:.1}/10", video.average_score)),
            metric_line("Above Ideal", video.above_ideal.to_string()),
        ]),
        parts[0],
    );

    if video.emotional_analysis.is_empty() {
        frame.render_widget(
            Paragraph::new("No emotion data").style(Style::default().fg(Color::DarkGray)),
            parts[1],
        );
        return;
    }

    let labels: Vec<String> = video
        .emotional_analysis
        .iter()
        .map(|e| report::truncate(&e.emotion, 7))
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(&video.emotional_analysis)
        .map(|(label, e)| (label.as_str(), e.count.max(0) as u64))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title("Emotional Analysis"))
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .data(&bars[..]);
    frame.render_widget(chart, parts[1]);
}

fn draw_resume_card(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let resume = &analytics.resume_analysis;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Resume Analysis ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(vec![
            metric_line("Keyword Match", format!("{:.0}%", resume.keyword_match)),
            metric_line("Relevance Score", format!("{:.0}%", resume.relevance_score)),
        ]),
        parts[0],
    );

    let (matched, gap) = report::match_gap(resume);
    let gauge = Gauge::default()
        .block(Block::default().title("Skills Match Distribution"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(matched as f64 / 100.0)
        .label(format!("{matched}% match / {gap}% gap"));
    frame.render_widget(gauge, parts[1]);
}

fn draw_mcq_card(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let mcq = &analytics.mcq_performance;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" MCQ Performance ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(vec![
            metric_line("Average Score", format!("{:.1}/10", mcq.average_score)),
            metric_line("Above Ideal", mcq.above_ideal.to_string()),
        ]),
        parts[0],
    );

    if mcq.difficulty_analysis.is_empty() {
        frame.render_widget(
            Paragraph::new("No difficulty data").style(Style::default().fg(Color::DarkGray)),
            parts[1],
        );
        return;
    }

    // Bars show success rate percent per difficulty level.
    let labels: Vec<String> = mcq
        .difficulty_analysis
        .iter()
        .map(|d| report::truncate(&d.level, 7))
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(&mcq.difficulty_analysis)
        .map(|(label, d)| (label.as_str(), d.success_rate.clamp(0.0, 100.0).round() as u64))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title("Success Rate % by Difficulty"))
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .data(&bars[..]);
    frame.render_widget(chart, parts[1]);
}

fn draw_case_study_card(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    let case = &analytics.case_study;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Case Study Analysis ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(vec![
            metric_line("Average Score", format!("{:.1}/10", case.average_score)),
            metric_line("Completion Rate", format!("{:.0}%", case.completion_rate)),
            Line::from(Span::styled(
                "Key Insights",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]),
        parts[0],
    );

    let width = (parts[1].width as usize).saturating_sub(2).max(10);
    let mut lines: Vec<Line> = Vec::new();
    for insight in &case.key_insights {
        for (i, wrapped) in textwrap::fill(insight, width).lines().enumerate() {
            let prefix = if i == 0 { "- " } else { "  " };
            lines.push(Line::from(format!("{prefix}{wrapped}")));
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No insights recorded",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), parts[1]);
}

fn draw_technical_tab(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    // Section and its tab_switching block are both optional; either missing
    // means there is nothing to chart or divide by.
    let tabs = analytics
        .technical_insights
        .as_ref()
        .and_then(|tech| tech.tab_switching.as_ref().map(|tabs| (tech, tabs)));
    let Some((tech, switching)) = tabs else {
        frame.render_widget(
            Paragraph::new("No technical data available").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left: tab-switch compliance
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Technical Compliance ");
    let inner = block.inner(cols[0]);
    frame.render_widget(block, cols[0]);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(inner);

    let total = switching.compliant + switching.non_compliant;
    let ratio = if total > 0 {
        switching.compliant as f64 / total as f64
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Tab Switching Behavior"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!(
            "{} compliant / {} non-compliant",
            switching.compliant, switching.non_compliant
        ));
    frame.render_widget(gauge, parts[0]);

    let mut lines = vec![Line::from(Span::styled(
        "Assessment Integrity Insights",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for line in report::integrity_lines(switching) {
        lines.push(Line::from(Span::styled(
            format!("- {line}"),
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[1]);

    // Right: recording/upload success
    let pct_label = |pct: Option<u32>| match pct {
        Some(p) => format!("{p}% successful"),
        None => "N/A".to_string(),
    };
    let screen = report::success_pct(tech.screen_recording_success, tech.total_responses);
    let video = report::success_pct(tech.video_upload_success, tech.total_responses);
    let lines = vec![
        Line::from(Span::styled(
            "Technical Success Rate",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("- Screen Recording: {}", pct_label(screen))),
        Line::from(format!("- Video Upload: {}", pct_label(video))),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} responses total", tech.total_responses),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Device & Recording "),
        ),
        cols[1],
    );
}

fn draw_demographics_tab(frame: &mut Frame, area: Rect, analytics: &Analytics) {
    if analytics.geography.is_empty() {
        frame.render_widget(
            Paragraph::new("No location data")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Geographic Distribution "),
                ),
            area,
        );
        return;
    }

    let labels: Vec<String> = analytics
        .geography
        .iter()
        .map(|g| report::truncate(&g.home_address, 10))
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(&analytics.geography)
        .map(|(label, g)| (label.as_str(), g.candidate_count.max(0) as u64))
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Geographic Distribution "),
        )
        .bar_width(10)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().add_modifier(Modifier::BOLD))
        .data(&bars[..]);
    frame.render_widget(chart, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct StubApi;

    impl JobsApi for StubApi {
        fn fetch_jobs(&self, _company_id: i64) -> Result<Vec<Job>> {
            Ok(Vec::new())
        }

        fn fetch_analytics(&self, job_id: i64) -> Result<Analytics> {
            Err(anyhow!("stub has no analytics for job {job_id}"))
        }
    }

    fn job(id: i64, title: &str) -> Job {
        Job {
            job_id: id,
            job_title: title.to_string(),
            comp_name: Some("PeppyPick".to_string()),
            company_logo: None,
            created_date: "2024-10-02".to_string(),
            total_applications: Some(10),
            total_submissions: Some(5),
            completed_submissions: Some(3),
        }
    }

    fn loaded_state(count: usize) -> AppState {
        let mut state = AppState::new(Fetcher::spawn(StubApi), 2224);
        let jobs: Vec<Job> = (0..count)
            .map(|i| job(i as i64 + 1, &format!("Role {}", i + 1)))
            .collect();
        state.apply(FetchEvent::Jobs(Ok(jobs)));
        state
    }

    #[test]
    fn test_open_and_close_modal() {
        let mut state = loaded_state(6);
        state.move_cursor(2);
        state.open_selected();

        let modal = state.modal.as_ref().unwrap();
        assert_eq!(modal.job.job_id, 3);
        assert_eq!(modal.job.job_title, "Role 3");
        assert!(matches!(modal.report, ReportState::Loading));
        assert_eq!(modal.tab, Tab::Overview);

        state.close_modal();
        assert!(state.modal.is_none());

        // Re-opening starts from a fresh loading state, not a cached report.
        state.open_selected();
        assert!(matches!(
            state.modal.as_ref().unwrap().report,
            ReportState::Loading
        ));
    }

    #[test]
    fn test_open_on_empty_list_is_noop() {
        let mut state = loaded_state(0);
        state.open_selected();
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_analytics_reply_lands_in_modal() {
        let mut state = loaded_state(2);
        state.open_selected();
        state.apply(FetchEvent::Analytics(Err(anyhow!("boom"))));
        assert!(matches!(
            state.modal.as_ref().unwrap().report,
            ReportState::Unavailable
        ));
    }

    #[test]
    fn test_jobs_failure_degrades_to_empty_list() {
        let mut state = AppState::new(Fetcher::spawn(StubApi), 2224);
        state.apply(FetchEvent::Jobs(Err(anyhow!("connection refused"))));
        assert!(state.jobs().is_empty());
        assert!(matches!(state.jobs, JobsState::Loaded(_)));
    }

    #[test]
    fn test_cursor_moves_window() {
        let mut state = loaded_state(10);
        for _ in 0..6 {
            state.move_cursor(1);
        }
        assert_eq!(state.cursor, 6);
        assert!(state.carousel.visible_range().contains(&6));
    }

    #[test]
    fn test_window_step_clamps_cursor() {
        let mut state = loaded_state(10);
        state.window_next();
        state.window_next();
        assert!(state.carousel.visible_range().contains(&state.cursor));
    }

    #[test]
    fn test_jump_page_out_of_range_is_noop() {
        let mut state = loaded_state(6);
        state.jump_page(5);
        assert_eq!(state.carousel.offset(), 0);
        state.jump_page(1);
        assert_eq!(state.carousel.offset(), state.carousel.max_offset());
    }
}
