// services/log-dash/src/view.rs
//
// Terminal rendering: header + search, error banner, charts, log table

use chrono::{DateTime, Local, Utc};
use ratatui::{
    prelude::*,
    widgets::*,
};

use svckit::types::{SENTIMENT_NEGATIVE, SENTIMENT_POSITIVE, UNKNOWN_LABEL};
use svckit::LogRecord;

use crate::aggregate::LabelCount;
use crate::state::DashboardState;

pub const SEARCH_PLACEHOLDER: &str = "Search logs (e.g., 'payment', 'ERROR')...";

pub mod colors {
    use ratatui::style::Color;

    pub const WHITE: Color = Color::Rgb(253, 246, 227);
    pub const SILVER: Color = Color::Rgb(147, 161, 161);
    pub const GOLD: Color = Color::Rgb(255, 193, 37);
    pub const ACCENT: Color = Color::Rgb(142, 191, 255);
    pub const BG_DARK: Color = Color::Rgb(40, 44, 52);
    pub const BG_PANEL: Color = Color::Rgb(50, 55, 64);
    pub const ERROR: Color = Color::Rgb(255, 142, 142);
    pub const ERROR_BG: Color = Color::Rgb(110, 30, 30);

    pub const POSITIVE: Color = Color::Rgb(158, 255, 158);
    pub const NEGATIVE: Color = Color::Rgb(255, 142, 142);
    pub const UNKNOWN: Color = Color::Rgb(136, 132, 216);
    /// Any label outside the known set
    pub const OTHER: Color = SILVER;
}

/// Where the records come from, shown in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    Live(String),
    Demo,
}

pub fn sentiment_color(label: &str) -> Color {
    match label {
        SENTIMENT_POSITIVE => colors::POSITIVE,
        SENTIMENT_NEGATIVE => colors::NEGATIVE,
        UNKNOWN_LABEL => colors::UNKNOWN,
        _ => colors::OTHER,
    }
}

pub fn level_color(level: &str) -> Color {
    match level {
        "ERROR" => colors::ERROR,
        "WARN" => colors::GOLD,
        "INFO" => colors::WHITE,
        _ => colors::SILVER,
    }
}

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

pub fn format_sentiment(record: &LogRecord) -> String {
    match record.ai_sentiment_score {
        Some(score) => format!("{} ({:.2})", record.sentiment_label(), score),
        None => format!("{} (-)", record.sentiment_label()),
    }
}

pub fn draw_ui(frame: &mut Frame, state: &DashboardState, mode: &SourceMode) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    let banner_height = if state.error().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(3),             // Search
            Constraint::Length(banner_height), // Error banner
            Constraint::Length(10),            // Charts
            Constraint::Min(6),                // Log table
            Constraint::Length(2),             // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state, mode);
    draw_search(frame, chunks[1], state);
    if let Some(message) = state.error() {
        draw_error_banner(frame, chunks[2], message);
    }
    draw_charts(frame, chunks[3], state);
    draw_log_table(frame, chunks[4], state);
    draw_footer(frame, chunks[5]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState, mode: &SourceMode) {
    let (mode_text, mode_color) = match mode {
        SourceMode::Live(_) => ("LIVE", colors::POSITIVE),
        SourceMode::Demo => ("DEMO", colors::GOLD),
    };

    let updated = state
        .last_updated()
        .map(|ts| format!("updated {}", ts.format("%H:%M:%S")))
        .unwrap_or_else(|| "waiting for data".to_string());

    let mut spans = vec![
        Span::styled(
            " AI-Powered Log Analytics Dashboard ",
            Style::default().fg(colors::WHITE).bold(),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", mode_text), Style::default().fg(mode_color).bold()),
    ];
    if let SourceMode::Live(endpoint) = mode {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(endpoint.clone(), Style::default().fg(colors::SILVER)));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(updated, Style::default().fg(colors::SILVER)));

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::ACCENT))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn draw_search(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let input = state.search_input();

    let mut title = vec![Span::styled(" SEARCH ", Style::default().fg(colors::GOLD).bold())];
    if input != state.committed_term() {
        title.push(Span::styled(
            "(pending) ",
            Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
        ));
    }

    let text = if input.is_empty() {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
        ))
    } else {
        Line::from(vec![
            Span::styled(input, Style::default().fg(colors::WHITE)),
            Span::styled("_", Style::default().fg(colors::GOLD).add_modifier(Modifier::SLOW_BLINK)),
        ])
    };

    let search = Paragraph::new(text).block(
        Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors::ACCENT))
            .style(Style::default().bg(colors::BG_PANEL)),
    );

    frame.render_widget(search, area);
}

fn draw_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(colors::WHITE).bold(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::ERROR))
            .style(Style::default().bg(colors::ERROR_BG)),
    );

    frame.render_widget(banner, area);
}

fn draw_charts(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let summary = state.summary();
    draw_sentiment_chart(frame, chunks[0], &summary.sentiment);
    draw_service_chart(frame, chunks[1], &summary.services);
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(colors::WHITE).bold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::SILVER))
        .style(Style::default().bg(colors::BG_PANEL))
}

fn draw_sentiment_chart(frame: &mut Frame, area: Rect, sentiment: &[LabelCount]) {
    let block = chart_block(" LOG SENTIMENT ");

    let bars: Vec<Bar> = sentiment
        .iter()
        .map(|entry| {
            let color = sentiment_color(&entry.name);
            Bar::default()
                .value(entry.count)
                .label(Line::from(entry.name.clone()))
                .text_value(format!("{} ({})", entry.name, entry.count))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(colors::BG_DARK).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn draw_service_chart(frame: &mut Frame, area: Rect, services: &[LabelCount]) {
    let block = chart_block(" LOGS BY SERVICE ");

    let bars: Vec<Bar> = services
        .iter()
        .map(|entry| {
            Bar::default()
                .value(entry.count)
                .label(Line::from(entry.name.clone()))
                .text_value(entry.count.to_string())
                .style(Style::default().fg(colors::ACCENT))
                .value_style(Style::default().fg(colors::BG_DARK).bg(colors::ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn draw_log_table(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let records = state.records();

    let block = Block::default()
        .title(Span::styled(
            format!(" LOGS ({}) ", records.len()),
            Style::default().fg(colors::WHITE).bold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::SILVER))
        .style(Style::default().bg(colors::BG_PANEL));

    let rows: Vec<Row> = records
        .iter()
        .skip(state.scroll_offset)
        .map(|record| {
            let sentiment = record.sentiment_label();
            Row::new(vec![
                Cell::from(Span::styled(
                    format_timestamp(record.timestamp),
                    Style::default().fg(colors::SILVER),
                )),
                Cell::from(Span::styled(record.service_name(), Style::default().fg(colors::WHITE))),
                Cell::from(Span::styled(
                    record.level.as_str(),
                    Style::default().fg(level_color(&record.level)).bold(),
                )),
                Cell::from(Span::styled(
                    format_sentiment(record),
                    Style::default().fg(sentiment_color(sentiment)),
                )),
                Cell::from(Span::styled(record.message.as_str(), Style::default().fg(colors::WHITE))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(19),
            Constraint::Length(22),
            Constraint::Length(6),
            Constraint::Length(17),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from(Span::styled("TIMESTAMP", Style::default().fg(colors::GOLD).bold())),
            Cell::from(Span::styled("SERVICE", Style::default().fg(colors::GOLD).bold())),
            Cell::from(Span::styled("LEVEL", Style::default().fg(colors::GOLD).bold())),
            Cell::from(Span::styled("SENTIMENT", Style::default().fg(colors::GOLD).bold())),
            Cell::from(Span::styled("MESSAGE", Style::default().fg(colors::GOLD).bold())),
        ])
        .bottom_margin(1),
    )
    .block(block);

    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" [ESC] ", Style::default().fg(colors::BG_DARK).bg(colors::ERROR)),
        Span::styled(" Quit ", Style::default().fg(colors::SILVER)),
        Span::raw("  "),
        Span::styled(" [CTRL+U] ", Style::default().fg(colors::BG_DARK).bg(colors::GOLD)),
        Span::styled(" Clear search ", Style::default().fg(colors::SILVER)),
        Span::raw("  "),
        Span::styled(" [UP/DOWN] ", Style::default().fg(colors::BG_DARK).bg(colors::SILVER)),
        Span::styled(" Scroll ", Style::default().fg(colors::SILVER)),
    ]);

    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::ACCENT))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}
