use chrono::TimeZone;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;
use std::fmt::Display;
use stockpulse_core::domain::symbol::Symbol;
use stockpulse_core::poll::DashboardState;
use stockpulse_core::view::{
    chart, format, prediction, ChartView, PredictionSummary, PredictionView, TrendStyle,
};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub fn draw<Tz>(f: &mut Frame<'_>, state: &DashboardState, tz: &Tz, frame: u64)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(15),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(f.area());

    f.render_widget(header(), rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    f.render_widget(selector_card(state, tz, frame), cards[0]);
    f.render_widget(prediction_card(&state.prediction_view(), frame), cards[1]);

    draw_history(f, rows[2], &state.chart_view(tz));

    f.render_widget(footer(state), rows[3]);
}

fn header() -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "StockPulse AI Dashboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("● Live", Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            "Real-time prices with AI-powered insights",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM))
}

fn selector_card<Tz>(state: &DashboardState, tz: &Tz, frame: u64) -> Paragraph<'static>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let selected = state.symbol();
    let mut lines: Vec<Line<'static>> = Symbol::ALL
        .iter()
        .enumerate()
        .map(|(i, sym)| {
            let text = format!("{} {} ({})", i + 1, sym.company(), sym);
            if *sym == selected {
                Line::from(Span::styled(
                    format!("▸ {text}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::raw(format!("  {text}")))
            }
        })
        .collect();

    lines.push(Line::default());
    match state.quote_view(tz) {
        Some(quote) => {
            lines.push(Line::from(vec![
                Span::styled("Current Price  ", Style::default().fg(Color::DarkGray)),
                Span::styled(quote.price_text, Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Last Updated   ", Style::default().fg(Color::DarkGray)),
                Span::raw(quote.updated_text),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                format!("Current Price  {}", format::MISSING),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::default());
        }
    }

    let refresh = if state.prediction_loading() {
        Span::styled(
            format!("[r] Refresh Prediction {}", spinner(frame)),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled("[r] Refresh Prediction", Style::default().fg(Color::Cyan))
    };
    lines.push(Line::from(refresh));

    Paragraph::new(lines).block(
        Block::default()
            .title(" Select Stock ")
            .borders(Borders::ALL),
    )
}

fn prediction_card(view: &PredictionView, frame: u64) -> Paragraph<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::styled(view.description(), dim)), Line::default()];

    let border = match view {
        PredictionView::Analyzing => {
            lines.push(
                Line::from(Span::styled(
                    spinner(frame).to_string(),
                    Style::default().fg(Color::Cyan),
                ))
                .alignment(Alignment::Center),
            );
            Style::default()
        }
        PredictionView::InsufficientData => {
            for text in prediction::INSUFFICIENT_BODY.lines() {
                lines.push(Line::from(Span::styled(text, dim)).alignment(Alignment::Center));
            }
            Style::default()
        }
        PredictionView::Ready(summary) => {
            summary_lines(summary, &mut lines);
            Style::default().fg(trend_color(summary.style))
        }
    };

    let title = match view {
        PredictionView::Ready(summary) => Line::from(vec![
            Span::raw(format!(" {} ", prediction::TITLE)),
            Span::styled(
                format!(" {} {} ", trend_arrow(summary.style), summary.trend_label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(trend_color(summary.style)),
            ),
            Span::raw(" "),
        ]),
        _ => Line::from(format!(" {} ", prediction::TITLE)),
    };

    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    )
}

fn summary_lines(summary: &PredictionSummary, lines: &mut Vec<Line<'static>>) {
    let dim = Style::default().fg(Color::DarkGray);
    let accent = Style::default()
        .fg(trend_color(summary.style))
        .add_modifier(Modifier::BOLD);

    for (label, value) in summary.price_rows() {
        let style = if label == "Current" {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            accent
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<12}"), dim),
            Span::styled(value, style),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Confidence Range", dim)));
    for (label, value) in summary.confidence_rows() {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<12}"), dim),
            Span::raw(value),
        ]));
    }
}

fn draw_history(f: &mut Frame<'_>, area: Rect, view: &ChartView) {
    let block = Block::default()
        .title(format!(" {} · {} ", chart::TITLE, chart::DESCRIPTION))
        .borders(Borders::ALL);

    let series = match view {
        ChartView::Collecting => {
            let placeholder = Paragraph::new(chart::COLLECTING_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }
        ChartView::Plot(series) => series,
    };

    let coords = series.coordinates();
    let [y_min, y_max] = series.y_bounds();
    let x_labels: Vec<Span> = [series.first_label(), series.last_label()]
        .into_iter()
        .flatten()
        .map(|label| Span::raw(label.to_string()))
        .collect();
    let y_labels = vec![
        Span::raw(format::money(y_min)),
        Span::raw(format::money((y_min + y_max) / 2.0)),
        Span::raw(format::money(y_max)),
    ];

    let dataset = Dataset::default()
        .name("price")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&coords);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds(series.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn footer(state: &DashboardState) -> Paragraph<'static> {
    let now = tokio::time::Instant::now();
    let mut lines: Vec<Line<'static>> = state
        .notifications()
        .active(now)
        .map(|n| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", n.title),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(n.description, Style::default().fg(Color::Red)),
            ])
        })
        .collect();

    // Keep the newest messages visible; the strip has room for two.
    if lines.len() > 2 {
        lines.drain(..lines.len() - 2);
    }
    while lines.len() < 2 {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "←/→ symbol  1-7 pick  r refresh prediction  q quit",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).block(Block::default().borders(Borders::TOP))
}

fn spinner(frame: u64) -> char {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

fn trend_color(style: TrendStyle) -> Color {
    match style {
        TrendStyle::Bullish => Color::Green,
        TrendStyle::Bearish => Color::Red,
    }
}

fn trend_arrow(style: TrendStyle) -> &'static str {
    match style {
        TrendStyle::Bullish => "▲",
        TrendStyle::Bearish => "▼",
    }
}
