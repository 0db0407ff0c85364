//! Pasusat - UI rendering
//!
//! Renders the sidebar, the chart area, and the status bar using Ratatui
//! widgets. Everything drawn here comes from the prepared [`View`].

use crate::aggregate::RegionTotal;
use crate::analysis::{AnalysisType, OverviewView, RegionalView, ScatterView, View};
use crate::app::{App, Focus};
use crate::format::format_count;
use crate::species::Species;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset as Series,
        GraphType, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

/// Theme colors for the UI
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub error: Color,
    pub warning: Color,
    pub border: Color,
    pub highlight: Color,
    pub muted: Color,
    pub bar: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Dracula-inspired dark theme
        Self {
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            accent: Color::Rgb(139, 233, 253),
            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(255, 184, 108),
            border: Color::Rgb(98, 114, 164),
            highlight: Color::Rgb(68, 71, 90),
            muted: Color::Rgb(98, 114, 164),
            bar: Color::Rgb(80, 250, 123),
        }
    }
}

impl Theme {
    fn block<'a>(&self, title: impl Into<String>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
            .title(Span::styled(
                format!(" {} ", title.into()),
                Style::default().fg(self.accent),
            ))
            .style(Style::default().bg(self.bg).fg(self.fg))
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(20)])
        .split(main_chunks[0]);

    render_sidebar(frame, app, body[0], &theme);
    render_view(frame, app, body[1], &theme);
    render_status_bar(frame, app, main_chunks[1], &theme);

    if app.show_help {
        render_help_popup(frame, &theme);
    }
}

/// Analysis menu and species selectors
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(AnalysisType::ALL.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    let items: Vec<ListItem> = AnalysisType::ALL
        .iter()
        .map(|a| ListItem::new(a.label()))
        .collect();
    let menu = List::new(items)
        .block(theme.block("Analysis Type"))
        .highlight_style(
            Style::default()
                .bg(theme.highlight)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.selection.analysis.index()));
    frame.render_stateful_widget(menu, chunks[0], &mut state);

    let mut lines = Vec::new();
    if app.selection.analysis.uses_species() {
        let first_label = if app.selection.analysis.uses_secondary() {
            "First type"
        } else {
            "Livestock type"
        };
        lines.push(selector_line(
            first_label,
            app.selection.primary,
            app.focus == Focus::Primary,
            theme,
        ));
        if app.selection.analysis.uses_secondary() {
            lines.push(selector_line(
                "Second type",
                app.selection.secondary,
                app.focus == Focus::Secondary,
                theme,
            ));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Rows     ", Style::default().fg(theme.muted)),
        Span::raw(app.dataset.row_count().to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Columns  ", Style::default().fg(theme.muted)),
        Span::raw(app.dataset.columns().len().to_string()),
    ]));
    let missing = app.missing_columns();
    let missing_style = if missing > 0 {
        Style::default().fg(theme.warning)
    } else {
        Style::default().fg(theme.bar)
    };
    lines.push(Line::from(vec![
        Span::styled("Unmapped ", Style::default().fg(theme.muted)),
        Span::styled(missing.to_string(), missing_style),
    ]));

    let controls = Paragraph::new(lines)
        .block(theme.block("Visualization Controls"))
        .wrap(Wrap { trim: false });
    frame.render_widget(controls, chunks[1]);
}

fn selector_line(label: &str, species: Species, focused: bool, theme: &Theme) -> Line<'static> {
    let value_style = if focused {
        Style::default()
            .fg(theme.accent)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg)
    };
    Line::from(vec![
        Span::styled(format!("{:<15}", label), Style::default().fg(theme.muted)),
        Span::styled(
            format!("◀ {} {} ▶", species.label(), species.token()),
            value_style,
        ),
    ])
}

/// Render the chart area for the current view
fn render_view(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    match &app.view {
        View::Overview(view) => render_overview(frame, view, area, theme),
        View::Regional(view) => render_regional(frame, view, area, theme),
        View::Comparative(view) | View::Correlation(view) => {
            render_scatter(frame, view, area, theme)
        }
        View::Unavailable(reason) => {
            let text = vec![
                Line::from(Span::styled(
                    "No chart for this selection",
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(reason.to_string(), Style::default().fg(theme.muted))),
            ];
            let message = Paragraph::new(text)
                .block(theme.block(app.selection.analysis.label()))
                .wrap(Wrap { trim: false });
            frame.render_widget(message, area);
        }
    }
}

fn bar_value(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

fn render_overview(frame: &mut Frame, view: &OverviewView, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(5)])
        .split(area);

    let bars: Vec<Bar> = view
        .shares
        .iter()
        .map(|s| {
            Bar::default()
                .value(bar_value(s.share * 1000.0))
                .text_value(format!("{:.1}%", s.share * 100.0))
                .label(Line::from(s.total.species.label()))
                .style(Style::default().fg(theme.bar))
        })
        .collect();

    let chart = BarChart::default()
        .block(theme.block("Total Livestock Distribution in Thailand"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(theme.bg).bg(theme.bar))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, chunks[0]);

    let rows: Vec<Row> = view
        .shares
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.total.species.label()),
                Cell::from(s.total.column.clone()),
                Cell::from(format_count(s.total.total)),
                Cell::from(format!("{:.2}%", s.share * 100.0)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Species", "Column", "Head count", "Share"])
            .style(Style::default().fg(theme.warning).add_modifier(Modifier::BOLD)),
    )
    .block(theme.block(format!(
        "Detailed Livestock Breakdown │ total {}",
        format_count(view.grand_total)
    )));
    frame.render_widget(table, chunks[1]);
}

fn ranking_rows(ranking: &[RegionTotal]) -> Vec<Row<'static>> {
    ranking
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{:>3}", i + 1)),
                Cell::from(r.region.clone()),
                Cell::from(format_count(r.total)),
            ])
        })
        .collect()
}

fn render_regional(frame: &mut Frame, view: &RegionalView, area: Rect, theme: &Theme) {
    let table_height = view.top.len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(table_height)])
        .split(area);

    let visible = chunks[0].height.saturating_sub(2) as usize;
    let bars: Vec<Bar> = view
        .ranking
        .iter()
        .take(visible)
        .map(|r| {
            Bar::default()
                .value(bar_value(r.total))
                .text_value(format_count(r.total))
                .label(Line::from(r.region.clone()))
                .style(Style::default().fg(theme.bar))
        })
        .collect();

    let chart = BarChart::default()
        .block(theme.block(format!("Provincial Distribution of {}", view.species.label())))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(theme.bg).bg(theme.bar))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, chunks[0]);

    let table = Table::new(
        ranking_rows(&view.top),
        [
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["#", "Province", "Head count"])
            .style(Style::default().fg(theme.warning).add_modifier(Modifier::BOLD)),
    )
    .block(theme.block(format!(
        "Top {} Provinces for {}",
        view.top.len(),
        view.species.label()
    )));
    frame.render_widget(table, chunks[1]);
}

/// Axis bounds with a little headroom so edge points stay visible
fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.05).max(1.0);
    let lower = if min >= 0.0 {
        (min - pad).max(0.0)
    } else {
        min - pad
    };
    [lower, max + pad]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format_count(*v)))
        .collect()
}

fn render_scatter(frame: &mut Frame, view: &ScatterView, area: Rect, theme: &Theme) {
    if view.points.is_empty() {
        let message = Paragraph::new("No province has values in both columns")
            .block(theme.block(view.title.clone()));
        frame.render_widget(message, area);
        return;
    }

    let data: Vec<(f64, f64)> = view.points.iter().map(|p| (p.x, p.y)).collect();
    let x_bounds = axis_bounds(data.iter().map(|(x, _)| *x));
    let y_bounds = axis_bounds(data.iter().map(|(_, y)| *y));

    let series = Series::default()
        .name(format!("{} provinces", data.len()))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(theme.accent))
        .data(&data);

    let chart = Chart::new(vec![series])
        .block(theme.block(view.title.clone()))
        .x_axis(
            Axis::default()
                .title(Span::styled(view.x_label.clone(), Style::default().fg(theme.muted)))
                .style(Style::default().fg(theme.border))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(view.y_label.clone(), Style::default().fg(theme.muted)))
                .style(Style::default().fg(theme.border))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let spans = vec![
        Span::styled(
            concat!(" Pasusat v", env!("CARGO_PKG_VERSION"), " "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("|", Style::default().fg(theme.border)),
        Span::styled(
            format!(
                " {} ",
                app.dataset.path.split('/').next_back().unwrap_or("census")
            ),
            Style::default().fg(theme.fg),
        ),
        Span::styled("|", Style::default().fg(theme.border)),
        Span::styled(
            format!(" {} {} ", app.dataset.size_human(), app.dataset.encoding.name()),
            Style::default().fg(theme.muted),
        ),
        Span::styled("|", Style::default().fg(theme.border)),
        Span::styled(
            format!(" {} ", app.selection.analysis.label()),
            Style::default().fg(theme.fg),
        ),
        Span::styled("|", Style::default().fg(theme.border)),
        Span::styled(" ?:Help q:Quit ", Style::default().fg(theme.muted)),
    ];

    let status_bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg)),
    );

    frame.render_widget(status_bar, area);
}

fn help_line(key: &'static str, action: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<11}", key), Style::default().fg(color)),
        Span::raw(action),
    ])
}

/// Render help popup
fn render_help_popup(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(55, 70, frame.area());
    frame.render_widget(Clear, area);

    let heading = |text: &'static str, color: Color| {
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        heading("Keyboard Shortcuts", theme.accent),
        Line::from(""),
        heading("Analysis", theme.warning),
        help_line("j / Down", "Next analysis type", theme.warning),
        help_line("k / Up", "Previous analysis type", theme.warning),
        help_line("1-4", "Jump to analysis type", theme.warning),
        Line::from(""),
        heading("Livestock", theme.accent),
        help_line("l / Right", "Next livestock type", theme.accent),
        help_line("h / Left", "Previous livestock type", theme.accent),
        help_line("Tab", "Switch first/second type", theme.accent),
        Line::from(""),
        help_line("?", "Toggle this help", theme.muted),
        help_line("q / Esc", "Quit", theme.error),
    ];

    let help = Paragraph::new(help_text)
        .block(theme.block("Help"))
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
