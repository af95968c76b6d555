//! Terminal chart view for SNR/BER curves.
//!
//! One figure per code. Each figure stacks one panel per SIMD variant, all
//! sharing the same axes, with one series per decode type. BER is drawn on
//! a log scale by plotting `log10(ber)` against decade-labelled bounds.

use std::io;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use viterbi_perf::ber::{CurveGroup, PlotAxes, SimdLayer};
use viterbi_perf::{DecodeType, Tag};

/// A figure ready to draw.
pub struct Figure<'a> {
    /// Curves grouped into panels.
    pub group: CurveGroup<'a>,
    /// Axes shared by every panel.
    pub axes: PlotAxes,
}

/// Browsing state.
struct App<'a> {
    figures: Vec<Figure<'a>>,
    current: usize,
}

impl App<'_> {
    fn next(&mut self) {
        if self.current + 1 < self.figures.len() {
            self.current += 1;
        }
    }

    fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

/// Open the chart view and block until the user quits.
pub fn run_plot(figures: Vec<Figure<'_>>) -> Result<()> {
    let mut app = App {
        figures,
        current: 0,
    };

    with_restore(
        || {
            enable_raw_mode()?;
            io::stdout().execute(EnterAlternateScreen)?;
            Ok(())
        },
        || {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            run_event_loop(&mut terminal, &mut app)
        },
        || {
            disable_raw_mode()?;
            io::stdout().execute(LeaveAlternateScreen)?;
            Ok(())
        },
    )
}

/// Run `setup` then `body`, and always run `restore` afterwards, even when
/// either fails part way. The first error wins.
fn with_restore(
    setup: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<()>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let result = setup().and_then(|()| body());
    let restored = restore();
    result.and(restored)
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let figure = &app.figures[app.current];
            draw_figure(f, figure, app.current, app.figures.len());
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Right | KeyCode::Char('n' | ' ') => app.next(),
                KeyCode::Left | KeyCode::Char('p') => app.previous(),
                _ => {}
            }
        }
    }
}

/// Series colour per decode type.
fn decode_colour(decode_type: DecodeType) -> Color {
    match decode_type {
        DecodeType::Soft16 => Color::Cyan,
        DecodeType::Soft8 => Color::Yellow,
        DecodeType::Hard8 => Color::Magenta,
    }
}

/// Draw one figure: title, one panel per SIMD layer, key help.
pub fn draw_figure(f: &mut ratatui::Frame, figure: &Figure<'_>, index: usize, total: usize) {
    let key = &figure.group.key;
    let layers = &figure.group.layers;

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(layers.iter().map(|_| Constraint::Fill(1)));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        format!("{} (K={},R={})", key.name, key.k, key.r),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    for (row, layer) in layers.iter().enumerate() {
        let is_last = row + 1 == layers.len();
        draw_panel(f, chunks[row + 1], layer, &figure.axes, is_last);
    }

    let help = Paragraph::new(format!(
        "figure {}/{}  ←/p previous  →/n next  q quit",
        index + 1,
        total
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[chunks.len() - 1]);
}

fn draw_panel(f: &mut ratatui::Frame, area: Rect, layer: &SimdLayer<'_>, axes: &PlotAxes, is_last: bool) {
    // Datasets borrow their points, so the log-transformed series must
    // outlive the chart.
    let series: Vec<Vec<(f64, f64)>> = layer
        .curves
        .iter()
        .map(|curve| curve.points.iter().map(|&(x, ber)| (x, ber.log10())).collect())
        .collect();

    let datasets: Vec<Dataset<'_>> = layer
        .curves
        .iter()
        .zip(&series)
        .map(|(curve, points)| {
            Dataset::default()
                .name(curve.decode_type.name().to_lowercase())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(decode_colour(curve.decode_type)))
                .data(points)
        })
        .collect();

    let [x_lo, x_hi] = axes.x_bounds();
    let x_mid = (x_lo + x_hi) / 2.0;
    let mut x_axis = Axis::default()
        .bounds([x_lo, x_hi])
        .labels([x_lo, x_mid, x_hi].map(|x| format!("{x:.1}")));
    if is_last {
        x_axis = x_axis.title("Eb/No (dB)");
    }

    let y_axis = Axis::default()
        .title("Bit error rate")
        .bounds(axes.y_bounds())
        .labels(axes.y_decades.iter().map(|e| format!("1e{e}")));

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(layer.simd_type.name()),
        )
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::BottomLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));
    f.render_widget(chart, area);
}
