use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let magenta_style = Style::default().fg(Color::Magenta);

        match self.state {
            AppState::Typing => {
                let max_chars_per_line =
                    (area.width.saturating_sub(HORIZONTAL_MARGIN * 2)).max(1);
                let mut prompt_occupied_lines = ((self.reference.width() as f64
                    / max_chars_per_line as f64)
                    .ceil()
                    + 1.0) as u16;

                if self.reference.width() <= max_chars_per_line as usize {
                    prompt_occupied_lines = 1;
                }

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Length(
                                ((area.height as f64 - prompt_occupied_lines as f64) / 2.0) as u16,
                            ),
                            Constraint::Length(prompt_occupied_lines),
                            Constraint::Length(1),
                            Constraint::Length(1),
                            Constraint::Length(1),
                            Constraint::Min(0),
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let reference_chars: Vec<char> = self.reference.chars().collect();
                let typed_chars: Vec<char> = self.typed.chars().collect();

                let mut spans = typed_chars
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx < reference_chars.len())
                    .map(|(idx, typed)| {
                        if *typed == reference_chars[idx] {
                            Span::styled(typed.to_string(), green_bold_style)
                        } else {
                            // Show what was actually typed, making stray
                            // spaces visible.
                            Span::styled(
                                match typed {
                                    ' ' => "·".to_owned(),
                                    c => c.to_string(),
                                },
                                red_bold_style,
                            )
                        }
                    })
                    .collect::<Vec<Span>>();

                let caret = typed_chars.len();
                if caret < reference_chars.len() {
                    spans.push(Span::styled(
                        reference_chars[caret].to_string(),
                        underlined_dim_bold_style,
                    ));
                    let rest: String = reference_chars[caret + 1..].iter().collect();
                    spans.push(Span::styled(rest, dim_bold_style));
                }

                let widget = Paragraph::new(Line::from(spans))
                    .alignment(if prompt_occupied_lines == 1 {
                        // when the prompt is small enough to fit on one line
                        // centering the text gives a nice zen feeling
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true });

                widget.render(chunks[1], buf);

                let reading = self.meter.reading();
                let metrics = Paragraph::new(Span::styled(
                    format!(
                        "{:.1} sec   {} cpm   {}% acc",
                        reading.elapsed_secs, reading.chars_per_min, reading.accuracy
                    ),
                    dim_bold_style,
                ))
                .alignment(Alignment::Center);

                metrics.render(chunks[3], buf);

                let legend = Paragraph::new(Span::styled(
                    if self.config.allow_backspace {
                        "(←) retry / (→) new / (esc)ape"
                    } else {
                        "(←) retry / (→) new / (esc)ape / backspace off"
                    },
                    italic_style,
                ))
                .alignment(Alignment::Center);

                legend.render(chunks[4], buf);
            }
            AppState::Results => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Min(1),    // chart
                            Constraint::Length(1), // final reading
                            Constraint::Length(1), // padding
                            Constraint::Length(1), // legend
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let (overall_duration, highest_cpm) = compute_chart_bounds(&self.history);

                let datasets = vec![Dataset::default()
                    .marker(ratatui::symbols::Marker::Braille)
                    .style(magenta_style)
                    .graph_type(GraphType::Line)
                    .data(&self.history)];

                let chart = Chart::new(datasets)
                    .x_axis(
                        Axis::default()
                            .title("seconds")
                            .bounds([1.0, overall_duration])
                            .labels(vec![
                                Span::styled("1", bold_style),
                                Span::styled(format_label(overall_duration), bold_style),
                            ]),
                    )
                    .y_axis(
                        Axis::default()
                            .title("cpm")
                            .bounds([0.0, highest_cpm])
                            .labels(vec![
                                Span::styled("0", bold_style),
                                Span::styled(format_label(highest_cpm), bold_style),
                            ]),
                    );

                chart.render(chunks[0], buf);

                let reading = self.meter.reading();
                let stats = Paragraph::new(Span::styled(
                    format!(
                        "{:.1} sec   {} cpm   {}% acc",
                        reading.elapsed_secs, reading.chars_per_min, reading.accuracy
                    ),
                    bold_style,
                ))
                .alignment(Alignment::Center);

                stats.render(chunks[1], buf);

                let legend = Paragraph::new(Span::styled(
                    "(r)etry / (n)ew / (esc)ape",
                    italic_style,
                ));

                legend.render(chunks[3], buf);
            }
        }
    }
}

/// Compute X (seconds) and Y (cpm) bounds for the results chart
fn compute_chart_bounds(history: &[(f64, f64)]) -> (f64, f64) {
    let mut highest_cpm = 0.0;
    for &(_, cpm) in history {
        if cpm > highest_cpm {
            highest_cpm = cpm;
        }
    }

    let mut overall_duration = match history.last() {
        Some(x) => x.0,
        None => 1.0,
    };
    if overall_duration < 1.0 {
        overall_duration = 1.0;
    }

    (overall_duration, highest_cpm.round())
}

/// Format a simple numeric label consistently
fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
