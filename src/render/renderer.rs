use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Position, Snapshot};
use crate::metrics::GameMetrics;

pub struct Renderer {
    /// Score panel lines and the snapshot info version they were built from
    info_cache: Option<(u64, Vec<Span<'static>>)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self { info_cache: None }
    }

    pub fn render(&mut self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.game_over {
            frame.render_widget(self.render_game_over(snapshot, metrics), game_area);
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let size = snapshot.grid_size as i32;
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_size);

        // y grows upwards, so the top line is the last row
        for y in (0..size).rev() {
            let spans: Vec<Span> = (0..size)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if Some(pos) == head {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if snapshot.body.contains(&pos) {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    } else if pos == snapshot.food {
                        Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    /// Score, food and speed only change on ticks that bump `info_version`
    fn info_spans(&mut self, snapshot: &Snapshot) -> Vec<Span<'static>> {
        match &self.info_cache {
            Some((version, spans)) if !snapshot.info_changed_since(*version) => spans.clone(),
            _ => {
                let spans = vec![
                    Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        snapshot.score.to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("    "),
                    Span::styled("Food: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        snapshot.food_eaten.to_string(),
                        Style::default().fg(Color::White),
                    ),
                    Span::raw("    "),
                    Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        snapshot.difficulty.to_string(),
                        Style::default().fg(Color::White),
                    ),
                ];
                self.info_cache = Some((snapshot.info_version, spans.clone()));
                spans
            }
        }
    }

    fn render_stats(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let mut spans = self.info_spans(snapshot);
        spans.extend([
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled(
                format!("FPS: {:.1}", metrics.fps()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Esc",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter/R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Esc/Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
