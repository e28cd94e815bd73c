use crate::models::{DiseaseSuggestion, HealthAssessment};
use crate::ui::components::{confidence_gauge, InputWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct DiagnosisScreen<'a> {
    pub image_path: &'a str,
    pub editing: bool,
    pub assessing: bool,
    pub assessment: Option<&'a HealthAssessment>,
    pub selected_index: usize,
    pub available: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> DiagnosisScreen<'a> {
    pub fn new(image_path: &'a str, assessment: Option<&'a HealthAssessment>) -> Self {
        Self {
            image_path,
            editing: false,
            assessing: false,
            assessment,
            selected_index: 0,
            available: true,
            status_message: None,
        }
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn assessing(mut self, assessing: bool) -> Self {
        self.assessing = assessing;
        self
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn suggestions(&self) -> Vec<&'a DiseaseSuggestion> {
        self.assessment
            .map(|a| a.unique_suggestions())
            .unwrap_or_default()
    }
}

impl Widget for DiagnosisScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Path input
                Constraint::Length(2), // Verdict
                Constraint::Min(10),   // Results
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Plant Disease Detection", Theme::title()),
            Span::styled(" - assess a plant photo", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        InputWidget::new("Image path (JPEG, PNG, WebP, GIF, BMP)", self.image_path)
            .placeholder("Press Enter and type the path to a photo")
            .focused(true)
            .editing(self.editing)
            .render(chunks[1], buf);

        self.render_verdict(chunks[2], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[3]);
        self.render_list(content[0], buf);
        self.render_details(content[1], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::highlight())).render(chunks[4], buf);
        }

        let nav = if self.editing {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Detect ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Cancel", Theme::nav_label()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Edit Path ", Theme::nav_label()),
                Span::styled("[d]", Theme::nav_key()),
                Span::styled("Detect ", Theme::nav_label()),
                Span::styled("[↑↓]", Theme::nav_key()),
                Span::styled("Navigate ", Theme::nav_label()),
                Span::styled("[x]", Theme::nav_key()),
                Span::styled("Clear ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Back", Theme::nav_label()),
            ])
        };
        Paragraph::new(nav).render(chunks[5], buf);
    }
}

impl DiagnosisScreen<'_> {
    fn render_verdict(&self, area: Rect, buf: &mut Buffer) {
        let line = if !self.available {
            Line::from(Span::styled(
                "Plant health API not configured - run `agroassist init` to add an API key",
                Theme::warning(),
            ))
        } else if self.assessing {
            Line::from(Span::styled("Detecting disease...", Theme::highlight()))
        } else if let Some(assessment) = self.assessment {
            let healthy = match assessment.is_healthy {
                Some(true) => Span::styled("Plant looks healthy", Theme::success()),
                Some(false) => Span::styled("Signs of disease detected", Theme::error()),
                None => Span::styled("Health unknown", Theme::dim()),
            };
            Line::from(vec![
                healthy,
                Span::styled(
                    format!(
                        "  (assessed {})",
                        assessment.assessed_at.format("%Y-%m-%d %H:%M")
                    ),
                    Theme::dim(),
                ),
            ])
        } else {
            Line::from(Span::styled("No image assessed yet", Theme::dim()))
        };

        Paragraph::new(line).render(area, buf);
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Detection Results")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let suggestions = self.suggestions();
        if suggestions.is_empty() {
            Paragraph::new(Span::styled("No suggestions", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };

                let line = Line::from(vec![
                    Span::styled(
                        format!("{:>3}% ", s.confidence_percent()),
                        Style::default().fg(Theme::confidence_color(s.probability)),
                    ),
                    Span::raw(s.name.clone()),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let suggestions = self.suggestions();
        let Some(disease) = suggestions.get(self.selected_index) else {
            Paragraph::new(Span::styled(
                "Select a result to view treatment",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        };

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(inner);

        confidence_gauge(&disease.name, disease.probability).render(parts[0], buf);

        let mut lines = Vec::new();

        if disease.is_high_confidence() {
            lines.push(Line::from(Span::styled(
                "High confidence detection. Immediate action is recommended.",
                Theme::error().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![]));
        }

        if let Some(ref description) = disease.details.description {
            lines.push(Line::from(Span::styled(description.as_str(), Theme::normal())));
            lines.push(Line::from(vec![]));
        }

        let treatment = &disease.details.treatment;
        if treatment.is_empty() {
            lines.push(Line::from(Span::styled(
                "No treatment information available",
                Theme::dim(),
            )));
        }
        for (heading, entries) in [
            ("Chemical treatment:", &treatment.chemical),
            ("Biological treatment:", &treatment.biological),
            ("Prevention:", &treatment.prevention),
        ] {
            if entries.is_empty() {
                continue;
            }
            lines.push(Line::from(Span::styled(heading, Theme::dim())));
            for entry in entries {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Theme::dim()),
                    Span::styled(entry.as_str(), Theme::success()),
                ]));
            }
        }

        if let Some(ref cause) = disease.details.cause {
            lines.push(Line::from(vec![]));
            lines.push(Line::from(vec![
                Span::styled("Cause: ", Theme::dim()),
                Span::styled(cause.as_str(), Theme::normal()),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(parts[1], buf);
    }
}
