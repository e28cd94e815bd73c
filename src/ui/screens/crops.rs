use crate::models::CROP_TABLE;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Reference table of baseline requirements.
pub struct CropsScreen {
    pub selected_index: usize,
}

impl CropsScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for CropsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(12),   // Table
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crop Requirements", Theme::title()),
            Span::styled(" - baseline kg/ha, no existing soil nutrients", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let block = Block::default()
            .title("Crops")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(chunks[1]);
        block.render(chunks[1], buf);

        let mut items = vec![ListItem::new(Line::from(Span::styled(
            format!("{:<12}{:>8}{:>8}{:>8}", "Crop", "N", "P2O5", "K2O"),
            Theme::header(),
        )))];
        items.extend(CROP_TABLE.iter().enumerate().map(|(i, crop)| {
            let style = if i == self.selected_index {
                Theme::selected()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::raw(format!(
                "{:<12}{:>8.0}{:>8.0}{:>8.0}",
                crop.name, crop.n, crop.p2o5, crop.k2o
            ))))
            .style(style)
        }));
        List::new(items).render(inner, buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Use in Calculator ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}
