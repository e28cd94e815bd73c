use crate::models::NutrientScale;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: f64,
    unit: &'a str,
    min: f64,
    max: f64,
    color: Color,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: f64, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            color: Theme::FG,
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let value_str = format!(
            "{:.prec$}{}",
            self.value,
            self.unit,
            prec = self.precision
        );
        let value_line = Line::from(vec![Span::styled(
            value_str,
            Style::default().fg(self.color),
        )]);
        Paragraph::new(value_line).render(inner, buf);

        if inner.height >= 2 {
            let bar_area = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };

            let filled = (bar_area.width as f64 * self.ratio(self.value)) as u16;

            for x in bar_area.x..bar_area.x + bar_area.width {
                let ch = if x < bar_area.x + filled {
                    '█'
                } else {
                    '░'
                };
                buf[(x, bar_area.y)].set_char(ch).set_fg(self.color);
            }
        }
    }
}

pub fn nitrogen_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Nitrogen (N)", value, " kg/ha")
        .range(0.0, NutrientScale::N)
        .color(Theme::NITROGEN)
}

pub fn phosphorus_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Phosphorus (P₂O₅)", value, " kg/ha")
        .range(0.0, NutrientScale::P2O5)
        .color(Theme::PHOSPHORUS)
}

pub fn potassium_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Potassium (K₂O)", value, " kg/ha")
        .range(0.0, NutrientScale::K2O)
        .color(Theme::POTASSIUM)
}

/// Confidence of a disease suggestion as a 0-100% bar.
pub fn confidence_gauge(title: &str, probability: f64) -> GaugeWidget<'_> {
    GaugeWidget::new(title, probability * 100.0, "%")
        .range(0.0, 100.0)
        .precision(0)
        .color(Theme::confidence_color(probability))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_clamps_to_range() {
        let gauge = nitrogen_gauge(0.0);
        assert_eq!(gauge.ratio(100.0), 0.5);
        assert_eq!(gauge.ratio(-10.0), 0.0);
        assert_eq!(gauge.ratio(400.0), 1.0);
    }

    #[test]
    fn empty_range_has_zero_ratio() {
        let gauge = GaugeWidget::new("x", 1.0, "").range(5.0, 5.0);
        assert_eq!(gauge.ratio(5.0), 0.0);
    }

    #[test]
    fn zero_rate_renders_empty_bar() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        potassium_gauge(0.0).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].symbol(), "0");
        for x in 1..19 {
            assert_eq!(buf[(x, 2)].symbol(), "░");
        }
    }

    #[test]
    fn renders_bar_for_value() {
        let area = Rect::new(0, 0, 22, 4);
        let mut buf = Buffer::empty(area);
        phosphorus_gauge(100.0).render(area, &mut buf);
        // Full scale fills every inner cell of the bar row.
        for x in 1..21 {
            assert_eq!(buf[(x, 2)].symbol(), "█");
        }
    }
}
