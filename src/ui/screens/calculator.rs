use crate::models::{FieldShape, PhStatus, RawFieldInputs, RecommendationResult};
use crate::ui::components::{
    nitrogen_gauge, phosphorus_gauge, potassium_gauge, InputWidget, SelectWidget,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorField {
    Crop,
    Shape,
    Length,
    Width,
    Diameter,
    SideA,
    SideB,
    SideC,
    Area,
    Ph,
    SoilN,
    SoilP,
    SoilK,
    FertilizerType,
    ApplicationMethod,
    Season,
}

impl CalculatorField {
    /// Fields shown for a shape, in tab order.
    pub fn visible(shape: FieldShape) -> Vec<CalculatorField> {
        use CalculatorField::*;
        let dimensions: &[CalculatorField] = match shape {
            FieldShape::Rectangle => &[Length, Width],
            FieldShape::Circle => &[Diameter],
            FieldShape::Triangle => &[SideA, SideB, SideC],
        };

        let mut fields = vec![Crop, Shape];
        fields.extend_from_slice(dimensions);
        fields.extend_from_slice(&[
            Area,
            Ph,
            SoilN,
            SoilP,
            SoilK,
            FertilizerType,
            ApplicationMethod,
            Season,
        ]);
        fields
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalculatorField::Crop => "Crop",
            CalculatorField::Shape => "Field Shape",
            CalculatorField::Length => "Length (m)",
            CalculatorField::Width => "Width (m)",
            CalculatorField::Diameter => "Diameter (m)",
            CalculatorField::SideA => "Side A (m)",
            CalculatorField::SideB => "Side B (m)",
            CalculatorField::SideC => "Side C (m)",
            CalculatorField::Area => "Area (ha, optional override)",
            CalculatorField::Ph => "Soil pH",
            CalculatorField::SoilN => "Soil N (kg/ha)",
            CalculatorField::SoilP => "Soil P (kg/ha)",
            CalculatorField::SoilK => "Soil K (kg/ha)",
            CalculatorField::FertilizerType => "Fertilizer Type",
            CalculatorField::ApplicationMethod => "Application Method",
            CalculatorField::Season => "Season",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(
            self,
            CalculatorField::Crop
                | CalculatorField::Shape
                | CalculatorField::FertilizerType
                | CalculatorField::ApplicationMethod
                | CalculatorField::Season
        )
    }

    pub fn help(&self) -> &'static str {
        match self {
            CalculatorField::Crop => "Choose a crop with ←/→",
            CalculatorField::Shape => "Rectangle, Circle or Triangle. Dimensions follow the shape",
            CalculatorField::Length
            | CalculatorField::Width
            | CalculatorField::Diameter
            | CalculatorField::SideA
            | CalculatorField::SideB
            | CalculatorField::SideC => "Field dimension in meters",
            CalculatorField::Area => {
                "If you know your area, enter it directly (min 0.01 ha). It replaces the dimensions"
            }
            CalculatorField::Ph => "Measured soil pH, 0-14",
            CalculatorField::SoilN | CalculatorField::SoilP | CalculatorField::SoilK => {
                "Existing nutrient from a soil test. Leave blank to assume none"
            }
            CalculatorField::FertilizerType => "Synthetic, Organic or Custom Blend",
            CalculatorField::ApplicationMethod => "How the fertilizer will be applied",
            CalculatorField::Season => "Planned application season",
        }
    }
}

pub struct CalculatorScreen<'a> {
    pub form: &'a RawFieldInputs,
    pub result: Option<&'a RecommendationResult>,
    pub focused_field: CalculatorField,
    pub editing: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> CalculatorScreen<'a> {
    pub fn new(form: &'a RawFieldInputs, result: Option<&'a RecommendationResult>) -> Self {
        Self {
            form,
            result,
            focused_field: CalculatorField::Crop,
            editing: false,
            status_message: None,
        }
    }

    pub fn with_focus(mut self, field: CalculatorField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

/// Display text for a form field.
pub fn field_value(form: &RawFieldInputs, field: CalculatorField) -> &str {
    match field {
        CalculatorField::Crop => &form.crop,
        CalculatorField::Shape => form.shape.as_str(),
        CalculatorField::Length => &form.length,
        CalculatorField::Width => &form.width,
        CalculatorField::Diameter => &form.diameter,
        CalculatorField::SideA => &form.side_a,
        CalculatorField::SideB => &form.side_b,
        CalculatorField::SideC => &form.side_c,
        CalculatorField::Area => &form.area,
        CalculatorField::Ph => &form.ph,
        CalculatorField::SoilN => &form.soil_n,
        CalculatorField::SoilP => &form.soil_p,
        CalculatorField::SoilK => &form.soil_k,
        CalculatorField::FertilizerType => form.fertilizer_type.as_str(),
        CalculatorField::ApplicationMethod => form.application_method.as_str(),
        CalculatorField::Season => form.season.as_str(),
    }
}

/// A soil reading as the calculation saw it. Text that was typed but
/// rejected at parsing is flagged instead of echoed as a measurement.
fn soil_reading(raw: &str, parsed: Option<f64>, unit: &str) -> String {
    match parsed {
        Some(value) => format!("{}{}", value, unit),
        None if raw.trim().is_empty() => "Not provided".to_string(),
        None => format!("{} ignored", raw.trim()),
    }
}

impl Widget for CalculatorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(20),   // Form + results
                Constraint::Length(3), // Help
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Fertilizer Calculator", Theme::title()),
            Span::styled(" - NPK for your crop, field and soil", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.render_form(content[0], buf);
        self.render_results(content[1], buf);
        self.render_help(chunks[2], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::highlight())).render(chunks[3], buf);
        }

        let nav = if self.editing {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Done ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Cancel ", Theme::nav_label()),
                Span::styled("[Bksp]", Theme::nav_key()),
                Span::styled("Delete", Theme::nav_label()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[↑↓]", Theme::nav_key()),
                Span::styled("Field ", Theme::nav_label()),
                Span::styled("[←→]", Theme::nav_key()),
                Span::styled("Choose ", Theme::nav_label()),
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Edit ", Theme::nav_label()),
                Span::styled("[Del]", Theme::nav_key()),
                Span::styled("Clear ", Theme::nav_label()),
                Span::styled("[2]", Theme::nav_key()),
                Span::styled("Diagnose ", Theme::nav_label()),
                Span::styled("[3]", Theme::nav_key()),
                Span::styled("Crops ", Theme::nav_label()),
                Span::styled("[q]", Theme::nav_key()),
                Span::styled("Quit", Theme::nav_label()),
            ])
        };
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl CalculatorScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Field & Soil")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let fields = CalculatorField::visible(self.form.shape);

        // Keep the focused field on screen when the terminal is short.
        let per_page = (inner.height / 3).max(1) as usize;
        let focus_index = fields
            .iter()
            .position(|f| *f == self.focused_field)
            .unwrap_or(0);
        let first = focus_index.saturating_sub(per_page - 1);
        let shown: Vec<_> = fields.iter().skip(first).take(per_page).collect();

        let constraints: Vec<Constraint> = shown.iter().map(|_| Constraint::Length(3)).collect();
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in shown.iter().enumerate() {
            let focused = **field == self.focused_field;
            let value = field_value(self.form, **field);

            if field.is_select() {
                SelectWidget::new(field.label(), value)
                    .focused(focused)
                    .render(areas[i], buf);
            } else {
                InputWidget::new(field.label(), value)
                    .placeholder("-")
                    .focused(focused)
                    .editing(focused && self.editing)
                    .render(areas[i], buf);
            }
        }
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommendation")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(result) = self.result else {
            let msg = if self.form.crop.is_empty() {
                "Select a crop and enter your field size to see a recommendation"
            } else {
                "Enter field dimensions or an area to see a recommendation"
            };
            Paragraph::new(Span::styled(msg, Theme::dim()))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        };

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Crop + area
                Constraint::Length(4), // Gauges
                Constraint::Min(6),    // Details
            ])
            .split(inner);

        let header = vec![
            Line::from(vec![
                Span::styled(&result.crop, Theme::header()),
                Span::styled(format!("  {:.4} ha", result.area), Theme::highlight()),
            ]),
            Line::from(Span::styled(
                "Rates per hectare, adjusted for your soil test",
                Theme::dim(),
            )),
        ];
        Paragraph::new(header).render(sections[0], buf);

        let gauges = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(sections[1]);
        let rates = result.rates();
        nitrogen_gauge(rates.n).render(gauges[0], buf);
        phosphorus_gauge(rates.p2o5).render(gauges[1], buf);
        potassium_gauge(rates.k2o).render(gauges[2], buf);

        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            "Total fertilizer needed for your field:",
            Theme::dim(),
        )));
        let totals = result.totals();
        for (label, total) in [
            ("Nitrogen (N)", totals.n),
            ("Phosphorus (P₂O₅)", totals.p2o5),
            ("Potassium (K₂O)", totals.k2o),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", label), Theme::dim()),
                Span::styled(format!("{:.2} kg", total), Theme::highlight()),
            ]));
        }
        lines.push(Line::from(vec![]));

        let soil = self.form.normalize().soil_test;
        lines.push(Line::from(Span::styled("Soil test:", Theme::dim())));
        lines.push(Line::from(Span::styled(
            format!(
                "  N {} | P₂O₅ {} | K₂O {} | pH {}",
                soil_reading(&self.form.soil_n, soil.n, " kg/ha"),
                soil_reading(&self.form.soil_p, soil.p, " kg/ha"),
                soil_reading(&self.form.soil_k, soil.k, " kg/ha"),
                soil_reading(&self.form.ph, soil.ph, ""),
            ),
            Theme::normal(),
        )));
        if soil.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No readings used, rates are the full crop baseline",
                Theme::dim(),
            )));
        }
        lines.push(Line::from(vec![]));

        if !result.ph_recommendation.is_empty() {
            let style = soil
                .ph
                .map(|ph| Style::default().fg(PhStatus::classify(ph).color()))
                .unwrap_or_else(Theme::normal);
            lines.push(Line::from(Span::styled("pH amendment:", Theme::dim())));
            lines.push(Line::from(Span::styled(
                format!("  {}", result.ph_recommendation),
                style,
            )));
            lines.push(Line::from(vec![]));
        }

        lines.push(Line::from(vec![
            Span::styled("Application: ", Theme::dim()),
            Span::styled(result.application_method.as_str(), Theme::normal()),
            Span::styled("  Season: ", Theme::dim()),
            Span::styled(result.season.as_str(), Theme::normal()),
            Span::styled("  Type: ", Theme::dim()),
            Span::styled(result.fertilizer_type.as_str(), Theme::normal()),
        ]));
        lines.push(Line::from(vec![]));
        lines.push(Line::from(Span::styled(
            "Based on PlantCalculators.com, MorningChores.com, UGA and Clemson extension calculators",
            Theme::dim(),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(sections[2], buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Span::styled(self.focused_field.help(), Theme::dim()))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_fields_follow_shape() {
        let rect = CalculatorField::visible(FieldShape::Rectangle);
        assert!(rect.contains(&CalculatorField::Length));
        assert!(rect.contains(&CalculatorField::Width));
        assert!(!rect.contains(&CalculatorField::Diameter));

        let circle = CalculatorField::visible(FieldShape::Circle);
        assert!(circle.contains(&CalculatorField::Diameter));
        assert!(!circle.contains(&CalculatorField::Length));

        let tri = CalculatorField::visible(FieldShape::Triangle);
        assert_eq!(tri.len(), 2 + 3 + 8);
        assert_eq!(tri[0], CalculatorField::Crop);
        assert_eq!(*tri.last().unwrap(), CalculatorField::Season);
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn soil_reading_marks_blank_and_rejected() {
        assert_eq!(soil_reading("", None, " kg/ha"), "Not provided");
        assert_eq!(soil_reading(" 40 ", Some(40.0), " kg/ha"), "40 kg/ha");
        assert_eq!(soil_reading("-50", None, " kg/ha"), "-50 ignored");
    }

    #[test]
    fn soil_report_matches_what_was_computed() {
        let form = RawFieldInputs {
            crop: "Wheat".into(),
            area: "1".into(),
            soil_n: "-50".into(),
            ph: "15".into(),
            ..Default::default()
        };
        let result = crate::logic::compute_raw(&form).unwrap();
        assert_eq!(result.n, 120.0);
        assert_eq!(result.ph_recommendation, "");

        let area = Rect::new(0, 0, 160, 50);
        let mut buf = Buffer::empty(area);
        CalculatorScreen::new(&form, Some(&result)).render(area, &mut buf);
        let text = screen_text(&buf);

        assert!(text.contains("N -50 ignored"));
        assert!(text.contains("pH 15 ignored"));
        assert!(!text.contains("-50 kg/ha"));
        assert!(text.contains("No readings used"));
    }

    #[test]
    fn soil_report_shows_accepted_readings() {
        let form = RawFieldInputs {
            crop: "Wheat".into(),
            area: "1".into(),
            soil_n: "30".into(),
            ph: "6.5".into(),
            ..Default::default()
        };
        let result = crate::logic::compute_raw(&form).unwrap();

        let area = Rect::new(0, 0, 160, 50);
        let mut buf = Buffer::empty(area);
        CalculatorScreen::new(&form, Some(&result)).render(area, &mut buf);
        let text = screen_text(&buf);

        assert!(text.contains("N 30 kg/ha"));
        assert!(text.contains("pH 6.5"));
        assert!(!text.contains("No readings used"));
    }

    #[test]
    fn renders_without_result() {
        let form = RawFieldInputs::default();
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        CalculatorScreen::new(&form, None).render(area, &mut buf);
        let text: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(text.starts_with("Fertilizer Calculator"));
    }
}
