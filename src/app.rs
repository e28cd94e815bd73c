use crate::config::{CalculatorConfig, Config};
use crate::logic::compute_raw;
use crate::models::{
    crop_names, ApplicationMethod, FertilizerType, FieldShape, HealthAssessment, RawFieldInputs,
    RecommendationResult, Season, CROP_TABLE,
};
use crate::ui::screens::CalculatorField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calculator,
    Diagnosis,
    Crops,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Calculator),
            '2' => Some(Screen::Diagnosis),
            '3' => Some(Screen::Crops),
            _ => None,
        }
    }
}

/// Step through a fixed option list, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    options[next]
}

fn accepts_numeric(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E' | '+')
}

/// Form state plus the latest result. Every mutation recomputes the
/// result in full before returning.
pub struct CalculatorState {
    pub form: RawFieldInputs,
    pub focused_field: CalculatorField,
    pub editing: bool,
    edit_backup: String,
    pub result: Option<RecommendationResult>,
}

impl CalculatorState {
    pub fn new(defaults: &CalculatorConfig) -> Self {
        let crop = defaults
            .default_crop
            .clone()
            .filter(|c| CROP_TABLE.iter().any(|p| p.name == c))
            .unwrap_or_default();

        let mut state = Self {
            form: RawFieldInputs {
                crop,
                fertilizer_type: defaults.fertilizer_type(),
                application_method: defaults.application_method(),
                season: defaults.season(),
                ..Default::default()
            },
            focused_field: CalculatorField::Crop,
            editing: false,
            edit_backup: String::new(),
            result: None,
        };
        state.recompute();
        state
    }

    pub fn recompute(&mut self) {
        self.result = compute_raw(&self.form);
    }

    fn visible_fields(&self) -> Vec<CalculatorField> {
        CalculatorField::visible(self.form.shape)
    }

    pub fn next_field(&mut self) {
        self.focused_field = cycle(&self.visible_fields(), self.focused_field, true);
    }

    pub fn prev_field(&mut self) {
        self.focused_field = cycle(&self.visible_fields(), self.focused_field, false);
    }

    fn text_mut(&mut self, field: CalculatorField) -> Option<&mut String> {
        let form = &mut self.form;
        match field {
            CalculatorField::Length => Some(&mut form.length),
            CalculatorField::Width => Some(&mut form.width),
            CalculatorField::Diameter => Some(&mut form.diameter),
            CalculatorField::SideA => Some(&mut form.side_a),
            CalculatorField::SideB => Some(&mut form.side_b),
            CalculatorField::SideC => Some(&mut form.side_c),
            CalculatorField::Area => Some(&mut form.area),
            CalculatorField::Ph => Some(&mut form.ph),
            CalculatorField::SoilN => Some(&mut form.soil_n),
            CalculatorField::SoilP => Some(&mut form.soil_p),
            CalculatorField::SoilK => Some(&mut form.soil_k),
            _ => None,
        }
    }

    /// Move a select field to its next/previous option.
    pub fn cycle_option(&mut self, forward: bool) {
        match self.focused_field {
            CalculatorField::Crop => {
                let mut options = vec![""];
                options.extend(crop_names());
                let next = cycle(&options, self.form.crop.as_str(), forward);
                self.form.crop = next.to_string();
            }
            CalculatorField::Shape => {
                self.form.shape = cycle(FieldShape::all(), self.form.shape, forward);
            }
            CalculatorField::FertilizerType => {
                self.form.fertilizer_type =
                    cycle(FertilizerType::all(), self.form.fertilizer_type, forward);
            }
            CalculatorField::ApplicationMethod => {
                self.form.application_method =
                    cycle(ApplicationMethod::all(), self.form.application_method, forward);
            }
            CalculatorField::Season => {
                self.form.season = cycle(Season::all(), self.form.season, forward);
            }
            _ => return,
        }
        self.recompute();
    }

    pub fn select_crop(&mut self, name: &str) {
        self.form.crop = name.to_string();
        self.recompute();
    }

    pub fn start_editing(&mut self) {
        let field = self.focused_field;
        if let Some(current) = self.text_mut(field).cloned() {
            self.edit_backup = current;
            self.editing = true;
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.editing || !accepts_numeric(c) {
            return;
        }
        let field = self.focused_field;
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.recompute();
        }
    }

    pub fn pop_char(&mut self) {
        if !self.editing {
            return;
        }
        let field = self.focused_field;
        if let Some(text) = self.text_mut(field) {
            if text.pop().is_some() {
                self.recompute();
            }
        }
    }

    /// Empty the focused text field without entering edit mode.
    pub fn clear_field(&mut self) {
        let field = self.focused_field;
        if let Some(text) = self.text_mut(field) {
            if !text.is_empty() {
                text.clear();
                self.recompute();
            }
        }
    }

    pub fn cancel_editing(&mut self) {
        if !self.editing {
            return;
        }
        self.editing = false;
        let backup = std::mem::take(&mut self.edit_backup);
        let field = self.focused_field;
        if let Some(text) = self.text_mut(field) {
            *text = backup;
        }
        self.recompute();
    }

    pub fn finish_editing(&mut self) {
        self.editing = false;
        self.edit_backup.clear();
    }
}

pub struct DiagnosisState {
    pub image_path: String,
    pub editing: bool,
    pub selected_index: usize,
    pub assessment: Option<HealthAssessment>,
}

impl DiagnosisState {
    pub fn new() -> Self {
        Self {
            image_path: String::new(),
            editing: false,
            selected_index: 0,
            assessment: None,
        }
    }

    pub fn suggestion_count(&self) -> usize {
        self.assessment
            .as_ref()
            .map(|a| a.unique_suggestions().len())
            .unwrap_or(0)
    }

    pub fn next(&mut self) {
        let max = self.suggestion_count();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn set_assessment(&mut self, assessment: HealthAssessment) {
        self.assessment = Some(assessment);
        self.selected_index = 0;
    }

    pub fn clear(&mut self) {
        self.assessment = None;
        self.selected_index = 0;
    }
}

pub struct CropsState {
    pub selected_index: usize,
}

impl CropsState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self) {
        if self.selected_index < CROP_TABLE.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,

    // Screen states
    pub calculator: CalculatorState,
    pub diagnosis: DiagnosisState,
    pub crops: CropsState,

    // UI state
    pub status_message: Option<String>,
    pub assessing: bool,
    pub needs_assessment: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let calculator = CalculatorState::new(&config.calculator);

        Self {
            screen: Screen::Calculator,
            should_quit: false,
            config,
            calculator,
            diagnosis: DiagnosisState::new(),
            crops: CropsState::new(),
            status_message: None,
            assessing: false,
            needs_assessment: false,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// True while any text field has keyboard focus.
    pub fn is_editing(&self) -> bool {
        self.calculator.editing || self.diagnosis.editing
    }

    pub fn plant_health_available(&self) -> bool {
        self.config.plant_health().is_some()
    }

    pub fn request_assessment(&mut self) {
        if !self.plant_health_available() {
            self.set_status("Plant health API not configured");
            return;
        }
        if self.diagnosis.image_path.trim().is_empty() {
            self.set_status("Enter an image path first");
            return;
        }
        self.needs_assessment = true;
        self.assessing = true;
        self.set_status("Detecting disease...");
    }

    /// Copy the highlighted crop into the calculator and show it.
    pub fn use_selected_crop(&mut self) {
        if let Some(crop) = CROP_TABLE.get(self.crops.selected_index) {
            self.calculator.select_crop(crop.name);
            self.calculator.focused_field = CalculatorField::Crop;
            self.switch_screen(Screen::Calculator);
        }
    }
}
