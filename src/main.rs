mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{CalcArgs, Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::PlantHealthClient;
use error::AgroError;
use logic::compute;
use models::{
    find_crop, FieldInputs, HealthAssessment, RawFieldInputs, RecommendationResult, CROP_TABLE,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{CalculatorScreen, CropsScreen, DiagnosisScreen};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.command.is_none())?;

    let config_path = cli.config;
    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            return Ok(());
        }
        Some(Commands::Check) => return run_check(config_path).await,
        Some(Commands::Crops) => {
            print_crops();
            return Ok(());
        }
        Some(Commands::Calc(args)) => {
            let config = Config::load_or_default(config_path)?;
            return run_calc(&args, &config);
        }
        Some(Commands::Detect { image, json }) => {
            let config = Config::load_or_default(config_path)?;
            return run_detect(&image, json, &config).await;
        }
        None => {}
    }

    // Load configuration
    let config = match Config::load_or_default(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Fix the file or run `agroassist init` to recreate it");
            std::process::exit(1);
        }
    };

    let client = match config.plant_health() {
        Some(ph) => Some(PlantHealthClient::new(ph.clone())?),
        None => None,
    };

    let mut app = App::new(config);
    if client.is_none() {
        app.set_status("Plant health API not configured - disease detection disabled");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, client.as_ref()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr for subcommands, to a file while the TUI owns the terminal.
fn init_logging(verbose: u8, tui: bool) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("agroassist=debug"),
        _ => EnvFilter::new("agroassist=trace"),
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if tui {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(Config::log_path()?)?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    } else {
        builder.with_writer(io::stderr).init();
    }

    Ok(())
}

fn run_calc(args: &CalcArgs, config: &Config) -> anyhow::Result<()> {
    let defaults = RawFieldInputs {
        fertilizer_type: config.calculator.fertilizer_type(),
        application_method: config.calculator.application_method(),
        season: config.calculator.season(),
        ..Default::default()
    };
    let raw = args
        .to_raw(&defaults)
        .map_err(|what| AgroError::InvalidData(format!("unknown {}", what)))?;

    let inputs = raw.normalize();
    let Some(result) = compute(&inputs) else {
        eprintln!("No recommendation: {}", explain_missing(&inputs));
        std::process::exit(2);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_recommendation(&result);
    }
    Ok(())
}

/// Same lookups `compute` performs, so the reason matches the failure.
fn explain_missing(inputs: &FieldInputs) -> String {
    match inputs.crop.as_deref() {
        None => "no crop selected".into(),
        Some(crop) if find_crop(crop).is_none() => {
            format!("'{}' is not a supported crop (see `agroassist crops`)", crop)
        }
        Some(_) => format!(
            "field area could not be determined from the {} dimensions given",
            inputs.geometry.shape().as_str().to_lowercase()
        ),
    }
}

fn print_recommendation(result: &RecommendationResult) {
    println!(
        "Fertilizer recommendation for {} ({:.2} ha)",
        result.crop, result.area
    );
    println!();
    let (rates, totals) = (result.rates(), result.totals());
    println!("{:<16}{:>10}{:>10}{:>10}", "", "N", "P2O5", "K2O");
    println!(
        "{:<16}{:>10.1}{:>10.1}{:>10.1}",
        "Rate (kg/ha)", rates.n, rates.p2o5, rates.k2o
    );
    println!(
        "{:<16}{:>10.1}{:>10.1}{:>10.1}",
        "Total (kg)", totals.n, totals.p2o5, totals.k2o
    );
    println!();
    if !result.ph_recommendation.is_empty() {
        println!("pH: {}", result.ph_recommendation);
    }
    println!(
        "Application: {} | Season: {} | Type: {}",
        result.application_method, result.season, result.fertilizer_type
    );
}

fn print_crops() {
    println!("{:<12}{:>8}{:>8}{:>8}", "Crop", "N", "P2O5", "K2O");
    for crop in CROP_TABLE {
        println!(
            "{:<12}{:>8.0}{:>8.0}{:>8.0}",
            crop.name, crop.n, crop.p2o5, crop.k2o
        );
    }
    println!();
    println!("Baseline kg/ha before soil test adjustment");
}

async fn run_detect(image: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    let Some(ph) = config.plant_health() else {
        anyhow::bail!("Plant health API not configured. Run `agroassist init` to add an API key.");
    };

    let client = PlantHealthClient::new(ph.clone())?;
    let assessment = client.assess_file(image).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print_assessment(&assessment);
    }
    Ok(())
}

fn print_assessment(assessment: &HealthAssessment) {
    match assessment.is_healthy {
        Some(true) => println!("Plant looks healthy"),
        Some(false) => println!("Signs of disease detected"),
        None => println!("Health unknown"),
    }

    let suggestions = assessment.unique_suggestions();
    if suggestions.is_empty() {
        println!("No disease suggestions returned");
        return;
    }

    println!();
    for s in suggestions {
        println!("{:>3}%  {}", s.confidence_percent(), s.name);
        if s.is_high_confidence() {
            println!("      High confidence detection. Immediate action is recommended.");
        }
        if let Some(ref description) = s.details.description {
            println!("      {}", description);
        }
        if s.details.treatment.is_empty() {
            println!("      No treatment information available");
        }
        for (heading, entries) in [
            ("Chemical", &s.details.treatment.chemical),
            ("Biological", &s.details.treatment.biological),
            ("Prevention", &s.details.treatment.prevention),
        ] {
            for entry in entries {
                println!("      {}: {}", heading, entry);
            }
        }
        if let Some(ref cause) = s.details.cause {
            println!("      Cause: {}", cause);
        }
    }
}

async fn run_check(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Checking configuration...");
    let config = Config::load(config_path)?;
    println!("  Config: OK");

    let calc = &config.calculator;
    match calc.default_crop.as_deref() {
        Some(crop) if find_crop(crop).is_none() => {
            println!("  Default crop: '{}' is not supported, ignored", crop)
        }
        Some(crop) => println!("  Default crop: {}", crop),
        None => println!("  Default crop: none"),
    }
    println!(
        "  Defaults: {} / {} / {}",
        calc.fertilizer_type(),
        calc.application_method(),
        calc.season()
    );

    match config.plant_health() {
        Some(ph) => {
            let client = PlantHealthClient::new(ph.clone())?;
            match client.test_connection().await {
                Ok(true) => println!("  Plant health API: OK"),
                Ok(false) => println!("  Plant health API: FAILED (check API key)"),
                Err(e) => println!("  Plant health API: OFFLINE ({})", e),
            }
        }
        None => println!("  Plant health API: not configured"),
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: Option<&PlantHealthClient>,
) -> anyhow::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();
            let status = app.status_message.as_deref();

            match app.screen {
                Screen::Calculator => {
                    let state = &app.calculator;
                    let screen = CalculatorScreen::new(&state.form, state.result.as_ref())
                        .with_focus(state.focused_field)
                        .editing(state.editing)
                        .with_status(status);
                    f.render_widget(screen, area);
                }
                Screen::Diagnosis => {
                    let state = &app.diagnosis;
                    let screen =
                        DiagnosisScreen::new(&state.image_path, state.assessment.as_ref())
                            .editing(state.editing)
                            .assessing(app.assessing)
                            .with_selection(state.selected_index)
                            .available(client.is_some())
                            .with_status(status);
                    f.render_widget(screen, area);
                }
                Screen::Crops => {
                    let screen = CropsScreen::new().with_selection(app.crops.selected_index);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // The frame above already shows the pending state
        if app.needs_assessment {
            app.needs_assessment = false;
            run_assessment(app, client).await;
            continue;
        }

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Global key handling
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Char('q') if !app.is_editing() => {
                        app.quit();
                    }
                    KeyCode::Esc if !app.is_editing() => {
                        app.switch_screen(Screen::Calculator);
                    }
                    KeyCode::Char(c) if !app.is_editing() => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => {
                        handle_screen_input(app, key.code);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn run_assessment(app: &mut App, client: Option<&PlantHealthClient>) {
    let path = PathBuf::from(app.diagnosis.image_path.trim());
    let outcome = match client {
        Some(client) => client.assess_file(&path).await,
        None => Err(AgroError::Config("Plant health API not configured".into())),
    };

    match outcome {
        Ok(assessment) => {
            let summary = match assessment.top_suggestion() {
                Some(top) => format!(
                    "Most likely: {} ({}%)",
                    top.name,
                    top.confidence_percent()
                ),
                None => "No disease suggestions returned".to_string(),
            };
            app.diagnosis.set_assessment(assessment);
            app.set_status(&summary);
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "disease detection failed");
            app.diagnosis.clear();
            app.set_status(&format!("Detection failed: {}", e));
        }
    }
    app.assessing = false;
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Calculator => handle_calculator_input(app, code),
        Screen::Diagnosis => handle_diagnosis_input(app, code),
        Screen::Crops => handle_crops_input(app, code),
    }
}

fn handle_calculator_input(app: &mut App, code: KeyCode) {
    let state = &mut app.calculator;
    if state.editing {
        // Editing mode
        match code {
            KeyCode::Esc => state.cancel_editing(),
            KeyCode::Enter => state.finish_editing(),
            KeyCode::Tab => {
                state.finish_editing();
                state.next_field();
            }
            KeyCode::BackTab => {
                state.finish_editing();
                state.prev_field();
            }
            KeyCode::Backspace => state.pop_char(),
            KeyCode::Char(c) => state.push_char(c),
            _ => {}
        }
    } else {
        // Navigation mode
        match code {
            KeyCode::Up | KeyCode::BackTab => state.prev_field(),
            KeyCode::Down | KeyCode::Tab => state.next_field(),
            KeyCode::Left => state.cycle_option(false),
            KeyCode::Right => state.cycle_option(true),
            KeyCode::Enter => {
                if state.focused_field.is_select() {
                    state.cycle_option(true);
                } else {
                    state.start_editing();
                }
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => state.clear_field(),
            _ => {}
        }
    }
}

fn handle_diagnosis_input(app: &mut App, code: KeyCode) {
    if app.diagnosis.editing {
        match code {
            KeyCode::Esc => app.diagnosis.editing = false,
            KeyCode::Enter => {
                app.diagnosis.editing = false;
                app.request_assessment();
            }
            KeyCode::Backspace => {
                app.diagnosis.image_path.pop();
            }
            KeyCode::Char(c) => app.diagnosis.image_path.push(c),
            _ => {}
        }
    } else {
        match code {
            KeyCode::Enter => app.diagnosis.editing = true,
            KeyCode::Char('d') => app.request_assessment(),
            KeyCode::Up => app.diagnosis.prev(),
            KeyCode::Down => app.diagnosis.next(),
            KeyCode::Char('x') => {
                app.diagnosis.clear();
                app.clear_status();
            }
            _ => {}
        }
    }
}

fn handle_crops_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.crops.prev(),
        KeyCode::Down => app.crops.next(),
        KeyCode::Enter => app.use_selected_crop(),
        _ => {}
    }
}
