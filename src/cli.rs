use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{FieldShape, RawFieldInputs};

#[derive(Parser)]
#[command(
    name = "agroassist",
    version,
    about = "Fertilizer calculator and plant health assistant"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a fertilizer recommendation without the TUI
    Calc(CalcArgs),
    /// Send a plant photo for disease detection
    Detect {
        /// Image file (JPEG, PNG, WebP, GIF or BMP)
        image: PathBuf,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported crops and their baseline requirements
    Crops,
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

/// Field values are taken as text and go through the same parsing as
/// the form, so a bad number behaves like an empty box.
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Crop name, e.g. Potato
    #[arg(long)]
    pub crop: String,

    /// rectangle, circle or triangle
    #[arg(long, default_value = "rectangle")]
    pub shape: String,

    /// Rectangle length (m)
    #[arg(long, default_value = "")]
    pub length: String,

    /// Rectangle width (m)
    #[arg(long, default_value = "")]
    pub width: String,

    /// Circle diameter (m)
    #[arg(long, default_value = "")]
    pub diameter: String,

    /// Triangle side a (m)
    #[arg(long, default_value = "")]
    pub side_a: String,

    /// Triangle side b (m)
    #[arg(long, default_value = "")]
    pub side_b: String,

    /// Triangle side c (m)
    #[arg(long, default_value = "")]
    pub side_c: String,

    /// Area in hectares, replaces the dimensions
    #[arg(long, default_value = "")]
    pub area: String,

    /// Soil pH
    #[arg(long, default_value = "")]
    pub ph: String,

    /// Soil nitrogen (kg/ha)
    #[arg(long, default_value = "")]
    pub soil_n: String,

    /// Soil phosphorus (kg/ha)
    #[arg(long, default_value = "")]
    pub soil_p: String,

    /// Soil potassium (kg/ha)
    #[arg(long, default_value = "")]
    pub soil_k: String,

    /// synthetic, organic or custom
    #[arg(long)]
    pub fertilizer_type: Option<String>,

    /// Application method, e.g. "Drip Irrigation"
    #[arg(long)]
    pub method: Option<String>,

    /// spring, summer, fall or winter
    #[arg(long)]
    pub season: Option<String>,

    /// Print the recommendation as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalcArgs {
    /// Build form inputs. Options left out fall back to `defaults`;
    /// an unknown option name is returned as the error.
    pub fn to_raw(&self, defaults: &RawFieldInputs) -> Result<RawFieldInputs, String> {
        use crate::models::{ApplicationMethod, FertilizerType, Season};

        let shape =
            FieldShape::from_str(&self.shape).ok_or_else(|| format!("shape '{}'", self.shape))?;

        let fertilizer_type = match self.fertilizer_type.as_deref() {
            Some(s) => FertilizerType::from_str(s).ok_or_else(|| format!("fertilizer type '{}'", s))?,
            None => defaults.fertilizer_type,
        };
        let application_method = match self.method.as_deref() {
            Some(s) => {
                ApplicationMethod::from_str(s).ok_or_else(|| format!("application method '{}'", s))?
            }
            None => defaults.application_method,
        };
        let season = match self.season.as_deref() {
            Some(s) => Season::from_str(s).ok_or_else(|| format!("season '{}'", s))?,
            None => defaults.season,
        };

        Ok(RawFieldInputs {
            crop: self.crop.clone(),
            shape,
            length: self.length.clone(),
            width: self.width.clone(),
            diameter: self.diameter.clone(),
            side_a: self.side_a.clone(),
            side_b: self.side_b.clone(),
            side_c: self.side_c.clone(),
            area: self.area.clone(),
            ph: self.ph.clone(),
            soil_n: self.soil_n.clone(),
            soil_p: self.soil_p.clone(),
            soil_k: self.soil_k.clone(),
            fertilizer_type,
            application_method,
            season,
        })
    }
}
