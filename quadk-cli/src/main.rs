//! Command line front-end for quadk-core.
//!
//! Prints the stiffness matrix of the bilinear plane stress square for the
//! given material and geometry. Parameters come from an optional JSON config
//! file, then individual flags override it. Set `RUST_LOG=debug` for a trace
//! of the pipeline.

use clap::{Parser, ValueEnum};
use eyre::{Result, WrapErr};
use log::{info, warn};

use quadk_core::analysis::{is_symmetric, spectrum};
use quadk_core::config::EvaluationConfig;
use quadk_core::element::quad4::Integration;
use quadk_core::material::Material;
use quadk_core::report::StiffnessReport;

/// Material presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Steel,
    Aluminum,
}

impl Preset {
    fn material(self) -> Material {
        match self {
            Preset::Steel => Material::steel(),
            Preset::Aluminum => Material::aluminum(),
        }
    }
}

/// Quad4 plane stress stiffness
#[derive(Parser, Debug)]
#[command(name = "quadk", about = "Evaluate the 8x8 stiffness matrix of the bilinear square element", long_about = None)]
struct Args {
    #[arg(short, long, help = "JSON config file")]
    config: Option<String>,

    #[arg(short = 'E', long, help = "Young's modulus E")]
    youngs_modulus: Option<f64>,

    #[arg(short = 'n', long, allow_hyphen_values = true, help = "Poisson's ratio nu")]
    poissons_ratio: Option<f64>,

    #[arg(long, value_enum, conflicts_with_all = ["youngs_modulus", "poissons_ratio"], help = "Material preset")]
    preset: Option<Preset>,

    #[arg(long, help = "Element half-width h")]
    half_width: Option<f64>,

    #[arg(short, long, help = "Out-of-plane thickness t")]
    thickness: Option<f64>,

    #[arg(short, long, help = "Integrate with an n x n Gauss rule instead of in closed form")]
    gauss: Option<usize>,

    #[arg(short, long, help = "Significant digits in the printed matrix")]
    digits: Option<usize>,

    #[arg(long, help = "Also report eigenvalues and zero-energy modes")]
    spectrum: bool,

    #[arg(long, help = "Print JSON instead of text")]
    json: bool,
}

impl Args {
    /// Start from the config file (or defaults) and apply flag overrides.
    fn evaluation_config(&self) -> Result<EvaluationConfig> {
        let mut config = match &self.config {
            Some(path) => EvaluationConfig::load(path)
                .wrap_err_with(|| format!("failed to load config from {path}"))?,
            None => EvaluationConfig::default(),
        };

        if let Some(preset) = self.preset {
            let material = preset.material();
            config.youngs_modulus = material.youngs_modulus;
            config.poissons_ratio = material.poissons_ratio;
        }
        if let Some(e) = self.youngs_modulus {
            config.youngs_modulus = e;
        }
        if let Some(nu) = self.poissons_ratio {
            config.poissons_ratio = nu;
        }
        if let Some(h) = self.half_width {
            config.half_width = h;
        }
        if let Some(t) = self.thickness {
            config.thickness = t;
        }
        if let Some(n) = self.gauss {
            config.integration = Integration::Gauss(n);
        }
        if let Some(digits) = self.digits {
            config.significant_digits = digits;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.evaluation_config()?;
    info!("Evaluating stiffness with {config:?}");

    let k = config.evaluate().wrap_err("stiffness evaluation failed")?;
    if !is_symmetric(&k, 1e-12 * k.amax()) {
        warn!("stiffness matrix is not symmetric to round-off");
    }

    let mut report = StiffnessReport::new(&config, &k);
    if args.spectrum {
        report = report.with_spectrum(spectrum(&k));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
