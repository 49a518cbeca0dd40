use clap::Parser;
use std::path::PathBuf;
use switch_maker::batch::{self, BatchOptions};
use switch_maker::error::MakerError;

#[derive(Parser)]
#[command(
    name = "switch-maker",
    about = "Generate KiCad footprints for keyboard switches"
)]
struct Cli {
    /// Directory the .kicad_mod files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Switch set to generate (mx, alps, choc, mx-hotswap, mx-alps); repeatable, default all
    #[arg(short = 't', long = "type")]
    types: Vec<String>,

    /// Keycap size in units; repeatable, default the standard row sizes
    #[arg(short, long = "size")]
    sizes: Vec<f64>,

    /// Skip the LED variants
    #[arg(long)]
    no_led: bool,

    /// Print the footprint models as JSON instead of writing files
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Read a .kicad_mod file and print its model as JSON
    #[arg(long, value_name = "FILE")]
    inspect: Option<PathBuf>,
}

impl Cli {
    fn batch_options(&self) -> Result<BatchOptions, MakerError> {
        let mut opts = BatchOptions {
            output_dir: self.output_dir.clone(),
            led_variants: !self.no_led,
            ..BatchOptions::default()
        };
        if !self.types.is_empty() {
            opts.type_sets = self
                .types
                .iter()
                .map(|t| batch::parse_type_set(t))
                .collect::<Result<_, _>>()?;
        }
        if !self.sizes.is_empty() {
            opts.sizes = self.sizes.clone();
        }
        Ok(opts)
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String, MakerError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

fn run(cli: &Cli) -> Result<(), MakerError> {
    if let Some(path) = &cli.inspect {
        let fp = switch_maker::inspect(path)?;
        println!("{}", cli.to_json(&fp)?);
        return Ok(());
    }

    let opts = cli.batch_options()?;
    if cli.json {
        let footprints = batch::build_all(&opts)?;
        println!("{}", cli.to_json(&footprints)?);
        return Ok(());
    }

    let written = batch::make_switches(&opts)?;
    eprintln!(
        "Wrote {} footprints to {}",
        written.len(),
        opts.output_dir.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
