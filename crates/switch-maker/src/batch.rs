use crate::error::MakerError;
use crate::kicad;
use crate::maker::FootprintMaker;
use crate::switches::SwitchType;
use crate::types::Footprint;
use log::info;
use std::path::PathBuf;

/// Keycap sizes generated by default, in units of key spacing.
pub const SIZES: &[f64] = &[1.0, 1.25, 1.5, 1.75, 2.0, 2.25, 2.75, 3.0, 6.0, 6.25, 7.0];

pub const FILE_EXTENSION: &str = "kicad_mod";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Adds the through-hole LED pads and polarity marks.
    Led,
}

impl Variant {
    pub fn suffix(&self) -> &'static str {
        match self {
            Variant::Led => "led",
        }
    }
}

/// One footprint to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// One switch type, or two plated types sharing hybrid pads.
    pub types: Vec<SwitchType>,
    pub size: f64,
    pub variant: Option<Variant>,
}

impl Configuration {
    pub fn new(types: Vec<SwitchType>, size: f64) -> Self {
        Self {
            types,
            size,
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// `MX`, `MX-Alps`, ...
    pub fn type_name(&self) -> String {
        self.types
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// `<TypeName>-<size>u[.variant]`, also used as the footprint name.
    pub fn stem(&self) -> String {
        let base = format!("{}-{}u", self.type_name(), self.size);
        match self.variant {
            Some(v) => format!("{base}.{}", v.suffix()),
            None => base,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{FILE_EXTENSION}", self.stem())
    }

    pub fn has_led(&self) -> bool {
        self.variant == Some(Variant::Led)
    }
}

/// Parse a switch set name: a single type (`mx`, `mx-hotswap`) or a hybrid
/// of types joined with `-` or `+` (`mx-alps`, `mx+alps`).
pub fn parse_type_set(s: &str) -> Result<Vec<SwitchType>, MakerError> {
    if let Ok(single) = s.parse::<SwitchType>() {
        return Ok(vec![single]);
    }
    s.split(|c: char| c == '-' || c == '+')
        .map(|part| {
            part.parse::<SwitchType>()
                .map_err(|_| MakerError::UnknownSwitchType(s.to_string()))
        })
        .collect()
}

/// Switch sets generated by default.
pub fn default_type_sets() -> Vec<Vec<SwitchType>> {
    vec![
        vec![SwitchType::Mx],
        vec![SwitchType::Alps],
        vec![SwitchType::Choc],
        vec![SwitchType::MxHotswap],
        vec![SwitchType::Mx, SwitchType::Alps],
    ]
}

/// What a batch run generates and where it goes.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub type_sets: Vec<Vec<SwitchType>>,
    pub sizes: Vec<f64>,
    /// Also generate the `.led` variant where the switch table has LED pads.
    pub led_variants: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            type_sets: default_type_sets(),
            sizes: SIZES.to_vec(),
            led_variants: true,
        }
    }
}

/// Expand the options into the list of footprints to generate.
///
/// Repeated type sets and sizes are dropped, keeping the first occurrence,
/// so every configuration maps to its own file.
pub fn configurations(opts: &BatchOptions) -> Vec<Configuration> {
    let mut type_sets: Vec<&Vec<SwitchType>> = Vec::new();
    for types in &opts.type_sets {
        if !type_sets.contains(&types) {
            type_sets.push(types);
        }
    }
    let mut sizes: Vec<f64> = Vec::new();
    for &size in &opts.sizes {
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }

    let mut configs = Vec::new();
    for types in type_sets {
        let has_led_pads = types.iter().any(|t| !t.spec().led_pads.is_empty());
        for &size in &sizes {
            let config = Configuration::new(types.clone(), size);
            if opts.led_variants && has_led_pads {
                configs.push(config.clone().with_variant(Variant::Led));
            }
            configs.push(config);
        }
    }
    configs
}

/// Build every footprint of the batch without touching the filesystem.
pub fn build_all(opts: &BatchOptions) -> Result<Vec<Footprint>, MakerError> {
    let maker = FootprintMaker::default();
    configurations(opts)
        .iter()
        .map(|config| maker.make_switch(config))
        .collect()
}

/// Generate and write every footprint of the batch, one file each.
pub fn make_switches(opts: &BatchOptions) -> Result<Vec<PathBuf>, MakerError> {
    let maker = FootprintMaker::default();
    let mut written = Vec::new();
    for config in configurations(opts) {
        let fp = maker.make_switch(&config)?;
        let path = kicad::write_footprint(&fp, &opts.output_dir, &config.file_name())?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
