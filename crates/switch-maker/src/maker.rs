use crate::batch::Configuration;
use crate::error::MakerError;
use crate::geometry::{OvalPad, Point};
use crate::switches::*;
use crate::types::*;
use log::debug;

/// Builds footprints from the switch tables.
#[derive(Debug, Clone)]
pub struct FootprintMaker {
    /// Key pitch; the border rectangle is `size` pitches wide.
    pub spacing: f64,
    /// Stroke width of every drawn line.
    pub line_width: f64,
}

impl Default for FootprintMaker {
    fn default() -> Self {
        Self {
            spacing: SWITCH_SPACING,
            line_width: 0.15,
        }
    }
}

impl FootprintMaker {
    /// Build the footprint for one configuration.
    pub fn make_switch(&self, config: &Configuration) -> Result<Footprint, MakerError> {
        if !config.size.is_finite() || config.size <= 0.0 {
            return Err(MakerError::InvalidSize(config.size));
        }
        let specs = resolve_specs(config)?;

        let mut fp = Footprint::new(config.stem());
        fp.description = format!(
            "{} keyboard switch footprint, {}u",
            specs.iter().map(|s| s.name).collect::<Vec<_>>().join("/"),
            config.size
        );
        fp.tags = vec!["keyboard".to_string(), "switch".to_string()];
        fp.tags.extend(specs.iter().map(|s| s.name.to_string()));
        fp.attr = Some(if specs.iter().any(|s| s.hotswap.is_some()) {
            "smd".to_string()
        } else {
            "through_hole".to_string()
        });

        fp.texts.push(FpText::new(
            TextKind::Reference,
            "REF**",
            [0.0, ANNOTATION_OFFSET],
            LAYER_DWGS_USER,
        ));
        fp.texts.push(FpText::new(
            TextKind::Value,
            format!("{}u", config.size),
            [0.0, -ANNOTATION_OFFSET],
            LAYER_DWGS_USER,
        ));

        self.add_borders(&mut fp, config.size);
        self.add_cutouts(&mut fp, &specs);
        self.add_switch_pads(&mut fp, &specs);
        if config.has_led() {
            self.add_led_pads(&mut fp, &specs);
        }
        self.add_support_holes(&mut fp, &specs);
        self.add_stabilizers(&mut fp, &specs, config.size);
        self.add_hotswap_socket(&mut fp, &specs);

        Ok(fp)
    }

    /// Key outline: `size` pitches wide, one pitch high.
    fn add_borders(&self, fp: &mut Footprint, size: f64) {
        let width = size * self.spacing;
        let height = self.spacing;
        self.add_box(fp, width, height, LAYER_DWGS_USER);
    }

    fn add_cutouts(&self, fp: &mut Footprint, specs: &[&SwitchSpec]) {
        for spec in specs {
            let (width, height) = spec.cutout_size;
            self.add_box(fp, width, height, LAYER_CMTS_USER);
        }
    }

    /// Four lines of a rectangle centred on the origin.
    fn add_box(&self, fp: &mut Footprint, width: f64, height: f64, layer: &str) {
        let top_left = [-width / 2.0, -height / 2.0];
        let top_right = [width / 2.0, -height / 2.0];
        let bottom_left = [-width / 2.0, height / 2.0];
        let bottom_right = [width / 2.0, height / 2.0];
        for (start, end) in [
            (top_left, top_right),
            (top_left, bottom_left),
            (top_right, bottom_right),
            (bottom_left, bottom_right),
        ] {
            self.add_line(fp, start, end, layer);
        }
    }

    fn add_line(&self, fp: &mut Footprint, start: Point, end: Point, layer: &str) {
        fp.drawings.push(Drawing::Line {
            start,
            end,
            width: self.line_width,
            layer: layer.to_string(),
        });
    }

    /// Pins 1 and 2. A hotswap socket gets unplated pin holes instead of
    /// pads; two plated switch types share one slot per pin.
    fn add_switch_pads(&self, fp: &mut Footprint, specs: &[&SwitchSpec]) {
        match specs {
            [spec] => match spec.hotswap {
                Some(hs) => {
                    for &at in spec.switch_pads {
                        fp.pads.push(Pad::npth(at, hs.pin_hole_size));
                    }
                }
                None => {
                    for (i, &at) in spec.switch_pads.iter().enumerate() {
                        fp.pads.push(Pad::tht(
                            i as u32 + 1,
                            PadShape::Circle,
                            at,
                            SWITCH_PAD_SIZE,
                            SWITCH_DRILL_SIZE,
                        ));
                    }
                }
            },
            [first, second] => {
                for (i, (&a, &b)) in first
                    .switch_pads
                    .iter()
                    .zip(second.switch_pads)
                    .enumerate()
                {
                    fp.pads.push(hybrid_pad(i as u32 + 1, a, b));
                }
            }
            _ => debug!(
                "{}: {} switch types, no switch pads placed",
                fp.name,
                specs.len()
            ),
        }
    }

    /// LED pads of the first switch type that has them, with polarity marks.
    fn add_led_pads(&self, fp: &mut Footprint, specs: &[&SwitchSpec]) {
        let Some(pads) = specs
            .iter()
            .map(|s| s.led_pads)
            .find(|p| p.len() == 2)
        else {
            debug!("{}: no LED pads in switch table, skipping", fp.name);
            return;
        };

        fp.pads.push(Pad::tht(3, PadShape::Circle, pads[0], LED_PAD_SIZE, LED_DRILL_SIZE));
        fp.pads.push(Pad::tht(4, PadShape::Rect, pads[1], LED_PAD_SIZE, LED_DRILL_SIZE));

        for layer in [LAYER_F_SILKS, LAYER_B_SILKS] {
            fp.texts
                .push(FpText::new(TextKind::User, "+", [pads[0][0], 3.5], layer));
            fp.texts
                .push(FpText::new(TextKind::User, "-", [pads[1][0], 3.5], layer));
        }
    }

    /// Centre post and support pegs, all unplated.
    fn add_support_holes(&self, fp: &mut Footprint, specs: &[&SwitchSpec]) {
        if let Some(diameter) = specs.iter().find_map(|s| s.center_hole) {
            fp.pads.push(Pad::npth([0.0, 0.0], diameter));
        }

        let mut placed: Vec<Point> = Vec::new();
        for spec in specs {
            let Some(holes) = spec.support_holes else {
                continue;
            };
            for &at in holes.locations {
                if placed.contains(&at) {
                    continue;
                }
                placed.push(at);
                fp.pads.push(Pad::npth(at, holes.size));
            }
        }
    }

    /// Plate-mount stabilizer holes for keys of 2u and wider.
    fn add_stabilizers(&self, fp: &mut Footprint, specs: &[&SwitchSpec], size: f64) {
        let Some(spacing) = stabilizer_spacing(size) else {
            return;
        };
        let Some(stab) = specs.iter().find_map(|s| s.stabilizers) else {
            debug!("{}: switch has no stabilizer pattern, skipping", fp.name);
            return;
        };
        for x in [-spacing / 2.0, spacing / 2.0] {
            let (top_y, top_d) = stab.top;
            let (bottom_y, bottom_d) = stab.bottom;
            fp.pads.push(Pad::npth([x, top_y], top_d));
            fp.pads.push(Pad::npth([x, bottom_y], bottom_d));
        }
    }

    /// Socket contact pads and the silkscreen outline of the socket body.
    fn add_hotswap_socket(&self, fp: &mut Footprint, specs: &[&SwitchSpec]) {
        let Some(hs) = specs.iter().find_map(|s| s.hotswap) else {
            return;
        };
        for (i, &at) in hs.pads.iter().enumerate() {
            fp.pads.push(Pad::smd_back(i as u32 + 1, at, hs.pad_size));
        }
        for pair in hs.outline.windows(2) {
            self.add_line(fp, pair[0], pair[1], LAYER_B_SILKS);
        }
    }
}

/// One plated oval pad whose slot runs from `a` to `b`.
fn hybrid_pad(number: u32, a: Point, b: Point) -> Pad {
    let oval = OvalPad::between(a, b, SWITCH_PAD_SIZE, SWITCH_DRILL_SIZE);
    debug!(
        "hybrid pad {number}: {:?} -> {:?}, angle {:.3}, length {:.4}",
        a,
        b,
        oval.angle,
        oval.length()
    );
    Pad {
        number: number.to_string(),
        pad_type: PadType::Tht,
        shape: PadShape::Oval,
        at: oval.at,
        angle: oval.angle,
        size: oval.size,
        drill: Some(Drill::Oval { size: oval.drill }),
        offset: Some(oval.offset),
        layers: owned_layers(LAYERS_THT),
    }
}

fn resolve_specs(config: &Configuration) -> Result<Vec<&'static SwitchSpec>, MakerError> {
    let specs: Vec<&'static SwitchSpec> = config.types.iter().map(|t| t.spec()).collect();
    match specs.as_slice() {
        [] => Err(MakerError::UnsupportedCombination(
            "no switch type given".to_string(),
        )),
        [_] => Ok(specs),
        [a, b] if a.has_plated_pins() && b.has_plated_pins() && a.name != b.name => Ok(specs),
        _ => Err(MakerError::UnsupportedCombination(config.type_name())),
    }
}
