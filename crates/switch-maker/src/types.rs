use crate::geometry::Point;
use serde::{Serialize, Serializer};

/// Round a float to N decimal places.
pub fn round_f64(v: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let rounded = (v * factor).round() / factor;
    // Avoid emitting "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Wrapper that rounds f64 to 6 decimal places on serialization.
fn serialize_f64_rounded<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round_f64(*v, 6))
}

fn serialize_point<S: Serializer>(p: &[f64; 2], s: S) -> Result<S::Ok, S::Error> {
    let rounded = [round_f64(p[0], 6), round_f64(p[1], 6)];
    rounded.serialize(s)
}

fn serialize_opt_point<S: Serializer>(p: &Option<[f64; 2]>, s: S) -> Result<S::Ok, S::Error> {
    match p {
        Some(pt) => {
            let rounded = [round_f64(pt[0], 6), round_f64(pt[1], 6)];
            s.serialize_some(&rounded)
        }
        None => s.serialize_none(),
    }
}

// ─── Layers ──────────────────────────────────────────────────────────

pub const LAYER_DWGS_USER: &str = "Dwgs.User";
pub const LAYER_CMTS_USER: &str = "Cmts.User";
pub const LAYER_F_SILKS: &str = "F.SilkS";
pub const LAYER_B_SILKS: &str = "B.SilkS";

/// Copper and mask layers of a through-hole pad.
pub const LAYERS_THT: &[&str] = &["*.Cu", "*.Mask"];
/// Layers of a non-plated hole.
pub const LAYERS_NPTH: &[&str] = &["*.Cu", "*.Mask"];
/// Layers of a surface-mount pad on the back of the board.
pub const LAYERS_SMD_BACK: &[&str] = &["B.Cu", "B.Paste", "B.Mask"];

// ─── Footprint ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Footprint {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    pub texts: Vec<FpText>,
    pub drawings: Vec<Drawing>,
    pub pads: Vec<Pad>,
}

impl Footprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            attr: None,
            texts: Vec::new(),
            drawings: Vec::new(),
            pads: Vec::new(),
        }
    }

    /// Bounding box of the drawings on one layer, `None` if the layer is empty.
    pub fn layer_bbox(&self, layer: &str) -> Option<BBox> {
        let mut bbox = BBox::empty();
        for drawing in self.drawings.iter().filter(|d| d.layer() == layer) {
            match drawing {
                Drawing::Line { start, end, .. } => {
                    bbox.expand_point(start[0], start[1]);
                    bbox.expand_point(end[0], end[1]);
                }
            }
        }
        if bbox.minx == f64::INFINITY {
            None
        } else {
            Some(bbox)
        }
    }

    pub fn pads_of_type(&self, pad_type: PadType) -> impl Iterator<Item = &Pad> {
        self.pads.iter().filter(move |p| p.pad_type == pad_type)
    }
}

// ─── Bounding Box ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BBox {
    pub fn empty() -> Self {
        Self {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: f64::NEG_INFINITY,
            maxy: f64::NEG_INFINITY,
        }
    }

    pub fn expand_point(&mut self, x: f64, y: f64) {
        self.minx = self.minx.min(x);
        self.miny = self.miny.min(y);
        self.maxx = self.maxx.max(x);
        self.maxy = self.maxy.max(y);
    }

    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
}

// ─── Text ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Reference,
    Value,
    User,
}

impl TextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextKind::Reference => "reference",
            TextKind::Value => "value",
            TextKind::User => "user",
        }
    }

    pub fn from_kicad(s: &str) -> Option<Self> {
        match s {
            "reference" => Some(TextKind::Reference),
            "value" => Some(TextKind::Value),
            "user" => Some(TextKind::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FpText {
    pub kind: TextKind,
    pub text: String,
    #[serde(serialize_with = "serialize_point")]
    pub at: Point,
    pub layer: String,
}

impl FpText {
    pub fn new(kind: TextKind, text: impl Into<String>, at: Point, layer: &str) -> Self {
        Self {
            kind,
            text: text.into(),
            at,
            layer: layer.to_string(),
        }
    }
}

// ─── Drawing types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Drawing {
    Line {
        #[serde(serialize_with = "serialize_point")]
        start: Point,
        #[serde(serialize_with = "serialize_point")]
        end: Point,
        #[serde(serialize_with = "serialize_f64_rounded")]
        width: f64,
        layer: String,
    },
}

impl Drawing {
    pub fn layer(&self) -> &str {
        match self {
            Drawing::Line { layer, .. } => layer,
        }
    }
}

// ─── Pad ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PadType {
    Tht,
    Npth,
    Smd,
}

impl PadType {
    pub fn as_kicad(&self) -> &'static str {
        match self {
            PadType::Tht => "thru_hole",
            PadType::Npth => "np_thru_hole",
            PadType::Smd => "smd",
        }
    }

    pub fn from_kicad(s: &str) -> Option<Self> {
        match s {
            "thru_hole" => Some(PadType::Tht),
            "np_thru_hole" => Some(PadType::Npth),
            "smd" => Some(PadType::Smd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PadShape {
    Circle,
    Rect,
    Oval,
}

impl PadShape {
    pub fn as_kicad(&self) -> &'static str {
        match self {
            PadShape::Circle => "circle",
            PadShape::Rect => "rect",
            PadShape::Oval => "oval",
        }
    }

    pub fn from_kicad(s: &str) -> Option<Self> {
        match s {
            "circle" => Some(PadShape::Circle),
            "rect" => Some(PadShape::Rect),
            "oval" => Some(PadShape::Oval),
            _ => None,
        }
    }
}

/// Drilled hole of a pad. A slot has differing width and length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Drill {
    Round {
        #[serde(serialize_with = "serialize_f64_rounded")]
        diameter: f64,
    },
    Oval {
        #[serde(serialize_with = "serialize_point")]
        size: [f64; 2],
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Pad {
    /// Pad number; empty for mechanical holes.
    pub number: String,
    pub pad_type: PadType,
    pub shape: PadShape,
    #[serde(serialize_with = "serialize_point")]
    pub at: Point,
    #[serde(serialize_with = "serialize_f64_rounded")]
    pub angle: f64,
    #[serde(serialize_with = "serialize_point")]
    pub size: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drill: Option<Drill>,
    #[serde(
        serialize_with = "serialize_opt_point",
        skip_serializing_if = "Option::is_none"
    )]
    pub offset: Option<Point>,
    pub layers: Vec<String>,
}

impl Pad {
    /// Plated through-hole pad with a round drill.
    pub fn tht(number: u32, shape: PadShape, at: Point, size: f64, drill: f64) -> Self {
        Self {
            number: number.to_string(),
            pad_type: PadType::Tht,
            shape,
            at,
            angle: 0.0,
            size: [size, size],
            drill: Some(Drill::Round { diameter: drill }),
            offset: None,
            layers: owned_layers(LAYERS_THT),
        }
    }

    /// Non-plated mounting hole, copper size equal to the drill.
    pub fn npth(at: Point, diameter: f64) -> Self {
        Self {
            number: String::new(),
            pad_type: PadType::Npth,
            shape: PadShape::Circle,
            at,
            angle: 0.0,
            size: [diameter, diameter],
            drill: Some(Drill::Round { diameter }),
            offset: None,
            layers: owned_layers(LAYERS_NPTH),
        }
    }

    /// Rectangular surface-mount pad on the back copper.
    pub fn smd_back(number: u32, at: Point, size: [f64; 2]) -> Self {
        Self {
            number: number.to_string(),
            pad_type: PadType::Smd,
            shape: PadShape::Rect,
            at,
            angle: 0.0,
            size,
            drill: None,
            offset: None,
            layers: owned_layers(LAYERS_SMD_BACK),
        }
    }
}

pub(crate) fn owned_layers(layers: &[&str]) -> Vec<String> {
    layers.iter().map(|l| l.to_string()).collect()
}
