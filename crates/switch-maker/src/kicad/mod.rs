//! KiCad footprint (`.kicad_mod`) output.

pub mod reader;
pub mod sexpr;

use crate::error::MakerError;
use crate::types::*;
use sexpr::SExpr;
use std::path::{Path, PathBuf};

/// Footprint file format version written in the header.
pub const FORMAT_VERSION: &str = "20211014";
pub const GENERATOR: &str = "switch_maker";

const TEXT_SIZE: f64 = 1.0;
const TEXT_THICKNESS: f64 = 0.15;

/// Build the S-expression tree of a footprint.
pub fn to_sexpr(fp: &Footprint) -> SExpr {
    let mut items = vec![
        SExpr::string(fp.name.as_str()),
        SExpr::list("version", [SExpr::atom(FORMAT_VERSION)]),
        SExpr::list("generator", [SExpr::atom(GENERATOR)]),
        SExpr::list("layer", [SExpr::string("F.Cu")]),
    ];
    if !fp.description.is_empty() {
        items.push(SExpr::list("descr", [SExpr::string(fp.description.as_str())]));
    }
    if !fp.tags.is_empty() {
        items.push(SExpr::list("tags", [SExpr::string(fp.tags.join(" "))]));
    }
    if let Some(attr) = &fp.attr {
        items.push(SExpr::list("attr", [SExpr::atom(attr.as_str())]));
    }
    items.extend(fp.texts.iter().map(text_to_sexpr));
    items.extend(fp.drawings.iter().map(drawing_to_sexpr));
    items.extend(fp.pads.iter().map(pad_to_sexpr));
    SExpr::list("footprint", items)
}

fn xy(tag: &str, p: [f64; 2]) -> SExpr {
    SExpr::list(tag, [SExpr::num(p[0]), SExpr::num(p[1])])
}

fn layer(name: &str) -> SExpr {
    SExpr::list("layer", [SExpr::string(name)])
}

fn text_to_sexpr(text: &FpText) -> SExpr {
    SExpr::list(
        "fp_text",
        [
            SExpr::atom(text.kind.as_str()),
            SExpr::string(text.text.as_str()),
            xy("at", text.at),
            layer(&text.layer),
            SExpr::list(
                "effects",
                [SExpr::list(
                    "font",
                    [
                        xy("size", [TEXT_SIZE, TEXT_SIZE]),
                        SExpr::list("thickness", [SExpr::num(TEXT_THICKNESS)]),
                    ],
                )],
            ),
        ],
    )
}

fn drawing_to_sexpr(drawing: &Drawing) -> SExpr {
    match drawing {
        Drawing::Line {
            start,
            end,
            width,
            layer: layer_name,
        } => SExpr::list(
            "fp_line",
            [
                xy("start", *start),
                xy("end", *end),
                layer(layer_name),
                SExpr::list("width", [SExpr::num(*width)]),
            ],
        ),
    }
}

fn pad_to_sexpr(pad: &Pad) -> SExpr {
    let mut at = vec![SExpr::num(pad.at[0]), SExpr::num(pad.at[1])];
    if pad.angle != 0.0 {
        at.push(SExpr::num(pad.angle));
    }

    let mut items = vec![
        SExpr::string(pad.number.as_str()),
        SExpr::atom(pad.pad_type.as_kicad()),
        SExpr::atom(pad.shape.as_kicad()),
        SExpr::list("at", at),
        xy("size", pad.size),
    ];

    if let Some(drill) = pad.drill {
        let mut drill_items = match drill {
            Drill::Round { diameter } => vec![SExpr::num(diameter)],
            Drill::Oval { size } => vec![
                SExpr::atom("oval"),
                SExpr::num(size[0]),
                SExpr::num(size[1]),
            ],
        };
        if let Some(offset) = pad.offset {
            drill_items.push(xy("offset", offset));
        }
        items.push(SExpr::list("drill", drill_items));
    }

    items.push(SExpr::list(
        "layers",
        pad.layers.iter().map(|l| SExpr::string(l.as_str())),
    ));
    SExpr::list("pad", items)
}

/// Render a footprint as `.kicad_mod` text.
pub fn render(fp: &Footprint) -> String {
    to_sexpr(fp).to_pretty()
}

/// Write `<dir>/<file_name>` and return its path.
pub fn write_footprint(fp: &Footprint, dir: &Path, file_name: &str) -> Result<PathBuf, MakerError> {
    let path = dir.join(file_name);
    std::fs::write(&path, render(fp))?;
    Ok(path)
}
