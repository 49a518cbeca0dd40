use crate::error::MakerError;
use crate::kicad::sexpr::{self, SExpr};
use crate::types::*;

/// Parse a `.kicad_mod` file from bytes back into a `Footprint`.
///
/// Both the current `footprint` root and the legacy `module` root are
/// accepted. Items this crate never writes (arcs, circles, polygons) are
/// ignored.
pub fn parse(data: &[u8]) -> Result<Footprint, MakerError> {
    let root = sexpr::parse(data)
        .map_err(|e| MakerError::ParseError(format!("S-expression parse error: {e}")))?;

    match root.tag() {
        Some("footprint") | Some("module") => {}
        _ => return Err(MakerError::ParseError("not a footprint file".to_string())),
    }

    let name = root
        .atom_at(0)
        .ok_or_else(|| MakerError::ParseError("footprint has no name".to_string()))?;

    let mut fp = Footprint::new(name);
    fp.description = root.value("descr").unwrap_or("").to_string();
    fp.tags = root
        .value("tags")
        .map(|t| t.split_whitespace().map(|s| s.to_string()).collect())
        .unwrap_or_default();
    fp.attr = root.value("attr").map(|s| s.to_string());

    fp.texts = root
        .find_all("fp_text")
        .into_iter()
        .filter_map(parse_fp_text)
        .collect();
    fp.drawings = root
        .find_all("fp_line")
        .into_iter()
        .filter_map(parse_fp_line)
        .collect();
    fp.pads = root
        .find_all("pad")
        .into_iter()
        .map(parse_pad)
        .collect::<Result<_, _>>()?;

    Ok(fp)
}

fn get_layer_name(node: &SExpr) -> String {
    node.value("layer").unwrap_or("").to_string()
}

fn parse_xy(node: &SExpr, tag: &str) -> Option<[f64; 2]> {
    let n = node.find(tag)?;
    Some([n.f64_at(0)?, n.f64_at(1)?])
}

fn parse_fp_text(node: &SExpr) -> Option<FpText> {
    let kind = TextKind::from_kicad(node.atom_at(0)?)?;
    let text = node.atom_at(1).unwrap_or("");
    let at = parse_xy(node, "at").unwrap_or([0.0, 0.0]);
    Some(FpText::new(kind, text, at, &get_layer_name(node)))
}

fn parse_fp_line(node: &SExpr) -> Option<Drawing> {
    let start = parse_xy(node, "start")?;
    let end = parse_xy(node, "end")?;
    // KiCad 7 moved the width into (stroke (width ..)).
    let width = node
        .value("width")
        .or_else(|| node.find("stroke").and_then(|s| s.value("width")))
        .and_then(|w| w.parse().ok())
        .unwrap_or(0.0);
    Some(Drawing::Line {
        start,
        end,
        width,
        layer: get_layer_name(node),
    })
}

fn parse_pad(node: &SExpr) -> Result<Pad, MakerError> {
    let number = node.atom_at(0).unwrap_or("").to_string();
    let type_str = node.atom_at(1).unwrap_or("");
    let shape_str = node.atom_at(2).unwrap_or("");

    let pad_type = PadType::from_kicad(type_str)
        .ok_or_else(|| MakerError::ParseError(format!("pad {number}: unknown type '{type_str}'")))?;
    let shape = PadShape::from_kicad(shape_str).ok_or_else(|| {
        MakerError::ParseError(format!("pad {number}: unsupported shape '{shape_str}'"))
    })?;

    let at_node = node.find("at");
    let at = [
        at_node.and_then(|n| n.f64_at(0)).unwrap_or(0.0),
        at_node.and_then(|n| n.f64_at(1)).unwrap_or(0.0),
    ];
    let angle = at_node.and_then(|n| n.f64_at(2)).unwrap_or(0.0);
    let size = parse_xy(node, "size").unwrap_or([0.0, 0.0]);

    let (drill, offset) = match node.find("drill") {
        Some(d) => {
            let offset = parse_xy(d, "offset");
            let drill = if d.atom_at(0) == Some("oval") {
                let w = d.f64_at(1).unwrap_or(0.0);
                let h = d.f64_at(2).unwrap_or(w);
                Drill::Oval { size: [w, h] }
            } else {
                Drill::Round {
                    diameter: d.f64_at(0).unwrap_or(0.0),
                }
            };
            (Some(drill), offset)
        }
        None => (None, None),
    };

    let layers = node
        .find("layers")
        .map(|l| {
            l.children()
                .iter()
                .filter_map(|c| c.as_atom())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    Ok(Pad {
        number,
        pad_type,
        shape,
        at,
        angle,
        size,
        drill,
        offset,
        layers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const LEGACY: &str = r#"(module MX-Alps-1u (layer F.Cu) (tedit 5A0B5E5B)
  (descr "MX/Alps footprint")
  (fp_text reference REF** (at 0 7.9375) (layer Dwgs.User)
    (effects (font (size 1 1) (thickness 0.15)))
  )
  (fp_text value 1u (at 0 -7.9375) (layer Dwgs.User)
    (effects (font (size 1 1) (thickness 0.15)))
  )
  (fp_line (start -9.525 -9.525) (end 9.525 -9.525) (layer Dwgs.User) (width 0.15))
  (pad 1 thru_hole circle (at -3.81 -2.54) (size 2.25 2.25) (drill 1.47) (layers *.Cu *.Mask))
  (pad "" np_thru_hole circle (at 0 0) (size 3.9878 3.9878) (drill 3.9878) (layers *.Cu *.Mask))
)"#;

    #[test]
    fn test_parse_legacy_module() {
        let fp = parse(LEGACY.as_bytes()).unwrap();
        assert_eq!(fp.name, "MX-Alps-1u");
        assert_eq!(fp.description, "MX/Alps footprint");
        assert_eq!(fp.texts.len(), 2);
        assert_eq!(fp.texts[1].kind, TextKind::Value);
        assert_eq!(fp.texts[1].text, "1u");
        assert_eq!(fp.drawings.len(), 1);
        assert_eq!(fp.pads.len(), 2);

        let pad = &fp.pads[0];
        assert_eq!(pad.number, "1");
        assert_eq!(pad.pad_type, PadType::Tht);
        assert_eq!(pad.shape, PadShape::Circle);
        assert_eq!(pad.drill, Some(Drill::Round { diameter: 1.47 }));
        assert_eq!(pad.layers, vec!["*.Cu", "*.Mask"]);
        assert_eq!(fp.pads[1].pad_type, PadType::Npth);
    }

    #[test]
    fn test_parse_oval_drill_with_offset() {
        let text = r#"(footprint "x" (pad "2" thru_hole oval (at 2.54 -5.08 -86.05) (size 2.25 2.83) (drill oval 1.47 2.05 (offset 0 -0.29)) (layers "*.Cu" "*.Mask")))"#;
        let fp = parse(text.as_bytes()).unwrap();
        let pad = &fp.pads[0];
        assert_eq!(pad.shape, PadShape::Oval);
        assert_abs_diff_eq!(pad.angle, -86.05);
        assert_eq!(pad.drill, Some(Drill::Oval { size: [1.47, 2.05] }));
        assert_eq!(pad.offset, Some([0.0, -0.29]));
    }

    #[test]
    fn test_parse_stroke_width() {
        let text = r#"(footprint "x" (fp_line (start 0 0) (end 1 0) (stroke (width 0.12) (type solid)) (layer "F.SilkS")))"#;
        let fp = parse(text.as_bytes()).unwrap();
        match &fp.drawings[0] {
            Drawing::Line { width, layer, .. } => {
                assert_eq!(*width, 0.12);
                assert_eq!(layer, "F.SilkS");
            }
        }
    }

    #[test]
    fn test_interleaved_items_keep_their_order() {
        let text = r#"(footprint "x"
  (pad "2" thru_hole circle (at 1 0) (size 2 2) (drill 1) (layers "*.Cu"))
  (fp_line (start 0 0) (end 1 0) (layer "Dwgs.User") (width 0.15))
  (fp_text user "+" (at 0 3.5) (layer "F.SilkS"))
  (pad "1" thru_hole circle (at -1 0) (size 2 2) (drill 1) (layers "*.Cu"))
  (fp_arc (start 0 0) (end 1 1) (angle 90) (layer "F.SilkS") (width 0.12))
)"#;
        let fp = parse(text.as_bytes()).unwrap();
        let numbers: Vec<&str> = fp.pads.iter().map(|p| p.number.as_str()).collect();
        assert_eq!(numbers, vec!["2", "1"]);
        assert_eq!(fp.drawings.len(), 1);
        assert_eq!(fp.texts.len(), 1);
        assert_eq!(fp.texts[0].kind, TextKind::User);
    }

    #[test]
    fn test_rejects_non_footprint() {
        assert!(matches!(
            parse(b"(kicad_pcb (version 4))"),
            Err(MakerError::ParseError(_))
        ));
        assert!(parse(b"").is_err());
    }

    #[test]
    fn test_rejects_unknown_pad_shape() {
        let text = r#"(footprint "x" (pad "1" smd trapezoid (at 0 0) (size 1 1) (layers "F.Cu")))"#;
        assert!(parse(text.as_bytes()).is_err());
    }
}
