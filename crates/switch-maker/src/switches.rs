//! Switch dimension tables.
//!
//! All values are millimetres in the footprint frame (y down), relative to
//! the switch centre. A feature a switch family does not have is `None` or
//! an empty slice and is skipped when the footprint is built.

use crate::error::MakerError;
use crate::geometry::Point;
use std::fmt;
use std::str::FromStr;

/// Centre-to-centre distance of two neighbouring 1u keys.
pub const SWITCH_SPACING: f64 = 19.05;

/// Copper diameter of a switch pin pad.
pub const SWITCH_PAD_SIZE: f64 = 2.25;
/// Drill of a switch pin pad.
pub const SWITCH_DRILL_SIZE: f64 = 1.47;

pub const LED_PAD_SIZE: f64 = 1.905;
pub const LED_DRILL_SIZE: f64 = 0.9906;

/// Distance of the reference and value texts from the switch centre.
pub const ANNOTATION_OFFSET: f64 = 7.9375;

/// A family of key switches with its own hole pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchType {
    Mx,
    Alps,
    Choc,
    MxHotswap,
}

impl SwitchType {
    pub const ALL: [SwitchType; 4] = [
        SwitchType::Mx,
        SwitchType::Alps,
        SwitchType::Choc,
        SwitchType::MxHotswap,
    ];

    /// Name used in footprint and file names.
    pub fn name(&self) -> &'static str {
        match self {
            SwitchType::Mx => "MX",
            SwitchType::Alps => "Alps",
            SwitchType::Choc => "Choc",
            SwitchType::MxHotswap => "MX-Hotswap",
        }
    }

    pub fn spec(&self) -> &'static SwitchSpec {
        match self {
            SwitchType::Mx => &MX,
            SwitchType::Alps => &ALPS,
            SwitchType::Choc => &CHOC,
            SwitchType::MxHotswap => &MX_HOTSWAP,
        }
    }
}

impl fmt::Display for SwitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SwitchType {
    type Err = MakerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mx" => Ok(SwitchType::Mx),
            "alps" => Ok(SwitchType::Alps),
            "choc" => Ok(SwitchType::Choc),
            "mx-hotswap" | "mx_hotswap" | "hotswap" => Ok(SwitchType::MxHotswap),
            _ => Err(MakerError::UnknownSwitchType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SupportHoles {
    pub locations: &'static [Point],
    pub size: f64,
}

/// Plate-mounted stabilizer hole pattern, mirrored about the switch centre.
#[derive(Debug, Clone, Copy)]
pub struct StabilizerSpec {
    /// Wire-side hole, `(y, diameter)`.
    pub top: (f64, f64),
    /// Housing-side hole, `(y, diameter)`.
    pub bottom: (f64, f64),
}

/// Kailh hotswap socket soldered to the back of the board.
#[derive(Debug, Clone, Copy)]
pub struct HotswapSpec {
    /// Socket contact pads, numbered from 1.
    pub pads: &'static [Point],
    pub pad_size: [f64; 2],
    /// Diameter of the unplated holes the switch pins drop into.
    pub pin_hole_size: f64,
    /// Closed silkscreen outline of the socket body.
    pub outline: &'static [Point],
}

#[derive(Debug, Clone, Copy)]
pub struct SwitchSpec {
    pub name: &'static str,
    /// Electrical pins 1 and 2.
    pub switch_pads: &'static [Point],
    pub center_hole: Option<f64>,
    pub support_holes: Option<SupportHoles>,
    pub led_pads: &'static [Point],
    /// Plate cutout as `(width, height)`.
    pub cutout_size: (f64, f64),
    pub stabilizers: Option<StabilizerSpec>,
    pub hotswap: Option<HotswapSpec>,
}

impl SwitchSpec {
    /// Whether the pins are plated pads that can be merged into a slot.
    pub fn has_plated_pins(&self) -> bool {
        self.hotswap.is_none() && self.switch_pads.len() == 2
    }
}

const CHERRY_STABILIZER: StabilizerSpec = StabilizerSpec {
    top: (-6.985, 3.048),
    bottom: (8.255, 3.9878),
};

const MX_PADS: &[Point] = &[[-3.81, -2.54], [2.54, -5.08]];
const MX_SUPPORT: SupportHoles = SupportHoles {
    locations: &[[-5.08, 0.0], [5.08, 0.0]],
    size: 1.8,
};
const MX_LED_PADS: &[Point] = &[[-1.27, 5.08], [1.27, 5.08]];

pub static MX: SwitchSpec = SwitchSpec {
    name: "MX",
    switch_pads: MX_PADS,
    center_hole: Some(3.9878),
    support_holes: Some(MX_SUPPORT),
    led_pads: MX_LED_PADS,
    cutout_size: (14.0, 14.0),
    stabilizers: Some(CHERRY_STABILIZER),
    hotswap: None,
};

pub static ALPS: SwitchSpec = SwitchSpec {
    name: "Alps",
    switch_pads: &[[-2.5, -4.0], [2.5, -4.5]],
    center_hole: None,
    support_holes: None,
    led_pads: &[],
    cutout_size: (15.5, 12.8),
    stabilizers: Some(CHERRY_STABILIZER),
    hotswap: None,
};

pub static CHOC: SwitchSpec = SwitchSpec {
    name: "Choc",
    switch_pads: &[[0.0, -5.9], [5.0, -3.8]],
    center_hole: Some(3.429),
    support_holes: Some(SupportHoles {
        locations: &[[-5.5, 0.0], [5.5, 0.0]],
        size: 1.9,
    }),
    led_pads: &[],
    cutout_size: (14.0, 14.0),
    stabilizers: None,
    hotswap: None,
};

pub static MX_HOTSWAP: SwitchSpec = SwitchSpec {
    name: "MX-Hotswap",
    switch_pads: MX_PADS,
    center_hole: Some(3.9878),
    support_holes: Some(MX_SUPPORT),
    led_pads: MX_LED_PADS,
    cutout_size: (14.0, 14.0),
    stabilizers: Some(CHERRY_STABILIZER),
    hotswap: Some(HotswapSpec {
        pads: &[[-7.085, -2.54], [5.842, -5.08]],
        pad_size: [2.55, 2.5],
        pin_hole_size: 3.0,
        outline: &[
            [-6.0, -4.8],
            [-6.0, -0.8],
            [-2.5, -0.8],
            [-0.5, -2.8],
            [4.8, -2.8],
            [4.8, -6.8],
            [-4.0, -6.8],
            [-6.0, -4.8],
        ],
    }),
};

/// Stabilizer centre-to-centre spacing for a keycap size, `None` below 2u.
pub fn stabilizer_spacing(size: f64) -> Option<f64> {
    const TABLE: &[(f64, f64)] = &[
        (2.0, 23.876),
        (2.25, 23.876),
        (2.5, 23.876),
        (2.75, 23.876),
        (3.0, 38.1),
        (6.0, 95.25),
        (6.25, 100.0),
        (7.0, 114.3),
    ];
    TABLE
        .iter()
        .find(|(s, _)| (s - size).abs() < 1e-9)
        .map(|(_, spacing)| *spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("MX".parse::<SwitchType>().unwrap(), SwitchType::Mx);
        assert_eq!("alps".parse::<SwitchType>().unwrap(), SwitchType::Alps);
        assert_eq!("Choc".parse::<SwitchType>().unwrap(), SwitchType::Choc);
        assert_eq!(
            "mx-hotswap".parse::<SwitchType>().unwrap(),
            SwitchType::MxHotswap
        );
        let err = "cherry".parse::<SwitchType>().unwrap_err();
        assert!(matches!(err, MakerError::UnknownSwitchType(ref s) if s == "cherry"));
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for ty in SwitchType::ALL {
            assert_eq!(ty.name().parse::<SwitchType>().unwrap(), ty);
            assert_eq!(ty.spec().name, ty.name());
        }
    }

    #[test]
    fn test_table_shape() {
        for ty in SwitchType::ALL {
            let spec = ty.spec();
            assert_eq!(spec.switch_pads.len(), 2, "{} pins", ty);
            assert!(spec.led_pads.is_empty() || spec.led_pads.len() == 2);
            if let Some(hs) = spec.hotswap {
                assert_eq!(hs.pads.len(), spec.switch_pads.len());
                assert_eq!(hs.outline.first(), hs.outline.last());
            }
        }
    }

    #[test]
    fn test_plated_pins() {
        assert!(MX.has_plated_pins());
        assert!(ALPS.has_plated_pins());
        assert!(!MX_HOTSWAP.has_plated_pins());
    }

    #[test]
    fn test_choc_and_socket_dimensions() {
        assert_eq!(CHOC.switch_pads, &[[0.0, -5.9], [5.0, -3.8]]);
        assert_eq!(CHOC.center_hole, Some(3.429));
        let pegs = CHOC.support_holes.unwrap();
        assert_eq!(pegs.locations, &[[-5.5, 0.0], [5.5, 0.0]]);
        assert_eq!(pegs.size, 1.9);

        let socket = MX_HOTSWAP.hotswap.unwrap();
        assert_eq!(socket.pin_hole_size, 3.0);
        assert_eq!(socket.pad_size, [2.55, 2.5]);
        assert_eq!(socket.pads, &[[-7.085, -2.54], [5.842, -5.08]]);
        assert_eq!(MX_HOTSWAP.switch_pads, MX.switch_pads);
    }

    #[test]
    fn test_stabilizer_spacing() {
        assert_eq!(stabilizer_spacing(1.0), None);
        assert_eq!(stabilizer_spacing(1.75), None);
        assert_eq!(stabilizer_spacing(2.0), Some(23.876));
        assert_eq!(stabilizer_spacing(6.25), Some(100.0));
        assert_eq!(stabilizer_spacing(5.5), None);
    }
}
