// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Body identity and the shared position/velocity result type.

/// A solar-system body (or computed point), with a stable integer id
/// matching the external convention used by the binary ephemeris files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Body {
    Sun = 0,
    Moon = 1,
    Mercury = 2,
    Venus = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
    MeanNode = 10,
    TrueNode = 11,
    Earth = 13,
}

impl Body {
    /// The body's external integer id.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Sun through Saturn, excluding Earth: the classical planets.
    pub fn is_classical(self) -> bool {
        matches!(
            self,
            Body::Sun
                | Body::Moon
                | Body::Mercury
                | Body::Venus
                | Body::Mars
                | Body::Jupiter
                | Body::Saturn
        )
    }

    /// Uranus, Neptune, Pluto: the modern (telescopic) planets.
    pub fn is_modern(self) -> bool {
        matches!(self, Body::Uranus | Body::Neptune | Body::Pluto)
    }

    /// Mean or true lunar node.
    pub fn is_node(self) -> bool {
        matches!(self, Body::MeanNode | Body::TrueNode)
    }
}

/// The frame in which a [`BodyPosition`]'s vectors are expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceFrame {
    Icrf,
    J2000,
    MeanOfDate,
    TrueOfDate,
    Ecliptic,
}

/// The origin from which a [`BodyPosition`]'s vectors are measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateType {
    Barycentric,
    Heliocentric,
    Geocentric,
    Topocentric,
}

/// The position (and, optionally, velocity) of a [`Body`] at an instant,
/// in AU and AU/day, expressed in a named frame and coordinate origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPosition {
    pub body: Body,
    pub jd_tt: f64,
    pub position: [f64; 3],
    pub velocity: Option<[f64; 3]>,
    pub reference_frame: ReferenceFrame,
    pub coordinate_type: CoordinateType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_external_convention() {
        assert_eq!(Body::Sun.id(), 0);
        assert_eq!(Body::Moon.id(), 1);
        assert_eq!(Body::Pluto.id(), 9);
        assert_eq!(Body::MeanNode.id(), 10);
        assert_eq!(Body::TrueNode.id(), 11);
        assert_eq!(Body::Earth.id(), 13);
    }

    #[test]
    fn classical_excludes_earth() {
        assert!(!Body::Earth.is_classical());
        assert!(Body::Mars.is_classical());
    }
}
