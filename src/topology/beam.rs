//! Beam lattice: line-segment struts layered on the mesh's node store.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::{Element, MeshError, MeshResult};

/// How a beam end is closed off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapMode {
    #[default]
    Sphere,
    Hemisphere,
    Butt,
}

/// Lattice-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BeamLatticeAttributes {
    /// Radius used by beams that do not specify their own.
    pub default_radius: f64,
    /// Beams shorter than this are considered collapsed by consumers.
    pub min_length: f64,
    /// Cap used by beams that do not specify their own.
    pub cap_mode: CapMode,
}

impl Default for BeamLatticeAttributes {
    fn default() -> Self {
        Self {
            default_radius: 1.0,
            min_length: 0.0001,
            cap_mode: CapMode::Sphere,
        }
    }
}

/// Per-end radius and cap of a beam.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BeamProfile {
    pub radius: [f64; 2],
    pub cap_mode: [CapMode; 2],
}

impl BeamProfile {
    /// Same radius and cap at both ends.
    pub fn uniform(radius: f64, cap_mode: CapMode) -> Self {
        Self {
            radius: [radius; 2],
            cap_mode: [cap_mode; 2],
        }
    }
}

/// A strut between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Beam {
    pub index: u32,
    pub node_indices: [u32; 2],
    pub radius: [f64; 2],
    pub cap_mode: [CapMode; 2],
}

/// Named group of beams, referenced by beam index.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BeamSet {
    pub name: String,
    pub identifier: String,
    pub refs: Vec<u32>,
}

/// Check a candidate beam against a node count.
pub fn validate_beam(nodes: [u32; 2], node_count: u32) -> MeshResult<()> {
    let [a, b] = nodes;
    if a == b {
        return Err(MeshError::DegenerateBeam(a));
    }
    if let Some(&index) = nodes.iter().find(|&&i| i >= node_count) {
        return Err(MeshError::InvalidReference {
            element: Element::Node,
            index,
            count: node_count,
        });
    }
    Ok(())
}

/// Beams, beam sets and the lattice attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeamLattice {
    beams: Vec<Beam>,
    beam_sets: Vec<BeamSet>,
    attributes: BeamLatticeAttributes,
}

impl BeamLattice {
    /// Empty lattice with the given attributes.
    pub fn with_attributes(attributes: BeamLatticeAttributes) -> Self {
        Self {
            attributes,
            ..Default::default()
        }
    }

    pub fn attributes(&self) -> &BeamLatticeAttributes {
        &self.attributes
    }

    pub fn set_attributes(&mut self, attributes: BeamLatticeAttributes) {
        self.attributes = attributes;
    }

    /// Profile derived from the lattice defaults.
    pub fn default_profile(&self) -> BeamProfile {
        BeamProfile::uniform(self.attributes.default_radius, self.attributes.cap_mode)
    }

    /// Append a validated beam, refusing to exceed `max` beams.
    pub fn add(
        &mut self,
        nodes: [u32; 2],
        profile: BeamProfile,
        node_count: u32,
        max: u32,
    ) -> MeshResult<Beam> {
        validate_beam(nodes, node_count)?;
        let index = self.count();
        if index >= max {
            return Err(MeshError::CapacityExceeded {
                element: Element::Beam,
                requested: u64::from(index) + 1,
                max,
            });
        }
        let beam = Beam {
            index,
            node_indices: nodes,
            radius: profile.radius,
            cap_mode: profile.cap_mode,
        };
        self.beams.push(beam);
        Ok(beam)
    }

    /// Append a beam set whose references must all name existing beams.
    pub fn add_beam_set(&mut self, set: BeamSet) -> MeshResult<&BeamSet> {
        let count = self.count();
        if let Some(&index) = set.refs.iter().find(|&&r| r >= count) {
            return Err(MeshError::InvalidReference {
                element: Element::Beam,
                index,
                count,
            });
        }
        self.beam_sets.push(set);
        let last = self.beam_sets.len() - 1;
        Ok(&self.beam_sets[last])
    }

    /// Append copies of `beams`, renumbered after the existing ones, with
    /// node indices shifted by `node_offset`.
    ///
    /// Beam sets are not carried over: their names belong to the source object.
    pub(crate) fn extend_offset(&mut self, beams: &[Beam], node_offset: u32) {
        let base = self.count();
        self.beams.reserve(beams.len());
        self.beams
            .extend(beams.iter().enumerate().map(|(i, b)| Beam {
                index: base + i as u32,
                node_indices: b.node_indices.map(|n| n + node_offset),
                ..*b
            }));
    }

    #[inline]
    pub fn get(&self, index: u32) -> Option<&Beam> {
        self.beams.get(index as usize)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.beams.len() as u32
    }

    #[inline]
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    #[inline]
    pub fn beam_sets(&self) -> &[BeamSet] {
        &self.beam_sets
    }

    /// Drop all beams and beam sets; attributes are kept.
    pub fn clear(&mut self) {
        self.beams.clear();
        self.beam_sets.clear();
    }
}

impl DebugInvariants for BeamLattice {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (i, beam) in self.beams.iter().enumerate() {
            if beam.index as usize != i {
                return Err(MeshError::InvalidReference {
                    element: Element::Beam,
                    index: beam.index,
                    count: self.count(),
                });
            }
            let [a, b] = beam.node_indices;
            if a == b {
                return Err(MeshError::DegenerateBeam(a));
            }
        }
        let count = self.count();
        for set in &self.beam_sets {
            if let Some(&index) = set.refs.iter().find(|&&r| r >= count) {
                return Err(MeshError::InvalidReference {
                    element: Element::Beam,
                    index,
                    count,
                });
            }
        }
        Ok(())
    }
}
