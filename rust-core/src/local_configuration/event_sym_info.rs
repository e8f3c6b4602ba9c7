use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::lattice::integer_matrix::MatrixKey;
use crate::lattice::prim::Prim;
use crate::lattice::supercell::Supercell;
use crate::lattice::unitcellcoord::UnitCellCoord;
use crate::local_configuration::event_supercell_info::OccEventSupercellSymInfo;
use crate::occ_events::occ_event::OccEvent;
use crate::Result;

/// The orbit of a prototype event under the prim factor group.
///
/// Orbit members are the "equivalent events"; their order fixes the equivalent index
/// used in every [`Position`](crate::local_configuration::Position). Each member is
/// stored standardized and placed on its phenomenal cluster.
#[derive(Debug)]
pub struct OccEventPrimSymInfo {
    prim: Arc<Prim>,
    prototype_event: OccEvent,
    events: Vec<OccEvent>,
    phenomenal_clusters: Vec<Vec<UnitCellCoord>>,
    equivalent_generating_op_indices: Vec<usize>,
    lookup: HashMap<OccEvent, usize>,
}

impl OccEventPrimSymInfo {
    /// Generate the orbit of `prototype_event`.
    ///
    /// Without `equivalent_generating_op_indices`, the orbit is sorted by the normalized
    /// events and each member records the first factor group operation generating it.
    /// When op indices are given they fix the orbit order, and must generate each orbit
    /// member exactly once. When phenomenal clusters are also given, each member is
    /// translated onto its cluster.
    pub fn new(
        prim: Arc<Prim>,
        prototype_event: OccEvent,
        phenomenal_clusters: Option<Vec<Vec<UnitCellCoord>>>,
        equivalent_generating_op_indices: Option<Vec<usize>>,
    ) -> Result<Self> {
        prototype_event.validate(&prim)?;

        // Normalized orbit and the first operation generating each member
        let mut orbit: BTreeMap<OccEvent, usize> = BTreeMap::new();
        for (i, op) in prim.factor_group().iter().enumerate() {
            orbit
                .entry(prototype_event.copy_apply(op).prim_periodic_normalized())
                .or_insert(i);
        }

        let (events, op_indices) = match equivalent_generating_op_indices {
            None => {
                if phenomenal_clusters.is_some() {
                    return Err(EnumError::InvalidArgument(
                        "phenomenal clusters require equivalent generating op indices".into(),
                    ));
                }
                let (events, op_indices): (Vec<OccEvent>, Vec<usize>) = orbit.into_iter().unzip();
                (events, op_indices)
            }
            Some(op_indices) => {
                let mut seen = BTreeSet::new();
                let mut events = Vec::with_capacity(op_indices.len());
                for &i in &op_indices {
                    let op = prim.factor_group_op(i)?;
                    let event = prototype_event.copy_apply(op).standardized();
                    if !seen.insert(event.prim_periodic_normalized()) {
                        return Err(EnumError::InvalidArgument(format!(
                            "equivalent generating op {} duplicates an earlier equivalent event",
                            i
                        )));
                    }
                    events.push(event);
                }
                if seen.len() != orbit.len() {
                    return Err(EnumError::InvalidArgument(format!(
                        "{} equivalent generating ops given, the event orbit has {} members",
                        seen.len(),
                        orbit.len()
                    )));
                }
                (events, op_indices)
            }
        };

        let events = match &phenomenal_clusters {
            None => events,
            Some(clusters) => {
                if clusters.len() != events.len() {
                    return Err(EnumError::InvalidArgument(format!(
                        "{} phenomenal clusters given for {} equivalent events",
                        clusters.len(),
                        events.len()
                    )));
                }
                events
                    .iter()
                    .zip(clusters)
                    .map(|(event, cluster)| place_on_cluster(event, cluster))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        let phenomenal_clusters = events.iter().map(OccEvent::cluster).collect();
        let lookup = events
            .iter()
            .enumerate()
            .map(|(i, event)| (event.prim_periodic_normalized(), i))
            .collect();

        debug!(
            "Event orbit of size {} generated from {} factor group ops",
            events.len(),
            prim.factor_group().len()
        );

        Ok(Self {
            prim,
            prototype_event,
            events,
            phenomenal_clusters,
            equivalent_generating_op_indices: op_indices,
            lookup,
        })
    }

    pub fn prim(&self) -> &Arc<Prim> {
        &self.prim
    }

    pub fn prototype_event(&self) -> &OccEvent {
        &self.prototype_event
    }

    /// Equivalent events, standardized, in orbit order
    pub fn events(&self) -> &[OccEvent] {
        &self.events
    }

    pub fn n_equivalents(&self) -> usize {
        self.events.len()
    }

    pub fn phenomenal_clusters(&self) -> &[Vec<UnitCellCoord>] {
        &self.phenomenal_clusters
    }

    pub fn equivalent_generating_op_indices(&self) -> &[usize] {
        &self.equivalent_generating_op_indices
    }

    /// Index of the orbit member `event` is a translation of.
    pub fn equivalent_index(&self, event: &OccEvent) -> Result<usize> {
        self.lookup
            .get(&event.prim_periodic_normalized())
            .copied()
            .ok_or(EnumError::EventNotInOrbit)
    }

    pub fn equivalents_info(&self) -> EquivalentsInfo {
        EquivalentsInfo {
            phenomenal_clusters: self.phenomenal_clusters.clone(),
            equivalent_generating_op_indices: self.equivalent_generating_op_indices.clone(),
        }
    }
}

fn place_on_cluster(event: &OccEvent, cluster: &[UnitCellCoord]) -> Result<OccEvent> {
    let mut cluster = cluster.to_vec();
    cluster.sort();
    let mismatch = || {
        EnumError::InvalidArgument(format!(
            "equivalent event {:?} cannot be translated onto phenomenal cluster {:?}",
            event.sites(),
            cluster
        ))
    };
    let (Some(first), Some(target)) = (event.sites().first(), cluster.first()) else {
        return Err(mismatch());
    };
    let translation = target.unitcell() - first.unitcell();
    let placed = event.translated(&translation);
    if placed.sites() != cluster.as_slice() {
        return Err(mismatch());
    }
    Ok(placed)
}

/// Identity token of an [`OccEventSymInfo`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymInfoId(u64);

static NEXT_SYM_INFO_ID: AtomicU64 = AtomicU64::new(0);

impl SymInfoId {
    fn next() -> Self {
        SymInfoId(NEXT_SYM_INFO_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Event-type symmetry context shared by every local configuration of one event type.
///
/// Two contexts built from identical data are still distinct: local configurations are
/// only comparable when they share the same context, checked through [`SymInfoId`].
/// Per-supercell contexts are built on first request and cached for the context's
/// lifetime.
#[derive(Debug)]
pub struct OccEventSymInfo {
    id: SymInfoId,
    prim_info: Arc<OccEventPrimSymInfo>,
    supercell_infos: RwLock<BTreeMap<MatrixKey, Arc<OccEventSupercellSymInfo>>>,
}

impl OccEventSymInfo {
    pub fn init(
        prim: Arc<Prim>,
        prototype_event: OccEvent,
        phenomenal_clusters: Option<Vec<Vec<UnitCellCoord>>>,
        equivalent_generating_op_indices: Option<Vec<usize>>,
    ) -> Result<Arc<Self>> {
        let prim_info = OccEventPrimSymInfo::new(
            prim,
            prototype_event,
            phenomenal_clusters,
            equivalent_generating_op_indices,
        )?;
        Ok(Self::from_prim_info(Arc::new(prim_info)))
    }

    pub fn from_prim_info(prim_info: Arc<OccEventPrimSymInfo>) -> Arc<Self> {
        Arc::new(Self {
            id: SymInfoId::next(),
            prim_info,
            supercell_infos: RwLock::new(BTreeMap::new()),
        })
    }

    pub fn id(&self) -> SymInfoId {
        self.id
    }

    pub fn prim(&self) -> &Arc<Prim> {
        self.prim_info.prim()
    }

    pub fn prim_info(&self) -> &Arc<OccEventPrimSymInfo> {
        &self.prim_info
    }

    /// A new, distinct context with the same orbit and an empty supercell cache.
    pub fn deep_copy(&self) -> Arc<Self> {
        Self::from_prim_info(self.prim_info.clone())
    }

    /// Per-supercell context, constructed on first use.
    pub fn get_event_supercell_info(
        &self,
        supercell: &Arc<Supercell>,
    ) -> Result<Arc<OccEventSupercellSymInfo>> {
        if !Arc::ptr_eq(supercell.prim(), self.prim()) {
            return Err(EnumError::PrimMismatch(
                "supercell does not belong to the prim of the event symmetry info".into(),
            ));
        }
        if let Some(info) = self.supercell_infos.read().get(supercell.key()) {
            return Ok(info.clone());
        }
        let mut supercell_infos = self.supercell_infos.write();
        let info = supercell_infos.entry(*supercell.key()).or_insert_with(|| {
            debug!("Constructing event supercell info for {:?}", supercell.key());
            Arc::new(OccEventSupercellSymInfo::new(
                supercell.clone(),
                self.prim_info.clone(),
            ))
        });
        Ok(info.clone())
    }

    /// Number of cached per-supercell contexts
    pub fn n_supercell_infos(&self) -> usize {
        self.supercell_infos.read().len()
    }

    pub fn to_data(&self) -> OccEventSymInfoData {
        OccEventSymInfoData {
            prototype_event: self.prim_info.prototype_event().clone(),
            equivalents_info: self.prim_info.equivalents_info(),
        }
    }

    pub fn from_data(data: &OccEventSymInfoData, prim: Arc<Prim>) -> Result<Arc<Self>> {
        Self::init(
            prim,
            data.prototype_event.clone(),
            Some(data.equivalents_info.phenomenal_clusters.clone()),
            Some(data.equivalents_info.equivalent_generating_op_indices.clone()),
        )
    }
}

/// Data needed to reproduce the orbit order and placement of the equivalent events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalentsInfo {
    pub phenomenal_clusters: Vec<Vec<UnitCellCoord>>,
    pub equivalent_generating_op_indices: Vec<usize>,
}

/// Serialized form of [`OccEventSymInfo`]; per-supercell caches are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccEventSymInfoData {
    pub prototype_event: OccEvent,
    pub equivalents_info: EquivalentsInfo,
}
