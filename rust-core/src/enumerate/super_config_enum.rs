use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use log::{debug, trace};

use crate::configuration::canonical_form::{
    make_canonical_configuration, make_equivalent_supercells,
};
use crate::configuration::configuration::{copy_configuration, Configuration};
use crate::error::EnumError;
use crate::lattice::prim::Prim;
use crate::lattice::supercell::{Supercell, SupercellSet};
use crate::lattice::supercell_enum::{SupercellEnum, SupercellEnumParams};
use crate::Result;

/// Enumerates the symmetrically distinct super configurations of a motif.
///
/// Every enumeration call returns a fresh [`SuperConfigIter`] with its own registry of
/// canonical forms, so calls are independent and can be abandoned at any point.
pub struct SuperConfigEnum {
    prim: Arc<Prim>,
    supercell_set: Option<Arc<SupercellSet>>,
}

impl SuperConfigEnum {
    pub fn new(prim: Arc<Prim>, supercell_set: Option<Arc<SupercellSet>>) -> Result<Self> {
        if let Some(set) = &supercell_set {
            if !Arc::ptr_eq(set.prim(), &prim) {
                return Err(EnumError::PrimMismatch(
                    "SupercellSet belongs to a different prim".into(),
                ));
            }
        }
        Ok(Self {
            prim,
            supercell_set,
        })
    }

    pub fn prim(&self) -> &Arc<Prim> {
        &self.prim
    }

    pub fn supercell_set(&self) -> Option<&Arc<SupercellSet>> {
        self.supercell_set.as_ref()
    }

    /// Super configurations in the supercells enumerated by volume.
    pub fn by_supercell(
        &self,
        motif: &Configuration,
        params: &SupercellEnumParams,
    ) -> Result<SuperConfigIter> {
        self.check_motif(motif)?;
        let candidates = SupercellEnum::new(self.prim.clone(), self.supercell_set.clone())?
            .by_volume(params)?;
        Ok(self.make_iter(motif, Box::new(candidates)))
    }

    /// Super configurations in the given supercells and their equivalents.
    pub fn by_supercell_list(
        &self,
        motif: &Configuration,
        supercells: Vec<Arc<Supercell>>,
    ) -> Result<SuperConfigIter> {
        self.check_motif(motif)?;
        if let Some(supercell) = supercells
            .iter()
            .find(|s| !Arc::ptr_eq(s.prim(), &self.prim))
        {
            return Err(EnumError::PrimMismatch(format!(
                "supercell {:?} belongs to a different prim",
                supercell.key()
            )));
        }
        Ok(self.make_iter(motif, Box::new(supercells.into_iter())))
    }

    fn check_motif(&self, motif: &Configuration) -> Result<()> {
        if !Arc::ptr_eq(motif.supercell().prim(), &self.prim) {
            return Err(EnumError::PrimMismatch(
                "motif belongs to a different prim than the enumerator".into(),
            ));
        }
        Ok(())
    }

    fn make_iter(
        &self,
        motif: &Configuration,
        candidates: Box<dyn Iterator<Item = Arc<Supercell>> + Send>,
    ) -> SuperConfigIter {
        SuperConfigIter {
            motif: motif.clone(),
            supercell_set: self.supercell_set.clone(),
            candidates,
            pending: VecDeque::new(),
            canonical_forms: BTreeSet::new(),
        }
    }
}

/// Lazy sequence of super configurations, in the order candidate supercells and their
/// equivalents are visited.
pub struct SuperConfigIter {
    motif: Configuration,
    supercell_set: Option<Arc<SupercellSet>>,
    candidates: Box<dyn Iterator<Item = Arc<Supercell>> + Send>,
    pending: VecDeque<Configuration>,
    canonical_forms: BTreeSet<Configuration>,
}

impl SuperConfigIter {
    /// Canonical forms produced so far
    pub fn canonical_forms(&self) -> &BTreeSet<Configuration> {
        &self.canonical_forms
    }

    fn visit(&mut self, candidate: &Arc<Supercell>) -> Result<()> {
        let supercell_set = self.supercell_set.as_deref();
        let equivalents = make_equivalent_supercells(candidate, supercell_set)?;
        debug!(
            "Super configurations: candidate {:?} has {} equivalent supercells",
            candidate.key(),
            equivalents.len()
        );
        for supercell in &equivalents {
            if !supercell.is_superlattice_of(self.motif.supercell()) {
                continue;
            }
            let super_config = copy_configuration(&self.motif, supercell)?;
            let canonical = make_canonical_configuration(&super_config, true, supercell_set)?;
            if self.canonical_forms.insert(canonical) {
                self.pending.push_back(super_config);
            } else {
                trace!(
                    "Skipping super configuration in {:?}: equivalent already produced",
                    supercell.key()
                );
            }
        }
        Ok(())
    }
}

impl Iterator for SuperConfigIter {
    type Item = Result<Configuration>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            let candidate = self.candidates.next()?;
            if let Err(err) = self.visit(&candidate) {
                return Some(Err(err));
            }
        }
        self.pending.pop_front().map(Ok)
    }
}
