use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_APPLY_EVENT_OCCUPATION, DEFAULT_IN_CANONICAL_POS, DEFAULT_IN_CANONICAL_SUPERCELL,
};
use crate::configuration::canonical_form::{
    is_canonical_supercell, to_canonical_supercell_op_index,
};
use crate::error::EnumError;
use crate::lattice::supercell::SupercellSet;
use crate::local_configuration::local_configuration::LocalConfiguration;
use crate::symmetries::supercell_sym_op::SupercellSymOp;
use crate::Result;

/// Selects the equivalence group used by [`make_canonical_local_configuration`].
///
/// | `in_canonical_pos` | `in_canonical_supercell` | group                                  |
/// |--------------------|--------------------------|----------------------------------------|
/// | false              | false                    | supercell ops keeping the event        |
/// | true               | false                    | all supercell ops                      |
/// | true               | true                     | prim factor group, any equivalent cell |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOptions {
    pub in_canonical_pos: bool,
    pub in_canonical_supercell: bool,
    /// Write the event's initial occupation on the event sites before comparing
    pub apply_event_occupation: bool,
}

impl Default for CanonicalOptions {
    fn default() -> Self {
        Self {
            in_canonical_pos: DEFAULT_IN_CANONICAL_POS,
            in_canonical_supercell: DEFAULT_IN_CANONICAL_SUPERCELL,
            apply_event_occupation: DEFAULT_APPLY_EVENT_OCCUPATION,
        }
    }
}

impl CanonicalOptions {
    pub fn validate(&self) -> Result<()> {
        if self.in_canonical_supercell && !self.in_canonical_pos {
            return Err(EnumError::InvalidEquivalenceGroup);
        }
        Ok(())
    }
}

/// Canonical representative of `initial` under the group selected by `options`.
///
/// Among all images the result has the least position and, for that position, the
/// greatest configuration; with `in_canonical_pos == false` the position is kept and
/// only the configuration is maximized. With `in_canonical_supercell` the local
/// configuration is first moved into the canonical equivalent supercell.
///
/// With `apply_event_occupation` every image gets the occupation of its own event
/// written on the event sites, so the result does not depend on the initial occupation
/// of those sites.
pub fn make_canonical_local_configuration(
    initial: &LocalConfiguration,
    options: &CanonicalOptions,
    supercell_set: Option<&SupercellSet>,
) -> Result<LocalConfiguration> {
    options.validate()?;

    let mut current = initial.clone();
    if options.in_canonical_supercell && !is_canonical_supercell(current.supercell()) {
        let index = to_canonical_supercell_op_index(current.supercell());
        current = current.apply_factor_group_op(index, supercell_set)?;
    }

    let candidate = |op: &SupercellSymOp| -> Result<LocalConfiguration> {
        let image = current.apply(op)?;
        if options.apply_event_occupation {
            image.with_event_occupation()
        } else {
            Ok(image)
        }
    };

    let mut best: Option<LocalConfiguration> = None;
    for op in SupercellSymOp::all(current.supercell()) {
        let image = candidate(&op)?;
        if !options.in_canonical_pos && image.pos() != current.pos() {
            continue;
        }
        let is_better = match &best {
            None => true,
            Some(best) => match image.pos().cmp(&best.pos()) {
                Ordering::Less => true,
                Ordering::Equal => image.configuration() > best.configuration(),
                Ordering::Greater => false,
            },
        };
        if is_better {
            best = Some(image);
        }
    }

    match best {
        Some(best) => Ok(best),
        None => candidate(&SupercellSymOp::identity(current.supercell())),
    }
}

/// True if `local_configuration` equals its canonical form under `options`.
pub fn is_canonical_local_configuration(
    local_configuration: &LocalConfiguration,
    options: &CanonicalOptions,
) -> Result<bool> {
    let canonical = make_canonical_local_configuration(local_configuration, options, None)?;
    canonical.try_eq(local_configuration)
}
