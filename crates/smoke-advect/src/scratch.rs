//! Scratch storage owned by the orchestrator, pooled by resolution.
//!
//! A [`ScratchSet`] holds every temporary one timestep needs at one
//! [`Resolution`]: stage outputs, the intermediate integrator state, and
//! the velocity projections. [`ScratchPool`] keeps sets keyed by
//! resolution so repeated steps reuse their buffers; a resolution the pool
//! has not seen allocates a fresh set, evicting the oldest when full.

use indexmap::IndexMap;
use log::debug;
use smallvec::SmallVec;
use smoke_core::{Grid2, MacVelocity, Resolution};

use crate::projection::Projections;

/// Three grids shaped like the two velocity components and the concentration.
///
/// On the derivative path this holds `d/dt` of each field; on the full-step
/// path it holds the advanced fields themselves.
#[derive(Clone, Debug)]
pub struct StageFields {
    /// Velocity-shaped part.
    pub velocity: MacVelocity,
    /// Concentration-shaped part.
    pub concentration: Grid2,
}

impl StageFields {
    /// Zeroed fields shaped for `res`.
    pub fn zeros(res: Resolution) -> Self {
        Self {
            velocity: MacVelocity::zeros(res.velocity),
            concentration: Grid2::zeros(res.concentration, res.concentration),
        }
    }

    /// Overwrite `velocity` and `concentration` with this stage's contents.
    pub fn copy_into(&self, velocity: &mut MacVelocity, concentration: &mut Grid2) {
        velocity.copy_from(&self.velocity);
        concentration.copy_from(&self.concentration);
    }
}

/// Every temporary buffer one timestep needs at a fixed resolution.
#[derive(Debug)]
pub struct ScratchSet {
    resolution: Resolution,
    pub(crate) stages: SmallVec<[StageFields; 4]>,
    pub(crate) temp: StageFields,
    pub(crate) projections: Projections,
}

impl ScratchSet {
    /// Allocate the fixed buffers for `res`; stage buffers are added on demand.
    pub fn new(res: Resolution) -> Self {
        Self {
            resolution: res,
            stages: SmallVec::new(),
            temp: StageFields::zeros(res),
            projections: Projections::zeros(res),
        }
    }

    /// The resolution every buffer in this set is shaped for.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of stage buffers allocated so far.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Grow the stage buffers to at least `count`. Existing buffers are kept.
    pub fn ensure_stages(&mut self, count: usize) {
        while self.stages.len() < count {
            self.stages.push(StageFields::zeros(self.resolution));
        }
    }

    /// Read-only view of stage `k`, if allocated.
    pub fn stage(&self, k: usize) -> Option<&StageFields> {
        self.stages.get(k)
    }
}

/// Scratch sets keyed by resolution.
#[derive(Debug)]
pub struct ScratchPool {
    sets: IndexMap<Resolution, ScratchSet>,
    capacity: usize,
    allocations: u64,
}

impl ScratchPool {
    /// A pool that keeps at most `capacity` resolutions (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            sets: IndexMap::new(),
            capacity: capacity.max(1),
            allocations: 0,
        }
    }

    /// The scratch set for `res`, allocating it (and evicting the oldest set
    /// if the pool is full) when absent.
    pub fn get_or_alloc(&mut self, res: Resolution) -> &mut ScratchSet {
        if !self.sets.contains_key(&res) {
            while self.sets.len() >= self.capacity {
                if let Some((old, _)) = self.sets.shift_remove_index(0) {
                    debug!("evicting advection scratch for {old}");
                }
            }
            debug!("allocating advection scratch for {res}");
            self.allocations += 1;
        }
        self.sets
            .entry(res)
            .or_insert_with(|| ScratchSet::new(res))
    }

    /// The set for `res`, if pooled.
    pub fn get(&self, res: Resolution) -> Option<&ScratchSet> {
        self.sets.get(&res)
    }

    /// True if a set for `res` is pooled.
    pub fn contains(&self, res: Resolution) -> bool {
        self.sets.contains_key(&res)
    }

    /// Number of pooled resolutions.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// True if nothing is pooled.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Maximum number of pooled resolutions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total scratch sets allocated over the pool's lifetime.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Drop every pooled set.
    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
