//! Query parameter controller
//!
//! Holds the filter controls and turns them into `QueryParams` snapshots. A
//! snapshot is emitted once on activation (the fixed defaults) and afterwards
//! only when the user runs the query; moving a control never emits.

use galaxy_core::constants::{
    DISTANCE_STEP_LY, MAX_DISTANCE_LY, MAX_YEAR, MIN_DISTANCE_LY, MIN_YEAR, YEAR_STEP,
};
use galaxy_core::{QueryParams, SectorFilter};

use std::fmt;

/// Numeric types a `RangeInput` can hold
pub trait RangeValue: Copy + PartialOrd + fmt::Debug {
    /// `self + step * steps`
    fn offset(self, step: Self, steps: i32) -> Self;
}

impl RangeValue for f64 {
    fn offset(self, step: Self, steps: i32) -> Self {
        self + step * steps as f64
    }
}

impl RangeValue for i32 {
    fn offset(self, step: Self, steps: i32) -> Self {
        self.saturating_add(step.saturating_mul(steps))
    }
}

/// Bounded numeric control: values are always inside [min, max]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeInput<T> {
    value: T,
    min: T,
    max: T,
    step: T,
}

impl<T: RangeValue> RangeInput<T> {
    pub fn new(value: T, min: T, max: T, step: T) -> Self {
        let mut input = Self { value: min, min, max, step };
        input.set(value);
        input
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// Set an absolute value, clamped into range
    pub fn set(&mut self, value: T) -> T {
        self.value = self.clamp(value);
        self.value
    }

    /// Move by whole steps, clamped into range
    pub fn nudge(&mut self, steps: i32) -> T {
        self.set(self.value.offset(self.step, steps))
    }

    fn clamp(&self, value: T) -> T {
        // NaN compares false everywhere and lands on `min`
        if !(value >= self.min) {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Input to the controller from the filter surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    SetYear(i32),
    NudgeYear(i32),
    SetMinDistance(f64),
    NudgeMinDistance(i32),
    SetMaxDistance(f64),
    NudgeMaxDistance(i32),
    SelectSector(SectorFilter),
    CycleSector,
    RunQuery,
}

pub struct QueryController {
    year: RangeInput<i32>,
    min_dist: RangeInput<f64>,
    max_dist: RangeInput<f64>,
    sector: SectorFilter,
    activated: bool,
}

impl QueryController {
    pub fn new() -> Self {
        let defaults = QueryParams::default();
        Self {
            year: RangeInput::new(defaults.year, MIN_YEAR, MAX_YEAR, YEAR_STEP),
            min_dist: distance_input(defaults.min_dist),
            max_dist: distance_input(defaults.max_dist),
            sector: defaults.sector_filter(),
            activated: false,
        }
    }

    /// First activation yields the default query; later calls yield nothing
    pub fn activate(&mut self) -> Option<QueryParams> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(QueryParams::default())
    }

    /// Apply one control event; only `RunQuery` yields a snapshot
    pub fn handle(&mut self, event: ControlEvent) -> Option<QueryParams> {
        match event {
            ControlEvent::SetYear(year) => {
                self.year.set(year);
            }
            ControlEvent::NudgeYear(steps) => {
                self.year.nudge(steps);
            }
            ControlEvent::SetMinDistance(d) => {
                self.min_dist.set(d);
            }
            ControlEvent::NudgeMinDistance(steps) => {
                self.min_dist.nudge(steps);
            }
            ControlEvent::SetMaxDistance(d) => {
                self.max_dist.set(d);
            }
            ControlEvent::NudgeMaxDistance(steps) => {
                self.max_dist.nudge(steps);
            }
            ControlEvent::SelectSector(sector) => self.sector = sector,
            ControlEvent::CycleSector => self.sector = self.sector.next(),
            ControlEvent::RunQuery => {
                let params = self.snapshot();
                tracing::debug!(?params, "Query requested");
                return Some(params);
            }
        }
        None
    }

    /// Current control values as a query (no range validation)
    pub fn snapshot(&self) -> QueryParams {
        QueryParams {
            min_dist: self.min_dist.value(),
            max_dist: self.max_dist.value(),
            healpix: self.sector.healpix(),
            year: self.year.value(),
        }
    }

    pub fn year(&self) -> &RangeInput<i32> {
        &self.year
    }

    pub fn min_dist(&self) -> &RangeInput<f64> {
        &self.min_dist
    }

    pub fn max_dist(&self) -> &RangeInput<f64> {
        &self.max_dist
    }

    pub fn sector(&self) -> SectorFilter {
        self.sector
    }
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new()
    }
}

fn distance_input(value: f64) -> RangeInput<f64> {
    RangeInput::new(value, MIN_DISTANCE_LY, MAX_DISTANCE_LY, DISTANCE_STEP_LY)
}
