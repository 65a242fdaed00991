//! Vertical placement of block occurrences in a fixed-height-per-hour grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Block;
use crate::recurrence::sorted_occurrences_for_day;

pub const DEFAULT_ORIGIN_HOUR: u8 = 4;
pub const DEFAULT_END_HOUR: u8 = 24;
pub const DEFAULT_PIXELS_PER_HOUR: f64 = 49.0;

/// Pixel offset and height of one occurrence, relative to the grid's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub height: f64,
}

impl Placement {
    /// True when the block ends at or before it starts (data error or a block
    /// crossing midnight). Such placements render as nothing.
    pub fn is_degenerate(&self) -> bool {
        self.height <= 0.0
    }
}

/// Computes where `block` sits in a grid whose first row is `grid_origin_hour`.
///
/// Returns `None` when the block starts before the grid's first hour; the
/// occurrence is left out rather than clipped to the top edge. The height is
/// not validated and is negative when `end_time` precedes `start_time`.
pub fn placement(block: &Block, grid_origin_hour: u8, pixels_per_minute: f64) -> Option<Placement> {
    let start = block.start_time;
    if start.hour() < grid_origin_hour {
        return None;
    }

    let offset_minutes = (start.hour() as i32 - grid_origin_hour as i32) * 60 + start.minute() as i32;
    Some(Placement {
        top: offset_minutes as f64 * pixels_per_minute,
        height: block.duration_minutes() as f64 * pixels_per_minute,
    })
}

/// Grid geometry shared by the day and week renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// First displayed hour
    pub origin_hour: u8,
    /// Hour at which the grid ends (exclusive), at most 24
    pub end_hour: u8,
    pub pixels_per_hour: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin_hour: DEFAULT_ORIGIN_HOUR,
            end_hour: DEFAULT_END_HOUR,
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
        }
    }
}

impl GridConfig {
    pub fn new(origin_hour: u8, end_hour: u8, pixels_per_hour: f64) -> Result<Self, CoreError> {
        let config = Self {
            origin_hour,
            end_hour,
            pixels_per_hour,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.end_hour > 24 {
            return Err(CoreError::InvalidInput(format!(
                "Grid end hour must be at most 24, got {}",
                self.end_hour
            )));
        }
        if self.origin_hour >= self.end_hour {
            return Err(CoreError::InvalidInput(format!(
                "Grid origin hour {} must be before end hour {}",
                self.origin_hour, self.end_hour
            )));
        }
        if !self.pixels_per_hour.is_finite() || self.pixels_per_hour <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "Pixels per hour must be positive, got {}",
                self.pixels_per_hour
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn pixels_per_minute(&self) -> f64 {
        self.pixels_per_hour / 60.0
    }

    /// Total pixel height of the grid.
    pub fn height(&self) -> f64 {
        self.end_hour.saturating_sub(self.origin_hour) as f64 * self.pixels_per_hour
    }

    /// Labels of the hour rows, e.g. `04:00` through `23:00`.
    pub fn hour_slots(&self) -> Vec<String> {
        (self.origin_hour..self.end_hour)
            .map(|hour| format!("{:02}:00", hour))
            .collect()
    }

    pub fn place(&self, block: &Block) -> Option<Placement> {
        placement(block, self.origin_hour, self.pixels_per_minute())
    }
}

/// An occurrence together with its position in the grid.
#[derive(Debug, Clone)]
pub struct PlacedBlock<'a> {
    pub block: &'a Block,
    pub placement: Placement,
}

/// Lays out the occurrences of `date`, sorted by start time. Occurrences that
/// start before the grid's origin hour are dropped.
pub fn layout_day<'a>(blocks: &'a [Block], date: NaiveDate, grid: &GridConfig) -> Vec<PlacedBlock<'a>> {
    sorted_occurrences_for_day(blocks, date)
        .into_iter()
        .filter_map(|block| grid.place(block).map(|placement| PlacedBlock { block, placement }))
        .collect()
}
