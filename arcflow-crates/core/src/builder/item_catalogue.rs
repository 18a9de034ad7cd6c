use itertools::Itertools;
use log::trace;

use crate::error::InvalidInstance;
use crate::options::ItemOrdering;

/// One item type as seen by the state-space explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemType {
    /// The capacity used by one copy of this type, per dimension.
    pub(crate) usage: Box<[i32]>,
    /// The maximum number of copies of this type which can be used in one bin.
    pub(crate) demand: usize,
    /// The index of the type in the input, used to label the arcs.
    pub(crate) original_index: usize,
}

/// The validated bin together with its item types, in the order in which the explorer
/// considers them.
#[derive(Debug)]
pub(crate) struct ItemCatalogue {
    bin_dimensions: Box<[i32]>,
    items: Vec<ItemType>,
    /// For every original index, the position of that type in `items`.
    positions: Vec<usize>,
}

impl ItemCatalogue {
    /// Validates the input and creates a catalogue which keeps the types in input order.
    pub(crate) fn new(
        bin_dimensions: &[i32],
        item_dimensions_by_type: &[Vec<i32>],
        demand_by_type: &[i32],
    ) -> Result<ItemCatalogue, InvalidInstance> {
        if bin_dimensions.is_empty() {
            return Err(InvalidInstance::NoDimensions);
        }

        if let Some((dimension, &capacity)) = bin_dimensions
            .iter()
            .find_position(|&&capacity| capacity <= 0)
        {
            return Err(InvalidInstance::NonPositiveCapacity {
                dimension,
                capacity,
            });
        }

        if item_dimensions_by_type.len() != demand_by_type.len() {
            return Err(InvalidInstance::DemandCountMismatch {
                num_item_types: item_dimensions_by_type.len(),
                num_demands: demand_by_type.len(),
            });
        }

        let items = item_dimensions_by_type
            .iter()
            .zip(demand_by_type)
            .enumerate()
            .map(|(item, (usage, &demand))| {
                create_item_type(bin_dimensions, item, usage, demand)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ItemCatalogue {
            bin_dimensions: bin_dimensions.into(),
            positions: (0..items.len()).collect(),
            items,
        })
    }

    /// Reorders the item types according to `ordering`.
    pub(crate) fn sort(&mut self, ordering: ItemOrdering) {
        match ordering {
            ItemOrdering::DecreasingRelativeSize => {
                let bin_dimensions = &self.bin_dimensions;
                // `sort_by_cached_key` cannot be used with floats, the sort is stable either way.
                self.items.sort_by(|lhs, rhs| {
                    relative_size(bin_dimensions, &rhs.usage)
                        .total_cmp(&relative_size(bin_dimensions, &lhs.usage))
                });
            }
            ItemOrdering::InputOrder => self.items.sort_by_key(|item| item.original_index),
        }

        for (position, item) in self.items.iter().enumerate() {
            self.positions[item.original_index] = position;
        }

        trace!(
            "Item types are considered in the order [{}]",
            self.items.iter().map(|item| item.original_index).join(", ")
        );
    }

    pub(crate) fn bin_dimensions(&self) -> &[i32] {
        &self.bin_dimensions
    }

    pub(crate) fn num_dimensions(&self) -> usize {
        self.bin_dimensions.len()
    }

    pub(crate) fn num_item_types(&self) -> usize {
        self.items.len()
    }

    /// The item type at position `cursor` of the exploration order.
    pub(crate) fn item(&self, cursor: usize) -> &ItemType {
        &self.items[cursor]
    }

    pub(crate) fn items(&self) -> &[ItemType] {
        &self.items
    }

    /// The usage of the item type which was at index `original_index` in the input.
    pub(crate) fn usage_of_original(&self, original_index: usize) -> &[i32] {
        &self.items[self.positions[original_index]].usage
    }

    /// The clamped demand of every item type, indexed by the index of the type in the input.
    pub(crate) fn demands_by_original(&self) -> Box<[usize]> {
        self.positions
            .iter()
            .map(|&position| self.items[position].demand)
            .collect()
    }

    /// Returns true if one more copy of the item at `cursor` fits on top of `used_dimensions`.
    pub(crate) fn fits(&self, used_dimensions: &[i32], cursor: usize) -> bool {
        used_dimensions
            .iter()
            .zip(self.items[cursor].usage.iter())
            .zip(self.bin_dimensions.iter())
            .all(|((&used, &usage), &capacity)| usage <= capacity - used)
    }

    /// Returns `used_dimensions` with one copy of the item at `cursor` added.
    pub(crate) fn add_item(&self, used_dimensions: &[i32], cursor: usize) -> Box<[i32]> {
        used_dimensions
            .iter()
            .zip(self.items[cursor].usage.iter())
            .map(|(&used, &usage)| used + usage)
            .collect()
    }
}

fn create_item_type(
    bin_dimensions: &[i32],
    item: usize,
    usage: &[i32],
    demand: i32,
) -> Result<ItemType, InvalidInstance> {
    if usage.len() != bin_dimensions.len() {
        return Err(InvalidInstance::DimensionMismatch {
            item,
            expected: bin_dimensions.len(),
            actual: usage.len(),
        });
    }

    if let Some((dimension, &value)) = usage.iter().find_position(|&&value| value < 0) {
        return Err(InvalidInstance::NegativeUsage {
            item,
            dimension,
            usage: value,
        });
    }

    if demand < 0 {
        return Err(InvalidInstance::NegativeDemand { item, demand });
    }

    // The number of copies which fit in an empty bin; `None` if the type uses nothing.
    let max_copies = usage
        .iter()
        .zip(bin_dimensions)
        .filter(|&(&value, _)| value > 0)
        .map(|(&value, &capacity)| (capacity / value) as usize)
        .min();

    let demand = match max_copies {
        Some(max_copies) => (demand as usize).min(max_copies),
        None if demand == 0 => 0,
        None => return Err(InvalidInstance::ZeroUsage { item, demand }),
    };

    Ok(ItemType {
        usage: usage.into(),
        demand,
        original_index: item,
    })
}

/// The sum over all dimensions of the fraction of the bin which is used by `usage`.
fn relative_size(bin_dimensions: &[i32], usage: &[i32]) -> f64 {
    usage
        .iter()
        .zip(bin_dimensions)
        .map(|(&value, &capacity)| f64::from(value) / f64::from(capacity))
        .sum()
}
