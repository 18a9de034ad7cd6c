use super::item_catalogue::ItemCatalogue;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// An identifier of a [`DpState`] in the [`StateSpace`] arena.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct DpStateId(u32);

impl DpStateId {
    /// The state in which nothing has been packed yet.
    pub(crate) const ROOT: DpStateId = DpStateId(0);
}

impl std::fmt::Display for DpStateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DpStateId({})", self.0)
    }
}

impl StorageKey for DpStateId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        DpStateId(u32::try_from(index).expect("the number of DP states exceeds u32::MAX"))
    }
}

/// A node of the dynamic-programming search graph.
///
/// The state describes a partial packing in which the item types before `item_cursor` are
/// decided, and `quantity` copies of the type at `item_cursor` have been added so far.
#[derive(Debug)]
pub(crate) struct DpState {
    pub(crate) item_cursor: usize,
    pub(crate) quantity: usize,
    /// The capacity used by the partial packing.
    pub(crate) used_dimensions: Box<[i32]>,
    /// The most general usage this state can be relabelled to; empty until the backward
    /// compression pass has processed the state.
    pub(crate) label: Box<[i32]>,
    /// The state in which no more copies of the current type are added.
    pub(crate) up_child: Option<DpStateId>,
    /// The state in which one more copy of the current type is added.
    pub(crate) right_child: Option<DpStateId>,
}

/// All DP states which are reachable from the root.
///
/// The root is always [`DpStateId::ROOT`], and the children of a state always have a larger
/// id than the state itself.
#[derive(Debug)]
pub(crate) struct StateSpace {
    pub(crate) states: KeyedVec<DpStateId, DpState>,
}

impl StateSpace {
    /// Runs the forward creation pass: starting from the empty packing, every state is expanded
    /// by either moving on to the next item type ("up") or adding one more copy of the current
    /// type ("right").
    pub(crate) fn explore(catalogue: &ItemCatalogue) -> StateSpace {
        let mut explorer = Explorer {
            catalogue,
            states: KeyedVec::default(),
            state_index: catalogue
                .items()
                .iter()
                .map(|item| vec![HashMap::default(); item.demand + 1])
                .collect(),
        };

        let root = explorer.lookup_or_create(0, 0, &vec![0; catalogue.num_dimensions()]);
        debug_assert_eq!(root, DpStateId::ROOT);

        // Every state discovered while expanding a state is appended to the arena, so a scan
        // over the growing arena visits all states.
        let mut next_state = 0;
        while next_state < explorer.states.len() {
            explorer.expand(DpStateId::create_from_index(next_state));
            next_state += 1;
        }

        StateSpace {
            states: explorer.states,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }
}

struct Explorer<'catalogue> {
    catalogue: &'catalogue ItemCatalogue,
    states: KeyedVec<DpStateId, DpState>,
    /// For every item cursor and quantity, the states by their used dimensions.
    state_index: Vec<Vec<HashMap<Box<[i32]>, DpStateId>>>,
}

impl Explorer<'_> {
    fn expand(&mut self, state_id: DpStateId) {
        let state = &self.states[state_id];
        let item_cursor = state.item_cursor;
        let quantity = state.quantity;
        let used_dimensions = state.used_dimensions.clone();

        if self.catalogue.num_item_types() == 0 {
            return;
        }

        let up_child = (item_cursor + 1 < self.catalogue.num_item_types())
            .then(|| self.lookup_or_create(item_cursor + 1, 0, &used_dimensions));

        let right_child = if quantity < self.catalogue.item(item_cursor).demand
            && self.catalogue.fits(&used_dimensions, item_cursor)
        {
            let used_with_item = self.catalogue.add_item(&used_dimensions, item_cursor);
            Some(self.lookup_or_create(item_cursor, quantity + 1, &used_with_item))
        } else {
            None
        };

        let state = &mut self.states[state_id];
        state.up_child = up_child;
        state.right_child = right_child;
    }

    fn lookup_or_create(
        &mut self,
        item_cursor: usize,
        quantity: usize,
        used_dimensions: &[i32],
    ) -> DpStateId {
        let table = self
            .state_index
            .get_mut(item_cursor)
            .and_then(|tables| tables.get_mut(quantity));

        if let Some(&state_id) = table.as_ref().and_then(|table| table.get(used_dimensions)) {
            return state_id;
        }

        let state_id = self.states.push(DpState {
            item_cursor,
            quantity,
            used_dimensions: used_dimensions.into(),
            label: Box::default(),
            up_child: None,
            right_child: None,
        });

        // Without item types the root is the only state and it has no table.
        if let Some(table) = table {
            let _ = table.insert(used_dimensions.into(), state_id);
        }

        state_id
    }
}
