//! Entity trait: identity + continuity across the loaded dataset.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Linear scan for the record carrying `id`.
pub fn find_by_id<E: Entity>(records: &[E], id: E::Id) -> Option<&E> {
    records.iter().find(|record| record.id() == id)
}

/// Linear scan returning every record matching `predicate`, in slice order.
pub fn find_all_by<E, F>(records: &[E], predicate: F) -> Vec<&E>
where
    F: Fn(&E) -> bool,
{
    records.iter().filter(|record| predicate(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemId;

    #[derive(Debug)]
    struct Row {
        id: ItemId,
        group: u8,
    }

    impl Entity for Row {
        type Id = ItemId;

        fn id(&self) -> Self::Id {
            self.id
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: ItemId::new(3), group: 1 },
            Row { id: ItemId::new(1), group: 2 },
            Row { id: ItemId::new(2), group: 1 },
        ]
    }

    #[test]
    fn find_by_id_returns_matching_record() {
        let rows = rows();
        let found = find_by_id(&rows, ItemId::new(1)).unwrap();
        assert_eq!(found.group, 2);
        assert!(find_by_id(&rows, ItemId::new(99)).is_none());
    }

    #[test]
    fn find_all_by_preserves_slice_order() {
        let rows = rows();
        let ids: Vec<u64> = find_all_by(&rows, |r| r.group == 1)
            .into_iter()
            .map(|r| r.id.get())
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
