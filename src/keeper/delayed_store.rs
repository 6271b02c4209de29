//! Delayed transfer store
//!
//! Every delayed transfer lives under four keys:
//! - primary: sequence -> full record
//! - by maturity: (matured_time, sequence) -> sequence
//! - by sender: (from, sequence) -> sequence
//! - by recipient: (to, sequence) -> sequence
//!
//! All four keys are derived from one record by [`IndexKeys`], and only
//! `insert_delayed_transfer` / `delete_delayed_transfer` write them, so the
//! keys removed on delete are exactly the keys written on insert.
//!
//! The store also owns the sequence counter. It is advanced only as part of
//! an insert.

use crate::error::Fatal;
use crate::keeper::keeper::Keeper;
use crate::keeper::params::ParamsStore;
use crate::store::keys::{
    self, decode_i64, decode_mature_time_key, encode_i64, DELAYED_TRANSFER_MATURE_TIME_PREFIX,
    DELAYED_TRANSFER_PREFIX,
};
use crate::store::{decode_record, encode_record, KvStore};
use crate::supply::SupplyKeeper;
use crate::types::{Address, DelayedTransfer};

/// The complete key set of one delayed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexKeys {
    pub primary: Vec<u8>,
    pub by_time: Vec<u8>,
    pub by_sender: Vec<u8>,
    pub by_recipient: Vec<u8>,
}

impl IndexKeys {
    pub fn for_transfer(transfer: &DelayedTransfer) -> Self {
        Self {
            primary: keys::delayed_transfer_key(transfer.sequence),
            by_time: keys::mature_time_key(transfer.matured_time, transfer.sequence),
            by_sender: keys::from_key(&transfer.from, transfer.sequence),
            by_recipient: keys::to_key(&transfer.to, transfer.sequence),
        }
    }

    /// Secondary keys, each pointing back at the sequence
    pub fn secondaries(&self) -> [(&'static str, &[u8]); 3] {
        [
            ("maturity", self.by_time.as_slice()),
            ("sender", self.by_sender.as_slice()),
            ("recipient", self.by_recipient.as_slice()),
        ]
    }
}

impl<S, B, P> Keeper<S, B, P>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    /// Sequence the next inserted transfer will receive
    pub fn next_sequence(&self) -> Result<i64, Fatal> {
        let key = keys::sequence_key();
        match self.store.get(&key) {
            None => Ok(0),
            Some(bytes) => decode_i64(&bytes).ok_or_else(|| Fatal::Decode {
                key: hex::encode(&key),
                reason: format!("sequence counter has {} bytes", bytes.len()),
            }),
        }
    }

    fn advance_sequence(&mut self, used: i64) -> Result<(), Fatal> {
        let next = self.next_sequence()?.max(used.saturating_add(1));
        self.store.set(&keys::sequence_key(), &encode_i64(next));
        Ok(())
    }

    /// Write a transfer under all four indices and advance the sequence
    /// counter past its sequence.
    pub fn insert_delayed_transfer(&mut self, transfer: &DelayedTransfer) -> Result<(), Fatal> {
        let index = IndexKeys::for_transfer(transfer);
        if self.store.has(&index.primary) {
            return Err(Fatal::DuplicateSequence(transfer.sequence));
        }

        // Encode before the first write so a failure leaves nothing behind
        let record = encode_record(transfer)?;
        let pointer = encode_i64(transfer.sequence);

        self.store.set(&index.primary, &record);
        for (_, key) in index.secondaries() {
            self.store.set(key, &pointer);
        }
        self.advance_sequence(transfer.sequence)?;

        log::debug!(
            "Delayed transfer {} stored, matures at {}",
            transfer.sequence,
            transfer.matured_time
        );
        Ok(())
    }

    /// Remove a transfer from all four indices.
    ///
    /// The supplied record must equal the stored one and every secondary
    /// entry must point at its sequence; anything else means the indices
    /// have diverged and is fatal. Nothing is deleted in that case.
    pub fn delete_delayed_transfer(&mut self, transfer: &DelayedTransfer) -> Result<(), Fatal> {
        let sequence = transfer.sequence;
        let index = IndexKeys::for_transfer(transfer);

        let stored = self
            .get_delayed_transfer(sequence)?
            .ok_or(Fatal::MissingRecord(sequence))?;
        if &stored != transfer {
            return Err(Fatal::IndexMismatch {
                sequence,
                detail: "supplied record differs from the stored record".to_string(),
            });
        }

        for (name, key) in index.secondaries() {
            match self.store.get(key) {
                Some(pointer) if decode_i64(&pointer) == Some(sequence) => {}
                Some(_) => {
                    return Err(Fatal::IndexMismatch {
                        sequence,
                        detail: format!("{} index points at another sequence", name),
                    })
                }
                None => {
                    return Err(Fatal::IndexMismatch {
                        sequence,
                        detail: format!("{} index entry is missing", name),
                    })
                }
            }
        }

        self.store.delete(&index.primary);
        for (_, key) in index.secondaries() {
            self.store.delete(key);
        }
        Ok(())
    }

    pub fn get_delayed_transfer(&self, sequence: i64) -> Result<Option<DelayedTransfer>, Fatal> {
        let key = keys::delayed_transfer_key(sequence);
        self.store
            .get(&key)
            .map(|bytes| decode_record(&key, &bytes))
            .transpose()
    }

    /// All transfers, ascending by sequence
    pub fn list_delayed_transfers(&self) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.delayed_transfer_iter().collect()
    }

    pub(crate) fn delayed_transfer_iter(
        &self,
    ) -> impl Iterator<Item = Result<DelayedTransfer, Fatal>> + '_ {
        self.store
            .prefix_iter(&[DELAYED_TRANSFER_PREFIX])
            .map(|(key, value)| decode_record(key, value))
    }

    /// All transfers, ascending by `(matured_time, sequence)`
    pub fn list_by_maturity(&self) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.resolve_index(&[DELAYED_TRANSFER_MATURE_TIME_PREFIX]).collect()
    }

    /// Transfers sent by `from`, ascending by sequence
    pub fn list_by_sender(&self, from: &Address) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.resolve_index(&keys::from_prefix(from)).collect()
    }

    /// Transfers addressed to `to`, ascending by sequence
    pub fn list_by_recipient(&self, to: &Address) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.resolve_index(&keys::to_prefix(to)).collect()
    }

    /// Follow the sequence pointers of a secondary index to their records
    pub(crate) fn resolve_index<'a>(
        &'a self,
        prefix: &[u8],
    ) -> impl Iterator<Item = Result<DelayedTransfer, Fatal>> + 'a {
        self.store.prefix_iter(prefix).map(move |(key, pointer)| {
            let sequence = decode_i64(pointer).ok_or_else(|| Fatal::Decode {
                key: hex::encode(key),
                reason: format!("index pointer has {} bytes", pointer.len()),
            })?;
            self.get_delayed_transfer(sequence)?
                .ok_or(Fatal::MissingRecord(sequence))
        })
    }

    /// Sequences of transfers due at `now`, in `(matured_time, sequence)`
    /// order. The scan stops at the first entry maturing after `now`, so
    /// its cost is bounded by the number of due transfers.
    pub fn matured_sequences(&self, now: i64) -> Result<Vec<i64>, Fatal> {
        let mut due = Vec::new();

        for (key, pointer) in self.store.prefix_iter(&[DELAYED_TRANSFER_MATURE_TIME_PREFIX]) {
            let Some((matured_time, sequence)) = decode_mature_time_key(key) else {
                log::warn!("Skipping malformed maturity key {}", hex::encode(key));
                continue;
            };
            if matured_time > now {
                break;
            }
            if decode_i64(pointer) != Some(sequence) {
                return Err(Fatal::IndexMismatch {
                    sequence,
                    detail: "maturity key and pointer disagree".to_string(),
                });
            }
            due.push(sequence);
        }

        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::keys::{DELAYED_TRANSFER_FROM_PREFIX, DELAYED_TRANSFER_TO_PREFIX};
    use crate::testutil::{addr, setup_test_input, TestKeeper};
    use crate::types::Coins;
    use proptest::prelude::*;

    const ALL_PREFIXES: [u8; 4] = [
        DELAYED_TRANSFER_PREFIX,
        DELAYED_TRANSFER_MATURE_TIME_PREFIX,
        DELAYED_TRANSFER_FROM_PREFIX,
        DELAYED_TRANSFER_TO_PREFIX,
    ];

    fn transfer(matured_time: i64, sequence: i64) -> DelayedTransfer {
        DelayedTransfer::new(
            addr("alice"),
            addr("bob"),
            Coins::single("btc", 100),
            matured_time,
            sequence,
        )
    }

    fn insert_next(keeper: &mut TestKeeper, matured_time: i64) -> DelayedTransfer {
        let sequence = keeper.next_sequence().unwrap();
        let t = transfer(matured_time, sequence);
        keeper.insert_delayed_transfer(&t).unwrap();
        t
    }

    fn residual_entries(keeper: &TestKeeper) -> usize {
        ALL_PREFIXES
            .iter()
            .map(|p| keeper.store().count_prefix(&[*p]))
            .sum()
    }

    #[test]
    fn test_insert_writes_four_entries() {
        let (mut keeper, _) = setup_test_input();
        assert_eq!(keeper.next_sequence().unwrap(), 0);

        let t = insert_next(&mut keeper, 100);

        for prefix in ALL_PREFIXES {
            assert_eq!(keeper.store().count_prefix(&[prefix]), 1);
        }
        assert_eq!(keeper.next_sequence().unwrap(), 1);
        assert_eq!(keeper.get_delayed_transfer(0).unwrap(), Some(t.clone()));
        assert_eq!(keeper.list_by_sender(&addr("alice")).unwrap(), vec![t.clone()]);
        assert_eq!(keeper.list_by_recipient(&addr("bob")).unwrap(), vec![t]);
        assert!(keeper.list_by_sender(&addr("bob")).unwrap().is_empty());
    }

    #[test]
    fn test_insert_then_delete_leaves_nothing() {
        let (mut keeper, _) = setup_test_input();
        let t = insert_next(&mut keeper, 100);

        keeper.delete_delayed_transfer(&t).unwrap();

        assert_eq!(residual_entries(&keeper), 0);
        assert_eq!(keeper.get_delayed_transfer(t.sequence).unwrap(), None);
        // The counter is never rewound
        assert_eq!(keeper.next_sequence().unwrap(), 1);
    }

    #[test]
    fn test_delete_only_touches_its_own_entries() {
        let (mut keeper, _) = setup_test_input();
        let a = insert_next(&mut keeper, 10);
        let b = insert_next(&mut keeper, 10);

        keeper.delete_delayed_transfer(&a).unwrap();

        assert_eq!(residual_entries(&keeper), 4);
        assert_eq!(keeper.list_by_maturity().unwrap(), vec![b]);
    }

    #[test]
    fn test_duplicate_sequence_is_fatal() {
        let (mut keeper, _) = setup_test_input();
        let t = insert_next(&mut keeper, 100);

        let err = keeper.insert_delayed_transfer(&t).unwrap_err();
        assert_eq!(err, Fatal::DuplicateSequence(0));
        assert_eq!(residual_entries(&keeper), 4);
    }

    #[test]
    fn test_delete_with_mismatched_record_is_fatal() {
        let (mut keeper, _) = setup_test_input();
        let t = insert_next(&mut keeper, 100);

        // Same sequence, different maturity: the derived by-time key would
        // not match the one written on insert.
        let forged = transfer(200, t.sequence);
        assert!(matches!(
            keeper.delete_delayed_transfer(&forged),
            Err(Fatal::IndexMismatch { sequence: 0, .. })
        ));
        assert_eq!(residual_entries(&keeper), 4);

        let missing = transfer(100, 42);
        assert_eq!(
            keeper.delete_delayed_transfer(&missing),
            Err(Fatal::MissingRecord(42))
        );
    }

    #[test]
    fn test_delete_with_missing_secondary_is_fatal() {
        let (mut keeper, _) = setup_test_input();
        let t = insert_next(&mut keeper, 100);
        keeper.store.delete(&keys::to_key(&t.to, t.sequence));

        assert!(matches!(
            keeper.delete_delayed_transfer(&t),
            Err(Fatal::IndexMismatch { .. })
        ));
        // Primary record untouched
        assert!(keeper.get_delayed_transfer(t.sequence).unwrap().is_some());
    }

    #[test]
    fn test_list_by_maturity_orders_by_time_then_sequence() {
        let (mut keeper, _) = setup_test_input();
        for time in [50, 10, 30, 10] {
            insert_next(&mut keeper, time);
        }

        let order: Vec<(i64, i64)> = keeper
            .list_by_maturity()
            .unwrap()
            .iter()
            .map(|t| (t.matured_time, t.sequence))
            .collect();
        assert_eq!(order, vec![(10, 1), (10, 3), (30, 2), (50, 0)]);

        let by_sequence: Vec<i64> = keeper
            .list_delayed_transfers()
            .unwrap()
            .iter()
            .map(|t| t.sequence)
            .collect();
        assert_eq!(by_sequence, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_matured_sequences_stop_early() {
        let (mut keeper, _) = setup_test_input();
        for time in [50, 10, 30] {
            insert_next(&mut keeper, time);
        }

        assert_eq!(keeper.matured_sequences(40).unwrap(), vec![1, 2]);
        assert_eq!(keeper.matured_sequences(9).unwrap(), Vec::<i64>::new());
        assert_eq!(keeper.matured_sequences(50).unwrap(), vec![1, 2, 0]);
    }

    #[test]
    fn test_negative_maturity_sorts_first() {
        let (mut keeper, _) = setup_test_input();
        insert_next(&mut keeper, 5);
        insert_next(&mut keeper, -5);

        assert_eq!(keeper.matured_sequences(0).unwrap(), vec![1]);
    }

    #[test]
    fn test_insert_with_explicit_sequence_advances_counter() {
        let (mut keeper, _) = setup_test_input();
        keeper.insert_delayed_transfer(&transfer(1, 7)).unwrap();
        assert_eq!(keeper.next_sequence().unwrap(), 8);

        keeper.insert_delayed_transfer(&transfer(1, 3)).unwrap();
        assert_eq!(keeper.next_sequence().unwrap(), 8);
    }

    proptest! {
        #[test]
        fn prop_matured_set_is_exact_and_ordered(
            times in proptest::collection::vec(-1_000i64..1_000, 0..40),
            now in -1_000i64..1_000,
        ) {
            let (mut keeper, _) = setup_test_input();
            for time in &times {
                insert_next(&mut keeper, *time);
            }

            let mut expected: Vec<(i64, i64)> = times
                .iter()
                .enumerate()
                .filter(|(_, t)| **t <= now)
                .map(|(seq, t)| (*t, seq as i64))
                .collect();
            expected.sort();
            let expected: Vec<i64> = expected.into_iter().map(|(_, seq)| seq).collect();

            prop_assert_eq!(keeper.matured_sequences(now).unwrap(), expected);
        }

        #[test]
        fn prop_insert_delete_any_order_leaves_nothing(
            times in proptest::collection::vec(-1_000i64..1_000, 1..30),
            seed in any::<u64>(),
        ) {
            let (mut keeper, _) = setup_test_input();
            let mut inserted: Vec<DelayedTransfer> =
                times.iter().map(|t| insert_next(&mut keeper, *t)).collect();

            // Deterministic shuffle of the deletion order
            let len = inserted.len();
            for i in 0..len {
                let j = (seed.wrapping_mul(i as u64 + 1).rotate_left(17) % len as u64) as usize;
                inserted.swap(i, j);
            }
            for t in &inserted {
                keeper.delete_delayed_transfer(t).unwrap();
            }

            prop_assert_eq!(residual_entries(&keeper), 0);
        }
    }
}
