//! Atomic transaction groups.

use crate::error::{TransactionError, TransactionResult};
use crate::transaction::Transaction;
use bookmarket_core::constants::MAX_GROUP_SIZE;
use bookmarket_core::hash::sha512_256_prefixed;
use bookmarket_core::io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};
use std::fmt;

const GROUP_PREFIX: &[u8] = b"TG";

/// Identifier binding the members of an atomic group.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub [u8; 32]);

impl GroupId {
    /// Raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({self})")
    }
}

impl Serializable for GroupId {
    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(&self.0);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_array().map(Self)
    }
}

fn check_size(size: usize) -> TransactionResult<()> {
    if size == 0 {
        return Err(TransactionError::EmptyGroup);
    }
    if size > MAX_GROUP_SIZE {
        return Err(TransactionError::GroupTooLarge {
            size,
            max: MAX_GROUP_SIZE,
        });
    }
    Ok(())
}

/// Computes the group id over the members' ids, each taken with its group
/// field cleared. Order matters.
pub fn compute_group_id(transactions: &[Transaction]) -> TransactionResult<GroupId> {
    check_size(transactions.len())?;
    let mut ids = Vec::with_capacity(transactions.len() * 32);
    for tx in transactions {
        let mut ungrouped = tx.clone();
        ungrouped.group = None;
        ids.extend_from_slice(ungrouped.id().as_bytes());
    }
    Ok(GroupId(sha512_256_prefixed(GROUP_PREFIX, &ids)))
}

/// Stamps every member with the group id and returns it.
pub fn assign_group_id(transactions: &mut [Transaction]) -> TransactionResult<GroupId> {
    let group = compute_group_id(transactions)?;
    for tx in transactions.iter_mut() {
        tx.group = Some(group);
    }
    Ok(group)
}

/// Checks that every member carries the id computed over the whole group.
pub fn verify_group(transactions: &[Transaction]) -> TransactionResult<GroupId> {
    let group = compute_group_id(transactions)?;
    if let Some(index) = transactions.iter().position(|tx| tx.group != Some(group)) {
        return Err(TransactionError::GroupMismatch { index });
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::tests::payment;

    #[test]
    fn assigns_same_id_to_all_members() {
        let mut group = vec![payment(1), payment(2)];
        let id = assign_group_id(&mut group).unwrap();
        assert!(group.iter().all(|tx| tx.group == Some(id)));
        assert_eq!(verify_group(&group).unwrap(), id);
    }

    #[test]
    fn id_ignores_existing_group_field() {
        let plain = vec![payment(1), payment(2)];
        let mut stamped = plain.clone();
        let id = assign_group_id(&mut stamped).unwrap();
        assert_eq!(compute_group_id(&plain).unwrap(), id);
        assert_eq!(compute_group_id(&stamped).unwrap(), id);
    }

    #[test]
    fn order_matters() {
        let forward = compute_group_id(&[payment(1), payment(2)]).unwrap();
        let reverse = compute_group_id(&[payment(2), payment(1)]).unwrap();
        assert_ne!(forward, reverse);
    }

    #[test]
    fn detects_tampered_member() {
        let mut group = vec![payment(1), payment(2)];
        assign_group_id(&mut group).unwrap();
        if let crate::TransactionKind::Payment { amount, .. } = &mut group[1].kind {
            *amount = 1;
        }
        assert!(matches!(
            verify_group(&group),
            Err(TransactionError::GroupMismatch { index: 0 })
        ));

        let mut single = vec![payment(3)];
        assert!(matches!(
            verify_group(&single),
            Err(TransactionError::GroupMismatch { index: 0 })
        ));
        assign_group_id(&mut single).unwrap();
        verify_group(&single).unwrap();
    }

    #[test]
    fn rejects_bad_sizes() {
        assert_eq!(compute_group_id(&[]), Err(TransactionError::EmptyGroup));
        let oversized = vec![payment(1); MAX_GROUP_SIZE + 1];
        assert!(matches!(
            compute_group_id(&oversized),
            Err(TransactionError::GroupTooLarge { size: 17, max: 16 })
        ));
    }
}
