/// Property tests: ownership transfers settle on the newest epoch no matter
/// the order they arrive in.
use std::collections::BTreeSet;

use proptest::prelude::*;
use tandem_shared::{EntityId, HostType, OwnershipArbiter, OwnershipTransfer, PeerId};

fn transfers_strategy() -> impl Strategy<Value = Vec<OwnershipTransfer>> {
    proptest::collection::btree_set(1u32..10_000, 1..24)
        .prop_flat_map(|epochs: BTreeSet<u32>| {
            let count = epochs.len();
            (
                Just(epochs),
                proptest::collection::vec(proptest::option::of(0u8..8), count),
            )
        })
        .prop_map(|(epochs, owners)| {
            epochs
                .into_iter()
                .zip(owners)
                .map(|(epoch, owner)| OwnershipTransfer {
                    entity: EntityId::new(3),
                    owner: owner.map(PeerId),
                    epoch,
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

proptest! {
    #[test]
    fn prop_newest_epoch_wins(transfers in transfers_strategy()) {
        let mut arbiter = OwnershipArbiter::new(HostType::Client, PeerId(1));
        let newest = transfers
            .iter()
            .max_by_key(|transfer| transfer.epoch)
            .cloned()
            .expect("at least one transfer");

        for transfer in &transfers {
            arbiter.receive_broadcast(transfer);
        }

        prop_assert_eq!(arbiter.epoch(&newest.entity), newest.epoch);
        prop_assert_eq!(arbiter.owner(&newest.entity), newest.owner);
    }

    #[test]
    fn prop_applied_changes_have_rising_epochs(transfers in transfers_strategy()) {
        let mut arbiter = OwnershipArbiter::new(HostType::Client, PeerId(1));
        let mut last = 0;

        for transfer in &transfers {
            if let Some(change) = arbiter.receive_broadcast(transfer) {
                prop_assert!(change.epoch > last);
                last = change.epoch;
            }
        }
    }

    #[test]
    fn prop_server_decisions_replay_on_clients(owners in proptest::collection::vec(proptest::option::of(0u8..8), 1..32)) {
        let entity = EntityId::new(11);
        let mut server = OwnershipArbiter::new(HostType::Server, PeerId::SERVER);
        let mut client = OwnershipArbiter::new(HostType::Client, PeerId(2));
        server.try_register(entity);

        let mut decided = Vec::new();
        for owner in owners {
            let transfer = server
                .decide_transfer(entity, owner.map(PeerId))
                .expect("entity is not locked");
            decided.push(transfer);
        }
        for pair in decided.windows(2) {
            prop_assert_eq!(pair[1].epoch, pair[0].epoch + 1);
        }

        for transfer in decided.iter().rev() {
            client.receive_broadcast(transfer);
        }
        prop_assert_eq!(client.owner(&entity), server.owner(&entity));
        prop_assert_eq!(client.epoch(&entity), server.epoch(&entity));
    }
}
