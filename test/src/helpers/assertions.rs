/// Assert that a peer sees an entity as owned by the given peer
#[macro_export]
macro_rules! assert_owned_by {
    ($peer:expr, $entity:expr, $owner:expr) => {
        assert_eq!(
            $peer.session.arbiter().owner(&$entity),
            Some($owner),
            "{:?} should be owned by {:?} on {:?}",
            $entity,
            $owner,
            $peer.session.local_peer()
        );
    };
}

/// Assert that exactly one peer in the network is authoritative for an entity
#[macro_export]
macro_rules! assert_single_authority {
    ($network:expr, $entity:expr) => {
        let authoritative = std::iter::once(&$network.server)
            .chain($network.clients.iter())
            .filter(|peer| {
                peer.session.entities().contains(&$entity)
                    && peer.session.arbiter().is_authoritative(&$entity)
            })
            .count();
        assert_eq!(
            authoritative, 1,
            "{:?} should have exactly one authoritative peer",
            $entity
        );
    };
}
