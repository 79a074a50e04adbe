use tandem_shared::{ComponentHashTable, HierarchyHash, HierarchyHasher, ObjectHandle, SceneGraph};
use tandem_test::{build_level, TestScene};

#[test]
fn same_level_hashes_the_same_on_every_peer() {
    let mut first = TestScene::new(10);
    let mut second = TestScene::new(90_000);
    let a = build_level(&mut first);
    let b = build_level(&mut second);

    let pairs = [
        (a.world, b.world),
        (a.first_crate, b.first_crate),
        (a.second_crate, b.second_crate),
        (a.gun_handle, b.gun_handle),
        (a.gun_pump, b.gun_pump),
        (a.door_knob, b.door_knob),
        (a.arena, b.arena),
    ];
    for (left, right) in pairs {
        assert_ne!(left, right);
        assert_eq!(
            HierarchyHasher::hash(&first, left),
            HierarchyHasher::hash(&second, right)
        );
    }
}

#[test]
fn same_named_siblings_hash_apart() {
    let mut scene = TestScene::new(1);
    let level = build_level(&mut scene);

    assert_eq!(
        HierarchyHasher::full_path(&scene, level.first_crate),
        HierarchyHasher::full_path(&scene, level.second_crate)
    );
    assert_ne!(
        HierarchyHasher::hash(&scene, level.first_crate),
        HierarchyHasher::hash(&scene, level.second_crate)
    );
}

#[test]
fn renaming_an_ancestor_changes_the_hash() {
    let mut scene = TestScene::new(1);
    let level = build_level(&mut scene);
    let before = HierarchyHasher::hash(&scene, level.gun_pump);

    scene.rename(level.gun, "Rifle");

    assert_ne!(before, HierarchyHasher::hash(&scene, level.gun_pump));
}

#[test]
fn destroyed_objects_have_no_hash() {
    let mut scene = TestScene::new(1);
    let level = build_level(&mut scene);

    scene.destroy(level.gun);

    assert_eq!(HierarchyHasher::hash(&scene, level.gun_pump), None);
    assert_eq!(HierarchyHasher::full_path(&scene, level.gun), None);
}

#[test]
fn zone_paths_resolve_back_to_the_zone() {
    let mut scene = TestScene::new(1);
    let level = build_level(&mut scene);

    let path = HierarchyHasher::full_path(&scene, level.arena).expect("in scene");

    assert_eq!(path, "World/Arena");
    assert_eq!(scene.find(&path), Some(level.arena));
    assert_eq!(scene.find("World/Nowhere"), None);
}

#[test]
fn colliding_hashes_share_a_chain() {
    let mut table = ComponentHashTable::new();
    let hash = HierarchyHash::new(0xDEAD_BEEF);

    assert_eq!(table.register(hash, ObjectHandle(1)), 0);
    assert_eq!(table.register(hash, ObjectHandle(2)), 1);
    assert_eq!(table.lookup_first(&hash), Some(ObjectHandle(1)));
    assert_eq!(table.lookup(&hash, 1), Some(ObjectHandle(2)));

    assert_eq!(table.remove(&ObjectHandle(1)), Some((hash, 0)));
    assert_eq!(table.lookup(&hash, 1), Some(ObjectHandle(2)));
    assert_eq!(table.register(hash, ObjectHandle(3)), 0);
    assert_eq!(table.reverse_lookup(&ObjectHandle(3)), Some((hash, 0)));
}
