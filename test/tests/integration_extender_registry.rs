use tandem_shared::{
    DefaultExtendersPlugin, ExtenderError, ExtenderRegistry, GripExtender, HostType, PeerId,
    SessionError, SyncConfig, SyncSession,
};

// The installed registry is process-wide, so every step lives in one test.
#[test]
fn installed_registry_lifecycle() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert!(matches!(
        SyncSession::from_installed(SyncConfig::default(), HostType::Server, PeerId::SERVER),
        Err(SessionError::Extender(ExtenderError::NotInstalled))
    ));

    let installed = ExtenderRegistry::builder()
        .add_plugin(DefaultExtendersPlugin)
        .lock()
        .install()
        .expect("first install");
    assert!(installed.contains::<GripExtender>());

    let second = ExtenderRegistry::builder().lock().install();
    assert!(matches!(second, Err(ExtenderError::AlreadyInstalled)));

    let session = SyncSession::from_installed(SyncConfig::default(), HostType::Client, PeerId(4))
        .expect("registry is installed");
    assert_eq!(session.local_peer(), PeerId(4));
    let server = SyncSession::from_installed(SyncConfig::default(), HostType::Server, PeerId(4))
        .expect("registry is installed");
    assert_eq!(server.local_peer(), PeerId::SERVER);

    ExtenderRegistry::reset().expect("reset");
    assert!(matches!(
        ExtenderRegistry::installed(),
        Err(ExtenderError::NotInstalled)
    ));
    assert!(ExtenderRegistry::builder().lock().install().is_ok());
    ExtenderRegistry::reset().expect("reset");
}
