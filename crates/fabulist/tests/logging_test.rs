#[test]
fn logger_installs_once() {
    fabulist::init_logging(true, true).unwrap();
    tracing::info!("logger installed");
    assert!(fabulist::init_logging(false, false).is_err());
}
