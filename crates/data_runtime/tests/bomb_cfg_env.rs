use data_runtime::configs::bomb::{BombCfg, load_default};

#[test]
fn env_overrides_apply_then_validate() {
    unsafe {
        std::env::set_var("BOMB_FUSE_S", "4.5");
        std::env::set_var("BOMB_THROW_FORCE", "12");
    }
    let cfg = load_default().expect("load");
    assert_eq!(cfg.fuse_s, 4.5);
    assert_eq!(cfg.throw_force, 12.0);
    assert_eq!(cfg.ground_check_m, BombCfg::default().ground_check_m);

    // An out-of-range override falls back to defaults instead of failing
    unsafe {
        std::env::set_var("BOMB_FUSE_S", "-1");
    }
    let cfg = load_default().expect("load");
    assert_eq!(cfg, BombCfg::default());
}
