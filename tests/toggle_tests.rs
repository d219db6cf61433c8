use zcapture::TaskToggleState;

#[test]
fn test_toggle_defaults_to_off() {
    let mut toggle = TaskToggleState::new();
    assert!(!toggle.is_set());
    assert!(!toggle.consume());
}

#[test]
fn test_consume_resets_after_set() {
    let mut toggle = TaskToggleState::new();
    toggle.set(true);

    assert!(toggle.consume());
    assert!(!toggle.consume(), "second consume must see the reset value");
    assert!(!toggle.is_set());
}

#[test]
fn test_toggle_flips_and_peek_does_not_reset() {
    let mut toggle = TaskToggleState::default();
    assert!(toggle.toggle());
    assert!(toggle.is_set());
    assert!(toggle.is_set());
    assert!(!toggle.toggle());
    assert!(!toggle.consume());
}
