use asteroid_shooter::compute::{new_session, start_game};
use asteroid_shooter::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Screen::Start, Screen::Start);
    assert_ne!(Screen::Playing, Screen::Paused);
    assert_ne!(Screen::Playing, Screen::GameOver);

    let screen = Screen::GameOver;
    assert_eq!(screen, Screen::GameOver);
}

#[test]
fn intent_flags_default_to_released() {
    let intent = IntentFlags::default();
    assert!(!intent.left);
    assert!(!intent.right);
    assert!(!intent.fire);
}

#[test]
fn game_session_clone_is_independent() {
    let original = start_game(&new_session(0));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 0.5;
    cloned.score = 999;
    cloned.asteroids.push(Asteroid {
        x: 0.0,
        y: 0.5,
        width: 0.2,
        height: 0.2,
        hit_points: 3,
        initial_hit_points: 3,
        speed: 0.004,
        flash_timer: 0,
    });
    cloned.bullets.push(Bullet {
        x: 0.0,
        y: 0.0,
        speed_x: 0.0,
        speed_y: 0.02,
        width: 0.02,
        height: 0.04,
    });

    assert_eq!(original.player.x, 0.0);
    assert_eq!(original.score, 0);
    assert!(original.asteroids.is_empty());
    assert!(original.bullets.is_empty());
}

#[test]
fn rect_is_plain_copyable_data() {
    let r = Rect { x: 0.1, y: -0.2, width: 0.3, height: 0.4 };
    let copy = r;
    assert_eq!(r, copy);
}
