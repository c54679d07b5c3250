use super::*;
use crate::recording::RecordingPlayer;

#[test]
fn tick_is_a_no_op_until_a_vantage_exists() {
    let player = RecordingPlayer::with_deferred_vantage();
    let mut animator = OrientationAnimator::new();
    animator.tick(&player);
    animator.tick(&player);
    assert_eq!(player.vantage().render_count(), 0);

    player.make_vantage_ready();
    animator.tick(&player);
    assert_eq!(player.vantage().render_count(), 1);
}

#[test]
fn ticking_approaches_the_target_and_renders_every_frame() {
    let player = RecordingPlayer::new();
    let mut animator = OrientationAnimator::new();
    let target = default_target();

    let mut last_angle = player.vantage().orientation().angle_to(target);
    for frame in 1..=60 {
        animator.tick(&player);
        let angle = player.vantage().orientation().angle_to(target);
        assert!(angle <= last_angle + 1e-5, "diverged at frame {frame}");
        last_angle = angle;
    }
    assert_eq!(player.vantage().render_count(), 60);
    assert!(last_angle < 1e-3);
}

#[test]
fn vantage_is_memoized_after_first_resolution() {
    let player = RecordingPlayer::new();
    let mut animator = OrientationAnimator::new();
    animator.tick(&player);

    let vantage = player.vantage();
    animator.tick(&player);
    assert_eq!(vantage.render_count(), 2);
}
