use asteroid_shooter::audio::*;

// ── Volume validation ─────────────────────────────────────────────────────────

#[test]
fn volume_passes_through_in_range() {
    assert_eq!(validate_volume(0.0), 0.0);
    assert_eq!(validate_volume(0.7), 0.7);
    assert_eq!(validate_volume(1.0), 1.0);
}

#[test]
fn volume_clamps_out_of_range() {
    assert_eq!(validate_volume(-0.5), 0.0);
    assert_eq!(validate_volume(1.5), 1.0);
}

#[test]
fn volume_falls_back_on_non_finite_input() {
    assert_eq!(validate_volume(f32::NAN), 0.5);
    assert_eq!(validate_volume(f32::INFINITY), 0.5);
    assert_eq!(validate_volume(f32::NEG_INFINITY), 0.5);
}

// ── Channel table ─────────────────────────────────────────────────────────────

#[test]
fn sfx_channel_names_are_distinct() {
    let all = [
        Sfx::ButtonClick,
        Sfx::Fire,
        Sfx::AsteroidDestroyed,
        Sfx::ShipHit,
        Sfx::LoseLife,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a.channel(), b.channel());
        }
    }
}

#[test]
fn music_channel_names_are_distinct() {
    assert_ne!(MusicTrack::Start.channel(), MusicTrack::InGame.channel());
    assert_ne!(MusicTrack::InGame.channel(), MusicTrack::GameOver.channel());
    assert_ne!(MusicTrack::Start.channel(), MusicTrack::GameOver.channel());
}

#[test]
fn fire_channel_plays_quietly() {
    // Every other effect uses the shared SFX volume
    assert_eq!(Sfx::Fire.volume_override(), Some(0.05));
    assert_eq!(Sfx::AsteroidDestroyed.volume_override(), None);
}

// ── LogSink behaviour ─────────────────────────────────────────────────────────

#[test]
fn sink_clamps_configured_volumes() {
    let mut sink = LogSink::new();
    sink.set_sfx_volume(2.0);
    assert_eq!(sink.sfx_volume(), 1.0);
    sink.set_music_volume(-1.0);
    assert_eq!(sink.music_volume(), 0.0);
    sink.set_music_volume(f32::NAN);
    assert_eq!(sink.music_volume(), 0.5);
}

#[test]
fn play_music_replaces_the_current_track() {
    let mut sink = LogSink::new();
    assert_eq!(sink.current_track(), None);

    sink.play_music(MusicTrack::Start);
    assert_eq!(sink.current_track(), Some(MusicTrack::Start));

    sink.play_music(MusicTrack::InGame);
    assert_eq!(sink.current_track(), Some(MusicTrack::InGame));
}

#[test]
fn stop_all_silences_the_track() {
    let mut sink = LogSink::new();
    sink.play_music(MusicTrack::GameOver);
    sink.stop_all();
    assert_eq!(sink.current_track(), None);
}

#[test]
fn playing_a_cue_never_fails() {
    // Fire-and-forget: no Result, no panic, regardless of sink state
    let mut sink = LogSink::new();
    sink.play(Sfx::Fire);
    sink.play(Sfx::AsteroidDestroyed);
    sink.play(Sfx::ShipHit);
    sink.play(Sfx::ButtonClick);
    sink.play(Sfx::LoseLife);
}
