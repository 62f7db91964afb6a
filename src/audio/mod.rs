//! Audio cues and volume control
//!
//! The session reports [`Cue`]s through [`QueuedFeedback`]. Each cue maps to
//! one or two short synthesized tones, played with Bevy's [`Pitch`] source at
//! the master volume from [`GameSettings`].

use std::time::Duration;

use bevy::audio::{Pitch, Volume};
use bevy::prelude::*;

use crate::core::GameSettings;
use crate::game::collaborators::{Cue, Feedback};
use crate::game::plugin::Table;

/// [`Feedback`] implementation that queues cues for the ECS
#[derive(Debug, Clone, Default)]
pub struct QueuedFeedback {
    cues: Vec<Cue>,
}

impl QueuedFeedback {
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

impl Feedback for QueuedFeedback {
    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// A single synthesized beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: Duration,
    /// Delay after the cue before this tone starts
    pub delay: Duration,
}

const fn tone(frequency: f32, duration_ms: u64, delay_ms: u64) -> Tone {
    Tone {
        frequency,
        duration: Duration::from_millis(duration_ms),
        delay: Duration::from_millis(delay_ms),
    }
}

/// Tones making up `cue`
pub fn tones(cue: Cue) -> &'static [Tone] {
    const SELECT: [Tone; 1] = [tone(400.0, 50, 0)];
    const MOVE: [Tone; 2] = [tone(300.0, 100, 0), tone(200.0, 150, 50)];
    const CAPTURE: [Tone; 2] = [tone(150.0, 100, 0), tone(100.0, 200, 50)];

    match cue {
        Cue::Select => &SELECT,
        Cue::Move => &MOVE,
        Cue::Capture => &CAPTURE,
    }
}

/// Tones waiting for their start delay
#[derive(Resource, Debug, Default)]
pub struct ScheduledTones(pub Vec<(Timer, Tone)>);

/// Turn queued cues into scheduled tones
pub fn schedule_cue_tones(mut table: ResMut<Table>, mut scheduled: ResMut<ScheduledTones>) {
    for cue in table.feedback_mut().take_cues() {
        debug!("[AUDIO] Cue {:?}", cue);
        for &tone in tones(cue) {
            scheduled.0.push((Timer::new(tone.delay, TimerMode::Once), tone));
        }
    }
}

/// Play every tone whose delay has elapsed
pub fn play_due_tones(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut pitches: ResMut<Assets<Pitch>>,
    mut scheduled: ResMut<ScheduledTones>,
) {
    let volume = Volume::Linear(settings.volume());
    scheduled.0.retain_mut(|(timer, tone)| {
        timer.tick(time.delta());
        if !timer.is_finished() {
            return true;
        }
        commands.spawn((
            AudioPlayer(pitches.add(Pitch::new(tone.frequency, tone.duration))),
            PlaybackSettings::DESPAWN.with_volume(volume),
        ));
        false
    });
}

/// System that applies master volume to all audio sinks
///
/// Watches for changes to `GameSettings.master_volume` and updates all AudioSink components.
pub fn apply_master_volume_system(
    settings: Res<GameSettings>,
    mut audio_sinks: Query<&mut AudioSink>,
    mut last_volume: Local<Option<f32>>,
) {
    let current_volume = settings.volume();
    if let Some(prev_volume) = *last_volume {
        if (prev_volume - current_volume).abs() < 0.001 {
            return;
        }
    }
    *last_volume = Some(current_volume);

    for mut sink in audio_sinks.iter_mut() {
        sink.set_volume(Volume::Linear(current_volume));
    }

    if !audio_sinks.is_empty() {
        info!("[AUDIO] Applied master volume: {:.0}%", current_volume * 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_single_high_tone() {
        let select = tones(Cue::Select);
        assert_eq!(select.len(), 1);
        assert_eq!(select[0].frequency, 400.0);
        assert_eq!(select[0].duration, Duration::from_millis(50));
    }

    #[test]
    fn test_move_and_capture_descend() {
        for cue in [Cue::Move, Cue::Capture] {
            let pair = tones(cue);
            assert_eq!(pair.len(), 2);
            assert!(pair[0].frequency > pair[1].frequency);
            assert_eq!(pair[1].delay, Duration::from_millis(50));
        }
        assert_eq!(tones(Cue::Move)[0].frequency, 300.0);
        assert_eq!(tones(Cue::Capture)[1].frequency, 100.0);
    }

    #[test]
    fn test_second_tone_rings_longer() {
        let durations = |cue| tones(cue).iter().map(|t| t.duration.as_millis()).collect::<Vec<_>>();
        assert_eq!(durations(Cue::Move), vec![100, 150]);
        assert_eq!(durations(Cue::Capture), vec![100, 200]);
    }

    #[test]
    fn test_feedback_queue_drains() {
        let mut feedback = QueuedFeedback::default();
        feedback.cue(Cue::Select);
        feedback.cue(Cue::Capture);
        assert_eq!(feedback.take_cues(), vec![Cue::Select, Cue::Capture]);
        assert!(feedback.take_cues().is_empty());
    }
}
