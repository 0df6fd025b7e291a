use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use super::catalog::AudioRecord;

/// Duration label of one audio clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationLabel {
    Loading,
    Known(f32),
    /// Probe failed, only this clip is affected
    Unavailable,
}

impl DurationLabel {
    pub fn text(&self) -> String {
        match self {
            DurationLabel::Loading => "Loading...".to_owned(),
            DurationLabel::Known(secs) => format_time(*secs),
            DurationLabel::Unavailable => "N/A".to_owned(),
        }
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: f32) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_owned();
    }
    let total = seconds.floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Reads clip durations on a worker thread, one result per clip
pub struct DurationProbe {
    labels: HashMap<u32, DurationLabel>,
    receiver: Option<Receiver<(u32, Option<f32>)>>,
}

impl DurationProbe {
    /// Start probing every clip in `audio`
    pub fn spawn(audio: &[AudioRecord]) -> Self {
        let labels = audio
            .iter()
            .map(|a| (a.ordinal, DurationLabel::Loading))
            .collect();
        let jobs: Vec<(u32, PathBuf)> = audio
            .iter()
            .map(|a| (a.ordinal, a.asset_path.clone()))
            .collect();

        let (sender, receiver) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("duration-probe".to_owned())
            .spawn(move || {
                for (ordinal, path) in jobs {
                    let duration = match mp3_duration::from_path(&path) {
                        Ok(duration) => Some(duration.as_secs_f32()),
                        Err(e) => {
                            log::warn!("Could not read duration of {}: {:?}", path.display(), e);
                            None
                        }
                    };
                    if sender.send((ordinal, duration)).is_err() {
                        // receiver dropped, viewer is shutting down
                        return;
                    }
                }
            });

        let mut probe = Self {
            labels,
            receiver: Some(receiver),
        };
        if let Err(e) = spawned {
            log::error!("Failed to start duration probe thread: {e}");
            probe.receiver = None;
            for label in probe.labels.values_mut() {
                *label = DurationLabel::Unavailable;
            }
        }
        probe
    }

    /// Drain finished probes. Returns true if any label changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };

        let mut changed = false;
        loop {
            match receiver.try_recv() {
                Ok((ordinal, duration)) => {
                    let label = duration.map_or(DurationLabel::Unavailable, DurationLabel::Known);
                    self.labels.insert(ordinal, label);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    break;
                }
            }
        }
        changed
    }

    pub fn label(&self, ordinal: u32) -> DurationLabel {
        self.labels
            .get(&ordinal)
            .copied()
            .unwrap_or(DurationLabel::Unavailable)
    }

    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }
}

impl std::fmt::Debug for DurationProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurationProbe")
            .field("labels", &self.labels.len())
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(7.9), "0:07");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(f32::NAN), "0:00");
    }

    #[test]
    fn missing_files_become_unavailable() {
        let audio = vec![
            AudioRecord {
                ordinal: 1,
                display_name: "Durood 1".to_owned(),
                file_name: "01.mp3".to_owned(),
                asset_path: PathBuf::from("no/such/dir/01.mp3"),
            },
            AudioRecord {
                ordinal: 2,
                display_name: "Durood 2".to_owned(),
                file_name: "02.mp3".to_owned(),
                asset_path: PathBuf::from("no/such/dir/02.mp3"),
            },
        ];
        let mut probe = DurationProbe::spawn(&audio);
        while !probe.is_finished() {
            probe.poll();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(probe.label(1), DurationLabel::Unavailable);
        assert_eq!(probe.label(2).text(), "N/A");
        assert_eq!(probe.label(99), DurationLabel::Unavailable);
    }
}
