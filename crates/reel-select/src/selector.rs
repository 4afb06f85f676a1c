//! Clip selection over a timestamped transcript.
//!
//! The selector asks the generation backend for ranked highlight
//! windows, validates everything it returns, and falls back to a
//! deterministic random pick over transcript segments when the backend
//! is unavailable or produces nothing usable. The caller always gets a
//! usable (possibly lower-quality) result; selection never fails.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, warn};

use reel_models::{CandidateClip, ClipConstraints, TranscriptSegment};

use crate::error::SelectResult;
use crate::gemini::TextGenerator;
use crate::prompt::build_prompt;

/// Score assigned to fallback clips; neutral by construction.
const FALLBACK_SCORE: f64 = 50.0;

/// Raw backend payload: `{"clips": [...]}`.
#[derive(Debug, Deserialize)]
struct RawClips {
    #[serde(default)]
    clips: Vec<RawClip>,
}

/// One clip object as the backend returned it, before validation.
#[derive(Debug, Deserialize)]
struct RawClip {
    start: Option<f64>,
    end: Option<f64>,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    virality_score: f64,
    #[serde(default = "default_hook_type")]
    hook_type: String,
    #[serde(default)]
    #[allow(dead_code)]
    reason: Option<String>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

fn default_hook_type() -> String {
    "general".to_string()
}

/// Selects ranked, sentence-aligned highlight windows from a transcript.
pub struct ClipSelector<G> {
    backend: G,
    rng: StdRng,
}

impl<G: TextGenerator> ClipSelector<G> {
    /// Create a selector with OS-seeded fallback randomness.
    pub fn new(backend: G) -> Self {
        Self::with_rng(backend, StdRng::from_os_rng())
    }

    /// Create a selector with an explicit RNG; tests seed this for
    /// deterministic fallback output.
    pub fn with_rng(backend: G, rng: StdRng) -> Self {
        Self { backend, rng }
    }

    /// Select up to `constraints.count` candidate clips, best first.
    ///
    /// Every returned clip satisfies
    /// `min_duration <= duration <= max_duration` and
    /// `start < end <= video_duration`. Backend errors and invalid or
    /// empty output all degrade to the fallback picker; this method
    /// never returns an error.
    pub async fn select_clips(
        &mut self,
        segments: &[TranscriptSegment],
        video_duration: f64,
        constraints: &ClipConstraints,
    ) -> Vec<CandidateClip> {
        match self.generate_clips(segments, video_duration, constraints).await {
            Ok(clips) if !clips.is_empty() => {
                info!(count = clips.len(), "backend selected clips");
                clips
            }
            Ok(_) => {
                warn!("backend returned no valid clips, using fallback selection");
                self.fallback_selection(segments, constraints)
            }
            Err(e) => {
                warn!(error = %e, "clip selection failed, using fallback selection");
                self.fallback_selection(segments, constraints)
            }
        }
    }

    /// Ask the backend and validate its output.
    async fn generate_clips(
        &self,
        segments: &[TranscriptSegment],
        video_duration: f64,
        constraints: &ClipConstraints,
    ) -> SelectResult<Vec<CandidateClip>> {
        let prompt = build_prompt(segments, video_duration, constraints);
        let response = self.backend.generate(&prompt).await?;
        let raw: RawClips = serde_json::from_str(&response)?;

        let mut validated = validate_clips(raw, video_duration, constraints);

        validated.sort_by(|a, b| {
            b.virality_score
                .partial_cmp(&a.virality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        validated.truncate(constraints.count);

        Ok(validated)
    }

    /// Deterministic substitute when generation is unavailable or
    /// invalid: random unused segments, sentence-aligned starts,
    /// neutral scores. May return fewer than `count` clips when
    /// segments run out; never errors.
    fn fallback_selection(
        &mut self,
        segments: &[TranscriptSegment],
        constraints: &ClipConstraints,
    ) -> Vec<CandidateClip> {
        let mut clips = Vec::new();
        let mut used: HashSet<usize> = HashSet::new();

        for i in 0..constraints.count {
            let available: Vec<usize> =
                (0..segments.len()).filter(|idx| !used.contains(idx)).collect();
            if available.is_empty() {
                break;
            }

            let idx = available[self.rng.random_range(0..available.len())];
            used.insert(idx);

            let segment = &segments[idx];
            let start = segment.start;
            let mut duration = (segment.end - start).min(constraints.max_duration);

            // Short segment: extend through the next one when possible.
            if duration < constraints.min_duration {
                if let Some(next) = segments.get(idx + 1) {
                    duration = (next.end - start).min(constraints.max_duration);
                }
            }

            clips.push(CandidateClip {
                start,
                end: start + duration,
                title: format!("Fallback clip {}", i + 1),
                virality_score: FALLBACK_SCORE,
                hook_type: "general".to_string(),
            });
        }

        clips
    }
}

/// Validate raw backend clips against the production constraints.
///
/// Items without timestamps are skipped; over-long items are clamped
/// from above (`end = start + max_duration`); everything else must fit
/// the duration window and the video bounds or it is dropped.
fn validate_clips(
    raw: RawClips,
    video_duration: f64,
    constraints: &ClipConstraints,
) -> Vec<CandidateClip> {
    let mut validated = Vec::new();

    for clip in raw.clips {
        let (start, end) = match (clip.start, clip.end) {
            (Some(start), Some(end)) => (start, end),
            _ => continue,
        };

        let end = if end - start > constraints.max_duration {
            start + constraints.max_duration
        } else {
            end
        };

        let duration = end - start;
        let valid = duration >= constraints.min_duration
            && duration <= constraints.max_duration
            && start < end
            && end <= video_duration;

        if valid {
            validated.push(CandidateClip {
                start,
                end,
                title: clip.title,
                virality_score: clip.virality_score,
                hook_type: clip.hook_type,
            });
        }
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectError;
    use async_trait::async_trait;

    struct FixedBackend(String);

    #[async_trait]
    impl TextGenerator for FixedBackend {
        async fn generate(&self, _prompt: &str) -> SelectResult<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl TextGenerator for FailingBackend {
        async fn generate(&self, _prompt: &str) -> SelectResult<String> {
            Err(SelectError::backend("backend down"))
        }
    }

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 5.0, "a").unwrap(),
            TranscriptSegment::new(5.0, 10.0, "b").unwrap(),
            TranscriptSegment::new(10.0, 15.0, "c").unwrap(),
        ]
    }

    fn constraints(count: usize, min: f64, max: f64) -> ClipConstraints {
        ClipConstraints {
            count,
            min_duration: min,
            max_duration: max,
        }
    }

    fn selector<G: TextGenerator>(backend: G) -> ClipSelector<G> {
        ClipSelector::with_rng(backend, StdRng::seed_from_u64(42))
    }

    #[tokio::test]
    async fn test_valid_backend_clips_ranked_and_truncated() {
        let backend = FixedBackend(
            r#"{"clips": [
                {"start": 0.0, "end": 20.0, "title": "low", "virality_score": 40, "hook_type": "story"},
                {"start": 30.0, "end": 50.0, "title": "high", "virality_score": 90, "hook_type": "advice"},
                {"start": 60.0, "end": 80.0, "title": "mid", "virality_score": 70, "hook_type": "question"}
            ]}"#
            .to_string(),
        );
        let mut sel = selector(backend);

        let clips = sel
            .select_clips(&segments(), 100.0, &constraints(2, 10.0, 30.0))
            .await;

        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].title, "high");
        assert_eq!(clips[1].title, "mid");
    }

    #[tokio::test]
    async fn test_overlong_clip_is_clamped_then_accepted() {
        let backend = FixedBackend(
            r#"{"clips": [{"start": 2.0, "end": 20.0, "title": "long", "virality_score": 80}]}"#
                .to_string(),
        );
        let mut sel = selector(backend);

        let clips = sel
            .select_clips(&segments(), 100.0, &constraints(3, 3.0, 10.0))
            .await;

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].start, 2.0);
        assert_eq!(clips[0].end, 12.0);
        assert_eq!(clips[0].duration(), 10.0);
    }

    #[tokio::test]
    async fn test_items_missing_timestamps_are_skipped() {
        let backend = FixedBackend(
            r#"{"clips": [
                {"title": "no times", "virality_score": 99},
                {"start": 1.0, "title": "no end", "virality_score": 99},
                {"start": 0.0, "end": 5.0, "title": "ok", "virality_score": 10}
            ]}"#
            .to_string(),
        );
        let mut sel = selector(backend);

        let clips = sel
            .select_clips(&segments(), 100.0, &constraints(5, 3.0, 8.0))
            .await;

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].title, "ok");
    }

    #[tokio::test]
    async fn test_out_of_bounds_clips_are_dropped() {
        let backend = FixedBackend(
            r#"{"clips": [
                {"start": 95.0, "end": 105.0, "title": "past the end", "virality_score": 80},
                {"start": 10.0, "end": 11.0, "title": "too short", "virality_score": 80},
                {"start": 8.0, "end": 8.0, "title": "empty", "virality_score": 80}
            ]}"#
            .to_string(),
        );
        let mut sel = selector(backend);

        // All invalid, so selection degrades to the fallback
        let clips = sel
            .select_clips(&segments(), 100.0, &constraints(2, 3.0, 8.0))
            .await;

        assert_eq!(clips.len(), 2);
        assert!(clips.iter().all(|c| c.title.starts_with("Fallback clip")));
    }

    #[tokio::test]
    async fn test_backend_failure_uses_fallback() {
        let mut sel = selector(FailingBackend);

        let clips = sel
            .select_clips(&segments(), 15.0, &constraints(3, 3.0, 8.0))
            .await;

        assert_eq!(clips.len(), 3);
        let mut starts: Vec<f64> = clips.iter().map(|c| c.start).collect();
        starts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        starts.dedup();
        // Each clip came from a distinct segment
        assert_eq!(starts, vec![0.0, 5.0, 10.0]);
        for clip in &clips {
            assert!(clip.duration() >= 3.0 && clip.duration() <= 8.0);
            assert_eq!(clip.virality_score, FALLBACK_SCORE);
            assert_eq!(clip.hook_type, "general");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_uses_fallback() {
        let mut sel = selector(FixedBackend("not json at all".to_string()));

        let clips = sel
            .select_clips(&segments(), 15.0, &constraints(2, 3.0, 8.0))
            .await;

        assert_eq!(clips.len(), 2);
        assert!(clips.iter().all(|c| c.title.starts_with("Fallback clip")));
    }

    #[tokio::test]
    async fn test_fallback_runs_out_of_segments() {
        let mut sel = selector(FailingBackend);
        let two = vec![
            TranscriptSegment::new(0.0, 5.0, "a").unwrap(),
            TranscriptSegment::new(5.0, 10.0, "b").unwrap(),
        ];

        let clips = sel.select_clips(&two, 10.0, &constraints(5, 3.0, 8.0)).await;
        assert_eq!(clips.len(), 2);
    }

    #[tokio::test]
    async fn test_fallback_extends_short_segment_into_next() {
        let mut sel = selector(FailingBackend);
        let segs = vec![
            TranscriptSegment::new(0.0, 1.0, "tiny").unwrap(),
            TranscriptSegment::new(1.0, 9.0, "longer").unwrap(),
        ];

        let clips = sel.select_clips(&segs, 10.0, &constraints(2, 3.0, 8.0)).await;

        let from_tiny = clips.iter().find(|c| c.start == 0.0).unwrap();
        // Extended through the next segment, then capped by max duration
        assert_eq!(from_tiny.end, 8.0);
    }

    #[tokio::test]
    async fn test_seeded_rng_is_deterministic() {
        let mut a = ClipSelector::with_rng(FailingBackend, StdRng::seed_from_u64(7));
        let mut b = ClipSelector::with_rng(FailingBackend, StdRng::seed_from_u64(7));

        let got_a = a.select_clips(&segments(), 15.0, &constraints(2, 3.0, 8.0)).await;
        let got_b = b.select_clips(&segments(), 15.0, &constraints(2, 3.0, 8.0)).await;

        assert_eq!(got_a, got_b);
    }

    #[tokio::test]
    async fn test_never_more_than_count_clips() {
        let backend = FixedBackend(
            r#"{"clips": [
                {"start": 0.0, "end": 5.0, "virality_score": 1},
                {"start": 5.0, "end": 10.0, "virality_score": 2},
                {"start": 10.0, "end": 15.0, "virality_score": 3},
                {"start": 20.0, "end": 25.0, "virality_score": 4}
            ]}"#
            .to_string(),
        );
        let mut sel = selector(backend);

        let clips = sel
            .select_clips(&segments(), 100.0, &constraints(2, 3.0, 8.0))
            .await;
        assert_eq!(clips.len(), 2);
        // Highest scores kept
        assert_eq!(clips[0].virality_score, 4.0);
        assert_eq!(clips[1].virality_score, 3.0);
    }
}
