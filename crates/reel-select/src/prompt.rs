//! Prompt construction for the generation backend.

use reel_models::{ClipConstraints, TranscriptSegment};

/// Render the transcript as newline-separated `[start s-end s]: text`
/// lines, in segment order. This is the exact grounding context handed
/// to the generation backend; clip timestamps must come from it.
pub fn render_transcript(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|seg| format!("[{:.1}s-{:.1}s]: {}", seg.start, seg.end, seg.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the clip-selection prompt.
///
/// The backend must return only a JSON object; the shape is spelled out
/// verbatim so JSON-mode models can mirror it.
pub fn build_prompt(
    segments: &[TranscriptSegment],
    video_duration: f64,
    constraints: &ClipConstraints,
) -> String {
    let transcript = render_transcript(segments);
    let n = constraints.count;
    let min_dur = constraints.min_duration;
    let max_dur = constraints.max_duration;

    format!(
        r#"You are an expert at creating viral short-form content. Analyze this transcript with precise timestamps and select the {n} BEST viral clips.

CRITICAL RULES:
1. Each clip MUST start at the EXACT beginning of a sentence/thought and end at the EXACT completion of that sentence/thought
2. Never cut off mid-sentence or mid-word - clips must be complete thoughts
3. Each clip must be {min_dur:.0}-{max_dur:.0} seconds long
4. Clips cannot overlap and must use the EXACT timestamps provided
5. Focus on complete viral moments: hooks, revelations, advice, stories, funny moments

SELECTION CRITERIA (prioritize):
- Complete engaging stories or thoughts
- Surprising facts or revelations
- Actionable advice or tips
- Emotional moments or reactions
- Quotable one-liners with context
- Question-answer pairs

VIDEO DURATION: {video_duration} seconds

TRANSCRIPT WITH EXACT TIMESTAMPS:
{transcript}

Return ONLY valid JSON with EXACT timestamps from the transcript:
{{
  "clips": [
    {{
      "start": 34.5,
      "end": 67.2,
      "title": "Complete thought or hook",
      "virality_score": 85,
      "hook_type": "story_reveal",
      "reason": "Complete engaging story with clear beginning and end"
    }}
  ]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 5.25, "welcome back").unwrap(),
            TranscriptSegment::new(5.25, 12.0, "today we talk about crabs").unwrap(),
        ]
    }

    #[test]
    fn test_render_transcript_format() {
        let rendered = render_transcript(&segments());
        assert_eq!(
            rendered,
            "[0.0s-5.2s]: welcome back\n[5.2s-12.0s]: today we talk about crabs"
        );
    }

    #[test]
    fn test_prompt_contains_constraints_and_transcript() {
        let prompt = build_prompt(&segments(), 120.0, &ClipConstraints {
            count: 3,
            min_duration: 15.0,
            max_duration: 60.0,
        });

        assert!(prompt.contains("select the 3 BEST"));
        assert!(prompt.contains("15-60 seconds long"));
        assert!(prompt.contains("VIDEO DURATION: 120 seconds"));
        assert!(prompt.contains("[5.2s-12.0s]: today we talk about crabs"));
        assert!(prompt.contains("\"clips\""));
    }
}
