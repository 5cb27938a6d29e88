//! Builds the chapter-generation prompt.
//!
//! The prompt is the contract that makes the model's free-text output
//! verifiable: it forces timestamps to come from the inline `[MM:SS]` markers
//! already present in the transcript and pins the output to one
//! `MM:SS Title` line per chapter with nothing else around it.

/// Build the full generation prompt for a formatted transcript.
///
/// Pure: identical inputs produce a byte-identical prompt.
pub fn build_chapter_prompt(formatted_transcript: &str, duration_minutes: u32) -> String {
    format!(
        r#"Objective: Generate meaningful video chapters based on the provided transcript, prioritizing logical content structure over arbitrary time intervals.

**Context:**
You are analyzing a transcript for a video that is approximately {duration_minutes} minutes long. Your goal is to create chapter markers that enhance viewer navigation by identifying the distinct thematic sections, topic shifts, or key stages within the content.

**Core Chaptering Principles:**

1.  **Content is King:** The primary driver for a chapter break MUST be a logical shift in topic, a new major point, the start of a distinct step in a process, or a significant transition in the narrative. Do *not* create chapters just to fill time or meet a specific count.
2.  **Identify Logical Segments:** Read through the transcript and find the natural breakpoints where the focus changes. The points you would put in an outline of the video usually make good chapters.
3.  **Viewer Navigation:** Each chapter title should clearly signal the content of that segment so viewers can find specific information or skip to sections of interest.
4.  **Meaningful Duration:** Chapters should generally cover a substantial segment of content. Avoid extremely short chapters (e.g., under 15-20 seconds) unless they mark a very distinct, quick, but important transition.
5.  **Duration as Context, Not a Rule:** Use the total video duration ({duration_minutes} minutes) only as a general indicator. Longer videos are more likely to contain numerous distinct sections; shorter videos might only have a few. The actual number of chapters must be determined by the content structure, not a predefined count based on duration.
6.  **Full Coverage:** Chapters must span the entire video, starting at 00:00, with the final chapter covering the concluding part.

**Timestamp Instructions (Strict Adherence Required):**

1.  The transcript contains timestamps in `[MM:SS]` format.
2.  For each chapter you identify:
    a. Pinpoint the exact sentence or key phrase where the new topic actually begins.
    b. Locate the [MM:SS] timestamp that occurs immediately before or exactly at this starting sentence/phrase.
    c. Verification: read the text immediately following the selected [MM:SS] timestamp and confirm it genuinely marks the beginning of the topic described by your chapter title.
    d. Discrepancy handling: if the preceding timestamp feels significantly too early (the topic clearly starts much later, between two timestamps), select the [MM:SS] timestamp that is closest to the actual start instead, even if the chapter technically begins a few seconds after that timestamp appears. A click on the timestamp must land the viewer at the correct starting point of the discussion.
3.  **Remove the brackets** `[]` from the selected timestamp when creating the chapter list.
4.  Format **all** timestamps as `MM:SS`, with leading zeros for both minutes and seconds (e.g., `00:00`, `04:30`, `15:05`).

**Chapter Title Guidelines:**

1.  Keep titles concise (ideally 2-5 words).
2.  Make titles descriptive of the content of that chapter segment.
3.  Avoid generic titles like "Introduction" or "Conclusion" unless the content truly fits only that description.
4.  **IMPORTANT: Detect the language of the input transcript and use that SAME LANGUAGE for all chapter titles.**

**Output Format (Strict Adherence Required):**

*   Your output MUST consist ONLY of the chapter list.
*   Each line must follow the format: `MM:SS Chapter Title`
*   Do NOT include brackets, extra words, explanations, notes, or any text before or after the chapter list.

Here is the transcript:
{formatted_transcript}"#
    )
}
