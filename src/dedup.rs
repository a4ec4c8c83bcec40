/*!
 * Collapsing of duplicated caption runs.
 *
 * Broadcast and livestream exports often re-render one on-screen line as a
 * run of cues sharing the same text, each cue starting exactly where the
 * previous one ended. This module collapses every such run into a single
 * spanning cue while leaving unique cues alone.
 */

use std::collections::HashMap;

use crate::caption::{Caption, CaptionTrack};

/// Collapse contiguous same-text cue runs in place.
///
/// Cues are grouped by text. For each text that occurs more than once, every
/// maximal run of its cues where each end time equals the next start time is
/// replaced by one cue spanning the run. Runs broken by a timing gap stay
/// split at the gap. The track comes back sorted by start time.
pub fn collapse_repeats(track: &mut CaptionTrack) {
    if track.is_empty() {
        return;
    }

    let mut frequency: HashMap<String, usize> = HashMap::new();
    for caption in track.iter() {
        *frequency.entry(caption.text().to_string()).or_insert(0) += 1;
    }

    // Order so that all cues sharing a text sit together, rarest text first.
    // Repeated groups then occupy the tail and can be peeled off it whole.
    track.captions.sort_by(|a, b| {
        let ka = (frequency[a.text()], a.text(), a.start());
        let kb = (frequency[b.text()], b.text(), b.start());
        ka.cmp(&kb)
    });

    let mut merged = Vec::new();
    while let Some(last) = track.captions.last() {
        let count = frequency[last.text()];
        if count < 2 {
            break;
        }

        // The tail holds every occurrence of this text, sorted by start
        let run = track.captions.split_off(track.captions.len() - count);
        merge_contiguous(&run, &mut merged);
    }

    track.captions.append(&mut merged);
    track.sort_by_start();
}

/// Merge each maximal contiguous stretch of a same-text run into one cue
fn merge_contiguous(run: &[Caption], out: &mut Vec<Caption>) {
    let mut i = 0;
    while i < run.len() {
        let mut j = i;
        while j + 1 < run.len() && run[j].end() == run[j + 1].start() {
            j += 1;
        }
        out.push(run[i].merged_with(&run[j]));
        i = j + 1;
    }
}
