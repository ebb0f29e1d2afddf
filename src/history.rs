//! Ring-buffer history of temperature samples with live resize
//!
//! The buffer holds one sample (and one throttle-flags word) per surface
//! column. A sample of `0.0` means "never written" and is skipped by the
//! render model. Resizing preserves the newest data; the migration rules are
//! in [`migrate_ring`], kept as a standalone pure function because the index
//! arithmetic is the most delicate logic in the crate.

/// Migrate one plane of ring data into a buffer of a new capacity.
///
/// `cursor` is the next write position in `old`. Returns the new buffer and
/// the new cursor. Three cases:
///
/// 1. Grow: all old data survives; a zero-filled gap of "older than we ever
///    had" slots opens immediately after the cursor position.
/// 2. Shrink with `cursor <= new_capacity`: `[0, cursor)` survives in place
///    and the remaining slots take the newest tail of the old buffer.
/// 3. Shrink with `cursor > new_capacity`: the newest window sits wholly
///    before the cursor; it is copied to the front and the cursor resets to 0.
pub fn migrate_ring<T: Copy + Default>(
    old: &[T],
    cursor: usize,
    new_capacity: usize,
) -> (Vec<T>, usize) {
    let old_capacity = old.len();
    let mut new = vec![T::default(); new_capacity];
    if new_capacity > old_capacity {
        new[..cursor].copy_from_slice(&old[..cursor]);
        new[new_capacity - old_capacity + cursor..].copy_from_slice(&old[cursor..]);
        (new, cursor)
    } else if cursor <= new_capacity {
        new[..cursor].copy_from_slice(&old[..cursor]);
        new[cursor..].copy_from_slice(&old[old_capacity - new_capacity + cursor..]);
        (new, cursor)
    } else {
        new.copy_from_slice(&old[cursor - new_capacity..cursor]);
        (new, 0)
    }
}

/// Fixed-capacity circular history of samples and throttle flags
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    samples: Vec<f32>,
    flags: Vec<u32>,
    cursor: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be nonzero");
        Self {
            samples: vec![0.0; capacity],
            flags: vec![0; capacity],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Next write position; the newest sample sits at `cursor - 1 mod capacity`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn flags(&self) -> &[u32] {
        &self.flags
    }

    /// Write one sample at the cursor and advance it, wrapping at capacity.
    pub fn push(&mut self, sample: f32, flags: u32) {
        self.samples[self.cursor] = sample;
        self.flags[self.cursor] = flags;
        self.cursor = (self.cursor + 1) % self.capacity();
    }

    /// The most recently pushed sample (zero if nothing was ever pushed).
    pub fn latest(&self) -> f32 {
        let idx = if self.cursor > 0 {
            self.cursor - 1
        } else {
            self.capacity() - 1
        };
        self.samples[idx]
    }

    /// Samples in temporal order, oldest first, starting at the cursor.
    pub fn iter_chronological(&self) -> impl Iterator<Item = (f32, u32)> + '_ {
        let capacity = self.capacity();
        (0..capacity).map(move |i| {
            let idx = (self.cursor + i) % capacity;
            (self.samples[idx], self.flags[idx])
        })
    }

    /// Change capacity while keeping as much recent history as possible.
    pub fn resize(&mut self, new_capacity: usize) {
        assert!(new_capacity > 0, "history capacity must be nonzero");
        if new_capacity == self.capacity() {
            return;
        }
        let (samples, cursor) = migrate_ring(&self.samples, self.cursor, new_capacity);
        let (flags, flags_cursor) = migrate_ring(&self.flags, self.cursor, new_capacity);
        debug_assert_eq!(cursor, flags_cursor);
        self.samples = samples;
        self.flags = flags;
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// History whose samples are 1.0, 2.0, ... in push order, with flags
    /// mirroring the sample number, so temporal order is easy to assert.
    fn filled(capacity: usize, pushes: usize) -> History {
        let mut h = History::new(capacity);
        for i in 0..pushes {
            h.push((i + 1) as f32, (i + 1) as u32);
        }
        h
    }

    fn chronological(h: &History) -> Vec<f32> {
        h.iter_chronological().map(|(s, _)| s).collect()
    }

    /// Newest-first sample sequence, zeros (never-written) excluded.
    fn newest_first(h: &History) -> Vec<f32> {
        let mut v: Vec<f32> = chronological(h).into_iter().filter(|&s| s != 0.0).collect();
        v.reverse();
        v
    }

    #[test]
    fn push_wraps_and_evicts_the_oldest() {
        let mut h = filled(50, 50);
        assert_eq!(h.cursor(), 0);
        h.push(51.0, 51);
        assert_eq!(h.cursor(), 1);
        assert_eq!(h.latest(), 51.0);
        // 1.0 was evicted; chronological order is 2.0 ..= 51.0
        let expected: Vec<f32> = (2..=51).map(|i| i as f32).collect();
        assert_eq!(chronological(&h), expected);
    }

    #[test]
    fn n_more_pushes_return_to_the_same_cursor() {
        let mut h = filled(50, 7);
        let cursor = h.cursor();
        for i in 0..50 {
            h.push(100.0 + i as f32, 0);
        }
        assert_eq!(h.cursor(), cursor);
        assert_eq!(h.latest(), 149.0);
        // Only the newest 50 survive; sample 7.0 (the 51st from the end) is gone.
        assert!(!chronological(&h).contains(&7.0));
    }

    #[test]
    fn latest_reads_the_slot_before_the_cursor() {
        let mut h = History::new(50);
        assert_eq!(h.latest(), 0.0);
        h.push(0.42, 0);
        assert_eq!(h.latest(), 0.42);
    }

    #[test]
    fn grow_opens_a_zero_gap_after_the_cursor() {
        // capacity 50, cursor at 3 after wrapping
        let mut h = filled(50, 53);
        assert_eq!(h.cursor(), 3);
        h.resize(60);
        assert_eq!(h.capacity(), 60);
        assert_eq!(h.cursor(), 3);
        // [0, 3) unchanged, [3, 13) zeroed, [13, 60) holds the old tail
        assert_eq!(&h.samples()[..3], &[51.0, 52.0, 53.0]);
        assert!(h.samples()[3..13].iter().all(|&s| s == 0.0));
        assert_eq!(h.samples()[13], 4.0);
        assert_eq!(h.samples()[59], 50.0);
        // Temporal order of real data is intact.
        let expected: Vec<f32> = (4..=53).map(|i| i as f32).collect();
        assert_eq!(newest_first(&h).len(), 50);
        let lived: Vec<f32> = chronological(&h).into_iter().filter(|&s| s != 0.0).collect();
        assert_eq!(lived, expected);
    }

    #[test]
    fn shrink_keeping_cursor_drops_the_oldest_tail() {
        // capacity 60, cursor at 5
        let mut h = filled(60, 65);
        assert_eq!(h.cursor(), 5);
        h.resize(52);
        assert_eq!(h.capacity(), 52);
        assert_eq!(h.cursor(), 5);
        // The newest 52 samples are 14.0 ..= 65.0.
        let expected: Vec<f32> = (14..=65).map(|i| i as f32).collect();
        assert_eq!(chronological(&h), expected);
    }

    #[test]
    fn shrink_past_the_cursor_resets_it() {
        // capacity 80, 60 pushes: cursor at 60, all data before the cursor
        let mut h = filled(80, 60);
        assert_eq!(h.cursor(), 60);
        h.resize(50);
        assert_eq!(h.cursor(), 0);
        // Exactly the newest 50 samples, in order, filling the buffer.
        let expected: Vec<f32> = (11..=60).map(|i| i as f32).collect();
        assert_eq!(h.samples(), expected.as_slice());
        assert_eq!(chronological(&h), expected);
    }

    #[test]
    fn grow_then_shrink_restores_the_original() {
        for pushes in [0, 10, 50, 73, 120] {
            let original = filled(50, pushes);
            let mut h = original.clone();
            h.resize(90);
            h.resize(50);
            assert_eq!(h, original, "pushes = {}", pushes);
        }
    }

    #[test]
    fn resize_round_trips_preserve_the_surviving_window() {
        // Exhaustive capacity/cursor grid standing in for a property test.
        for n in 50..=58 {
            for m in 50..=58 {
                for pushes in [n / 2, n, n + n / 3, 3 * n] {
                    let original = filled(n, pushes);
                    let mut h = original.clone();
                    h.resize(m);
                    assert_eq!(h.capacity(), m);
                    h.resize(n);
                    assert_eq!(h.capacity(), n);
                    if m >= n {
                        assert_eq!(h, original, "n={} m={} pushes={}", n, m, pushes);
                    } else {
                        // The newest min(m, written) samples must match the
                        // original's newest window, in the same order.
                        let orig = newest_first(&original);
                        let survived = newest_first(&h);
                        let window = orig.len().min(m);
                        assert_eq!(
                            &survived[..window.min(survived.len())],
                            &orig[..window],
                            "n={} m={} pushes={}",
                            n,
                            m,
                            pushes
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn flags_plane_migrates_with_the_samples() {
        let mut h = filled(50, 55);
        h.resize(64);
        for (s, f) in h.iter_chronological() {
            if s != 0.0 {
                assert_eq!(s as u32, f);
            } else {
                assert_eq!(f, 0);
            }
        }
        h.resize(50);
        for (s, f) in h.iter_chronological() {
            assert_eq!(s as u32, f);
        }
    }

    #[test]
    fn resize_to_same_capacity_is_a_no_op() {
        let original = filled(50, 37);
        let mut h = original.clone();
        h.resize(50);
        assert_eq!(h, original);
    }
}
