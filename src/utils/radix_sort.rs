//! Rank-based radix sorting with temporal coherence.

use alloc::vec::Vec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyKind {
    Unsigned,
    Signed,
    Float,
}

/// A radix sorter computing ranks, i.e., the list of indices of the input keys in sorted order.
///
/// Keys are sorted in four passes of 8 bits each. The rank buffers are kept between calls: the
/// previous ranks are used as the initial order of the next sort. If the new keys are already
/// sorted in that order (common when sorting slowly moving objects from one frame to the next),
/// the sort exits early and leaves the ranks unchanged.
///
/// Stability is relative to the initial order: on a fresh sorter, or after
/// [`RadixSort::invalidate_ranks`] or a change of key count, equal keys keep their index order.
/// Otherwise, equal keys keep the order of the previous ranks. Sorting floats is stable for
/// non-negative values only: equal negative values may be reordered. NaNs are not supported.
#[derive(Clone, Debug, Default)]
pub struct RadixSort {
    ranks: Vec<u32>,
    ranks2: Vec<u32>,
    valid_ranks: bool,
    total_calls: u32,
    nb_hits: u32,
}

impl RadixSort {
    /// Creates a sorter with empty rank buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ranks computed by the last sort.
    #[inline]
    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    /// The number of sorts performed so far.
    #[inline]
    pub fn total_calls(&self) -> u32 {
        self.total_calls
    }

    /// The number of sorts that found their input already sorted.
    #[inline]
    pub fn nb_hits(&self) -> u32 {
        self.nb_hits
    }

    /// Forgets the previous ranks: the next sort starts from the identity order.
    pub fn invalidate_ranks(&mut self) {
        self.valid_ranks = false;
    }

    /// Sorts unsigned integers.
    pub fn sort_u32(&mut self, keys: &[u32]) -> &[u32] {
        self.sort_bits(keys, KeyKind::Unsigned, |a, b| keys[a] <= keys[b])
    }

    /// Sorts signed integers.
    pub fn sort_i32(&mut self, keys: &[i32]) -> &[u32] {
        let bits: Vec<u32> = keys.iter().map(|k| *k as u32).collect();
        self.sort_bits(&bits, KeyKind::Signed, |a, b| keys[a] <= keys[b])
    }

    /// Sorts IEEE single precision floats.
    pub fn sort_f32(&mut self, keys: &[f32]) -> &[u32] {
        debug_assert!(
            keys.iter().all(|k| !k.is_nan()),
            "Radix sorting NaNs is not supported."
        );
        let bits: Vec<u32> = keys.iter().map(|k| k.to_bits()).collect();
        self.sort_bits(&bits, KeyKind::Float, |a, b| keys[a] <= keys[b])
    }

    fn resize(&mut self, nb: usize) {
        if self.ranks.len() != nb {
            self.ranks.resize(nb, 0);
            self.ranks2.resize(nb, 0);
            self.valid_ranks = false;
        }
    }

    fn set_identity_ranks(&mut self) {
        for (i, rank) in self.ranks.iter_mut().enumerate() {
            *rank = i as u32;
        }
        self.valid_ranks = true;
    }

    fn sort_bits(
        &mut self,
        bits: &[u32],
        kind: KeyKind,
        in_order: impl Fn(usize, usize) -> bool,
    ) -> &[u32] {
        let nb = bits.len();

        if nb == 0 {
            return &[];
        }

        debug_assert!(nb < (1 << 31), "Too many keys to sort.");
        self.total_calls += 1;
        self.resize(nb);

        // Temporal coherence: read the input in the previous sorted order.
        let already_sorted = if self.valid_ranks {
            self.ranks
                .windows(2)
                .all(|w| in_order(w[0] as usize, w[1] as usize))
        } else {
            (1..nb).all(|i| in_order(i - 1, i))
        };

        if already_sorted {
            self.nb_hits += 1;
            if !self.valid_ranks {
                self.set_identity_ranks();
            }
            return &self.ranks;
        }

        // All the histograms are built in a single read of the input.
        let mut histograms = [[0u32; 256]; 4];
        for key in bits {
            for (pass, histogram) in histograms.iter_mut().enumerate() {
                histogram[((key >> (pass * 8)) & 0xff) as usize] += 1;
            }
        }

        let nb_negatives: u32 = if kind == KeyKind::Unsigned {
            0
        } else {
            histograms[3][128..].iter().sum()
        };

        let mut links = [0usize; 256];

        for (pass, counts) in histograms.iter().enumerate() {
            let shift = pass * 8;
            let unique_byte = ((bits[0] >> shift) & 0xff) as usize;
            let msb_pass = pass == 3;

            if counts[unique_byte] as usize == nb {
                // All the keys share this byte. The pass is useless except for all-negative
                // floats, which must be reversed.
                if msb_pass && kind == KeyKind::Float && unique_byte >= 128 {
                    if self.valid_ranks {
                        for i in 0..nb {
                            self.ranks2[i] = self.ranks[nb - i - 1];
                        }
                    } else {
                        for i in 0..nb {
                            self.ranks2[i] = (nb - i - 1) as u32;
                        }
                    }
                    core::mem::swap(&mut self.ranks, &mut self.ranks2);
                    self.valid_ranks = true;
                }
                continue;
            }

            let byte = |id: usize| ((bits[id] >> shift) & 0xff) as usize;

            if !msb_pass || kind == KeyKind::Unsigned {
                links[0] = 0;
                for i in 1..256 {
                    links[i] = links[i - 1] + counts[i - 1] as usize;
                }
            } else {
                // Negative keys go first, positive ones are shifted after them.
                links[0] = nb_negatives as usize;
                for i in 1..128 {
                    links[i] = links[i - 1] + counts[i - 1] as usize;
                }

                if kind == KeyKind::Signed {
                    links[128] = 0;
                    for i in 129..256 {
                        links[i] = links[i - 1] + counts[i - 1] as usize;
                    }
                } else {
                    // Larger float bit patterns are more negative: reverse the order of
                    // the negative buckets and fill each of them backward.
                    links[255] = 0;
                    for i in 0..127 {
                        links[254 - i] = links[255 - i] + counts[255 - i] as usize;
                    }
                    for i in 128..256 {
                        links[i] += counts[i] as usize;
                    }
                }
            }

            let reversed_negatives = msb_pass && kind == KeyKind::Float;
            let mut place = |id: u32, ranks2: &mut [u32]| {
                let radix = byte(id as usize);
                if reversed_negatives && radix >= 128 {
                    links[radix] -= 1;
                    ranks2[links[radix]] = id;
                } else {
                    ranks2[links[radix]] = id;
                    links[radix] += 1;
                }
            };

            if self.valid_ranks {
                for i in 0..nb {
                    place(self.ranks[i], &mut self.ranks2);
                }
            } else {
                for i in 0..nb {
                    place(i as u32, &mut self.ranks2);
                }
            }

            core::mem::swap(&mut self.ranks, &mut self.ranks2);
            self.valid_ranks = true;
        }

        if !self.valid_ranks {
            self.set_identity_ranks();
        }

        &self.ranks
    }
}
