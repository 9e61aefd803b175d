use optree3d::utils::RadixSort;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

fn stable_ranks<T: PartialOrd>(keys: &[T]) -> Vec<u32> {
    let mut ranks: Vec<u32> = (0..keys.len() as u32).collect();
    ranks.sort_by(|a, b| {
        keys[*a as usize]
            .partial_cmp(&keys[*b as usize])
            .unwrap()
    });
    ranks
}

#[test]
fn radix_sort_matches_a_stable_sort() {
    let mut rng = IsaacRng::seed_from_u64(0);

    for len in [1, 2, 255, 256, 257, 4000] {
        let unsigned: Vec<u32> = (0..len).map(|_| rng.gen_range(0..len as u32)).collect();
        let signed: Vec<i32> = (0..len).map(|_| rng.gen_range(-1000..1000)).collect();
        let floats: Vec<f32> = (0..len).map(|_| rng.gen_range(0.0..1.0e6)).collect();

        assert_eq!(RadixSort::new().sort_u32(&unsigned), &stable_ranks(&unsigned)[..]);
        assert_eq!(RadixSort::new().sort_i32(&signed), &stable_ranks(&signed)[..]);
        assert_eq!(RadixSort::new().sort_f32(&floats), &stable_ranks(&floats)[..]);
    }
}

#[test]
fn radix_sort_handles_extreme_keys() {
    let keys = [u32::MAX, 0, 1 << 31, 255, 256, u32::MAX - 1];
    assert_eq!(RadixSort::new().sort_u32(&keys), &stable_ranks(&keys)[..]);

    let keys = [i32::MAX, i32::MIN, -1, 0, 1, i32::MIN + 1];
    assert_eq!(RadixSort::new().sort_i32(&keys), &stable_ranks(&keys)[..]);

    let keys = [f32::MAX, -f32::MAX, -0.5, 0.5, 1.0e-30, -1.0e-30, 3.0];
    let mut sorter = RadixSort::new();
    let sorted: Vec<f32> = sorter.sort_f32(&keys).iter().map(|i| keys[*i as usize]).collect();
    let mut expected = keys.to_vec();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(sorted, expected);
}

#[test]
fn reused_sorter_follows_changing_keys() {
    let mut rng = IsaacRng::seed_from_u64(1);
    let mut keys: Vec<f32> = (0..1000).map(|i| i as f32 * 0.5).collect();
    keys.shuffle(&mut rng);
    let mut sorter = RadixSort::new();

    for frame in 0..10 {
        if frame % 3 == 2 {
            keys.shuffle(&mut rng);
        } else {
            // Small moves keeping the order.
            for k in &mut keys {
                *k += 0.1;
            }
        }

        let ranks = sorter.sort_f32(&keys).to_vec();
        let mut seen = vec![false; keys.len()];
        for w in ranks.windows(2) {
            assert!(keys[w[0] as usize] <= keys[w[1] as usize]);
        }
        for r in ranks {
            seen[r as usize] = true;
        }
        assert!(seen.into_iter().all(|s| s));
    }

    assert_eq!(sorter.total_calls(), 10);
    assert!(sorter.nb_hits() > 0);

    sorter.invalidate_ranks();
    let expected = stable_ranks(&keys);
    assert_eq!(sorter.sort_f32(&keys), &expected[..]);
}
