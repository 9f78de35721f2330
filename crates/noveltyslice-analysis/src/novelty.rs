//! Self-similarity novelty curve.
//!
//! A Gaussian-tapered checkerboard kernel is slid along the diagonal of the
//! frame self-similarity matrix. The response is high where the frames just
//! before a point resemble each other, the frames just after resemble each
//! other, and the two groups differ.

/// How frame similarity is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Similarity {
    /// Cosine of the angle between raw feature vectors.
    Cosine,
    /// Negated Euclidean distance between per-dimension standardized vectors.
    NegativeDistance,
}

/// Checkerboard kernel of odd `size`, flattened row-major.
///
/// Entry `(i, j)` for offsets `-h..=h` is `sign(i) * sign(j) * g(i, j)`, where
/// `g` is a Gaussian taper. The centre row and column are zero.
pub fn checkerboard_kernel(size: usize) -> Vec<f32> {
    let size = size.max(1) | 1;
    let half = (size / 2) as i32;
    let sigma = (half as f32 * 0.5).max(0.5);

    let mut kernel = Vec::with_capacity(size * size);
    for i in -half..=half {
        for j in -half..=half {
            let sign = (i.signum() * j.signum()) as f32;
            let g = (-((i * i + j * j) as f32) / (2.0 * sigma * sigma)).exp();
            kernel.push(sign * g);
        }
    }
    kernel
}

/// Compute the novelty curve for a feature matrix, normalized to `0..=1`.
///
/// Returns one value per frame. A curve with no positive response (silence,
/// constant input, fewer than two frames) is all zeros.
pub fn novelty_curve(frames: &[Vec<f32>], kernel_size: usize, similarity: Similarity) -> Vec<f32> {
    let n = frames.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let prepared = match similarity {
        Similarity::Cosine => unit_vectors(frames),
        Similarity::NegativeDistance => standardized(frames),
    };

    let size = kernel_size.max(1) | 1;
    let half = (size / 2) as isize;
    let kernel = checkerboard_kernel(size);

    // Frames outside the signal repeat the edge frame.
    let last = n as isize - 1;
    let mut curve: Vec<f32> = (0..n as isize)
        .map(|center| {
            let mut acc = 0.0;
            for i in -half..=half {
                if i == 0 {
                    continue;
                }
                let a = (center + i).clamp(0, last) as usize;
                for j in -half..=half {
                    if j == 0 {
                        continue;
                    }
                    let b = (center + j).clamp(0, last) as usize;
                    let k = kernel[((i + half) * size as isize + (j + half)) as usize];
                    acc += k * similarity_of(&prepared[a], &prepared[b], similarity);
                }
            }
            acc.max(0.0)
        })
        .collect();

    // Rounding residue of a balanced kernel is not novelty.
    let floor = 1e-6 * kernel.iter().map(|k| k.abs()).sum::<f32>();
    let peak = curve.iter().fold(0.0f32, |m, &v| m.max(v));
    if peak > floor {
        for v in &mut curve {
            *v /= peak;
        }
    } else {
        curve.iter_mut().for_each(|v| *v = 0.0);
    }
    curve
}

fn similarity_of(a: &[f32], b: &[f32], similarity: Similarity) -> f32 {
    match similarity {
        // Inputs are unit vectors already.
        Similarity::Cosine => a.iter().zip(b).map(|(x, y)| x * y).sum(),
        Similarity::NegativeDistance => -a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
    }
}

fn unit_vectors(frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
    frames
        .iter()
        .map(|f| {
            let norm = f.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 1e-10 {
                f.iter().map(|x| x / norm).collect()
            } else {
                vec![0.0; f.len()]
            }
        })
        .collect()
}

fn standardized(frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let dims = frames[0].len();
    let count = frames.len() as f32;
    let mut mean = vec![0.0f32; dims];
    let mut std = vec![0.0f32; dims];

    for f in frames {
        for (m, x) in mean.iter_mut().zip(f) {
            *m += x / count;
        }
    }
    for f in frames {
        for ((s, x), m) in std.iter_mut().zip(f).zip(&mean) {
            *s += (x - m) * (x - m) / count;
        }
    }

    frames
        .iter()
        .map(|f| {
            f.iter()
                .zip(mean.iter().zip(&std))
                .map(|(x, (m, var))| {
                    let sd = var.sqrt();
                    if sd > 1e-9 { (x - m) / sd } else { 0.0 }
                })
                .collect()
        })
        .collect()
}
