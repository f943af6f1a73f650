use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from destination pixels to source pixels.
///
/// Nearest-neighbour only: the source is 1bpp, filtering would just smear
/// it into grey.
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_row: Vec<Option<usize>>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_row: Vec::new(),
        }
    }
}

/// Fits `src` into `dst` at the largest integer scale that keeps the aspect
/// ratio, centred. Letterbox pixels map to `None` columns/rows.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if src_w == 0 || src_h == 0 {
        return ScaleLut::empty();
    }
    let scale = (dst_w / src_w).min(dst_h / src_h).max(1);
    let pad_x = dst_w.saturating_sub(src_w * scale) / 2;
    let pad_y = dst_h.saturating_sub(src_h * scale) / 2;

    let src_x = (0..dst_w)
        .map(|x| match x.checked_sub(pad_x).map(|x| x / scale) {
            Some(sx) if sx < src_w => sx,
            _ => usize::MAX,
        })
        .collect();

    let src_row = (0..dst_h)
        .map(|y| match y.checked_sub(pad_y).map(|y| y / scale) {
            Some(sy) if sy < src_h => Some(sy * src_w),
            _ => None,
        })
        .collect();

    ScaleLut { src_x, src_row }
}

/// Parallel nearest-neighbour stretch, rows processed in parallel.
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], lut: &ScaleLut, border: u32) {
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(row) = lut.src_row.get(y).copied().flatten() else {
            dst_row.fill(border);
            return;
        };
        for (x, px) in dst_row.iter_mut().enumerate() {
            *px = match lut.src_x.get(x) {
                Some(&sx) if sx != usize::MAX => src[row + sx],
                _ => border,
            };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_scale_with_letterbox() {
        let lut = build_scale_lut(10, 6, 2, 1);
        // scale = min(5, 6) = 5, pad_y = (6 - 5) / 2 = 0
        let src = [1u32, 2];
        let mut dst = vec![0u32; 60];
        blit_nearest(&mut dst, 10, &src, &lut, 9);

        assert_eq!(&dst[..10], &[1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
        assert_eq!(&dst[50..], &[9; 10]);
    }

    #[test]
    fn centres_horizontally() {
        let lut = build_scale_lut(8, 2, 2, 1);
        // scale = min(4, 2) = 2, pad_x = 2
        let src = [1u32, 2];
        let mut dst = vec![0u32; 16];
        blit_nearest(&mut dst, 8, &src, &lut, 0);
        assert_eq!(&dst[..8], &[0, 0, 1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn empty_lut_fills_border() {
        let lut = ScaleLut::empty();
        let mut dst = vec![5u32; 4];
        blit_nearest(&mut dst, 2, &[], &lut, 7);
        assert_eq!(dst, vec![7; 4]);
    }
}
