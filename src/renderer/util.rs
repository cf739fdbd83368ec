/// Contiguous range of scanlines handed to one worker.
pub struct ImageRange {
    pub from: u32,
    pub to: u32,
}

/// Splits `height` scanlines into `count` contiguous ranges; the last
/// range absorbs the remainder.
pub fn create_image_ranges(count: u32, height: u32) -> Vec<ImageRange> {
    let per_range = height / count;
    let mut ranges = Vec::with_capacity(count as usize);
    for i in 0..count {
        let from = i * per_range;
        let to = if i + 1 == count {
            height
        } else {
            from + per_range
        };
        ranges.push(ImageRange { from, to });
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_tile_the_image_exactly() {
        for (count, height) in [(1, 10), (4, 100), (3, 101), (8, 7)] {
            let ranges = create_image_ranges(count, height);
            assert_eq!(ranges.len(), count as usize);
            assert_eq!(ranges[0].from, 0);
            assert_eq!(ranges.last().unwrap().to, height);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].to, pair[1].from);
            }
        }
    }
}
