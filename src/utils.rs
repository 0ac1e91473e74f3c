use crate::types::Position;

/// Linear interpolation between two f64 values
pub fn lerp_f64(start: f64, end: f64, alpha: f64) -> f64 {
    start + (end - start) * alpha
}

/// Linear interpolation between two Position values
pub fn lerp_position(start: Position, end: Position, alpha: f64) -> Position {
    Position {
        x: lerp_f64(start.x, end.x, alpha),
        y: lerp_f64(start.y, end.y, alpha),
    }
}

/// Index of the first item with the strictly highest key (row-major ties keep the earliest)
pub fn first_max_by_key<T, F>(items: &[T], mut key: F) -> Option<usize>
where
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, item) in items.iter().enumerate() {
        let score = key(item);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Index of the first item with the strictly lowest key
pub fn first_min_by_key<T, F>(items: &[T], mut key: F) -> Option<usize>
where
    F: FnMut(&T) -> f64,
{
    first_max_by_key(items, |item| -key(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_lerp_f64() {
        assert_approx_eq!(lerp_f64(0.0, 10.0, 0.5), 5.0);
        assert_approx_eq!(lerp_f64(0.0, 10.0, 0.0), 0.0);
        assert_approx_eq!(lerp_f64(0.0, 10.0, 1.0), 10.0);
        assert_approx_eq!(lerp_f64(5.0, 10.0, 0.5), 7.5);
    }

    #[test]
    fn test_lerp_position() {
        let start = Position { x: 0.0, y: 0.0 };
        let end = Position { x: 10.0, y: 20.0 };
        let result = lerp_position(start, end, 0.5);
        assert_approx_eq!(result.x, 5.0);
        assert_approx_eq!(result.y, 10.0);
    }

    #[test]
    fn test_first_max_keeps_earliest_tie() {
        let values = [1.0, 3.0, 2.0, 3.0];
        assert_eq!(first_max_by_key(&values, |v| *v), Some(1));

        let zeros = [0.0, 0.0, 0.0];
        assert_eq!(first_max_by_key(&zeros, |v| *v), Some(0));

        let empty: [f64; 0] = [];
        assert_eq!(first_max_by_key(&empty, |v| *v), None);
    }

    #[test]
    fn test_first_min_keeps_earliest_tie() {
        let values = [4.0, 1.0, 2.0, 1.0];
        assert_eq!(first_min_by_key(&values, |v| *v), Some(1));
    }
}
