//! Math utility functions

/// Argmax - find index of maximum value
pub fn argmax(x: &[f32]) -> usize {
    x.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        let x = vec![1.0, 5.0, 3.0, 2.0];
        assert_eq!(argmax(&x), 1);
    }

    #[test]
    fn test_argmax_first_of_ties() {
        let x = vec![0.2, 0.2, 0.2];
        assert_eq!(argmax(&x), 0);
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), 0);
    }
}
