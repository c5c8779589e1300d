//! Cross-channel fusion of per-block artifact flags

/// OR one channel's flags into the running aggregate
///
/// Only ever flips false to true. Sequences are expected to share the same
/// block grid; extra trailing entries on either side are ignored.
pub fn merge_flags(aggregate: &mut [bool], channel: &[bool]) {
    for (acc, &flag) in aggregate.iter_mut().zip(channel) {
        if flag {
            *acc = true;
        }
    }
}

/// Fold per-channel flags into one sequence: block `i` is set iff any channel sets it
///
/// The first channel seeds the aggregate. Order of channels does not affect the result.
pub fn aggregate_channels<I>(channels: I) -> Vec<bool>
where
    I: IntoIterator<Item = Vec<bool>>,
{
    let mut channels = channels.into_iter();
    let Some(mut aggregate) = channels.next() else {
        return Vec::new();
    };

    for flags in channels {
        merge_flags(&mut aggregate, &flags);
    }
    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(aggregate_channels(Vec::<Vec<bool>>::new()).is_empty());
    }

    #[test]
    fn test_single_channel_passthrough() {
        let flags = vec![true, false, true];
        assert_eq!(aggregate_channels(vec![flags.clone()]), flags);
    }

    #[test]
    fn test_or_across_channels() {
        let a = vec![true, false, false, false];
        let b = vec![false, false, true, false];
        let c = vec![false, true, false, false];
        assert_eq!(
            aggregate_channels(vec![a, b, c]),
            vec![true, true, true, false]
        );
    }

    #[test]
    fn test_commutative() {
        let a = vec![true, false, true, false, false];
        let b = vec![false, false, true, true, false];
        assert_eq!(
            aggregate_channels(vec![a.clone(), b.clone()]),
            aggregate_channels(vec![b, a])
        );
    }

    #[test]
    fn test_never_clears_a_flag() {
        let mut acc = vec![true, true, false];
        merge_flags(&mut acc, &[false, false, false]);
        assert_eq!(acc, vec![true, true, false]);
    }
}
