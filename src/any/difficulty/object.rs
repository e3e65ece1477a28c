/// A difficulty object that knows its position within the list of all
/// difficulty objects.
pub trait IDifficultyObject {
    type DifficultyObjects: IDifficultyObjects + ?Sized;

    fn idx(&self) -> usize;

    /// The object `backwards_idx + 1` positions before this one.
    fn previous<'a>(
        &self,
        backwards_idx: usize,
        diff_objects: &'a Self::DifficultyObjects,
    ) -> Option<&'a <Self::DifficultyObjects as IDifficultyObjects>::DifficultyObject> {
        self.idx()
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| diff_objects.get(idx))
    }

    /// The object `forwards_idx + 1` positions after this one.
    fn next<'a, D>(&self, forwards_idx: usize, diff_objects: &'a [D]) -> Option<&'a D> {
        diff_objects.get(self.idx() + (forwards_idx + 1))
    }
}

pub trait IDifficultyObjects {
    type DifficultyObject: HasStartTime;

    fn get(&self, idx: usize) -> Option<&Self::DifficultyObject>;
}

impl<T: HasStartTime> IDifficultyObjects for [T] {
    type DifficultyObject = T;

    fn get(&self, idx: usize) -> Option<&Self::DifficultyObject> {
        self.get(idx)
    }
}

pub trait HasStartTime {
    fn start_time(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        idx: usize,
        start_time: f64,
    }

    impl IDifficultyObject for Dummy {
        type DifficultyObjects = [Self];

        fn idx(&self) -> usize {
            self.idx
        }
    }

    impl HasStartTime for Dummy {
        fn start_time(&self) -> f64 {
            self.start_time
        }
    }

    #[test]
    fn bounded_lookups() {
        let objects: Vec<_> = (0..4)
            .map(|idx| Dummy {
                idx,
                start_time: idx as f64 * 100.0,
            })
            .collect();

        let objects = objects.as_slice();
        let curr = &objects[2];

        assert_eq!(curr.previous(0, objects).map(|obj| obj.idx), Some(1));
        assert_eq!(curr.previous(1, objects).map(|obj| obj.idx), Some(0));
        assert!(curr.previous(2, objects).is_none());
        assert_eq!(curr.next(0, objects).map(|obj| obj.idx), Some(3));
        assert!(curr.next(1, objects).is_none());
        assert!(
            curr.previous(0, objects)
                .is_some_and(|obj| (obj.start_time() - 100.0).abs() < f64::EPSILON)
        );
    }
}
