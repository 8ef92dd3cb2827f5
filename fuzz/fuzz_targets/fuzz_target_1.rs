#![no_main]

use libfuzzer_sys::fuzz_target;
use skipset::{Direction, SkipList};
use std::collections::BTreeSet;

fuzz_target!(|data: &[u8]| {
    let Some((&height, ops)) = data.split_first() else {
        return;
    };

    let mut list = SkipList::new(height as usize % 16 + 1).unwrap();
    let mut expected = BTreeSet::new();

    for op in ops.chunks(2) {
        let target = op.get(1).copied().unwrap_or_default() as i64;

        match op[0] % 5 {
            0 => assert_eq!(list.remove(target), expected.remove(&target)),
            1 => assert_eq!(list.search(target).found, expected.contains(&target)),
            _ => assert_eq!(list.insert(target), expected.insert(target)),
        }
    }

    assert_eq!(list.len(), expected.len());
    assert!(list.iter().eq(expected.iter().copied()));

    let mut cursor = list.cursor(Direction::Backward);
    for value in expected.iter().rev() {
        assert_eq!(cursor.value(), Ok(*value));
        cursor.advance();
    }
    assert!(cursor.at_end());
});
