use std::collections::VecDeque;

use projiter::algo;
use projiter::prelude::*;

// A cursor over an external container with a non-contiguous layout.
// This proves the cursor traits are implementable by "outside crates".
#[derive(Clone, Copy)]
struct DequeCursor {
    ptrs: *const Vec<*mut i32>,
    pos: isize,
}

impl DequeCursor {
    fn begin(ptrs: &Vec<*mut i32>) -> Self {
        Self { ptrs, pos: 0 }
    }
}

impl Cursor for DequeCursor {
    type Item = i32;

    fn as_ptr(&self) -> *mut i32 {
        unsafe { (&*self.ptrs)[self.pos as usize] }
    }

    fn step(&mut self) {
        self.pos += 1;
    }
}

impl BidirectionalCursor for DequeCursor {
    fn step_back(&mut self) {
        self.pos -= 1;
    }
}

impl RandomAccessCursor for DequeCursor {
    fn jump(&mut self, delta: isize) {
        self.pos += delta;
    }

    fn distance_from(&self, origin: &Self) -> isize {
        self.pos - origin.pos
    }
}

#[test]
fn test_external_cursor_compatibility() {
    let mut deque: VecDeque<i32> = VecDeque::with_capacity(8);
    // Force the ring buffer to wrap.
    for v in [8, 7, 6, 5] {
        deque.push_back(v);
    }
    for v in [4, 3, 2, 1] {
        deque.push_front(v);
    }
    let ptrs: Vec<*mut i32> = deque.iter_mut().map(|v| v as *mut i32).collect();

    let len = ptrs.len();
    let first = make_projection_iterator(DequeCursor::begin(&ptrs), FoldedInterleave::new(len));
    let last = first + len as isize;
    unsafe { algo::sort(first, last) };

    let laid_out: Vec<i32> = deque.iter().copied().collect();
    assert_eq!(laid_out, vec![1, 8, 2, 7, 3, 6, 4, 5]);
}

// Forward-only cursor: relies on the stepping `advance_by` default.
#[derive(Clone)]
struct CountingCursor<'a> {
    inner: SliceCursor<'a, u8>,
    steps: &'a std::cell::Cell<usize>,
}

impl Cursor for CountingCursor<'_> {
    type Item = u8;

    fn as_ptr(&self) -> *mut u8 {
        self.inner.as_ptr()
    }

    fn step(&mut self) {
        self.steps.set(self.steps.get() + 1);
        self.inner.step();
    }
}

#[test]
fn test_forward_cursor_advances_by_stepping() {
    let mut data = [1u8, 2, 3, 4, 5];
    let steps = std::cell::Cell::new(0);
    let mut cursor = CountingCursor {
        inner: SliceCursor::begin(&mut data),
        steps: &steps,
    };

    cursor.advance_by(3);
    assert_eq!(unsafe { *cursor.as_ptr() }, 4);
    assert_eq!(steps.get(), 3);
}

// Random-access cursor that keeps the stepping `advance_by` default and
// only provides the required `jump`.
#[derive(Clone, Copy)]
struct PlainCursor<'a>(SliceCursor<'a, i32>);

impl Cursor for PlainCursor<'_> {
    type Item = i32;

    fn as_ptr(&self) -> *mut i32 {
        self.0.as_ptr()
    }

    fn step(&mut self) {
        self.0.step();
    }
}

impl BidirectionalCursor for PlainCursor<'_> {
    fn step_back(&mut self) {
        self.0.step_back();
    }
}

impl RandomAccessCursor for PlainCursor<'_> {
    fn jump(&mut self, delta: isize) {
        self.0.jump(delta);
    }

    fn distance_from(&self, origin: &Self) -> isize {
        self.0.distance_from(&origin.0)
    }
}

#[test]
fn test_negative_projected_offsets_use_jump() {
    let mut data = [10, 20, 30, 40, 50];
    let mut base = PlainCursor(SliceCursor::begin(&mut data));
    base.jump(3);

    // Offsets 0, -1, -2, -3 relative to the base at position 3.
    let first = make_projection_iterator(base, |index: isize| -index);
    unsafe {
        assert_eq!((first + 2).read(), 20);
        assert_eq!(first.read(), 40);

        let last = first + 4;
        algo::reverse(first, last);
    }
    assert_eq!(data, [40, 30, 20, 10, 50]);
}

#[test]
fn test_borrowed_projection_shared_by_many_iterators() {
    struct Table(Vec<usize>);

    impl Projection for Table {
        type Output = usize;

        fn project(&self, index: isize) -> usize {
            self.0[index as usize]
        }
    }

    let table = Table(vec![2, 0, 3, 1]);
    let mut data = vec![40, 10, 30, 20];
    let first = make_borrowed_projection_iterator(SliceCursor::begin(&mut data), &table);
    let last = first + 4;

    unsafe {
        algo::sort(first, last);
        let view: Vec<i32> = algo::iter(first, last).copied().collect();
        assert_eq!(view, vec![10, 20, 30, 40]);
        assert_eq!(algo::iter(first, last).rev().next(), Some(&40));
    }
    assert_eq!(data, vec![20, 40, 10, 30]);
}

#[test]
fn test_stacked_projections_sort() {
    let mut data: Vec<i32> = vec![5, 3, 8, 1, 9, 2];
    let len = data.len();

    // Reverse first, then fold.
    let reversed = make_projection_iterator(SliceCursor::begin(&mut data), move |i: isize| {
        len as isize - 1 - i
    });
    let first = make_projection_iterator(reversed, FoldedInterleave::new(len));
    let last = first + len as isize;

    unsafe {
        algo::sort(first, last);
        assert_eq!(algo::to_vec(first, last), vec![1, 2, 3, 5, 8, 9]);
    }
}

#[test]
fn test_narrow_projection_result_types() {
    let mut data = vec![3, 1, 2];
    let small = |index: isize| (2 - index) as u8;
    sort_projected(&mut data, small).unwrap();
    assert_eq!(data, vec![3, 2, 1]);

    let wide = |index: isize| (2 - index) as i64;
    sort_projected(&mut data, wide).unwrap();
    assert_eq!(data, vec![3, 2, 1]);
}
