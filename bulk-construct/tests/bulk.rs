mod common;

use bulk_construct::{
    construct_n, construct_n_from, construct_n_with, destroy_n, try_construct_n_with,
    ConstructError, InPlace,
};
use common::{buffer, live, view, Event, Recorder, Tracked};

#[test]
fn construct_then_destroy() {
    const LEN: usize = 6;
    let (_memory, base) = buffer::<Tracked>(LEN);
    let mut alloc = Recorder::new(base);

    unsafe { construct_n(&mut alloc, base, LEN) };
    assert_eq!(live(), LEN);
    assert_eq!(alloc.constructed(), [0, 1, 2, 3, 4, 5]);
    assert!(alloc.destroyed().is_empty());

    unsafe { destroy_n(&mut alloc, base, LEN) };
    assert_eq!(live(), 0);
    assert_eq!(alloc.destroyed(), [5, 4, 3, 2, 1, 0]);
    assert_eq!(alloc.events.len(), 2 * LEN);
}

#[test]
fn empty_runs() {
    let (_memory, base) = buffer::<Tracked>(0);
    let mut alloc = Recorder::new(base);

    unsafe {
        construct_n(&mut alloc, base, 0);
        construct_n_from(&mut alloc, base, 0, &[Tracked::new(1)]).unwrap();
        construct_n_with(&mut alloc, base, 0, Tracked::new);
        destroy_n(&mut alloc, base, 0);
    }

    assert!(alloc.events.is_empty());
    assert_eq!(live(), 0);
}

#[test]
fn broadcast_one_prototype() {
    let (_memory, base) = buffer::<Tracked>(4);
    let mut alloc = Recorder::new(base);
    let prototype = [Tracked::new(7)];

    unsafe { construct_n_from(&mut alloc, base, 4, &prototype) }.unwrap();
    let copies = unsafe { view(base, 4) };
    assert!(copies.iter().all(|copy| *copy == prototype[0]));
    assert_eq!(live(), 5);

    unsafe { destroy_n(&mut alloc, base, 4) };
    assert_eq!(live(), 1);
}

#[test]
fn positional_copy() {
    let (_memory, base) = buffer::<String>(3);
    let source = ["a".to_string(), "b".to_string(), "c".to_string()];

    unsafe { construct_n_from(&mut InPlace, base, 3, &source) }.unwrap();
    assert_eq!(unsafe { view(base, 3) }, source);
    unsafe { destroy_n(&mut InPlace, base, 3) };
}

#[test]
fn tiled_pattern() {
    let (_memory, base) = buffer::<u16>(7);

    unsafe { construct_n_from(&mut InPlace, base, 7, &[1, 2, 3]) }.unwrap();
    assert_eq!(unsafe { view(base, 7) }, [1_u16, 2, 3, 1, 2, 3, 1]);
}

#[test]
fn empty_source_is_rejected() {
    let (_memory, base) = buffer::<Tracked>(2);
    let mut alloc = Recorder::new(base);

    let err = unsafe { construct_n_from(&mut alloc, base, 2, &[]) }.unwrap_err();
    assert_eq!(err, ConstructError::EmptySource { n: 2 });
    assert!(alloc.events.is_empty());
}

#[test]
fn generated_values() {
    let (_memory, base) = buffer::<Tracked>(5);
    let mut alloc = Recorder::new(base);

    unsafe { construct_n_with(&mut alloc, base, 5, |i| Tracked::new(i * i)) };
    let squares: Vec<usize> = unsafe { view(base, 5) }.iter().map(|t| t.0).collect();
    assert_eq!(squares, [0, 1, 4, 9, 16]);

    unsafe { destroy_n(&mut alloc, base, 5) };
    assert_eq!(live(), 0);
}

#[test]
fn fallible_success() {
    let (_memory, base) = buffer::<Tracked>(3);
    let mut alloc = Recorder::new(base);

    let result: Result<(), ()> = unsafe {
        try_construct_n_with(&mut alloc, base, 3, |i| Ok(Tracked::new(i)))
    };
    assert_eq!(result, Ok(()));
    assert_eq!(live(), 3);
    assert_eq!(
        alloc.events,
        [Event::Construct(0), Event::Construct(1), Event::Construct(2)]
    );

    unsafe { destroy_n(&mut alloc, base, 3) };
    assert_eq!(live(), 0);
}
