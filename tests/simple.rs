use recmemo::{CycleDetected, Memo, Options, Resolver, Slot};

#[test]
fn test_simple() {
    let mut memo = Memo::from_fn(factorial);
    assert_eq!(memo.get(4), Ok(24)); // [Miss] The memo is empty.
    assert_eq!(memo.get(4), Ok(24)); // [Hit] Always a hit from now on.
    assert_eq!(memo.get(3), Ok(6)); // [Hit] Resolved on the way to 4.
    assert_eq!(memo.get(6), Ok(720)); // [Miss] Only 5 and 6 are new.

    assert_eq!(memo.len(), 7);
    assert_eq!(memo.peek(&7), None);
}

#[test]
fn test_cycles() {
    // Collatz-style step that eventually reaches itself.
    let mut strict = Memo::from_fn(step);
    assert_eq!(strict.get(1), Err(CycleDetected::new(1)));

    let mut lenient =
        Memo::with_keys(step, [1, 6], Options::new().permit_cycles(true)).unwrap();
    assert_eq!(lenient.lookup(1), Ok(Slot::Resolved(3)));
    assert_eq!(lenient.lookup(6), Ok(Slot::Resolved(8)));
}

/// Compute the factorial of a number.
fn factorial(n: &u64, memo: &mut Resolver<u64, u64>) -> Result<u64, CycleDetected<u64>> {
    Ok(if *n == 0 { 1 } else { n * memo.get(n - 1)? })
}

/// Count the Collatz steps until the sequence runs into itself.
fn step(n: &u64, memo: &mut Resolver<u64, u64>) -> Result<u64, CycleDetected<u64>> {
    let next = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
    Ok(memo.lookup(next)?.unwrap_or(0) + 1)
}
