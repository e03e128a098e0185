//! This example demonstrates the most basic use: a recursive function whose
//! intermediate results are cached as a side effect of the first call.

use recmemo::{CycleDetected, Memo, Resolver};

fn main() {
    let mut memo = Memo::from_fn(factorial);

    // [Miss] Computes 0! through 4!, each exactly once.
    assert_eq!(memo.get(4), Ok(24));

    // [Hit] 3! was resolved on the way to 4!.
    assert_eq!(memo.get(3), Ok(6));

    let mut table: Vec<_> = memo.resolved().collect();
    table.sort();
    for (n, value) in table {
        println!("{n}! = {value}");
    }
}

/// Compute `n!` by recursing into `(n - 1)!`.
fn factorial(n: &u64, memo: &mut Resolver<u64, u64>) -> Result<u64, CycleDetected<u64>> {
    Ok(if *n == 0 { 1 } else { n * memo.get(n - 1)? })
}
