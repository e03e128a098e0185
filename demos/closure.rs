//! This example computes the transitive dependencies of packages. Every
//! package's closure is computed once and reused by all packages that depend
//! on it. A dependency cycle is reported as an error, unless the memo is told
//! to tolerate cycles.

use std::collections::{BTreeSet, HashMap};

use recmemo::{CycleDetected, Memo, Options, Resolver, Rule, Slot};

fn main() {
    let mut packages = Packages::default();
    packages.add("app", &["http", "json"]);
    packages.add("http", &["io", "log"]);
    packages.add("json", &["log"]);
    packages.add("io", &[]);
    packages.add("log", &[]);

    // [Miss] Resolves `app` and everything below it.
    let keys = [String::from("app")];
    let memo = Memo::with_keys(Closure(&packages), keys, Options::default())
        .expect("packages are acyclic");
    for (name, deps) in memo.resolved() {
        println!("{name}: {deps:?}");
    }

    // Now `log` depends on `app`, closing a cycle.
    packages.add("log", &["app"]);

    let mut strict = Memo::new(Closure(&packages));
    match strict.get("app".into()) {
        Ok(deps) => println!("app: {deps:?}"),
        Err(err) => println!("error: {err}"),
    }

    // With cycles permitted, `log` sees `app` in progress and stops there.
    let options = Options::new().permit_cycles(true);
    let mut lenient = Memo::with_options(Closure(&packages), options);
    if let Ok(Slot::Resolved(deps)) = lenient.lookup("app".into()) {
        println!("app (cycles permitted): {deps:?}");
    }
}

type Deps = BTreeSet<String>;

/// Package registry.
#[derive(Default)]
struct Packages(HashMap<String, Vec<String>>);

impl Packages {
    /// Register a package with its direct dependencies.
    fn add(&mut self, name: &str, deps: &[&str]) {
        self.0
            .insert(name.into(), deps.iter().map(|&dep| dep.into()).collect());
    }
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Cycle(#[from] CycleDetected<String>),
    #[error("unknown package {0}")]
    Unknown(String),
}

/// Computes the transitive dependencies of a package.
struct Closure<'a>(&'a Packages);

impl Rule<String, Deps, Error> for Closure<'_> {
    fn compute(
        &self,
        name: &String,
        memo: &mut Resolver<String, Deps, Error>,
    ) -> Result<Deps, Error> {
        let direct = self.0.0.get(name).ok_or_else(|| Error::Unknown(name.clone()))?;

        let mut deps = Deps::new();
        for dep in direct {
            deps.insert(dep.clone());
            if let Slot::Resolved(transitive) = memo.lookup(dep.clone())? {
                deps.extend(transitive);
            }
        }
        Ok(deps)
    }
}
