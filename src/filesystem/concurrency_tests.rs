use std::sync::Barrier;
use std::thread;

use crate::filesystem::{Tree, TreeError};

const THREADS: usize = 8;
const ROUNDS: usize = 500;

/// Folder name made of letters only, unique per index.
fn letters(mut index: usize) -> String {
    let mut name = String::new();
    loop {
        name.push((b'a' + (index % 26) as u8) as char);
        index /= 26;
        if index == 0 {
            return name;
        }
    }
}

#[test]
fn distinct_creates_under_one_parent_are_never_lost() {
    let tree = Tree::new();
    tree.create("/p/").unwrap();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let (tree, barrier) = (&tree, &barrier);
            scope.spawn(move || {
                barrier.wait();
                for round in 0..ROUNDS {
                    let path = format!("/p/{}/", letters(worker * ROUNDS + round));
                    assert_eq!(tree.create(&path), Ok(()), "create of {path} failed");
                }
            });
        }
    });

    let listing = tree.list("/p/").unwrap();
    assert_eq!(listing.split(',').count(), THREADS * ROUNDS);
}

#[test]
fn racing_creates_of_one_name_succeed_exactly_once() {
    for _ in 0..50 {
        let tree = Tree::new();
        let barrier = Barrier::new(THREADS);

        let successes = thread::scope(|scope| {
            let handles = (0..THREADS)
                .map(|_| {
                    let (tree, barrier) = (&tree, &barrier);
                    scope.spawn(move || {
                        barrier.wait();
                        tree.create("/same/")
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(Result::is_ok)
                .count()
        });

        assert_eq!(successes, 1);
        assert_eq!(tree.list("/").as_deref(), Some("same"));
    }
}

#[test]
fn concurrent_listings_see_a_stable_folder() {
    let tree = Tree::new();
    for name in ["a", "b", "c"] {
        tree.create(&format!("/{name}/")).unwrap();
    }
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            let (tree, barrier) = (&tree, &barrier);
            scope.spawn(move || {
                barrier.wait();
                for _ in 0..ROUNDS {
                    assert_eq!(tree.list("/").as_deref(), Some("a,b,c"));
                }
            });
        }
    });
}

#[test]
fn rename_is_atomic_for_listings_of_the_parent() {
    let tree = Tree::new();
    tree.create("/p/").unwrap();
    tree.create("/p/left/").unwrap();
    tree.create("/p/left/inner/").unwrap();

    thread::scope(|scope| {
        let tree = &tree;
        scope.spawn(move || {
            for _ in 0..ROUNDS {
                tree.move_folder("/p/left/", "/p/right/").unwrap();
                tree.move_folder("/p/right/", "/p/left/").unwrap();
            }
        });

        for _ in 0..THREADS - 1 {
            scope.spawn(move || {
                for _ in 0..ROUNDS {
                    let listing = tree.list("/p/").unwrap();
                    assert!(
                        listing == "left" || listing == "right",
                        "observed torn listing '{listing}'"
                    );
                }
            });
        }
    });

    assert_eq!(tree.list("/p/left/").as_deref(), Some("inner"));
}

#[test]
fn create_racing_remove_of_its_parent_never_loses_a_child() {
    let tree = Tree::new();
    let barrier = Barrier::new(2);

    thread::scope(|scope| {
        let (tree, barrier) = (&tree, &barrier);

        scope.spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS * 4 {
                let _ = tree.create("/a/");
                match tree.remove("/a/") {
                    Ok(())
                    | Err(TreeError::NotEmpty { .. })
                    | Err(TreeError::NotFound { .. }) => {}
                    Err(error) => panic!("unexpected remove failure: {error}"),
                }
            }
        });

        scope.spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS * 4 {
                if tree.create("/a/x/").is_ok() {
                    // While x exists, /a/ cannot be removed, so x must still be there.
                    assert_eq!(tree.remove("/a/x/"), Ok(()));
                }
            }
        });
    });

    if let Some(listing) = tree.list("/a/") {
        assert_eq!(listing, "");
    }
}

#[test]
fn crossing_moves_do_not_deadlock_and_keep_every_folder() {
    let tree = Tree::new();
    for path in ["/a/", "/a/b/", "/c/", "/c/d/"] {
        tree.create(path).unwrap();
    }
    let barrier = Barrier::new(4);

    thread::scope(|scope| {
        let (tree, barrier) = (&tree, &barrier);

        // Moves one way and back, in opposite directions between /a/ and /c/.
        scope.spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                let _ = tree.move_folder("/a/b/", "/c/b/");
                let _ = tree.move_folder("/c/b/", "/a/b/");
            }
        });
        scope.spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                let _ = tree.move_folder("/c/d/", "/a/d/");
                let _ = tree.move_folder("/a/d/", "/c/d/");
            }
        });
        // Removes take a parent and child lock, top-down.
        scope.spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                let _ = tree.create("/a/b/tmp/");
                let _ = tree.remove("/a/b/tmp/");
            }
        });
        scope.spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                let _ = tree.list("/a/");
                let _ = tree.list("/c/");
            }
        });
    });

    let mut all = Vec::new();
    for parent in ["/a/", "/c/"] {
        let listing = tree.list(parent).unwrap();
        all.extend(
            listing
                .split(',')
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
        );
    }
    all.sort_unstable();
    assert_eq!(all, vec!["b", "d"]);
}

#[test]
fn moves_into_each_other_never_detach_a_subtree() {
    for _ in 0..ROUNDS {
        let tree = Tree::new();
        tree.create("/a/").unwrap();
        tree.create("/b/").unwrap();
        let barrier = Barrier::new(2);

        let results = thread::scope(|scope| {
            let (tree, barrier) = (&tree, &barrier);
            let first = scope.spawn(move || {
                barrier.wait();
                tree.move_folder("/a/", "/b/a/")
            });
            let second = scope.spawn(move || {
                barrier.wait();
                tree.move_folder("/b/", "/a/b/")
            });
            [first.join().unwrap(), second.join().unwrap()]
        });

        let successes = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(successes, 1, "results: {results:?}");
        assert!(
            results
                .iter()
                .all(|result| matches!(result, Ok(()) | Err(TreeError::NotFound { .. })))
        );

        let top = tree.list("/").unwrap();
        assert!(top == "a" || top == "b", "root lists '{top}'");
        let nested = format!("/{top}/");
        assert_eq!(
            tree.list(&nested).as_deref(),
            Some(if top == "a" { "b" } else { "a" })
        );
    }
}

#[test]
fn tree_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Tree>();
    assert!(matches!(
        Tree::new().remove("/"),
        Err(TreeError::Busy { .. })
    ));
}
