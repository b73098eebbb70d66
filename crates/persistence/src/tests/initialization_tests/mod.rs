// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens a store with `new_in_memory()`, which
//! exercises connection setup and migrations implicitly.

use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.put_rota("C1", "R1", &[String::from("u1")], 1).unwrap();

    assert_eq!(db1.list_rota_names("C1").unwrap(), vec![String::from("R1")]);
    assert!(db2.list_rota_names("C1").unwrap().is_empty());
}

#[test]
fn test_file_database_reopens_with_existing_rows() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "rota_persistence_reopen_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .put_rota("C1", "R1", &[String::from("u1")], 2)
            .unwrap();
    }

    // Migrations run again on reopen and must leave the data alone
    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let record = reopened.get_rota("C1", "R1").unwrap().unwrap();
    assert_eq!(record.duration_weeks, 2);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
